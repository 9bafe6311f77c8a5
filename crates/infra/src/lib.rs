//! Infrastructure layer: configuration, snapshot files, stage runners.
//!
//! The domain crates are pure; everything that touches the filesystem lives here.

pub mod config;
pub mod error;
pub mod snapshot;
pub mod stages;
pub mod tables;
pub mod validate;

pub use config::PipelineConfig;
pub use error::{InfraError, InfraResult};
pub use stages::{run_detection, run_pipeline, run_recommendations, run_roi, run_validation};
pub use validate::{ValidationCheck, ValidationReport};
