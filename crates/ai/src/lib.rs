//! `skyguard-ai`
//!
//! **Responsibility:** recommendation subsystem boundary.
//!
//! This crate is intentionally **not** part of the scoring model:
//! - It consumes ranked, already-scored components; it never rescores them.
//! - Generators are opaque: the core only relies on the record shape.
//! - A failing generator call loses one recommendation, never the batch.

pub mod generator;
pub mod parse;
pub mod playbook;
pub mod recommendation;
pub mod runner;

pub use generator::RecommendationGenerator;
pub use parse::parse_recommendation_payload;
pub use playbook::{PLAYBOOK_MODEL_ID, PlaybookCosts, PlaybookRecommender};
pub use recommendation::{
    AiError, ComponentRef, MitigationOption, Recommendation, RecommendationAnalysis,
    RecommendationBatch, RecommendationMetadata,
};
pub use runner::{DEFAULT_MAX_COMPONENTS, RecommendationRunner};
