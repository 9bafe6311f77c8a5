//! Tracing and logging setup shared by every Sky-Guard entry point.

/// Tracing configuration (filters, output format).
pub mod tracing;

pub use crate::tracing::{LOG_ENV_VAR, LogConfig, LogFormat, init, run_span};
