use std::path::PathBuf;

use thiserror::Error;

use skyguard_core::DomainError;
use skyguard_roi::RoiError;

pub type InfraResult<T> = Result<T, InfraError>;

/// Fatal, stage-level failures. Per-item generator failures never surface here.
#[derive(Debug, Error)]
pub enum InfraError {
    #[error("required input {} not found; {stage_hint}", .path.display())]
    MissingInput { path: PathBuf, stage_hint: String },

    #[error("{table} table is missing required columns: {}", .columns.join(", "))]
    MissingColumns {
        table: &'static str,
        columns: Vec<String>,
    },

    #[error("csv error in {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{} line {line}: {column} must be a finite number, got {value}", .path.display())]
    NonFiniteValue {
        path: PathBuf,
        line: u64,
        column: &'static str,
        value: f64,
    },

    #[error("json error in {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("io error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("data validation failed: {}", .failed.join(", "))]
    ValidationFailed { failed: Vec<String> },

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Roi(#[from] RoiError),
}

impl InfraError {
    pub fn missing_input(path: impl Into<PathBuf>, stage_hint: impl Into<String>) -> Self {
        Self::MissingInput {
            path: path.into(),
            stage_hint: stage_hint.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_input_names_the_prerequisite() {
        let err = InfraError::missing_input(
            "data/processed/risk_analysis.json",
            "run `skyguard detect` first",
        );
        assert_eq!(
            err.to_string(),
            "required input data/processed/risk_analysis.json not found; run `skyguard detect` first"
        );
    }

    #[test]
    fn missing_columns_lists_every_column() {
        let err = InfraError::MissingColumns {
            table: "inventory",
            columns: vec!["criticality".to_string(), "aog_cost_per_day".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "inventory table is missing required columns: criticality, aog_cost_per_day"
        );
    }
}
