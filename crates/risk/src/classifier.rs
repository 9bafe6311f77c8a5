//! Risk Classifier: composite score → risk tier via an ordered band table.
//!
//! Bands are closed on their upper bound: with the default table a score of
//! exactly 30 is Low, exactly 60 is Medium and anything above 60 is High.

use serde::{Deserialize, Serialize};

use skyguard_core::{DomainError, DomainResult, RiskLevel};

/// Upper end of the composite score range.
const MAX_SCORE: f64 = 100.0;

/// One `(upper_bound, level)` entry of the threshold table.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskBand {
    pub upper_bound: f64,
    pub level: RiskLevel,
}

/// Ordered threshold table (ascending upper bounds).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RiskThresholds {
    bands: Vec<RiskBand>,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            bands: vec![
                RiskBand { upper_bound: 30.0, level: RiskLevel::Low },
                RiskBand { upper_bound: 60.0, level: RiskLevel::Medium },
                RiskBand { upper_bound: 100.0, level: RiskLevel::High },
            ],
        }
    }
}

impl RiskThresholds {
    /// Build a table, rejecting empty, non-finite or non-ascending bounds.
    pub fn new(bands: Vec<RiskBand>) -> DomainResult<Self> {
        let table = Self { bands };
        table.validate()?;
        Ok(table)
    }

    pub fn validate(&self) -> DomainResult<()> {
        if self.bands.is_empty() {
            return Err(DomainError::validation("risk threshold table cannot be empty"));
        }
        if self.bands.iter().any(|b| !b.upper_bound.is_finite()) {
            return Err(DomainError::validation("risk thresholds must be finite"));
        }
        if self
            .bands
            .windows(2)
            .any(|w| w[1].upper_bound <= w[0].upper_bound)
        {
            return Err(DomainError::validation(
                "risk thresholds must be strictly ascending",
            ));
        }
        if self.bands.last().is_some_and(|b| b.upper_bound < MAX_SCORE) {
            return Err(DomainError::validation(format!(
                "last risk threshold must cover the score range (>= {MAX_SCORE})"
            )));
        }
        Ok(())
    }

    pub fn bands(&self) -> &[RiskBand] {
        &self.bands
    }

    /// Tier for `score`. Scores above the last bound fall into the last band.
    pub fn classify(&self, score: f64) -> RiskLevel {
        self.bands
            .iter()
            .find(|band| score <= band.upper_bound)
            .or(self.bands.last())
            .map(|band| band.level)
            .unwrap_or(RiskLevel::Low)
    }
}
