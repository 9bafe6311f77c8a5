//! Externally supplied projection inputs.

use serde::{Deserialize, Serialize};

use crate::error::RoiError;

/// Operating costs of running the programme (USD).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemCosts {
    /// Annual: infrastructure and API usage.
    pub platform_licenses_usd: f64,
    /// One-time.
    pub personnel_training_usd: f64,
    /// Annual.
    pub ongoing_maintenance_usd: f64,
}

impl Default for SystemCosts {
    fn default() -> Self {
        Self {
            platform_licenses_usd: 80_000.0,
            personnel_training_usd: 50_000.0,
            ongoing_maintenance_usd: 40_000.0,
        }
    }
}

impl SystemCosts {
    pub fn one_time(&self) -> f64 {
        self.personnel_training_usd
    }

    pub fn annual(&self) -> f64 {
        self.platform_licenses_usd + self.ongoing_maintenance_usd
    }

    pub fn validate(&self) -> Result<(), RoiError> {
        let all = [
            ("platform_licenses_usd", self.platform_licenses_usd),
            ("personnel_training_usd", self.personnel_training_usd),
            ("ongoing_maintenance_usd", self.ongoing_maintenance_usd),
        ];
        for (name, value) in all {
            if !(value.is_finite() && value >= 0.0) {
                return Err(RoiError::invalid(format!(
                    "{name} must be a finite non-negative amount (got {value})"
                )));
            }
        }
        Ok(())
    }
}

/// Probability that a High-tier exposure materializes, without and with mitigation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AvoidanceModel {
    pub baseline_probability: f64,
    pub mitigated_probability: f64,
}

impl Default for AvoidanceModel {
    fn default() -> Self {
        Self {
            baseline_probability: 0.08,
            mitigated_probability: 0.02,
        }
    }
}

impl AvoidanceModel {
    pub fn validate(&self) -> Result<(), RoiError> {
        let in_unit = |p: f64| p.is_finite() && (0.0..=1.0).contains(&p);
        if !in_unit(self.baseline_probability) || !in_unit(self.mitigated_probability) {
            return Err(RoiError::invalid("probabilities must lie in [0, 1]"));
        }
        if self.baseline_probability <= 0.0 {
            return Err(RoiError::invalid("baseline_probability must be greater than 0"));
        }
        if self.mitigated_probability > self.baseline_probability {
            return Err(RoiError::invalid(
                "mitigated_probability cannot exceed baseline_probability",
            ));
        }
        Ok(())
    }

    /// `(baseline − mitigated) / baseline × 100`.
    pub fn risk_reduction_pct(&self) -> f64 {
        (self.baseline_probability - self.mitigated_probability) / self.baseline_probability * 100.0
    }
}
