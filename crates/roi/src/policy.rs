//! Investment recommendation policy: ROI ratio → fixed recommendation text.

use serde::{Deserialize, Serialize};

use crate::error::RoiError;

/// Applies when the ROI ratio is strictly greater than `min_ratio`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyTier {
    pub min_ratio: f64,
    pub recommendation: String,
}

/// Tiers are checked in order (descending `min_ratio`); `fallback` applies
/// when none match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationPolicy {
    pub tiers: Vec<PolicyTier>,
    pub fallback: String,
}

impl Default for RecommendationPolicy {
    fn default() -> Self {
        let tier = |min_ratio: f64, text: &str| PolicyTier {
            min_ratio,
            recommendation: text.to_string(),
        };
        Self {
            tiers: vec![
                tier(10.0, "STRONG RECOMMEND: Exceptional ROI justifies immediate implementation."),
                tier(5.0, "RECOMMEND: High ROI supports business case for deployment."),
                tier(2.0, "CONSIDER: Positive ROI, evaluate against alternative investments."),
            ],
            fallback: "REVIEW: ROI below threshold, reassess assumptions or scope.".to_string(),
        }
    }
}

impl RecommendationPolicy {
    pub fn validate(&self) -> Result<(), RoiError> {
        if self.fallback.trim().is_empty() {
            return Err(RoiError::invalid("policy fallback recommendation cannot be empty"));
        }
        if self.tiers.iter().any(|t| !t.min_ratio.is_finite()) {
            return Err(RoiError::invalid("policy thresholds must be finite"));
        }
        if self.tiers.windows(2).any(|w| w[1].min_ratio >= w[0].min_ratio) {
            return Err(RoiError::invalid("policy thresholds must be strictly descending"));
        }
        Ok(())
    }

    pub fn recommend(&self, roi_ratio: f64) -> &str {
        self.tiers
            .iter()
            .find(|t| roi_ratio > t.min_ratio)
            .map(|t| t.recommendation.as_str())
            .unwrap_or(&self.fallback)
    }
}
