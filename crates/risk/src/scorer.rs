//! Risk Scorer: inventory risk points, supplier multiplier, composite score.
//!
//! Model (three independent additive factors, each capped):
//! - stock coverage: up to 40 points
//! - criticality: up to 30 points
//! - lead-time volatility: up to 30 points
//!
//! The sum is capped at 100, multiplied by the supplier multiplier and clipped
//! back into \[0, 100\].

use serde::{Deserialize, Serialize};

use skyguard_core::{ComponentRecord, Criticality, LeadTimeVolatility, RiskExposure};

pub const MAX_INVENTORY_SCORE: u32 = 100;
pub const MAX_COMPOSITE_SCORE: f64 = 100.0;

/// Per-factor contribution to the inventory risk score.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub stock_coverage: u32,
    pub criticality: u32,
    pub volatility: u32,
}

impl ScoreBreakdown {
    pub fn for_record(record: &ComponentRecord) -> Self {
        Self {
            stock_coverage: stock_coverage_points(
                record.current_stock,
                record.safety_stock,
                record.reorder_point,
            ),
            criticality: criticality_points(&record.criticality),
            volatility: volatility_points(&record.lead_time_volatility),
        }
    }

    /// Sum of the factors, capped at 100.
    pub fn total(&self) -> u32 {
        (self.stock_coverage + self.criticality + self.volatility).min(MAX_INVENTORY_SCORE)
    }
}

/// Stock-coverage factor (max 40). First matching rule wins.
pub fn stock_coverage_points(current_stock: i64, safety_stock: i64, reorder_point: i64) -> u32 {
    let stock = current_stock as f64;
    if current_stock <= 0 {
        40
    } else if stock < reorder_point as f64 * 0.5 {
        35
    } else if current_stock < reorder_point {
        25
    } else if current_stock < safety_stock {
        15
    } else {
        0
    }
}

/// Criticality factor (max 30); unrecognised labels score 0.
pub fn criticality_points(criticality: &Criticality) -> u32 {
    match criticality {
        Criticality::Critical => 30,
        Criticality::High => 20,
        Criticality::Medium => 10,
        Criticality::Low => 5,
        Criticality::Other(_) => 0,
    }
}

/// Lead-time volatility factor (max 30).
///
/// `Unknown` scores 20: an unknown lead time is not assumed to be benign.
pub fn volatility_points(volatility: &LeadTimeVolatility) -> u32 {
    match volatility {
        LeadTimeVolatility::High => 30,
        LeadTimeVolatility::Medium => 15,
        LeadTimeVolatility::Low => 5,
        LeadTimeVolatility::Unknown => 20,
        LeadTimeVolatility::Other(_) => 0,
    }
}

/// Inventory risk score in \[0, 100\].
pub fn score_inventory(record: &ComponentRecord) -> u32 {
    ScoreBreakdown::for_record(record).total()
}

/// Supplier multiplier (>= 1.0). Missing or unmapped exposure is neutral.
pub fn supplier_multiplier(risk_exposure: Option<&RiskExposure>) -> f64 {
    match risk_exposure {
        Some(RiskExposure::High) => 1.3,
        Some(RiskExposure::Medium) => 1.1,
        Some(RiskExposure::Low) | Some(RiskExposure::Other(_)) | None => 1.0,
    }
}

/// `clip(inventory_score × multiplier, 0, 100)`.
pub fn composite_score(inventory_score: u32, multiplier: f64) -> f64 {
    (inventory_score as f64 * multiplier).clamp(0.0, MAX_COMPOSITE_SCORE)
}
