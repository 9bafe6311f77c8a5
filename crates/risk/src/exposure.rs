//! Exposure Estimator: monetary exposure of a High-tier component.
//!
//! `exposure = aog_cost_per_day × estimated_outage_days`, reported only for
//! High-tier records; every other tier carries zero modeled exposure.

use serde::{Deserialize, Serialize};

use skyguard_core::{ComponentRecord, RiskLevel};

/// Outage duration assumed when the snapshot has no lead time.
pub const DEFAULT_OUTAGE_DAYS: f64 = 30.0;

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exposure {
    pub estimated_outage_days: f64,
    pub financial_exposure_usd: f64,
}

pub fn estimated_outage_days(record: &ComponentRecord) -> f64 {
    record.lead_time_days.unwrap_or(DEFAULT_OUTAGE_DAYS)
}

pub fn estimate_exposure(record: &ComponentRecord, level: RiskLevel) -> Exposure {
    let estimated_outage_days = estimated_outage_days(record);
    let financial_exposure_usd = match level {
        RiskLevel::High => record.aog_cost_per_day * estimated_outage_days,
        RiskLevel::Medium | RiskLevel::Low => 0.0,
    };

    Exposure {
        estimated_outage_days,
        financial_exposure_usd,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skyguard_core::{Category, Criticality, LeadTimeVolatility, PartNumber, SupplierId};

    fn record(lead_time_days: Option<f64>) -> ComponentRecord {
        ComponentRecord {
            part_number: PartNumber::parse("PN-LAN-00042").unwrap(),
            description: "Landing Gear Component - Series X".to_string(),
            category: Category::LandingGear,
            current_stock: 3,
            safety_stock: 25,
            reorder_point: 32,
            lead_time_days,
            lead_time_volatility: LeadTimeVolatility::Unknown,
            supplier_id: SupplierId::parse("SUP-0007").unwrap(),
            criticality: Criticality::Critical,
            aog_cost_per_day: 150_000.0,
        }
    }

    #[test]
    fn missing_lead_time_falls_back_to_thirty_days() {
        let e = estimate_exposure(&record(None), RiskLevel::High);
        assert_eq!(e.estimated_outage_days, 30.0);
        assert_eq!(e.financial_exposure_usd, 4_500_000.0);
    }

    #[test]
    fn known_lead_time_drives_outage_days() {
        let e = estimate_exposure(&record(Some(12.0)), RiskLevel::High);
        assert_eq!(e.estimated_outage_days, 12.0);
        assert_eq!(e.financial_exposure_usd, 1_800_000.0);
    }

    #[test]
    fn non_high_tiers_carry_no_exposure() {
        for level in [RiskLevel::Low, RiskLevel::Medium] {
            let e = estimate_exposure(&record(Some(12.0)), level);
            assert_eq!(e.financial_exposure_usd, 0.0);
            assert_eq!(e.estimated_outage_days, 12.0);
        }
    }
}
