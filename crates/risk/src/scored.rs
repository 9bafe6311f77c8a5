//! Enriched component: raw record + joined supplier attributes + derived risk fields.

use serde::{Deserialize, Serialize};

use skyguard_core::{ComponentRecord, Region, RiskExposure, RiskLevel, SupplierRecord};

use crate::classifier::RiskThresholds;
use crate::exposure::estimate_exposure;
use crate::scorer::{ScoreBreakdown, composite_score, supplier_multiplier};

/// Supplier fields joined onto a component by `supplier_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplierAttributes {
    pub region: Region,
    pub on_time_delivery_pct: f64,
    pub risk_exposure: RiskExposure,
    pub country: String,
    #[serde(default)]
    pub country_code: Option<String>,
}

impl From<&SupplierRecord> for SupplierAttributes {
    fn from(s: &SupplierRecord) -> Self {
        Self {
            region: s.region.clone(),
            on_time_delivery_pct: s.on_time_delivery_pct,
            risk_exposure: s.risk_exposure.clone(),
            country: s.country.clone(),
            country_code: s.country_code.clone(),
        }
    }
}

/// Fields written by the pipeline, never by upstream producers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub inventory_risk_score: u32,
    pub supplier_multiplier: f64,
    pub composite_risk_score: f64,
    pub risk_level: RiskLevel,
    pub estimated_outage_days: f64,
    pub financial_exposure_usd: f64,
}

impl RiskAssessment {
    /// Score, classify and price one record.
    pub fn evaluate(
        record: &ComponentRecord,
        supplier: Option<&SupplierAttributes>,
        thresholds: &RiskThresholds,
    ) -> Self {
        let inventory_risk_score = ScoreBreakdown::for_record(record).total();
        let supplier_multiplier = supplier_multiplier(supplier.map(|s| &s.risk_exposure));
        let composite_risk_score = composite_score(inventory_risk_score, supplier_multiplier);
        let risk_level = thresholds.classify(composite_risk_score);
        let exposure = estimate_exposure(record, risk_level);

        Self {
            inventory_risk_score,
            supplier_multiplier,
            composite_risk_score,
            risk_level,
            estimated_outage_days: exposure.estimated_outage_days,
            financial_exposure_usd: exposure.financial_exposure_usd,
        }
    }
}

/// Component record enriched by the risk pipeline.
///
/// `supplier` is `None` when the inventory row references a supplier that is
/// not in the supplier table. That is distinct from a matched supplier rated
/// `Low`, even though both score with a 1.0 multiplier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredComponent {
    #[serde(flatten)]
    pub component: ComponentRecord,
    pub supplier: Option<SupplierAttributes>,
    #[serde(flatten)]
    pub assessment: RiskAssessment,
}

impl ScoredComponent {
    pub fn new(
        component: ComponentRecord,
        supplier: Option<SupplierAttributes>,
        thresholds: &RiskThresholds,
    ) -> Self {
        let assessment = RiskAssessment::evaluate(&component, supplier.as_ref(), thresholds);
        Self {
            component,
            supplier,
            assessment,
        }
    }

    pub fn risk_level(&self) -> RiskLevel {
        self.assessment.risk_level
    }

    pub fn financial_exposure_usd(&self) -> f64 {
        self.assessment.financial_exposure_usd
    }

    pub fn composite_risk_score(&self) -> f64 {
        self.assessment.composite_risk_score
    }

    pub fn region(&self) -> Option<&Region> {
        self.supplier.as_ref().map(|s| &s.region)
    }
}
