use serde::{Deserialize, Serialize};

use skyguard_risk::RiskSummary;

use crate::inputs::AvoidanceModel;

/// Expected AOG cost without vs. with mitigation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostAvoidance {
    pub total_risk_exposure: f64,
    pub high_risk_components: usize,
    pub baseline_expected_aog_cost: f64,
    /// Keyed as the dashboard reads it.
    #[serde(rename = "with_skyguard_expected_aog_cost")]
    pub mitigated_expected_aog_cost: f64,
    pub aog_costs_avoided: f64,
    pub risk_reduction_percentage: f64,
}

impl CostAvoidance {
    pub fn compute(summary: &RiskSummary, model: &AvoidanceModel) -> Self {
        let total_risk_exposure = summary.financial_metrics.total_exposure_usd;
        let baseline_expected_aog_cost = total_risk_exposure * model.baseline_probability;
        let mitigated_expected_aog_cost = total_risk_exposure * model.mitigated_probability;

        Self {
            total_risk_exposure,
            high_risk_components: summary.risk_distribution.high_risk,
            baseline_expected_aog_cost,
            mitigated_expected_aog_cost,
            aog_costs_avoided: baseline_expected_aog_cost - mitigated_expected_aog_cost,
            risk_reduction_percentage: model.risk_reduction_pct(),
        }
    }
}
