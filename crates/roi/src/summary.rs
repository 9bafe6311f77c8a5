use serde::{Deserialize, Serialize};

use skyguard_core::format_usd;

use crate::avoidance::CostAvoidance;
use crate::investment::InvestmentBreakdown;
use crate::metrics::{PaybackPeriod, RoiMetrics};
use crate::policy::RecommendationPolicy;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyMetrics {
    pub investment_required: f64,
    pub aog_costs_avoided: f64,
    pub net_benefit: f64,
    pub roi_ratio: f64,
    pub payback_period_months: PaybackPeriod,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskImpact {
    pub high_risk_components_identified: usize,
    pub risk_reduction_percentage: f64,
    pub total_exposure_managed: f64,
}

/// Board-level digest of one projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutiveSummary {
    pub value_proposition: String,
    pub key_metrics: KeyMetrics,
    pub risk_impact: RiskImpact,
    pub recommendation: String,
}

impl ExecutiveSummary {
    pub fn compose(
        investment: &InvestmentBreakdown,
        avoidance: &CostAvoidance,
        metrics: &RoiMetrics,
        policy: &RecommendationPolicy,
    ) -> Self {
        let value_proposition = format!(
            "Sky-Guard prevents {} in AOG costs with {} investment, delivering {:.1}:1 return.",
            format_usd(avoidance.aog_costs_avoided),
            format_usd(investment.total_first_year_investment),
            metrics.roi_ratio
        );

        Self {
            value_proposition,
            key_metrics: KeyMetrics {
                investment_required: investment.total_first_year_investment,
                aog_costs_avoided: avoidance.aog_costs_avoided,
                net_benefit: metrics.net_benefit_usd,
                roi_ratio: metrics.roi_ratio,
                payback_period_months: metrics.payback_period_months,
            },
            risk_impact: RiskImpact {
                high_risk_components_identified: avoidance.high_risk_components,
                risk_reduction_percentage: avoidance.risk_reduction_percentage,
                total_exposure_managed: avoidance.total_risk_exposure,
            },
            recommendation: policy.recommend(metrics.roi_ratio).to_string(),
        }
    }
}
