//! ROI projection entry point.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use skyguard_ai::Recommendation;
use skyguard_risk::RiskSummary;

use crate::avoidance::CostAvoidance;
use crate::error::RoiError;
use crate::inputs::{AvoidanceModel, SystemCosts};
use crate::investment::InvestmentBreakdown;
use crate::metrics::RoiMetrics;
use crate::policy::RecommendationPolicy;
use crate::summary::ExecutiveSummary;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisMetadata {
    pub calculation_date: DateTime<Utc>,
    pub analysis_scope: String,
}

/// File-level shape of the ROI stage output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoiReport {
    pub analysis_metadata: AnalysisMetadata,
    pub investment_breakdown: InvestmentBreakdown,
    pub aog_cost_avoidance: CostAvoidance,
    pub roi_metrics: RoiMetrics,
    pub executive_summary: ExecutiveSummary,
}

/// Pure projector: same inputs and `calculated_at` → identical report.
#[derive(Debug, Clone, Default)]
pub struct RoiProjector {
    costs: SystemCosts,
    model: AvoidanceModel,
    policy: RecommendationPolicy,
}

impl RoiProjector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_costs(mut self, costs: SystemCosts) -> Self {
        self.costs = costs;
        self
    }

    pub fn with_model(mut self, model: AvoidanceModel) -> Self {
        self.model = model;
        self
    }

    pub fn with_policy(mut self, policy: RecommendationPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn costs(&self) -> &SystemCosts {
        &self.costs
    }

    pub fn model(&self) -> &AvoidanceModel {
        &self.model
    }

    pub fn policy(&self) -> &RecommendationPolicy {
        &self.policy
    }

    pub fn project(
        &self,
        summary: &RiskSummary,
        recommendations: &[Recommendation],
        calculated_at: DateTime<Utc>,
    ) -> Result<RoiReport, RoiError> {
        self.costs.validate()?;
        self.model.validate()?;
        self.policy.validate()?;

        let investment_breakdown = InvestmentBreakdown::compute(&self.costs, recommendations);
        info!(
            one_time = investment_breakdown.one_time_setup,
            annual = investment_breakdown.annual_operating_costs,
            mitigation = investment_breakdown.mitigation_action_costs,
            total = investment_breakdown.total_first_year_investment,
            "investment computed"
        );

        let aog_cost_avoidance = CostAvoidance::compute(summary, &self.model);
        info!(
            exposure = aog_cost_avoidance.total_risk_exposure,
            avoided = aog_cost_avoidance.aog_costs_avoided,
            reduction_pct = aog_cost_avoidance.risk_reduction_percentage,
            "cost avoidance computed"
        );

        let roi_metrics = RoiMetrics::compute(
            &investment_breakdown,
            &aog_cost_avoidance,
            calculated_at.date_naive(),
        );
        info!(
            net_benefit = roi_metrics.net_benefit_usd,
            roi_ratio = roi_metrics.roi_ratio,
            roi_pct = roi_metrics.roi_percentage,
            payback = %roi_metrics.payback_period_months,
            "roi metrics computed"
        );

        let executive_summary = ExecutiveSummary::compose(
            &investment_breakdown,
            &aog_cost_avoidance,
            &roi_metrics,
            &self.policy,
        );

        Ok(RoiReport {
            analysis_metadata: AnalysisMetadata {
                calculation_date: calculated_at,
                analysis_scope: format!("{} components analyzed", recommendations.len()),
            },
            investment_breakdown,
            aog_cost_avoidance,
            roi_metrics,
            executive_summary,
        })
    }
}
