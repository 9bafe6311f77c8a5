use serde::{Deserialize, Serialize};

use skyguard_ai::Recommendation;

use crate::inputs::SystemCosts;

/// First-year investment: setup + operations + committed mitigation actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentBreakdown {
    pub one_time_setup: f64,
    pub annual_operating_costs: f64,
    pub mitigation_action_costs: f64,
    pub total_first_year_investment: f64,
}

impl InvestmentBreakdown {
    /// The projector does not choose among options: each recommendation
    /// contributes the cost of its committed option (see
    /// [`RecommendationAnalysis::committed_option`](skyguard_ai::RecommendationAnalysis::committed_option)).
    pub fn compute(costs: &SystemCosts, recommendations: &[Recommendation]) -> Self {
        let one_time_setup = costs.one_time();
        let annual_operating_costs = costs.annual();
        let mitigation_action_costs: f64 = recommendations
            .iter()
            .map(|r| r.ai_analysis.committed_cost_usd())
            .sum();

        Self {
            one_time_setup,
            annual_operating_costs,
            mitigation_action_costs,
            total_first_year_investment: one_time_setup
                + annual_operating_costs
                + mitigation_action_costs,
        }
    }
}
