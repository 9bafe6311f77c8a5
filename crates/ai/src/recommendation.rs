use serde::{Deserialize, Serialize};
use thiserror::Error;

use skyguard_core::{Category, PartNumber};
use skyguard_risk::{RiskSummary, ScoredComponent};

/// One way to mitigate a component's risk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MitigationOption {
    pub option: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub estimated_cost_usd: f64,
    #[serde(default)]
    pub implementation_time_days: f64,
    #[serde(default)]
    pub risk_reduction_pct: f64,
}

/// Generator output for one component.
///
/// Options are ordered; by convention option 0 is the preferred immediate
/// action. `selected_option`, when present and in range, names the option the
/// recommended action refers to explicitly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationAnalysis {
    pub root_cause: String,
    #[serde(default)]
    pub mitigation_options: Vec<MitigationOption>,
    pub recommended_action: String,
    /// Free-text label, typically High/Medium/Low.
    pub confidence_level: String,
    #[serde(default)]
    pub expected_roi: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_option: Option<usize>,
}

impl RecommendationAnalysis {
    /// The option whose cost is committed when acting on this recommendation.
    ///
    /// Explicit `selected_option` wins when it points at an existing option;
    /// otherwise the first-listed option is used.
    pub fn committed_option(&self) -> Option<&MitigationOption> {
        self.selected_option
            .and_then(|idx| self.mitigation_options.get(idx))
            .or_else(|| self.mitigation_options.first())
    }

    /// Cost of the committed option, 0 when there are no options.
    pub fn committed_cost_usd(&self) -> f64 {
        self.committed_option()
            .map(|o| o.estimated_cost_usd)
            .unwrap_or(0.0)
    }
}

/// Identity of the component a recommendation was produced for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentRef {
    pub part_number: PartNumber,
    pub description: String,
    pub category: Category,
    pub financial_exposure_usd: f64,
}

impl From<&ScoredComponent> for ComponentRef {
    fn from(c: &ScoredComponent) -> Self {
        Self {
            part_number: c.component.part_number.clone(),
            description: c.component.description.clone(),
            category: c.component.category.clone(),
            financial_exposure_usd: c.financial_exposure_usd(),
        }
    }
}

/// Recommendation record keyed by its originating component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub component: ComponentRef,
    pub ai_analysis: RecommendationAnalysis,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationMetadata {
    pub model_used: String,
    pub total_recommendations: usize,
    pub risk_summary: RiskSummary,
}

/// File-level shape of the recommendation stage output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationBatch {
    pub metadata: RecommendationMetadata,
    pub recommendations: Vec<Recommendation>,
}

impl RecommendationBatch {
    /// Sum of committed option costs across all recommendations.
    pub fn total_committed_cost_usd(&self) -> f64 {
        self.recommendations
            .iter()
            .map(|r| r.ai_analysis.committed_cost_usd())
            .sum()
    }
}

#[derive(Debug, Error)]
pub enum AiError {
    #[error("invalid generator input: {0}")]
    InvalidInput(String),

    #[error("generation failed: {0}")]
    GenerationFailed(String),

    #[error("unparsable generator response: {0}")]
    UnparsableResponse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn option(name: &str, cost: f64) -> MitigationOption {
        MitigationOption {
            option: name.to_string(),
            description: String::new(),
            estimated_cost_usd: cost,
            implementation_time_days: 5.0,
            risk_reduction_pct: 50.0,
        }
    }

    fn analysis(options: Vec<MitigationOption>, selected: Option<usize>) -> RecommendationAnalysis {
        RecommendationAnalysis {
            root_cause: "stock exhausted".to_string(),
            mitigation_options: options,
            recommended_action: "act".to_string(),
            confidence_level: "High".to_string(),
            expected_roi: String::new(),
            selected_option: selected,
        }
    }

    #[test]
    fn first_listed_option_is_committed_by_default() {
        let a = analysis(vec![option("expedite", 25_000.0), option("dual source", 80_000.0)], None);
        assert_eq!(a.committed_cost_usd(), 25_000.0);
    }

    #[test]
    fn explicit_selection_overrides_position() {
        let options = vec![option("expedite", 25_000.0), option("dual source", 80_000.0)];
        let a = analysis(options, Some(1));
        assert_eq!(a.committed_cost_usd(), 80_000.0);
    }

    #[test]
    fn out_of_range_selection_falls_back_to_first() {
        let a = analysis(vec![option("expedite", 25_000.0)], Some(7));
        assert_eq!(a.committed_cost_usd(), 25_000.0);
    }

    #[test]
    fn no_options_commit_nothing() {
        assert_eq!(analysis(Vec::new(), None).committed_cost_usd(), 0.0);
    }

    #[test]
    fn missing_cost_field_reads_as_zero() {
        let o: MitigationOption = serde_json::from_str(r#"{"option":"wait"}"#).unwrap();
        assert_eq!(o.estimated_cost_usd, 0.0);
    }
}
