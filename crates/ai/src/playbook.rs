use serde::{Deserialize, Serialize};

use skyguard_core::{Criticality, LeadTimeVolatility, RiskExposure, format_usd};
use skyguard_risk::ScoredComponent;

use crate::generator::RecommendationGenerator;
use crate::recommendation::{AiError, MitigationOption, RecommendationAnalysis};

pub const PLAYBOOK_MODEL_ID: &str = "skyguard-playbook-v1";

/// Cost assumptions for the playbook's mitigation options (USD).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybookCosts {
    pub expedite_usd: f64,
    pub alternate_supplier_usd: f64,
    pub safety_stock_uplift_usd: f64,
}

impl Default for PlaybookCosts {
    fn default() -> Self {
        Self {
            expedite_usd: 25_000.0,
            alternate_supplier_usd: 75_000.0,
            safety_stock_uplift_usd: 40_000.0,
        }
    }
}

/// Deterministic rule-based recommender.
///
/// Model:
/// - Root cause: the scoring factors that fired, plus supplier condition.
/// - Options, in order: expedite replenishment, qualify an alternate
///   supplier, raise safety stock. Option 0 is always the immediate action.
/// - Confidence drops for every unknown input (missing lead time, unmatched supplier).
#[derive(Debug, Clone, Default)]
pub struct PlaybookRecommender {
    costs: PlaybookCosts,
}

impl PlaybookRecommender {
    pub fn new(costs: PlaybookCosts) -> Self {
        Self { costs }
    }
}

impl RecommendationGenerator for PlaybookRecommender {
    fn model_id(&self) -> &str {
        PLAYBOOK_MODEL_ID
    }

    fn generate(&self, scored: &ScoredComponent) -> Result<RecommendationAnalysis, AiError> {
        let exposure = scored.financial_exposure_usd();
        if !(exposure.is_finite() && exposure >= 0.0) {
            return Err(AiError::InvalidInput(format!(
                "{}: exposure must be a finite non-negative amount",
                scored.component.part_number
            )));
        }

        let options = self.options_for(scored);
        let immediate = &options[0];
        let recommended_action = format!(
            "{}: {} ({} days, {:.0}% risk reduction).",
            immediate.option,
            immediate.description,
            immediate.implementation_time_days,
            immediate.risk_reduction_pct
        );
        let expected_roi = expected_roi(exposure, immediate.estimated_cost_usd);

        Ok(RecommendationAnalysis {
            root_cause: root_cause(scored),
            mitigation_options: options,
            recommended_action,
            confidence_level: confidence(scored).to_string(),
            expected_roi,
            selected_option: Some(0),
        })
    }
}

impl PlaybookRecommender {
    fn options_for(&self, scored: &ScoredComponent) -> Vec<MitigationOption> {
        let c = &scored.component;
        let outage_days = scored.assessment.estimated_outage_days.max(1.0).ceil();
        let fragile_supplier = match &scored.supplier {
            None => true,
            Some(s) => s.risk_exposure == RiskExposure::High,
        };
        let uplifted_safety = ((c.safety_stock.max(1) as f64) * 1.5).ceil();

        vec![
            MitigationOption {
                option: "Expedite replenishment".to_string(),
                description: format!(
                    "Place an expedited order with {} to restore stock above the reorder point of {}",
                    c.supplier_id, c.reorder_point
                ),
                estimated_cost_usd: self.costs.expedite_usd,
                implementation_time_days: (outage_days / 3.0).ceil().max(1.0),
                risk_reduction_pct: 60.0,
            },
            MitigationOption {
                option: "Qualify alternate supplier".to_string(),
                description: format!(
                    "Qualify a second source for {} to remove single-supplier dependency",
                    c.part_number
                ),
                estimated_cost_usd: self.costs.alternate_supplier_usd,
                implementation_time_days: outage_days,
                risk_reduction_pct: if fragile_supplier { 45.0 } else { 30.0 },
            },
            MitigationOption {
                option: "Raise safety stock".to_string(),
                description: format!(
                    "Increase safety stock from {} to {} units",
                    c.safety_stock, uplifted_safety
                ),
                estimated_cost_usd: self.costs.safety_stock_uplift_usd,
                implementation_time_days: outage_days,
                risk_reduction_pct: 35.0,
            },
        ]
    }
}

fn root_cause(scored: &ScoredComponent) -> String {
    let c = &scored.component;
    let mut causes: Vec<String> = Vec::new();

    if c.current_stock <= 0 {
        causes.push(format!("stock exhausted ({} on hand)", c.current_stock));
    } else if c.current_stock < c.reorder_point {
        causes.push(format!(
            "stock of {} is below the reorder point of {}",
            c.current_stock, c.reorder_point
        ));
    } else if c.current_stock < c.safety_stock {
        causes.push(format!(
            "stock of {} is below the safety stock of {}",
            c.current_stock, c.safety_stock
        ));
    }

    if c.criticality == Criticality::Critical {
        causes.push("flight-critical part".to_string());
    }

    match c.lead_time_volatility {
        LeadTimeVolatility::High => causes.push("highly volatile lead time".to_string()),
        LeadTimeVolatility::Unknown => causes.push("no lead time on record".to_string()),
        _ => {}
    }

    match &scored.supplier {
        None => causes.push(format!(
            "supplier {} missing from the supplier network",
            c.supplier_id
        )),
        Some(s) if s.risk_exposure == RiskExposure::High => causes.push(format!(
            "supplier {} in {} rated high risk",
            c.supplier_id, s.region
        )),
        Some(_) => {}
    }

    if causes.is_empty() {
        return format!(
            "composite risk score {:.0} exceeds the High threshold",
            scored.composite_risk_score()
        );
    }

    let mut text = causes.join("; ");
    if let Some(first) = text.get(0..1) {
        text = first.to_uppercase() + &text[1..];
    }
    text
}

fn confidence(scored: &ScoredComponent) -> &'static str {
    let unknowns = usize::from(scored.component.lead_time_days.is_none())
        + usize::from(scored.supplier.is_none());
    match unknowns {
        0 => "High",
        1 => "Medium",
        _ => "Low",
    }
}

fn expected_roi(exposure: f64, cost: f64) -> String {
    if cost > 0.0 {
        format!(
            "Protects {} of AOG exposure for {} ({:.1}:1)",
            format_usd(exposure),
            format_usd(cost),
            exposure / cost
        )
    } else {
        format!("Protects {} of AOG exposure at no direct cost", format_usd(exposure))
    }
}
