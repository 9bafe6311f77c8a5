//! Risk Summary: population-level statistics of one analysis run.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use skyguard_core::RiskLevel;

use crate::scored::ScoredComponent;

/// How many entries the category/region rankings keep.
pub const TOP_GROUPS: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskDistribution {
    pub high_risk: usize,
    pub medium_risk: usize,
    pub low_risk: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialMetrics {
    pub total_exposure_usd: f64,
    /// 0 when no component is High-tier.
    pub avg_exposure_per_high_risk_component: f64,
}

/// A label with its High-tier component count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedCount {
    pub label: String,
    pub high_risk_count: usize,
}

/// Immutable snapshot of the whole enriched population.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskSummary {
    pub analysis_timestamp: DateTime<Utc>,
    pub total_components_analyzed: usize,
    pub risk_distribution: RiskDistribution,
    pub financial_metrics: FinancialMetrics,
    pub top_risk_categories: Vec<RankedCount>,
    pub top_risk_regions: Vec<RankedCount>,
}

impl RiskSummary {
    /// Summarize the full enriched set (not just the ranked slice).
    pub fn from_enriched(enriched: &[ScoredComponent], analysis_timestamp: DateTime<Utc>) -> Self {
        let count = |level: RiskLevel| enriched.iter().filter(|c| c.risk_level() == level).count();
        let high: Vec<&ScoredComponent> = enriched
            .iter()
            .filter(|c| c.risk_level() == RiskLevel::High)
            .collect();

        let total_exposure_usd: f64 = enriched.iter().map(|c| c.financial_exposure_usd()).sum();
        let high_exposure: f64 = high.iter().map(|c| c.financial_exposure_usd()).sum();
        let avg_exposure_per_high_risk_component = if high.is_empty() {
            0.0
        } else {
            high_exposure / high.len() as f64
        };

        let top_risk_categories =
            rank_labels(high.iter().copied().map(|c| c.component.category.as_str()));
        let top_risk_regions = rank_labels(
            high.iter()
                .copied()
                .filter_map(|c| c.region())
                .map(|r| r.as_str()),
        );

        Self {
            analysis_timestamp,
            total_components_analyzed: enriched.len(),
            risk_distribution: RiskDistribution {
                high_risk: high.len(),
                medium_risk: count(RiskLevel::Medium),
                low_risk: count(RiskLevel::Low),
            },
            financial_metrics: FinancialMetrics {
                total_exposure_usd,
                avg_exposure_per_high_risk_component,
            },
            top_risk_categories,
            top_risk_regions,
        }
    }

    /// Most frequent High-tier category, if any.
    pub fn top_category(&self) -> Option<&str> {
        self.top_risk_categories.first().map(|r| r.label.as_str())
    }
}

/// Count labels, order by count desc then label asc, keep the first `TOP_GROUPS`.
fn rank_labels<'a>(labels: impl Iterator<Item = &'a str>) -> Vec<RankedCount> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for label in labels {
        *counts.entry(label).or_insert(0) += 1;
    }

    let mut ranked: Vec<RankedCount> = counts
        .into_iter()
        .map(|(label, high_risk_count)| RankedCount {
            label: label.to_string(),
            high_risk_count,
        })
        .collect();
    ranked.sort_by(|a, b| {
        b.high_risk_count
            .cmp(&a.high_risk_count)
            .then_with(|| a.label.cmp(&b.label))
    });
    ranked.truncate(TOP_GROUPS);
    ranked
}
