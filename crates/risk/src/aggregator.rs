//! Risk Aggregator: join, score, rank, summarize.
//!
//! Steps:
//! - left-join inventory rows to supplier attributes by `supplier_id`
//!   (unmatched rows keep `supplier = None` and are never dropped)
//! - score/classify/price every row
//! - keep High-tier rows, sort by (exposure desc, composite desc), truncate to top-N
//! - summarize the **full** enriched set

use std::cmp::Ordering;
use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use skyguard_core::{ComponentRecord, RiskLevel, SupplierId, SupplierRecord};

use crate::classifier::RiskThresholds;
use crate::scored::{ScoredComponent, SupplierAttributes};
use crate::summary::RiskSummary;

pub const DEFAULT_TOP_N: usize = 10;

/// File-level shape of the risk stage output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskReport {
    pub summary: RiskSummary,
    pub top_risks: Vec<ScoredComponent>,
}

/// Result of one aggregation pass. Read-only once built.
#[derive(Debug, Clone, PartialEq)]
pub struct RiskAnalysis {
    enriched: Vec<ScoredComponent>,
    top_risks: Vec<ScoredComponent>,
    summary: RiskSummary,
}

impl RiskAnalysis {
    /// Every input row, in input order.
    pub fn enriched(&self) -> &[ScoredComponent] {
        &self.enriched
    }

    /// Ranked High-tier slice.
    pub fn top_risks(&self) -> &[ScoredComponent] {
        &self.top_risks
    }

    pub fn summary(&self) -> &RiskSummary {
        &self.summary
    }

    pub fn report(&self) -> RiskReport {
        RiskReport {
            summary: self.summary.clone(),
            top_risks: self.top_risks.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RiskAggregator {
    top_n: usize,
    thresholds: RiskThresholds,
}

impl Default for RiskAggregator {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            thresholds: RiskThresholds::default(),
        }
    }
}

impl RiskAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    pub fn with_thresholds(mut self, thresholds: RiskThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn top_n(&self) -> usize {
        self.top_n
    }

    /// Run one deterministic pass over a snapshot.
    ///
    /// `analyzed_at` is supplied by the caller so identical inputs yield
    /// identical output.
    pub fn aggregate(
        &self,
        inventory: &[ComponentRecord],
        suppliers: &[SupplierRecord],
        analyzed_at: DateTime<Utc>,
    ) -> RiskAnalysis {
        let by_id = index_suppliers(suppliers);

        let mut unmatched = 0usize;
        let enriched: Vec<ScoredComponent> = inventory
            .iter()
            .map(|record| {
                let supplier = by_id.get(&record.supplier_id).cloned();
                if supplier.is_none() {
                    unmatched += 1;
                }
                ScoredComponent::new(record.clone(), supplier, &self.thresholds)
            })
            .collect();

        if unmatched > 0 {
            info!(
                unmatched,
                "inventory rows reference unknown suppliers; neutral multiplier applied"
            );
        }

        let top_risks = rank_top_risks(&enriched, self.top_n);
        let summary = RiskSummary::from_enriched(&enriched, analyzed_at);

        debug!(
            components = enriched.len(),
            high = summary.risk_distribution.high_risk,
            ranked = top_risks.len(),
            "risk aggregation complete"
        );

        RiskAnalysis {
            enriched,
            top_risks,
            summary,
        }
    }
}

/// Supplier lookup keyed by id. The first row wins if an id repeats.
fn index_suppliers(suppliers: &[SupplierRecord]) -> HashMap<&SupplierId, SupplierAttributes> {
    let mut by_id: HashMap<&SupplierId, SupplierAttributes> =
        HashMap::with_capacity(suppliers.len());
    for supplier in suppliers {
        if by_id.contains_key(&supplier.supplier_id) {
            warn!(supplier_id = %supplier.supplier_id, "duplicate supplier row ignored");
            continue;
        }
        by_id.insert(&supplier.supplier_id, SupplierAttributes::from(supplier));
    }
    by_id
}

/// High-tier rows sorted by (exposure desc, composite desc, part number asc), truncated.
pub fn rank_top_risks(enriched: &[ScoredComponent], top_n: usize) -> Vec<ScoredComponent> {
    let mut high: Vec<&ScoredComponent> = enriched
        .iter()
        .filter(|c| c.risk_level() == RiskLevel::High)
        .collect();
    high.sort_by(|a, b| priority_order(a, b));
    high.into_iter().take(top_n).cloned().collect()
}

fn priority_order(a: &ScoredComponent, b: &ScoredComponent) -> Ordering {
    b.financial_exposure_usd()
        .total_cmp(&a.financial_exposure_usd())
        .then_with(|| b.composite_risk_score().total_cmp(&a.composite_risk_score()))
        .then_with(|| a.component.part_number.cmp(&b.component.part_number))
}
