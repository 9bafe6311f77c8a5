//! Risk detection pipeline (pure, deterministic).
//!
//! Scores every component of an inventory snapshot, classifies it into a risk
//! tier, estimates the financial exposure of High-tier components and ranks
//! the result. No IO: inputs are provided by callers (infra/cli).

pub mod aggregator;
pub mod classifier;
pub mod exposure;
pub mod scored;
pub mod scorer;
pub mod summary;

pub use aggregator::{DEFAULT_TOP_N, RiskAggregator, RiskAnalysis, RiskReport};
pub use classifier::{RiskBand, RiskThresholds};
pub use exposure::{DEFAULT_OUTAGE_DAYS, Exposure, estimate_exposure, estimated_outage_days};
pub use scored::{RiskAssessment, ScoredComponent, SupplierAttributes};
pub use scorer::{ScoreBreakdown, composite_score, score_inventory, supplier_multiplier};
pub use summary::{FinancialMetrics, RankedCount, RiskDistribution, RiskSummary};
