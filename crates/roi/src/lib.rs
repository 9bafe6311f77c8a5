//! ROI projection (pure, deterministic).
//!
//! Turns the risk summary and the recommendation batch into an investment
//! case: what acting costs, what it avoids, and whether it pays back.

pub mod avoidance;
pub mod error;
pub mod inputs;
pub mod investment;
pub mod metrics;
pub mod policy;
pub mod projector;
pub mod summary;

pub use avoidance::CostAvoidance;
pub use error::RoiError;
pub use inputs::{AvoidanceModel, SystemCosts};
pub use investment::InvestmentBreakdown;
pub use metrics::{PaybackPeriod, RoiMetrics};
pub use policy::{PolicyTier, RecommendationPolicy};
pub use projector::{AnalysisMetadata, RoiProjector, RoiReport};
pub use summary::{ExecutiveSummary, KeyMetrics, RiskImpact};
