use skyguard_risk::ScoredComponent;

use crate::recommendation::{AiError, RecommendationAnalysis};

/// Produces one recommendation for one enriched component.
///
/// Implementations may call out to external services; they must not mutate the
/// component and should bound their own latency. Errors are per-item: the
/// runner logs them and moves on.
pub trait RecommendationGenerator: Send + Sync {
    /// Identifier recorded in the output metadata (model name, playbook version).
    fn model_id(&self) -> &str;

    fn generate(&self, component: &ScoredComponent) -> Result<RecommendationAnalysis, AiError>;
}
