use tracing::{info, warn};

use skyguard_risk::RiskReport;

use crate::generator::RecommendationGenerator;
use crate::recommendation::{Recommendation, RecommendationBatch, RecommendationMetadata};

/// Default cap on components sent to a generator per run.
pub const DEFAULT_MAX_COMPONENTS: usize = 5;

/// Sequential batch runner over a ranked risk report.
///
/// - Processes at most `max_components` entries, in ranked order.
/// - Failures: logged per item and skipped; never propagate.
#[derive(Debug, Copy, Clone)]
pub struct RecommendationRunner {
    max_components: usize,
}

impl Default for RecommendationRunner {
    fn default() -> Self {
        Self {
            max_components: DEFAULT_MAX_COMPONENTS,
        }
    }
}

impl RecommendationRunner {
    pub fn new(max_components: usize) -> Self {
        Self { max_components }
    }

    pub fn max_components(&self) -> usize {
        self.max_components
    }

    pub fn run<G>(&self, report: &RiskReport, generator: &G) -> RecommendationBatch
    where
        G: RecommendationGenerator + ?Sized,
    {
        let selected = &report.top_risks[..report.top_risks.len().min(self.max_components)];
        let total = selected.len();
        let mut recommendations = Vec::with_capacity(total);

        info!(model = generator.model_id(), components = total, "generating recommendations");

        for (idx, component) in selected.iter().enumerate() {
            let part_number = &component.component.part_number;
            match generator.generate(component) {
                Ok(analysis) => {
                    info!(
                        item = idx + 1,
                        total,
                        part_number = %part_number,
                        action = %analysis.recommended_action,
                        "recommendation generated"
                    );
                    recommendations.push(Recommendation {
                        component: component.into(),
                        ai_analysis: analysis,
                    });
                }
                Err(e) => {
                    warn!(
                        item = idx + 1,
                        total,
                        part_number = %part_number,
                        error = %e,
                        "recommendation failed; skipping component"
                    );
                }
            }
        }

        info!(
            generated = recommendations.len(),
            requested = total,
            "recommendation batch complete"
        );

        RecommendationBatch {
            metadata: RecommendationMetadata {
                model_used: generator.model_id().to_string(),
                total_recommendations: recommendations.len(),
                risk_summary: report.summary.clone(),
            },
            recommendations,
        }
    }
}
