//! Stage runners: load inputs, run the pure domain transform, write the snapshot.
//!
//! Each stage fully consumes its inputs before producing output. Fatal errors
//! propagate before anything is written.

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use skyguard_ai::{
    PlaybookRecommender, RecommendationBatch, RecommendationGenerator, RecommendationRunner,
};
use skyguard_core::{DomainError, format_usd};
use skyguard_risk::{RiskAggregator, RiskAnalysis, RiskReport};
use skyguard_roi::{RoiProjector, RoiReport};

use crate::config::PipelineConfig;
use crate::error::{InfraError, InfraResult};
use crate::snapshot::{EnrichedRow, commit_all, read_json, stage_csv, stage_json, write_json};
use crate::tables::{load_inventory, load_suppliers};
use crate::validate::{ValidationReport, validate_snapshot};

const DETECT_HINT: &str = "run `skyguard detect` first";
const RECOMMEND_HINT: &str = "run `skyguard recommend` first";

/// Load both raw tables and check data quality. Never writes.
pub fn run_validation(config: &PipelineConfig) -> InfraResult<ValidationReport> {
    let inventory = load_inventory(&config.paths.inventory())?;
    let suppliers = load_suppliers(&config.paths.suppliers())?;
    let report = validate_snapshot(&inventory, &suppliers);
    report.log();
    Ok(report)
}

/// Score, classify, price and rank the raw snapshot.
///
/// Writes `risk_analysis.json` and `enriched_inventory_with_risks.csv`, or neither:
/// both are staged first and the JSON downstream stages read is committed last.
pub fn run_detection(
    config: &PipelineConfig,
    analyzed_at: DateTime<Utc>,
) -> InfraResult<RiskAnalysis> {
    let inventory = load_inventory(&config.paths.inventory())?;
    let suppliers = load_suppliers(&config.paths.suppliers())?;

    let analysis = RiskAggregator::new()
        .with_top_n(config.detection.top_n)
        .with_thresholds(config.detection.thresholds.clone())
        .aggregate(&inventory, &suppliers, analyzed_at);

    ensure_exposure_finite(&analysis)?;

    let rows: Vec<EnrichedRow> = analysis.enriched().iter().map(EnrichedRow::from).collect();
    let staged = vec![
        stage_csv(&config.paths.enriched_inventory(), &rows)?,
        stage_json(&config.paths.risk_analysis(), &analysis.report())?,
    ];
    commit_all(staged)?;

    log_risk_report(&analysis);
    Ok(analysis)
}

/// Run `generator` over the ranked risks from the detection stage.
///
/// Writes `ai_recommendations.json`.
pub fn run_recommendations(
    config: &PipelineConfig,
    generator: &dyn RecommendationGenerator,
) -> InfraResult<RecommendationBatch> {
    let report: RiskReport = read_json(&config.paths.risk_analysis(), DETECT_HINT)?;
    if report.top_risks.is_empty() {
        warn!("no High-tier components ranked; recommendation batch will be empty");
    }

    let batch =
        RecommendationRunner::new(config.recommendations.max_components).run(&report, generator);
    write_json(&config.paths.recommendations(), &batch)?;
    info!(
        recommendations = batch.recommendations.len(),
        committed_cost = %format_usd(batch.total_committed_cost_usd()),
        "recommendations written"
    );
    Ok(batch)
}

/// Project ROI from the risk summary and the recommendation batch.
///
/// Writes `roi_analysis.json`.
pub fn run_roi(config: &PipelineConfig, calculated_at: DateTime<Utc>) -> InfraResult<RoiReport> {
    let risk: RiskReport = read_json(&config.paths.risk_analysis(), DETECT_HINT)?;
    let batch: RecommendationBatch = read_json(&config.paths.recommendations(), RECOMMEND_HINT)?;

    let roi = &config.roi;
    let report = RoiProjector::new()
        .with_costs(roi.costs.clone())
        .with_model(roi.model.clone())
        .with_policy(roi.policy.clone())
        .project(&risk.summary, &batch.recommendations, calculated_at)?;

    write_json(&config.paths.roi_analysis(), &report)?;
    log_roi_report(&report);
    Ok(report)
}

/// Validate → detect → recommend (built-in playbook) → ROI.
///
/// Stops before detection when validation fails.
pub fn run_pipeline(config: &PipelineConfig, now: DateTime<Utc>) -> InfraResult<RoiReport> {
    let validation = run_validation(config)?;
    if !validation.passed() {
        return Err(InfraError::ValidationFailed {
            failed: validation.failed_checks(),
        });
    }

    run_detection(config, now)?;
    let generator = PlaybookRecommender::new(config.recommendations.playbook.clone());
    run_recommendations(config, &generator)?;
    run_roi(config, now)
}

// JSON has no encoding for inf/NaN; the next stage could not read it back.
fn ensure_exposure_finite(analysis: &RiskAnalysis) -> InfraResult<()> {
    let total = analysis.summary().financial_metrics.total_exposure_usd;
    if total.is_finite() {
        return Ok(());
    }
    let culprit = analysis
        .enriched()
        .iter()
        .find(|c| !c.financial_exposure_usd().is_finite())
        .map(|c| c.component.part_number.to_string())
        .unwrap_or_else(|| "the portfolio total".to_string());
    Err(DomainError::invariant(format!(
        "financial exposure of {culprit} is not a finite number ({total})"
    ))
    .into())
}

fn log_risk_report(analysis: &RiskAnalysis) {
    let summary = analysis.summary();
    let dist = &summary.risk_distribution;

    for (rank, c) in analysis.top_risks().iter().enumerate() {
        info!(
            rank = rank + 1,
            part_number = %c.component.part_number,
            category = %c.component.category,
            score = c.composite_risk_score(),
            exposure = %format_usd(c.financial_exposure_usd()),
            "top risk"
        );
    }

    let top_category = summary.top_category().unwrap_or("none");
    info!(
        components = summary.total_components_analyzed,
        high = dist.high_risk,
        medium = dist.medium_risk,
        low = dist.low_risk,
        total_exposure = %format_usd(summary.financial_metrics.total_exposure_usd),
        top_category,
        "{} high-risk components, {} exposure, most affected category: {}",
        dist.high_risk,
        format_usd(summary.financial_metrics.total_exposure_usd),
        top_category
    );
}

fn log_roi_report(report: &RoiReport) {
    let es = &report.executive_summary;
    let km = &es.key_metrics;
    let impact = &es.risk_impact;

    info!("{}", es.value_proposition);
    info!(
        investment = %format_usd(km.investment_required),
        avoided = %format_usd(km.aog_costs_avoided),
        net_benefit = %format_usd(km.net_benefit),
        roi_ratio = km.roi_ratio,
        payback = %km.payback_period_months,
        "key financial metrics"
    );
    info!(
        high_risk_components = impact.high_risk_components_identified,
        risk_reduction_pct = impact.risk_reduction_percentage,
        exposure_managed = %format_usd(impact.total_exposure_managed),
        "risk mitigation impact"
    );
    info!(recommendation = %es.recommendation, "investment recommendation");
}
