use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use tracing::{error, info};

use skyguard_ai::PlaybookRecommender;
use skyguard_core::RunId;
use skyguard_infra::{
    InfraError, PipelineConfig, run_detection, run_pipeline, run_recommendations, run_roi,
    run_validation,
};

mod cli;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = PipelineConfig::load(cli.global.config.as_deref())
        .context("failed to load configuration")?;
    cli.apply_overrides(&mut config);

    skyguard_observability::init(&config.logging);

    let run_id = RunId::new();
    let span = skyguard_observability::run_span(&run_id, cli.command.name());
    let _guard = span.enter();

    let result = execute(&cli.command, &config);
    if let Err(e) = &result {
        error!(error = %e, "stage failed");
    }
    result.with_context(|| format!("skyguard {} failed", cli.command.name()))
}

fn execute(command: &Commands, config: &PipelineConfig) -> Result<(), InfraError> {
    match command {
        Commands::Validate => {
            let report = run_validation(config)?;
            if !report.passed() {
                return Err(InfraError::ValidationFailed {
                    failed: report.failed_checks(),
                });
            }
        }
        Commands::Detect(_) => {
            run_detection(config, Utc::now())?;
        }
        Commands::Recommend(_) => {
            let generator = PlaybookRecommender::new(config.recommendations.playbook.clone());
            run_recommendations(config, &generator)?;
        }
        Commands::Roi => {
            run_roi(config, Utc::now())?;
        }
        Commands::Run { .. } => {
            run_pipeline(config, Utc::now())?;
        }
    }
    info!(command = command.name(), "complete");
    Ok(())
}
