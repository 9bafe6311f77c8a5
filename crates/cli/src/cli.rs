use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use skyguard_infra::PipelineConfig;

#[derive(Parser, Debug)]
#[command(name = "skyguard")]
#[command(about = "MRO inventory risk scoring and ROI projection", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Debug, Default)]
pub struct GlobalArgs {
    /// TOML configuration file
    #[arg(long, global = true, env = "SKYGUARD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory holding the raw inventory and supplier tables
    #[arg(long, global = true)]
    pub raw_dir: Option<PathBuf>,

    /// Directory stage outputs are written to
    #[arg(long, global = true)]
    pub processed_dir: Option<PathBuf>,
}

#[derive(Args, Debug, Default, Clone, Copy)]
pub struct DetectArgs {
    /// Number of High-tier components to rank
    #[arg(long)]
    pub top_n: Option<usize>,
}

#[derive(Args, Debug, Default, Clone, Copy)]
pub struct RecommendArgs {
    /// Maximum components sent to the recommendation generator
    #[arg(long)]
    pub max_components: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check the raw tables against data-quality rules
    Validate,

    /// Score, classify and rank components; writes the risk analysis
    Detect(DetectArgs),

    /// Generate mitigation recommendations for the ranked risks
    Recommend(RecommendArgs),

    /// Project ROI from the risk analysis and recommendations
    Roi,

    /// Run validate, detect, recommend and roi in order
    Run {
        #[command(flatten)]
        detect: DetectArgs,

        #[command(flatten)]
        recommend: RecommendArgs,
    },
}

impl Commands {
    pub fn name(&self) -> &'static str {
        match self {
            Commands::Validate => "validate",
            Commands::Detect(_) => "detect",
            Commands::Recommend(_) => "recommend",
            Commands::Roi => "roi",
            Commands::Run { .. } => "run",
        }
    }
}

impl Cli {
    /// Apply flag overrides on top of file + environment configuration.
    pub fn apply_overrides(&self, config: &mut PipelineConfig) {
        if let Some(dir) = &self.global.raw_dir {
            config.paths.raw_dir = dir.clone();
        }
        if let Some(dir) = &self.global.processed_dir {
            config.paths.processed_dir = dir.clone();
        }

        let (detect, recommend) = match &self.command {
            Commands::Detect(d) => (Some(*d), None),
            Commands::Recommend(r) => (None, Some(*r)),
            Commands::Run { detect, recommend } => (Some(*detect), Some(*recommend)),
            Commands::Validate | Commands::Roi => (None, None),
        };
        if let Some(top_n) = detect.and_then(|d| d.top_n) {
            config.detection.top_n = top_n;
        }
        if let Some(max) = recommend.and_then(|r| r.max_components) {
            config.recommendations.max_components = max;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn run_flags_override_config() {
        let cli = parse(&[
            "skyguard",
            "run",
            "--top-n",
            "3",
            "--max-components",
            "2",
            "--processed-dir",
            "/tmp/out",
        ]);
        let mut config = PipelineConfig::default();
        cli.apply_overrides(&mut config);

        assert_eq!(cli.command.name(), "run");
        assert_eq!(config.detection.top_n, 3);
        assert_eq!(config.recommendations.max_components, 2);
        assert_eq!(config.paths.processed_dir, PathBuf::from("/tmp/out"));
        assert_eq!(config.paths.raw_dir, PathBuf::from("data/raw"));
    }

    #[test]
    fn global_flags_work_before_the_subcommand() {
        let cli = parse(&["skyguard", "--raw-dir", "/srv/raw", "detect"]);
        let mut config = PipelineConfig::default();
        cli.apply_overrides(&mut config);
        assert_eq!(config.paths.raw_dir, PathBuf::from("/srv/raw"));
        assert_eq!(config.detection.top_n, 10);
    }

    #[test]
    fn stage_flags_are_scoped_to_their_stage() {
        assert!(Cli::try_parse_from(["skyguard", "roi", "--top-n", "3"]).is_err());
        assert!(Cli::try_parse_from(["skyguard", "detect", "--max-components", "3"]).is_err());
    }
}
