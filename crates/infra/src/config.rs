//! Pipeline configuration.
//!
//! Layering (later wins): built-in defaults → TOML file → `SKYGUARD_*`
//! environment variables → CLI flags (applied by the binary).

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use skyguard_ai::{DEFAULT_MAX_COMPONENTS, PlaybookCosts};
use skyguard_observability::{LogConfig, LogFormat};
use skyguard_risk::{DEFAULT_TOP_N, RiskThresholds};
use skyguard_roi::{AvoidanceModel, RecommendationPolicy, SystemCosts};

use crate::error::{InfraError, InfraResult};

pub const INVENTORY_FILE: &str = "inventory_master.csv";
pub const SUPPLIERS_FILE: &str = "supplier_network.csv";
pub const RISK_ANALYSIS_FILE: &str = "risk_analysis.json";
pub const ENRICHED_INVENTORY_FILE: &str = "enriched_inventory_with_risks.csv";
pub const RECOMMENDATIONS_FILE: &str = "ai_recommendations.json";
pub const ROI_ANALYSIS_FILE: &str = "roi_analysis.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub raw_dir: PathBuf,
    pub processed_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            raw_dir: PathBuf::from("data/raw"),
            processed_dir: PathBuf::from("data/processed"),
        }
    }
}

impl PathsConfig {
    pub fn inventory(&self) -> PathBuf {
        self.raw_dir.join(INVENTORY_FILE)
    }

    pub fn suppliers(&self) -> PathBuf {
        self.raw_dir.join(SUPPLIERS_FILE)
    }

    pub fn risk_analysis(&self) -> PathBuf {
        self.processed_dir.join(RISK_ANALYSIS_FILE)
    }

    pub fn enriched_inventory(&self) -> PathBuf {
        self.processed_dir.join(ENRICHED_INVENTORY_FILE)
    }

    pub fn recommendations(&self) -> PathBuf {
        self.processed_dir.join(RECOMMENDATIONS_FILE)
    }

    pub fn roi_analysis(&self) -> PathBuf {
        self.processed_dir.join(ROI_ANALYSIS_FILE)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    pub top_n: usize,
    pub thresholds: RiskThresholds,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            thresholds: RiskThresholds::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommendationsConfig {
    pub max_components: usize,
    pub playbook: PlaybookCosts,
}

impl Default for RecommendationsConfig {
    fn default() -> Self {
        Self {
            max_components: DEFAULT_MAX_COMPONENTS,
            playbook: PlaybookCosts::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RoiConfig {
    pub costs: SystemCosts,
    pub model: AvoidanceModel,
    pub policy: RecommendationPolicy,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub paths: PathsConfig,
    pub detection: DetectionConfig,
    pub recommendations: RecommendationsConfig,
    pub roi: RoiConfig,
    pub logging: LogConfig,
}

impl PipelineConfig {
    /// Defaults, then `file` (when given), then the process environment.
    pub fn load(file: Option<&Path>) -> InfraResult<Self> {
        let mut config = match file {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env_with(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> InfraResult<Self> {
        let contents = fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => {
                InfraError::missing_input(path, "check the --config path")
            }
            _ => InfraError::io(path, e),
        })?;
        let config = Self::from_toml(&contents)
            .map_err(|e| InfraError::config(format!("{}: {e}", path.display())))?;
        debug!(path = %path.display(), "loaded config file");
        Ok(config)
    }

    pub fn from_toml(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Apply `SKYGUARD_*` overrides read through `lookup`.
    pub fn apply_env_with<F>(&mut self, lookup: F) -> InfraResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("SKYGUARD_RAW_DIR") {
            self.paths.raw_dir = PathBuf::from(v);
        }
        if let Some(v) = lookup("SKYGUARD_PROCESSED_DIR") {
            self.paths.processed_dir = PathBuf::from(v);
        }
        if let Some(v) = lookup("SKYGUARD_TOP_N") {
            self.detection.top_n = parse_count("SKYGUARD_TOP_N", &v)?;
        }
        if let Some(v) = lookup("SKYGUARD_MAX_RECOMMENDATIONS") {
            self.recommendations.max_components = parse_count("SKYGUARD_MAX_RECOMMENDATIONS", &v)?;
        }
        if let Some(v) = lookup("SKYGUARD_LOG_FORMAT") {
            self.logging.format = v
                .parse::<LogFormat>()
                .map_err(|e| InfraError::config(format!("SKYGUARD_LOG_FORMAT: {e}")))?;
        }
        if let Some(v) = lookup("SKYGUARD_LOG_LEVEL") {
            self.logging.level = v;
        }
        Ok(())
    }

    /// Reject policy tables and model parameters that cannot be applied.
    pub fn validate(&self) -> InfraResult<()> {
        self.detection.thresholds.validate()?;
        self.roi.costs.validate()?;
        self.roi.model.validate()?;
        self.roi.policy.validate()?;

        let playbook = &self.recommendations.playbook;
        let costs = [
            playbook.expedite_usd,
            playbook.alternate_supplier_usd,
            playbook.safety_stock_uplift_usd,
        ];
        if costs.iter().any(|c| !(c.is_finite() && *c >= 0.0)) {
            return Err(InfraError::config(
                "playbook costs must be finite non-negative amounts",
            ));
        }
        Ok(())
    }
}

fn parse_count(key: &str, raw: &str) -> InfraResult<usize> {
    raw.trim()
        .parse::<usize>()
        .map_err(|_| {
            InfraError::config(format!("{key} must be a non-negative integer (got {raw:?})"))
        })
}
