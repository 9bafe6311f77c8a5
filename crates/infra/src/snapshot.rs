//! Stage hand-off files.
//!
//! Every output is written as one complete snapshot: serialize into a sibling
//! temp file, then rename over the target. Readers never observe a partial file.
//! A stage producing several files stages all of them before committing any.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use skyguard_core::{
    Category, Criticality, LeadTimeVolatility, PartNumber, Region, RiskExposure, RiskLevel,
    SupplierId,
};
use skyguard_risk::ScoredComponent;

use crate::error::{InfraError, InfraResult};

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// A fully written temp file awaiting rename onto its target.
///
/// Dropping it without [`commit`](StagedFile::commit) removes the temp file.
#[must_use = "a staged file is discarded unless committed"]
#[derive(Debug)]
pub struct StagedFile {
    tmp: PathBuf,
    target: PathBuf,
    committed: bool,
}

impl StagedFile {
    pub fn commit(mut self) -> InfraResult<()> {
        fs::rename(&self.tmp, &self.target).map_err(|e| InfraError::io(&self.target, e))?;
        self.committed = true;
        info!(path = %self.target.display(), "snapshot written");
        Ok(())
    }
}

impl Drop for StagedFile {
    fn drop(&mut self) {
        if !self.committed {
            let _ = fs::remove_file(&self.tmp);
        }
    }
}

/// Commit in order, stopping at the first failure; uncommitted files are discarded.
///
/// Put the file downstream stages read last, so it only appears once its
/// siblings are in place.
pub fn commit_all(staged: Vec<StagedFile>) -> InfraResult<()> {
    for file in staged {
        file.commit()?;
    }
    Ok(())
}

fn stage<F>(path: &Path, fill: F) -> InfraResult<StagedFile>
where
    F: FnOnce(&mut BufWriter<File>) -> InfraResult<()>,
{
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| InfraError::io(parent, e))?;
    }

    let staged = StagedFile {
        tmp: temp_path(path),
        target: path.to_path_buf(),
        committed: false,
    };
    let file = File::create(&staged.tmp).map_err(|e| InfraError::io(&staged.tmp, e))?;
    let mut writer = BufWriter::new(file);
    fill(&mut writer)?;
    writer.flush().map_err(|e| InfraError::io(&staged.tmp, e))?;
    Ok(staged)
}

/// Pretty-printed JSON, staged but not yet visible at `path`.
pub fn stage_json<T: Serialize>(path: &Path, value: &T) -> InfraResult<StagedFile> {
    stage(path, |w| {
        serde_json::to_writer_pretty(&mut *w, value).map_err(|source| InfraError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        w.write_all(b"\n").map_err(|e| InfraError::io(path, e))
    })
}

/// CSV with a header row taken from `T`'s field names, staged but not yet visible.
pub fn stage_csv<T: Serialize>(path: &Path, rows: &[T]) -> InfraResult<StagedFile> {
    let csv_err = |source| InfraError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let staged = stage(path, |w| {
        let mut writer = csv::Writer::from_writer(&mut *w);
        for row in rows {
            writer.serialize(row).map_err(csv_err)?;
        }
        writer.flush().map_err(|e| InfraError::io(path, e))
    })?;
    debug!(path = %path.display(), rows = rows.len(), "csv staged");
    Ok(staged)
}

pub fn write_json<T: Serialize>(path: &Path, value: &T) -> InfraResult<()> {
    stage_json(path, value)?.commit()
}

/// Read an upstream stage's JSON output; absence names the stage to run first.
pub fn read_json<T: DeserializeOwned>(path: &Path, stage_hint: &str) -> InfraResult<T> {
    let bytes = fs::read(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => InfraError::missing_input(path, stage_hint),
        _ => InfraError::io(path, e),
    })?;
    serde_json::from_slice(&bytes).map_err(|source| InfraError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Flat row of `enriched_inventory_with_risks.csv`.
///
/// Supplier columns are blank when the component's supplier is unmatched.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedRow {
    pub part_number: PartNumber,
    pub description: String,
    pub category: Category,
    pub current_stock: i64,
    pub safety_stock: i64,
    pub reorder_point: i64,
    pub lead_time_days: Option<f64>,
    pub lead_time_volatility: LeadTimeVolatility,
    pub supplier_id: SupplierId,
    pub criticality: Criticality,
    pub aog_cost_per_day: f64,
    pub region: Option<Region>,
    pub on_time_delivery_pct: Option<f64>,
    pub risk_exposure: Option<RiskExposure>,
    pub country: Option<String>,
    pub country_code: Option<String>,
    pub inventory_risk_score: u32,
    pub supplier_multiplier: f64,
    pub composite_risk_score: f64,
    pub risk_level: RiskLevel,
    pub estimated_outage_days: f64,
    pub financial_exposure_usd: f64,
}

impl From<&ScoredComponent> for EnrichedRow {
    fn from(scored: &ScoredComponent) -> Self {
        let c = &scored.component;
        let s = scored.supplier.as_ref();
        let a = &scored.assessment;
        Self {
            part_number: c.part_number.clone(),
            description: c.description.clone(),
            category: c.category.clone(),
            current_stock: c.current_stock,
            safety_stock: c.safety_stock,
            reorder_point: c.reorder_point,
            lead_time_days: c.lead_time_days,
            lead_time_volatility: c.lead_time_volatility.clone(),
            supplier_id: c.supplier_id.clone(),
            criticality: c.criticality.clone(),
            aog_cost_per_day: c.aog_cost_per_day,
            region: s.map(|s| s.region.clone()),
            on_time_delivery_pct: s.map(|s| s.on_time_delivery_pct),
            risk_exposure: s.map(|s| s.risk_exposure.clone()),
            country: s.map(|s| s.country.clone()),
            country_code: s.and_then(|s| s.country_code.clone()),
            inventory_risk_score: a.inventory_risk_score,
            supplier_multiplier: a.supplier_multiplier,
            composite_risk_score: a.composite_risk_score,
            risk_level: a.risk_level,
            estimated_outage_days: a.estimated_outage_days,
            financial_exposure_usd: a.financial_exposure_usd,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use skyguard_core::ComponentRecord;
    use skyguard_risk::RiskThresholds;

    fn scored(supplier: Option<RiskExposure>) -> ScoredComponent {
        let component = ComponentRecord {
            part_number: PartNumber::parse("PN-LDG-00042").unwrap(),
            description: "Landing Gear Component - Series D".to_string(),
            category: Category::LandingGear,
            current_stock: 0,
            safety_stock: 12,
            reorder_point: 16,
            lead_time_days: None,
            lead_time_volatility: LeadTimeVolatility::Unknown,
            supplier_id: SupplierId::parse("SUP-0099").unwrap(),
            criticality: Criticality::Critical,
            aog_cost_per_day: 150_000.0,
        };
        let supplier = supplier.map(|risk_exposure| skyguard_risk::SupplierAttributes {
            region: Region::AsiaPacific,
            on_time_delivery_pct: 81.0,
            risk_exposure,
            country: "Singapore".to_string(),
            country_code: None,
        });
        ScoredComponent::new(component, supplier, &RiskThresholds::default())
    }

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Payload {
        value: u32,
    }

    #[test]
    fn json_round_trips_and_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/out.json");

        write_json(&path, &serde_json::json!({ "value": 7 })).unwrap();
        let back: Payload = read_json(&path, "run something first").unwrap();

        assert_eq!(back, Payload { value: 7 });
        assert!(!temp_path(&path).exists());
    }

    #[test]
    fn rewrite_replaces_previous_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        write_json(&path, &serde_json::json!({ "value": 1 })).unwrap();
        write_json(&path, &serde_json::json!({ "value": 2 })).unwrap();
        let back: Payload = read_json(&path, "").unwrap();
        assert_eq!(back.value, 2);
    }

    #[test]
    fn missing_upstream_file_carries_the_hint() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("risk_analysis.json");
        let err = read_json::<Payload>(&path, "run `skyguard detect` first").unwrap_err();
        assert!(err.to_string().ends_with("run `skyguard detect` first"));
    }

    #[test]
    fn failed_commit_discards_every_staged_file() {
        let dir = tempfile::tempdir().unwrap();
        let csv_path = dir.path().join("enriched.csv");
        let json_path = dir.path().join("report.json");
        // a directory squatting on the target makes the rename fail
        fs::create_dir(&csv_path).unwrap();

        let staged = vec![
            stage_csv(&csv_path, &[Payload { value: 1 }]).unwrap(),
            stage_json(&json_path, &serde_json::json!({ "value": 1 })).unwrap(),
        ];
        assert!(temp_path(&json_path).exists());

        assert!(commit_all(staged).is_err());
        assert!(!json_path.exists());
        assert!(!temp_path(&json_path).exists());
        assert!(!temp_path(&csv_path).exists());
    }

    #[test]
    fn dropped_stage_leaves_nothing_behind() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        let staged = stage_json(&path, &serde_json::json!({ "value": 3 })).unwrap();
        assert!(temp_path(&path).exists());
        drop(staged);
        assert!(!path.exists());
        assert!(!temp_path(&path).exists());
    }

    #[test]
    fn enriched_csv_leaves_supplier_columns_blank_when_unmatched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("enriched.csv");
        let rows: Vec<EnrichedRow> = [scored(Some(RiskExposure::High)), scored(None)]
            .iter()
            .map(EnrichedRow::from)
            .collect();

        stage_csv(&path, &rows).unwrap().commit().unwrap();
        let text = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("part_number,description,category,current_stock"));
        assert!(lines[0].ends_with("risk_level,estimated_outage_days,financial_exposure_usd"));
        assert!(lines[1].contains(",Asia-Pacific,81.0,High,Singapore,,"));
        assert!(lines[1].contains(",High,30.0,4500000.0"));
        assert!(lines[2].contains(",SUP-0099,Critical,150000.0,,,,,,"));
    }
}
