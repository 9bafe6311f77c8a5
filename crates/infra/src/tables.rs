//! Raw snapshot tables (CSV) → domain records.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use serde::de::DeserializeOwned;
use tracing::info;

use skyguard_core::{ComponentRecord, SupplierRecord};

use crate::error::{InfraError, InfraResult};

pub const INVENTORY_COLUMNS: &[&str] = &[
    "part_number",
    "description",
    "category",
    "current_stock",
    "safety_stock",
    "reorder_point",
    "lead_time_days",
    "lead_time_volatility",
    "supplier_id",
    "criticality",
    "aog_cost_per_day",
];

/// `country_code` is optional.
pub const SUPPLIER_COLUMNS: &[&str] = &[
    "supplier_id",
    "region",
    "on_time_delivery_pct",
    "risk_exposure",
    "country",
];

const RAW_SNAPSHOT_HINT: &str = "run the dataset generation step first \
     (it writes inventory_master.csv and supplier_network.csv into the raw data directory)";

/// Float cells that must hold finite numbers; JSON snapshots cannot carry NaN or inf.
pub(crate) trait FiniteCells {
    /// First offending `(column, value)`, if any.
    fn non_finite(&self) -> Option<(&'static str, f64)>;
}

impl FiniteCells for ComponentRecord {
    fn non_finite(&self) -> Option<(&'static str, f64)> {
        [
            ("lead_time_days", self.lead_time_days),
            ("aog_cost_per_day", Some(self.aog_cost_per_day)),
        ]
        .into_iter()
        .find_map(|(column, value)| value.filter(|v| !v.is_finite()).map(|v| (column, v)))
    }
}

impl FiniteCells for SupplierRecord {
    fn non_finite(&self) -> Option<(&'static str, f64)> {
        let pct = self.on_time_delivery_pct;
        (!pct.is_finite()).then_some(("on_time_delivery_pct", pct))
    }
}

pub fn load_inventory(path: &Path) -> InfraResult<Vec<ComponentRecord>> {
    let file = open(path)?;
    let rows = read_table(file, path, "inventory", INVENTORY_COLUMNS)?;
    info!(path = %path.display(), rows = rows.len(), "inventory loaded");
    Ok(rows)
}

pub fn load_suppliers(path: &Path) -> InfraResult<Vec<SupplierRecord>> {
    let file = open(path)?;
    let rows = read_table(file, path, "supplier", SUPPLIER_COLUMNS)?;
    info!(path = %path.display(), rows = rows.len(), "suppliers loaded");
    Ok(rows)
}

fn open(path: &Path) -> InfraResult<File> {
    File::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => InfraError::missing_input(path, RAW_SNAPSHOT_HINT),
        _ => InfraError::io(path, e),
    })
}

/// Header names are trimmed and unknown columns ignored. Every missing
/// required column is reported at once; a non-finite number fails with its line.
pub(crate) fn read_table<R, T>(
    reader: R,
    path: &Path,
    table: &'static str,
    required: &[&str],
) -> InfraResult<Vec<T>>
where
    R: Read,
    T: DeserializeOwned + FiniteCells,
{
    let csv_err = |source| InfraError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(reader);

    let headers = reader.headers().map_err(csv_err)?.clone();
    let missing: Vec<String> = required
        .iter()
        .filter(|col| !headers.iter().any(|h| h == **col))
        .map(|col| col.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(InfraError::MissingColumns {
            table,
            columns: missing,
        });
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(csv_err)?;
        let row: T = record.deserialize(Some(&headers)).map_err(csv_err)?;
        if let Some((column, value)) = row.non_finite() {
            return Err(InfraError::NonFiniteValue {
                path: path.to_path_buf(),
                line: record.position().map_or(0, |p| p.line()),
                column,
                value,
            });
        }
        rows.push(row);
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use skyguard_core::{Criticality, LeadTimeVolatility, Region, RiskExposure};

    fn inventory(text: &str) -> InfraResult<Vec<ComponentRecord>> {
        let path = Path::new("inventory_master.csv");
        read_table(text.as_bytes(), path, "inventory", INVENTORY_COLUMNS)
    }

    const HEADER: &str = "part_number,description,category,current_stock,safety_stock,reorder_point,\
lead_time_days,lead_time_volatility,supplier_id,criticality,aog_cost_per_day,unit_cost\n";

    #[test]
    fn parses_rows_and_ignores_unknown_columns() {
        let text = format!(
            "{HEADER}PN-ENG-00001,Engine Component - Series A,Engine,-1,20,26,45.0,High,SUP-0001,Critical,150000,1234.5\n\
             PN-AVI-00002,Avionics Component - Series B,Avionics,50,20,26,,Unknown,SUP-0002,Essential,90000,10\n"
        );
        let rows = inventory(&text).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].current_stock, -1);
        assert_eq!(rows[0].lead_time_days, Some(45.0));
        assert_eq!(rows[1].lead_time_days, None);
        assert_eq!(rows[1].lead_time_volatility, LeadTimeVolatility::Unknown);
        assert_eq!(rows[1].criticality, Criticality::Other("Essential".to_string()));
    }

    #[test]
    fn integer_lead_time_text_is_accepted() {
        let text = format!(
            "{HEADER}PN-ENG-00001,Engine,Engine,5,20,26,45,High,SUP-0001,High,150000,1\n"
        );
        assert_eq!(inventory(&text).unwrap()[0].lead_time_days, Some(45.0));
    }

    #[test]
    fn headers_are_trimmed() {
        let text = " supplier_id , region ,on_time_delivery_pct,risk_exposure,country\n\
                    SUP-0001,Middle East,78.5,High,UAE\n";
        let rows: Vec<SupplierRecord> =
            read_table(text.as_bytes(), Path::new("s.csv"), "supplier", SUPPLIER_COLUMNS).unwrap();
        assert_eq!(rows[0].region, Region::MiddleEast);
        assert_eq!(rows[0].risk_exposure, RiskExposure::High);
        assert_eq!(rows[0].country_code, None);
    }

    #[test]
    fn every_missing_column_is_named() {
        let text = "part_number,description,category,current_stock,safety_stock,reorder_point,\
lead_time_days,lead_time_volatility,supplier_id\nPN-1,x,Engine,1,1,1,1,Low,SUP-1\n";
        match inventory(text).unwrap_err() {
            InfraError::MissingColumns { table, columns } => {
                assert_eq!(table, "inventory");
                assert_eq!(columns, vec!["criticality", "aog_cost_per_day"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn blank_key_is_a_csv_error() {
        let text = format!("{HEADER} ,Engine,Engine,5,20,26,45,High,SUP-0001,High,150000,1\n");
        assert!(matches!(inventory(&text), Err(InfraError::Csv { .. })));
    }

    #[test]
    fn non_finite_cost_is_rejected_with_its_line() {
        let text = format!(
            "{HEADER}PN-ENG-00001,Engine,Engine,5,20,26,45,High,SUP-0001,High,150000,1\n\
             PN-ENG-00002,Engine,Engine,5,20,26,45,High,SUP-0001,High,NaN,1\n"
        );
        match inventory(&text).unwrap_err() {
            InfraError::NonFiniteValue { line, column, value, .. } => {
                assert_eq!(line, 3);
                assert_eq!(column, "aog_cost_per_day");
                assert!(value.is_nan());
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn infinite_lead_time_names_the_column() {
        let text =
            format!("{HEADER}PN-ENG-00001,Engine,Engine,5,20,26,inf,High,SUP-0001,High,1,1\n");
        let err = inventory(&text).unwrap_err();
        assert_eq!(
            err.to_string(),
            "inventory_master.csv line 2: lead_time_days must be a finite number, got inf"
        );
    }

    #[test]
    fn non_finite_on_time_pct_is_rejected() {
        let text = "supplier_id,region,on_time_delivery_pct,risk_exposure,country\n\
                    SUP-0001,Middle East,-inf,High,UAE\n";
        let err = read_table::<_, SupplierRecord>(
            text.as_bytes(),
            Path::new("s.csv"),
            "supplier",
            SUPPLIER_COLUMNS,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            InfraError::NonFiniteValue { column: "on_time_delivery_pct", .. }
        ));
    }

    #[test]
    fn missing_file_names_the_generation_step() {
        let path = Path::new("/nonexistent/skyguard/inventory_master.csv");
        let err = load_inventory(path).unwrap_err();
        match &err {
            InfraError::MissingInput { stage_hint, .. } => {
                assert!(stage_hint.starts_with("run the dataset generation step first"));
                assert!(stage_hint.contains("inventory_master.csv"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
