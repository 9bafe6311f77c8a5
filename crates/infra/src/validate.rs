//! Data-quality checks over the raw snapshot.
//!
//! Negative stock and missing lead times are expected inputs with defined
//! scoring fallbacks, so they are not checked here.

use serde::Serialize;
use tracing::{info, warn};

use skyguard_core::{ComponentRecord, DomainError, SupplierRecord, duplicate_ids};

/// Cap on offending keys quoted in a check's detail.
const MAX_EXAMPLES: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationCheck {
    pub table: &'static str,
    pub name: &'static str,
    pub passed: bool,
    /// Empty when the check passed.
    pub detail: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationReport {
    pub inventory_rows: usize,
    pub supplier_rows: usize,
    pub checks: Vec<ValidationCheck>,
}

impl ValidationReport {
    pub fn passed(&self) -> bool {
        self.checks.iter().all(|c| c.passed)
    }

    pub fn failed_checks(&self) -> Vec<String> {
        self.checks
            .iter()
            .filter(|c| !c.passed)
            .map(|c| format!("{}.{}", c.table, c.name))
            .collect()
    }

    pub fn log(&self) {
        for check in &self.checks {
            if check.passed {
                info!(table = check.table, check = check.name, "PASS");
            } else {
                warn!(table = check.table, check = check.name, detail = %check.detail, "FAIL");
            }
        }
        if self.passed() {
            info!(checks = self.checks.len(), "validation passed");
        } else {
            warn!(failed = ?self.failed_checks(), "validation failed");
        }
    }
}

pub fn validate_snapshot(
    inventory: &[ComponentRecord],
    suppliers: &[SupplierRecord],
) -> ValidationReport {
    let dup_parts: Vec<String> = duplicate_ids(inventory)
        .iter()
        .map(|id| DomainError::duplicate("part_number", id.as_str()).to_string())
        .collect();
    let bad_costs: Vec<String> = inventory
        .iter()
        .filter(|c| !(c.aog_cost_per_day.is_finite() && c.aog_cost_per_day > 0.0))
        .map(|c| format!("{} ({})", c.part_number, c.aog_cost_per_day))
        .collect();
    let bad_criticality: Vec<String> = inventory
        .iter()
        .filter(|c| !c.criticality.is_recognized())
        .map(|c| format!("{} ({})", c.part_number, c.criticality))
        .collect();

    let dup_suppliers: Vec<String> = duplicate_ids(suppliers)
        .iter()
        .map(|id| DomainError::duplicate("supplier_id", id.as_str()).to_string())
        .collect();
    let bad_otd: Vec<String> = suppliers
        .iter()
        .filter(|s| !(0.0..=100.0).contains(&s.on_time_delivery_pct))
        .map(|s| format!("{} ({})", s.supplier_id, s.on_time_delivery_pct))
        .collect();

    ValidationReport {
        inventory_rows: inventory.len(),
        supplier_rows: suppliers.len(),
        checks: vec![
            check("inventory", "unique_parts", dup_parts),
            check("inventory", "valid_aog_costs", bad_costs),
            check("inventory", "valid_criticality", bad_criticality),
            check("suppliers", "unique_suppliers", dup_suppliers),
            check("suppliers", "valid_otd", bad_otd),
        ],
    }
}

fn check(table: &'static str, name: &'static str, offenders: Vec<String>) -> ValidationCheck {
    let detail = if offenders.is_empty() {
        String::new()
    } else {
        let shown = offenders
            .iter()
            .take(MAX_EXAMPLES)
            .cloned()
            .collect::<Vec<_>>()
            .join("; ");
        if offenders.len() > MAX_EXAMPLES {
            format!("{} offending rows: {shown}; ...", offenders.len())
        } else {
            format!("{} offending rows: {shown}", offenders.len())
        }
    };
    ValidationCheck {
        table,
        name,
        passed: offenders.is_empty(),
        detail,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skyguard_core::{
        Category, Criticality, LeadTimeVolatility, PartNumber, Region, RiskExposure, SupplierId,
    };

    fn component(pn: &str, criticality: &str, aog: f64) -> ComponentRecord {
        ComponentRecord {
            part_number: PartNumber::parse(pn).unwrap(),
            description: "Hydraulics Component - Series A".to_string(),
            category: Category::Hydraulics,
            current_stock: -3,
            safety_stock: 10,
            reorder_point: 14,
            lead_time_days: None,
            lead_time_volatility: LeadTimeVolatility::Unknown,
            supplier_id: SupplierId::parse("SUP-0001").unwrap(),
            criticality: Criticality::from(criticality),
            aog_cost_per_day: aog,
        }
    }

    fn supplier(id: &str, otd: f64) -> SupplierRecord {
        SupplierRecord {
            supplier_id: SupplierId::parse(id).unwrap(),
            region: Region::Europe,
            on_time_delivery_pct: otd,
            risk_exposure: RiskExposure::Low,
            country: "Germany".to_string(),
            country_code: Some("DE".to_string()),
        }
    }

    fn check_named<'a>(r: &'a ValidationReport, name: &str) -> &'a ValidationCheck {
        r.checks.iter().find(|c| c.name == name).unwrap()
    }

    #[test]
    fn clean_snapshot_passes_despite_negative_stock_and_missing_lead_time() {
        let r = validate_snapshot(
            &[component("PN-1", "Critical", 100_000.0), component("PN-2", "Low", 5_000.0)],
            &[supplier("SUP-0001", 92.5)],
        );
        assert!(r.passed());
        assert_eq!(r.checks.len(), 5);
        assert!(r.failed_checks().is_empty());
    }

    #[test]
    fn each_rule_reports_its_offenders() {
        let r = validate_snapshot(
            &[
                component("PN-1", "Critical", 100_000.0),
                component("PN-1", "Essential", 0.0),
            ],
            &[supplier("SUP-0001", 101.0), supplier("SUP-0001", 50.0)],
        );

        assert!(!r.passed());
        assert_eq!(
            r.failed_checks(),
            vec![
                "inventory.unique_parts",
                "inventory.valid_aog_costs",
                "inventory.valid_criticality",
                "suppliers.unique_suppliers",
                "suppliers.valid_otd",
            ]
        );
        assert!(check_named(&r, "unique_parts").detail.contains("PN-1"));
        assert!(check_named(&r, "valid_criticality").detail.contains("Essential"));
        assert!(check_named(&r, "valid_otd").detail.contains("SUP-0001 (101)"));
    }

    #[test]
    fn long_offender_lists_are_truncated() {
        let rows: Vec<ComponentRecord> = (0..8)
            .map(|i| component(&format!("PN-{i}"), "Low", -1.0))
            .collect();
        let r = validate_snapshot(&rows, &[]);
        let detail = &check_named(&r, "valid_aog_costs").detail;
        assert!(detail.starts_with("8 offending rows"));
        assert!(detail.ends_with("; ..."));
        assert!(!detail.contains("PN-7"));
    }
}
