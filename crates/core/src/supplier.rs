//! Supplier record as delivered by the supplier network snapshot.

use serde::{Deserialize, Serialize};

use crate::entity::Entity;
use crate::id::SupplierId;
use crate::labels::{Region, RiskExposure};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplierRecord {
    pub supplier_id: SupplierId,
    pub region: Region,
    pub on_time_delivery_pct: f64,
    pub risk_exposure: RiskExposure,
    pub country: String,
    #[serde(default)]
    pub country_code: Option<String>,
}

impl Entity for SupplierRecord {
    type Id = SupplierId;

    fn id(&self) -> &Self::Id {
        &self.supplier_id
    }
}
