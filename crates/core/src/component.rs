//! Component (SKU) record as delivered by the inventory snapshot.

use serde::{Deserialize, Serialize};

use crate::entity::Entity;
use crate::id::{PartNumber, SupplierId};
use crate::labels::{Category, Criticality, LeadTimeVolatility};

/// One inventory row. Raw fields only: derived risk fields live on the
/// scored record produced by the risk pipeline.
///
/// `current_stock` may be negative; upstream writes `-1` as a data-quality
/// marker and scoring treats it as out of stock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentRecord {
    pub part_number: PartNumber,
    pub description: String,
    pub category: Category,
    pub current_stock: i64,
    pub safety_stock: i64,
    pub reorder_point: i64,
    /// Days from order to receipt. Absent when the snapshot has no value.
    #[serde(default)]
    pub lead_time_days: Option<f64>,
    pub lead_time_volatility: LeadTimeVolatility,
    pub supplier_id: SupplierId,
    pub criticality: Criticality,
    /// Cost of an aircraft-on-ground day attributable to this part (USD/day).
    pub aog_cost_per_day: f64,
}

impl Entity for ComponentRecord {
    type Id = PartNumber;

    fn id(&self) -> &Self::Id {
        &self.part_number
    }
}
