//! `skyguard-core`: domain foundation building blocks.
//!
//! This crate contains the **raw snapshot records** (components, suppliers),
//! their labelled vocabularies and typed identifiers. No IO, no scoring.

pub mod component;
pub mod entity;
pub mod error;
pub mod id;
pub mod labels;
pub mod money;
pub mod supplier;

pub use component::ComponentRecord;
pub use entity::{Entity, duplicate_ids};
pub use error::{DomainError, DomainResult};
pub use id::{PartNumber, RunId, SupplierId};
pub use money::format_usd;
pub use labels::{Category, Criticality, LeadTimeVolatility, Region, RiskExposure, RiskLevel};
pub use supplier::SupplierRecord;
