//! Core contracts for the supply-chain reporting workspace.
//!
//! This crate defines the entity rows, the report rows produced by the query
//! set, the shared error type, and small helpers used by the store, the
//! generator, and the CLI.

pub mod amount;
pub mod error;
pub mod model;
pub mod redaction;
pub mod report;
pub mod validation;

pub use amount::format_amount;
pub use error::{Error, ErrorKind, Result};
pub use model::{Delivery, Material, NewDelivery, NewMaterial, NewSupplier, Supplier};
pub use redaction::redact_database_url;
pub use report::{
    DeliveryCost, FastDelivery, MaterialDelivery, MaterialQuantity, QueryReport,
    SupplierDeliveryCount, SupplierMaterialQuantity,
};
pub use validation::{column_price, validate_delivery, validate_material, validate_supplier};

/// Lead time (in days) at or below which a delivery counts as fast.
pub const DEFAULT_FAST_DELIVERY_DAYS: i32 = 3;

/// Material name used by the "deliveries of a selected material" query.
pub const DEFAULT_SELECTED_MATERIAL: &str = "Wood";
