use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::amount::format_amount;

/// A delivery at or under the fast lead-time threshold, with its supplier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FastDelivery {
    pub delivery_id: i32,
    pub company_name: String,
    pub delivery_days: i32,
}

/// Amount owed for a single delivery (`price * quantity`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryCost {
    pub delivery_id: i32,
    pub total_amount: Decimal,
}

impl DeliveryCost {
    /// Total rendered with exactly two fraction digits.
    pub fn total_display(&self) -> String {
        format_amount(&self.total_amount)
    }
}

/// A delivery of the selected material, with its supplier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialDelivery {
    pub delivery_id: i32,
    pub company_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplierMaterialQuantity {
    pub company_name: String,
    pub material_name: String,
    pub total_quantity: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialQuantity {
    pub material_name: String,
    pub total_quantity: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplierDeliveryCount {
    pub company_name: String,
    pub total_deliveries: i64,
}

/// Results of one pass over the six reporting queries.
///
/// Only `fast_deliveries` has a defined order (supplier name, then delivery
/// id). The grouped results are unordered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryReport {
    pub fast_delivery_days: i32,
    pub fast_deliveries: Vec<FastDelivery>,
    pub delivery_costs: Vec<DeliveryCost>,
    pub selected_material: String,
    pub material_deliveries: Vec<MaterialDelivery>,
    pub supplier_material_quantities: Vec<SupplierMaterialQuantity>,
    pub material_quantities: Vec<MaterialQuantity>,
    pub supplier_delivery_counts: Vec<SupplierDeliveryCount>,
}
