use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A stored supplier row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Supplier {
    pub supplier_id: i32,
    pub company_name: String,
    pub contact_person: String,
    pub phone: Option<String>,
    pub account_number: Option<String>,
}

/// Supplier values before the store assigns an identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSupplier {
    pub company_name: String,
    pub contact_person: String,
    pub phone: Option<String>,
    pub account_number: Option<String>,
}

impl NewSupplier {
    pub fn into_supplier(self, supplier_id: i32) -> Supplier {
        Supplier {
            supplier_id,
            company_name: self.company_name,
            contact_person: self.contact_person,
            phone: self.phone,
            account_number: self.account_number,
        }
    }
}

/// A stored material row. `price` carries two fraction digits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Material {
    pub material_id: i32,
    pub material_name: String,
    pub price: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMaterial {
    pub material_name: String,
    pub price: Decimal,
}

impl NewMaterial {
    pub fn new(material_name: impl Into<String>, price: Decimal) -> Self {
        Self {
            material_name: material_name.into(),
            price,
        }
    }

    pub fn into_material(self, material_id: i32) -> Material {
        Material {
            material_id,
            material_name: self.material_name,
            price: self.price,
        }
    }
}

/// A stored delivery row. References exactly one supplier and one material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delivery {
    pub delivery_id: i32,
    pub delivery_date: NaiveDate,
    pub supplier_id: i32,
    pub material_id: i32,
    /// Lead time in days.
    pub delivery_days: i32,
    pub quantity: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewDelivery {
    pub delivery_date: NaiveDate,
    pub supplier_id: i32,
    pub material_id: i32,
    pub delivery_days: i32,
    pub quantity: i32,
}

impl NewDelivery {
    pub fn into_delivery(self, delivery_id: i32) -> Delivery {
        Delivery {
            delivery_id,
            delivery_date: self.delivery_date,
            supplier_id: self.supplier_id,
            material_id: self.material_id,
            delivery_days: self.delivery_days,
            quantity: self.quantity,
        }
    }
}
