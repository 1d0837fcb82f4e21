use std::collections::BTreeMap;

use supplychain_core::{Delivery, Material, NewDelivery, NewMaterial, NewSupplier, Supplier};

/// Rows keyed by identity. Identities start at 1 and are never reused.
#[derive(Debug, Default)]
pub(super) struct Tables {
    pub suppliers: BTreeMap<i32, Supplier>,
    pub materials: BTreeMap<i32, Material>,
    pub deliveries: BTreeMap<i32, Delivery>,
    last_supplier_id: i32,
    last_material_id: i32,
    last_delivery_id: i32,
}

/// A delivery with both of its parents resolved.
pub(super) struct JoinedRow<'a> {
    pub delivery: &'a Delivery,
    pub supplier: &'a Supplier,
    pub material: &'a Material,
}

impl Tables {
    pub fn push_supplier(&mut self, supplier: NewSupplier) -> i32 {
        self.last_supplier_id += 1;
        let id = self.last_supplier_id;
        self.suppliers.insert(id, supplier.into_supplier(id));
        id
    }

    pub fn push_material(&mut self, material: NewMaterial) -> i32 {
        self.last_material_id += 1;
        let id = self.last_material_id;
        self.materials.insert(id, material.into_material(id));
        id
    }

    pub fn push_delivery(&mut self, delivery: NewDelivery) -> i32 {
        self.last_delivery_id += 1;
        let id = self.last_delivery_id;
        self.deliveries.insert(id, delivery.into_delivery(id));
        id
    }

    /// Inner join of deliveries with suppliers and materials, in delivery id order.
    pub fn joined(&self) -> impl Iterator<Item = JoinedRow<'_>> {
        self.deliveries.values().filter_map(|delivery| {
            let supplier = self.suppliers.get(&delivery.supplier_id)?;
            let material = self.materials.get(&delivery.material_id)?;
            Some(JoinedRow {
                delivery,
                supplier,
                material,
            })
        })
    }
}
