use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use rust_decimal::Decimal;
use tracing::debug;

use supplychain_core::{
    Delivery, DeliveryCost, Error, FastDelivery, Material, MaterialDelivery, MaterialQuantity,
    NewDelivery, NewMaterial, NewSupplier, Result, Supplier, SupplierDeliveryCount,
    SupplierMaterialQuantity, column_price, validate_delivery, validate_material, validate_supplier,
};

use crate::store::Store;

mod tables;

use tables::Tables;

/// In-process store with the same contract as the Postgres backend.
///
/// Batches are checked in full before any row is written, so a rejected
/// batch leaves no partial rows behind. After [`Store::close`] every call
/// fails with a connection error.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Mutex<Option<Tables>>,
    closed: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Option<Tables>>> {
        if self.is_closed() {
            return Err(Error::Connection("memory store session is closed".to_string()));
        }
        self.tables
            .lock()
            .map_err(|_| Error::Connection("memory store lock poisoned".to_string()))
    }

    fn with_tables<T>(&self, f: impl FnOnce(&Tables) -> T) -> Result<T> {
        let guard = self.lock()?;
        let tables = guard.as_ref().ok_or_else(missing_tables)?;
        Ok(f(tables))
    }

    fn with_tables_mut<T>(&self, f: impl FnOnce(&mut Tables) -> Result<T>) -> Result<T> {
        let mut guard = self.lock()?;
        let tables = guard.as_mut().ok_or_else(missing_tables)?;
        f(tables)
    }
}

fn missing_tables() -> Error {
    Error::Query("tables do not exist; create them first".to_string())
}

#[async_trait]
impl Store for MemoryStore {
    fn engine(&self) -> &'static str {
        "memory"
    }

    async fn create_tables(&self) -> Result<()> {
        let mut guard = self.lock()?;
        if guard.is_none() {
            *guard = Some(Tables::default());
            debug!(event = "tables_created", engine = "memory");
        }
        Ok(())
    }

    async fn insert_suppliers(&self, suppliers: &[NewSupplier]) -> Result<Vec<i32>> {
        self.with_tables_mut(|tables| {
            for supplier in suppliers {
                validate_supplier(supplier)?;
            }
            Ok(suppliers
                .iter()
                .cloned()
                .map(|supplier| tables.push_supplier(supplier))
                .collect())
        })
    }

    async fn insert_materials(&self, materials: &[NewMaterial]) -> Result<Vec<i32>> {
        self.with_tables_mut(|tables| {
            let mut stored = Vec::with_capacity(materials.len());
            for material in materials {
                validate_material(material)?;
                stored.push(NewMaterial {
                    price: column_price(material.price)?,
                    ..material.clone()
                });
            }
            Ok(stored
                .into_iter()
                .map(|material| tables.push_material(material))
                .collect())
        })
    }

    async fn insert_deliveries(&self, deliveries: &[NewDelivery]) -> Result<Vec<i32>> {
        self.with_tables_mut(|tables| {
            for delivery in deliveries {
                validate_delivery(delivery)?;
                if !tables.suppliers.contains_key(&delivery.supplier_id) {
                    return Err(Error::Constraint(format!(
                        "deliveries.supplier_id {} has no matching supplier",
                        delivery.supplier_id
                    )));
                }
                if !tables.materials.contains_key(&delivery.material_id) {
                    return Err(Error::Constraint(format!(
                        "deliveries.material_id {} has no matching material",
                        delivery.material_id
                    )));
                }
            }
            Ok(deliveries
                .iter()
                .cloned()
                .map(|delivery| tables.push_delivery(delivery))
                .collect())
        })
    }

    async fn list_suppliers(&self) -> Result<Vec<Supplier>> {
        self.with_tables(|tables| tables.suppliers.values().cloned().collect())
    }

    async fn list_materials(&self) -> Result<Vec<Material>> {
        self.with_tables(|tables| tables.materials.values().cloned().collect())
    }

    async fn list_deliveries(&self) -> Result<Vec<Delivery>> {
        self.with_tables(|tables| tables.deliveries.values().cloned().collect())
    }

    async fn fast_deliveries(&self, max_days: i32) -> Result<Vec<FastDelivery>> {
        self.with_tables(|tables| {
            let mut rows: Vec<FastDelivery> = tables
                .joined()
                .filter(|row| row.delivery.delivery_days <= max_days)
                .map(|row| FastDelivery {
                    delivery_id: row.delivery.delivery_id,
                    company_name: row.supplier.company_name.clone(),
                    delivery_days: row.delivery.delivery_days,
                })
                .collect();
            rows.sort_by(|left, right| {
                left.company_name
                    .cmp(&right.company_name)
                    .then_with(|| left.delivery_id.cmp(&right.delivery_id))
            });
            rows
        })
    }

    async fn delivery_costs(&self) -> Result<Vec<DeliveryCost>> {
        self.with_tables(|tables| {
            tables
                .joined()
                .map(|row| DeliveryCost {
                    delivery_id: row.delivery.delivery_id,
                    total_amount: row.material.price * Decimal::from(row.delivery.quantity),
                })
                .collect()
        })
    }

    async fn deliveries_for_material(
        &self,
        material_name: &str,
    ) -> Result<Vec<MaterialDelivery>> {
        self.with_tables(|tables| {
            tables
                .joined()
                .filter(|row| row.material.material_name == material_name)
                .map(|row| MaterialDelivery {
                    delivery_id: row.delivery.delivery_id,
                    company_name: row.supplier.company_name.clone(),
                })
                .collect()
        })
    }

    async fn quantity_by_supplier_and_material(&self) -> Result<Vec<SupplierMaterialQuantity>> {
        self.with_tables(|tables| {
            let mut groups: BTreeMap<(&str, &str), i64> = BTreeMap::new();
            for row in tables.joined() {
                let key = (
                    row.supplier.company_name.as_str(),
                    row.material.material_name.as_str(),
                );
                *groups.entry(key).or_insert(0) += i64::from(row.delivery.quantity);
            }
            groups
                .into_iter()
                .map(
                    |((company_name, material_name), total_quantity)| SupplierMaterialQuantity {
                        company_name: company_name.to_string(),
                        material_name: material_name.to_string(),
                        total_quantity,
                    },
                )
                .collect()
        })
    }

    async fn quantity_by_material(&self) -> Result<Vec<MaterialQuantity>> {
        self.with_tables(|tables| {
            let mut groups: BTreeMap<&str, i64> = BTreeMap::new();
            for row in tables.joined() {
                *groups.entry(row.material.material_name.as_str()).or_insert(0) +=
                    i64::from(row.delivery.quantity);
            }
            groups
                .into_iter()
                .map(|(material_name, total_quantity)| MaterialQuantity {
                    material_name: material_name.to_string(),
                    total_quantity,
                })
                .collect()
        })
    }

    async fn delivery_count_by_supplier(&self) -> Result<Vec<SupplierDeliveryCount>> {
        self.with_tables(|tables| {
            let mut groups: BTreeMap<&str, i64> = BTreeMap::new();
            for row in tables.joined() {
                *groups.entry(row.supplier.company_name.as_str()).or_insert(0) += 1;
            }
            groups
                .into_iter()
                .map(|(company_name, total_deliveries)| SupplierDeliveryCount {
                    company_name: company_name.to_string(),
                    total_deliveries,
                })
                .collect()
        })
    }

    async fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
        debug!(event = "session_closed", engine = "memory");
    }
}
