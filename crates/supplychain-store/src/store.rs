use async_trait::async_trait;

use supplychain_core::{
    Delivery, DeliveryCost, FastDelivery, Material, MaterialDelivery, MaterialQuantity,
    NewDelivery, NewMaterial, NewSupplier, Result, Supplier, SupplierDeliveryCount,
    SupplierMaterialQuantity,
};

/// Trait implemented by backends that hold the supply-chain tables.
///
/// Insert methods take a whole batch and commit it at once; they return the
/// identities assigned to the rows, in input order.
#[async_trait]
pub trait Store: Send + Sync {
    /// Returns the engine identifier (e.g. `postgres`).
    fn engine(&self) -> &'static str;

    /// Create the three tables if they do not exist yet. Never touches rows.
    async fn create_tables(&self) -> Result<()>;

    async fn insert_suppliers(&self, suppliers: &[NewSupplier]) -> Result<Vec<i32>>;

    async fn insert_materials(&self, materials: &[NewMaterial]) -> Result<Vec<i32>>;

    async fn insert_deliveries(&self, deliveries: &[NewDelivery]) -> Result<Vec<i32>>;

    async fn list_suppliers(&self) -> Result<Vec<Supplier>>;

    async fn list_materials(&self) -> Result<Vec<Material>>;

    async fn list_deliveries(&self) -> Result<Vec<Delivery>>;

    /// Deliveries with `delivery_days <= max_days`, ordered by supplier name.
    async fn fast_deliveries(&self, max_days: i32) -> Result<Vec<FastDelivery>>;

    /// `price * quantity` for every delivery.
    async fn delivery_costs(&self) -> Result<Vec<DeliveryCost>>;

    /// Deliveries whose material name equals `material_name`.
    async fn deliveries_for_material(&self, material_name: &str)
    -> Result<Vec<MaterialDelivery>>;

    /// Sum of quantity grouped by (supplier name, material name).
    async fn quantity_by_supplier_and_material(&self) -> Result<Vec<SupplierMaterialQuantity>>;

    /// Sum of quantity grouped by material name.
    async fn quantity_by_material(&self) -> Result<Vec<MaterialQuantity>>;

    /// Number of deliveries grouped by supplier name.
    async fn delivery_count_by_supplier(&self) -> Result<Vec<SupplierDeliveryCount>>;

    /// Release the session. Called exactly once, at the end of a run.
    async fn close(&self);
}
