use std::time::Instant;

use tracing::{debug, info};

use supplychain_core::{
    DEFAULT_FAST_DELIVERY_DAYS, DEFAULT_SELECTED_MATERIAL, QueryReport, Result,
};

use crate::store::Store;

/// Parameters of the reporting queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryOptions {
    /// Lead time at or below which a delivery is listed as fast.
    pub fast_delivery_days: i32,
    /// Material name for the per-material delivery listing.
    pub selected_material: String,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            fast_delivery_days: DEFAULT_FAST_DELIVERY_DAYS,
            selected_material: DEFAULT_SELECTED_MATERIAL.to_string(),
        }
    }
}

/// Run the six reporting queries in order and collect their results.
///
/// All queries are reads; the first failure aborts the pass.
pub async fn run_query_set(store: &dyn Store, opts: &QueryOptions) -> Result<QueryReport> {
    let started = Instant::now();
    info!(
        event = "queries_started",
        engine = store.engine(),
        fast_delivery_days = opts.fast_delivery_days,
        selected_material = %opts.selected_material,
    );

    let fast_deliveries = store.fast_deliveries(opts.fast_delivery_days).await?;
    debug!(event = "query_finished", query = "fast_deliveries", rows = fast_deliveries.len());

    let delivery_costs = store.delivery_costs().await?;
    debug!(event = "query_finished", query = "delivery_costs", rows = delivery_costs.len());

    let material_deliveries = store
        .deliveries_for_material(&opts.selected_material)
        .await?;
    debug!(
        event = "query_finished",
        query = "deliveries_for_material",
        rows = material_deliveries.len()
    );

    let supplier_material_quantities = store.quantity_by_supplier_and_material().await?;
    debug!(
        event = "query_finished",
        query = "quantity_by_supplier_and_material",
        rows = supplier_material_quantities.len()
    );

    let material_quantities = store.quantity_by_material().await?;
    debug!(
        event = "query_finished",
        query = "quantity_by_material",
        rows = material_quantities.len()
    );

    let supplier_delivery_counts = store.delivery_count_by_supplier().await?;
    debug!(
        event = "query_finished",
        query = "delivery_count_by_supplier",
        rows = supplier_delivery_counts.len()
    );

    info!(
        event = "queries_finished",
        duration_ms = started.elapsed().as_millis() as u64
    );

    Ok(QueryReport {
        fast_delivery_days: opts.fast_delivery_days,
        fast_deliveries,
        delivery_costs,
        selected_material: opts.selected_material.clone(),
        material_deliveries,
        supplier_material_quantities,
        material_quantities,
        supplier_delivery_counts,
    })
}
