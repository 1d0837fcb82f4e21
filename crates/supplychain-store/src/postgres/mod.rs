use std::time::{Duration, Instant};

use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Executor, PgPool};
use tracing::{debug, info};

use supplychain_core::{
    Delivery, DeliveryCost, Error, FastDelivery, Material, MaterialDelivery, MaterialQuantity,
    NewDelivery, NewMaterial, NewSupplier, Result, Supplier, SupplierDeliveryCount,
    SupplierMaterialQuantity, redact_database_url,
};

use crate::store::Store;

mod errors;
mod queries;
pub mod schema;

pub use errors::db_error;

/// Options for opening the Postgres session.
#[derive(Debug, Clone)]
pub struct PostgresOptions {
    /// How long to wait for the single connection before giving up.
    pub acquire_timeout: Duration,
    /// Namespace holding the tables. `None` uses the server's search path.
    pub schema: Option<String>,
}

impl Default for PostgresOptions {
    fn default() -> Self {
        Self {
            acquire_timeout: Duration::from_secs(10),
            schema: None,
        }
    }
}

/// Store backed by a PostgreSQL database.
///
/// Holds a pool capped at one connection, which is the run's only session.
#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
    schema: Option<String>,
}

impl PostgresStore {
    /// Open the session described by `database_url`.
    pub async fn connect(database_url: &str, opts: PostgresOptions) -> Result<Self> {
        if let Some(schema) = opts.schema.as_deref()
            && !schema::is_plain_identifier(schema)
        {
            return Err(Error::Config(format!(
                "schema name '{schema}' must be a plain identifier"
            )));
        }

        let mut pool_options = PgPoolOptions::new()
            .max_connections(1)
            .acquire_timeout(opts.acquire_timeout);

        if let Some(schema) = opts.schema.clone() {
            let statement = schema::search_path_statement(&schema);
            pool_options = pool_options.after_connect(move |conn, _meta| {
                let statement = statement.clone();
                Box::pin(async move {
                    conn.execute(statement.as_str()).await?;
                    Ok(())
                })
            });
        }

        let started = Instant::now();
        let pool = pool_options
            .connect(database_url)
            .await
            .map_err(errors::connect_error)?;

        info!(
            event = "session_opened",
            engine = "postgres",
            url = %redact_database_url(database_url),
            schema = opts.schema.as_deref().unwrap_or("<default>"),
            duration_ms = started.elapsed().as_millis() as u64,
        );

        Ok(Self::with_pool(pool, opts.schema))
    }

    /// Wrap a pre-configured pool.
    pub fn with_pool(pool: PgPool, schema: Option<String>) -> Self {
        Self { pool, schema }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl Store for PostgresStore {
    fn engine(&self) -> &'static str {
        "postgres"
    }

    async fn create_tables(&self) -> Result<()> {
        if let Some(schema) = self.schema.as_deref() {
            sqlx::query(&schema::create_schema_statement(schema))
                .execute(&self.pool)
                .await
                .map_err(db_error)?;
        }
        for statement in schema::TABLE_STATEMENTS {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .map_err(db_error)?;
        }
        debug!(event = "tables_ensured", tables = schema::TABLE_STATEMENTS.len());
        Ok(())
    }

    async fn insert_suppliers(&self, suppliers: &[NewSupplier]) -> Result<Vec<i32>> {
        let mut tx = self.pool.begin().await.map_err(db_error)?;
        let mut ids = Vec::with_capacity(suppliers.len());
        for supplier in suppliers {
            ids.push(queries::insert_supplier(&mut *tx, supplier).await?);
        }
        tx.commit().await.map_err(db_error)?;
        Ok(ids)
    }

    async fn insert_materials(&self, materials: &[NewMaterial]) -> Result<Vec<i32>> {
        let mut tx = self.pool.begin().await.map_err(db_error)?;
        let mut ids = Vec::with_capacity(materials.len());
        for material in materials {
            ids.push(queries::insert_material(&mut *tx, material).await?);
        }
        tx.commit().await.map_err(db_error)?;
        Ok(ids)
    }

    async fn insert_deliveries(&self, deliveries: &[NewDelivery]) -> Result<Vec<i32>> {
        let mut tx = self.pool.begin().await.map_err(db_error)?;
        let mut ids = Vec::with_capacity(deliveries.len());
        for delivery in deliveries {
            ids.push(queries::insert_delivery(&mut *tx, delivery).await?);
        }
        tx.commit().await.map_err(db_error)?;
        Ok(ids)
    }

    async fn list_suppliers(&self) -> Result<Vec<Supplier>> {
        queries::list_suppliers(&self.pool).await
    }

    async fn list_materials(&self) -> Result<Vec<Material>> {
        queries::list_materials(&self.pool).await
    }

    async fn list_deliveries(&self) -> Result<Vec<Delivery>> {
        queries::list_deliveries(&self.pool).await
    }

    async fn fast_deliveries(&self, max_days: i32) -> Result<Vec<FastDelivery>> {
        queries::fast_deliveries(&self.pool, max_days).await
    }

    async fn delivery_costs(&self) -> Result<Vec<DeliveryCost>> {
        queries::delivery_costs(&self.pool).await
    }

    async fn deliveries_for_material(
        &self,
        material_name: &str,
    ) -> Result<Vec<MaterialDelivery>> {
        queries::deliveries_for_material(&self.pool, material_name).await
    }

    async fn quantity_by_supplier_and_material(&self) -> Result<Vec<SupplierMaterialQuantity>> {
        queries::quantity_by_supplier_and_material(&self.pool).await
    }

    async fn quantity_by_material(&self) -> Result<Vec<MaterialQuantity>> {
        queries::quantity_by_material(&self.pool).await
    }

    async fn delivery_count_by_supplier(&self) -> Result<Vec<SupplierDeliveryCount>> {
        queries::delivery_count_by_supplier(&self.pool).await
    }

    async fn close(&self) {
        self.pool.close().await;
        info!(event = "session_closed", engine = "postgres");
    }
}
