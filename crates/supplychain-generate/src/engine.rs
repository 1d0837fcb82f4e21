use std::time::Instant;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::info;

use supplychain_core::{NewDelivery, NewMaterial, NewSupplier};
use supplychain_store::Store;

use crate::catalog::material_catalog;
use crate::errors::GenerationError;
use crate::model::{SeedOptions, SeedReport};
use crate::rows::{generate_deliveries, generate_suppliers};

/// Deterministic source of seed rows.
///
/// Suppliers and deliveries draw from separate streams, so changing the
/// supplier count does not reshuffle delivery values for the same parents.
#[derive(Debug, Clone)]
pub struct SeedGenerator {
    options: SeedOptions,
}

impl SeedGenerator {
    pub fn new(options: SeedOptions) -> Result<Self, GenerationError> {
        options.validate()?;
        Ok(Self { options })
    }

    pub fn options(&self) -> &SeedOptions {
        &self.options
    }

    pub fn suppliers(&self) -> Vec<NewSupplier> {
        let mut rng = self.stream("suppliers");
        generate_suppliers(self.options.suppliers, &mut rng)
    }

    pub fn materials(&self) -> Vec<NewMaterial> {
        material_catalog()
    }

    pub fn deliveries(
        &self,
        supplier_ids: &[i32],
        material_ids: &[i32],
    ) -> Result<Vec<NewDelivery>, GenerationError> {
        let mut rng = self.stream("deliveries");
        generate_deliveries(supplier_ids, material_ids, &self.options, &mut rng)
    }

    fn stream(&self, entity: &str) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(hash_seed(self.options.seed, entity))
    }
}

/// Populate `store` with one batch per table.
///
/// Suppliers and materials are committed first; their identities are then
/// read back from the store and used as the delivery foreign keys.
pub async fn seed_store(
    store: &dyn Store,
    generator: &SeedGenerator,
) -> Result<SeedReport, GenerationError> {
    let started = Instant::now();
    let seed = generator.options().seed;
    info!(event = "seed_started", engine = store.engine(), seed);

    let supplier_ids = store.insert_suppliers(&generator.suppliers()).await?;
    info!(event = "table_seeded", table = "suppliers", rows = supplier_ids.len());

    let material_ids = store.insert_materials(&generator.materials()).await?;
    info!(event = "table_seeded", table = "materials", rows = material_ids.len());

    let stored_suppliers: Vec<i32> = store
        .list_suppliers()
        .await?
        .into_iter()
        .map(|supplier| supplier.supplier_id)
        .collect();
    let stored_materials: Vec<i32> = store
        .list_materials()
        .await?
        .into_iter()
        .map(|material| material.material_id)
        .collect();

    let deliveries = generator.deliveries(&stored_suppliers, &stored_materials)?;
    let delivery_ids = store.insert_deliveries(&deliveries).await?;
    info!(event = "table_seeded", table = "deliveries", rows = delivery_ids.len());

    let report = SeedReport {
        seed,
        suppliers: supplier_ids.len(),
        materials: material_ids.len(),
        deliveries: delivery_ids.len(),
        duration_ms: started.elapsed().as_millis() as u64,
    };
    info!(
        event = "seed_finished",
        suppliers = report.suppliers,
        materials = report.materials,
        deliveries = report.deliveries,
        duration_ms = report.duration_ms,
    );
    Ok(report)
}

fn hash_seed(seed: u64, key: &str) -> u64 {
    let mut hash = seed ^ 0xcbf29ce484222325;
    for byte in key.as_bytes() {
        hash ^= *byte as u64;
        hash = hash.wrapping_mul(0x100000001b3);
    }
    hash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_streams_differ() {
        assert_ne!(hash_seed(42, "suppliers"), hash_seed(42, "deliveries"));
        assert_ne!(hash_seed(1, "suppliers"), hash_seed(2, "suppliers"));
    }

    #[test]
    fn rejects_zero_quantity_ceiling() {
        let options = SeedOptions {
            max_quantity: 0,
            ..SeedOptions::default()
        };
        assert!(matches!(
            SeedGenerator::new(options),
            Err(GenerationError::InvalidOptions(_))
        ));
    }
}
