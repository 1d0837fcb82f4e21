use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use supplychain_core::{Delivery, ErrorKind};
use supplychain_generate::{GenerationError, SeedGenerator, SeedOptions, seed_store};
use supplychain_store::{MemoryStore, QueryOptions, Store, run_query_set};

fn options(seed: u64) -> SeedOptions {
    SeedOptions {
        seed,
        today: NaiveDate::from_ymd_opt(2024, 10, 15).unwrap(),
        ..SeedOptions::default()
    }
}

async fn seeded(seed: u64) -> MemoryStore {
    let store = MemoryStore::new();
    store.create_tables().await.expect("create tables");
    let generator = SeedGenerator::new(options(seed)).expect("valid options");
    seed_store(&store, &generator).await.expect("seed store");
    store
}

#[tokio::test]
async fn seeds_default_row_counts() {
    let store = MemoryStore::new();
    store.create_tables().await.unwrap();
    let generator = SeedGenerator::new(options(1)).unwrap();
    let report = seed_store(&store, &generator).await.unwrap();

    assert_eq!(report.suppliers, 4);
    assert_eq!(report.materials, 3);
    assert_eq!(report.deliveries, 22);
    assert_eq!(store.list_deliveries().await.unwrap().len(), 22);

    let names: Vec<String> = store
        .list_materials()
        .await
        .unwrap()
        .into_iter()
        .map(|material| material.material_name)
        .collect();
    assert_eq!(names, vec!["Wood", "Varnish", "Steel Parts"]);
}

#[tokio::test]
async fn seeded_deliveries_reference_stored_parents() {
    let store = seeded(2).await;
    let suppliers: Vec<i32> = store
        .list_suppliers()
        .await
        .unwrap()
        .iter()
        .map(|supplier| supplier.supplier_id)
        .collect();
    let materials: Vec<i32> = store
        .list_materials()
        .await
        .unwrap()
        .iter()
        .map(|material| material.material_id)
        .collect();

    let earliest = NaiveDate::from_ymd_opt(2024, 9, 15).unwrap();
    let today = NaiveDate::from_ymd_opt(2024, 10, 15).unwrap();
    for delivery in store.list_deliveries().await.unwrap() {
        assert!(suppliers.contains(&delivery.supplier_id));
        assert!(materials.contains(&delivery.material_id));
        assert!((1..=7).contains(&delivery.delivery_days));
        assert!((1..=100).contains(&delivery.quantity));
        assert!(delivery.delivery_date >= earliest && delivery.delivery_date <= today);
    }
}

#[tokio::test]
async fn same_seed_reproduces_rows() {
    let first = seeded(77).await;
    let second = seeded(77).await;
    assert_eq!(
        first.list_suppliers().await.unwrap(),
        second.list_suppliers().await.unwrap()
    );
    assert_eq!(
        first.list_deliveries().await.unwrap(),
        second.list_deliveries().await.unwrap()
    );

    let other = seeded(78).await;
    assert_ne!(
        first.list_deliveries().await.unwrap(),
        other.list_deliveries().await.unwrap()
    );
}

#[tokio::test]
async fn report_aggregates_match_stored_rows() {
    let store = seeded(3).await;
    let deliveries: Vec<Delivery> = store.list_deliveries().await.unwrap();
    let prices: HashMap<i32, (String, Decimal)> = store
        .list_materials()
        .await
        .unwrap()
        .into_iter()
        .map(|material| {
            (
                material.material_id,
                (material.material_name, material.price),
            )
        })
        .collect();
    let suppliers: HashMap<i32, String> = store
        .list_suppliers()
        .await
        .unwrap()
        .into_iter()
        .map(|supplier| (supplier.supplier_id, supplier.company_name))
        .collect();

    let report = run_query_set(&store, &QueryOptions::default()).await.unwrap();

    for cost in &report.delivery_costs {
        let delivery = deliveries
            .iter()
            .find(|delivery| delivery.delivery_id == cost.delivery_id)
            .unwrap();
        let (_, price) = &prices[&delivery.material_id];
        assert_eq!(cost.total_amount, *price * Decimal::from(delivery.quantity));
        assert_eq!(cost.total_display().split('.').nth(1).map(str::len), Some(2));
    }

    let mut expected_per_material: BTreeMap<String, i64> = BTreeMap::new();
    let mut expected_per_supplier: BTreeMap<String, i64> = BTreeMap::new();
    for delivery in &deliveries {
        let (name, _) = &prices[&delivery.material_id];
        *expected_per_material.entry(name.clone()).or_default() += i64::from(delivery.quantity);
        *expected_per_supplier
            .entry(suppliers[&delivery.supplier_id].clone())
            .or_default() += 1;
    }
    let per_material: BTreeMap<String, i64> = report
        .material_quantities
        .iter()
        .map(|row| (row.material_name.clone(), row.total_quantity))
        .collect();
    let per_supplier: BTreeMap<String, i64> = report
        .supplier_delivery_counts
        .iter()
        .map(|row| (row.company_name.clone(), row.total_deliveries))
        .collect();
    assert_eq!(per_material, expected_per_material);
    assert_eq!(per_supplier, expected_per_supplier);

    assert!(
        report
            .fast_deliveries
            .windows(2)
            .all(|pair| pair[0].company_name <= pair[1].company_name)
    );
    assert!(report.fast_deliveries.iter().all(|row| row.delivery_days <= 3));
}

#[tokio::test]
async fn seeding_without_tables_surfaces_store_error() {
    let store = MemoryStore::new();
    let generator = SeedGenerator::new(options(4)).unwrap();
    let err = seed_store(&store, &generator).await.unwrap_err();
    match err {
        GenerationError::Store(inner) => assert_eq!(inner.kind(), ErrorKind::Query),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn zero_suppliers_cannot_seed_deliveries() {
    let store = MemoryStore::new();
    store.create_tables().await.unwrap();
    let generator = SeedGenerator::new(SeedOptions {
        suppliers: 0,
        ..options(5)
    })
    .unwrap();
    let err = seed_store(&store, &generator).await.unwrap_err();
    assert!(matches!(err, GenerationError::NoParents("suppliers")));
}
