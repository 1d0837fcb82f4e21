use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool};

use supplychain_core::{
    Delivery, DeliveryCost, FastDelivery, Material, MaterialDelivery, MaterialQuantity,
    NewDelivery, NewMaterial, NewSupplier, Result, Supplier, SupplierDeliveryCount,
    SupplierMaterialQuantity,
};

use super::errors::db_error;

pub async fn insert_supplier(conn: &mut PgConnection, supplier: &NewSupplier) -> Result<i32> {
    sqlx::query_scalar::<_, i32>(
        r#"
        insert into suppliers (company_name, contact_person, phone, account_number)
        values ($1, $2, $3, $4)
        returning supplier_id
        "#,
    )
    .bind(&supplier.company_name)
    .bind(&supplier.contact_person)
    .bind(supplier.phone.as_deref())
    .bind(supplier.account_number.as_deref())
    .fetch_one(conn)
    .await
    .map_err(db_error)
}

pub async fn insert_material(conn: &mut PgConnection, material: &NewMaterial) -> Result<i32> {
    sqlx::query_scalar::<_, i32>(
        r#"
        insert into materials (material_name, price)
        values ($1, $2)
        returning material_id
        "#,
    )
    .bind(&material.material_name)
    .bind(material.price)
    .fetch_one(conn)
    .await
    .map_err(db_error)
}

pub async fn insert_delivery(conn: &mut PgConnection, delivery: &NewDelivery) -> Result<i32> {
    sqlx::query_scalar::<_, i32>(
        r#"
        insert into deliveries (delivery_date, supplier_id, material_id, delivery_days, quantity)
        values ($1, $2, $3, $4, $5)
        returning delivery_id
        "#,
    )
    .bind(delivery.delivery_date)
    .bind(delivery.supplier_id)
    .bind(delivery.material_id)
    .bind(delivery.delivery_days)
    .bind(delivery.quantity)
    .fetch_one(conn)
    .await
    .map_err(db_error)
}

pub async fn list_suppliers(pool: &PgPool) -> Result<Vec<Supplier>> {
    let rows = sqlx::query_as::<_, (i32, String, String, Option<String>, Option<String>)>(
        r#"
        select supplier_id, company_name, contact_person, phone, account_number
        from suppliers
        order by supplier_id
        "#,
    )
    .fetch_all(pool)
    .await
    .map_err(db_error)?;

    Ok(rows
        .into_iter()
        .map(
            |(supplier_id, company_name, contact_person, phone, account_number)| Supplier {
                supplier_id,
                company_name,
                contact_person,
                phone,
                account_number,
            },
        )
        .collect())
}

pub async fn list_materials(pool: &PgPool) -> Result<Vec<Material>> {
    let rows = sqlx::query_as::<_, (i32, String, Decimal)>(
        "select material_id, material_name, price from materials order by material_id",
    )
    .fetch_all(pool)
    .await
    .map_err(db_error)?;

    Ok(rows
        .into_iter()
        .map(|(material_id, material_name, price)| Material {
            material_id,
            material_name,
            price,
        })
        .collect())
}

pub async fn list_deliveries(pool: &PgPool) -> Result<Vec<Delivery>> {
    let rows = sqlx::query_as::<_, (i32, NaiveDate, i32, i32, i32, i32)>(
        r#"
        select delivery_id, delivery_date, supplier_id, material_id, delivery_days, quantity
        from deliveries
        order by delivery_id
        "#,
    )
    .fetch_all(pool)
    .await
    .map_err(db_error)?;

    Ok(rows
        .into_iter()
        .map(
            |(delivery_id, delivery_date, supplier_id, material_id, delivery_days, quantity)| {
                Delivery {
                    delivery_id,
                    delivery_date,
                    supplier_id,
                    material_id,
                    delivery_days,
                    quantity,
                }
            },
        )
        .collect())
}

pub async fn fast_deliveries(pool: &PgPool, max_days: i32) -> Result<Vec<FastDelivery>> {
    let rows = sqlx::query_as::<_, (i32, String, i32)>(
        r#"
        select d.delivery_id, s.company_name, d.delivery_days
        from deliveries d
        join suppliers s on s.supplier_id = d.supplier_id
        where d.delivery_days <= $1
        order by s.company_name collate "C", d.delivery_id
        "#,
    )
    .bind(max_days)
    .fetch_all(pool)
    .await
    .map_err(db_error)?;

    Ok(rows
        .into_iter()
        .map(|(delivery_id, company_name, delivery_days)| FastDelivery {
            delivery_id,
            company_name,
            delivery_days,
        })
        .collect())
}

pub async fn delivery_costs(pool: &PgPool) -> Result<Vec<DeliveryCost>> {
    let rows = sqlx::query_as::<_, (i32, Decimal)>(
        r#"
        select d.delivery_id, m.price * d.quantity as total_amount
        from deliveries d
        join materials m on m.material_id = d.material_id
        order by d.delivery_id
        "#,
    )
    .fetch_all(pool)
    .await
    .map_err(db_error)?;

    Ok(rows
        .into_iter()
        .map(|(delivery_id, total_amount)| DeliveryCost {
            delivery_id,
            total_amount,
        })
        .collect())
}

pub async fn deliveries_for_material(
    pool: &PgPool,
    material_name: &str,
) -> Result<Vec<MaterialDelivery>> {
    let rows = sqlx::query_as::<_, (i32, String)>(
        r#"
        select d.delivery_id, s.company_name
        from deliveries d
        join suppliers s on s.supplier_id = d.supplier_id
        join materials m on m.material_id = d.material_id
        where m.material_name = $1
        "#,
    )
    .bind(material_name)
    .fetch_all(pool)
    .await
    .map_err(db_error)?;

    Ok(rows
        .into_iter()
        .map(|(delivery_id, company_name)| MaterialDelivery {
            delivery_id,
            company_name,
        })
        .collect())
}

pub async fn quantity_by_supplier_and_material(
    pool: &PgPool,
) -> Result<Vec<SupplierMaterialQuantity>> {
    let rows = sqlx::query_as::<_, (String, String, i64)>(
        r#"
        select s.company_name, m.material_name, sum(d.quantity) as total_quantity
        from suppliers s
        join deliveries d on d.supplier_id = s.supplier_id
        join materials m on m.material_id = d.material_id
        group by s.company_name, m.material_name
        "#,
    )
    .fetch_all(pool)
    .await
    .map_err(db_error)?;

    Ok(rows
        .into_iter()
        .map(
            |(company_name, material_name, total_quantity)| SupplierMaterialQuantity {
                company_name,
                material_name,
                total_quantity,
            },
        )
        .collect())
}

pub async fn quantity_by_material(pool: &PgPool) -> Result<Vec<MaterialQuantity>> {
    let rows = sqlx::query_as::<_, (String, i64)>(
        r#"
        select m.material_name, sum(d.quantity) as total_quantity
        from materials m
        join deliveries d on d.material_id = m.material_id
        group by m.material_name
        "#,
    )
    .fetch_all(pool)
    .await
    .map_err(db_error)?;

    Ok(rows
        .into_iter()
        .map(|(material_name, total_quantity)| MaterialQuantity {
            material_name,
            total_quantity,
        })
        .collect())
}

pub async fn delivery_count_by_supplier(pool: &PgPool) -> Result<Vec<SupplierDeliveryCount>> {
    let rows = sqlx::query_as::<_, (String, i64)>(
        r#"
        select s.company_name, count(d.delivery_id) as total_deliveries
        from suppliers s
        join deliveries d on d.supplier_id = s.supplier_id
        group by s.company_name
        "#,
    )
    .fetch_all(pool)
    .await
    .map_err(db_error)?;

    Ok(rows
        .into_iter()
        .map(|(company_name, total_deliveries)| SupplierDeliveryCount {
            company_name,
            total_deliveries,
        })
        .collect())
}
