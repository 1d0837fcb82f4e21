use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{Error, Result};
use crate::model::{NewDelivery, NewMaterial, NewSupplier};

/// Width of the `phone` and `account_number` columns.
pub const SHORT_TEXT_LEN: usize = 20;
/// Width of the name columns.
pub const NAME_LEN: usize = 255;

/// Scale of the `price` column.
pub const PRICE_SCALE: u32 = 2;
/// `numeric(10, 2)` holds magnitudes strictly below this.
const PRICE_LIMIT: i64 = 100_000_000;

/// Check a supplier against the column types of the `suppliers` table.
pub fn validate_supplier(supplier: &NewSupplier) -> Result<()> {
    check_len("suppliers.company_name", &supplier.company_name, NAME_LEN)?;
    check_len("suppliers.contact_person", &supplier.contact_person, NAME_LEN)?;
    if let Some(phone) = &supplier.phone {
        check_len("suppliers.phone", phone, SHORT_TEXT_LEN)?;
    }
    if let Some(account) = &supplier.account_number {
        check_len("suppliers.account_number", account, SHORT_TEXT_LEN)?;
    }
    Ok(())
}

/// Check a material against the column types of the `materials` table.
pub fn validate_material(material: &NewMaterial) -> Result<()> {
    check_len("materials.material_name", &material.material_name, NAME_LEN)?;
    column_price(material.price)?;
    Ok(())
}

/// The value a `numeric(10, 2)` price column stores for `price`.
///
/// Extra fraction digits are rounded half away from zero and the result
/// always carries two fraction digits.
pub fn column_price(price: Decimal) -> Result<Decimal> {
    let mut stored =
        price.round_dp_with_strategy(PRICE_SCALE, RoundingStrategy::MidpointAwayFromZero);
    stored.rescale(PRICE_SCALE);
    if stored.abs() >= Decimal::from(PRICE_LIMIT) {
        return Err(Error::Constraint(format!(
            "materials.price overflows numeric(10, 2), got {price}"
        )));
    }
    if stored.is_sign_negative() && !stored.is_zero() {
        return Err(Error::Constraint(format!(
            "materials.price must be non-negative, got {price}"
        )));
    }
    Ok(stored)
}

/// Check the positive-integer invariants of a delivery.
///
/// Foreign keys are not checked here; that needs the stored parents.
pub fn validate_delivery(delivery: &NewDelivery) -> Result<()> {
    if delivery.delivery_days < 1 {
        return Err(Error::Constraint(format!(
            "deliveries.delivery_days must be positive, got {}",
            delivery.delivery_days
        )));
    }
    if delivery.quantity < 1 {
        return Err(Error::Constraint(format!(
            "deliveries.quantity must be positive, got {}",
            delivery.quantity
        )));
    }
    Ok(())
}

fn check_len(column: &str, value: &str, max: usize) -> Result<()> {
    let len = value.chars().count();
    if len > max {
        return Err(Error::Constraint(format!(
            "{column} allows {max} characters, got {len}"
        )));
    }
    Ok(())
}
