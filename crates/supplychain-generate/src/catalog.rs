use rust_decimal_macros::dec;

use supplychain_core::NewMaterial;

/// Fixed material catalog seeded into every fresh database.
pub fn material_catalog() -> Vec<NewMaterial> {
    vec![
        NewMaterial::new("Wood", dec!(10.00)),
        NewMaterial::new("Varnish", dec!(5.50)),
        NewMaterial::new("Steel Parts", dec!(15.00)),
    ]
}
