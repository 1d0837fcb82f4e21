use chrono::{Days, NaiveDate};
use fake::Fake;
use fake::faker::company::en::CompanyName;
use fake::faker::name::en::Name;
use fake::faker::phone_number::en::PhoneNumber;
use rand::Rng;

use supplychain_core::validation::SHORT_TEXT_LEN;
use supplychain_core::{NewDelivery, NewSupplier};

use crate::errors::GenerationError;
use crate::model::SeedOptions;

pub fn generate_supplier<R: Rng + ?Sized>(rng: &mut R) -> NewSupplier {
    let company_name: String = CompanyName().fake_with_rng(rng);
    let contact_person: String = Name().fake_with_rng(rng);
    let phone: String = PhoneNumber().fake_with_rng(rng);
    let account_number = rng.random_range(1000..=9999);

    NewSupplier {
        company_name,
        contact_person,
        phone: Some(strip_extension(&phone)),
        account_number: Some(account_number.to_string()),
    }
}

pub fn generate_suppliers<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Vec<NewSupplier> {
    (0..count).map(|_| generate_supplier(rng)).collect()
}

/// Build one delivery against already stored parents.
pub fn generate_delivery<R: Rng + ?Sized>(
    supplier_ids: &[i32],
    material_ids: &[i32],
    opts: &SeedOptions,
    rng: &mut R,
) -> Result<NewDelivery, GenerationError> {
    let supplier_id = pick(supplier_ids, rng).ok_or(GenerationError::NoParents("suppliers"))?;
    let material_id = pick(material_ids, rng).ok_or(GenerationError::NoParents("materials"))?;
    let offset = rng.random_range(0..=opts.window_days);
    let delivery_date = window_day(opts.today, offset)?;

    Ok(NewDelivery {
        delivery_date,
        supplier_id,
        material_id,
        delivery_days: rng.random_range(1..=opts.max_delivery_days),
        quantity: rng.random_range(1..=opts.max_quantity),
    })
}

pub fn generate_deliveries<R: Rng + ?Sized>(
    supplier_ids: &[i32],
    material_ids: &[i32],
    opts: &SeedOptions,
    rng: &mut R,
) -> Result<Vec<NewDelivery>, GenerationError> {
    (0..opts.deliveries)
        .map(|_| generate_delivery(supplier_ids, material_ids, opts, rng))
        .collect()
}

/// Drop an `x123`-style extension and fit the phone column.
pub fn strip_extension(phone: &str) -> String {
    let base = phone
        .split(['x', 'X'])
        .next()
        .unwrap_or_default()
        .trim();
    base.chars().take(SHORT_TEXT_LEN).collect()
}

fn pick<R: Rng + ?Sized>(ids: &[i32], rng: &mut R) -> Option<i32> {
    if ids.is_empty() {
        return None;
    }
    Some(ids[rng.random_range(0..ids.len())])
}

fn window_day(today: NaiveDate, offset: u64) -> Result<NaiveDate, GenerationError> {
    today.checked_sub_days(Days::new(offset)).ok_or_else(|| {
        GenerationError::InvalidOptions(format!("{today} minus {offset} days is out of range"))
    })
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    #[test]
    fn strips_extension_suffix() {
        assert_eq!(strip_extension("555-123-4567x890"), "555-123-4567");
        assert_eq!(strip_extension("(555) 123-4567 x12"), "(555) 123-4567");
        assert_eq!(strip_extension("+1-555-123-4567"), "+1-555-123-4567");
    }

    #[test]
    fn truncates_to_column_width() {
        assert_eq!(strip_extension(&"9".repeat(30)).len(), SHORT_TEXT_LEN);
    }

    #[test]
    fn supplier_fields_are_filled() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let supplier = generate_supplier(&mut rng);
        assert!(!supplier.company_name.is_empty());
        assert!(!supplier.contact_person.is_empty());

        let phone = supplier.phone.unwrap();
        assert!(!phone.contains('x'));
        assert!(phone.chars().count() <= SHORT_TEXT_LEN);

        let account: u32 = supplier.account_number.unwrap().parse().unwrap();
        assert!((1000..=9999).contains(&account));
    }

    #[test]
    fn empty_parents_are_an_error() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let opts = SeedOptions::default();
        let err = generate_delivery(&[], &[1], &opts, &mut rng).unwrap_err();
        assert!(matches!(err, GenerationError::NoParents("suppliers")));
        let err = generate_delivery(&[1], &[], &opts, &mut rng).unwrap_err();
        assert!(matches!(err, GenerationError::NoParents("materials")));
    }

    #[test]
    fn deliveries_stay_within_ranges() {
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        let opts = SeedOptions {
            deliveries: 500,
            today: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            ..SeedOptions::default()
        };
        let earliest = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        let deliveries = generate_deliveries(&[3, 5], &[10, 11, 12], &opts, &mut rng).unwrap();

        assert_eq!(deliveries.len(), 500);
        for delivery in &deliveries {
            assert!([3, 5].contains(&delivery.supplier_id));
            assert!([10, 11, 12].contains(&delivery.material_id));
            assert!((1..=7).contains(&delivery.delivery_days));
            assert!((1..=100).contains(&delivery.quantity));
            assert!(delivery.delivery_date >= earliest);
            assert!(delivery.delivery_date <= opts.today);
        }
    }

    #[test]
    fn same_rng_state_gives_same_rows() {
        let opts = SeedOptions {
            today: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            ..SeedOptions::default()
        };
        let first = generate_deliveries(&[1, 2], &[1, 2, 3], &opts, &mut ChaCha8Rng::seed_from_u64(5))
            .unwrap();
        let second =
            generate_deliveries(&[1, 2], &[1, 2, 3], &opts, &mut ChaCha8Rng::seed_from_u64(5))
                .unwrap();
        assert_eq!(first, second);
    }
}
