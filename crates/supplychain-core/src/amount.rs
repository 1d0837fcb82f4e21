use rust_decimal::{Decimal, RoundingStrategy};

/// Render a monetary amount with exactly two fraction digits.
pub fn format_amount(value: &Decimal) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{rounded:.2}")
}
