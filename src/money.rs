//! Price display helpers.
//!
//! Catalog prices are integers in minor currency units at a 1/10000 scale.

use rust_decimal::Decimal;

/// Decimal scale of upstream minor-unit prices.
pub const PRICE_SCALE: u32 = 4;

/// Format a minor-unit price as a dollar amount, e.g. `600000` -> `"$60.00"`.
#[must_use]
pub fn format_price(minor_units: u64) -> String {
    let amount = Decimal::from_i128_with_scale(i128::from(minor_units), PRICE_SCALE).round_dp(2);

    format!("${amount}")
}
