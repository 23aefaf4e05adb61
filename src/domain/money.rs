//! Conversions between stored minor units and exact decimal amounts.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

/// Number of fractional digits carried by every amount.
pub const CURRENCY_SCALE: u32 = 2;

/// Render an amount stored in cents as a decimal with two fractional digits.
pub fn cents_to_decimal(cents: i64) -> Decimal {
    Decimal::new(cents, CURRENCY_SCALE)
}

/// Convert a decimal amount into cents.
///
/// Returns `None` when the amount has more than two fractional digits or does
/// not fit into an `i64`.
pub fn decimal_to_cents(amount: Decimal) -> Option<i64> {
    if amount.normalize().scale() > CURRENCY_SCALE {
        return None;
    }
    amount.checked_mul(Decimal::ONE_HUNDRED)?.to_i64()
}

/// Average of `total_cents` over `count` items, rounded to cents.
pub fn average(total_cents: i64, count: i64) -> Decimal {
    if count <= 0 {
        return Decimal::ZERO.round_dp(CURRENCY_SCALE);
    }
    (cents_to_decimal(total_cents) / Decimal::from(count)).round_dp(CURRENCY_SCALE)
}
