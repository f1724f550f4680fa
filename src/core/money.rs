//! Money handling - exact decimal amounts and their storage encoding.
//!
//! Amounts travel through the crate as [`Decimal`] and are persisted as integer
//! cents. Floating point appears only in [`to_chart_value`], for display.

use crate::errors::{Error, Result};
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal::prelude::ToPrimitive;
use std::str::FromStr;

/// Maximum number of fractional digits an amount may carry.
pub const DECIMAL_PLACES: u32 = 2;

/// Exclusive upper bound for amounts: ten digits in total, two of them fractional.
pub const AMOUNT_LIMIT: Decimal = Decimal::from_parts(100_000_000, 0, 0, false, 0);

/// Builds an exact amount from a number of cents.
#[must_use]
pub fn from_cents(cents: i64) -> Decimal {
    Decimal::new(cents, DECIMAL_PLACES)
}

/// Validates an amount and converts it to cents for storage.
///
/// # Errors
/// Returns [`Error::InvalidAmount`] when the amount is negative, has more than
/// two fractional digits, or does not fit in ten digits.
pub fn to_cents(amount: Decimal) -> Result<i64> {
    if amount < Decimal::ZERO
        || amount.normalize().scale() > DECIMAL_PLACES
        || amount >= AMOUNT_LIMIT
    {
        return Err(Error::InvalidAmount { amount });
    }

    (amount * Decimal::ONE_HUNDRED)
        .trunc()
        .to_i64()
        .ok_or_else(|| Error::InvalidAmount { amount })
}

/// Parses user-supplied text such as `"12.50"` or `"$12.50"` into an amount.
///
/// Only parsing happens here; range checks are done by [`to_cents`].
pub fn parse_amount(input: &str) -> Result<Decimal> {
    let cleaned = input.trim().trim_start_matches('$').replace(',', "");
    Decimal::from_str(&cleaned).map_err(|_| Error::Validation {
        message: format!("Amount must be a number, got '{}'", input.trim()),
    })
}

/// Rounds to cents, midpoint away from zero. Use only for display.
#[must_use]
pub fn round_to_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Sums amounts exactly; an empty input sums to zero.
pub fn sum<I>(amounts: I) -> Decimal
where
    I: IntoIterator<Item = Decimal>,
{
    amounts.into_iter().fold(Decimal::ZERO, |acc, amount| acc + amount)
}

/// Converts an amount to `f64` for charting. Never feed the result back into sums.
#[must_use]
pub fn to_chart_value(amount: Decimal) -> f64 {
    amount.to_f64().unwrap_or(0.0)
}
