//! Money parsing and display in minor currency units (cents)

use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use super::result::ValidationError;

/// Minor units per major unit
pub const CENTS_PER_UNIT: u64 = 100;

/// Parse a user-entered amount into cents.
///
/// Accepts `100`, `100.50`, `100,50` and scientific notation. The value is
/// rounded half-to-even to a whole cent.
pub fn parse_amount(raw: &str) -> Result<u64, ValidationError> {
    let normalized = raw.trim().replace(',', ".");

    let lowered = normalized.trim_start_matches(&['+', '-'][..]).to_ascii_lowercase();
    if matches!(lowered.as_str(), "nan" | "snan" | "inf" | "infinity") {
        return Err(ValidationError::NotFinite);
    }

    let value = Decimal::from_str(&normalized)
        .or_else(|_| Decimal::from_scientific(&normalized))
        .map_err(|_| ValidationError::NotANumber)?;

    if value.is_zero() {
        return Ok(0);
    }
    if value.is_sign_negative() {
        return Err(ValidationError::Negative);
    }

    let cents = value
        .checked_mul(Decimal::from(CENTS_PER_UNIT))
        .ok_or(ValidationError::TooLarge)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven);

    cents.to_u64().ok_or(ValidationError::TooLarge)
}

/// Format cents as `integer "." two-digit-fraction`; amounts are never negative
pub fn format_balance(cents: u64) -> String {
    format!("{}.{:02}", cents / CENTS_PER_UNIT, cents % CENTS_PER_UNIT)
}
