//! Unit scaling between whole tokens and base units.
//!
//! Ledger arithmetic is pure `u128` base units; payout division must
//! truncate, so no decimal type is used in the accounting path. The
//! conversions here exist for configuration ergonomics and human-readable
//! log output.

use rust_decimal::Decimal;

use crate::constants::{TOKEN_DECIMALS, TOKEN_MULTIPLIER};

/// Convert a whole-token count to base units.
///
/// The argument is `u64` so the product cannot overflow `u128`.
#[must_use]
pub fn whole_tokens(n: u64) -> u128 {
    u128::from(n) * TOKEN_MULTIPLIER
}

/// Convert base units to a whole-token `Decimal` for display.
///
/// Returns `None` when the amount exceeds `Decimal`'s 96-bit mantissa;
/// callers fall back to raw base units in that case.
#[must_use]
pub fn to_decimal_tokens(base_units: u128) -> Option<Decimal> {
    let signed = i128::try_from(base_units).ok()?;
    Decimal::try_from_i128_with_scale(signed, TOKEN_DECIMALS).ok()
}

/// Human-readable token amount for log lines: whole tokens when the value
/// fits `Decimal`, raw base units otherwise.
#[must_use]
pub fn display_tokens(base_units: u128) -> String {
    match to_decimal_tokens(base_units) {
        Some(d) => format!("{}", d.normalize()),
        None => format!("{base_units}bu"),
    }
}
