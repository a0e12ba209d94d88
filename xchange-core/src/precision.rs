//! Decimal-place precision helpers.
//!
//! Exchanges publish precision either as a step string (`"0.00100000"`) or as a digit count.
//! The catalog stores decimal places; these helpers convert and round against them.

use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

/// Rounding mode for precision calculations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RoundingMode {
    /// Rounds to nearest, ties away from zero
    #[default]
    Round,
    /// Rounds toward zero
    Truncate,
}

/// Converts a decimal to string, dropping trailing zeros.
///
/// ```
/// use xchange_core::precision::number_to_string;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(number_to_string(dec!(0.00100000)), "0.001");
/// assert_eq!(number_to_string(dec!(1200)), "1200");
/// ```
pub fn number_to_string(value: Decimal) -> String {
    value.normalize().to_string()
}

/// Number of decimal places expressed by a step string.
///
/// ```
/// use xchange_core::precision::precision_from_string;
///
/// assert_eq!(precision_from_string("0.00100000"), 3);
/// assert_eq!(precision_from_string("0.00000100"), 6);
/// assert_eq!(precision_from_string("1"), 0);
/// assert_eq!(precision_from_string("1e-8"), 8);
/// ```
pub fn precision_from_string(s: &str) -> u32 {
    if let Some(e_pos) = s.find(['e', 'E']) {
        if let Ok(exp) = s[e_pos + 1..].parse::<i32>() {
            return exp.min(0).unsigned_abs();
        }
    }

    let trimmed = s.trim_end_matches('0');
    match trimmed.find('.') {
        Some(dot_pos) => u32::try_from(trimmed.len() - dot_pos - 1).unwrap_or(u32::MAX),
        None => 0,
    }
}

/// Rounds `value` to `places` decimal places.
pub fn to_places(value: Decimal, places: u32, mode: RoundingMode) -> Decimal {
    let strategy = match mode {
        RoundingMode::Round => RoundingStrategy::MidpointAwayFromZero,
        RoundingMode::Truncate => RoundingStrategy::ToZero,
    };
    value.round_dp_with_strategy(places, strategy)
}

/// Truncates `value` to `places` decimal places.
///
/// ```
/// use xchange_core::precision::truncate;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(truncate(dec!(123.456789), 2), dec!(123.45));
/// ```
pub fn truncate(value: Decimal, places: u32) -> Decimal {
    to_places(value, places, RoundingMode::Truncate)
}

/// Parses a decimal from a string that may use scientific notation.
pub fn parse_decimal_str(s: &str) -> Option<Decimal> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    Decimal::from_str(s)
        .ok()
        .or_else(|| Decimal::from_scientific(s).ok())
}
