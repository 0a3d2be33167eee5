use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, MathematicalOps, RoundingStrategy};

use crate::error::VectorError;

/// Number of significant digits kept by every arithmetic result.
pub const PRECISION: u32 = 15;

/// Magnitude below which a value is treated as zero (1e-10).
pub const DEFAULT_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 10);

/// Round a value to [`PRECISION`] significant digits, ties to even.
///
/// Values that cannot be represented with a non-negative scale after rounding are
/// returned untouched.
///
/// Example:
///
/// ```
/// use linsys_vector::scalar::round;
/// use rust_decimal::Decimal;
///
/// let third = Decimal::ONE / Decimal::from(3);
/// assert_eq!(round(third).to_string(), "0.333333333333333");
/// ```
pub fn round(value: Decimal) -> Decimal {
    value
        .round_sf_with_strategy(PRECISION, RoundingStrategy::MidpointNearestEven)
        .unwrap_or(value)
}

/// Rounded sum of two decimals.
///
/// Fails with [`VectorError::Overflow`] when the sum leaves the decimal range.
#[inline]
pub fn add(a: Decimal, b: Decimal) -> Result<Decimal, VectorError> {
    a.checked_add(b).map(round).ok_or(VectorError::Overflow)
}

/// Rounded difference of two decimals.
#[inline]
pub fn sub(a: Decimal, b: Decimal) -> Result<Decimal, VectorError> {
    a.checked_sub(b).map(round).ok_or(VectorError::Overflow)
}

/// Rounded product of two decimals.
///
/// Products finer than the smallest representable scale round towards zero.
#[inline]
pub fn mul(a: Decimal, b: Decimal) -> Result<Decimal, VectorError> {
    a.checked_mul(b).map(round).ok_or(VectorError::Overflow)
}

/// Rounded quotient of two decimals.
///
/// Fails with [`VectorError::DivisionByZero`] for a zero divisor and with
/// [`VectorError::Overflow`] when the quotient leaves the decimal range.
#[inline]
pub fn div(a: Decimal, b: Decimal) -> Result<Decimal, VectorError> {
    if b.is_zero() {
        return Err(VectorError::DivisionByZero);
    }
    a.checked_div(b).map(round).ok_or(VectorError::Overflow)
}

/// Rounded square root of a non-negative decimal.
///
/// Negative inputs have no real root and yield zero.
pub fn sqrt(value: Decimal) -> Decimal {
    value.sqrt().map(round).unwrap_or_default()
}

/// Check whether a value lies strictly within `tolerance` of zero.
#[inline]
pub fn is_near_zero(value: Decimal, tolerance: Decimal) -> bool {
    value.abs() < tolerance
}

/// Parse a decimal literal exactly.
///
/// Both plain (`"-2.5"`) and scientific (`"1e-9"`) notations are accepted.
pub fn parse(literal: &str) -> Result<Decimal, VectorError> {
    let literal = literal.trim();
    Decimal::from_str(literal)
        .or_else(|_| Decimal::from_scientific(literal))
        .map_err(|_| VectorError::InvalidCoordinate(literal.to_string()))
}

/// Convert a binary float into a decimal, keeping its binary expansion.
///
/// `0.1` becomes `0.1000000000000000055511151231`, the value the float actually holds,
/// truncated to the 28 decimal places a `Decimal` can carry. NaN, infinities and values
/// beyond the decimal range have no decimal representation.
pub fn from_f64(value: f64) -> Result<Decimal, VectorError> {
    if !value.is_finite() {
        return Err(VectorError::InvalidCoordinate(value.to_string()));
    }
    Decimal::from_f64_retain(value)
        .ok_or_else(|| VectorError::InvalidCoordinate(value.to_string()))
}

/// Convert a decimal into the nearest binary float.
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or_default()
}
