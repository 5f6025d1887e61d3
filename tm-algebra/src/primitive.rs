//! Functions to construct [`Integer`]s, [`Rational`]s and [`Float`]s from various types.

use once_cell::sync::Lazy;
use rug::{float::Constant, Assign, Float, Integer, Rational};

/// The number of bits of precision to use when computing floating-point values.
pub const PRECISION: u32 = 1 << 9;

/// The value of pi, computed once at [`PRECISION`] bits.
pub static PI: Lazy<Float> = Lazy::new(|| Float::with_val(PRECISION, Constant::Pi));

/// Creates an [`Integer`] with the given value.
pub fn int<T>(n: T) -> Integer
where
    Integer: From<T>,
{
    Integer::from(n)
}

/// Creates an [`Integer`] from a string slice of decimal digits, with an optional leading `-`.
pub fn int_from_str(s: &str) -> Option<Integer> {
    Integer::from_str_radix(s, 10).ok()
}

/// Creates a [`Rational`] from a numerator and a denominator. Returns [`None`] if the denominator
/// is zero.
pub fn rational(numerator: Integer, denominator: Integer) -> Option<Rational> {
    if denominator.is_zero() {
        None
    } else {
        Some(Rational::from((numerator, denominator)))
    }
}

/// Creates a [`Float`] with the given value.
pub fn float<T>(n: T) -> Float
where
    Float: Assign<T>,
{
    Float::with_val(PRECISION, n)
}

/// Creates a [`Float`] from a string slice, such as `3.25`.
pub fn float_from_str(s: &str) -> Option<Float> {
    Float::parse(s).ok().map(float)
}

/// Converts a decimal literal such as `0.25` into the exact [`Rational`] it denotes.
pub fn rational_from_decimal_str(s: &str) -> Option<Rational> {
    let (whole, fraction) = s.split_once('.').unwrap_or((s, ""));
    let digits = int_from_str(&format!("{}{}", whole, fraction))?;
    let scale = Integer::from(Integer::u_pow_u(10, fraction.len() as u32));
    rational(digits, scale)
}
