//! Exact and inexact numbers, and the arithmetic between them.
//!
//! Every numeric [`Primary`] of a [`SymExpr`] can be viewed as a [`Number`]. Arithmetic between
//! two [`Number`]s stays exact unless one side is a [`Number::Float`], in which case the result is
//! promoted to a [`Number::Float`].

use crate::{expr::{Primary, SymExpr}, primitive::{float, int}};
use rug::{ops::Pow, Float, Integer, Rational};
use std::ops::{Add, Mul, Neg};

/// The largest number of bits an exact power is allowed to produce. Larger powers are left
/// unevaluated.
const MAX_POWER_BITS: u64 = 1 << 16;

/// A numeric value.
#[derive(Debug, Clone, PartialEq)]
pub enum Number {
    Integer(Integer),
    Rational(Rational),
    Float(Float),
}

impl Number {
    /// Views the expression as a number, if it is one.
    pub fn from_expr(expr: &SymExpr) -> Option<Self> {
        match expr {
            SymExpr::Primary(Primary::Integer(n)) => Some(Self::Integer(n.clone())),
            SymExpr::Primary(Primary::Rational(n)) => Some(Self::Rational(n.clone())),
            SymExpr::Primary(Primary::Float(n)) => Some(Self::Float(n.clone())),
            _ => None,
        }
    }

    /// Converts the number into an expression, demoting rationals with denominator `1` to
    /// integers.
    pub fn into_expr(self) -> SymExpr {
        match self.normalize() {
            Self::Integer(n) => SymExpr::Primary(Primary::Integer(n)),
            Self::Rational(n) => SymExpr::Primary(Primary::Rational(n)),
            Self::Float(n) => SymExpr::Primary(Primary::Float(n)),
        }
    }

    /// Demotes a rational with denominator `1` to an integer.
    pub fn normalize(self) -> Self {
        match self {
            Self::Rational(n) if *n.denom() == 1 => Self::Integer(n.into_numer_denom().0),
            other => other,
        }
    }

    /// Returns true if the number is zero.
    pub fn is_zero(&self) -> bool {
        match self {
            Self::Integer(n) => n.is_zero(),
            Self::Rational(n) => n.numer().is_zero(),
            Self::Float(n) => n.is_zero(),
        }
    }

    /// Returns true if the number is exactly one.
    pub fn is_one(&self) -> bool {
        match self {
            Self::Integer(n) => *n == 1,
            Self::Rational(n) => *n == 1,
            Self::Float(n) => *n == 1,
        }
    }

    /// Returns true if the number is strictly negative.
    pub fn is_negative(&self) -> bool {
        match self {
            Self::Integer(n) => n.is_negative(),
            Self::Rational(n) => n.numer().is_negative(),
            Self::Float(n) => *n < 0,
        }
    }

    /// Returns the number as a [`Float`] with the default precision.
    pub fn to_float(&self) -> Float {
        match self {
            Self::Integer(n) => float(n),
            Self::Rational(n) => float(n),
            Self::Float(n) => n.clone(),
        }
    }

    /// Returns the number as an exact [`Rational`]. Floats are converted exactly, using every bit
    /// of their mantissa.
    fn into_rational(self) -> Rational {
        match self {
            Self::Integer(n) => Rational::from(n),
            Self::Rational(n) => n,
            Self::Float(n) => n.to_rational().unwrap_or_default(),
        }
    }

    /// Raises this number to the given power, returning [`None`] if the result cannot be
    /// represented as a number (for example, `2^(1/2)`), is undefined (such as `0^-1`), or would be
    /// unreasonably large.
    pub fn pow(&self, exp: &Number) -> Option<Number> {
        match (self, exp) {
            (Self::Float(_), _) | (_, Self::Float(_)) => {
                let base = self.to_float();
                let exp = exp.to_float();
                if base < 0 && !exp.is_integer() || base.is_zero() && exp < 0 {
                    return None;
                }
                let result = base.pow(&exp);
                result.is_finite().then_some(Self::Float(result))
            },
            (base, Self::Integer(e)) => {
                let e_abs = e.clone().abs().to_u32()?;
                let base = base.clone().into_rational();
                let bits = u64::from(base.numer().significant_bits().max(base.denom().significant_bits()));
                if bits * u64::from(e_abs) > MAX_POWER_BITS {
                    return None;
                }
                let result = base.pow(e_abs);
                if e.is_negative() {
                    if result.numer().is_zero() {
                        return None;
                    }
                    Some(Self::Rational(result.recip()).normalize())
                } else {
                    Some(Self::Rational(result).normalize())
                }
            },
            (base, Self::Rational(e)) => {
                // exact roots only: `(p/q)^(m/n) = (root_n(p) / root_n(q))^m`
                let n = e.denom().to_u32()?;
                let base = base.clone().into_rational();
                if base.numer().is_negative() && n % 2 == 0 {
                    return None;
                }
                let (numer, denom) = base.into_numer_denom();
                let (numer_root, numer_rem) = numer.root_rem(int(0), n);
                let (denom_root, denom_rem) = denom.root_rem(int(0), n);
                if !numer_rem.is_zero() || !denom_rem.is_zero() {
                    return None;
                }
                let root = Self::Rational(Rational::from((numer_root, denom_root)));
                root.pow(&Self::Integer(e.numer().clone()))
            },
        }
    }
}

impl Add for Number {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (Self::Integer(lhs), Self::Integer(rhs)) => Self::Integer(lhs + rhs),
            (Self::Float(lhs), other) | (other, Self::Float(lhs)) => Self::Float(lhs + other.to_float()),
            (lhs, rhs) => Self::Rational(lhs.into_rational() + rhs.into_rational()).normalize(),
        }
    }
}

impl Mul for Number {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (Self::Integer(lhs), Self::Integer(rhs)) => Self::Integer(lhs * rhs),
            (Self::Float(lhs), other) | (other, Self::Float(lhs)) => Self::Float(lhs * other.to_float()),
            (lhs, rhs) => Self::Rational(lhs.into_rational() * rhs.into_rational()).normalize(),
        }
    }
}

impl Neg for Number {
    type Output = Self;

    fn neg(self) -> Self::Output {
        match self {
            Self::Integer(n) => Self::Integer(-n),
            Self::Rational(n) => Self::Rational(-n),
            Self::Float(n) => Self::Float(-n),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn rat(p: i32, q: i32) -> Number {
        Number::Rational(Rational::from((p, q)))
    }

    #[test]
    fn exact_arithmetic() {
        assert_eq!(rat(1, 2) + rat(1, 2), Number::Integer(int(1)));
        assert_eq!(Number::Integer(int(3)) * rat(1, 6), rat(1, 2));
        assert_eq!(-rat(1, 2), rat(-1, 2));
    }

    #[test]
    fn float_promotion() {
        let sum = Number::Float(float(0.5)) + Number::Integer(int(2));
        assert_eq!(sum, Number::Float(float(2.5)));
    }

    #[test]
    fn integer_powers() {
        assert_eq!(Number::Integer(int(10)).pow(&Number::Integer(int(-2))), Some(rat(1, 100)));
        assert_eq!(rat(2, 3).pow(&Number::Integer(int(2))), Some(rat(4, 9)));
        assert_eq!(Number::Integer(int(0)).pow(&Number::Integer(int(-1))), None);
    }

    #[test]
    fn exact_roots() {
        assert_eq!(Number::Integer(int(4)).pow(&rat(1, 2)), Some(Number::Integer(int(2))));
        assert_eq!(Number::Integer(int(8)).pow(&rat(2, 3)), Some(Number::Integer(int(4))));
        assert_eq!(Number::Integer(int(-8)).pow(&rat(1, 3)), Some(Number::Integer(int(-2))));
        assert_eq!(Number::Integer(int(8)).pow(&rat(1, 2)), None);
        assert_eq!(Number::Integer(int(-4)).pow(&rat(1, 2)), None);
    }

    #[test]
    fn huge_powers_are_refused() {
        assert_eq!(Number::Integer(int(10)).pow(&Number::Integer(int(1_000_000))), None);
    }
}
