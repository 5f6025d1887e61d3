use crate::error::{DecimalForm, Error, NonFiniteDecimal, ZeroDenominator};
use rug::{Integer, Rational};
use tm_algebra::{primitive::float, SymExpr};

/// A decimal number.
///
/// A decimal is given either as an exact ratio `p / q`, which is what converting a fraction to a
/// decimal produces, or as a floating value `x`. Both forms render as a decimal expansion.
///
/// Decimals are only built through [`Decimal::new`], [`Decimal::ratio`] and [`Decimal::float`],
/// so the denominator of a ratio is never zero and a floating value is always finite:
///
/// ```compile_fail
/// use tm_maths::Decimal;
///
/// let nan = Decimal::Float(f64::NAN);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Decimal(Repr);

#[derive(Debug, Clone, PartialEq)]
enum Repr {
    /// The exact value `p / q`, with `q != 0`.
    Ratio { p: Integer, q: Integer },

    /// A finite floating value.
    Float(f64),
}

impl Decimal {
    /// Creates a decimal from exactly one of its two forms: either `x`, or both `p` and `q`.
    pub fn new(p: Option<Integer>, q: Option<Integer>, x: Option<f64>) -> Result<Self, Error> {
        match (p, q, x) {
            (Some(p), Some(q), None) => Self::ratio(p, q),
            (None, None, Some(x)) => Self::float(x),
            _ => Err(Error::validation(DecimalForm)),
        }
    }

    /// Creates the decimal `p / q`. The denominator cannot be zero.
    pub fn ratio(p: impl Into<Integer>, q: impl Into<Integer>) -> Result<Self, Error> {
        let q = q.into();
        if q.is_zero() {
            return Err(Error::validation(ZeroDenominator));
        }
        Ok(Self(Repr::Ratio { p: p.into(), q }))
    }

    /// Creates a decimal from a floating value, which must be finite.
    pub fn float(x: f64) -> Result<Self, Error> {
        if !x.is_finite() {
            return Err(Error::validation(NonFiniteDecimal { value: x }));
        }
        Ok(Self(Repr::Float(x)))
    }

    /// If the decimal is the exact ratio `p / q`, returns `p` and `q`.
    pub fn as_ratio(&self) -> Option<(&Integer, &Integer)> {
        match &self.0 {
            Repr::Ratio { p, q } => Some((p, q)),
            Repr::Float(_) => None,
        }
    }

    /// If the decimal is a floating value, returns it.
    pub fn as_float(&self) -> Option<f64> {
        match self.0 {
            Repr::Float(x) => Some(x),
            Repr::Ratio { .. } => None,
        }
    }

    /// Returns the exact value of a ratio decimal.
    pub(crate) fn to_rational(&self) -> Option<Rational> {
        self.as_ratio().map(|(p, q)| Rational::from((p.clone(), q.clone())))
    }

    /// Returns the value of the decimal.
    pub fn value(&self) -> f64 {
        match &self.0 {
            Repr::Ratio { p, q } => Rational::from((p.clone(), q.clone())).to_f64(),
            Repr::Float(x) => *x,
        }
    }

    /// Returns true if the decimal is zero.
    pub fn is_zero(&self) -> bool {
        match &self.0 {
            Repr::Ratio { p, .. } => p.is_zero(),
            Repr::Float(x) => *x == 0.0,
        }
    }

    /// Rounds the decimal to the given number of digits after the decimal point. The result is
    /// always a floating decimal.
    pub fn round(&self, digits: i32) -> Self {
        let scale = 10f64.powi(digits);
        let rounded = (self.value() * scale).round() / scale;
        if rounded.is_finite() {
            Self(Repr::Float(rounded))
        } else {
            // the scale overflowed; there is nothing to round away
            Self(Repr::Float(self.value()))
        }
    }

    /// Returns the backend expression of the decimal.
    pub(crate) fn to_backend(&self) -> SymExpr {
        match &self.0 {
            Repr::Ratio { p, q } => SymExpr::from(Rational::from((p.clone(), q.clone()))),
            Repr::Float(x) => SymExpr::from(float(*x)),
        }
    }
}
