//! Numeric evaluation of constant expressions.

use crate::{expr::{Primary, SymExpr}, number::Number, primitive::{float, PI}};
use rug::{float::Special, ops::Pow, Float};
use std::cmp::Ordering;

/// Evaluates an expression that contains no symbols to a [`Float`].
///
/// Returns [`None`] if the expression contains a symbol, a function call, a relation or a
/// collection, or if its value is undefined (such as `0^-1` or `(-1)^(1/2)`).
pub fn evaluate(expr: &SymExpr) -> Option<Float> {
    let value = match expr {
        SymExpr::Primary(Primary::Integer(_) | Primary::Rational(_) | Primary::Float(_)) => {
            Number::from_expr(expr)?.to_float()
        },
        SymExpr::Primary(Primary::Pi) => PI.clone(),
        SymExpr::Primary(Primary::Infinity) => float(Special::Infinity),
        SymExpr::Primary(Primary::Symbol(_) | Primary::Call(..)) => return None,
        SymExpr::Add(terms) => terms.iter()
            .map(evaluate)
            .try_fold(float(0), |acc, term| Some(acc + term?))?,
        SymExpr::Mul(factors) => factors.iter()
            .map(evaluate)
            .try_fold(float(1), |acc, factor| Some(acc * factor?))?,
        SymExpr::Exp(base, exp) => {
            let base = evaluate(base)?;
            let exp = evaluate(exp)?;
            if base < 0 && !exp.is_integer() || base.is_zero() && exp < 0 {
                return None;
            }
            base.pow(&exp)
        },
        SymExpr::Eq(..) | SymExpr::Greater(..) | SymExpr::Interval { .. } | SymExpr::Tuple(_) => return None,
    };

    (!value.is_nan()).then_some(value)
}

/// Compares the numeric values of two constant expressions.
pub fn compare(lhs: &SymExpr, rhs: &SymExpr) -> Option<Ordering> {
    evaluate(lhs)?.partial_cmp(&evaluate(rhs)?)
}

#[cfg(test)]
mod tests {
    use crate::expr::parse_latex;
    use super::*;

    fn eval(input: &str) -> Option<f64> {
        evaluate(&parse_latex(input).unwrap()).map(|f| f.to_f64())
    }

    #[test]
    fn constants() {
        assert_eq!(eval(r"\frac{1}{4} + 0.5"), Some(0.75));
        assert_eq!(eval(r"\sqrt{9}"), Some(3.0));
        assert_eq!(eval(r"2\pi").map(|v| (v - std::f64::consts::TAU).abs() < 1e-12), Some(true));
        assert_eq!(eval(r"\infty"), Some(f64::INFINITY));
    }

    #[test]
    fn undefined() {
        assert_eq!(eval("x + 1"), None);
        assert_eq!(eval(r"\frac{1}{0}"), None);
        assert_eq!(eval(r"\sqrt{-4}"), None);
    }

    #[test]
    fn comparison() {
        let lhs = parse_latex(r"\frac{7}{2}").unwrap();
        let rhs = parse_latex("3").unwrap();
        assert_eq!(compare(&lhs, &rhs), Some(Ordering::Greater));
        assert_eq!(compare(&lhs, &parse_latex("y").unwrap()), None);
    }
}
