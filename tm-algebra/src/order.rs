//! Canonical order of terms and factors.
//!
//! Strict equality already ignores the order of terms and factors, but two equal values should
//! also print the same way. After simplification, every sum is sorted by descending total degree
//! with constants last, and every product puts its numeric coefficient first, followed by the
//! other factors in alphabetical order of their bases.

use crate::expr::{Primary, SymExpr};
use std::cmp::Reverse;

/// Returns the total degree of the expression over all of its symbols, ignoring any power that
/// is not an integer.
///
/// - `3` -> `0`
/// - `x` -> `1`
/// - `x^2*y` -> `3`
/// - `x^-1` -> `-1`
pub fn total_degree(expr: &SymExpr) -> i64 {
    match expr {
        SymExpr::Primary(Primary::Symbol(_)) => 1,
        SymExpr::Mul(factors) => factors.iter().map(total_degree).fold(0, i64::saturating_add),
        SymExpr::Add(terms) => terms.iter().map(total_degree).max().unwrap_or(0),
        SymExpr::Exp(base, exp) => {
            let exp = exp.as_integer().and_then(|n| n.to_i64()).unwrap_or(0);
            total_degree(base).saturating_mul(exp)
        },
        _ => 0,
    }
}

/// Returns the base of a factor, for ordering purposes.
fn base(expr: &SymExpr) -> &SymExpr {
    match expr {
        SymExpr::Exp(base, _) => base,
        expr => expr,
    }
}

/// Sorts the terms and factors of the expression, and of all of its children, into the canonical
/// order.
pub fn sort(expr: SymExpr) -> SymExpr {
    match expr {
        SymExpr::Primary(Primary::Call(name, args)) => {
            SymExpr::Primary(Primary::Call(name, args.into_iter().map(sort).collect()))
        },
        SymExpr::Primary(_) => expr,
        SymExpr::Add(terms) => {
            let mut terms = terms.into_iter().map(sort).collect::<Vec<_>>();
            terms.sort_by_cached_key(|term| (Reverse(total_degree(term)), term.is_number(), term.to_string()));
            SymExpr::Add(terms)
        },
        SymExpr::Mul(factors) => {
            let mut factors = factors.into_iter().map(sort).collect::<Vec<_>>();
            factors.sort_by_cached_key(|factor| {
                (!factor.is_number(), base(factor).to_string(), factor.to_string())
            });
            SymExpr::Mul(factors)
        },
        SymExpr::Exp(lhs, rhs) => sort(*lhs).pow(sort(*rhs)),
        SymExpr::Eq(lhs, rhs) => SymExpr::Eq(Box::new(sort(*lhs)), Box::new(sort(*rhs))),
        SymExpr::Greater(lhs, rhs) => SymExpr::Greater(Box::new(sort(*lhs)), Box::new(sort(*rhs))),
        SymExpr::Interval { left, right, left_open, right_open } => SymExpr::Interval {
            left: Box::new(sort(*left)),
            right: Box::new(sort(*right)),
            left_open,
            right_open,
        },
        SymExpr::Tuple(items) => SymExpr::Tuple(items.into_iter().map(sort).collect()),
    }
}

#[cfg(test)]
mod tests {
    use crate::{expr::parse_latex, simplify::simplify};
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn degrees() {
        let degree = |s: &str| total_degree(&parse_latex(s).unwrap());
        assert_eq!(degree("3"), 0);
        assert_eq!(degree("x^{2}y"), 3);
        assert_eq!(degree(r"\frac{1}{x}"), -1);
    }

    #[test]
    fn descending_degree() {
        let expr = simplify(&parse_latex("5 + x + 3x^{2}").unwrap());
        assert_eq!(expr.to_string(), "3 * x^2 + x + 5");
    }

    #[test]
    fn coefficient_first() {
        let expr = simplify(&parse_latex("y x 4").unwrap());
        assert_eq!(expr.to_string(), "4 * x * y");
    }
}
