//! Rules for sums.

use crate::{expr::SymExpr, number::Number, primitive::int};
use super::{flatten, fold_numbers};

/// `a+(b+c) = a+b+c`
///
/// Also unwraps a sum of zero or one term.
pub fn associate(expr: &SymExpr) -> Option<SymExpr> {
    let SymExpr::Add(terms) = expr else { return None };
    if terms.len() < 2 {
        return Some(SymExpr::Add(terms.clone()).downgrade());
    }

    flatten(terms, |term| match term {
        SymExpr::Add(inner) => Some(inner),
        _ => None,
    })
    .map(SymExpr::Add)
}

/// `a+0 = a`
pub fn add_zero(expr: &SymExpr) -> Option<SymExpr> {
    let SymExpr::Add(terms) = expr else { return None };
    let is_zero = |term: &SymExpr| term.as_number().map(|n| n.is_zero()).unwrap_or(false);
    if !terms.iter().any(is_zero) {
        return None;
    }

    Some(SymExpr::Add(terms.iter().filter(|term| !is_zero(term)).cloned().collect()).downgrade())
}

/// `2+3 = 5`, `1/2+1/3 = 5/6`, `0.5+1 = 1.5`
pub fn combine_numbers(expr: &SymExpr) -> Option<SymExpr> {
    let SymExpr::Add(terms) = expr else { return None };
    fold_numbers(terms, |lhs, rhs| lhs + rhs).map(|terms| SymExpr::Add(terms).downgrade())
}

/// Splits a term into its numeric coefficient and the product of its other factors.
///
/// - `5` -> `(5, 1)`
/// - `3*a` -> `(3, a)`
/// - `1/4*a*b` -> `(1/4, a*b)`
/// - `a` -> `(1, a)`
pub(crate) fn split_coefficient(term: &SymExpr) -> (Number, SymExpr) {
    if let Some(n) = term.as_number() {
        return (n, SymExpr::from(int(1)));
    }

    match term {
        SymExpr::Mul(factors) => {
            let mut coefficient = Number::Integer(int(1));
            let mut rest = Vec::with_capacity(factors.len());
            for factor in factors {
                match factor.as_number() {
                    Some(n) => coefficient = coefficient * n,
                    None => rest.push(factor.clone()),
                }
            }
            (coefficient, SymExpr::Mul(rest).downgrade())
        },
        _ => (Number::Integer(int(1)), term.clone()),
    }
}

/// Terms that differ only by their coefficient, as found so far.
struct LikeTerms {
    rest: SymExpr,
    coefficient: Number,
    first: SymExpr,
    merged: bool,
}

impl LikeTerms {
    fn into_expr(self) -> SymExpr {
        if !self.merged {
            self.first
        } else if self.coefficient.is_zero() {
            SymExpr::from(int(0))
        } else if self.coefficient.is_one() && !matches!(self.coefficient, Number::Float(_)) {
            self.rest
        } else {
            self.coefficient.into_expr() * self.rest
        }
    }
}

/// `a+a = 2a`, `2a+3a = 5a`, `x*y - y*x = 0`
///
/// Terms are like terms if their factors other than the coefficient are strictly equal. The
/// combined term takes the place of the first one.
pub fn combine_like_terms(expr: &SymExpr) -> Option<SymExpr> {
    let SymExpr::Add(terms) = expr else { return None };

    let mut groups: Vec<LikeTerms> = Vec::with_capacity(terms.len());
    for term in terms {
        let (coefficient, rest) = split_coefficient(term);
        match groups.iter_mut().find(|group| group.rest == rest) {
            Some(group) => {
                group.coefficient = group.coefficient.clone() + coefficient;
                group.merged = true;
            },
            None => groups.push(LikeTerms { rest, coefficient, first: term.clone(), merged: false }),
        }
    }

    if groups.len() == terms.len() {
        return None;
    }
    Some(SymExpr::Add(groups.into_iter().map(LikeTerms::into_expr).collect()).downgrade())
}
