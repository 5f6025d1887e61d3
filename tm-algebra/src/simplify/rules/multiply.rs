//! Rules for products.

use crate::{expr::SymExpr, number::Number, primitive::int};
use super::{flatten, fold_numbers};

/// `a*(b*c) = a*b*c`
///
/// Also unwraps a product of zero or one factor.
pub fn associate(expr: &SymExpr) -> Option<SymExpr> {
    let SymExpr::Mul(factors) = expr else { return None };
    if factors.len() < 2 {
        return Some(SymExpr::Mul(factors.clone()).downgrade());
    }

    flatten(factors, |factor| match factor {
        SymExpr::Mul(inner) => Some(inner),
        _ => None,
    })
    .map(SymExpr::Mul)
}

/// `0*a = 0`
pub fn multiply_zero(expr: &SymExpr) -> Option<SymExpr> {
    let SymExpr::Mul(factors) = expr else { return None };
    factors.iter()
        .any(|factor| factor.as_number().map(|n| n.is_zero()).unwrap_or(false))
        .then(|| SymExpr::from(int(0)))
}

/// `1*a = a`
///
/// Only the integer `1` is dropped; `1.0` marks an inexact result and is kept.
pub fn multiply_one(expr: &SymExpr) -> Option<SymExpr> {
    let SymExpr::Mul(factors) = expr else { return None };
    let is_one = |factor: &SymExpr| factor.as_integer().map(|n| *n == 1).unwrap_or(false);
    if !factors.iter().any(is_one) {
        return None;
    }

    Some(SymExpr::Mul(factors.iter().filter(|factor| !is_one(factor)).cloned().collect()).downgrade())
}

/// `2*3 = 6`, `3*1/6 = 1/2`
pub fn combine_numbers(expr: &SymExpr) -> Option<SymExpr> {
    let SymExpr::Mul(factors) = expr else { return None };
    fold_numbers(factors, |lhs, rhs| lhs * rhs).map(|factors| SymExpr::Mul(factors).downgrade())
}

/// Splits a factor into its base and exponent. The exponent of anything other than a power is
/// `1`.
pub(crate) fn split_exponent(expr: &SymExpr) -> (SymExpr, SymExpr) {
    match expr {
        SymExpr::Exp(base, exp) => (base.as_ref().clone(), exp.as_ref().clone()),
        _ => (expr.clone(), SymExpr::from(int(1))),
    }
}

fn both_positive_integers(lhs: &SymExpr, rhs: &SymExpr) -> bool {
    [lhs, rhs].into_iter().all(|exp| exp.as_integer().map(|n| *n > 0).unwrap_or(false))
}

/// A factor of a product, with every later factor that was combined into it.
enum Item {
    /// Numbers are left to [`combine_numbers`].
    Fixed(SymExpr),
    Power {
        base: SymExpr,
        exp: SymExpr,
        first: SymExpr,
        merged: bool,
    },
}

impl Item {
    fn new(factor: &SymExpr) -> Self {
        if factor.is_number() {
            return Item::Fixed(factor.clone());
        }
        let (base, exp) = split_exponent(factor);
        Item::Power { base, exp, first: factor.clone(), merged: false }
    }

    /// Tries to combine `factor` into this item. Returns false if they are not like factors.
    fn absorb(&mut self, factor: &SymExpr) -> bool {
        let Item::Power { base, exp, merged, .. } = self else { return false };
        if factor.is_number() {
            return false;
        }
        let (other_base, other_exp) = split_exponent(factor);

        if *exp == other_exp && base.is_integer() && other_base.is_integer() {
            // a^c * b^c = (ab)^c
            let Some(product) = Number::from_expr(base)
                .zip(Number::from_expr(&other_base))
                .map(|(lhs, rhs)| (lhs * rhs).into_expr())
            else {
                return false;
            };
            *base = product;
        } else if *base == other_base
            && !(matches!(base, SymExpr::Add(_)) && both_positive_integers(exp, &other_exp))
        {
            // a^b * a^c = a^(b+c); powers of sums are expanded instead
            *exp = exp.clone() + other_exp;
        } else {
            return false;
        }

        *merged = true;
        true
    }

    fn into_expr(self) -> SymExpr {
        match self {
            Item::Fixed(factor) | Item::Power { first: factor, merged: false, .. } => factor,
            Item::Power { base, exp, .. } => {
                if exp.as_integer().map(|n| *n == 1).unwrap_or(false) {
                    base
                } else {
                    base.pow(exp)
                }
            },
        }
    }
}

/// Combines like factors.
///
/// `a^b*a^c = a^(b+c)`, `2^c*3^c = 6^c`
///
/// The combined factor takes the place of the first one.
pub fn combine_like_factors(expr: &SymExpr) -> Option<SymExpr> {
    let SymExpr::Mul(factors) = expr else { return None };

    let mut items: Vec<Item> = Vec::with_capacity(factors.len());
    for factor in factors {
        if !items.iter_mut().any(|item| item.absorb(factor)) {
            items.push(Item::new(factor));
        }
    }

    if items.len() == factors.len() {
        return None;
    }
    Some(SymExpr::Mul(items.into_iter().map(Item::into_expr).collect()).downgrade())
}
