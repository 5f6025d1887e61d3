//! Rules that distribute products and powers over their operands.
//!
//! These are the only rules that can make an expression larger. They turn a product of sums into
//! a sum of products, which is the expanded form the backend promises.

use crate::expr::SymExpr;

/// `a*(b+c) = a*b + a*c`
///
/// The other factors are distributed over the first sum in the product.
pub fn distributive_property(expr: &SymExpr) -> Option<SymExpr> {
    let SymExpr::Mul(factors) = expr else { return None };
    let idx = factors.iter().position(|factor| matches!(factor, SymExpr::Add(_)))?;
    let SymExpr::Add(terms) = &factors[idx] else { return None };

    let others = factors.iter()
        .enumerate()
        .filter(|&(i, _)| i != idx)
        .map(|(_, factor)| factor.clone())
        .collect::<Vec<_>>();
    Some(SymExpr::Add(
        terms.iter()
            .map(|term| SymExpr::Mul(others.clone()) * term.clone())
            .collect(),
    ))
}

/// `(a*b)^c = a^c * b^c`, for integers `c`
pub fn distribute_power(expr: &SymExpr) -> Option<SymExpr> {
    let SymExpr::Exp(base, exp) = expr else { return None };
    let (SymExpr::Mul(factors), true) = (base.as_ref(), exp.is_integer()) else { return None };
    Some(SymExpr::Mul(
        factors.iter()
            .map(|factor| factor.clone().pow(exp.as_ref().clone()))
            .collect(),
    ))
}
