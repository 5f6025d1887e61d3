//! Rules for powers.

use crate::{expr::SymExpr, primitive::int, simplify::Options};

/// Splits a power into its base and exponent.
fn parts(expr: &SymExpr) -> Option<(&SymExpr, &SymExpr)> {
    match expr {
        SymExpr::Exp(base, exp) => Some((base.as_ref(), exp.as_ref())),
        _ => None,
    }
}

/// `a^0 = 1`
///
/// This includes `0^0 = 1`.
pub fn power_zero(expr: &SymExpr) -> Option<SymExpr> {
    let (_, exp) = parts(expr)?;
    exp.as_number()?.is_zero().then(|| SymExpr::from(int(1)))
}

/// `0^a = 0`, for positive numbers `a`
///
/// `0^-1` is undefined and left alone.
pub fn power_zero_left(expr: &SymExpr) -> Option<SymExpr> {
    let (base, exp) = parts(expr)?;
    let exp = exp.as_number()?;
    let positive = !exp.is_negative() && !exp.is_zero();
    (base.as_number()?.is_zero() && positive).then(|| SymExpr::from(int(0)))
}

/// `1^a = 1`
pub fn power_one_left(expr: &SymExpr) -> Option<SymExpr> {
    let (base, _) = parts(expr)?;
    (*base.as_integer()? == 1).then(|| SymExpr::from(int(1)))
}

/// `a^1 = a`
pub fn power_one(expr: &SymExpr) -> Option<SymExpr> {
    let (base, exp) = parts(expr)?;
    (*exp.as_integer()? == 1).then(|| base.clone())
}

/// Evaluates powers of numbers when the result is a number.
///
/// `2^3 = 8`, `10^-2 = 1/100`, `8^(2/3) = 4`
pub fn evaluate(expr: &SymExpr) -> Option<SymExpr> {
    let (base, exp) = parts(expr)?;
    base.as_number()?
        .pow(&exp.as_number()?)
        .map(|result| result.into_expr())
}

/// `(a^b)^c = a^(bc)`, for integers `c`
pub fn power_power(expr: &SymExpr) -> Option<SymExpr> {
    let (SymExpr::Exp(inner_base, inner_exp), exp) = parts(expr)? else { return None };
    if !exp.is_integer() {
        return None;
    }
    Some(inner_base.as_ref().clone().pow(inner_exp.as_ref().clone() * exp.clone()))
}

/// `(a+b)^n = (a+b)(a+b)...`, for integers `2 <= n <= max_expand_power`
///
/// The distributive property then expands the product.
pub fn expand_power(expr: &SymExpr, options: &Options) -> Option<SymExpr> {
    let (base, exp) = parts(expr)?;
    if !matches!(base, SymExpr::Add(_)) {
        return None;
    }
    let n = exp.as_integer()?.to_u32()?;
    (2..=options.max_expand_power)
        .contains(&n)
        .then(|| SymExpr::Mul(vec![base.clone(); n as usize]))
}
