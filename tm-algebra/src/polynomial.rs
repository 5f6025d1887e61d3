//! Polynomial views of expanded expressions: degree, coefficients and collection of terms.
//!
//! Every function in this module expects an expression that has already been expanded by
//! [`simplify`](crate::simplify::simplify), so that it is a sum of products.

use crate::{error::NotAPolynomial, expr::{Primary, SymExpr}, primitive::int, simplify::simplify};
use std::collections::BTreeMap;
use tm_error::Error;

/// Returns the terms of an expanded expression.
fn terms(expr: &SymExpr) -> &[SymExpr] {
    match expr {
        SymExpr::Add(terms) => terms,
        expr => std::slice::from_ref(expr),
    }
}

/// Returns the factors of a single term.
fn factors(term: &SymExpr) -> &[SymExpr] {
    match term {
        SymExpr::Mul(factors) => factors,
        term => std::slice::from_ref(term),
    }
}

/// Returns the power of `symbol` in a single factor, or [`None`] if the factor depends on
/// `symbol` in a way that is not a non-negative integer power.
fn factor_degree(factor: &SymExpr, symbol: &str) -> Option<u32> {
    if !factor.free_symbols().contains(symbol) {
        return Some(0);
    }

    match factor {
        SymExpr::Primary(Primary::Symbol(name)) if name == symbol => Some(1),
        SymExpr::Exp(base, exp) if base.as_symbol() == Some(symbol) => exp.as_integer()?.to_u32(),
        _ => None,
    }
}

/// Returns the degree of a single term in `symbol`.
fn term_degree(term: &SymExpr, symbol: &str) -> Option<u32> {
    factors(term).iter()
        .map(|factor| factor_degree(factor, symbol))
        .try_fold(0u32, |acc, degree| acc.checked_add(degree?))
}

/// Removes every factor of the term that depends on one of the `symbols`.
fn strip(term: &SymExpr, symbols: &[String]) -> SymExpr {
    SymExpr::Mul(
        factors(term).iter()
            .filter(|factor| symbols.iter().all(|symbol| !factor.free_symbols().contains(symbol)))
            .cloned()
            .collect(),
    ).downgrade()
}

/// Returns the degree of every term of the expression in `symbol`, or an error if one of them is
/// not a monomial in `symbol`.
fn term_degrees(expr: &SymExpr, symbol: &str) -> Result<Vec<u32>, Error> {
    terms(expr).iter()
        .map(|term| term_degree(term, symbol))
        .collect::<Option<Vec<_>>>()
        .ok_or_else(|| Error::unspanned(NotAPolynomial {
            expr: expr.to_string(),
            symbol: symbol.to_string(),
        }))
}

/// Returns the degree of the expanded expression in `symbol`. The degree of an expression that
/// does not contain `symbol` is `0`.
pub fn degree(expr: &SymExpr, symbol: &str) -> Result<u32, Error> {
    Ok(term_degrees(expr, symbol)?.into_iter().max().unwrap_or(0))
}

/// Returns the coefficient of `symbol^power` in the expanded expression.
pub fn coefficient(expr: &SymExpr, symbol: &str, power: u32) -> Result<SymExpr, Error> {
    let degrees = term_degrees(expr, symbol)?;
    let symbols = [symbol.to_string()];
    let matching = terms(expr).iter()
        .zip(degrees)
        .filter(|(_, degree)| *degree == power)
        .map(|(term, _)| strip(term, &symbols))
        .collect::<Vec<_>>();
    Ok(simplify(&SymExpr::Add(matching).downgrade()))
}

/// Builds `coefficient * symbol_1^d_1 * symbol_2^d_2 * ...`, omitting a coefficient of `1` and
/// every zero power.
fn monomial(coefficient: SymExpr, symbols: &[String], degrees: &[u32]) -> SymExpr {
    let mut factors = if coefficient.as_integer().map(|n| *n == 1).unwrap_or(false) {
        Vec::new()
    } else {
        vec![coefficient]
    };
    for (symbol, &degree) in symbols.iter().zip(degrees) {
        let symbol = SymExpr::Primary(Primary::Symbol(symbol.clone()));
        match degree {
            0 => {},
            1 => factors.push(symbol),
            n => factors.push(symbol.pow(SymExpr::from(int(n)))),
        }
    }
    SymExpr::Mul(factors).downgrade()
}

/// Collects the terms of the expanded expression by their powers of the given symbols, and
/// orders them by descending power (comparing the symbols in the order given).
///
/// The coefficient of each power is itself simplified. Powers whose coefficient is zero are
/// dropped.
pub fn collect(expr: &SymExpr, symbols: &[String]) -> Result<SymExpr, Error> {
    let mut groups: BTreeMap<Vec<u32>, Vec<SymExpr>> = BTreeMap::new();
    for term in terms(expr) {
        let degrees = symbols.iter()
            .map(|symbol| {
                term_degree(term, symbol).ok_or_else(|| Error::unspanned(NotAPolynomial {
                    expr: expr.to_string(),
                    symbol: symbol.clone(),
                }))
            })
            .collect::<Result<Vec<_>, _>>()?;
        groups.entry(degrees).or_default().push(strip(term, symbols));
    }

    let collected = groups.into_iter()
        .rev()
        .filter_map(|(degrees, coefficients)| {
            let coefficient = simplify(&SymExpr::Add(coefficients).downgrade());
            if coefficient.as_number().map(|n| n.is_zero()).unwrap_or(false) {
                None
            } else {
                Some(monomial(coefficient, symbols, &degrees))
            }
        })
        .collect::<Vec<_>>();
    Ok(SymExpr::Add(collected).downgrade())
}

#[cfg(test)]
mod tests {
    use crate::expr::parse_latex;
    use pretty_assertions::assert_eq;
    use super::*;

    fn expanded(input: &str) -> SymExpr {
        simplify(&parse_latex(input).unwrap())
    }

    #[test]
    fn degree_of_product() {
        let expr = expanded("(3x-8)(4x-1)");
        assert_eq!(degree(&expr, "x").unwrap(), 2);
        assert_eq!(degree(&expr, "y").unwrap(), 0);
    }

    #[test]
    fn not_a_polynomial() {
        let expr = expanded(r"\frac{1}{x} + 1");
        let err = degree(&expr, "x").unwrap_err();
        assert!(err.is::<NotAPolynomial>());
    }

    #[test]
    fn coefficients() {
        let expr = expanded("(3x-8)(4x-1)");
        assert_eq!(coefficient(&expr, "x", 2).unwrap(), SymExpr::from(int(12)));
        assert_eq!(coefficient(&expr, "x", 1).unwrap(), SymExpr::from(int(-35)));
        assert_eq!(coefficient(&expr, "x", 0).unwrap(), SymExpr::from(int(8)));
        assert_eq!(coefficient(&expr, "x", 5).unwrap(), SymExpr::from(int(0)));
    }

    #[test]
    fn collect_in_one_symbol() {
        let expr = expanded("xy + 2x + y + x^{2}");
        let collected = collect(&expr, &["x".to_string()]).unwrap();
        assert_eq!(collected.to_string(), "x^2 + (y + 2) * x + y");
    }

    #[test]
    fn collect_is_idempotent() {
        let symbols = ["x".to_string()];
        let once = collect(&expanded("(x+2)^{2} - 3x"), &symbols).unwrap();
        let twice = collect(&simplify(&once), &symbols).unwrap();
        assert_eq!(once.to_string(), twice.to_string());
    }
}
