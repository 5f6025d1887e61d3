//! The contract between the expression core and an algebra backend, and the default backend.

use crate::{
    error::{DivisionByZero, InvalidSymbol},
    expr::{parse_latex, SymExpr},
    numeric,
    polynomial,
    simplify::{simplify_with, Options},
};
use rug::Integer;
use std::cmp::Ordering;
use tm_error::Error;
use tracing::{debug, instrument};

/// The operations that expression trees delegate to a symbolic algebra engine.
///
/// The expression core only ever talks to the backend through this trait, so a different engine
/// (or a stub, in tests) can be substituted.
pub trait AlgebraBackend {
    /// Simplifies and fully expands the expression.
    fn simplify_and_expand(&self, expr: &SymExpr) -> Result<SymExpr, Error>;

    /// Returns the greatest common divisor of two integers. The result is never negative.
    fn gcd(&self, a: &Integer, b: &Integer) -> Integer;

    /// Parses free-text notation, such as `\dfrac{1}{2}x - 3`, into a backend expression.
    fn parse_free_text(&self, text: &str) -> Result<SymExpr, Error>;

    /// Returns the degree of the expression in `symbol`.
    fn degree(&self, expr: &SymExpr, symbol: &str) -> Result<u32, Error>;

    /// Returns the coefficient of `symbol^power` in the expression.
    fn coefficient(&self, expr: &SymExpr, symbol: &str, power: u32) -> Result<SymExpr, Error>;

    /// Collects the terms of the expression by descending powers of the given symbols.
    fn collect(&self, expr: &SymExpr, symbols: &[String]) -> Result<SymExpr, Error>;

    /// Compares the numeric values of two expressions, if both have one.
    fn compare(&self, lhs: &SymExpr, rhs: &SymExpr) -> Option<Ordering>;
}

/// The default, rule-based algebra backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Algebra {
    options: Options,
}

impl Algebra {
    /// Creates a backend with the default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the largest integer power of a sum that is expanded. Higher powers are left
    /// unexpanded.
    pub fn with_max_expand_power(mut self, max_expand_power: u32) -> Self {
        self.options.max_expand_power = max_expand_power;
        self
    }

    /// Returns the options of the simplifier.
    pub fn options(&self) -> &Options {
        &self.options
    }
}

/// Returns the first `x^-n` with `x = 0` left in the expression, which the simplifier cannot
/// remove.
fn find_division_by_zero(expr: &SymExpr) -> Option<&SymExpr> {
    expr.post_order_iter().find(|expr| match expr {
        SymExpr::Exp(base, exp) => {
            base.as_number().map(|n| n.is_zero()).unwrap_or(false)
                && exp.as_number().map(|n| n.is_negative()).unwrap_or(false)
        },
        _ => false,
    })
}

/// Checks that the name can be used as a symbol.
fn check_symbol(symbol: &str) -> Result<(), Error> {
    if symbol.is_empty() || !symbol.chars().all(char::is_alphabetic) {
        return Err(Error::unspanned(InvalidSymbol { name: symbol.to_string() }));
    }
    Ok(())
}

impl AlgebraBackend for Algebra {
    #[instrument(level = "debug", skip(self, expr), fields(expr = %expr))]
    fn simplify_and_expand(&self, expr: &SymExpr) -> Result<SymExpr, Error> {
        let simplified = simplify_with(expr, &self.options);
        if let Some(culprit) = find_division_by_zero(&simplified) {
            return Err(Error::unspanned(DivisionByZero { expr: culprit.to_string() }));
        }
        debug!(result = %simplified, "simplified");
        Ok(simplified)
    }

    fn gcd(&self, a: &Integer, b: &Integer) -> Integer {
        Integer::from(a.gcd_ref(b))
    }

    fn parse_free_text(&self, text: &str) -> Result<SymExpr, Error> {
        parse_latex(text)
    }

    fn degree(&self, expr: &SymExpr, symbol: &str) -> Result<u32, Error> {
        check_symbol(symbol)?;
        polynomial::degree(&self.simplify_and_expand(expr)?, symbol)
    }

    fn coefficient(&self, expr: &SymExpr, symbol: &str, power: u32) -> Result<SymExpr, Error> {
        check_symbol(symbol)?;
        polynomial::coefficient(&self.simplify_and_expand(expr)?, symbol, power)
    }

    fn collect(&self, expr: &SymExpr, symbols: &[String]) -> Result<SymExpr, Error> {
        symbols.iter().try_for_each(|symbol| check_symbol(symbol))?;
        let expanded = self.simplify_and_expand(expr)?;
        if symbols.is_empty() {
            let symbols = expanded.free_symbols().into_iter().collect::<Vec<_>>();
            return polynomial::collect(&expanded, &symbols);
        }
        polynomial::collect(&expanded, symbols)
    }

    fn compare(&self, lhs: &SymExpr, rhs: &SymExpr) -> Option<Ordering> {
        numeric::compare(&simplify_with(lhs, &self.options), &simplify_with(rhs, &self.options))
    }
}

#[cfg(test)]
mod tests {
    use crate::primitive::int;
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn gcd_is_non_negative() {
        let algebra = Algebra::new();
        assert_eq!(algebra.gcd(&int(-6), &int(9)), int(3));
        assert_eq!(algebra.gcd(&int(0), &int(-5)), int(5));
    }

    #[test]
    fn division_by_zero() {
        let algebra = Algebra::new();
        let expr = algebra.parse_free_text(r"\frac{x}{2-2}").unwrap();
        let err = algebra.simplify_and_expand(&expr).unwrap_err();
        assert!(err.is::<DivisionByZero>());
    }

    #[test]
    fn collect_all_symbols() {
        let algebra = Algebra::new();
        let expr = algebra.parse_free_text("(x+y)^{2}").unwrap();
        let collected = algebra.collect(&expr, &[]).unwrap();
        assert_eq!(collected.to_string(), "x^2 + 2 * x * y + y^2");
    }

    #[test]
    fn expand_limit_is_configurable() {
        let algebra = Algebra::new().with_max_expand_power(1);
        let expr = algebra.parse_free_text("(x+1)^{2}").unwrap();
        assert_eq!(algebra.simplify_and_expand(&expr).unwrap().to_string(), "(x + 1)^2");
        assert!(algebra.degree(&expr, "x").is_err());
    }

    #[test]
    fn compare_bounds() {
        let algebra = Algebra::new();
        let two = algebra.parse_free_text(r"\sqrt{4}").unwrap();
        let three = algebra.parse_free_text("3").unwrap();
        assert_eq!(algebra.compare(&two, &three), Some(Ordering::Less));
    }

    #[test]
    fn rejects_bad_symbols() {
        let algebra = Algebra::new();
        let expr = algebra.parse_free_text("x").unwrap();
        assert!(algebra.degree(&expr, "").unwrap_err().is::<InvalidSymbol>());
    }
}
