//! The kinds of errors the backend can report.

use ariadne::Fmt;
use tm_attrs::ErrorKind;
use tm_error::EXPR;

/// The expression is not a polynomial in the requested symbol, so it has no degree or
/// coefficients.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` is not a polynomial in `{}`", expr, symbol),
    help = format!("only sums of {} raised to non-negative integer powers can be collected", symbol.fg(EXPR)),
)]
pub struct NotAPolynomial {
    /// The offending expression.
    pub expr: String,

    /// The symbol the polynomial was requested in.
    pub symbol: String,
}

/// Simplifying the expression required dividing by zero.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` divides by zero", expr),
    labels = ["this denominator is zero"],
)]
pub struct DivisionByZero {
    /// The expression that divides by zero.
    pub expr: String,
}

/// A symbol name was passed where none is allowed.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(message = format!("`{}` is not a valid symbol name", name))]
pub struct InvalidSymbol {
    /// The rejected name.
    pub name: String,
}
