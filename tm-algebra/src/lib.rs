//! The default algebra backend of `tm-maths`.
//!
//! Expression trees in `tm-maths` are deliberately shallow about algebra: their own rewrite rules
//! only cover the shapes that appear in school exercises. Everything else (general expansion,
//! greatest common divisors, parsing free-text answers, and collecting polynomial terms) is
//! delegated to an [`AlgebraBackend`]. This crate defines that contract and provides [`Algebra`],
//! a rule-based implementation of it with exact arithmetic.
//!
//! # Expression representation
//!
//! Backend expressions are [`SymExpr`] trees, which **flatten** sums and products into lists of
//! terms and factors. See the [`expr`] module for details, including the definition of strict
//! equality.
//!
//! ```
//! use tm_algebra::{primitive::int, AlgebraBackend, Algebra, SymExpr};
//!
//! let algebra = Algebra::new();
//! let expr = algebra.parse_free_text("x + x + x").unwrap();
//! let simplified = algebra.simplify_and_expand(&expr).unwrap();
//!
//! // `x + x + x = 3x`
//! assert_eq!(simplified, SymExpr::from(int(3)) * SymExpr::Primary(
//!     tm_algebra::expr::Primary::Symbol("x".to_string()),
//! ));
//! ```
//!
//! # Simplification
//!
//! Simplification is done by applying a set of rewrite rules to the expression in multiple passes
//! until none applies. Each rule is a function that accepts an expression and returns
//! [`Option<SymExpr>`]; if the rule is applicable, the rewritten expression is returned. The
//! result is then sorted into a canonical order, so that equal values print identically.
//!
//! For more information, see the [`mod@simplify`] module.

pub mod backend;
pub mod error;
pub mod expr;
pub mod number;
pub mod numeric;
pub mod order;
pub mod polynomial;
pub mod primitive;
pub mod simplify;

pub use backend::{AlgebraBackend, Algebra};
pub use expr::SymExpr;
pub use number::Number;
pub use simplify::{simplify, simplify_with, simplify_with_steps};
