//! Expression trees for school mathematics.
//!
//! This crate is the core of an automated answer checker. It represents expressions as immutable
//! trees of [`Node`]s and provides:
//!
//! - construction with checked invariants (see the [`node`] module);
//! - simplification toward a canonical form ([`Node::simplified`]), with a fallback to an
//!   algebra backend for shapes the built-in rules do not handle;
//! - rendering as display markup ([`Node::latex`]);
//! - a textual self-description that round-trips exactly ([`codec::from_repr`] and the
//!   [`Display`](std::fmt::Display) implementation of [`Node`]);
//! - parsing of free-text notation through the backend ([`parse_free_text`]);
//! - ordering of polynomials by descending powers ([`Node::collected`]).
//!
//! General algebra (expanding, computing greatest common divisors, parsing free text, and
//! collecting terms) is delegated to an [`AlgebraBackend`](tm_algebra::AlgebraBackend), which is
//! injected through a [`Ctxt`]. The default backend is [`tm_algebra::Algebra`].
//!
//! ```
//! use tm_maths::{parse_free_text, Node};
//!
//! let expr = parse_free_text("(3x-8)(4x-1)").unwrap();
//! let simplified = expr.simplified().unwrap();
//! assert_eq!(simplified.collected(Some("x")).latex(), "12x^{2} -35x + 8");
//! ```
//!
//! # Logging
//!
//! The crate emits [`tracing`] events: `debug` when a node is handed to the backend, and `warn`
//! when a failure is swallowed (an unhandled shape under [`UnhandledPolicy::ReturnUnchanged`], or
//! a term collection that the backend cannot perform). It never installs a subscriber.

pub mod codec;
mod collect;
pub mod ctxt;
pub mod error;
mod latex;
pub mod node;
mod simplify;

pub use ctxt::{Ctxt, UnhandledPolicy};
pub use error::Error;
pub use node::{Decimal, Function, Node, NodeKind};

use codec::from_backend_with;
use tracing::instrument;

/// Parses free-text notation, such as `\dfrac{1}{2}x - 3`, using the [global
/// context](Ctxt::global).
pub fn parse_free_text(text: &str) -> Result<Node, Error> {
    parse_free_text_with(text, Ctxt::global())
}

/// Parses free-text notation using the backend of the given context.
///
/// The text is parsed by the backend, then translated into a tree. The result is not simplified.
#[instrument(level = "debug", skip(ctxt))]
pub fn parse_free_text_with(text: &str, ctxt: &Ctxt) -> Result<Node, Error> {
    let expr = ctxt.backend.parse_free_text(text).map_err(Error::Parse)?;
    from_backend_with(&expr, ctxt)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn sym(name: &str) -> Node {
        Node::symbol(name).unwrap()
    }

    #[test]
    fn fractions_and_products() {
        assert_eq!(
            parse_free_text(r"\frac{1}{2}").unwrap(),
            Node::fraction(Node::integer(1), Node::integer(2)).unwrap(),
        );
        assert_eq!(parse_free_text("2x").unwrap(), Node::integer(2) * sym("x"));
    }

    #[test]
    fn relations_and_applications() {
        assert_eq!(
            parse_free_text("x = 2").unwrap(),
            Node::equality(sym("x"), Node::integer(2)),
        );
        assert_eq!(
            parse_free_text("x < 2").unwrap(),
            Node::greater_than(Node::integer(2), sym("x")),
        );
        assert_eq!(
            parse_free_text("f(x)").unwrap(),
            Function::new("f").unwrap().apply(sym("x")),
        );
    }

    #[test]
    fn parsed_text_simplifies() {
        let expr = parse_free_text(r"\frac{6}{4} + x").unwrap();
        assert_eq!(expr.simplified().unwrap().latex(), r"x + \dfrac{3}{2}");
    }

    #[test]
    fn syntax_errors() {
        let err = parse_free_text(r"\frac{1}{").unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }
}
