//! Ordering polynomials by descending powers.
//!
//! The term collector expands an expression through the algebra backend, then rebuilds it as a
//! sum of terms ordered by descending degree. Collecting never fails: if the backend cannot
//! collect the expression (for example, because it is not a polynomial in the requested symbol),
//! the input is returned unchanged.

use crate::{codec::from_backend_with, ctxt::Ctxt, error::Error, node::Node};
use rug::Integer;
use tm_algebra::{expr::Primary, SymExpr};
use tracing::{instrument, warn};

impl Node {
    /// Collects the terms of the node using the [global context](Ctxt::global).
    ///
    /// With a symbol, the result is a polynomial in that symbol whose coefficients may contain
    /// other symbols. Without one, terms are collected over all free symbols, compared in
    /// alphabetical order.
    pub fn collected(&self, symbol: Option<&str>) -> Node {
        self.collected_with(symbol, Ctxt::global())
    }

    /// Collects the terms of the node using the given context.
    ///
    /// ```
    /// use tm_maths::{Ctxt, Node};
    ///
    /// let x = Node::symbol("x").unwrap();
    /// let expr = Node::integer(4) + x.clone() * Node::integer(3) + x.clone() * x;
    /// assert_eq!(expr.collected_with(Some("x"), &Ctxt::default()).latex(), "x^{2} + 3x + 4");
    /// ```
    #[instrument(level = "debug", skip(self, ctxt), fields(node = %self))]
    pub fn collected_with(&self, symbol: Option<&str>, ctxt: &Ctxt) -> Node {
        match collect(self, symbol, ctxt) {
            Ok(collected) => collected,
            Err(err) => {
                warn!(node = %self, error = %err, "cannot collect terms, returning the node unchanged");
                self.clone()
            },
        }
    }
}

fn collect(node: &Node, symbol: Option<&str>, ctxt: &Ctxt) -> Result<Node, Error> {
    let expr = match symbol {
        Some(symbol) => by_powers_of(node.backend(), symbol, ctxt),
        None => ctxt.backend.collect(node.backend(), &[]),
    }
    .map_err(Error::UnhandledSimplification)?;
    from_backend_with(&expr, ctxt)
}

/// Rebuilds the expanded expression as `c_n * symbol^n + ... + c_1 * symbol + c_0`, dropping
/// the zero coefficients.
fn by_powers_of(expr: &SymExpr, symbol: &str, ctxt: &Ctxt) -> Result<SymExpr, tm_error::Error> {
    let backend = &ctxt.backend;
    let expanded = backend.simplify_and_expand(expr)?;
    let degree = backend.degree(&expanded, symbol)?;
    let variable = SymExpr::Primary(Primary::Symbol(symbol.to_string()));

    let mut terms = Vec::new();
    for power in (0..=degree).rev() {
        let coefficient = backend.coefficient(&expanded, symbol, power)?;
        if coefficient.as_number().map(|n| n.is_zero()).unwrap_or(false) {
            continue;
        }

        let monomial = match power {
            0 => {
                terms.push(coefficient);
                continue;
            },
            1 => variable.clone(),
            n => variable.clone().pow(SymExpr::from(Integer::from(n))),
        };
        if coefficient.as_integer().map(|n| *n == 1).unwrap_or(false) {
            terms.push(monomial);
        } else {
            terms.push(SymExpr::Mul(vec![coefficient, monomial]));
        }
    }

    Ok(SymExpr::Add(terms).downgrade())
}
