//! Translation between expression trees and backend expressions.
//!
//! Trees are binary while backend expressions are flattened, so the translation is not a
//! bijection. Going to the backend, nested sums and products are merged into one list. Coming
//! back, a list of `n` terms or factors becomes a right-leaning chain of binary nodes with the
//! first operand outermost: `a + b + c` becomes `Add(a, Add(b, c))`.
//!
//! Products with factors raised to negative integer powers are turned back into fractions, so
//! `x * y^-1` becomes `Fraction(x, y)`. Floating backend numbers become floating decimals, never
//! exact ones.

use crate::{
    ctxt::Ctxt,
    error::{Error, UnsupportedBackendExpr},
    node::{Decimal, Function, Node, NodeKind},
};
use rug::{Integer, Rational};
use tm_algebra::{expr::Primary, SymExpr};

/// Computes the backend expression of a node from the backend expressions of its children.
///
/// The result is never simplified: `Add(2, 3)` translates to `2 + 3`, not `5`. The only exception
/// is a fraction of two integers, which is the backend's exact rational.
pub(crate) fn to_backend(kind: &NodeKind) -> SymExpr {
    match kind {
        NodeKind::Integer(n) => SymExpr::from(n.clone()),
        NodeKind::Decimal(d) => d.to_backend(),
        NodeKind::Symbol(name) => SymExpr::Primary(Primary::Symbol(name.clone())),
        NodeKind::Pi => SymExpr::Primary(Primary::Pi),
        NodeKind::Inf => SymExpr::Primary(Primary::Infinity),
        NodeKind::Add(l, r) => l.backend().clone() + r.backend().clone(),
        NodeKind::Mul(l, r) => l.backend().clone() * r.backend().clone(),
        NodeKind::Fraction(p, q) => match (p.as_integer(), q.as_integer()) {
            (Some(p), Some(q)) if !q.is_zero() => SymExpr::from(Rational::from((p.clone(), q.clone()))),
            _ => p.backend().clone() * q.backend().clone().recip(),
        },
        NodeKind::Pow(base, exp) => base.backend().clone().pow(exp.backend().clone()),
        NodeKind::Equality(l, r) => SymExpr::Eq(
            Box::new(l.backend().clone()),
            Box::new(r.backend().clone()),
        ),
        NodeKind::StrictGreaterThan(l, r) => SymExpr::Greater(
            Box::new(l.backend().clone()),
            Box::new(r.backend().clone()),
        ),
        NodeKind::Interval { left, right, left_open, right_open } => SymExpr::Interval {
            left: Box::new(left.backend().clone()),
            right: Box::new(right.backend().clone()),
            left_open: *left_open,
            right_open: *right_open,
        },
        NodeKind::Collection(items) => SymExpr::Tuple(
            items.iter().map(|item| item.backend().clone()).collect(),
        ),
        NodeKind::Image(function, argument) => {
            let args = match argument.kind() {
                NodeKind::Collection(items) => items.iter().map(|item| item.backend().clone()).collect(),
                _ => vec![argument.backend().clone()],
            };
            SymExpr::Primary(Primary::Call(function.name().to_string(), args))
        },
    }
}

/// Translates a backend expression into a tree, checking intervals with the [global
/// context](Ctxt::global).
pub fn from_backend(expr: &SymExpr) -> Result<Node, Error> {
    from_backend_with(expr, Ctxt::global())
}

/// Translates a backend expression into a tree.
///
/// Fails if the backend expression nests a relation, an interval or a tuple inside arithmetic,
/// which trees cannot represent, or if a node would violate its invariants (such as the fraction
/// `1 / 0`, or an interval the backend of the context finds empty).
pub fn from_backend_with(expr: &SymExpr, ctxt: &Ctxt) -> Result<Node, Error> {
    match expr {
        SymExpr::Primary(primary) => from_primary(primary, ctxt),
        SymExpr::Add(terms) => Ok(chain(terms, Node::sum, ctxt)?.unwrap_or_else(|| Node::integer(0))),
        SymExpr::Mul(factors) => from_product(factors, ctxt),
        SymExpr::Exp(base, exp) => match negative_exponent(exp) {
            Some(n) => Node::fraction(Node::integer(1), reciprocal_base(base, n, ctxt)?),
            None => Ok(Node::power(operand(base, ctxt)?, operand(exp, ctxt)?)),
        },
        SymExpr::Eq(l, r) => Ok(Node::equality(
            from_backend_with(l, ctxt)?,
            from_backend_with(r, ctxt)?,
        )),
        SymExpr::Greater(l, r) => Ok(Node::greater_than(
            from_backend_with(l, ctxt)?,
            from_backend_with(r, ctxt)?,
        )),
        SymExpr::Interval { left, right, left_open, right_open } => Node::interval_with(
            from_backend_with(left, ctxt)?,
            from_backend_with(right, ctxt)?,
            *left_open,
            *right_open,
            ctxt,
        ),
        SymExpr::Tuple(items) => Ok(Node::collection(all(items, ctxt)?)),
    }
}

fn all(exprs: &[SymExpr], ctxt: &Ctxt) -> Result<Vec<Node>, Error> {
    exprs.iter().map(|expr| from_backend_with(expr, ctxt)).collect()
}

fn from_primary(primary: &Primary, ctxt: &Ctxt) -> Result<Node, Error> {
    Ok(match primary {
        Primary::Integer(n) => Node::integer(n.clone()),
        Primary::Rational(r) => Node::fraction(
            Node::integer(r.numer().clone()),
            Node::integer(r.denom().clone()),
        )?,
        Primary::Float(x) => Node::decimal(Decimal::float(x.to_f64())?),
        Primary::Symbol(name) => Node::symbol(name.clone())?,
        Primary::Pi => Node::pi(),
        Primary::Infinity => Node::inf(),
        Primary::Call(name, args) => Function::new(name.clone())?.apply_all(all(args, ctxt)?),
    })
}

/// Translates an operand of an arithmetic node, rejecting shapes that are not values.
fn operand(expr: &SymExpr, ctxt: &Ctxt) -> Result<Node, Error> {
    match expr {
        SymExpr::Eq(..) | SymExpr::Greater(..) | SymExpr::Interval { .. } | SymExpr::Tuple(_) => {
            Err(Error::Parse(tm_error::Error::unspanned(UnsupportedBackendExpr {
                expr: expr.to_string(),
            })))
        },
        _ => from_backend_with(expr, ctxt),
    }
}

/// Builds a right-leaning chain of binary nodes, or [`None`] if there are no operands.
fn chain(
    exprs: &[SymExpr],
    join: fn(Node, Node) -> Node,
    ctxt: &Ctxt,
) -> Result<Option<Node>, Error> {
    let mut nodes = exprs.iter()
        .map(|expr| operand(expr, ctxt))
        .collect::<Result<Vec<_>, _>>()?;
    let Some(mut chain) = nodes.pop() else {
        return Ok(None);
    };
    while let Some(node) = nodes.pop() {
        chain = join(node, chain);
    }
    Ok(Some(chain))
}

/// If the expression is a negative integer `-n`, returns `n`.
fn negative_exponent(exp: &SymExpr) -> Option<Integer> {
    exp.as_integer()
        .filter(|n| n.is_negative())
        .map(|n| n.clone().abs())
}

/// Returns `base^n`, or just `base` if `n` is one.
fn reciprocal_base(base: &SymExpr, n: Integer, ctxt: &Ctxt) -> Result<Node, Error> {
    let base = operand(base, ctxt)?;
    if n == 1 {
        Ok(base)
    } else {
        Ok(Node::power(base, Node::integer(n)))
    }
}

/// Translates a product, moving factors with negative integer exponents to a denominator.
fn from_product(factors: &[SymExpr], ctxt: &Ctxt) -> Result<Node, Error> {
    let mut numerator = Vec::new();
    let mut denominator = Vec::new();
    for factor in factors {
        match factor {
            SymExpr::Exp(base, exp) => match negative_exponent(exp) {
                Some(n) => denominator.push(reciprocal_base(base, n, ctxt)?),
                None => numerator.push(factor.clone()),
            },
            _ => numerator.push(factor.clone()),
        }
    }

    let numerator = chain(&numerator, Node::product, ctxt)?;
    let Some(mut denominator_chain) = denominator.pop() else {
        return Ok(numerator.unwrap_or_else(|| Node::integer(1)));
    };
    while let Some(node) = denominator.pop() {
        denominator_chain = Node::product(node, denominator_chain);
    }

    Node::fraction(numerator.unwrap_or_else(|| Node::integer(1)), denominator_chain)
}
