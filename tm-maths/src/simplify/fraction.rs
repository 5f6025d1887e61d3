//! Rules for `p / q`.

use crate::{
    ctxt::Ctxt,
    error::Error,
    node::{Node, NodeKind},
};
use rug::Integer;
use super::{fallback, fraction_ints, mul, negate, unhandled, Number};

/// Splits a node into its integer coefficient and the rest, which is [`None`] if the node is an
/// integer.
fn split_integer(node: &Node) -> (Integer, Option<Node>) {
    match node.kind() {
        NodeKind::Integer(n) => (n.clone(), None),
        NodeKind::Mul(c, rest) => match c.as_integer() {
            Some(n) => (n.clone(), Some((**rest).clone())),
            None => (Integer::from(1), Some(node.clone())),
        },
        _ => (Integer::from(1), Some(node.clone())),
    }
}

/// Puts a coefficient and the rest back together.
fn join(coefficient: Integer, rest: Option<Node>, ctxt: &Ctxt) -> Result<Node, Error> {
    match rest {
        Some(rest) => mul::simplify(Node::integer(coefficient), rest, ctxt),
        None => Ok(Node::integer(coefficient)),
    }
}

/// Simplifies `p / q`, where both operands are simplified.
pub(super) fn simplify(p: Node, q: Node, ctxt: &Ctxt) -> Result<Node, Error> {
    if q.is_zero() {
        return Err(unhandled(
            "Fraction",
            format!("Fraction(p={}, q={})", p, q),
            "the denominator simplifies to zero".to_string(),
        ));
    }
    if q.is_int(1) {
        return Ok(p);
    }
    if p.is_int(0) {
        return Ok(p);
    }

    // the sign goes to the numerator
    if Number::of(&q).map_or(false, |n| n.is_negative()) {
        return simplify(negate(p, ctxt)?, negate(q, ctxt)?, ctxt);
    }

    if let (Some(a), Some(b)) = (p.as_integer(), q.as_integer()) {
        return fraction_ints(a.clone(), b.clone(), ctxt);
    }

    if let (Some(a), Some(b)) = (Number::of(&p), Number::of(&q)) {
        if let Some(quotient) = a.div(b) {
            if let Some(quotient) = quotient.into_node(ctxt)? {
                return Ok(quotient);
            }
        }
        return fallback(Node::fraction(p, q)?, ctxt);
    }

    if p == q {
        return Ok(Node::integer(1));
    }

    // `(a / b) / q` is `a / (b * q)`, and `p / (c / d)` is `(p * d) / c`
    if let NodeKind::Fraction(a, b) = p.kind() {
        let denominator = mul::simplify((**b).clone(), q, ctxt)?;
        return simplify((**a).clone(), denominator, ctxt);
    }
    if let NodeKind::Fraction(c, d) = q.kind() {
        let numerator = mul::simplify(p, (**d).clone(), ctxt)?;
        return simplify(numerator, (**c).clone(), ctxt);
    }

    // common integer factors of the coefficients cancel out, and the denominator's coefficient
    // ends up positive
    let (p_coefficient, p_rest) = split_integer(&p);
    let (q_coefficient, q_rest) = split_integer(&q);
    let mut gcd = ctxt.backend.gcd(&p_coefficient, &q_coefficient);
    if q_coefficient.is_negative() {
        gcd = -gcd;
    }
    if gcd != 1 {
        let numerator = join(Integer::from(&p_coefficient / &gcd), p_rest, ctxt)?;
        let denominator = join(Integer::from(&q_coefficient / &gcd), q_rest, ctxt)?;
        return simplify(numerator, denominator, ctxt);
    }

    Node::fraction(p, q)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn sym(name: &str) -> Node {
        Node::symbol(name).unwrap()
    }

    fn div(p: Node, q: Node) -> Node {
        simplify(p, q, &Ctxt::default()).unwrap()
    }

    #[test]
    fn coefficients() {
        assert_eq!(split_integer(&Node::integer(-4)), (Integer::from(-4), None));
        assert_eq!(
            split_integer(&(Node::integer(3) * sym("x"))),
            (Integer::from(3), Some(sym("x"))),
        );
        assert_eq!(split_integer(&sym("x")), (Integer::from(1), Some(sym("x"))));
    }

    #[test]
    fn signs() {
        let minus_y = Node::integer(-1) * sym("y");
        assert_eq!(
            div(sym("x"), minus_y),
            Node::fraction(Node::integer(-1) * sym("x"), sym("y")).unwrap(),
        );
        assert_eq!(div(Node::integer(0), sym("x")), Node::integer(0));
    }

    #[test]
    fn common_factors() {
        let expr = div(Node::integer(6) * sym("x"), Node::integer(4) * sym("y"));
        assert_eq!(
            expr,
            Node::fraction(Node::integer(3) * sym("x"), Node::integer(2) * sym("y")).unwrap(),
        );

        let expr = div(Node::integer(6) * sym("x"), Node::integer(3));
        assert_eq!(expr, Node::integer(2) * sym("x"));
    }

    #[test]
    fn zero_denominator() {
        let err = simplify(sym("x"), Node::integer(0), &Ctxt::default()).unwrap_err();
        assert!(matches!(err, Error::UnhandledSimplification(_)));
    }
}
