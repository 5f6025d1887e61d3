//! Rules for `l + r`.

use crate::{
    ctxt::Ctxt,
    error::Error,
    node::{Node, NodeKind},
};
use super::{fallback, is_zero, mul, terms, Number};

/// Returns true if the node can be a term of a sum without further rewriting.
fn is_term(node: &Node) -> bool {
    matches!(
        node.kind(),
        NodeKind::Integer(_)
            | NodeKind::Decimal(_)
            | NodeKind::Fraction(..)
            | NodeKind::Symbol(_)
            | NodeKind::Pi
            | NodeKind::Inf
            | NodeKind::Mul(..)
            | NodeKind::Pow(..)
            | NodeKind::Image(..)
    )
}

/// Splits a term into its numeric coefficient and the rest, which is [`None`] if the term is a
/// number. A term without a numeric coefficient has the coefficient `1`.
fn split_coefficient(term: &Node) -> (Node, Option<&Node>) {
    match term.kind() {
        NodeKind::Mul(c, rest) if c.is_number() => ((**c).clone(), Some(&**rest)),
        _ if term.is_number() => (term.clone(), None),
        _ => (Node::integer(1), Some(term)),
    }
}

/// Returns true if the product chain has infinity as a factor.
fn has_inf(node: &Node) -> bool {
    match node.kind() {
        NodeKind::Inf => true,
        NodeKind::Mul(l, r) => has_inf(l) || has_inf(r),
        _ => false,
    }
}

/// Returns true if the two terms differ only by their numeric coefficient, and can be merged.
/// Terms with an infinite factor never merge: `inf - inf` has no value.
fn like(a: &Node, b: &Node) -> bool {
    match (split_coefficient(a), split_coefficient(b)) {
        ((_, Some(a)), (_, Some(b))) => a == b && !has_inf(a),
        _ => false,
    }
}

/// Simplifies `l + r`, where both operands are simplified.
pub(super) fn simplify(l: Node, r: Node, ctxt: &Ctxt) -> Result<Node, Error> {
    if is_zero(&l) {
        return Ok(r);
    }
    if is_zero(&r) {
        return Ok(l);
    }

    if let (Some(a), Some(b)) = (Number::of(&l), Number::of(&r)) {
        return match a.add(b).into_node(ctxt)? {
            Some(sum) => Ok(sum),
            None => fallback(Node::sum(l, r), ctxt),
        };
    }

    // `(a + b) + r` is `a + (b + r)`
    if let NodeKind::Add(a, b) = l.kind() {
        let tail = simplify((**b).clone(), r, ctxt)?;
        return simplify((**a).clone(), tail, ctxt);
    }

    if let NodeKind::Add(c, d) = r.kind() {
        let (c, d) = ((**c).clone(), (**d).clone());

        // numbers sink to the end of the chain, where the numeric term is
        if Number::of(&l).is_some() {
            let tail = simplify(l, d, ctxt)?;
            return simplify(c, tail, ctxt);
        }

        if like(&l, &c) {
            let head = simplify(l, c, ctxt)?;
            return simplify(head, d, ctxt);
        }

        // if `l` merges with a term further down, the chain gets no longer
        let rest = simplify(l.clone(), d.clone(), ctxt)?;
        if terms(&rest) <= terms(&d) {
            return simplify(c, rest, ctxt);
        }
        return Ok(Node::sum(l, r));
    }

    combine(l, r, ctxt)
}

/// Simplifies `l + r`, where neither operand is a sum.
fn combine(l: Node, r: Node, ctxt: &Ctxt) -> Result<Node, Error> {
    let (l_coefficient, l_rest) = split_coefficient(&l);
    let (r_coefficient, r_rest) = split_coefficient(&r);
    if let (Some(term), Some(other)) = (l_rest, r_rest) {
        if term == other && !has_inf(term) {
            let coefficient = simplify(l_coefficient, r_coefficient, ctxt)?;
            if is_zero(&coefficient) {
                return Ok(Node::integer(0));
            }
            return mul::simplify(coefficient, term.clone(), ctxt);
        }
    }

    if is_term(&l) && is_term(&r) {
        if l.is_number() && !r.is_number() {
            return Ok(Node::sum(r, l));
        }
        return Ok(Node::sum(l, r));
    }

    fallback(Node::sum(l, r), ctxt)
}

#[cfg(test)]
mod tests {
    use crate::node::Decimal;
    use pretty_assertions::assert_eq;
    use super::*;

    fn x() -> Node {
        Node::symbol("x").unwrap()
    }

    fn add(l: Node, r: Node) -> Node {
        simplify(l, r, &Ctxt::default()).unwrap()
    }

    #[test]
    fn coefficients() {
        assert_eq!(split_coefficient(&(Node::integer(3) * x())), (Node::integer(3), Some(&x())));
        assert_eq!(split_coefficient(&x()), (Node::integer(1), Some(&x())));
        assert_eq!(split_coefficient(&Node::integer(4)), (Node::integer(4), None));
        assert!(like(&x(), &(Node::integer(-1) * x())));
        assert!(!like(&x(), &x().pow(Node::integer(2))));
        assert!(!like(&Node::inf(), &(Node::integer(-1) * Node::inf())));
    }

    #[test]
    fn infinite_terms_do_not_cancel() {
        let minus_inf = Node::integer(-1) * Node::inf();
        assert_eq!(add(Node::inf(), minus_inf.clone()), Node::sum(Node::inf(), minus_inf.clone()));
        assert_eq!(
            add(x() * Node::inf(), Node::integer(-1) * (x() * Node::inf())),
            Node::sum(x() * Node::inf(), Node::integer(-1) * (x() * Node::inf())),
        );
        assert_eq!(add(Node::inf(), Node::inf()), Node::sum(Node::inf(), Node::inf()));
    }

    #[test]
    fn decimal_zeros() {
        let zero = Node::decimal(Decimal::float(0.0).unwrap());
        assert_eq!(add(x(), zero.clone()), x());
        assert_eq!(add(zero, x()), x());
        assert_eq!(add(x(), Node::decimal(Decimal::ratio(0, 3).unwrap())), x());

        // the coefficients `0.5` and `-0.5` cancel out
        let half = |x: f64| Node::decimal(Decimal::float(x).unwrap());
        assert_eq!(add(half(0.5) * x(), half(-0.5) * x()), Node::integer(0));
    }

    #[test]
    fn numeric_tail() {
        assert_eq!(add(Node::integer(1), x()), x() + Node::integer(1));
        assert_eq!(add(Node::pi(), Node::integer(1)), Node::pi() + Node::integer(1));
        assert_eq!(
            add(x() + Node::integer(1), Node::decimal(Decimal::float(0.5).unwrap())),
            x() + Node::decimal(Decimal::float(1.5).unwrap()),
        );
    }

    #[test]
    fn reassociation() {
        let y = Node::symbol("y").unwrap();
        let z = Node::symbol("z").unwrap();
        assert_eq!(
            add(x() + y.clone(), z.clone()),
            x() + (y.clone() + z.clone()),
        );

        // a like term further down absorbs the new one
        assert_eq!(
            add(x() + y.clone(), Node::integer(2) * x()),
            y + Node::integer(3) * x(),
        );
    }
}
