//! Rules for `l * r`.

use crate::{
    ctxt::Ctxt,
    error::Error,
    node::{Node, NodeKind},
};
use super::{add, factors, fallback, fraction, is_one, is_zero, pow, Number};

/// Returns true if the node can be a factor of a product without further rewriting.
fn is_factor(node: &Node) -> bool {
    node.is_number()
        || matches!(
            node.kind(),
            NodeKind::Symbol(_) | NodeKind::Pi | NodeKind::Inf | NodeKind::Pow(..) | NodeKind::Image(..)
        )
}

/// Splits a factor into its base and exponent. A factor that is not a power has the exponent `1`.
fn split_power(node: &Node) -> (&Node, Node) {
    match node.kind() {
        NodeKind::Pow(base, exp) => (&**base, (**exp).clone()),
        _ => (node, Node::integer(1)),
    }
}

/// Returns true if both factors are powers of the same non-numeric base.
fn same_base(a: &Node, b: &Node) -> bool {
    let (a, _) = split_power(a);
    let (b, _) = split_power(b);
    !a.is_number() && a == b
}

/// The position of a factor in a product. Factors without a key keep their relative position.
fn key(node: &Node) -> Option<(u8, &str)> {
    match node.kind() {
        NodeKind::Pi => Some((0, "")),
        NodeKind::Symbol(name) => Some((1, name.as_str())),
        NodeKind::Pow(base, _) => match base.kind() {
            NodeKind::Pi => Some((0, "")),
            NodeKind::Symbol(name) => Some((1, name.as_str())),
            _ => None,
        },
        NodeKind::Image(function, _) => Some((2, function.name())),
        _ => None,
    }
}

/// Returns true if `a` must be written after `b`.
fn goes_after(a: &Node, b: &Node) -> bool {
    match (key(a), key(b)) {
        (Some(a), Some(b)) => a > b,
        _ => false,
    }
}

/// Merges two factors with the same base into one power.
fn merge_powers(l: &Node, r: &Node, ctxt: &Ctxt) -> Result<Node, Error> {
    let (base, l_exp) = split_power(l);
    let (_, r_exp) = split_power(r);
    let exp = add::simplify(l_exp, r_exp, ctxt)?;
    pow::simplify(base.clone(), exp, ctxt)
}

/// Simplifies `l * r`, where both operands are simplified.
pub(super) fn simplify(l: Node, r: Node, ctxt: &Ctxt) -> Result<Node, Error> {
    if is_one(&l) {
        return Ok(r);
    }
    if is_one(&r) {
        return Ok(l);
    }
    if is_zero(&l) || is_zero(&r) {
        return Ok(Node::integer(0));
    }

    if let (Some(a), Some(b)) = (Number::of(&l), Number::of(&r)) {
        return match a.mul(b).into_node(ctxt)? {
            Some(product) => Ok(product),
            None => fallback(Node::product(l, r), ctxt),
        };
    }

    // a product with a fraction is a fraction
    if let NodeKind::Fraction(p, q) = l.kind() {
        if !l.is_number() {
            let numerator = simplify((**p).clone(), r, ctxt)?;
            return fraction::simplify(numerator, (**q).clone(), ctxt);
        }
    }
    if let NodeKind::Fraction(p, q) = r.kind() {
        if !r.is_number() {
            let numerator = simplify(l, (**p).clone(), ctxt)?;
            return fraction::simplify(numerator, (**q).clone(), ctxt);
        }
    }

    if let NodeKind::Add(a, b) = l.kind() {
        let left = simplify((**a).clone(), r.clone(), ctxt)?;
        let right = simplify((**b).clone(), r, ctxt)?;
        return add::simplify(left, right, ctxt);
    }
    if let NodeKind::Add(c, d) = r.kind() {
        let left = simplify(l.clone(), (**c).clone(), ctxt)?;
        let right = simplify(l, (**d).clone(), ctxt)?;
        return add::simplify(left, right, ctxt);
    }

    // the coefficient goes first
    if r.is_number() {
        return simplify(r, l, ctxt);
    }

    // `(a * b) * r` is `a * (b * r)`
    if let NodeKind::Mul(a, b) = l.kind() {
        let tail = simplify((**b).clone(), r, ctxt)?;
        return simplify((**a).clone(), tail, ctxt);
    }

    if let NodeKind::Mul(c, d) = r.kind() {
        let (c, d) = ((**c).clone(), (**d).clone());

        if l.is_number() {
            if c.is_number() {
                let coefficient = simplify(l, c, ctxt)?;
                return simplify(coefficient, d, ctxt);
            }
            return Ok(Node::product(l, r));
        }

        if c.is_number() {
            let tail = simplify(l, d, ctxt)?;
            return simplify(c, tail, ctxt);
        }

        if same_base(&l, &c) {
            let head = merge_powers(&l, &c, ctxt)?;
            return simplify(head, d, ctxt);
        }

        // if `l` merges with a factor further down, the chain gets no longer
        let rest = simplify(l.clone(), d.clone(), ctxt)?;
        if factors(&rest) <= factors(&d) || goes_after(&l, &c) {
            return simplify(c, rest, ctxt);
        }
        return Ok(Node::product(l, r));
    }

    if same_base(&l, &r) {
        return merge_powers(&l, &r, ctxt);
    }

    if goes_after(&l, &r) {
        return Ok(Node::product(r, l));
    }

    if is_factor(&l) && is_factor(&r) {
        return Ok(Node::product(l, r));
    }

    fallback(Node::product(l, r), ctxt)
}

#[cfg(test)]
mod tests {
    use crate::node::{Decimal, Function};
    use pretty_assertions::assert_eq;
    use super::*;

    fn sym(name: &str) -> Node {
        Node::symbol(name).unwrap()
    }

    fn mul(l: Node, r: Node) -> Node {
        simplify(l, r, &Ctxt::default()).unwrap()
    }

    #[test]
    fn keys() {
        let f = Function::new("f").unwrap();
        assert!(goes_after(&sym("x"), &Node::pi()));
        assert!(goes_after(&f.apply(sym("a")), &sym("z")));
        assert!(goes_after(&sym("y"), &sym("x").pow(sym("n"))));
        assert!(!goes_after(&sym("x"), &sym("x")));
        assert!(!goes_after(&Node::inf(), &sym("x")));
    }

    #[test]
    fn ordering() {
        let expr = mul(sym("z"), mul(sym("y"), sym("x")));
        assert_eq!(expr, sym("x") * (sym("y") * sym("z")));

        let expr = mul(sym("x"), Node::pi());
        assert_eq!(expr, Node::pi() * sym("x"));
    }

    #[test]
    fn powers_merge() {
        let expr = mul(sym("x").pow(Node::integer(2)), sym("x") * sym("y"));
        assert_eq!(expr, sym("x").pow(Node::integer(3)) * sym("y"));

        let expr = mul(sym("x").pow(sym("n")), sym("x"));
        assert_eq!(expr, sym("x").pow(sym("n") + Node::integer(1)));
    }

    #[test]
    fn fractions_absorb_factors() {
        let over_y = Node::fraction(sym("x"), sym("y")).unwrap();
        assert_eq!(
            mul(Node::integer(2), over_y),
            Node::fraction(Node::integer(2) * sym("x"), sym("y")).unwrap(),
        );
    }

    #[test]
    fn decimal_identities() {
        let float = |x: f64| Node::decimal(Decimal::float(x).unwrap());
        assert_eq!(mul(float(1.0), sym("x")), sym("x"));
        assert_eq!(mul(sym("x"), Node::decimal(Decimal::ratio(4, 4).unwrap())), sym("x"));
        assert_eq!(mul(float(0.0), sym("x")), Node::integer(0));
        assert_eq!(mul(sym("x"), Node::decimal(Decimal::ratio(0, 7).unwrap())), Node::integer(0));
        assert_eq!(mul(float(1.0), sym("x")).latex(), "x");
    }

    #[test]
    fn exact_decimals_stay_exact() {
        let ratio = Node::decimal(Decimal::ratio(1, 3).unwrap());
        assert_eq!(mul(Node::integer(3), ratio.clone()).to_string(), "Decimal(p=3, q=3)");
        assert_eq!(mul(ratio.clone(), Node::integer(-2)).to_string(), "Decimal(p=-2, q=3)");

        let half = Node::fraction(Node::integer(1), Node::integer(2)).unwrap();
        assert_eq!(mul(half, ratio.clone()).to_string(), "Decimal(p=1, q=6)");

        // a floating factor makes the product floating
        let float = Node::decimal(Decimal::float(0.5).unwrap());
        assert!(matches!(
            mul(float, ratio).kind(),
            NodeKind::Decimal(d) if d.as_float().is_some(),
        ));
    }
}
