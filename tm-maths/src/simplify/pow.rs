//! Rules for `base ^ exp`.

use crate::{
    ctxt::Ctxt,
    error::Error,
    node::{Decimal, Node, NodeKind},
};
use rug::{ops::Pow, Integer};
use super::{add, fallback, fraction, mul, Number};

/// Integer powers whose result would need more bits than this are left to the backend.
const MAX_BITS: u64 = 1 << 16;

/// Simplifies `base ^ exp`, where both operands are simplified.
pub(super) fn simplify(base: Node, exp: Node, ctxt: &Ctxt) -> Result<Node, Error> {
    if exp.is_int(0) {
        return Ok(Node::integer(1));
    }
    if exp.is_int(1) || base.is_int(1) {
        return Ok(base);
    }
    if base.is_int(0) {
        if Number::of(&exp).map_or(false, |n| !n.is_negative()) {
            return Ok(base);
        }
        return fallback(Node::power(base, exp), ctxt);
    }

    // `b ^ -n` is `1 / b ^ n`
    if let Some(n) = exp.as_integer() {
        if n.is_negative() {
            let denominator = simplify(base, Node::integer(-n.clone()), ctxt)?;
            return fraction::simplify(Node::integer(1), denominator, ctxt);
        }
    }

    if let (Some(b), Some(e)) = (base.as_integer(), exp.as_integer()) {
        if let Some(e) = e.to_u32() {
            if u64::from(b.significant_bits()) * u64::from(e) <= MAX_BITS {
                return Ok(Node::integer(Integer::from(b.pow(e))));
            }
        }
        return fallback(Node::power(base, exp), ctxt);
    }

    if let (Some(b), NodeKind::Fraction(m, n)) = (base.as_integer(), exp.kind()) {
        if let (Some(m), Some(n)) = (m.as_integer(), n.as_integer()) {
            if b.is_negative() {
                return fallback(Node::power(base, exp), ctxt);
            }
            if let Some(n) = n.to_u32() {
                // `b ^ (m / n)` is `r ^ m` if `b` is a perfect `n`th power `r ^ n`
                let root = Integer::from(b.root_ref(n));
                if Integer::from((&root).pow(n)) == *b {
                    return simplify(Node::integer(root), Node::integer(m.clone()), ctxt);
                }
            }
            return Ok(Node::power(base, exp));
        }
    }

    if let (NodeKind::Fraction(p, q), Some(_)) = (base.kind(), exp.as_integer()) {
        let numerator = simplify((**p).clone(), exp.clone(), ctxt)?;
        let denominator = simplify((**q).clone(), exp.clone(), ctxt)?;
        return fraction::simplify(numerator, denominator, ctxt);
    }

    let is_decimal = |node: &Node| matches!(node.kind(), NodeKind::Decimal(_));
    if is_decimal(&base) || is_decimal(&exp) {
        if let (Some(b), Some(e)) = (Number::of(&base), Number::of(&exp)) {
            if let Ok(value) = Decimal::float(b.to_f64().powf(e.to_f64())) {
                return Ok(Node::decimal(value));
            }
            return fallback(Node::power(base, exp), ctxt);
        }
    }

    // `(l + r) ^ 2` is `l ^ 2 + 2 * l * r + r ^ 2`
    if let (NodeKind::Add(l, r), true) = (base.kind(), exp.is_int(2)) {
        let (l, r) = ((**l).clone(), (**r).clone());
        let l_squared = simplify(l.clone(), Node::integer(2), ctxt)?;
        let product = mul::simplify(l, r.clone(), ctxt)?;
        let double = mul::simplify(Node::integer(2), product, ctxt)?;
        let r_squared = simplify(r, Node::integer(2), ctxt)?;
        let tail = add::simplify(double, r_squared, ctxt)?;
        return add::simplify(l_squared, tail, ctxt);
    }

    if exp.as_integer().is_some() {
        match base.kind() {
            NodeKind::Pow(inner_base, inner_exp) => {
                let exp = mul::simplify((**inner_exp).clone(), exp, ctxt)?;
                return simplify((**inner_base).clone(), exp, ctxt);
            },
            NodeKind::Mul(a, b) => {
                let a = simplify((**a).clone(), exp.clone(), ctxt)?;
                let b = simplify((**b).clone(), exp, ctxt)?;
                return mul::simplify(a, b, ctxt);
            },
            _ => (),
        }
    }

    match base.kind() {
        NodeKind::Symbol(_) | NodeKind::Pi | NodeKind::Inf | NodeKind::Image(..) => {
            Ok(Node::power(base, exp))
        },
        _ if base.is_number() => Ok(Node::power(base, exp)),
        _ => fallback(Node::power(base, exp), ctxt),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn sym(name: &str) -> Node {
        Node::symbol(name).unwrap()
    }

    fn frac(p: i32, q: i32) -> Node {
        Node::fraction(Node::integer(p), Node::integer(q)).unwrap()
    }

    fn pow(base: Node, exp: Node) -> Node {
        simplify(base, exp, &Ctxt::default()).unwrap()
    }

    #[test]
    fn zero_base() {
        assert_eq!(pow(Node::integer(0), Node::integer(3)), Node::integer(0));
        assert_eq!(pow(Node::integer(0), Node::integer(0)), Node::integer(1));
        assert!(simplify(Node::integer(0), Node::integer(-1), &Ctxt::default()).is_err());
    }

    #[test]
    fn roots() {
        assert_eq!(pow(Node::integer(27), frac(1, 3)), Node::integer(3));
        assert_eq!(pow(Node::integer(8), frac(-2, 3)), frac(1, 4));
        assert_eq!(pow(Node::integer(2), frac(1, 2)), Node::power(Node::integer(2), frac(1, 2)));
    }

    #[test]
    fn decimals() {
        let half = Node::decimal(Decimal::float(0.5).unwrap());
        assert_eq!(pow(half, Node::integer(2)), Node::decimal(Decimal::float(0.25).unwrap()));
        assert_eq!(
            pow(Node::integer(4), Node::decimal(Decimal::float(0.5).unwrap())),
            Node::decimal(Decimal::float(2.0).unwrap()),
        );
    }

    #[test]
    fn products_and_quotients() {
        let expr = pow(Node::integer(3) * sym("x"), Node::integer(2));
        assert_eq!(expr, Node::integer(9) * sym("x").pow(Node::integer(2)));

        let expr = pow(Node::fraction(sym("x"), sym("y")).unwrap(), Node::integer(2));
        assert_eq!(
            expr,
            Node::fraction(sym("x").pow(Node::integer(2)), sym("y").pow(Node::integer(2))).unwrap(),
        );
    }

    #[test]
    fn symbolic_exponents() {
        let expr = pow(sym("x"), sym("n"));
        assert_eq!(expr, sym("x").pow(sym("n")));
        assert_eq!(pow(Node::integer(2), sym("n")), Node::integer(2).pow(sym("n")));
    }
}
