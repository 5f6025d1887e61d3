//! The simplification engine.
//!
//! Simplification is bottom-up: the children of a node are simplified first, then a rule for the
//! node's own kind is chosen by looking at the shapes of the simplified children. Each binary
//! kind has its own module (`add`, `mul`, `fraction` and `pow`) whose `simplify` function
//! takes *already simplified* operands; rules call each other through these functions, never
//! the recursive entry point, so no subtree is simplified twice.
//!
//! Rules are tried in a fixed order: identities, numeric folding, then shape-specific rewrites.
//! If no rule applies, the node is handed to the algebra backend, and the backend's result is
//! translated back into a tree. If the backend fails too, the [`UnhandledPolicy`] of the context
//! decides whether that is an error.
//!
//! # Canonical forms
//!
//! The rules produce (and expect) sums and products as right-leaning chains: `a + (b + c)` and
//! `a * (b * c)`. In a sum, the numeric term (there is at most one) is last, and like terms are
//! combined. In a product, the numeric coefficient (there is at most one) is first, equal bases
//! are merged into powers, and the other factors are ordered: pi, then symbols (and their powers)
//! by name, then function applications by name. Factors without a place in that order keep their
//! relative position.

mod add;
mod fraction;
mod mul;
mod pow;


use crate::{
    codec::from_backend_with,
    ctxt::{Ctxt, UnhandledPolicy},
    error::{Error, UnhandledShape},
    node::{Decimal, Node, NodeKind},
};
use rug::{Integer, Rational};
use tracing::{debug, instrument, warn};

impl Node {
    /// Simplifies the node using the [global context](Ctxt::global).
    pub fn simplified(&self) -> Result<Node, Error> {
        self.simplified_with(Ctxt::global())
    }

    /// Simplifies the node using the given context.
    ///
    /// ```
    /// use tm_maths::{Ctxt, Node};
    ///
    /// let x = Node::symbol("x").unwrap();
    /// let expr = (Node::integer(3) * x.clone() - Node::integer(8))
    ///     * (Node::integer(4) * x - Node::integer(1));
    /// let simplified = expr.simplified_with(&Ctxt::default()).unwrap();
    /// assert_eq!(simplified.latex(), "12x^{2} -35x + 8");
    /// ```
    #[instrument(level = "debug", skip_all, fields(node = %self))]
    pub fn simplified_with(&self, ctxt: &Ctxt) -> Result<Node, Error> {
        simplify(self, ctxt)
    }
}

/// Simplifies the node and all of its children.
pub(crate) fn simplify(node: &Node, ctxt: &Ctxt) -> Result<Node, Error> {
    match node.kind() {
        NodeKind::Integer(_)
        | NodeKind::Decimal(_)
        | NodeKind::Symbol(_)
        | NodeKind::Pi
        | NodeKind::Inf => Ok(node.clone()),
        NodeKind::Add(l, r) => add::simplify(simplify(l, ctxt)?, simplify(r, ctxt)?, ctxt),
        NodeKind::Mul(l, r) => mul::simplify(simplify(l, ctxt)?, simplify(r, ctxt)?, ctxt),
        NodeKind::Fraction(p, q) => fraction::simplify(simplify(p, ctxt)?, simplify(q, ctxt)?, ctxt),
        NodeKind::Pow(base, exp) => pow::simplify(simplify(base, ctxt)?, simplify(exp, ctxt)?, ctxt),
        NodeKind::Equality(l, r) => Ok(Node::equality(simplify(l, ctxt)?, simplify(r, ctxt)?)),
        NodeKind::StrictGreaterThan(l, r) => {
            Ok(Node::greater_than(simplify(l, ctxt)?, simplify(r, ctxt)?))
        },
        NodeKind::Interval { left, right, left_open, right_open } => Node::interval_with(
            simplify(left, ctxt)?,
            simplify(right, ctxt)?,
            *left_open,
            *right_open,
            ctxt,
        ),
        NodeKind::Collection(items) => Ok(Node::collection(
            items.iter().map(|item| simplify(item, ctxt)).collect::<Result<Vec<_>, _>>()?,
        )),
        NodeKind::Image(function, argument) => Ok(function.apply(simplify(argument, ctxt)?)),
    }
}

/// Builds the error for a node that cannot be simplified.
fn unhandled(node: &'static str, expr: String, reason: String) -> Error {
    Error::UnhandledSimplification(tm_error::Error::unspanned(UnhandledShape { node, expr, reason }))
}

/// Simplifies a node that no rule handles by asking the algebra backend to simplify and expand
/// it. The children of the node must already be simplified.
fn fallback(node: Node, ctxt: &Ctxt) -> Result<Node, Error> {
    let reason = match ctxt.backend.simplify_and_expand(node.backend()) {
        Ok(expr) => match from_backend_with(&expr, ctxt) {
            Ok(simplified) => {
                debug!(node = %node, result = %expr, "simplified by the backend");
                return Ok(simplified);
            },
            Err(err) => err.to_string(),
        },
        Err(err) => err.to_string(),
    };

    match ctxt.policy {
        UnhandledPolicy::Error => Err(unhandled(node.kind().name(), node.to_string(), reason)),
        UnhandledPolicy::ReturnUnchanged => {
            warn!(node = %node, %reason, "cannot simplify node, returning it unchanged");
            Ok(node)
        },
    }
}

/// Builds the reduced fraction `p / q`, or an integer if `q` divides `p`. The sign is carried by
/// the numerator.
///
/// `q` must not be zero.
fn fraction_ints(mut p: Integer, mut q: Integer, ctxt: &Ctxt) -> Result<Node, Error> {
    if q.is_negative() {
        p = -p;
        q = -q;
    }

    let gcd = ctxt.backend.gcd(&p, &q);
    if gcd > 1 {
        p /= &gcd;
        q /= &gcd;
    }

    if q == 1 {
        Ok(Node::integer(p))
    } else {
        Node::fraction(Node::integer(p), Node::integer(q))
    }
}

/// A numeric node, as seen by the folding rules. Exact values are integers and fractions of
/// integers. A product keeps an exact decimal exact; any other decimal makes the result floating.
#[derive(Debug, Clone)]
enum Number {
    Exact(Rational),

    /// The exact decimal `p / q`, with `q != 0`. It is never reduced.
    Ratio(Integer, Integer),

    Float(f64),
}

impl Number {
    fn of(node: &Node) -> Option<Self> {
        match node.kind() {
            NodeKind::Integer(n) => Some(Number::Exact(Rational::from(n.clone()))),
            NodeKind::Decimal(d) => Some(match d.as_ratio() {
                Some((p, q)) => Number::Ratio(p.clone(), q.clone()),
                None => Number::Float(d.value()),
            }),
            NodeKind::Fraction(p, q) => match (p.as_integer(), q.as_integer()) {
                (Some(p), Some(q)) if !q.is_zero() => {
                    Some(Number::Exact(Rational::from((p.clone(), q.clone()))))
                },
                _ => None,
            },
            _ => None,
        }
    }

    fn to_f64(&self) -> f64 {
        match self {
            Number::Exact(r) => r.to_f64(),
            Number::Ratio(p, q) => Rational::from((p.clone(), q.clone())).to_f64(),
            Number::Float(x) => *x,
        }
    }

    fn is_negative(&self) -> bool {
        match self {
            Number::Exact(r) => r.cmp0().is_lt(),
            Number::Ratio(p, q) => !p.is_zero() && p.is_negative() != q.is_negative(),
            Number::Float(x) => *x < 0.0,
        }
    }

    fn is_zero(&self) -> bool {
        match self {
            Number::Exact(r) => r.cmp0().is_eq(),
            Number::Ratio(p, _) => p.is_zero(),
            Number::Float(x) => *x == 0.0,
        }
    }

    fn is_one(&self) -> bool {
        match self {
            Number::Exact(r) => *r == 1,
            Number::Ratio(p, q) => p == q,
            Number::Float(x) => *x == 1.0,
        }
    }

    fn add(self, other: Number) -> Number {
        match (self, other) {
            (Number::Exact(a), Number::Exact(b)) => Number::Exact(a + b),
            (a, b) => Number::Float(a.to_f64() + b.to_f64()),
        }
    }

    fn mul(self, other: Number) -> Number {
        match (self, other) {
            (Number::Exact(a), Number::Exact(b)) => Number::Exact(a * b),
            (Number::Ratio(p, q), Number::Exact(r)) | (Number::Exact(r), Number::Ratio(p, q)) => {
                let (n, d) = r.into_numer_denom();
                Number::Ratio(p * n, q * d)
            },
            (Number::Ratio(p1, q1), Number::Ratio(p2, q2)) => Number::Ratio(p1 * p2, q1 * q2),
            (a, b) => Number::Float(a.to_f64() * b.to_f64()),
        }
    }

    /// Divides the numbers, or returns [`None`] if `other` is an exact zero.
    fn div(self, other: Number) -> Option<Number> {
        match (self, other) {
            (Number::Exact(_), Number::Exact(b)) if b.cmp0().is_eq() => None,
            (Number::Exact(a), Number::Exact(b)) => Some(Number::Exact(a / b)),
            (a, b) => Some(Number::Float(a.to_f64() / b.to_f64())),
        }
    }

    /// Converts the number into a node, or returns [`None`] if it is a floating value that is not
    /// finite.
    fn into_node(self, ctxt: &Ctxt) -> Result<Option<Node>, Error> {
        match self {
            Number::Exact(r) => {
                let (p, q) = r.into_numer_denom();
                fraction_ints(p, q, ctxt).map(Some)
            },
            Number::Ratio(p, q) => Ok(Some(Node::decimal(Decimal::ratio(p, q)?))),
            Number::Float(x) => Ok(Decimal::float(x).ok().map(Node::decimal)),
        }
    }
}

/// Returns true if the node is a number equal to zero, in any of its forms.
fn is_zero(node: &Node) -> bool {
    Number::of(node).map_or(false, |n| n.is_zero())
}

/// Returns true if the node is a number equal to one, in any of its forms.
fn is_one(node: &Node) -> bool {
    Number::of(node).map_or(false, |n| n.is_one())
}

/// Returns `-node`, simplified.
fn negate(node: Node, ctxt: &Ctxt) -> Result<Node, Error> {
    mul::simplify(Node::integer(-1), node, ctxt)
}

/// Returns the number of terms in a sum chain.
fn terms(node: &Node) -> usize {
    match node.kind() {
        NodeKind::Add(_, r) => 1 + terms(r),
        _ => 1,
    }
}

/// Returns the number of factors in a product chain.
fn factors(node: &Node) -> usize {
    match node.kind() {
        NodeKind::Mul(_, r) => 1 + factors(r),
        _ => 1,
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        codec::from_repr,
        error::UnhandledShape,
        node::Function,
    };
    use pretty_assertions::assert_eq;
    use rug::Integer;
    use std::{
        cmp::Ordering,
        collections::HashMap,
        sync::{
            atomic::{AtomicUsize, Ordering as AtomicOrdering},
            Arc,
        },
    };
    use super::*;
    use tm_algebra::{AlgebraBackend, SymExpr};

    /// A backend that only knows how to compute a gcd. It counts the comparisons it is asked for,
    /// and never knows the answer.
    #[derive(Default)]
    struct GcdOnly {
        compares: Arc<AtomicUsize>,
    }

    impl AlgebraBackend for GcdOnly {
        fn simplify_and_expand(&self, expr: &SymExpr) -> Result<SymExpr, tm_error::Error> {
            Err(tm_error::Error::unspanned(UnhandledShape {
                node: "stub",
                expr: expr.to_string(),
                reason: "the stub backend cannot simplify".to_string(),
            }))
        }

        fn gcd(&self, a: &Integer, b: &Integer) -> Integer {
            Integer::from(a.gcd_ref(b))
        }

        fn parse_free_text(&self, _: &str) -> Result<SymExpr, tm_error::Error> {
            unimplemented!()
        }

        fn degree(&self, _: &SymExpr, _: &str) -> Result<u32, tm_error::Error> {
            unimplemented!()
        }

        fn coefficient(&self, _: &SymExpr, _: &str, _: u32) -> Result<SymExpr, tm_error::Error> {
            unimplemented!()
        }

        fn collect(&self, _: &SymExpr, _: &[String]) -> Result<SymExpr, tm_error::Error> {
            unimplemented!()
        }

        fn compare(&self, _: &SymExpr, _: &SymExpr) -> Option<Ordering> {
            self.compares.fetch_add(1, AtomicOrdering::Relaxed);
            None
        }
    }

    fn stub() -> Ctxt {
        Ctxt::new(GcdOnly::default())
    }

    fn x() -> Node {
        Node::symbol("x").unwrap()
    }

    fn y() -> Node {
        Node::symbol("y").unwrap()
    }

    fn frac(p: i32, q: i32) -> Node {
        Node::fraction(Node::integer(p), Node::integer(q)).unwrap()
    }

    fn simplify_repr(text: &str) -> Node {
        from_repr(text).unwrap().simplified_with(&stub()).unwrap()
    }

    #[test]
    fn reduce_fractions() {
        assert_eq!(simplify_repr("Fraction(p=Integer(n=10), q=Integer(n=5))"), Node::integer(2));
        assert_eq!(simplify_repr("Fraction(p=Integer(n=-6), q=Integer(n=9))"), frac(-2, 3));
        assert_eq!(simplify_repr("Fraction(p=Integer(n=6), q=Integer(n=-9))"), frac(-2, 3));
    }

    #[test]
    fn negative_exponent() {
        let hundredth = simplify_repr("Pow(base=Integer(n=10), exp=Integer(n=-2))");
        assert_eq!(hundredth, frac(1, 100));
        assert_eq!(hundredth.as_decimal().unwrap().eval().unwrap(), 0.01);

        let reciprocal = x().pow(Node::integer(-1)).simplified_with(&stub()).unwrap();
        assert_eq!(reciprocal, Node::fraction(Node::integer(1), x()).unwrap());
    }

    #[test]
    fn binomial_product() {
        let expr = (Node::integer(3) * x() + Node::integer(-8)) * (Node::integer(4) * x() + Node::integer(-1));
        let simplified = expr.simplified_with(&stub()).unwrap();
        assert_eq!(
            simplified,
            Node::integer(12) * x().pow(Node::integer(2)) + (Node::integer(-35) * x() + Node::integer(8)),
        );
        assert_eq!(simplified.latex(), "12x^{2} -35x + 8");

        for (value, expected) in [(0.0, 8.0), (1.0, -15.0), (2.0, -14.0)] {
            let bindings = HashMap::from([("x".to_string(), value)]);
            assert_eq!(simplified.eval_with(&bindings).unwrap(), expected);
        }
    }

    #[test]
    fn sums() {
        let ctxt = stub();
        assert_eq!((x() + Node::integer(0)).simplified_with(&ctxt).unwrap(), x());
        assert_eq!((Node::integer(2) + frac(1, 3)).simplified_with(&ctxt).unwrap(), frac(7, 3));
        assert_eq!((frac(1, 2) + frac(1, 2)).simplified_with(&ctxt).unwrap(), Node::integer(1));
        assert_eq!(
            (Node::integer(1) + Node::decimal(Decimal::float(0.5).unwrap())).simplified_with(&ctxt).unwrap(),
            Node::decimal(Decimal::float(1.5).unwrap()),
        );

        // numbers move to the end of the chain and fold together
        let expr = Node::integer(2) + (x() + Node::integer(3));
        assert_eq!(expr.simplified_with(&ctxt).unwrap(), x() + Node::integer(5));

        // like terms combine, and cancel out
        let expr = Node::integer(2) * x() + (y() + Node::integer(3) * x());
        assert_eq!(expr.simplified_with(&ctxt).unwrap(), y() + Node::integer(5) * x());
        assert_eq!((x() - x()).simplified_with(&ctxt).unwrap(), Node::integer(0));
    }

    #[test]
    fn products() {
        let ctxt = stub();
        assert_eq!((Node::integer(1) * x()).simplified_with(&ctxt).unwrap(), x());
        assert_eq!((x() * Node::integer(0)).simplified_with(&ctxt).unwrap(), Node::integer(0));
        assert_eq!((x() * Node::integer(3)).simplified_with(&ctxt).unwrap(), Node::integer(3) * x());
        assert_eq!((x() * x()).simplified_with(&ctxt).unwrap(), x().pow(Node::integer(2)));
        assert_eq!((y() * x()).simplified_with(&ctxt).unwrap(), x() * y());
        assert_eq!(
            (Node::integer(2) * (Node::integer(3) * x())).simplified_with(&ctxt).unwrap(),
            Node::integer(6) * x(),
        );
        assert_eq!(
            (x() * (Node::integer(2) * x())).simplified_with(&ctxt).unwrap(),
            Node::integer(2) * x().pow(Node::integer(2)),
        );
        assert_eq!(
            (Node::integer(2) * (x() + Node::integer(1))).simplified_with(&ctxt).unwrap(),
            Node::integer(2) * x() + Node::integer(2),
        );
    }

    #[test]
    fn fractions() {
        let ctxt = stub();
        let half_x = Node::fraction(x(), Node::integer(2)).unwrap();
        assert_eq!(half_x.simplified_with(&ctxt).unwrap(), half_x);
        assert_eq!(
            Node::fraction(x(), Node::integer(-2)).unwrap().simplified_with(&ctxt).unwrap(),
            Node::fraction(Node::integer(-1) * x(), Node::integer(2)).unwrap(),
        );
        assert_eq!(
            Node::fraction(Node::integer(4) * x(), Node::integer(6)).unwrap().simplified_with(&ctxt).unwrap(),
            Node::fraction(Node::integer(2) * x(), Node::integer(3)).unwrap(),
        );
        assert_eq!(Node::fraction(x(), x()).unwrap().simplified_with(&ctxt).unwrap(), Node::integer(1));
        assert_eq!(
            Node::fraction(frac(1, 2), frac(3, 4)).unwrap().simplified_with(&ctxt).unwrap(),
            frac(2, 3),
        );
        assert_eq!(
            Node::fraction(Node::fraction(x(), y()).unwrap(), Node::integer(2)).unwrap()
                .simplified_with(&ctxt)
                .unwrap(),
            Node::fraction(x(), Node::integer(2) * y()).unwrap(),
        );
    }

    #[test]
    fn powers() {
        let ctxt = stub();
        assert_eq!(x().pow(Node::integer(0)).simplified_with(&ctxt).unwrap(), Node::integer(1));
        assert_eq!(x().pow(Node::integer(1)).simplified_with(&ctxt).unwrap(), x());
        assert_eq!(Node::integer(2).pow(Node::integer(10)).simplified_with(&ctxt).unwrap(), Node::integer(1024));
        assert_eq!(Node::integer(4).pow(frac(1, 2)).simplified_with(&ctxt).unwrap(), Node::integer(2));
        assert_eq!(Node::integer(8).pow(frac(2, 3)).simplified_with(&ctxt).unwrap(), Node::integer(4));
        assert_eq!(Node::integer(8).pow(frac(1, 2)).simplified_with(&ctxt).unwrap(), Node::integer(8).pow(frac(1, 2)));
        assert_eq!(frac(2, 3).pow(Node::integer(2)).simplified_with(&ctxt).unwrap(), frac(4, 9));
        assert_eq!(
            x().pow(Node::integer(2)).pow(Node::integer(3)).simplified_with(&ctxt).unwrap(),
            x().pow(Node::integer(6)),
        );
        assert_eq!(
            (x() + Node::integer(1)).pow(Node::integer(2)).simplified_with(&ctxt).unwrap(),
            x().pow(Node::integer(2)) + (Node::integer(2) * x() + Node::integer(1)),
        );
    }

    #[test]
    fn relations_and_collections_map_over_children() {
        let ctxt = stub();
        let eq = Node::equality(x() + Node::integer(0), frac(4, 2));
        assert_eq!(eq.simplified_with(&ctxt).unwrap(), Node::equality(x(), Node::integer(2)));

        let f = Function::new("f").unwrap();
        let image = f.apply(Node::collection([frac(2, 4), x() * Node::integer(1)]));
        assert_eq!(
            image.simplified_with(&ctxt).unwrap(),
            f.apply(Node::collection([frac(1, 2), x()])),
        );
    }

    #[test]
    fn unhandled_shapes() {
        // a collection has no sum with a number
        let expr = Node::sum(Node::collection([x(), y()]), Node::integer(1));

        let err = expr.simplified_with(&stub()).unwrap_err();
        assert!(matches!(err, Error::UnhandledSimplification(_)));
        assert!(err.is::<UnhandledShape>());

        let lenient = stub().with_policy(UnhandledPolicy::ReturnUnchanged);
        assert_eq!(expr.simplified_with(&lenient).unwrap(), expr);
    }

    #[test]
    fn backend_fallback() {
        // an Add raised to the third power is left to the backend
        let cube = (x() + Node::integer(1)).pow(Node::integer(3));
        let simplified = cube.simplified().unwrap();
        assert!(simplified.equivalent(&cube).unwrap());
        assert!(cube.simplified_with(&stub()).is_err());
    }

    #[test]
    fn zero_denominator_after_simplification() {
        let expr = Node::fraction(x(), Node::integer(2) + Node::integer(-2)).unwrap();
        let err = expr.simplified_with(&stub()).unwrap_err();
        assert!(matches!(err, Error::UnhandledSimplification(_)));
    }

    #[test]
    fn intervals_are_checked_by_the_context_backend() {
        let backend = GcdOnly::default();
        let compares = Arc::clone(&backend.compares);
        let ctxt = Ctxt::new(backend);

        let interval = Node::interval(frac(2, 2), Node::integer(5), false, true).unwrap();
        let before = compares.load(AtomicOrdering::Relaxed);
        assert_eq!(
            interval.simplified_with(&ctxt).unwrap(),
            Node::interval(Node::integer(1), Node::integer(5), false, true).unwrap(),
        );
        assert_eq!(compares.load(AtomicOrdering::Relaxed), before + 1);

        // the stub cannot order the bounds, so an interval the real backend rejects is kept
        let reversed = Node::interval_with(Node::integer(5), Node::integer(0), true, true, &ctxt);
        assert!(reversed.is_ok());
        assert!(Node::interval(Node::integer(5), Node::integer(0), true, true).is_err());
    }

    #[test]
    fn decimal_coefficients() {
        let decimal = |x: f64| Node::decimal(Decimal::float(x).unwrap());
        let cancelled = (decimal(0.5) + decimal(-0.5)) * x();
        assert_eq!(cancelled.simplified_with(&stub()).unwrap(), Node::integer(0));

        let one = (decimal(0.25) + decimal(0.75)) * x();
        assert_eq!(one.simplified_with(&stub()).unwrap().latex(), "x");

        let tripled = Node::integer(3) * Node::decimal(Decimal::ratio(1, 4).unwrap()) * x();
        assert_eq!(
            tripled.simplified_with(&stub()).unwrap(),
            Node::decimal(Decimal::ratio(3, 4).unwrap()) * x(),
        );
    }
}
