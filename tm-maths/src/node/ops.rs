//! Operators that build trees. None of them simplify anything, so `Node::integer(1) +
//! Node::integer(2)` is the tree `Add(1, 2)`, not `3`.

use crate::error::Error;
use std::ops::{Add, Mul, Neg, Sub};
use super::{Node, NodeKind};

/// Negates the node. An integer is negated directly, the negation of a negation `-1 * x` is `x`,
/// and anything else becomes `-1 * x`.
impl Neg for Node {
    type Output = Node;

    fn neg(self) -> Self::Output {
        match self.into_kind() {
            NodeKind::Integer(n) => Node::integer(-n),
            NodeKind::Mul(l, r) if l.is_int(-1) => *r,
            kind => Node::product(Node::integer(-1), Node::new(kind)),
        }
    }
}

impl Add for Node {
    type Output = Node;

    fn add(self, rhs: Self) -> Self::Output {
        Node::sum(self, rhs)
    }
}

/// Builds `self + (-rhs)`.
impl Sub for Node {
    type Output = Node;

    fn sub(self, rhs: Self) -> Self::Output {
        Node::sum(self, -rhs)
    }
}

impl Mul for Node {
    type Output = Node;

    fn mul(self, rhs: Self) -> Self::Output {
        Node::product(self, rhs)
    }
}

impl Node {
    /// Builds `self / rhs`. Fails if `rhs` is a literal zero.
    pub fn div(self, rhs: Node) -> Result<Node, Error> {
        Node::fraction(self, rhs)
    }

    /// Builds `self ^ exp`.
    pub fn pow(self, exp: Node) -> Node {
        Node::power(self, exp)
    }

    /// Builds `self > rhs`.
    pub fn gt(self, rhs: Node) -> Node {
        Node::greater_than(self, rhs)
    }

    /// Builds `rhs > self`, which is how `self < rhs` is represented.
    pub fn lt(self, rhs: Node) -> Node {
        Node::greater_than(rhs, self)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn x() -> Node {
        Node::symbol("x").unwrap()
    }

    #[test]
    fn negation() {
        assert_eq!(-Node::integer(5), Node::integer(-5));
        assert_eq!(-x(), Node::product(Node::integer(-1), x()));
        assert_eq!(-(-x()), x());
        assert_eq!(-Node::pi(), Node::product(Node::integer(-1), Node::pi()));
    }

    #[test]
    fn subtraction_adds_negation() {
        assert_eq!(x() - Node::integer(3), Node::sum(x(), Node::integer(-3)));
        assert_eq!(
            Node::integer(3) - x(),
            Node::sum(Node::integer(3), Node::product(Node::integer(-1), x())),
        );
    }

    #[test]
    fn comparisons() {
        let five = Node::integer(5);
        assert_eq!(x().gt(five.clone()), Node::greater_than(x(), five.clone()));
        assert_eq!(x().lt(five.clone()), Node::greater_than(five, x()));
    }

    #[test]
    fn division() {
        assert!(x().div(Node::integer(0)).is_err());
        assert_eq!(
            x().div(Node::integer(2)).unwrap(),
            Node::fraction(x(), Node::integer(2)).unwrap(),
        );
    }
}
