//! Numeric evaluation and numeric conversions of nodes.

use crate::{
    ctxt::Ctxt,
    error::{Error, NotEvaluable, UnboundSymbol},
};
use rug::{integer::IsPrime, Integer, Rational};
use std::{cmp::Ordering, collections::HashMap, f64::consts::PI};
use super::{Decimal, Node, NodeKind};

impl Node {
    /// Evaluates the node to a floating value. Symbols have no value; see [`Node::eval_with`].
    pub fn eval(&self) -> Result<f64, Error> {
        self.eval_with(&HashMap::new())
    }

    /// Evaluates the node to a floating value, looking up symbols in `bindings`.
    ///
    /// Relations, intervals, collections and function applications have no numeric value.
    pub fn eval_with(&self, bindings: &HashMap<String, f64>) -> Result<f64, Error> {
        Ok(match self.kind() {
            NodeKind::Integer(n) => n.to_f64(),
            NodeKind::Decimal(d) => d.value(),
            NodeKind::Symbol(name) => *bindings
                .get(name)
                .ok_or_else(|| Error::evaluation(UnboundSymbol { name: name.clone() }))?,
            NodeKind::Pi => PI,
            NodeKind::Inf => f64::INFINITY,
            NodeKind::Add(l, r) => l.eval_with(bindings)? + r.eval_with(bindings)?,
            NodeKind::Mul(l, r) => l.eval_with(bindings)? * r.eval_with(bindings)?,
            NodeKind::Fraction(p, q) => p.eval_with(bindings)? / q.eval_with(bindings)?,
            NodeKind::Pow(base, exp) => base.eval_with(bindings)?.powf(exp.eval_with(bindings)?),
            kind => return Err(Error::evaluation(NotEvaluable { kind: kind.name() })),
        })
    }

    /// Converts the node to a decimal.
    ///
    /// An integer becomes a floating decimal, and a fraction of two integers becomes the exact
    /// decimal `p / q`. A decimal is returned as is. Anything else is evaluated.
    pub fn as_decimal(&self) -> Result<Node, Error> {
        let decimal = match self.kind() {
            NodeKind::Decimal(_) => return Ok(self.clone()),
            NodeKind::Integer(n) => Decimal::float(n.to_f64())?,
            NodeKind::Fraction(p, q) => match (p.as_integer(), q.as_integer()) {
                (Some(p), Some(q)) => Decimal::ratio(p.clone(), q.clone())?,
                _ => Decimal::float(self.eval()?)?,
            },
            _ => Decimal::float(self.eval()?)?,
        };
        Ok(Node::decimal(decimal))
    }

    /// Converts the node to a percentage, that is, multiplies its value by 100.
    ///
    /// The result is an integer when the percentage is a whole number, and a decimal otherwise.
    pub fn as_percent(&self) -> Result<Node, Error> {
        let exact = match self.kind() {
            NodeKind::Integer(n) => Some(Rational::from(n.clone())),
            NodeKind::Decimal(d) => d.to_rational(),
            NodeKind::Fraction(p, q) => match (p.as_integer(), q.as_integer()) {
                (Some(p), Some(q)) if !q.is_zero() => Some(Rational::from((p.clone(), q.clone()))),
                _ => None,
            },
            _ => None,
        };

        match exact.map(|value| value * 100u32) {
            Some(percent) if *percent.denom() == 1 => Ok(Node::integer(percent.into_numer_denom().0)),
            Some(percent) => Ok(Node::decimal(Decimal::float(percent.to_f64())?)),
            None => {
                let percent = 100.0 * self.eval()?;
                if percent.fract() == 0.0 && percent.abs() < 1e15 {
                    Ok(Node::integer(percent as i64))
                } else {
                    Ok(Node::decimal(Decimal::float(percent)?))
                }
            },
        }
    }

    /// Returns the distinct prime factors of an integer, in ascending order. The sign is ignored,
    /// so `-12` has the prime factors `2` and `3`. Returns [`None`] if the node is not an integer.
    pub fn prime_factors(&self) -> Option<Vec<Integer>> {
        let mut n = self.as_integer()?.clone().abs();
        let mut factors = Vec::new();
        let mut divisor = Integer::from(2);

        while n > 1 {
            // what is left has no factor below the divisor
            if Integer::from(divisor.square_ref()) > n || n.is_probably_prime(30) != IsPrime::No {
                factors.push(n);
                break;
            }

            if n.is_divisible(&divisor) {
                while n.is_divisible(&divisor) {
                    n /= &divisor;
                }
                factors.push(divisor.clone());
            }
            divisor += if divisor == 2 { 1 } else { 2 };
        }

        Some(factors)
    }

    /// Returns true if the two nodes have the same value, using the [global
    /// context](Ctxt::global).
    pub fn equivalent(&self, other: &Node) -> Result<bool, Error> {
        self.equivalent_with(other, Ctxt::global())
    }

    /// Returns true if the two nodes have the same value.
    ///
    /// Both backend expressions are simplified and expanded, then compared. If they differ but
    /// both are constants, their numeric values are compared instead.
    pub fn equivalent_with(&self, other: &Node, ctxt: &Ctxt) -> Result<bool, Error> {
        let lhs = ctxt.backend.simplify_and_expand(self.backend()).map_err(Error::UnhandledSimplification)?;
        let rhs = ctxt.backend.simplify_and_expand(other.backend()).map_err(Error::UnhandledSimplification)?;
        if lhs == rhs {
            return Ok(true);
        }

        Ok(lhs.is_constant()
            && rhs.is_constant()
            && ctxt.backend.compare(&lhs, &rhs) == Some(Ordering::Equal))
    }
}

#[cfg(test)]
mod tests {
    use assert_float_eq::assert_float_absolute_eq;
    use pretty_assertions::assert_eq;
    use super::*;

    fn x() -> Node {
        Node::symbol("x").unwrap()
    }

    #[test]
    fn evaluate() {
        let expr = Node::integer(3) * x() + Node::fraction(Node::integer(1), Node::integer(4)).unwrap();
        let bindings = HashMap::from([("x".to_string(), 2.0)]);
        assert_eq!(expr.eval_with(&bindings).unwrap(), 6.25);

        let root = Node::integer(2).pow(Node::fraction(Node::integer(1), Node::integer(2)).unwrap());
        assert_float_absolute_eq!(root.eval().unwrap(), std::f64::consts::SQRT_2, 1e-12);
        assert_float_absolute_eq!((Node::integer(2) * Node::pi()).eval().unwrap(), std::f64::consts::TAU, 1e-12);
        assert_eq!(Node::inf().eval().unwrap(), f64::INFINITY);
    }

    #[test]
    fn unevaluable() {
        assert!(x().eval().unwrap_err().is::<UnboundSymbol>());

        let eq = Node::equality(x(), Node::integer(1));
        let err = eq.eval_with(&HashMap::from([("x".to_string(), 1.0)])).unwrap_err();
        assert!(matches!(err, Error::Evaluation(_)));
        assert!(err.is::<NotEvaluable>());
    }

    #[test]
    fn decimals() {
        let hundredth = Node::fraction(Node::integer(1), Node::integer(100)).unwrap();
        let decimal = hundredth.as_decimal().unwrap();
        assert_eq!(decimal, Node::decimal(Decimal::ratio(1, 100).unwrap()));
        assert_eq!(decimal.eval().unwrap(), 0.01);

        assert_eq!(Node::integer(3).as_decimal().unwrap(), Node::decimal(Decimal::float(3.0).unwrap()));
        assert_eq!(Node::pi().as_decimal().unwrap(), Node::decimal(Decimal::float(PI).unwrap()));
    }

    #[test]
    fn percents() {
        let quarter = Node::fraction(Node::integer(1), Node::integer(4)).unwrap();
        assert_eq!(quarter.as_percent().unwrap(), Node::integer(25));

        let third = Node::fraction(Node::integer(1), Node::integer(3)).unwrap();
        let NodeKind::Decimal(percent) = third.as_percent().unwrap().into_kind() else {
            panic!("expected a decimal");
        };
        assert_float_absolute_eq!(percent.value(), 33.333333333333336, 1e-9);

        assert_eq!(Node::integer(2).as_percent().unwrap(), Node::integer(200));
        let half = Node::decimal(Decimal::float(0.5).unwrap());
        assert_eq!(half.as_percent().unwrap(), Node::integer(50));
    }

    #[test]
    fn prime_factors() {
        assert_eq!(Node::integer(360).prime_factors(), Some(vec![Integer::from(2), Integer::from(3), Integer::from(5)]));
        assert_eq!(Node::integer(-49).prime_factors(), Some(vec![Integer::from(7)]));
        assert_eq!(Node::integer(97).prime_factors(), Some(vec![Integer::from(97)]));
        assert_eq!(Node::integer(1).prime_factors(), Some(vec![]));

        // large factors are found without dividing by every integer below them
        let semiprime = Integer::from(1_000_003) * Integer::from(1_000_033);
        assert_eq!(
            Node::integer(semiprime).prime_factors(),
            Some(vec![Integer::from(1_000_003), Integer::from(1_000_033)]),
        );
        let square = Integer::from(1_000_003) * Integer::from(1_000_003) * 12;
        assert_eq!(
            Node::integer(square).prime_factors(),
            Some(vec![Integer::from(2), Integer::from(3), Integer::from(1_000_003)]),
        );
        let mersenne = (Integer::from(1) << 61) - 1;
        assert_eq!(Node::integer(mersenne.clone()).prime_factors(), Some(vec![mersenne]));
        assert_eq!(x().prime_factors(), None);
    }

    #[test]
    fn equivalence() {
        let expanded = x() * x() + Node::integer(2) * x() + Node::integer(1);
        let factored = (x() + Node::integer(1)).pow(Node::integer(2));
        assert!(expanded.equivalent(&factored).unwrap());
        assert!(!expanded.equivalent(&x()).unwrap());

        let half = Node::fraction(Node::integer(1), Node::integer(2)).unwrap();
        let decimal = Node::decimal(Decimal::float(0.5).unwrap());
        assert!(half.equivalent(&decimal).unwrap());
    }
}
