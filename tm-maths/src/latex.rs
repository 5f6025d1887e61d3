//! Rendering of expression trees as display markup.
//!
//! The output is the LaTeX subset that the correction workflow compares answers with, so its
//! conventions are fixed:
//!
//! - fractions use `\dfrac{..}{..}`, and a negative integer numerator moves its sign in front;
//! - an exponent of exactly `1/2` renders as `\sqrt{..}`, any other as a superscript `^{..}`;
//! - a numeric coefficient is written next to a symbol or power without a mark (`3x`), and a
//!   coefficient of `1` is dropped entirely;
//! - `\times` separates two numbers and two parenthesized compounds;
//! - adding a negative term renders as subtraction.
//!
//! Parentheses are written as `\left( .. \right)`.

use crate::node::{Decimal, Node, NodeKind};
use tm_parser::parser::latex::atom::{FUNCTION_COMMANDS, SYMBOL_COMMANDS};

/// Wraps the markup in `\left( .. \right)`.
fn paren(inner: &str) -> String {
    format!(r"\left({}\right)", inner)
}

/// Returns true if the markup ends with a command, such as `\pi`, so that a letter written right
/// after it would change the command's name.
fn ends_with_command(markup: &str) -> bool {
    let letters = markup.trim_end_matches(|c: char| c.is_ascii_alphabetic());
    letters.len() < markup.len() && letters.ends_with('\\')
}

/// Returns true if the node is a negative number, whose sign would be ambiguous next to an
/// operator.
fn is_negative_number(node: &Node) -> bool {
    match node.kind() {
        NodeKind::Integer(n) => n.is_negative(),
        NodeKind::Decimal(d) => d.value() < 0.0,
        NodeKind::Fraction(p, _) => node.is_number() && p.as_integer().map_or(false, |p| p.is_negative()),
        _ => false,
    }
}

fn decimal(d: &Decimal) -> String {
    let value = d.value();
    if value == 0.0 {
        // also covers negative zero
        "0".to_string()
    } else {
        format!("{}", value)
    }
}

fn fraction(p: &Node, q: &Node) -> String {
    match p.as_integer() {
        Some(n) if n.is_negative() => format!(r"-\dfrac{{{}}}{{{}}}", n.clone().abs(), q.latex()),
        _ => format!(r"\dfrac{{{}}}{{{}}}", p.latex(), q.latex()),
    }
}

fn power(base: &Node, exp: &Node) -> String {
    if let NodeKind::Fraction(p, q) = exp.kind() {
        if p.is_int(1) && q.is_int(2) {
            return format!(r"\sqrt{{{}}}", base.latex());
        }
    }

    let base_markup = match base.kind() {
        NodeKind::Add(..) | NodeKind::Mul(..) | NodeKind::Fraction(..) | NodeKind::Pow(..) => {
            paren(&base.latex())
        },
        _ if is_negative_number(base) => paren(&base.latex()),
        _ => base.latex(),
    };
    format!("{}^{{{}}}", base_markup, exp.latex())
}

fn product(l: &Node, r: &Node) -> String {
    let right = r.latex();

    if l.is_int(-1) {
        return if matches!(r.kind(), NodeKind::Add(..)) || right.starts_with('-') {
            format!("-{}", paren(&right))
        } else {
            format!("-{}", right)
        };
    }

    let coefficient_notation = matches!(r.kind(), NodeKind::Symbol(_) | NodeKind::Pow(..));
    if l.is_int(1) && coefficient_notation {
        return right;
    }

    let left = match l.kind() {
        NodeKind::Add(..) => paren(&l.latex()),
        _ => l.latex(),
    };
    let right = if matches!(r.kind(), NodeKind::Add(..)) || right.starts_with('-') {
        paren(&right)
    } else {
        right
    };

    let compound = |node: &Node| matches!(node.kind(), NodeKind::Add(..) | NodeKind::Mul(..));
    if l.is_number() && coefficient_notation {
        format!("{}{}", left, right)
    } else if l.is_number() && r.is_number() || compound(l) && compound(r) {
        format!(r"{} \times {}", left, right)
    } else if right.starts_with(|c: char| c.is_ascii_digit() || c == '.') {
        // juxtaposed digits would read as one number
        format!(r"{} \times {}", left, right)
    } else if ends_with_command(&left) && right.starts_with(|c: char| c.is_ascii_alphabetic()) {
        format!("{} {}", left, right)
    } else {
        format!("{}{}", left, right)
    }
}

fn sum(l: &Node, r: &Node) -> String {
    let left = l.latex();

    if let NodeKind::Mul(m, inner) = r.kind() {
        if m.is_int(-1) {
            let complex = match inner.kind() {
                NodeKind::Add(..) | NodeKind::Fraction(..) => true,
                NodeKind::Mul(factor, _) => !factor.is_int(-1),
                _ => false,
            };
            if complex {
                return format!("{} - {}", left, paren(&inner.latex()));
            }
        }
    }

    let right = r.latex();
    if right.starts_with('-') {
        format!("{} {}", left, right)
    } else {
        format!("{} + {}", left, right)
    }
}

/// Writes the items separated by commas.
fn list(items: &[Node]) -> String {
    items.iter().map(Node::latex).collect::<Vec<_>>().join(", ")
}

impl Node {
    /// Renders the node as display markup.
    ///
    /// ```
    /// use tm_maths::Node;
    ///
    /// let x = Node::symbol("x").unwrap();
    /// let half = Node::fraction(Node::integer(1), Node::integer(2)).unwrap();
    /// assert_eq!((half * x).latex(), r"\dfrac{1}{2}x");
    /// ```
    pub fn latex(&self) -> String {
        match self.kind() {
            NodeKind::Integer(n) => n.to_string(),
            NodeKind::Decimal(d) => decimal(d),
            NodeKind::Symbol(name) if SYMBOL_COMMANDS.contains(&name.as_str()) => format!(r"\{}", name),
            NodeKind::Symbol(name) => name.clone(),
            NodeKind::Pi => r"\pi".to_string(),
            NodeKind::Inf => r"\infty".to_string(),
            NodeKind::Add(l, r) => sum(l, r),
            NodeKind::Mul(l, r) => product(l, r),
            NodeKind::Fraction(p, q) => fraction(p, q),
            NodeKind::Pow(base, exp) => power(base, exp),
            NodeKind::Equality(l, r) => format!("{} = {}", l.latex(), r.latex()),
            NodeKind::StrictGreaterThan(l, r) => format!("{} > {}", l.latex(), r.latex()),
            // open and closed bounds share the same glyphs
            NodeKind::Interval { left, right, .. } => {
                format!(r"\lbracket {}; {}\rbracket", left.latex(), right.latex())
            },
            NodeKind::Collection(items) => paren(&list(items)),
            NodeKind::Image(function, argument) => {
                let name = if FUNCTION_COMMANDS.contains(&function.name()) {
                    format!(r"\{}", function.name())
                } else {
                    function.name().to_string()
                };
                match argument.kind() {
                    NodeKind::Collection(items) if items.len() >= 2 => format!("{}({})", name, list(items)),
                    _ => format!("{}({})", name, argument.latex()),
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::node::Function;
    use pretty_assertions::assert_eq;
    use super::*;

    fn x() -> Node {
        Node::symbol("x").unwrap()
    }

    fn frac(p: i32, q: i32) -> Node {
        Node::fraction(Node::integer(p), Node::integer(q)).unwrap()
    }

    #[test]
    fn atoms() {
        assert_eq!(Node::integer(-12).latex(), "-12");
        assert_eq!(Node::decimal(Decimal::float(3.0).unwrap()).latex(), "3");
        assert_eq!(Node::decimal(Decimal::float(-0.0).unwrap()).latex(), "0");
        assert_eq!(Node::decimal(Decimal::ratio(1, 4).unwrap()).latex(), "0.25");
        assert_eq!(Node::pi().latex(), r"\pi");
        assert_eq!(Node::inf().latex(), r"\infty");
        assert_eq!(Node::symbol("alpha").unwrap().latex(), r"\alpha");
    }

    #[test]
    fn fractions_and_radicals() {
        assert_eq!(frac(1, 2).latex(), r"\dfrac{1}{2}");
        assert_eq!(frac(-2, 3).latex(), r"-\dfrac{2}{3}");
        assert_eq!(Node::integer(4).pow(frac(1, 2)).latex(), r"\sqrt{4}");
        assert_eq!(x().pow(frac(1, 3)).latex(), r"x^{\dfrac{1}{3}}");
        assert_eq!((x() + Node::integer(1)).pow(Node::integer(3)).latex(), r"\left(x + 1\right)^{3}");
        assert_eq!(Node::integer(-2).pow(Node::integer(2)).latex(), r"\left(-2\right)^{2}");
    }

    #[test]
    fn products() {
        assert_eq!((Node::integer(3) * x()).latex(), "3x");
        assert_eq!((Node::integer(1) * x()).latex(), "x");
        assert_eq!((Node::integer(-1) * x()).latex(), "-x");
        assert_eq!((Node::integer(3) * x().pow(Node::integer(2))).latex(), "3x^{2}");
        assert_eq!((Node::integer(2) * Node::integer(-3)).latex(), r"2 \times \left(-3\right)");
        assert_eq!((frac(1, 2) * Node::integer(3)).latex(), r"\dfrac{1}{2} \times 3");
        assert_eq!((x() * Node::integer(2)).latex(), r"x \times 2");
        assert_eq!((Node::pi() * x()).latex(), r"\pi x");
        assert_eq!((Node::integer(2) * Node::pi()).latex(), r"2\pi");
        assert_eq!(
            ((x() + Node::integer(1)) * (x() + Node::integer(-1))).latex(),
            r"\left(x + 1\right) \times \left(x -1\right)",
        );
        assert_eq!((Node::integer(-1) * (x() + Node::integer(1))).latex(), r"-\left(x + 1\right)");
    }

    #[test]
    fn sums() {
        assert_eq!((x() + Node::integer(-5)).latex(), "x -5");
        assert_eq!((x() + Node::integer(5)).latex(), "x + 5");
        assert_eq!((x() - Node::symbol("y").unwrap()).latex(), "x -y");

        let y = Node::symbol("y").unwrap();
        let z = Node::symbol("z").unwrap();
        assert_eq!((x() - (y + z)).latex(), r"x - \left(y + z\right)");

        let polynomial = Node::integer(12) * x().pow(Node::integer(2))
            + (Node::integer(-35) * x() + Node::integer(8));
        assert_eq!(polynomial.latex(), "12x^{2} -35x + 8");
    }

    #[test]
    fn no_doubled_sign() {
        let root = Node::integer(8).pow(frac(1, 2));
        let group = Node::integer(-8) + Node::fraction(Node::integer(1), root).unwrap();
        let expr = Node::sum(x(), Node::product(Node::integer(-1), group));
        assert_eq!(expr.latex(), r"x - \left(-8 + \dfrac{1}{\sqrt{8}}\right)");
        assert_eq!(expr.latex().matches(" - ").count(), 1);
    }

    #[test]
    fn relations_sets_and_applications() {
        assert_eq!(Node::equality(x(), Node::integer(2)).latex(), "x = 2");
        assert_eq!(x().lt(Node::integer(2)).latex(), "2 > x");

        let interval = Node::interval(Node::integer(0), Node::inf(), false, true).unwrap();
        assert_eq!(interval.latex(), r"\lbracket 0; \infty\rbracket");

        let pair = Node::collection([x(), Node::integer(2)]);
        assert_eq!(pair.latex(), r"\left(x, 2\right)");

        let f = Function::new("f").unwrap();
        assert_eq!(f.apply(x()).latex(), "f(x)");
        assert_eq!(f.apply(pair).latex(), "f(x, 2)");
        assert_eq!(Function::new("sin").unwrap().apply(x()).latex(), r"\sin(x)");
    }
}
