//! The self-description of nodes: their [`Display`] implementation.

use crate::node::{Function, Node, NodeKind};
use std::fmt::{self, Display, Formatter};

/// Writes a string literal in single quotes.
struct Quoted<'a>(&'a str);

impl Display for Quoted<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "'")?;
        for c in self.0.chars() {
            match c {
                '\\' | '\'' => write!(f, "\\{}", c)?,
                '\n' => write!(f, "\\n")?,
                '\t' => write!(f, "\\t")?,
                c => write!(f, "{}", c)?,
            }
        }
        write!(f, "'")
    }
}

/// Writes a boolean the way the notation spells it.
fn flag(value: bool) -> &'static str {
    if value { "True" } else { "False" }
}

/// Writes the items separated by commas.
fn write_list(f: &mut Formatter<'_>, items: &[Node]) -> fmt::Result {
    let mut iter = items.iter();
    if let Some(item) = iter.next() {
        write!(f, "{}", item)?;
        for item in iter {
            write!(f, ", {}", item)?;
        }
    }
    Ok(())
}

/// Writes the self-description of the node: a constructor call that [`from_repr`] reads back into
/// an equal node.
///
/// [`from_repr`]: crate::codec::from_repr
impl Display for Node {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.kind() {
            NodeKind::Integer(n) => write!(f, "Integer(n={})", n),
            NodeKind::Decimal(d) => match d.as_ratio() {
                Some((p, q)) => write!(f, "Decimal(p={}, q={})", p, q),
                None => write!(f, "Decimal(x={:?})", d.value()),
            },
            NodeKind::Symbol(name) => write!(f, "Symbol(s={})", Quoted(name)),
            NodeKind::Pi => write!(f, "Pi()"),
            NodeKind::Inf => write!(f, "Inf()"),
            NodeKind::Add(l, r) => write!(f, "Add(l={}, r={})", l, r),
            NodeKind::Mul(l, r) => write!(f, "Mul(l={}, r={})", l, r),
            NodeKind::Fraction(p, q) => write!(f, "Fraction(p={}, q={})", p, q),
            NodeKind::Pow(base, exp) => write!(f, "Pow(base={}, exp={})", base, exp),
            NodeKind::Equality(l, r) => write!(f, "Equality(l={}, r={})", l, r),
            NodeKind::StrictGreaterThan(l, r) => write!(f, "StrictGreaterThan(l={}, r={})", l, r),
            NodeKind::Interval { left, right, left_open, right_open } => write!(
                f,
                "Interval(l={}, r={}, left_open={}, right_open={})",
                left,
                right,
                flag(*left_open),
                flag(*right_open),
            ),
            NodeKind::Collection(items) => {
                write!(f, "(")?;
                write_list(f, items)?;
                if items.len() == 1 {
                    write!(f, ",")?;
                }
                write!(f, ")")
            },
            NodeKind::Image(function, argument) => match argument.kind() {
                // several arguments are spread; anything else is passed as a single value
                NodeKind::Collection(items) if items.len() >= 2 => {
                    write!(f, "{}(", function)?;
                    write_list(f, items)?;
                    write!(f, ")")
                },
                _ => write!(f, "{}({})", function, argument),
            },
        }
    }
}

impl Display for Function {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Function(name={})", Quoted(self.name()))
    }
}
