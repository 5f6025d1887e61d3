//! The expression tree.
//!
//! A [`Node`] is an immutable value representing one mathematical expression. Its shape is
//! described by a [`NodeKind`]; compound kinds own their children by value, so trees have no
//! sharing and no cycles.
//!
//! Every node also carries its **backend expression**: the same value, translated into the
//! [`SymExpr`] representation of the algebra backend. It is computed once when the node is
//! built, from the backend expressions of the children, and is never simplified, so it keeps the
//! structure of the tree until simplification is explicitly requested.
//!
//! Nodes are built with the constructors on [`Node`], which check the invariants of each kind and
//! fail with [`Error::Validation`] instead of coercing their input. Operator overloads (`+`, `-`,
//! `*` and unary `-`) build unsimplified trees as well:
//!
//! ```
//! use tm_maths::Node;
//!
//! let x = Node::symbol("x").unwrap();
//! let expr = Node::integer(3) * x - Node::integer(8);
//! assert_eq!(expr.latex(), "3x -8");
//! ```
//!
//! Note that [`Function`] is not a node: a function label can only be *applied* to produce a
//! [`NodeKind::Image`], so it can never appear as an operand.

pub mod decimal;
mod eval;
pub mod function;
mod ops;

pub use decimal::Decimal;
pub use function::Function;

use crate::{
    codec::backend::to_backend,
    ctxt::Ctxt,
    error::{EmptyInterval, EmptyName, Error, ZeroDenominator},
};
use rug::Integer;
use std::cmp::Ordering;
use tm_algebra::SymExpr;

/// The shape of a [`Node`].
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// An integer, such as `-12`.
    Integer(Integer),

    /// A decimal number, either as an exact ratio or as a floating value.
    Decimal(Decimal),

    /// A variable, such as `x`.
    Symbol(String),

    /// The constant pi.
    Pi,

    /// Positive infinity.
    Inf,

    /// `left + right`.
    Add(Box<Node>, Box<Node>),

    /// `left * right`.
    Mul(Box<Node>, Box<Node>),

    /// `numerator / denominator`.
    Fraction(Box<Node>, Box<Node>),

    /// `base ^ exponent`.
    Pow(Box<Node>, Box<Node>),

    /// `left = right`.
    Equality(Box<Node>, Box<Node>),

    /// `left > right`.
    StrictGreaterThan(Box<Node>, Box<Node>),

    /// The set of values between two bounds.
    Interval {
        left: Box<Node>,
        right: Box<Node>,
        left_open: bool,
        right_open: bool,
    },

    /// An ordered tuple of expressions.
    Collection(Vec<Node>),

    /// A function applied to an argument. The argument is a [`NodeKind::Collection`] if the
    /// function takes several.
    Image(Function, Box<Node>),
}

impl NodeKind {
    /// Returns the name of the kind, as used by the self-description notation.
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::Integer(_) => "Integer",
            NodeKind::Decimal(_) => "Decimal",
            NodeKind::Symbol(_) => "Symbol",
            NodeKind::Pi => "Pi",
            NodeKind::Inf => "Inf",
            NodeKind::Add(..) => "Add",
            NodeKind::Mul(..) => "Mul",
            NodeKind::Fraction(..) => "Fraction",
            NodeKind::Pow(..) => "Pow",
            NodeKind::Equality(..) => "Equality",
            NodeKind::StrictGreaterThan(..) => "StrictGreaterThan",
            NodeKind::Interval { .. } => "Interval",
            NodeKind::Collection(_) => "Collection",
            NodeKind::Image(..) => "Image",
        }
    }
}

/// An immutable expression tree, together with its backend expression.
///
/// Two nodes are equal if their trees are structurally equal; `x + y` and `y + x` are different
/// nodes. See the [module-level documentation](self) for more information.
#[derive(Debug, Clone)]
pub struct Node {
    kind: NodeKind,
    backend: SymExpr,
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
    }
}

impl Node {
    /// Creates a node of the given kind, computing its backend expression.
    fn new(kind: NodeKind) -> Self {
        let backend = to_backend(&kind);
        Self { kind, backend }
    }

    /// Creates an integer.
    pub fn integer<T>(n: T) -> Self
    where
        Integer: From<T>,
    {
        Self::new(NodeKind::Integer(Integer::from(n)))
    }

    /// Creates a decimal. Use [`Decimal::ratio`] or [`Decimal::float`] to build the value.
    pub fn decimal(decimal: Decimal) -> Self {
        Self::new(NodeKind::Decimal(decimal))
    }

    /// Creates a symbol. The name cannot be empty.
    pub fn symbol(name: impl Into<String>) -> Result<Self, Error> {
        let name = name.into();
        if name.is_empty() {
            return Err(Error::validation(EmptyName { what: "symbol" }));
        }
        Ok(Self::new(NodeKind::Symbol(name)))
    }

    /// Creates the constant pi.
    pub fn pi() -> Self {
        Self::new(NodeKind::Pi)
    }

    /// Creates positive infinity.
    pub fn inf() -> Self {
        Self::new(NodeKind::Inf)
    }

    /// Creates `left + right`.
    pub fn sum(left: Node, right: Node) -> Self {
        Self::new(NodeKind::Add(Box::new(left), Box::new(right)))
    }

    /// Creates `left * right`.
    pub fn product(left: Node, right: Node) -> Self {
        Self::new(NodeKind::Mul(Box::new(left), Box::new(right)))
    }

    /// Creates `numerator / denominator`. The denominator cannot be a literal zero.
    pub fn fraction(numerator: Node, denominator: Node) -> Result<Self, Error> {
        if denominator.is_zero() {
            return Err(Error::validation(ZeroDenominator));
        }
        Ok(Self::new(NodeKind::Fraction(Box::new(numerator), Box::new(denominator))))
    }

    /// Creates `base ^ exponent`.
    pub fn power(base: Node, exponent: Node) -> Self {
        Self::new(NodeKind::Pow(Box::new(base), Box::new(exponent)))
    }

    /// Creates the equation `left = right`.
    pub fn equality(left: Node, right: Node) -> Self {
        Self::new(NodeKind::Equality(Box::new(left), Box::new(right)))
    }

    /// Creates the strict inequality `left > right`.
    pub fn greater_than(left: Node, right: Node) -> Self {
        Self::new(NodeKind::StrictGreaterThan(Box::new(left), Box::new(right)))
    }

    /// Creates an interval, checking its bounds with the [global context](Ctxt::global).
    pub fn interval(left: Node, right: Node, left_open: bool, right_open: bool) -> Result<Self, Error> {
        Self::interval_with(left, right, left_open, right_open, Ctxt::global())
    }

    /// Creates an interval.
    ///
    /// The interval is rejected if the algebra backend of the context can tell that it is empty,
    /// that is, if `left >= right`. Bounds that have no numeric value, such as symbols, are
    /// accepted.
    pub fn interval_with(
        left: Node,
        right: Node,
        left_open: bool,
        right_open: bool,
        ctxt: &Ctxt,
    ) -> Result<Self, Error> {
        if let Some(Ordering::Greater | Ordering::Equal) = ctxt
            .backend
            .compare(left.backend(), right.backend())
        {
            return Err(Error::validation(EmptyInterval {
                left: left.latex(),
                right: right.latex(),
            }));
        }
        Ok(Self::new(NodeKind::Interval {
            left: Box::new(left),
            right: Box::new(right),
            left_open,
            right_open,
        }))
    }

    /// Creates a tuple of expressions.
    pub fn collection(elements: impl IntoIterator<Item = Node>) -> Self {
        Self::new(NodeKind::Collection(elements.into_iter().collect()))
    }

    /// Creates the application of a function to an argument. See also [`Function::apply`].
    pub fn image(function: Function, argument: Node) -> Self {
        Self::new(NodeKind::Image(function, Box::new(argument)))
    }

    /// Returns the shape of the node.
    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// Consumes the node, returning its shape.
    pub fn into_kind(self) -> NodeKind {
        self.kind
    }

    /// Returns the backend expression of the node.
    pub fn backend(&self) -> &SymExpr {
        &self.backend
    }

    /// If the node is an integer, returns it.
    pub fn as_integer(&self) -> Option<&Integer> {
        match &self.kind {
            NodeKind::Integer(n) => Some(n),
            _ => None,
        }
    }

    /// Returns true if the node is a number: an integer, a decimal, or a fraction of two
    /// integers.
    pub fn is_number(&self) -> bool {
        match &self.kind {
            NodeKind::Integer(_) | NodeKind::Decimal(_) => true,
            NodeKind::Fraction(p, q) => p.as_integer().is_some() && q.as_integer().is_some(),
            _ => false,
        }
    }

    /// Returns true if the node is the integer zero, or a decimal equal to zero.
    pub fn is_zero(&self) -> bool {
        match &self.kind {
            NodeKind::Integer(n) => n.is_zero(),
            NodeKind::Decimal(d) => d.is_zero(),
            _ => false,
        }
    }

    /// Returns true if the node is the integer `n`.
    pub(crate) fn is_int(&self, n: i32) -> bool {
        self.as_integer().map(|int| *int == n).unwrap_or(false)
    }
}
