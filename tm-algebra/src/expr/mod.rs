//! The backend's representation of mathematical expressions.
//!
//! [`SymExpr`] is a flattened tree: sums and products are stored as a single node with any number
//! of children, so that the expression `x + (y + z)` is one [`SymExpr::Add`] with three terms.
//! Subtraction and division do not exist; `a - b` is `a + (-1)*b`, and `a / b` is `a * b^-1`.
//! This makes combining like terms and like factors a matter of scanning a single list.
//!
//! # Strict equality
//!
//! Deciding whether two expressions are mathematically equal is as hard as simplification itself.
//! The [`PartialEq`] implementation of [`SymExpr`] therefore implements **strict equality**, a
//! cheap subset of mathematical equality:
//!
//! - Both expressions must be the same kind of node.
//! - Numbers, symbols and calls must be equal.
//! - [`SymExpr::Add`] and [`SymExpr::Mul`] must have strictly equal terms / factors, **in any
//!   order**.
//! - Every other node must have strictly equal children, in the same order.
//!
//! `x^2 + 2x + 1` and `(x + 1)^2` are not strictly equal. Strict equality never reports false
//! positives, however, so it is safe to use when deciding whether two terms can be combined.

mod from_latex;
mod iter;

pub use from_latex::{from_latex, parse_latex};
pub(crate) use from_latex::make_fraction;

use crate::number::Number;
use iter::ExprIter;
use rug::{Float, Integer, Rational};
use std::{
    cmp::Ordering,
    collections::BTreeSet,
    fmt::{self, Display, Formatter},
    ops::{Add, Mul, Neg},
};
use tm_parser::parser::{latex::BinOpKind, Precedence};

/// A single term / factor, such as a number, variable, or function call.
#[derive(Debug, Clone, PartialEq)]
pub enum Primary {
    /// An integer, such as `2` or `-144`.
    Integer(Integer),

    /// An exact rational number that is not an integer, such as `1/2`.
    Rational(Rational),

    /// A floating-point number, such as `3.14`.
    Float(Float),

    /// A variable, such as `x`.
    Symbol(String),

    /// The constant pi.
    Pi,

    /// Positive infinity.
    Infinity,

    /// A function application, such as `f(x)` or `g(x, y)`.
    Call(String, Vec<SymExpr>),
}

impl Display for Primary {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(num) => write!(f, "{}", num),
            Self::Rational(num) => write!(f, "{}", num),
            Self::Float(num) => write!(f, "{}", num.to_f64()),
            Self::Symbol(sym) => write!(f, "{}", sym),
            Self::Pi => write!(f, "pi"),
            Self::Infinity => write!(f, "inf"),
            Self::Call(name, args) => {
                write!(f, "{}(", name)?;
                write_list(f, args)?;
                write!(f, ")")
            },
        }
    }
}

/// Writes the given expressions separated by commas.
fn write_list(f: &mut Formatter<'_>, exprs: &[SymExpr]) -> fmt::Result {
    let mut iter = exprs.iter();
    if let Some(expr) = iter.next() {
        write!(f, "{}", expr)?;
        for expr in iter {
            write!(f, ", {}", expr)?;
        }
    }
    Ok(())
}

/// A mathematical expression in the backend's flattened representation.
///
/// For more information about this type, see the [module-level documentation](self).
#[derive(Debug, Clone)]
pub enum SymExpr {
    /// A single term or factor.
    Primary(Primary),

    /// Multiple terms added together.
    Add(Vec<SymExpr>),

    /// Multiple factors multiplied together.
    Mul(Vec<SymExpr>),

    /// An expression raised to a power.
    Exp(Box<SymExpr>, Box<SymExpr>),

    /// The equation `lhs = rhs`.
    Eq(Box<SymExpr>, Box<SymExpr>),

    /// The strict inequality `lhs > rhs`.
    Greater(Box<SymExpr>, Box<SymExpr>),

    /// An interval between two bounds.
    Interval {
        left: Box<SymExpr>,
        right: Box<SymExpr>,
        left_open: bool,
        right_open: bool,
    },

    /// An ordered tuple of expressions.
    Tuple(Vec<SymExpr>),
}

impl Display for SymExpr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        /// Writes `expr`, in parentheses if it binds less tightly than `parent`.
        fn write_operand(f: &mut Formatter<'_>, expr: &SymExpr, parent: &SymExpr) -> fmt::Result {
            if matches!(expr.cmp_precedence(parent), Ordering::Less) {
                write!(f, "({})", expr)
            } else {
                write!(f, "{}", expr)
            }
        }

        match self {
            Self::Primary(primary) => write!(f, "{}", primary),
            Self::Add(terms) => {
                let mut iter = terms.iter();
                if let Some(term) = iter.next() {
                    write!(f, "{}", term)?;
                    for term in iter {
                        write!(f, " + {}", term)?;
                    }
                }
                Ok(())
            },
            Self::Mul(factors) => {
                let mut iter = factors.iter();
                if let Some(factor) = iter.next() {
                    write_operand(f, factor, self)?;
                    for factor in iter {
                        write!(f, " * ")?;
                        write_operand(f, factor, self)?;
                    }
                }
                Ok(())
            },
            Self::Exp(base, exp) => {
                // exponentiation is right-associative, so a nested power must be parenthesized
                // on the left
                if matches!(**base, Self::Exp(..)) {
                    write!(f, "({})", base)?;
                } else {
                    write_operand(f, base, self)?;
                }
                write!(f, "^")?;
                write_operand(f, exp, self)
            },
            Self::Eq(lhs, rhs) => write!(f, "{} = {}", lhs, rhs),
            Self::Greater(lhs, rhs) => write!(f, "{} > {}", lhs, rhs),
            Self::Interval { left, right, left_open, right_open } => {
                let open = if *left_open { ']' } else { '[' };
                let close = if *right_open { '[' } else { ']' };
                write!(f, "{}{}; {}{}", open, left, right, close)
            },
            Self::Tuple(items) => {
                write!(f, "(")?;
                write_list(f, items)?;
                write!(f, ")")
            },
        }
    }
}

impl SymExpr {
    /// Returns the precedence of the expression, or [`None`] if it is atomic.
    fn precedence(&self) -> Option<Precedence> {
        match self {
            Self::Primary(Primary::Integer(n)) if n.is_negative() => Some(Precedence::Neg),
            Self::Primary(Primary::Rational(_)) => Some(BinOpKind::Div.precedence()),
            Self::Primary(Primary::Float(n)) if n.is_sign_negative() => Some(Precedence::Neg),
            Self::Primary(_) | Self::Interval { .. } | Self::Tuple(_) => None,
            Self::Add(_) => Some(BinOpKind::Add.precedence()),
            Self::Mul(_) => Some(BinOpKind::Mul.precedence()),
            Self::Exp(_, _) => Some(BinOpKind::Exp.precedence()),
            Self::Eq(_, _) => Some(BinOpKind::Eq.precedence()),
            Self::Greater(_, _) => Some(BinOpKind::Greater.precedence()),
        }
    }

    /// Compares the precedence of this expression with the other expression. A result of
    /// [`Ordering::Less`] means that this expression must be parenthesized when it is printed as
    /// an operand of the other.
    pub fn cmp_precedence(&self, other: &Self) -> Ordering {
        match (self.precedence(), other.precedence()) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(lhs), Some(rhs)) => lhs.partial_cmp(&rhs).unwrap_or(Ordering::Equal),
        }
    }

    /// If the expression is a [`Primary::Integer`], returns a reference to the contained integer.
    pub fn as_integer(&self) -> Option<&Integer> {
        match self {
            Self::Primary(Primary::Integer(int)) => Some(int),
            _ => None,
        }
    }

    /// Returns true if the expression is a [`Primary::Integer`].
    pub fn is_integer(&self) -> bool {
        matches!(self, Self::Primary(Primary::Integer(_)))
    }

    /// Returns true if the expression is a [`Primary::Float`].
    pub fn is_float(&self) -> bool {
        matches!(self, Self::Primary(Primary::Float(_)))
    }

    /// Returns true if the expression is an integer, rational or float.
    pub fn is_number(&self) -> bool {
        matches!(
            self,
            Self::Primary(Primary::Integer(_) | Primary::Rational(_) | Primary::Float(_))
        )
    }

    /// Views the expression as a [`Number`], if it is one.
    pub fn as_number(&self) -> Option<Number> {
        Number::from_expr(self)
    }

    /// If the expression is a [`Primary::Symbol`], returns a reference to the contained symbol.
    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Self::Primary(Primary::Symbol(sym)) => Some(sym),
            _ => None,
        }
    }

    /// Trivially downgrades the expression into a simpler form.
    ///
    /// Some operations may result in an [`SymExpr::Add`] with zero / one term, or an
    /// [`SymExpr::Mul`] with zero / one factor. This function checks for these cases and
    /// simplifies the expression into the single term / factor, or the integer 0 or 1.
    pub fn downgrade(self) -> Self {
        match self {
            Self::Add(mut terms) => {
                if terms.is_empty() {
                    Self::from(Integer::new())
                } else if terms.len() == 1 {
                    terms.remove(0)
                } else {
                    Self::Add(terms)
                }
            },
            Self::Mul(mut factors) => {
                if factors.is_empty() {
                    Self::from(Integer::from(1))
                } else if factors.len() == 1 {
                    factors.remove(0)
                } else {
                    Self::Mul(factors)
                }
            },
            _ => self,
        }
    }

    /// Returns an iterator that traverses the tree of expressions in left-to-right post-order
    /// (i.e. depth-first).
    pub fn post_order_iter(&self) -> ExprIter {
        ExprIter::new(self)
    }

    /// Returns the names of every symbol in the expression, in alphabetical order. Function names
    /// are not symbols.
    pub fn free_symbols(&self) -> BTreeSet<String> {
        self.post_order_iter()
            .filter_map(|expr| expr.as_symbol().map(str::to_string))
            .collect()
    }

    /// Returns true if the expression contains no symbols at all.
    pub fn is_constant(&self) -> bool {
        self.post_order_iter().all(|expr| expr.as_symbol().is_none())
    }

    /// Returns `self^exp`. No simplification is done.
    pub fn pow(self, exp: SymExpr) -> Self {
        Self::Exp(Box::new(self), Box::new(exp))
    }

    /// Returns `self^-1`. No simplification is done.
    pub fn recip(self) -> Self {
        self.pow(Self::from(Integer::from(-1)))
    }
}

/// Checks if two expressions are **strictly** equal.
///
/// For more information about strict equality, see the [module-level documentation](self).
impl PartialEq for SymExpr {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Primary(lhs), Self::Primary(rhs)) => lhs == rhs,
            (Self::Add(lhs), Self::Add(rhs)) | (Self::Mul(lhs), Self::Mul(rhs)) => {
                lhs.len() == rhs.len()
                    && lhs.iter().all(|lhs| rhs.contains(lhs))
                    && rhs.iter().all(|rhs| lhs.contains(rhs))
            },
            (Self::Exp(lhs_base, lhs_exp), Self::Exp(rhs_base, rhs_exp)) => {
                lhs_base == rhs_base && lhs_exp == rhs_exp
            },
            (Self::Eq(a, b), Self::Eq(c, d)) | (Self::Greater(a, b), Self::Greater(c, d)) => {
                a == c && b == d
            },
            (
                Self::Interval { left: a, right: b, left_open: a_open, right_open: b_open },
                Self::Interval { left: c, right: d, left_open: c_open, right_open: d_open },
            ) => a == c && b == d && a_open == c_open && b_open == d_open,
            (Self::Tuple(lhs), Self::Tuple(rhs)) => lhs == rhs,
            _ => false,
        }
    }
}

impl From<Integer> for SymExpr {
    fn from(n: Integer) -> Self {
        Self::Primary(Primary::Integer(n))
    }
}

impl From<Rational> for SymExpr {
    fn from(n: Rational) -> Self {
        Number::Rational(n).into_expr()
    }
}

impl From<Float> for SymExpr {
    fn from(n: Float) -> Self {
        Self::Primary(Primary::Float(n))
    }
}

impl From<Primary> for SymExpr {
    fn from(primary: Primary) -> Self {
        Self::Primary(primary)
    }
}

/// Adds two [`SymExpr`]s together. No simplification is done, except that operands which are
/// already sums are combined in one list of terms (flattening).
impl Add for SymExpr {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (Self::Add(mut terms), Self::Add(rhs_terms)) => {
                terms.extend(rhs_terms);
                Self::Add(terms)
            },
            (Self::Add(mut terms), other) => {
                terms.push(other);
                Self::Add(terms)
            },
            (other, Self::Add(mut terms)) => {
                terms.insert(0, other);
                Self::Add(terms)
            },
            (lhs, rhs) => Self::Add(vec![lhs, rhs]),
        }
    }
}

/// Multiplies two [`SymExpr`]s together. No simplification is done, except that operands which
/// are already products are combined in one list of factors (flattening).
impl Mul for SymExpr {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        match (self, rhs) {
            (Self::Mul(mut factors), Self::Mul(other)) => {
                factors.extend(other);
                Self::Mul(factors)
            },
            (Self::Mul(mut factors), other) => {
                factors.push(other);
                Self::Mul(factors)
            },
            (other, Self::Mul(mut factors)) => {
                factors.insert(0, other);
                Self::Mul(factors)
            },
            (lhs, rhs) => Self::Mul(vec![lhs, rhs]),
        }
    }
}

/// Multiplies this expression by -1. No simplification is done, except for the case where the
/// expression is a number, in which case the number is negated.
impl Neg for SymExpr {
    type Output = Self;

    fn neg(self) -> Self::Output {
        match Number::from_expr(&self) {
            Some(number) => (-number).into_expr(),
            None => Self::from(Integer::from(-1)) * self,
        }
    }
}
