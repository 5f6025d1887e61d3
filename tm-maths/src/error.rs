//! The error taxonomy of expression trees, and the kinds of errors in each category.
//!
//! Every fallible operation of this crate returns an [`Error`], which says *which stage* failed:
//! building a node, reading text, simplifying or evaluating. The wrapped [`tm_error::Error`]
//! carries the concrete kind (one of the structs below) and, for errors that come from text, the
//! spans to highlight.

use ariadne::Fmt;
use std::fmt::{self, Display, Formatter};
use tm_attrs::ErrorKind;
use tm_error::EXPR;

/// An error produced by this crate.
#[derive(Debug)]
pub enum Error {
    /// A constructor was given arguments that violate one of the invariants of its node.
    Validation(tm_error::Error),

    /// Text or a backend expression could not be interpreted as an expression tree.
    Parse(tm_error::Error),

    /// No rewrite rule applies to the node, and the algebra backend could not simplify it either.
    UnhandledSimplification(tm_error::Error),

    /// The node has no numeric value.
    Evaluation(tm_error::Error),
}

impl Error {
    /// Creates a [`Error::Validation`] error that is not associated with any source text.
    pub(crate) fn validation(kind: impl tm_error::ErrorKind + 'static) -> Self {
        Self::Validation(tm_error::Error::unspanned(kind))
    }

    /// Creates a [`Error::Evaluation`] error that is not associated with any source text.
    pub(crate) fn evaluation(kind: impl tm_error::ErrorKind + 'static) -> Self {
        Self::Evaluation(tm_error::Error::unspanned(kind))
    }

    /// Returns the underlying error, whatever its category.
    pub fn inner(&self) -> &tm_error::Error {
        match self {
            Self::Validation(err)
            | Self::Parse(err)
            | Self::UnhandledSimplification(err)
            | Self::Evaluation(err) => err,
        }
    }

    /// Returns true if the concrete error kind is of type `K`.
    pub fn is<K: tm_error::ErrorKind + 'static>(&self) -> bool {
        self.inner().is::<K>()
    }

    /// Renders a report for this error against the text it came from.
    pub fn report_to_string(&self, src_id: &str, src: &str) -> String {
        self.inner().report_to_string(src_id, src)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.inner())
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.inner())
    }
}

/// A symbol or function label was given an empty name.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(message = format!("the name of a {} cannot be empty", what))]
pub struct EmptyName {
    /// What was being named, such as `"symbol"`.
    pub what: &'static str,
}

/// The denominator of a fraction is the literal zero.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(message = "denominator cannot be zero")]
pub struct ZeroDenominator;

/// A decimal was given both of its forms, or neither.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "a decimal needs either `x`, or both `p` and `q`",
    help = format!("use {} or {}", "Decimal(x=0.5)".fg(EXPR), "Decimal(p=1, q=2)".fg(EXPR)),
)]
pub struct DecimalForm;

/// A decimal was given a value that is infinite or not a number.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(message = format!("`{}` is not a finite decimal", value))]
pub struct NonFiniteDecimal {
    /// The rejected value.
    pub value: f64,
}

/// The bounds of an interval describe an empty set.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("the interval from `{}` to `{}` is empty", left, right),
    help = "the left bound must be strictly less than the right bound",
)]
pub struct EmptyInterval {
    pub left: String,
    pub right: String,
}

/// A constructor name that does not exist.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("unknown constructor `{}`", name),
    labels = ["this constructor"],
    help = if suggestions.is_empty() {
        "see the documentation of `tm_maths::codec` for the list of constructors".to_string()
    } else {
        format!("did you mean `{}`?", suggestions.join("`, `").fg(EXPR))
    },
)]
pub struct UnknownConstructor {
    /// The name that was written.
    pub name: String,

    /// Known constructors with a similar name.
    pub suggestions: Vec<String>,
}

/// A required argument was not given.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("missing argument `{}` for `{}`", param, constructor),
    labels = ["this call"],
    help = format!("add `{}` to the call", format!("{}=...", param).fg(EXPR)),
)]
pub struct MissingArgument {
    pub constructor: String,
    pub param: &'static str,
}

/// More positional arguments were given than the constructor has parameters.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("too many arguments were given to `{}`", constructor),
    labels = ["this call", "this argument is extra"],
    help = format!(
        "`{}` takes {} argument(s); there are {} argument(s) provided here",
        constructor.fg(EXPR),
        expected,
        given,
    ),
)]
pub struct TooManyArguments {
    pub constructor: String,
    pub expected: usize,
    pub given: usize,
}

/// A keyword argument that the constructor does not have.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` has no parameter named `{}`", constructor, name),
    labels = ["this call", "this argument"],
    help = format!("the parameters of `{}` are: {}", constructor, params.join(", ")),
)]
pub struct UnexpectedArgument {
    pub constructor: String,
    pub name: String,
    pub params: Vec<&'static str>,
}

/// The same parameter was given twice.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("argument `{}` was given more than once", name),
    labels = ["this call", "this argument"],
)]
pub struct DuplicateArgument {
    pub name: &'static str,
}

/// An argument has the wrong type.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("incorrect type for argument `{}`", param),
    labels = ["this call".to_string(), format!("this argument is {}", given)],
    help = format!("should be {}", expected),
)]
pub struct TypeMismatch {
    /// The parameter the argument was given for.
    pub param: &'static str,

    /// A description of the expected type, such as `"an integer"`.
    pub expected: &'static str,

    /// A description of the argument that was given.
    pub given: &'static str,
}

/// Something that is not an expression was found where an expression is required.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("expected an expression, found {}", found),
    labels = ["this is not an expression"],
)]
pub struct NotAnExpression {
    pub found: &'static str,
}

/// The algebra backend returned an expression that has no tree equivalent.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(message = format!("cannot represent `{}` as an expression tree", expr))]
pub struct UnsupportedBackendExpr {
    pub expr: String,
}

/// No rule simplifies the node, and the algebra backend failed on it.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("cannot simplify {} `{}`: {}", node, expr, reason),
    help = "set `UnhandledPolicy::ReturnUnchanged` on the context to keep such nodes as they are",
)]
pub struct UnhandledShape {
    /// The kind of node, such as `"Pow"`.
    pub node: &'static str,

    /// The self-description of the node.
    pub expr: String,

    /// Why the backend could not simplify the node.
    pub reason: String,
}

/// The node is not a number and cannot be evaluated to one.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(message = format!("{} has no numeric value", kind))]
pub struct NotEvaluable {
    pub kind: &'static str,
}

/// A symbol has no value in the bindings it was evaluated with.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` has no value", name),
    help = format!("bind a value to {} before evaluating", name.fg(EXPR)),
)]
pub struct UnboundSymbol {
    pub name: String,
}
