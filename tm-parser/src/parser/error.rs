//! The kinds of errors that can occur while tokenizing and parsing.

use ariadne::Fmt;
use tm_attrs::ErrorKind;
use tm_error::EXPR;

/// The tokenizer could not recognize a piece of the input.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("unrecognized input `{}`", lexeme),
    labels = ["this is not part of the notation"],
)]
pub struct InvalidToken {
    /// The unrecognized input.
    pub lexeme: String,
}

/// The end of the source code was reached unexpectedly.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unexpected end of input",
    labels = [format!("you might need to add another {} here", "expression".fg(EXPR))],
)]
pub struct UnexpectedEof;

/// The end of the source code was expected, but something else was found.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "expected end of input",
    labels = [format!("I could not understand the remaining {} here", "expression".fg(EXPR))],
)]
pub struct ExpectedEof;

/// An unexpected token was encountered.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("unexpected `{}`", found),
    labels = [format!("expected one of: {}", expected.join(", "))],
)]
pub struct UnexpectedToken {
    /// Descriptions of the token(s) that were expected.
    pub expected: &'static [&'static str],

    /// The lexeme that was found.
    pub found: String,
}

/// A parenthesis, brace or bracket was opened but never closed.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "missing closing delimiter",
    labels = ["this delimiter is never closed"],
    help = format!("add `{}` at the end of the group", closing.fg(EXPR)),
)]
pub struct UnclosedDelimiter {
    /// The delimiter that would close the group.
    pub closing: &'static str,
}

/// A pair of parentheses or braces with nothing inside.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "missing expression inside delimiters",
    labels = ["add an expression here"],
)]
pub struct EmptyGroup;

/// A number literal could not be represented.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("invalid number `{}`", lexeme),
    labels = ["here"],
)]
pub struct InvalidNumber {
    /// The literal as written.
    pub lexeme: String,
}
