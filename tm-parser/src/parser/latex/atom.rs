//! The operands of the free-text notation: numbers, letters, constants, groups, and the
//! structural commands (`\frac`, `\sqrt`, intervals and function application).

use crate::{
    parser::{error::{EmptyGroup, UnclosedDelimiter, UnexpectedToken}, Parse, Parser, Precedence},
    tokenizer::{latex::TokenKind, Token},
};
use std::ops::Range;
use super::{binary::Binary, Expr};
use tm_error::Error;

/// Letters that denote a function when directly followed by parentheses. Any other letter
/// followed by parentheses is multiplied with the parenthesized expression.
pub const FUNCTION_LETTERS: [&str; 3] = ["f", "g", "h"];

/// Commands that denote a function, such as `\sin`.
pub const FUNCTION_COMMANDS: [&str; 12] = [
    "sin", "cos", "tan", "arcsin", "arccos", "arctan",
    "sinh", "cosh", "tanh", "ln", "log", "exp",
];

/// Commands that denote a symbol, such as `\alpha`.
pub const SYMBOL_COMMANDS: [&str; 14] = [
    "alpha", "beta", "gamma", "delta", "epsilon", "theta", "lambda",
    "mu", "rho", "sigma", "tau", "phi", "omega", "Delta",
];

/// A number literal, such as `12` or `2.5`.
#[derive(Debug, Clone, PartialEq)]
pub struct LitNum {
    /// The digits as written, with a `.` if the number has a fractional part.
    pub value: String,

    /// The region of the source code that this literal was parsed from.
    pub span: Range<usize>,
}

impl LitNum {
    /// Returns true if the literal has a fractional part.
    pub fn is_decimal(&self) -> bool {
        self.value.contains('.')
    }
}

/// A symbol, such as `x` or `\alpha`.
#[derive(Debug, Clone, PartialEq)]
pub struct LitSym {
    /// The name of the symbol, without any leading backslash.
    pub name: String,

    /// The region of the source code that this symbol was parsed from.
    pub span: Range<usize>,
}

/// An expression in grouping delimiters, such as `(x + 1)` or `{x + 1}`.
#[derive(Debug, Clone, PartialEq)]
pub struct Paren {
    /// The inner expression.
    pub expr: Box<Expr>,

    /// The region of the source code that this group was parsed from, including delimiters.
    pub span: Range<usize>,
}

/// A parenthesized, comma-separated list of expressions, such as `(1, 2)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Tuple {
    /// The elements of the tuple.
    pub items: Vec<Expr>,

    /// The region of the source code that this tuple was parsed from.
    pub span: Range<usize>,
}

/// A function application, such as `f(x)` or `\sin(x)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    /// The name of the function, without any leading backslash.
    pub name: LitSym,

    /// The arguments passed to the function.
    pub args: Vec<Expr>,

    /// The region of the source code that this call was parsed from.
    pub span: Range<usize>,
}

/// A fraction, such as `\dfrac{1}{2}` or `\frac12`.
#[derive(Debug, Clone, PartialEq)]
pub struct Frac {
    pub numerator: Box<Expr>,
    pub denominator: Box<Expr>,

    /// The region of the source code that this fraction was parsed from.
    pub span: Range<usize>,
}

/// A radical, such as `\sqrt{2}` or `\sqrt[3]{x}`.
#[derive(Debug, Clone, PartialEq)]
pub struct Sqrt {
    pub radicand: Box<Expr>,

    /// The index of the root. [`None`] for a square root.
    pub index: Option<Box<Expr>>,

    /// The region of the source code that this radical was parsed from.
    pub span: Range<usize>,
}

/// An interval, such as `[1; 2]`, `]1; +\infty[` or `\lbracket 0; 1\rbracket`.
///
/// A bracket that faces away from the bound (`]` on the left, `[` on the right) makes that end
/// open.
#[derive(Debug, Clone, PartialEq)]
pub struct Interval {
    pub left: Box<Expr>,
    pub right: Box<Expr>,
    pub left_open: bool,
    pub right_open: bool,

    /// The region of the source code that this interval was parsed from.
    pub span: Range<usize>,
}

/// Returns true if the next token can start an operand. Used to detect implicit multiplication.
pub fn starts_at(input: &Parser<'_, TokenKind>) -> bool {
    matches!(
        input.peek_kind(),
        Some(
            TokenKind::Int
            | TokenKind::Float
            | TokenKind::Letter
            | TokenKind::Pi
            | TokenKind::Infinity
            | TokenKind::Command
            | TokenKind::OpenParen
            | TokenKind::OpenCurly
            | TokenKind::Frac
            | TokenKind::Sqrt
        )
    )
}

/// Creates an [`UnexpectedToken`] error for a token that cannot start an operand.
fn unexpected(token: Token<'_, TokenKind>) -> Error {
    Error::new(vec![token.span], UnexpectedToken {
        expected: &["a number", "a letter", "\\frac", "\\sqrt", "(", "{"],
        found: token.lexeme.to_owned(),
    })
}

/// Consumes the closing delimiter of a group that was opened by `open`.
fn close_group<'source>(
    input: &mut Parser<'source, TokenKind>,
    open: &Token<'source, TokenKind>,
    closing: TokenKind,
    closing_str: &'static str,
) -> Result<Token<'source, TokenKind>, Error> {
    input.eat(closing)
        .ok_or_else(|| Error::new(vec![open.span.clone()], UnclosedDelimiter { closing: closing_str }))
}

/// Parses the inside of a group opened by `open`, up to and including the closing delimiter.
/// Parenthesized groups with commas become tuples.
fn parse_group<'a>(input: &mut Parser<'a, TokenKind>, open: Token<'a, TokenKind>) -> Result<Expr, Error> {
    let (closing, closing_str) = match open.kind {
        TokenKind::OpenCurly => (TokenKind::CloseCurly, "}"),
        _ => (TokenKind::CloseParen, ")"),
    };

    if let Some(close) = input.eat(closing) {
        return Err(Error::new(vec![open.span.start..close.span.end], EmptyGroup));
    }

    let expr = Expr::parse(input)?;
    if closing == TokenKind::CloseParen && input.eat(TokenKind::Comma).is_some() {
        let mut items = vec![expr];
        items.extend(input.try_parse_delimited::<Expr>(TokenKind::Comma)?);
        let close = close_group(input, &open, closing, closing_str)?;
        return Ok(Expr::Tuple(Tuple { items, span: open.span.start..close.span.end }));
    }

    let close = close_group(input, &open, closing, closing_str)?;
    Ok(Expr::Paren(Paren { expr: Box::new(expr), span: open.span.start..close.span.end }))
}

/// Parses the parenthesized argument list of a function application.
fn parse_call(input: &mut Parser<'_, TokenKind>, name: LitSym) -> Result<Expr, Error> {
    let open = input.next_token()?;
    let args = input.try_parse_delimited::<Expr>(TokenKind::Comma)?;
    let close = close_group(input, &open, TokenKind::CloseParen, ")")?;
    Ok(Expr::Call(Call {
        span: name.span.start..close.span.end,
        name,
        args,
    }))
}

/// Parses a function command, such as `\sin(x)` or `\ln x`.
fn parse_function_command(input: &mut Parser<'_, TokenKind>, name: LitSym) -> Result<Expr, Error> {
    if input.peek_kind() == Some(TokenKind::OpenParen) {
        return parse_call(input, name);
    }

    let arg = parse(input)?;
    let arg = Binary::parse_expr(input, arg, Precedence::Exp)?;
    Ok(Expr::Call(Call {
        span: name.span.start..arg.span().end,
        name,
        args: vec![arg],
    }))
}

/// Parses the argument of `\frac` or `\sqrt`: a braced group or a single operand.
fn parse_argument(input: &mut Parser<'_, TokenKind>) -> Result<Expr, Error> {
    parse(input)
}

/// Parses the two arguments of a fraction, after the `\frac` command.
fn parse_frac(input: &mut Parser<'_, TokenKind>, frac: Token<'_, TokenKind>) -> Result<Expr, Error> {
    // `\frac12` is tokenized as a single two-digit integer
    let shorthand = input.peek_token()
        .map_or(false, |token| token.kind == TokenKind::Int && token.lexeme.len() == 2);
    let (numerator, denominator) = if shorthand {
        let digits = input.next_token()?;
        let mid = digits.span.start + 1;
        (
            Expr::Num(LitNum { value: digits.lexeme[..1].to_owned(), span: digits.span.start..mid }),
            Expr::Num(LitNum { value: digits.lexeme[1..].to_owned(), span: mid..digits.span.end }),
        )
    } else {
        (parse_argument(input)?, parse_argument(input)?)
    };

    Ok(Expr::Frac(Frac {
        span: frac.span.start..denominator.span().end,
        numerator: Box::new(numerator),
        denominator: Box::new(denominator),
    }))
}

/// Parses an optional index and the radicand of a radical, after the `\sqrt` command.
fn parse_sqrt(input: &mut Parser<'_, TokenKind>, sqrt: Token<'_, TokenKind>) -> Result<Expr, Error> {
    let index = match input.eat(TokenKind::OpenSquare) {
        Some(open) => {
            let index = Expr::parse(input)?;
            close_group(input, &open, TokenKind::CloseSquare, "]")?;
            Some(Box::new(index))
        },
        None => None,
    };
    let radicand = parse_argument(input)?;

    Ok(Expr::Sqrt(Sqrt {
        span: sqrt.span.start..radicand.span().end,
        radicand: Box::new(radicand),
        index,
    }))
}

/// Parses the bounds and closing bracket of an interval, after its opening bracket.
fn parse_interval(input: &mut Parser<'_, TokenKind>, open: Token<'_, TokenKind>) -> Result<Expr, Error> {
    let left = Expr::parse(input)?;
    let separator = input.next_token()?;
    if separator.kind != TokenKind::Semicolon {
        return Err(Error::new(vec![separator.span], UnexpectedToken {
            expected: &[";"],
            found: separator.lexeme.to_owned(),
        }));
    }
    let right = Expr::parse(input)?;

    let close = input.next_token()
        .map_err(|_| Error::new(vec![open.span.clone()], UnclosedDelimiter { closing: "]" }))?;
    let right_open = match close.kind {
        TokenKind::CloseSquare => false,
        TokenKind::OpenSquare => true,
        _ => return Err(Error::new(vec![close.span], UnexpectedToken {
            expected: &["]", "["],
            found: close.lexeme.to_owned(),
        })),
    };

    Ok(Expr::Interval(Interval {
        left: Box::new(left),
        right: Box::new(right),
        left_open: open.kind == TokenKind::CloseSquare,
        right_open,
        span: open.span.start..close.span.end,
    }))
}

/// Parses a single operand.
pub fn parse(input: &mut Parser<'_, TokenKind>) -> Result<Expr, Error> {
    let token = input.next_token()?;
    match token.kind {
        TokenKind::Int | TokenKind::Float => Ok(Expr::Num(LitNum {
            value: token.lexeme.to_owned(),
            span: token.span,
        })),
        TokenKind::Letter => {
            let sym = LitSym { name: token.lexeme.to_owned(), span: token.span };
            if FUNCTION_LETTERS.contains(&token.lexeme) && input.peek_kind() == Some(TokenKind::OpenParen) {
                parse_call(input, sym)
            } else {
                Ok(Expr::Sym(sym))
            }
        },
        TokenKind::Pi => Ok(Expr::Pi(token.span)),
        TokenKind::Infinity => Ok(Expr::Infinity(token.span)),
        TokenKind::Command => {
            let lexeme = token.lexeme;
            let name = &lexeme[1..];
            let sym = LitSym { name: name.to_owned(), span: token.span.clone() };
            if FUNCTION_COMMANDS.contains(&name) {
                parse_function_command(input, sym)
            } else if SYMBOL_COMMANDS.contains(&name) {
                Ok(Expr::Sym(sym))
            } else {
                Err(unexpected(token))
            }
        },
        TokenKind::OpenParen | TokenKind::OpenCurly => parse_group(input, token),
        TokenKind::Frac => parse_frac(input, token),
        TokenKind::Sqrt => parse_sqrt(input, token),
        TokenKind::OpenSquare | TokenKind::CloseSquare => parse_interval(input, token),
        _ => Err(unexpected(token)),
    }
}
