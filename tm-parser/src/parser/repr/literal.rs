use crate::{
    parser::{error::UnexpectedToken, Parse, Parser},
    tokenizer::repr::TokenKind,
};
use std::ops::Range;
use tm_error::Error;

/// An integer literal, such as `5` or `-12`. The digits are kept as written, so that integers of
/// any size survive parsing.
#[derive(Debug, Clone, PartialEq)]
pub struct LitInt {
    /// The literal, including a leading `-` if negative.
    pub value: String,

    /// The region of the source code that this literal was parsed from.
    pub span: Range<usize>,
}

/// A floating-point literal, such as `2.5` or `-1e-7`.
#[derive(Debug, Clone, PartialEq)]
pub struct LitFloat {
    /// The literal, including a leading `-` if negative.
    pub value: String,

    /// The region of the source code that this literal was parsed from.
    pub span: Range<usize>,
}

/// A string literal in single or double quotes. The value has its quotes removed and its escape
/// sequences resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct LitStr {
    /// The unescaped contents of the string.
    pub value: String,

    /// The region of the source code that this literal was parsed from.
    pub span: Range<usize>,
}

impl LitStr {
    /// Removes the quotes around a string lexeme and resolves its escape sequences.
    fn unescape(lexeme: &str) -> String {
        let inner = &lexeme[1..lexeme.len() - 1];
        let mut value = String::with_capacity(inner.len());
        let mut chars = inner.chars();
        while let Some(c) = chars.next() {
            if c == '\\' {
                match chars.next() {
                    Some('n') => value.push('\n'),
                    Some('t') => value.push('\t'),
                    Some(other) => value.push(other),
                    None => value.push('\\'),
                }
            } else {
                value.push(c);
            }
        }
        value
    }
}

/// A literal value.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Int(LitInt),
    Float(LitFloat),
    Str(LitStr),

    /// `True` or `False`.
    Bool(bool, Range<usize>),

    /// `None`.
    None(Range<usize>),
}

impl Literal {
    /// Returns the span of the literal.
    pub fn span(&self) -> Range<usize> {
        match self {
            Literal::Int(int) => int.span.clone(),
            Literal::Float(float) => float.span.clone(),
            Literal::Str(string) => string.span.clone(),
            Literal::Bool(_, span) | Literal::None(span) => span.clone(),
        }
    }
}

impl Parse<TokenKind> for Literal {
    fn parse(input: &mut Parser<'_, TokenKind>) -> Result<Self, Error> {
        const EXPECTED: &[&str] = &["a number", "a string", "True", "False", "None"];

        let token = input.next_token()?;
        let unexpected = |token: crate::tokenizer::Token<'_, TokenKind>| {
            Error::new(vec![token.span], UnexpectedToken {
                expected: EXPECTED,
                found: token.lexeme.to_owned(),
            })
        };

        match token.kind {
            TokenKind::Sub => {
                let number = input.next_token()?;
                let span = token.span.start..number.span.end;
                let value = format!("-{}", number.lexeme);
                match number.kind {
                    TokenKind::Int => Ok(Literal::Int(LitInt { value, span })),
                    TokenKind::Float => Ok(Literal::Float(LitFloat { value, span })),
                    _ => Err(unexpected(number)),
                }
            },
            TokenKind::Int => Ok(Literal::Int(LitInt { value: token.lexeme.to_owned(), span: token.span })),
            TokenKind::Float => Ok(Literal::Float(LitFloat { value: token.lexeme.to_owned(), span: token.span })),
            TokenKind::Str => Ok(Literal::Str(LitStr { value: LitStr::unescape(token.lexeme), span: token.span })),
            TokenKind::Name => match token.lexeme {
                "True" => Ok(Literal::Bool(true, token.span)),
                "False" => Ok(Literal::Bool(false, token.span)),
                "None" => Ok(Literal::None(token.span)),
                _ => Err(unexpected(token)),
            },
            _ => Err(unexpected(token)),
        }
    }
}
