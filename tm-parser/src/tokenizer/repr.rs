//! Tokens of the self-description notation, e.g. `Fraction(p=Integer(n=1), q=Integer(n=2))`.

use logos::Logos;

/// The different kinds of tokens that can be produced by the self-description tokenizer.
#[derive(Logos, Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind {
    #[regex(r"[ \t\r\n]+")]
    Whitespace,

    #[token("(")]
    OpenParen,

    #[token(")")]
    CloseParen,

    #[token(",")]
    Comma,

    #[token("=")]
    Assign,

    #[token("-")]
    Sub,

    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Name,

    #[regex(r"[0-9]+")]
    Int,

    #[regex(r"[0-9]+\.[0-9]*([eE][+-]?[0-9]+)?")]
    #[regex(r"[0-9]+[eE][+-]?[0-9]+")]
    Float,

    #[regex(r#"'([^'\\]|\\.)*'"#)]
    #[regex(r#""([^"\\]|\\.)*""#)]
    Str,
}

impl super::TokenKind for TokenKind {
    fn is_whitespace(self) -> bool {
        self == Self::Whitespace
    }
}
