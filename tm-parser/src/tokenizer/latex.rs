//! Tokens of the free-text notation, a small subset of LaTeX math markup.

use logos::Logos;

/// The different kinds of tokens that can be produced by the free-text tokenizer.
#[derive(Logos, Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind {
    /// Whitespace, spacing commands, and the `\left` / `\right` sizing modifiers, which carry no
    /// meaning for the value of the expression.
    #[regex(r"[ \t\r\n]+")]
    #[regex(r"\\[,;:! ]")]
    #[token("~")]
    #[token("\\left")]
    #[token("\\right")]
    #[token("\\displaystyle")]
    Whitespace,

    #[token("+")]
    Add,

    #[token("-")]
    Sub,

    #[token("*")]
    #[token("\\times")]
    #[token("\\cdot")]
    Mul,

    #[token("/")]
    #[token("\\div")]
    Div,

    #[token("^")]
    Exp,

    #[token("=")]
    Eq,

    #[token(">")]
    Greater,

    #[token("<")]
    Less,

    #[token(",")]
    Comma,

    #[token(";")]
    Semicolon,

    #[token("(")]
    OpenParen,

    #[token(")")]
    CloseParen,

    #[token("{")]
    OpenCurly,

    #[token("}")]
    CloseCurly,

    #[token("[")]
    #[token("\\lbracket")]
    #[token("\\lbrack")]
    OpenSquare,

    #[token("]")]
    #[token("\\rbracket")]
    #[token("\\rbrack")]
    CloseSquare,

    #[token("\\frac")]
    #[token("\\dfrac")]
    #[token("\\tfrac")]
    Frac,

    #[token("\\sqrt")]
    Sqrt,

    #[token("\\pi")]
    Pi,

    #[token("\\infty")]
    Infinity,

    /// Any other command, such as `\sin` or `\alpha`.
    #[regex(r"\\[a-zA-Z]+")]
    Command,

    #[regex(r"[0-9]+")]
    Int,

    #[regex(r"[0-9]+\.[0-9]+")]
    Float,

    /// A single letter. Consecutive letters are separate symbols multiplied together.
    #[regex(r"[a-zA-Z]")]
    Letter,
}

impl super::TokenKind for TokenKind {
    fn is_whitespace(self) -> bool {
        self == Self::Whitespace
    }
}
