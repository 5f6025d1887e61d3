pub mod latex;
pub mod repr;

use crate::parser::error::InvalidToken;
use logos::Logos;
use std::{fmt::Debug, ops::Range};
use tm_error::Error;

/// Common behavior of the token kinds produced by the tokenizers in this module.
pub trait TokenKind: Copy + Debug + PartialEq {
    /// Returns true if the token kind carries no meaning and should be skipped by the parser.
    fn is_whitespace(self) -> bool;
}

/// A token produced by a tokenizer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token<'source, K> {
    /// The region of the source code that this token originated from.
    pub span: Range<usize>,

    /// The kind of token.
    pub kind: K,

    /// The raw lexeme that was parsed into this token.
    pub lexeme: &'source str,
}

impl<K: TokenKind> Token<'_, K> {
    /// Returns true if the token is a whitespace token.
    pub fn is_whitespace(&self) -> bool {
        self.kind.is_whitespace()
    }
}

/// Returns an owned array containing all of the tokens produced by the tokenizer. This allows us
/// to backtrack in case of an error.
///
/// Returns an error pointing at the first piece of input the tokenizer could not recognize.
pub fn tokenize_complete<'source, K>(input: &'source str) -> Result<Box<[Token<'source, K>]>, Error>
where
    K: TokenKind + Logos<'source, Source = str, Extras = (), Error = ()>,
{
    let mut lexer = K::lexer(input);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        match result {
            Ok(kind) => tokens.push(Token {
                span: lexer.span(),
                kind,
                lexeme: lexer.slice(),
            }),
            Err(()) => return Err(Error::new(vec![lexer.span()], InvalidToken {
                lexeme: lexer.slice().to_string(),
            })),
        }
    }

    Ok(tokens.into_boxed_slice())
}
