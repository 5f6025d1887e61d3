pub mod error;
pub mod latex;
pub mod repr;

use crate::tokenizer::{tokenize_complete, Token, TokenKind};
use error::{ExpectedEof, UnexpectedEof};
use logos::Logos;
use std::ops::Range;
use tm_error::{Error, ErrorKind};

/// A cursor over the tokens of one piece of source text, with backtracking.
///
/// Whitespace tokens are kept in the stream so that spans stay exact, but every method that
/// reads a token skips them.
#[derive(Debug, Clone)]
pub struct Parser<'source, K> {
    tokens: Box<[Token<'source, K>]>,

    /// Index of the next token to read.
    cursor: usize,
}

impl<'source, K> Parser<'source, K>
where
    K: TokenKind + Logos<'source, Source = str, Extras = (), Error = ()>,
{
    /// Tokenizes the source. Fails on the first input the tokenizer does not recognize.
    pub fn new(source: &'source str) -> Result<Self, Error> {
        let tokens = tokenize_complete(source)?;
        Ok(Self { tokens, cursor: 0 })
    }
}

impl<'source, K: TokenKind> Parser<'source, K> {
    /// An error pointing at [`Parser::span`].
    pub fn error(&self, kind: impl ErrorKind + 'static) -> Error {
        Error::new(vec![self.span()], kind)
    }

    fn eof_span(&self) -> Range<usize> {
        let end = self.tokens.last().map_or(0, |token| token.span.end);
        end..end
    }

    /// The span of the token under the cursor, or an empty span at the end of the source.
    pub fn span(&self) -> Range<usize> {
        match self.tokens.get(self.cursor) {
            Some(token) => token.span.clone(),
            None => self.eof_span(),
        }
    }

    pub fn peek_token(&self) -> Option<&Token<'source, K>> {
        self.tokens.iter().skip(self.cursor).find(|token| !token.is_whitespace())
    }

    pub fn peek_kind(&self) -> Option<K> {
        self.peek_token().map(|token| token.kind)
    }

    /// Reads the next token and moves past it.
    pub fn next_token(&mut self) -> Result<Token<'source, K>, Error> {
        while let Some(token) = self.tokens.get(self.cursor) {
            self.cursor += 1;
            if !token.is_whitespace() {
                return Ok(token.clone());
            }
        }
        Err(self.error(UnexpectedEof))
    }

    /// Reads the next token only if it is of the given kind.
    pub fn eat(&mut self, kind: K) -> Option<Token<'source, K>> {
        self.try_parse_with_fn(|input| match input.next_token() {
            Ok(token) if token.kind == kind => Ok(token),
            Ok(_) => Err(input.error(UnexpectedEof)),
            Err(err) => Err(err),
        })
        .ok()
    }

    /// Runs `f`, rewinding the cursor to where it was if `f` fails.
    pub fn try_parse_with_fn<T, F>(&mut self, f: F) -> Result<T, Error>
    where
        F: FnOnce(&mut Self) -> Result<T, Error>,
    {
        let start = self.cursor;
        let result = f(self);
        if result.is_err() {
            self.cursor = start;
        }
        result
    }

    /// Parses a `T`, rewinding on failure.
    pub fn try_parse<T: Parse<K>>(&mut self) -> Result<T, Error> {
        self.try_parse_with_fn(T::parse)
    }

    /// Parses one or more `T`s separated by `delimiter`. Either all of them are consumed, or
    /// nothing is.
    pub fn try_parse_delimited<T: Parse<K>>(&mut self, delimiter: K) -> Result<Vec<T>, Error> {
        self.try_parse_with_fn(|input| {
            let mut values = vec![input.try_parse::<T>()?];
            while input.eat(delimiter).is_some() {
                values.push(input.try_parse::<T>()?);
            }
            Ok(values)
        })
    }

    /// Parses a `T` that must span the rest of the source.
    pub fn try_parse_full<T: Parse<K>>(&mut self) -> Result<T, Error> {
        let value = T::parse(self)?;
        if self.peek_token().is_none() {
            return Ok(value);
        }

        // point at the leftover input, not the whitespace before it
        while self.tokens.get(self.cursor).map_or(false, |token| token.is_whitespace()) {
            self.cursor += 1;
        }
        Err(self.error(ExpectedEof))
    }
}

/// A syntax node that can be read from tokens of kind `K`.
pub trait Parse<K>: Sized {
    fn parse(input: &mut Parser<'_, K>) -> Result<Self, Error>;
}

/// The associativity of a binary operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Associativity {
    /// `a op b op c` is evaluated as `(a op b) op c`.
    Left,

    /// `a op b op c` is evaluated as `a op (b op c)`.
    Right,
}

/// Binding strength of an operator, from loosest to tightest.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub enum Precedence {
    Any,

    /// Precedence of relations (`=`, `>` and `<`).
    Compare,

    /// Precedence of addition (`+`) and subtraction (`-`), which separate terms.
    Term,

    /// Precedence of multiplication (`*`, `\times`) and division (`/`, `\div`), which separate
    /// factors.
    Factor,

    /// Precedence of unary subtraction (`-`).
    Neg,

    /// Precedence of exponentiation (`^`).
    Exp,
}
