use crate::{
    parser::{Parser, Precedence},
    tokenizer::latex::TokenKind,
};
use std::ops::Range;
use super::{atom, binary::Binary, Expr};
use tm_error::Error;

/// A negation, such as `-x`.
///
/// Negation binds tighter than multiplication but looser than exponentiation, so `-2x` is
/// `(-2)x` and `-x^{2}` is `-(x^{2})`.
#[derive(Debug, Clone, PartialEq)]
pub struct Neg {
    /// The negated operand.
    pub operand: Box<Expr>,

    /// The region of the source code that this expression was parsed from.
    pub span: Range<usize>,
}

impl Neg {
    /// Returns the span of the negation.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }
}

/// Parsing of prefix signs.
pub struct Unary;

impl Unary {
    /// Parses a negation, a unary plus, or, if there is no sign, a single atom.
    pub fn parse_or_lower(input: &mut Parser<'_, TokenKind>) -> Result<Expr, Error> {
        if let Some(sign) = input.eat(TokenKind::Sub) {
            let operand = Self::parse_or_lower(input)?;
            let operand = Binary::parse_expr(input, operand, Precedence::Exp)?;
            let span = sign.span.start..operand.span().end;
            return Ok(Expr::Neg(Neg { operand: Box::new(operand), span }));
        }

        if input.eat(TokenKind::Add).is_some() {
            return Self::parse_or_lower(input);
        }

        atom::parse(input)
    }

    /// Parses the exponent of a power: an optionally signed atom.
    pub fn parse_exponent(input: &mut Parser<'_, TokenKind>) -> Result<Expr, Error> {
        if let Some(sign) = input.eat(TokenKind::Sub) {
            let operand = Self::parse_exponent(input)?;
            let span = sign.span.start..operand.span().end;
            return Ok(Expr::Neg(Neg { operand: Box::new(operand), span }));
        }

        if input.eat(TokenKind::Add).is_some() {
            return Self::parse_exponent(input);
        }

        atom::parse(input)
    }
}
