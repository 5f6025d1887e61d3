use crate::{
    parser::{error::UnexpectedToken, Associativity, Parse, Parser, Precedence},
    tokenizer::latex::TokenKind,
};
use std::ops::Range;
use super::{atom, unary::Unary, Expr};
use tm_error::Error;

/// The operators of the markup, from `+` to the relations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOpKind {
    Add,
    Sub,
    Mul,
    Div,
    Exp,
    Eq,
    Greater,
    Less,
}

impl BinOpKind {
    pub fn precedence(&self) -> Precedence {
        match self {
            Self::Eq | Self::Greater | Self::Less => Precedence::Compare,
            Self::Add | Self::Sub => Precedence::Term,
            Self::Mul | Self::Div => Precedence::Factor,
            Self::Exp => Precedence::Exp,
        }
    }

    /// Only powers group to the right: `a^b^c` is `a^(b^c)`.
    pub fn associativity(&self) -> Associativity {
        if *self == Self::Exp {
            Associativity::Right
        } else {
            Associativity::Left
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinOp {
    pub kind: BinOpKind,

    /// True for juxtaposition, such as `2x`.
    pub implicit: bool,

    pub span: Range<usize>,
}

impl BinOp {
    pub fn precedence(&self) -> Precedence {
        self.kind.precedence()
    }

    pub fn associativity(&self) -> Associativity {
        self.kind.associativity()
    }
}

impl Parse<TokenKind> for BinOp {
    fn parse(input: &mut Parser<'_, TokenKind>) -> Result<Self, Error> {
        let token = input.next_token()?;
        let kind = match token.kind {
            TokenKind::Add => BinOpKind::Add,
            TokenKind::Sub => BinOpKind::Sub,
            TokenKind::Mul => BinOpKind::Mul,
            TokenKind::Div => BinOpKind::Div,
            TokenKind::Exp => BinOpKind::Exp,
            TokenKind::Eq => BinOpKind::Eq,
            TokenKind::Greater => BinOpKind::Greater,
            TokenKind::Less => BinOpKind::Less,
            _ => return Err(Error::new(vec![token.span], UnexpectedToken {
                expected: &["+", "-", "\\times", "\\div", "^", "=", ">", "<"],
                found: token.lexeme.to_owned(),
            })),
        };

        Ok(Self { kind, implicit: false, span: token.span })
    }
}

/// `lhs op rhs`, such as `1 + 2` or the implicit product `2x`.
#[derive(Debug, Clone, PartialEq)]
pub struct Binary {
    pub lhs: Box<Expr>,
    pub op: BinOp,
    pub rhs: Box<Expr>,
    pub span: Range<usize>,
}

/// The operator after the cursor, without consuming it. Another operand directly after the
/// cursor stands for an implicit multiplication, such as `2x` or `3\left(x + 1\right)`.
fn peek_operator(input: &Parser<'_, TokenKind>) -> Option<BinOp> {
    if let Ok(op) = input.clone().try_parse::<BinOp>() {
        return Some(op);
    }
    atom::starts_at(input).then(|| BinOp {
        kind: BinOpKind::Mul,
        implicit: true,
        span: input.span(),
    })
}

impl Binary {
    fn new(lhs: Expr, op: BinOp, rhs: Expr) -> Self {
        let span = lhs.span().start..rhs.span().end;
        Self { lhs: Box::new(lhs), op, rhs: Box::new(rhs), span }
    }

    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Consumes `op` if it is explicit, then parses its right operand. The exponent of a power
    /// is a single atom or a braced group, so `x^23` means `x^{23}`.
    fn parse_operand(input: &mut Parser<'_, TokenKind>, op: &BinOp) -> Result<Expr, Error> {
        if op.implicit {
            return atom::parse(input);
        }

        input.try_parse::<BinOp>()?;
        if op.kind == BinOpKind::Exp {
            Unary::parse_exponent(input)
        } else {
            Unary::parse_or_lower(input)
        }
    }

    /// Precedence climbing: extends `lhs` with every operator that binds at least as tightly as
    /// `min`.
    pub fn parse_expr(
        input: &mut Parser<'_, TokenKind>,
        mut lhs: Expr,
        min: Precedence,
    ) -> Result<Expr, Error> {
        while let Some(mut op) = peek_operator(input) {
            if op.precedence() < min {
                break;
            }

            let mut rhs = Self::parse_operand(input, &op)?;
            if op.implicit {
                op.span = lhs.span().end..rhs.span().start;
            }

            // `3 + 4 \times 5` must not become `(3 + 4) \times 5`
            while let Some(next) = peek_operator(input) {
                let tighter = next.precedence() > op.precedence()
                    || (next.precedence() == op.precedence()
                        && next.associativity() == Associativity::Right);
                if !tighter {
                    break;
                }
                rhs = Self::parse_expr(input, rhs, next.precedence())?;
            }

            lhs = Expr::Binary(Self::new(lhs, op, rhs));
        }

        Ok(lhs)
    }
}
