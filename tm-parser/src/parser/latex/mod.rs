//! Abstract syntax tree of the free-text notation.
//!
//! The notation is the subset of LaTeX math markup used in school exercises: numbers, single
//! letter symbols, implicit multiplication, `+ - \times \cdot \div /`, powers with `^{...}`,
//! `\frac` (and its `\dfrac` / `\tfrac` variants), `\sqrt`, `\pi`, `\infty`, `\left( \right)`,
//! relations (`=`, `>`, `<`), function application, tuples and intervals.
//!
//! ```
//! use tm_parser::{parser::{latex::Expr, Parser}, tokenizer::latex::TokenKind};
//!
//! let expr = Parser::<TokenKind>::new(r"3x^{2} - \dfrac{1}{2}")
//!     .and_then(|mut parser| parser.try_parse_full::<Expr>())
//!     .unwrap();
//! assert_eq!(expr.span(), 0..21);
//! ```

pub mod atom;
pub mod binary;
pub mod unary;

use crate::{
    parser::{Parse, Parser, Precedence},
    tokenizer::latex::TokenKind,
};
use std::ops::Range;
use tm_error::Error;

pub use atom::{Call, Frac, Interval, LitNum, LitSym, Paren, Sqrt, Tuple};
pub use binary::{BinOp, BinOpKind, Binary};
pub use unary::{Neg, Unary};

/// Represents any expression of the free-text notation.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Num(LitNum),
    Sym(LitSym),

    /// `\pi`.
    Pi(Range<usize>),

    /// `\infty`.
    Infinity(Range<usize>),

    Paren(Paren),
    Tuple(Tuple),
    Call(Call),
    Frac(Frac),
    Sqrt(Sqrt),
    Interval(Interval),
    Neg(Neg),
    Binary(Binary),
}

impl Expr {
    /// Returns the span of the expression.
    pub fn span(&self) -> Range<usize> {
        match self {
            Expr::Num(num) => num.span.clone(),
            Expr::Sym(sym) => sym.span.clone(),
            Expr::Pi(span) | Expr::Infinity(span) => span.clone(),
            Expr::Paren(paren) => paren.span.clone(),
            Expr::Tuple(tuple) => tuple.span.clone(),
            Expr::Call(call) => call.span.clone(),
            Expr::Frac(frac) => frac.span.clone(),
            Expr::Sqrt(sqrt) => sqrt.span.clone(),
            Expr::Interval(interval) => interval.span.clone(),
            Expr::Neg(neg) => neg.span(),
            Expr::Binary(binary) => binary.span(),
        }
    }

    /// Returns the innermost expression, removing any grouping delimiters around it.
    pub fn innermost(&self) -> &Expr {
        let mut inner = self;
        while let Expr::Paren(paren) = inner {
            inner = &paren.expr;
        }
        inner
    }
}

impl Parse<TokenKind> for Expr {
    fn parse(input: &mut Parser<'_, TokenKind>) -> Result<Self, Error> {
        let lhs = Unary::parse_or_lower(input)?;
        Binary::parse_expr(input, lhs, Precedence::Any)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn parse(source: &str) -> Result<Expr, Error> {
        Parser::<TokenKind>::new(source)?.try_parse_full::<Expr>()
    }

    /// Renders the tree in a compact, fully parenthesized form to compare shapes.
    fn shape(expr: &Expr) -> String {
        match expr {
            Expr::Num(num) => num.value.clone(),
            Expr::Sym(sym) => sym.name.clone(),
            Expr::Pi(_) => "pi".to_string(),
            Expr::Infinity(_) => "oo".to_string(),
            Expr::Paren(paren) => shape(&paren.expr),
            Expr::Tuple(tuple) => format!(
                "tuple({})",
                tuple.items.iter().map(shape).collect::<Vec<_>>().join(", "),
            ),
            Expr::Call(call) => format!(
                "{}[{}]",
                call.name.name,
                call.args.iter().map(shape).collect::<Vec<_>>().join(", "),
            ),
            Expr::Frac(frac) => format!("frac({}, {})", shape(&frac.numerator), shape(&frac.denominator)),
            Expr::Sqrt(sqrt) => match &sqrt.index {
                Some(index) => format!("root({}, {})", shape(&sqrt.radicand), shape(index)),
                None => format!("sqrt({})", shape(&sqrt.radicand)),
            },
            Expr::Interval(interval) => format!(
                "{}{}; {}{}",
                if interval.left_open { "]" } else { "[" },
                shape(&interval.left),
                shape(&interval.right),
                if interval.right_open { "[" } else { "]" },
            ),
            Expr::Neg(neg) => format!("(-{})", shape(&neg.operand)),
            Expr::Binary(binary) => {
                let op = match binary.op.kind {
                    BinOpKind::Add => "+",
                    BinOpKind::Sub => "-",
                    BinOpKind::Mul if binary.op.implicit => "",
                    BinOpKind::Mul => "*",
                    BinOpKind::Div => "/",
                    BinOpKind::Exp => "^",
                    BinOpKind::Eq => "=",
                    BinOpKind::Greater => ">",
                    BinOpKind::Less => "<",
                };
                format!("({}{}{})", shape(&binary.lhs), op, shape(&binary.rhs))
            },
        }
    }

    fn assert_shape(source: &str, expected: &str) {
        assert_eq!(shape(&parse(source).unwrap()), expected);
    }

    #[test]
    fn literal_int() {
        assert_eq!(parse("16").unwrap(), Expr::Num(LitNum {
            value: "16".to_string(),
            span: 0..2,
        }));
    }

    #[test]
    fn precedence() {
        assert_shape("1 + 2 \\times 3", "(1+(2*3))");
        assert_shape("1 - 2 - 3", "((1-2)-3)");
        assert_shape("2^3^4", "(2^(3^4))");
        assert_shape("a = b + c", "(a=(b+c))");
    }

    #[test]
    fn implicit_multiplication() {
        assert_shape("2x", "(2x)");
        assert_shape("3xy", "((3x)y)");
        assert_shape("2x^{2}", "(2(x^2))");
        assert_shape("1 + 2x", "(1+(2x))");
        assert_shape("\\left(x+1\\right)\\left(x-1\\right)", "((x+1)(x-1))");
        assert_shape("x(y+1)", "(x(y+1))");
    }

    #[test]
    fn negation() {
        assert_shape("-2x", "((-2)x)");
        assert_shape("-x^{2}", "(-(x^2))");
        assert_shape("3 - -x", "(3-(-x))");
        assert_shape("x^{-1}", "(x^(-1))");
    }

    #[test]
    fn exponent_is_single_operand() {
        assert_shape("x^2y", "((x^2)y)");
        assert_shape("x^{2y}", "(x^(2y))");
    }

    #[test]
    fn fractions() {
        assert_shape("\\dfrac{1}{2}", "frac(1, 2)");
        assert_shape("\\frac12", "frac(1, 2)");
        assert_shape("\\tfrac{x+1}{3}x", "(frac((x+1), 3)x)");
        assert_shape("\\frac{1}{2} \\div 4", "(frac(1, 2)/4)");
    }

    #[test]
    fn radicals() {
        assert_shape("\\sqrt{2}", "sqrt(2)");
        assert_shape("\\sqrt[3]{x}", "root(x, 3)");
        assert_shape("3\\sqrt{2}", "(3sqrt(2))");
    }

    #[test]
    fn functions() {
        assert_shape("f(x)", "f[x]");
        assert_shape("g(x, y)", "g[x, y]");
        assert_shape("\\sin(x) + \\ln x", "(sin[x]+ln[x])");
        assert_shape("2f(x)", "(2f[x])");
    }

    #[test]
    fn constants_and_relations() {
        assert_shape("2\\pi", "(2pi)");
        assert_shape("x > -\\infty", "(x>(-oo))");
        assert_shape("x < 3", "(x<3)");
    }

    #[test]
    fn tuples_and_intervals() {
        assert_shape("(1, 2, x)", "tuple(1, 2, x)");
        assert_shape("[1; 2]", "[1; 2]");
        assert_shape("]-\\infty; 3]", "](-oo); 3]");
        assert_shape("\\lbracket 0; 1\\rbracket", "[0; 1]");
        assert_shape("[0; 1[", "[0; 1[");
    }

    #[test]
    fn decimals() {
        let expr = parse("2.5").unwrap();
        assert!(matches!(expr, Expr::Num(ref num) if num.is_decimal()));
    }

    #[test]
    fn errors() {
        assert!(parse("").is_err());
        assert!(parse("1 +").is_err());
        assert!(parse("(1 + 2").unwrap_err().is::<crate::parser::error::UnclosedDelimiter>());
        assert!(parse("()").unwrap_err().is::<crate::parser::error::EmptyGroup>());
        assert!(parse("\\unknown").is_err());
        assert!(parse("1 ? 2").unwrap_err().is::<crate::parser::error::InvalidToken>());
    }
}
