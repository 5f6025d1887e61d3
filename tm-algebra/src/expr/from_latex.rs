use crate::primitive::{float_from_str, int, int_from_str};
use rug::Rational;
use super::{Primary, SymExpr};
use tm_error::Error;
use tm_parser::{
    parser::{error::InvalidNumber, latex::{BinOpKind, Expr, LitNum}, Parser},
    tokenizer::latex::TokenKind,
};

/// Converts a number literal, which is a float if it contains a decimal point.
fn from_lit_num(num: &LitNum) -> Result<SymExpr, Error> {
    let invalid = || Error::new(vec![num.span.clone()], InvalidNumber { lexeme: num.value.clone() });
    if num.is_decimal() {
        float_from_str(&num.value).map(SymExpr::from).ok_or_else(invalid)
    } else {
        int_from_str(&num.value).map(SymExpr::from).ok_or_else(invalid)
    }
}

/// Creates the expression `numerator * denominator^-1`. No simplification is done.
pub(crate) fn make_fraction(numerator: SymExpr, denominator: SymExpr) -> SymExpr {
    numerator * denominator.recip()
}

/// Converts a parsed free-text expression into a [`SymExpr`].
///
/// The conversion is purely structural: sums and products are flattened, `a - b` becomes
/// `a + (-1)*b`, `a / b` and `\frac{a}{b}` become `a * b^-1`, radicals become fractional powers
/// and `a < b` becomes `b > a`. No arithmetic is performed, except that negating a number literal
/// negates the number.
///
/// ```
/// use tm_algebra::expr::{from_latex, Primary, SymExpr};
/// use tm_parser::{parser::{latex::Expr, Parser}, tokenizer::latex::TokenKind};
///
/// let ast = Parser::<TokenKind>::new("x + (y + z)")
///     .and_then(|mut parser| parser.try_parse_full::<Expr>())
///     .unwrap();
/// let sym = |s: &str| SymExpr::Primary(Primary::Symbol(s.to_string()));
/// assert_eq!(from_latex(&ast).unwrap(), SymExpr::Add(vec![sym("x"), sym("y"), sym("z")]));
/// ```
pub fn from_latex(expr: &Expr) -> Result<SymExpr, Error> {
    Ok(match expr {
        Expr::Num(num) => from_lit_num(num)?,
        Expr::Sym(sym) => SymExpr::Primary(Primary::Symbol(sym.name.clone())),
        Expr::Pi(_) => SymExpr::Primary(Primary::Pi),
        Expr::Infinity(_) => SymExpr::Primary(Primary::Infinity),
        Expr::Paren(paren) => from_latex(&paren.expr)?,
        Expr::Tuple(tuple) => SymExpr::Tuple(
            tuple.items.iter().map(from_latex).collect::<Result<_, _>>()?,
        ),
        Expr::Call(call) => SymExpr::Primary(Primary::Call(
            call.name.name.clone(),
            call.args.iter().map(from_latex).collect::<Result<_, _>>()?,
        )),
        Expr::Frac(frac) => make_fraction(from_latex(&frac.numerator)?, from_latex(&frac.denominator)?),
        Expr::Sqrt(sqrt) => {
            let radicand = from_latex(&sqrt.radicand)?;
            let exponent = match &sqrt.index {
                None => SymExpr::from(Rational::from((1, 2))),
                Some(index) => match from_latex(index)? {
                    SymExpr::Primary(Primary::Integer(n)) if !n.is_zero() => {
                        SymExpr::from(Rational::from((int(1), n)))
                    },
                    index => index.recip(),
                },
            };
            radicand.pow(exponent)
        },
        Expr::Interval(interval) => SymExpr::Interval {
            left: Box::new(from_latex(&interval.left)?),
            right: Box::new(from_latex(&interval.right)?),
            left_open: interval.left_open,
            right_open: interval.right_open,
        },
        Expr::Neg(neg) => -from_latex(&neg.operand)?,
        Expr::Binary(binary) => {
            let lhs = from_latex(&binary.lhs)?;
            let rhs = from_latex(&binary.rhs)?;
            match binary.op.kind {
                BinOpKind::Add => lhs + rhs,
                BinOpKind::Sub => lhs + -rhs,
                BinOpKind::Mul => lhs * rhs,
                BinOpKind::Div => make_fraction(lhs, rhs),
                BinOpKind::Exp => lhs.pow(rhs),
                BinOpKind::Eq => SymExpr::Eq(Box::new(lhs), Box::new(rhs)),
                BinOpKind::Greater => SymExpr::Greater(Box::new(lhs), Box::new(rhs)),
                BinOpKind::Less => SymExpr::Greater(Box::new(rhs), Box::new(lhs)),
            }
        },
    })
}

/// Parses free-text notation, such as `3x^{2} - \dfrac{1}{2}`, and converts it into a [`SymExpr`].
pub fn parse_latex(text: &str) -> Result<SymExpr, Error> {
    let ast = Parser::<TokenKind>::new(text)?.try_parse_full::<Expr>()?;
    from_latex(&ast)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn parse(input: &str) -> SymExpr {
        parse_latex(input).unwrap()
    }

    fn sym(name: &str) -> SymExpr {
        SymExpr::Primary(Primary::Symbol(name.to_string()))
    }

    #[test]
    fn subtraction_and_implicit_multiplication() {
        assert_eq!(parse("3x - 8"), SymExpr::Add(vec![
            SymExpr::Mul(vec![SymExpr::from(int(3)), sym("x")]),
            SymExpr::from(int(-8)),
        ]));
    }

    #[test]
    fn fractions_are_reciprocals() {
        assert_eq!(parse(r"\frac{1}{x}"), SymExpr::Mul(vec![
            SymExpr::from(int(1)),
            sym("x").recip(),
        ]));
    }

    #[test]
    fn radicals() {
        assert_eq!(parse(r"\sqrt{4}"), SymExpr::from(int(4)).pow(SymExpr::from(Rational::from((1, 2)))));
        assert_eq!(parse(r"\sqrt[3]{x}"), sym("x").pow(SymExpr::from(Rational::from((1, 3)))));
    }

    #[test]
    fn relations() {
        assert_eq!(
            parse("x < 2"),
            SymExpr::Greater(Box::new(SymExpr::from(int(2))), Box::new(sym("x"))),
        );
    }

    #[test]
    fn decimals_are_floats() {
        assert!(parse("0.25").is_float());
    }

    #[test]
    fn syntax_errors_propagate() {
        assert!(parse_latex(r"\frac{1}{").is_err());
    }
}
