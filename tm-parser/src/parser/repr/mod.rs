//! Abstract syntax tree of the self-description notation.
//!
//! The notation is a restricted constructor-call syntax:
//!
//! ```text
//! value   := call | literal | tuple | name
//! call    := name '(' args? ')' ('(' args? ')')?
//! args    := arg (',' arg)* ','?
//! arg     := (name '=')? value
//! tuple   := '(' ')' | '(' value ',' (value (',' value)* ','?)? ')'
//! literal := '-'? int | '-'? float | string | 'True' | 'False' | 'None'
//! ```
//!
//! The only nested call allowed is the two-call function application idiom, such as
//! `Function(name='f')(Symbol(s='x'))`. Nothing is resolved at this stage: names are kept as
//! written, and numeric literals keep their source text.

pub mod literal;

use crate::{
    parser::{error::{EmptyGroup, UnclosedDelimiter, UnexpectedToken}, Parse, Parser},
    tokenizer::repr::TokenKind,
};
use std::ops::Range;
use tm_error::Error;

pub use literal::{Literal, LitFloat, LitInt, LitStr};

/// A bare identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct Name {
    /// The identifier as written.
    pub name: String,

    /// The region of the source code that this name was parsed from.
    pub span: Range<usize>,
}

impl Parse<TokenKind> for Name {
    fn parse(input: &mut Parser<'_, TokenKind>) -> Result<Self, Error> {
        let token = input.next_token()?;
        if token.kind == TokenKind::Name {
            Ok(Self { name: token.lexeme.to_owned(), span: token.span })
        } else {
            Err(Error::new(vec![token.span], UnexpectedToken {
                expected: &["a name"],
                found: token.lexeme.to_owned(),
            }))
        }
    }
}

/// The thing being called in a [`Call`].
#[derive(Debug, Clone, PartialEq)]
pub enum Callee {
    /// A constructor name, such as `Integer` in `Integer(n=1)`.
    Name(Name),

    /// The result of another call, such as `Function(name='f')` in `Function(name='f')(x)`.
    Call(Box<Call>),
}

/// A single argument of a call, either positional or named.
#[derive(Debug, Clone, PartialEq)]
pub struct Arg {
    /// The name of the argument, if it was given as a keyword argument.
    pub name: Option<Name>,

    /// The value of the argument.
    pub value: Value,
}

impl Arg {
    /// Returns the span of the argument.
    pub fn span(&self) -> Range<usize> {
        match &self.name {
            Some(name) => name.span.start..self.value.span().end,
            None => self.value.span(),
        }
    }
}

impl Parse<TokenKind> for Arg {
    fn parse(input: &mut Parser<'_, TokenKind>) -> Result<Self, Error> {
        let name = input.try_parse_with_fn(|input| {
            let name = Name::parse(input)?;
            let token = input.next_token()?;
            if token.kind == TokenKind::Assign {
                Ok(name)
            } else {
                Err(Error::new(vec![token.span], UnexpectedToken {
                    expected: &["="],
                    found: token.lexeme.to_owned(),
                }))
            }
        }).ok();

        Ok(Self {
            name,
            value: Value::parse(input)?,
        })
    }
}

/// A constructor call, such as `Integer(n=1)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    /// The thing being called.
    pub callee: Callee,

    /// The arguments, in the order they were written.
    pub args: Vec<Arg>,

    /// The region of the source code that this call was parsed from.
    pub span: Range<usize>,
}

impl Call {
    /// Returns the span of the call.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Parses the parenthesized argument list that follows a callee.
    fn parse_args(input: &mut Parser<'_, TokenKind>) -> Result<(Vec<Arg>, Range<usize>), Error> {
        let open = input.next_token()?;
        if open.kind != TokenKind::OpenParen {
            return Err(Error::new(vec![open.span], UnexpectedToken {
                expected: &["("],
                found: open.lexeme.to_owned(),
            }));
        }

        let mut args = Vec::new();
        loop {
            if let Some(close) = input.eat(TokenKind::CloseParen) {
                return Ok((args, open.span.start..close.span.end));
            }

            args.push(Arg::parse(input)?);

            if input.eat(TokenKind::Comma).is_none() {
                return match input.eat(TokenKind::CloseParen) {
                    Some(close) => Ok((args, open.span.start..close.span.end)),
                    None => Err(Error::new(vec![open.span], UnclosedDelimiter { closing: ")" })),
                };
            }
        }
    }
}

impl Parse<TokenKind> for Call {
    fn parse(input: &mut Parser<'_, TokenKind>) -> Result<Self, Error> {
        let name = Name::parse(input)?;
        let (args, args_span) = Self::parse_args(input)?;
        let call = Call {
            span: name.span.start..args_span.end,
            callee: Callee::Name(name),
            args,
        };

        // the two-call idiom: `Function(name='f')(arg)`
        if input.peek_kind() == Some(TokenKind::OpenParen) {
            let (args, args_span) = Self::parse_args(input)?;
            return Ok(Call {
                span: call.span.start..args_span.end,
                callee: Callee::Call(Box::new(call)),
                args,
            });
        }

        Ok(call)
    }
}

/// A tuple of values, such as `(Symbol(s='x'), Symbol(s='y'))`.
#[derive(Debug, Clone, PartialEq)]
pub struct Tuple {
    /// The elements of the tuple.
    pub items: Vec<Value>,

    /// The region of the source code that this tuple was parsed from.
    pub span: Range<usize>,
}

/// Any value of the self-description notation.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Call(Call),
    Literal(Literal),
    Tuple(Tuple),

    /// A bare identifier that is not a call or a keyword literal.
    Name(Name),
}

impl Value {
    /// Returns the span of the value.
    pub fn span(&self) -> Range<usize> {
        match self {
            Value::Call(call) => call.span(),
            Value::Literal(literal) => literal.span(),
            Value::Tuple(tuple) => tuple.span.clone(),
            Value::Name(name) => name.span.clone(),
        }
    }

    /// Parses a parenthesized value: either a tuple or a single value in grouping parentheses.
    fn parse_group(input: &mut Parser<'_, TokenKind>) -> Result<Self, Error> {
        let open = input.next_token()?;
        if let Some(close) = input.eat(TokenKind::CloseParen) {
            return Ok(Value::Tuple(Tuple { items: Vec::new(), span: open.span.start..close.span.end }));
        }

        let mut items = vec![Value::parse(input)?];
        let mut is_tuple = false;
        while input.eat(TokenKind::Comma).is_some() {
            is_tuple = true;
            if input.peek_kind() == Some(TokenKind::CloseParen) {
                break;
            }
            items.push(Value::parse(input)?);
        }

        let close = input.eat(TokenKind::CloseParen)
            .ok_or_else(|| Error::new(vec![open.span.clone()], UnclosedDelimiter { closing: ")" }))?;

        match (is_tuple, items.pop()) {
            (false, Some(value)) => Ok(value),
            (true, Some(last)) => {
                items.push(last);
                Ok(Value::Tuple(Tuple { items, span: open.span.start..close.span.end }))
            },
            (_, None) => Err(Error::new(vec![open.span.start..close.span.end], EmptyGroup)),
        }
    }
}

impl Parse<TokenKind> for Value {
    fn parse(input: &mut Parser<'_, TokenKind>) -> Result<Self, Error> {
        match input.peek_kind() {
            Some(TokenKind::OpenParen) => Self::parse_group(input),
            Some(TokenKind::Name) => {
                if let Ok(literal) = input.try_parse::<Literal>() {
                    return Ok(Value::Literal(literal));
                }

                // clone the input stream to emulate peeking past the name
                let mut input_ahead = input.clone();
                input_ahead.next_token()?;
                if input_ahead.peek_kind() == Some(TokenKind::OpenParen) {
                    Call::parse(input).map(Value::Call)
                } else {
                    Name::parse(input).map(Value::Name)
                }
            },
            _ => input.try_parse::<Literal>().map(Value::Literal),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn parse(source: &str) -> Result<Value, Error> {
        Parser::<TokenKind>::new(source)?.try_parse_full::<Value>()
    }

    fn name(value: &Value) -> &str {
        match value {
            Value::Call(Call { callee: Callee::Name(name), .. }) => &name.name,
            other => panic!("expected a named call, got {:?}", other),
        }
    }

    #[test]
    fn integer() {
        let value = parse("Integer(n=5)").unwrap();
        let Value::Call(call) = value else { panic!("expected a call") };
        assert_eq!(call.span, 0..12);
        assert_eq!(call.args.len(), 1);
        assert_eq!(call.args[0].name.as_ref().map(|n| n.name.as_str()), Some("n"));
        assert_eq!(call.args[0].value, Value::Literal(Literal::Int(LitInt {
            value: "5".to_string(),
            span: 10..11,
        })));
    }

    #[test]
    fn nested_and_negative() {
        let value = parse("Add(l=Integer(n=-3), r=Symbol(s='x'))").unwrap();
        assert_eq!(name(&value), "Add");
        let Value::Call(call) = value else { unreachable!() };
        assert_eq!(name(&call.args[0].value), "Integer");
        let Value::Call(inner) = &call.args[0].value else { unreachable!() };
        assert_eq!(inner.args[0].value, Value::Literal(Literal::Int(LitInt {
            value: "-3".to_string(),
            span: 16..18,
        })));
    }

    #[test]
    fn positional_args() {
        let value = parse("Fraction(Integer(n=1), Integer(n=2))").unwrap();
        let Value::Call(call) = value else { panic!("expected a call") };
        assert!(call.args.iter().all(|arg| arg.name.is_none()));
        assert_eq!(call.args.len(), 2);
    }

    #[test]
    fn function_application() {
        let value = parse("Function(name='f')(Symbol(s='x'))").unwrap();
        let Value::Call(call) = value else { panic!("expected a call") };
        let Callee::Call(inner) = &call.callee else { panic!("expected a nested callee") };
        assert_eq!(inner.args[0].value, Value::Literal(Literal::Str(LitStr {
            value: "f".to_string(),
            span: 14..17,
        })));
        assert_eq!(call.args.len(), 1);
    }

    #[test]
    fn bare_name_argument() {
        let value = parse("Function(name=f)").unwrap();
        let Value::Call(call) = value else { panic!("expected a call") };
        assert!(matches!(&call.args[0].value, Value::Name(name) if name.name == "f"));
    }

    #[test]
    fn tuples() {
        assert!(matches!(parse("(Pi(), Inf())").unwrap(), Value::Tuple(t) if t.items.len() == 2));
        assert!(matches!(parse("(Pi(),)").unwrap(), Value::Tuple(t) if t.items.len() == 1));
        assert!(matches!(parse("()").unwrap(), Value::Tuple(t) if t.items.is_empty()));
        assert!(matches!(parse("(Pi())").unwrap(), Value::Call(_)));
    }

    #[test]
    fn keyword_literals() {
        let value = parse("Interval(left_open=True, right_open=False, x=None)").unwrap();
        let Value::Call(call) = value else { panic!("expected a call") };
        assert_eq!(call.args[0].value, Value::Literal(Literal::Bool(true, 19..23)));
        assert_eq!(call.args[1].value, Value::Literal(Literal::Bool(false, 36..41)));
        assert_eq!(call.args[2].value, Value::Literal(Literal::None(45..49)));
    }

    #[test]
    fn unclosed_call() {
        let err = parse("Integer(n=5").unwrap_err();
        assert!(err.is::<UnclosedDelimiter>());
    }

    #[test]
    fn trailing_input() {
        let err = parse("Pi() Pi()").unwrap_err();
        assert!(err.is::<crate::parser::error::ExpectedEof>());
        assert_eq!(err.spans, vec![5..7]);
    }

    #[test]
    fn three_calls_rejected() {
        assert!(parse("Function(name='f')(Pi())(Pi())").is_err());
    }
}
