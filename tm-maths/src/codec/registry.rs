//! The constructors of the self-description notation, and the interpretation of parsed values.
//!
//! Every node kind has one constructor, whose parameters are named after the fields printed by
//! the [`Display`](std::fmt::Display) implementation of [`Node`]. Arguments can be given by
//! position or by keyword, in the same way as the fields are printed.

use crate::{
    error::{
        DuplicateArgument,
        Error,
        MissingArgument,
        NotAnExpression,
        TooManyArguments,
        TypeMismatch,
        UnexpectedArgument,
        UnknownConstructor,
    },
    node::{Decimal, Function, Node},
};
use levenshtein::levenshtein;
use rug::Integer;
use std::ops::Range;
use tm_algebra::primitive::int_from_str;
use tm_parser::parser::{
    error::InvalidNumber,
    repr::{Arg, Call, Callee, Literal, Value},
};

/// The kind of a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// The argument must be given.
    Required,

    /// The argument can be omitted, or given as `None`.
    Optional,
}

/// The type of value a parameter accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamType {
    /// Any expression. An integer literal is accepted as an [`Integer`](crate::NodeKind::Integer).
    Node,

    /// An integer literal.
    Int,

    /// A number literal.
    Float,

    /// A string literal.
    Str,

    /// A string literal or a bare name.
    Label,

    /// `True` or `False`.
    Bool,
}

impl ParamType {
    /// Describes the values of this type, for error messages.
    fn description(self) -> &'static str {
        match self {
            ParamType::Node => "an expression",
            ParamType::Int => "an integer",
            ParamType::Float => "a number",
            ParamType::Str => "a string",
            ParamType::Label => "a string or a name",
            ParamType::Bool => "`True` or `False`",
        }
    }
}

/// A parameter of a constructor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Param {
    /// The name of the parameter, usable as a keyword.
    pub name: &'static str,

    /// Whether the parameter is required.
    pub kind: ParamKind,

    /// The type of the parameter.
    pub typename: ParamType,
}

const fn required(name: &'static str, typename: ParamType) -> Param {
    Param { name, kind: ParamKind::Required, typename }
}

const fn optional(name: &'static str, typename: ParamType) -> Param {
    Param { name, kind: ParamKind::Optional, typename }
}

/// A constructor of the self-description notation.
#[derive(Clone, Copy)]
pub struct Constructor {
    /// The name of the constructor, which is the name of the node kind it builds.
    pub name: &'static str,

    /// The parameters, in positional order.
    pub params: &'static [Param],

    build: fn(&Args<'_>) -> Result<Node, Error>,
}

/// Every constructor that produces a node.
pub const CONSTRUCTORS: &[Constructor] = &[
    Constructor {
        name: "Integer",
        params: &[required("n", ParamType::Int)],
        build: |args| Ok(Node::integer(args.int(0)?)),
    },
    Constructor {
        name: "Decimal",
        params: &[
            optional("p", ParamType::Int),
            optional("q", ParamType::Int),
            optional("x", ParamType::Float),
        ],
        build: |args| {
            Decimal::new(args.opt_int(0)?, args.opt_int(1)?, args.opt_float(2)?).map(Node::decimal)
        },
    },
    Constructor {
        name: "Symbol",
        params: &[required("s", ParamType::Str)],
        build: |args| Node::symbol(args.string(0)?),
    },
    Constructor {
        name: "Pi",
        params: &[],
        build: |_| Ok(Node::pi()),
    },
    Constructor {
        name: "Inf",
        params: &[],
        build: |_| Ok(Node::inf()),
    },
    Constructor {
        name: "Add",
        params: &[required("l", ParamType::Node), required("r", ParamType::Node)],
        build: |args| Ok(Node::sum(args.node(0)?, args.node(1)?)),
    },
    Constructor {
        name: "Mul",
        params: &[required("l", ParamType::Node), required("r", ParamType::Node)],
        build: |args| Ok(Node::product(args.node(0)?, args.node(1)?)),
    },
    Constructor {
        name: "Fraction",
        params: &[required("p", ParamType::Node), required("q", ParamType::Node)],
        build: |args| Node::fraction(args.node(0)?, args.node(1)?),
    },
    Constructor {
        name: "Pow",
        params: &[required("base", ParamType::Node), required("exp", ParamType::Node)],
        build: |args| Ok(Node::power(args.node(0)?, args.node(1)?)),
    },
    Constructor {
        name: "Equality",
        params: &[required("l", ParamType::Node), required("r", ParamType::Node)],
        build: |args| Ok(Node::equality(args.node(0)?, args.node(1)?)),
    },
    Constructor {
        name: "StrictGreaterThan",
        params: &[required("l", ParamType::Node), required("r", ParamType::Node)],
        build: |args| Ok(Node::greater_than(args.node(0)?, args.node(1)?)),
    },
    Constructor {
        name: "Interval",
        params: &[
            required("l", ParamType::Node),
            required("r", ParamType::Node),
            optional("left_open", ParamType::Bool),
            optional("right_open", ParamType::Bool),
        ],
        build: |args| {
            Node::interval(args.node(0)?, args.node(1)?, args.flag(2)?, args.flag(3)?)
        },
    },
];

/// The name of the function label constructor. It is not in [`CONSTRUCTORS`], since a label is
/// not an expression and can only be applied.
const FUNCTION: &str = "Function";

/// The parameters of the function label constructor.
const FUNCTION_PARAMS: &[Param] = &[required("name", ParamType::Label)];

/// Creates a parse error pointing at the given spans.
fn error(spans: Vec<Range<usize>>, kind: impl tm_error::ErrorKind + 'static) -> Error {
    Error::Parse(tm_error::Error::new(spans, kind))
}

/// Describes a value, for error messages.
fn describe(value: &Value) -> &'static str {
    match value {
        Value::Call(Call { callee: Callee::Name(name), .. }) if name.name == FUNCTION => {
            "a function label"
        },
        Value::Call(_) => "an expression",
        Value::Literal(Literal::Int(_)) => "an integer",
        Value::Literal(Literal::Float(_)) => "a number",
        Value::Literal(Literal::Str(_)) => "a string",
        Value::Literal(Literal::Bool(..)) => "a boolean",
        Value::Literal(Literal::None(_)) => "`None`",
        Value::Tuple(_) => "a tuple",
        Value::Name(_) => "a bare name",
    }
}

/// Looks up a constructor by name, suggesting similar names if there is none.
fn lookup(name: &str, span: Range<usize>) -> Result<&'static Constructor, Error> {
    CONSTRUCTORS
        .iter()
        .find(|constructor| constructor.name == name)
        .ok_or_else(|| {
            let suggestions = CONSTRUCTORS
                .iter()
                .map(|constructor| constructor.name)
                .chain(std::iter::once(FUNCTION))
                .filter(|candidate| levenshtein(candidate, name) < 3)
                .map(str::to_string)
                .collect();
            error(vec![span], UnknownConstructor { name: name.to_string(), suggestions })
        })
}

/// The arguments of a call, bound to the parameters of its constructor.
pub(crate) struct Args<'a> {
    constructor: &'static str,
    params: &'static [Param],
    call: &'a Call,
    slots: Vec<Option<&'a Arg>>,
}

impl<'a> Args<'a> {
    /// Binds the arguments of the call to the parameters: positional arguments first, in order,
    /// then keyword arguments by name.
    fn bind(constructor: &'static str, params: &'static [Param], call: &'a Call) -> Result<Self, Error> {
        let mut slots = vec![None; params.len()];
        let mut next_positional = 0;

        for arg in &call.args {
            let index = match &arg.name {
                Some(name) => params
                    .iter()
                    .position(|param| param.name == name.name)
                    .ok_or_else(|| error(vec![call.span(), arg.span()], UnexpectedArgument {
                        constructor: constructor.to_string(),
                        name: name.name.clone(),
                        params: params.iter().map(|param| param.name).collect(),
                    }))?,
                None => {
                    let index = next_positional;
                    next_positional += 1;
                    if index >= params.len() {
                        return Err(error(vec![call.span(), arg.span()], TooManyArguments {
                            constructor: constructor.to_string(),
                            expected: params.len(),
                            given: call.args.len(),
                        }));
                    }
                    index
                },
            };

            if slots[index].is_some() {
                return Err(error(vec![call.span(), arg.span()], DuplicateArgument {
                    name: params[index].name,
                }));
            }
            slots[index] = Some(arg);
        }

        let args = Self { constructor, params, call, slots };
        for (index, param) in params.iter().enumerate() {
            if param.kind == ParamKind::Required {
                args.require(index)?;
            }
        }
        Ok(args)
    }

    /// Returns the argument for the parameter, unless it was omitted or given as `None`.
    fn get(&self, index: usize) -> Option<&'a Arg> {
        self.slots[index].filter(|arg| !matches!(arg.value, Value::Literal(Literal::None(_))))
    }

    /// Returns the argument for the parameter, failing if there is none.
    fn require(&self, index: usize) -> Result<&'a Arg, Error> {
        self.get(index).ok_or_else(|| error(vec![self.call.span()], MissingArgument {
            constructor: self.constructor.to_string(),
            param: self.params[index].name,
        }))
    }

    /// Reports that the argument does not have the type of its parameter.
    fn mismatch(&self, index: usize, arg: &Arg) -> Error {
        let param = self.params[index];
        error(vec![self.call.span(), arg.span()], TypeMismatch {
            param: param.name,
            expected: param.typename.description(),
            given: describe(&arg.value),
        })
    }

    fn node(&self, index: usize) -> Result<Node, Error> {
        let arg = self.require(index)?;
        match &arg.value {
            Value::Call(_) | Value::Tuple(_) | Value::Literal(Literal::Int(_)) => interpret(&arg.value),
            _ => Err(self.mismatch(index, arg)),
        }
    }

    fn int(&self, index: usize) -> Result<Integer, Error> {
        let arg = self.require(index)?;
        match &arg.value {
            Value::Literal(Literal::Int(int)) => parse_int(&int.value, int.span.clone()),
            _ => Err(self.mismatch(index, arg)),
        }
    }

    fn opt_int(&self, index: usize) -> Result<Option<Integer>, Error> {
        self.get(index).map(|_| self.int(index)).transpose()
    }

    fn opt_float(&self, index: usize) -> Result<Option<f64>, Error> {
        let Some(arg) = self.get(index) else {
            return Ok(None);
        };
        let (lexeme, span) = match &arg.value {
            Value::Literal(Literal::Int(int)) => (&int.value, int.span.clone()),
            Value::Literal(Literal::Float(float)) => (&float.value, float.span.clone()),
            _ => return Err(self.mismatch(index, arg)),
        };
        lexeme
            .parse::<f64>()
            .map(Some)
            .map_err(|_| error(vec![span], InvalidNumber { lexeme: lexeme.clone() }))
    }

    fn string(&self, index: usize) -> Result<String, Error> {
        let arg = self.require(index)?;
        match &arg.value {
            Value::Literal(Literal::Str(string)) => Ok(string.value.clone()),
            _ => Err(self.mismatch(index, arg)),
        }
    }

    fn label(&self, index: usize) -> Result<String, Error> {
        let arg = self.require(index)?;
        match &arg.value {
            Value::Literal(Literal::Str(string)) => Ok(string.value.clone()),
            Value::Name(name) => Ok(name.name.clone()),
            _ => Err(self.mismatch(index, arg)),
        }
    }

    /// Returns the boolean argument, which is `false` if omitted.
    fn flag(&self, index: usize) -> Result<bool, Error> {
        let Some(arg) = self.get(index) else {
            return Ok(false);
        };
        match &arg.value {
            Value::Literal(Literal::Bool(value, _)) => Ok(*value),
            _ => Err(self.mismatch(index, arg)),
        }
    }
}

fn parse_int(lexeme: &str, span: Range<usize>) -> Result<Integer, Error> {
    int_from_str(lexeme).ok_or_else(|| error(vec![span], InvalidNumber { lexeme: lexeme.to_string() }))
}

/// Interprets a parsed value as a node.
pub(crate) fn interpret(value: &Value) -> Result<Node, Error> {
    match value {
        Value::Call(call) => interpret_call(call),
        Value::Tuple(tuple) => Ok(Node::collection(
            tuple.items.iter().map(interpret).collect::<Result<Vec<_>, _>>()?,
        )),
        Value::Literal(Literal::Int(int)) => parse_int(&int.value, int.span.clone()).map(Node::integer),
        other => Err(error(vec![other.span()], NotAnExpression { found: describe(other) })),
    }
}

fn interpret_call(call: &Call) -> Result<Node, Error> {
    match &call.callee {
        Callee::Name(name) if name.name == FUNCTION => {
            Err(error(vec![call.span()], NotAnExpression { found: "a function label" }))
        },
        Callee::Name(name) => {
            let constructor = lookup(&name.name, name.span.clone())?;
            let args = Args::bind(constructor.name, constructor.params, call)?;
            (constructor.build)(&args)
        },
        Callee::Call(label) => {
            let function = interpret_function(label)?;
            let mut arguments = Vec::with_capacity(call.args.len());
            for arg in &call.args {
                if let Some(name) = &arg.name {
                    return Err(error(vec![call.span(), arg.span()], UnexpectedArgument {
                        constructor: function.name().to_string(),
                        name: name.name.clone(),
                        params: Vec::new(),
                    }));
                }
                arguments.push(interpret(&arg.value)?);
            }

            if arguments.is_empty() {
                return Err(error(vec![call.span()], MissingArgument {
                    constructor: function.name().to_string(),
                    param: "argument",
                }));
            }
            Ok(function.apply_all(arguments))
        },
    }
}

/// Interprets the callee of a function application, which must be a function label.
fn interpret_function(call: &Call) -> Result<Function, Error> {
    match &call.callee {
        Callee::Name(name) if name.name == FUNCTION => {
            let args = Args::bind(FUNCTION, FUNCTION_PARAMS, call)?;
            Function::new(args.label(0)?)
        },
        Callee::Name(name) => {
            // an unknown name gets the usual suggestions; a known one is not a function
            lookup(&name.name, name.span.clone())?;
            Err(error(vec![call.span()], NotAnExpression { found: "an expression used as a function" }))
        },
        Callee::Call(_) => Err(error(vec![call.span()], NotAnExpression { found: "a nested application" })),
    }
}
