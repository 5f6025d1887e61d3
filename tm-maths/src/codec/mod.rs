//! Conversions between expression trees and other representations.
//!
//! - The **self-description** of a node is its [`Display`](std::fmt::Display) output, a
//!   constructor call such as `Add(l=Integer(n=1), r=Symbol(s='x'))`. [`from_repr`] reads it back,
//!   so that `from_repr(&node.to_string())` is equal to `node` for every node.
//! - The **backend expression** of a node is its [`SymExpr`](tm_algebra::SymExpr). Every node
//!   carries one (see [`Node::backend`]), and [`from_backend`] translates backend results, such as
//!   simplified expressions, back into trees.
//!
//! With the `serde` feature, nodes serialize to their self-description.

pub mod backend;
mod describe;
pub mod registry;

pub use backend::{from_backend, from_backend_with};

use crate::{error::Error, node::Node};
use tm_parser::{
    parser::{repr::Value, Parser},
    tokenizer::repr::TokenKind,
};

/// Reads a node from its self-description.
///
/// ```
/// use tm_maths::{codec::from_repr, Node};
///
/// let node = from_repr("Fraction(p=Integer(n=1), q=Symbol(s='x'))").unwrap();
/// assert_eq!(node, Node::fraction(Node::integer(1), Node::symbol("x").unwrap()).unwrap());
/// assert_eq!(node.to_string(), "Fraction(p=Integer(n=1), q=Symbol(s='x'))");
/// ```
pub fn from_repr(text: &str) -> Result<Node, Error> {
    let value = Parser::<TokenKind>::new(text)
        .and_then(|mut parser| parser.try_parse_full::<Value>())
        .map_err(Error::Parse)?;
    registry::interpret(&value)
}

#[cfg(feature = "serde")]
impl serde::Serialize for Node {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Node {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = <String as serde::Deserialize>::deserialize(deserializer)?;
        from_repr(&text).map_err(serde::de::Error::custom)
    }
}
