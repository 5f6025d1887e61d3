//! Tokenizers and parsers for the two textual notations understood by `tm-maths`.
//!
//! - The **self-description** notation ([`parser::repr`]) is a restricted constructor-call
//!   syntax, such as `Add(l=Integer(n=1), r=Symbol(s='x'))`. It is the storage and debugging
//!   format of expression trees.
//! - The **free-text** notation ([`parser::latex`]) is the markup that learners and instructors
//!   type, such as `\dfrac{1}{2}x^{2} - 3`.
//!
//! Both grammars share the same backtracking [`Parser`](parser::Parser), which is generic over
//! the kind of token it consumes. Parsing never evaluates anything; it only produces an abstract
//! syntax tree, which the consumers of this crate interpret.

pub mod parser;
pub mod tokenizer;
