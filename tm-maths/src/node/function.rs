use crate::error::{EmptyName, Error};
use super::Node;

/// The label of a function, such as `f`.
///
/// A function label is not an expression by itself: it cannot be added, multiplied or
/// simplified. Applying it to arguments produces an expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Function {
    name: String,
}

impl Function {
    /// Creates a function label. The name cannot be empty.
    pub fn new(name: impl Into<String>) -> Result<Self, Error> {
        let name = name.into();
        if name.is_empty() {
            return Err(Error::validation(EmptyName { what: "function" }));
        }
        Ok(Self { name })
    }

    /// Returns the name of the function.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Applies the function to a single argument, such as `f(x)`.
    pub fn apply(&self, argument: Node) -> Node {
        Node::image(self.clone(), argument)
    }

    /// Applies the function to any number of arguments, such as `g(x, y)`. A single argument is
    /// passed as is; otherwise the arguments are wrapped in a collection.
    pub fn apply_all(&self, arguments: impl IntoIterator<Item = Node>) -> Node {
        let mut arguments = arguments.into_iter().collect::<Vec<_>>();
        if arguments.len() == 1 {
            self.apply(arguments.remove(0))
        } else {
            self.apply(Node::collection(arguments))
        }
    }
}
