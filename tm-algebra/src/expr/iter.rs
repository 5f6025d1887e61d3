use super::{Primary, SymExpr};

impl SymExpr {
    /// Returns the direct children of the expression, from left to right. The arguments of a
    /// function call are its children.
    pub fn children(&self) -> Vec<&SymExpr> {
        match self {
            SymExpr::Primary(Primary::Call(_, args)) => args.iter().collect(),
            SymExpr::Primary(_) => Vec::new(),
            SymExpr::Add(exprs) | SymExpr::Mul(exprs) | SymExpr::Tuple(exprs) => exprs.iter().collect(),
            SymExpr::Exp(lhs, rhs) | SymExpr::Eq(lhs, rhs) | SymExpr::Greater(lhs, rhs) => vec![&**lhs, &**rhs],
            SymExpr::Interval { left, right, .. } => vec![&**left, &**right],
        }
    }
}

/// Depth-first, left-to-right traversal that yields every child before its parent.
///
/// Created by [`SymExpr::post_order_iter`].
pub struct ExprIter<'a> {
    /// Pending expressions, each flagged with whether its children were already pushed.
    pending: Vec<(&'a SymExpr, bool)>,
}

impl<'a> ExprIter<'a> {
    pub fn new(expr: &'a SymExpr) -> Self {
        Self { pending: vec![(expr, false)] }
    }
}

impl<'a> Iterator for ExprIter<'a> {
    type Item = &'a SymExpr;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (expr, expanded) = self.pending.pop()?;
            if expanded {
                return Some(expr);
            }

            self.pending.push((expr, true));
            self.pending.extend(expr.children().into_iter().rev().map(|child| (child, false)));
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::primitive::int;
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn post_order() {
        let x = SymExpr::Primary(Primary::Symbol("x".to_string()));
        let expr = SymExpr::Add(vec![
            SymExpr::Exp(Box::new(x.clone()), Box::new(SymExpr::from(int(2)))),
            SymExpr::from(int(1)),
        ]);
        let visited = expr.post_order_iter().map(|e| e.to_string()).collect::<Vec<_>>();
        assert_eq!(visited, vec!["x", "2", "x^2", "1", "x^2 + 1"]);
    }

    #[test]
    fn leaves_are_yielded_once() {
        let leaf = SymExpr::from(int(7));
        assert_eq!(leaf.post_order_iter().count(), 1);
    }
}
