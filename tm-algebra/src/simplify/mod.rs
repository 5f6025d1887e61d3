//! Module to simplify and expand expressions.
//!
//! This module provides the [`simplify`] function, which rewrites an expression into an
//! equivalent, expanded form. It does this by repeatedly applying rewriting rules to the
//! expression in multiple passes, until no more rules apply, and then sorting the result into the
//! canonical order described in [`crate::order`].
//!
//! Every sum of products is expanded: `(x + 1)(x - 1)` becomes `x^2 - 1`. Powers of sums are
//! expanded up to [`Options::max_expand_power`].

pub mod rules;
pub mod step;
pub mod step_collector;

use crate::{expr::SymExpr, order};
use step::Step;
use step_collector::{StepCollector, Traced};

/// Options that control the simplifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    /// The largest integer power of a sum that is expanded. `(a+b)^n` with a larger `n` is left
    /// as a power.
    pub max_expand_power: u32,
}

impl Default for Options {
    fn default() -> Self {
        Self { max_expand_power: 8 }
    }
}

/// Simplifies every expression in the list.
fn simplify_all(
    exprs: &mut [SymExpr],
    options: &Options,
    step_collector: &mut dyn StepCollector<Step>,
) -> bool {
    let mut changed = false;
    for expr in exprs.iter_mut() {
        let result = inner_simplify_with(expr, options, step_collector);
        *expr = result.0;
        // use |= instead of = to not reset the variable to false if already true
        changed |= result.1;
    }
    changed
}

/// Base implementation of the simplification algorithm.
fn inner_simplify_with(
    expr: &SymExpr,
    options: &Options,
    step_collector: &mut dyn StepCollector<Step>,
) -> (SymExpr, bool) {
    let mut expr = expr.clone();
    let mut changed_at_least_once = false;

    loop {
        let mut changed_in_this_pass = false;

        // try to simplify this expression using all rules
        if let Some(new_expr) = rules::all(&expr, options, step_collector) {
            expr = new_expr;
            changed_in_this_pass = true;
        }

        // then begin recursing into the expression's children
        changed_in_this_pass |= match expr {
            SymExpr::Primary(crate::expr::Primary::Call(_, ref mut args)) => {
                simplify_all(args, options, step_collector)
            },
            SymExpr::Primary(_) => false,
            SymExpr::Add(ref mut exprs)
            | SymExpr::Mul(ref mut exprs)
            | SymExpr::Tuple(ref mut exprs) => simplify_all(exprs, options, step_collector),
            SymExpr::Exp(ref mut lhs, ref mut rhs)
            | SymExpr::Eq(ref mut lhs, ref mut rhs)
            | SymExpr::Greater(ref mut lhs, ref mut rhs)
            | SymExpr::Interval { left: ref mut lhs, right: ref mut rhs, .. } => {
                let result_l = inner_simplify_with(lhs, options, step_collector);
                let result_r = inner_simplify_with(rhs, options, step_collector);
                **lhs = result_l.0;
                **rhs = result_r.0;
                result_l.1 || result_r.1
            },
        };

        changed_at_least_once |= changed_in_this_pass;
        if !changed_in_this_pass {
            break;
        }
    }

    (expr, changed_at_least_once)
}

/// Simplify and expand the given expression with the default [`Options`].
pub fn simplify(expr: &SymExpr) -> SymExpr {
    simplify_with(expr, &Options::default())
}

/// Simplify and expand the given expression with the given [`Options`].
pub fn simplify_with(expr: &SymExpr, options: &Options) -> SymExpr {
    order::sort(inner_simplify_with(expr, options, &mut Traced::<Step>(&mut ())).0)
}

/// Simplify the given expression with the default [`Options`]. The steps taken by the simplifier
/// will also be collected and returned. This is useful for debugging, and also for displaying the
/// steps taken to the user.
pub fn simplify_with_steps(expr: &SymExpr) -> (SymExpr, Vec<Step>) {
    let mut steps = Vec::new();
    let expr = inner_simplify_with(expr, &Options::default(), &mut Traced::<Step>(&mut steps)).0;
    (order::sort(expr), steps)
}

#[cfg(test)]
mod tests {
    use crate::{expr::{parse_latex, Primary}, primitive::int};
    use pretty_assertions::assert_eq;
    use rug::Rational;
    use super::*;

    fn parse(input: &str) -> SymExpr {
        parse_latex(input).unwrap()
    }

    fn sym(name: &str) -> SymExpr {
        SymExpr::Primary(Primary::Symbol(name.to_string()))
    }

    #[test]
    fn add_rules() {
        // also tests multiply_zero
        let simplified = simplify(&parse("0+0(3x+5b^{2})+0+(3a)"));
        assert_eq!(simplified, SymExpr::Mul(vec![SymExpr::from(int(3)), sym("a")]));
    }

    #[test]
    fn multiply_rules() {
        let simplified = simplify(&parse("1*3*1*1*(1+(x^{2}+5x+6)*0)*1"));
        assert_eq!(simplified, SymExpr::from(int(3)));
    }

    #[test]
    fn combine_like_factors() {
        let simplified = simplify(&parse("a b a^{3} c^{2} a^{2} b^{4}"));
        assert_eq!(simplified, SymExpr::Mul(vec![
            sym("a").pow(SymExpr::from(int(6))),
            sym("b").pow(SymExpr::from(int(5))),
            sym("c").pow(SymExpr::from(int(2))),
        ]));
    }

    #[test]
    fn numeric_fractions() {
        assert_eq!(simplify(&parse(r"\frac{10}{5}")), SymExpr::from(int(2)));
        assert_eq!(simplify(&parse(r"\frac{-6}{9}")), SymExpr::from(Rational::from((-2, 3))));
        assert_eq!(simplify(&parse(r"\frac{1}{2} + \frac{1}{3}")), SymExpr::from(Rational::from((5, 6))));
        assert_eq!(simplify(&parse("10^{-2}")), SymExpr::from(Rational::from((1, 100))));
    }

    #[test]
    fn binomial_product() {
        let simplified = simplify(&parse("(3x-8)(4x-1)"));
        assert_eq!(simplified, SymExpr::Add(vec![
            SymExpr::Mul(vec![SymExpr::from(int(12)), sym("x").pow(SymExpr::from(int(2)))]),
            SymExpr::Mul(vec![SymExpr::from(int(-35)), sym("x")]),
            SymExpr::from(int(8)),
        ]));
    }

    #[test]
    fn difference_of_squares() {
        let simplified = simplify(&parse("(x+1)(x-1)"));
        assert_eq!(simplified, SymExpr::Add(vec![
            sym("x").pow(SymExpr::from(int(2))),
            SymExpr::from(int(-1)),
        ]));
    }

    #[test]
    fn expand_square() {
        let simplified = simplify(&parse("(a+b)^{2}"));
        assert_eq!(simplified, SymExpr::Add(vec![
            sym("a").pow(SymExpr::from(int(2))),
            SymExpr::Mul(vec![SymExpr::from(int(2)), sym("a"), sym("b")]),
            sym("b").pow(SymExpr::from(int(2))),
        ]));
    }

    #[test]
    fn expansion_limit() {
        let options = Options { max_expand_power: 2 };
        let cube = parse("(a+b)^{3}");
        assert_eq!(simplify_with(&cube, &options), cube);
    }

    #[test]
    fn cancellation() {
        assert_eq!(simplify(&parse(r"\frac{x+1}{x+1}")), SymExpr::from(int(1)));
        assert_eq!(simplify(&parse("x - x")), SymExpr::from(int(0)));
    }

    #[test]
    fn radicals() {
        assert_eq!(simplify(&parse(r"\sqrt{4}")), SymExpr::from(int(2)));
        assert_eq!(simplify(&parse(r"\sqrt{2}\sqrt{2}")), SymExpr::from(int(2)));

        // irrational roots are left alone
        let root = parse(r"\sqrt{8}");
        assert_eq!(simplify(&root), root);
    }

    #[test]
    fn power_rules() {
        assert_eq!(simplify(&parse("(1^{0})^{x}")), SymExpr::from(int(1)));
        assert_eq!(simplify(&parse("(0^{1})^{0}")), SymExpr::from(int(1)));
        assert_eq!(simplify(&parse("(x^{2})^{3}")), sym("x").pow(SymExpr::from(int(6))));
    }

    #[test]
    fn simplifies_inside_relations() {
        let simplified = simplify(&parse("2x + 3x = 10"));
        assert_eq!(simplified, SymExpr::Eq(
            Box::new(SymExpr::Mul(vec![SymExpr::from(int(5)), sym("x")])),
            Box::new(SymExpr::from(int(10))),
        ));
    }

    #[test]
    fn power_rule_steps() {
        let (simplified, steps) = simplify_with_steps(&parse("(1^{0})^{x}"));
        assert_eq!(simplified, SymExpr::from(int(1)));
        assert_eq!(steps, vec![Step::PowerZero, Step::PowerOneLeft]);
    }
}
