//! The rewrite rules of the simplifier.
//!
//! A rule only looks at the top level of one expression. It returns the rewritten expression if
//! it applies, and [`None`] otherwise; the simplifier recurses into children and repeats passes
//! until no rule applies anywhere.
//!
//! Rules are tried in the order of [`RULES`], and only the first one that applies is used in a
//! pass.

pub mod add;
pub mod distribute;
pub mod multiply;
pub mod power;

use crate::{expr::SymExpr, number::Number};
use super::{step::Step, step_collector::StepCollector, Options};

/// A rewrite rule.
pub type Rule = fn(&SymExpr, &Options) -> Option<SymExpr>;

/// Every rule, with the step it records, in the order they are tried.
///
/// Rules that reduce the size of the expression come first. Expansion comes last, since it is
/// the only kind of rule that can make an expression larger.
pub const RULES: &[(Step, Rule)] = &[
    (Step::Associate, |expr, _| add::associate(expr)),
    (Step::AddZero, |expr, _| add::add_zero(expr)),
    (Step::CombineNumbers, |expr, _| add::combine_numbers(expr)),
    (Step::CombineLikeTerms, |expr, _| add::combine_like_terms(expr)),
    (Step::Associate, |expr, _| multiply::associate(expr)),
    (Step::MultiplyZero, |expr, _| multiply::multiply_zero(expr)),
    (Step::MultiplyOne, |expr, _| multiply::multiply_one(expr)),
    (Step::CombineNumbers, |expr, _| multiply::combine_numbers(expr)),
    (Step::CombineLikeFactors, |expr, _| multiply::combine_like_factors(expr)),
    (Step::PowerZero, |expr, _| power::power_zero(expr)),
    (Step::PowerZeroLeft, |expr, _| power::power_zero_left(expr)),
    (Step::PowerOneLeft, |expr, _| power::power_one_left(expr)),
    (Step::PowerOne, |expr, _| power::power_one(expr)),
    (Step::EvaluatePower, |expr, _| power::evaluate(expr)),
    (Step::PowerPower, |expr, _| power::power_power(expr)),
    (Step::ExpandPower, power::expand_power),
    (Step::DistributiveProperty, |expr, _| distribute::distributive_property(expr)),
    (Step::DistributePower, |expr, _| distribute::distribute_power(expr)),
];

/// Splices the children of nested expressions into a single list, where `nested` returns the
/// children of an expression that should be spliced. Returns [`None`] if nothing was nested.
pub(crate) fn flatten(
    exprs: &[SymExpr],
    nested: impl Fn(&SymExpr) -> Option<&[SymExpr]>,
) -> Option<Vec<SymExpr>> {
    if exprs.iter().all(|expr| nested(expr).is_none()) {
        return None;
    }

    Some(exprs.iter()
        .flat_map(|expr| match nested(expr) {
            Some(children) => children.to_vec(),
            None => vec![expr.clone()],
        })
        .collect())
}

/// Folds every number in `exprs` into a single number using `op`, keeping the other expressions
/// in their original order. The folded number is placed first.
///
/// Returns [`None`] if there are fewer than two numbers.
pub(crate) fn fold_numbers(
    exprs: &[SymExpr],
    op: impl Fn(Number, Number) -> Number,
) -> Option<Vec<SymExpr>> {
    let (numbers, rest): (Vec<_>, Vec<_>) = exprs.iter().partition(|expr| expr.is_number());
    if numbers.len() < 2 {
        return None;
    }

    let folded = numbers.into_iter()
        .filter_map(SymExpr::as_number)
        .reduce(op)?;
    Some(std::iter::once(folded.into_expr())
        .chain(rest.into_iter().cloned())
        .collect())
}

/// Applies the first rule that matches the expression, and records its step.
pub fn all(expr: &SymExpr, options: &Options, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    RULES.iter().find_map(|(step, rule)| {
        let rewritten = rule(expr, options)?;
        step_collector.push(*step);
        Some(rewritten)
    })
}
