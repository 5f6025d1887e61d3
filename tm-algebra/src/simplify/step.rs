use std::fmt;

/// A rewrite performed by the simplifier, recorded once each time a rule applies.
///
/// The rules themselves live in [`rules`](super::rules); each one documents the identity it
/// applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Nested sums or products were flattened.
    Associate,
    AddZero,
    MultiplyZero,
    MultiplyOne,
    /// Numbers in a sum or product were folded into one.
    CombineNumbers,
    CombineLikeTerms,
    CombineLikeFactors,
    PowerZero,
    PowerZeroLeft,
    PowerOneLeft,
    PowerOne,
    EvaluatePower,
    PowerPower,
    /// A power of a sum was written as a repeated product.
    ExpandPower,
    DistributiveProperty,
    DistributePower,
}

impl Step {
    /// The identity applied by this step.
    pub fn identity(self) -> &'static str {
        match self {
            Self::Associate => "a+(b+c) = a+b+c",
            Self::AddZero => "a+0 = a",
            Self::MultiplyZero => "a*0 = 0",
            Self::MultiplyOne => "a*1 = a",
            Self::CombineNumbers => "2+3 = 5",
            Self::CombineLikeTerms => "2a+3a = 5a",
            Self::CombineLikeFactors => "a^2*a^3 = a^5",
            Self::PowerZero => "a^0 = 1",
            Self::PowerZeroLeft => "0^a = 0",
            Self::PowerOneLeft => "1^a = 1",
            Self::PowerOne => "a^1 = a",
            Self::EvaluatePower => "2^3 = 8",
            Self::PowerPower => "(a^b)^c = a^(bc)",
            Self::ExpandPower => "(a+b)^2 = (a+b)(a+b)",
            Self::DistributiveProperty => "a(b+c) = ab+ac",
            Self::DistributePower => "(ab)^c = a^c b^c",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} ({})", self, self.identity())
    }
}
