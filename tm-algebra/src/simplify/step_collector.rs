use std::fmt::Display;
use tracing::trace;

/// Receives the steps of the simplifier as they are taken.
pub trait StepCollector<S> {
    fn push(&mut self, step: S);
}

/// Discards every step.
impl<S> StepCollector<S> for () {
    fn push(&mut self, _: S) {}
}

/// Keeps every step, in order.
impl<S> StepCollector<S> for Vec<S> {
    fn push(&mut self, step: S) {
        Vec::push(self, step);
    }
}

/// Wraps a collector, emitting a `trace` event for each step it forwards.
pub struct Traced<'a, S>(pub &'a mut dyn StepCollector<S>);

impl<S: Display> StepCollector<S> for Traced<'_, S> {
    fn push(&mut self, step: S) {
        trace!(%step, "rule applied");
        self.0.push(step);
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn traced_forwards_steps() {
        let mut steps: Vec<u8> = Vec::new();
        let mut traced = Traced::<u8>(&mut steps);
        traced.push(1);
        traced.push(2);
        assert_eq!(steps, vec![1, 2]);
    }
}
