use once_cell::sync::Lazy;
use std::fmt;
use tm_algebra::{Algebra, AlgebraBackend};

/// The context used by [`Node::simplified`](crate::Node::simplified) and friends when none is
/// given explicitly.
static DEFAULT: Lazy<Ctxt> = Lazy::new(Ctxt::default);

/// What the simplifier does with a node that no rule handles and the backend cannot simplify.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnhandledPolicy {
    /// Fail with [`Error::UnhandledSimplification`](crate::Error::UnhandledSimplification).
    #[default]
    Error,

    /// Return the node rebuilt from its simplified children, and log a warning.
    ReturnUnchanged,
}

impl fmt::Display for UnhandledPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnhandledPolicy::Error => write!(f, "error"),
            UnhandledPolicy::ReturnUnchanged => write!(f, "return unchanged"),
        }
    }
}

/// A context to use when simplifying, collecting or comparing expressions.
///
/// The context owns the [`AlgebraBackend`] that the expression core delegates to, so a different
/// engine (or a stub) can be injected without any global state.
pub struct Ctxt {
    /// The algebra backend.
    pub backend: Box<dyn AlgebraBackend + Send + Sync>,

    /// What to do with shapes that cannot be simplified.
    pub policy: UnhandledPolicy,
}

impl Default for Ctxt {
    fn default() -> Self {
        Self::new(Algebra::new())
    }
}

impl fmt::Debug for Ctxt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ctxt")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl Ctxt {
    /// Creates a context with the given backend and the default policy.
    pub fn new(backend: impl AlgebraBackend + Send + Sync + 'static) -> Self {
        Self {
            backend: Box::new(backend),
            policy: UnhandledPolicy::default(),
        }
    }

    /// Sets the policy for unhandled shapes.
    pub fn with_policy(mut self, policy: UnhandledPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Returns the process-wide default context, which uses [`Algebra`] with its default options.
    pub fn global() -> &'static Ctxt {
        &DEFAULT
    }
}
