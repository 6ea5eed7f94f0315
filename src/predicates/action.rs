use crate::eval::{ActionKind, EvaluationContext};
use crate::predicates::Predicate;

/// Matches when the event's action kind is in a configured set.
pub struct ActionPredicate {
    kinds: Vec<ActionKind>,
}

impl ActionPredicate {
    /// An empty kind set can never match and is rejected at build time.
    pub fn new(kinds: Vec<ActionKind>) -> Option<Self> {
        if kinds.is_empty() {
            return None;
        }
        Some(Self { kinds })
    }
}

impl Predicate for ActionPredicate {
    fn matches(&self, ctx: &EvaluationContext) -> bool {
        self.kinds.contains(&ctx.action)
    }
}
