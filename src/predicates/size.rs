use crate::eval::EvaluationContext;
use crate::predicates::Predicate;

/// Matches when the event carries at least `min_bytes` of data.
pub struct MinSizePredicate {
    min_bytes: u64,
}

impl MinSizePredicate {
    /// A zero threshold would match every event that has a size at all,
    /// which is never what a policy author means; it is rejected.
    pub fn new(min_bytes: u64) -> Option<Self> {
        if min_bytes == 0 {
            return None;
        }
        Some(Self { min_bytes })
    }
}

impl Predicate for MinSizePredicate {
    fn matches(&self, ctx: &EvaluationContext) -> bool {
        // Unknown size fails closed: the threshold is not considered reached.
        ctx.size_bytes.is_some_and(|size| size >= self.min_bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::ActionKind;

    fn ctx(size_bytes: Option<u64>) -> EvaluationContext {
        EvaluationContext {
            action: ActionKind::Clipboard,
            source_url: None,
            destination_url: None,
            destination_component: None,
            file_name: None,
            mime_type: None,
            size_bytes,
        }
    }

    #[test]
    fn zero_threshold_rejected() {
        assert!(MinSizePredicate::new(0).is_none());
    }

    #[test]
    fn threshold_is_inclusive() {
        let p = MinSizePredicate::new(1024).unwrap();
        assert!(!p.matches(&ctx(Some(1023))));
        assert!(p.matches(&ctx(Some(1024))));
        assert!(p.matches(&ctx(Some(1025))));
    }

    #[test]
    fn unknown_size_never_matches() {
        let p = MinSizePredicate::new(1).unwrap();
        assert!(!p.matches(&ctx(None)));
    }
}
