use globset::GlobSet;

use crate::eval::{Component, EvaluationContext};
use crate::predicates::url::build_globset;
use crate::predicates::Predicate;

/// Matches when the event's destination is one of a set of endpoint
/// components (USB, network share, ...) or its URL matches a glob pattern.
///
/// Components and patterns are alternatives: a destination rule for
/// `components = ["usb"]` plus `patterns = ["*.filedrop.example.net"]`
/// matches either endpoint class.
pub struct DestinationPredicate {
    components: Vec<Component>,
    patterns: Option<GlobSet>,
}

impl DestinationPredicate {
    /// Build from component and pattern lists. At least one of the two must
    /// be non-empty; a malformed glob rejects the predicate.
    pub fn new(components: Vec<Component>, patterns: &[String]) -> Option<Self> {
        if components.is_empty() && patterns.is_empty() {
            return None;
        }
        let patterns = if patterns.is_empty() {
            None
        } else {
            Some(build_globset(patterns)?)
        };
        Some(Self {
            components,
            patterns,
        })
    }

    fn url_matches(&self, ctx: &EvaluationContext) -> bool {
        let Some(set) = &self.patterns else {
            return false;
        };
        let Some(raw) = ctx.destination_url.as_deref() else {
            return false;
        };
        if set.is_match(raw) {
            return true;
        }
        ctx.destination_host().is_some_and(|host| set.is_match(&host))
    }
}

impl Predicate for DestinationPredicate {
    fn matches(&self, ctx: &EvaluationContext) -> bool {
        if let Some(component) = ctx.destination_component
            && self.components.contains(&component)
        {
            return true;
        }
        self.url_matches(ctx)
    }
}
