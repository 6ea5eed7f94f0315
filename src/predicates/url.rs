use globset::{Glob, GlobSet, GlobSetBuilder};

use crate::eval::EvaluationContext;
use crate::predicates::Predicate;

/// Matches when the event's source URL (or its host) matches any of a set of
/// glob patterns, e.g. `*.corp.example.com`.
pub struct SourceUrlPredicate {
    patterns: GlobSet,
}

impl SourceUrlPredicate {
    /// Build from glob patterns. An empty pattern list or a malformed glob
    /// rejects the predicate (and with it the owning rule).
    pub fn new(patterns: &[String]) -> Option<Self> {
        Some(Self {
            patterns: build_globset(patterns)?,
        })
    }
}

impl Predicate for SourceUrlPredicate {
    fn matches(&self, ctx: &EvaluationContext) -> bool {
        let Some(raw) = ctx.source_url.as_deref() else {
            return false;
        };
        if self.patterns.is_match(raw) {
            return true;
        }
        // Host-only patterns like "*.corp.example.com" won't match the full
        // URL text, so the parsed host gets its own pass.
        ctx.source_host().is_some_and(|host| self.patterns.is_match(&host))
    }
}

/// Compile a pattern list into a glob set. Shared with the destination
/// predicate, which matches destination URLs the same way.
pub(crate) fn build_globset(patterns: &[String]) -> Option<GlobSet> {
    if patterns.is_empty() {
        return None;
    }
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern).ok()?);
    }
    builder.build().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::ActionKind;

    fn ctx(source_url: Option<&str>) -> EvaluationContext {
        EvaluationContext {
            action: ActionKind::Upload,
            source_url: source_url.map(String::from),
            destination_url: None,
            destination_component: None,
            file_name: None,
            mime_type: None,
            size_bytes: None,
        }
    }

    fn predicate(patterns: &[&str]) -> SourceUrlPredicate {
        let patterns: Vec<String> = patterns.iter().map(|s| s.to_string()).collect();
        SourceUrlPredicate::new(&patterns).unwrap()
    }

    #[test]
    fn empty_pattern_list_rejected() {
        assert!(SourceUrlPredicate::new(&[]).is_none());
    }

    #[test]
    fn malformed_glob_rejected() {
        assert!(SourceUrlPredicate::new(&["[".to_string()]).is_none());
    }

    #[test]
    fn matches_host_pattern() {
        let p = predicate(&["*.corp.example.com"]);
        assert!(p.matches(&ctx(Some("https://files.corp.example.com/x/y"))));
    }

    #[test]
    fn matches_exact_host() {
        let p = predicate(&["intranet.example.com"]);
        assert!(p.matches(&ctx(Some("https://intranet.example.com/wiki"))));
    }

    #[test]
    fn rejects_other_host() {
        let p = predicate(&["*.corp.example.com"]);
        assert!(!p.matches(&ctx(Some("https://example.org/"))));
    }

    #[test]
    fn absent_source_never_matches() {
        let p = predicate(&["*"]);
        assert!(!p.matches(&ctx(None)));
    }

    #[test]
    fn full_url_pattern_matches_raw_text() {
        let p = predicate(&["https://vault.example.com/*"]);
        assert!(p.matches(&ctx(Some("https://vault.example.com/secrets/1"))));
    }
}
