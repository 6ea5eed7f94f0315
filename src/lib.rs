//! dlp-gate: a policy gate for data-movement actions.
//!
//! This crate evaluates data-movement events — file transfers, clipboard
//! pastes, prints, uploads, screenshots — against configurable policy rules
//! and returns one of four decisions: [`eval::Decision::Allow`],
//! [`eval::Decision::Report`], [`eval::Decision::Warn`], or
//! [`eval::Decision::Block`]. Each rule pairs a boolean condition tree
//! ([`eval::Condition`]) with a decision; per event, every rule is evaluated
//! against an [`EvaluationContext`](crate::eval::EvaluationContext) and the
//! most severe decision among the matched rules wins.
//!
//! # Architecture
//!
//! - **[`eval`]** — Evaluation engine: condition trees, policy engine, decision types, per-event context.
//! - **[`predicates`]** — Atomic predicates: per-fact match logic (action, source URL, destination, file type, size).
//! - **[`config`]** — Policy loading: embedded defaults + user overlay merge, condition compilation.
//! - **[`logging`]** — Verdict logging to `~/.local/share/dlp-gate/verdicts.log`.

/// Policy types, loading, overlay merge, and condition compilation.
pub mod config;
/// Evaluation engine: condition trees, policy engine, decisions, event context.
pub mod eval;
/// File-based verdict logging.
pub mod logging;
/// Atomic predicate trait and per-fact implementations.
pub mod predicates;

use eval::{ActionEvent, EvaluationContext, RuleMatch};

/// Compile the default policy and evaluate a single event.
///
/// This is the main entry point for tests and simple usage.
/// For CLI usage with --escalate-block or a user policy, build the engine directly.
pub fn evaluate(event: &ActionEvent) -> RuleMatch {
    let config = config::PolicyConfig::default_policy();
    let engine = eval::PolicyEngine::from_config(&config);
    engine.evaluate(&EvaluationContext::from_event(event))
}
