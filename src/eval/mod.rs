pub mod condition;
pub mod context;
pub mod decision;

pub use condition::Condition;
pub use context::{ActionEvent, ActionKind, Component, Endpoint, EvaluationContext, FileInfo};
pub use decision::{Decision, RuleMatch};

use crate::config::PolicyConfig;

/// A compiled policy rule: a condition tree paired with the decision it
/// produces when the tree matches.
struct Rule {
    name: String,
    decision: Decision,
    condition: Condition,
}

/// The compiled policy: every loadable rule, ready for per-event evaluation.
pub struct PolicyEngine {
    rules: Vec<Rule>,
    escalate_block: bool,
    rejected: Vec<String>,
}

impl PolicyEngine {
    /// Compile the configured rules.
    ///
    /// A rule whose condition fails to compile is rejected with a warning
    /// and recorded in [`rejected`](Self::rejected) — it never loads in a
    /// weakened form. The rest of the policy still takes effect.
    pub fn from_config(config: &PolicyConfig) -> Self {
        let mut rules = Vec::new();
        let mut rejected = Vec::new();

        for rule in &config.rules {
            match rule.condition.compile() {
                Some(condition) => rules.push(Rule {
                    name: rule.name.clone(),
                    decision: rule.decision,
                    condition,
                }),
                None => {
                    log::warn!("rejecting rule {:?}: invalid condition", rule.name);
                    rejected.push(rule.name.clone());
                }
            }
        }

        Self {
            rules,
            escalate_block: config.settings.escalate_block,
            rejected,
        }
    }

    /// Override the escalate_block setting (e.g. from --escalate-block CLI flag).
    pub fn set_escalate_block(&mut self, escalate: bool) {
        self.escalate_block = escalate;
    }

    /// Names of rules that failed to compile.
    pub fn rejected(&self) -> &[String] {
        &self.rejected
    }

    /// Number of rules that loaded.
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Apply escalate_block: BLOCK → WARN with annotation. Used for dry-run
    /// rollouts of a new policy.
    fn maybe_escalate(&self, mut result: RuleMatch) -> RuleMatch {
        if self.escalate_block && result.decision == Decision::Block {
            result.decision = Decision::Warn;
            result.reason = format!("{} (downgraded from block)", result.reason);
        }
        result
    }

    /// Evaluate one event against every rule.
    ///
    /// All rules are evaluated so the verdict can name each one that
    /// triggered; the most severe decision among them wins. An event no rule
    /// matches is allowed.
    pub fn evaluate(&self, ctx: &EvaluationContext) -> RuleMatch {
        let mut worst = Decision::Allow;
        let mut reasons = Vec::new();

        for rule in &self.rules {
            if rule.condition.evaluate(ctx) {
                reasons.push(format!("  [{}] -> {}", rule.name, rule.decision.label()));
                if rule.decision > worst {
                    worst = rule.decision;
                }
            }
        }

        if reasons.is_empty() {
            return RuleMatch {
                decision: Decision::Allow,
                reason: "no rule matched".into(),
            };
        }

        self.maybe_escalate(RuleMatch {
            decision: worst,
            reason: format!("{} rule(s) matched:\n{}", reasons.len(), reasons.join("\n")),
        })
    }
}
