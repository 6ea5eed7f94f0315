use serde::{Deserialize, Serialize};

use crate::eval::{ActionKind, Component, Condition, Decision};
use crate::predicates::action::ActionPredicate;
use crate::predicates::destination::DestinationPredicate;
use crate::predicates::file_type::FileTypePredicate;
use crate::predicates::size::MinSizePredicate;
use crate::predicates::url::SourceUrlPredicate;

/// Embedded default policy.
const DEFAULT_POLICY: &str = include_str!("../policy.default.toml");

// ── Final (merged) policy types ──

#[derive(Debug, Deserialize, Serialize)]
pub struct PolicyConfig {
    #[serde(default)]
    pub settings: Settings,
    #[serde(default)]
    pub rules: Vec<RuleConfig>,
}

#[derive(Debug, Deserialize, Serialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub escalate_block: bool,
}

/// One policy rule: a named condition tree paired with a decision.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RuleConfig {
    pub name: String,
    pub decision: Decision,
    pub condition: ConditionConfig,
}

/// The serialized form of a condition tree.
///
/// Combinators nest; leaves carry the predicate parameters. The shape of
/// this enum is the whole condition vocabulary of the policy file.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConditionConfig {
    AnyOf {
        children: Vec<ConditionConfig>,
    },
    AllOf {
        children: Vec<ConditionConfig>,
    },
    Not {
        child: Box<ConditionConfig>,
    },
    Action {
        actions: Vec<ActionKind>,
    },
    SourceUrl {
        patterns: Vec<String>,
    },
    Destination {
        #[serde(default)]
        components: Vec<Component>,
        #[serde(default)]
        patterns: Vec<String>,
    },
    FileType {
        #[serde(default)]
        extensions: Vec<String>,
        #[serde(default)]
        mime_types: Vec<String>,
    },
    MinSize {
        bytes: u64,
    },
}

impl ConditionConfig {
    /// Compile this serialized tree into a live [`Condition`].
    ///
    /// Returns `None` for any structurally invalid input: empty combinator
    /// children, empty predicate match lists, malformed globs, or a failed
    /// child anywhere below. The caller must reject the owning rule — a rule
    /// is never loaded with part of its tree missing.
    pub fn compile(&self) -> Option<Condition> {
        match self {
            ConditionConfig::AnyOf { children } => Condition::any_of(compile_children(children)?),
            ConditionConfig::AllOf { children } => Condition::all_of(compile_children(children)?),
            ConditionConfig::Not { child } => Condition::negate(child.compile()),
            ConditionConfig::Action { actions } => {
                ActionPredicate::new(actions.clone()).map(Condition::leaf)
            }
            ConditionConfig::SourceUrl { patterns } => {
                SourceUrlPredicate::new(patterns).map(Condition::leaf)
            }
            ConditionConfig::Destination {
                components,
                patterns,
            } => DestinationPredicate::new(components.clone(), patterns).map(Condition::leaf),
            ConditionConfig::FileType {
                extensions,
                mime_types,
            } => FileTypePredicate::new(extensions.clone(), mime_types.clone())
                .map(Condition::leaf),
            ConditionConfig::MinSize { bytes } => {
                MinSizePredicate::new(*bytes).map(Condition::leaf)
            }
        }
    }
}

fn compile_children(children: &[ConditionConfig]) -> Option<Vec<Condition>> {
    children.iter().map(ConditionConfig::compile).collect()
}

// ── Overlay types (user policy that merges with defaults) ──

#[derive(Debug, Deserialize, Default)]
struct PolicyOverlay {
    #[serde(default)]
    settings: SettingsOverlay,
    #[serde(default)]
    rules: RulesOverlay,
}

#[derive(Debug, Deserialize, Default)]
struct SettingsOverlay {
    escalate_block: Option<bool>,
}

#[derive(Debug, Deserialize, Default)]
struct RulesOverlay {
    #[serde(default)]
    replace: bool,
    #[serde(default)]
    add: Vec<RuleConfig>,
    #[serde(default)]
    remove: Vec<String>,
}

// ── Merge logic ──

impl PolicyConfig {
    /// Load the default embedded policy.
    pub fn default_policy() -> Self {
        toml::from_str(DEFAULT_POLICY).expect("embedded default policy must parse")
    }

    /// Load the policy with resolution order:
    /// 1. Start with embedded defaults
    /// 2. Merge user overlay from `$DLP_GATE_POLICY` or
    ///    `~/.config/dlp-gate/policy.toml` (if either exists)
    ///
    /// User rules merge by name: a rule named like a default replaces it,
    /// other rules append. `remove` drops defaults by name, and
    /// `replace = true` in `[rules]` discards the defaults entirely.
    pub fn load() -> Self {
        let mut config = Self::default_policy();
        if let Some(overlay) = Self::load_overlay() {
            config.apply_overlay(overlay);
        }
        config
    }

    fn overlay_path() -> Option<std::path::PathBuf> {
        if let Ok(path) = std::env::var("DLP_GATE_POLICY") {
            return Some(std::path::PathBuf::from(
                shellexpand::tilde(&path).into_owned(),
            ));
        }
        let home = std::env::var_os("HOME")?;
        Some(std::path::Path::new(&home).join(".config/dlp-gate/policy.toml"))
    }

    /// Try to load the user policy overlay.
    fn load_overlay() -> Option<PolicyOverlay> {
        let path = Self::overlay_path()?;
        let content = std::fs::read_to_string(path).ok()?;
        match toml::from_str(&content) {
            Ok(overlay) => Some(overlay),
            Err(e) => {
                eprintln!("dlp-gate: policy parse error: {e}");
                None
            }
        }
    }

    /// Apply an overlay on top of this policy (merge semantics).
    fn apply_overlay(&mut self, overlay: PolicyOverlay) {
        if let Some(v) = overlay.settings.escalate_block {
            self.settings.escalate_block = v;
        }

        let r = overlay.rules;
        if r.replace {
            self.rules = r.add;
            return;
        }
        self.rules.retain(|rule| !r.remove.contains(&rule.name));
        for rule in r.add {
            match self.rules.iter().position(|existing| existing.name == rule.name) {
                Some(i) => self.rules[i] = rule,
                None => self.rules.push(rule),
            }
        }
    }

    /// Apply an overlay from a TOML string. Used for testing.
    #[cfg(test)]
    fn apply_overlay_str(&mut self, toml_str: &str) {
        let overlay: PolicyOverlay = toml::from_str(toml_str).unwrap();
        self.apply_overlay(overlay);
    }
}
