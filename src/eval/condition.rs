//! Condition trees: the boolean core of rule evaluation.
//!
//! A [`Condition`] is an immutable, finite tree. Leaves are predicates from
//! [`crate::predicates`]; interior nodes combine children with NOT, OR, or
//! AND semantics. Trees can only be obtained through the constructors here,
//! which refuse structurally invalid input (an empty child list, a missing
//! NOT operand) by returning `None`. A constructed tree is never mutated, so
//! one tree can serve any number of concurrent evaluations.

use crate::eval::EvaluationContext;
use crate::predicates::Predicate;

/// A node in a rule's boolean decision tree.
pub struct Condition {
    node: Node,
}

enum Node {
    Leaf(Box<dyn Predicate>),
    Not(Box<Node>),
    AnyOf(Vec<Node>),
    AllOf(Vec<Node>),
}

impl Condition {
    /// Wrap a predicate as a leaf condition.
    pub fn leaf(predicate: impl Predicate + 'static) -> Self {
        Self {
            node: Node::Leaf(Box::new(predicate)),
        }
    }

    /// Negate a child condition. `None` in, `None` out: negating a condition
    /// that failed to build is itself a build failure, never a default.
    pub fn negate(child: Option<Condition>) -> Option<Condition> {
        Some(Self {
            node: Node::Not(Box::new(child?.node)),
        })
    }

    /// OR over one or more children. An empty disjunction is unrepresentable
    /// rather than defaulting to true or false.
    pub fn any_of(children: Vec<Condition>) -> Option<Condition> {
        if children.is_empty() {
            return None;
        }
        Some(Self {
            node: Node::AnyOf(children.into_iter().map(|c| c.node).collect()),
        })
    }

    /// AND over one or more children. Empty conjunctions are rejected the
    /// same way as empty disjunctions.
    pub fn all_of(children: Vec<Condition>) -> Option<Condition> {
        if children.is_empty() {
            return None;
        }
        Some(Self {
            node: Node::AllOf(children.into_iter().map(|c| c.node).collect()),
        })
    }

    /// Evaluate this tree against one event's facts.
    ///
    /// Children are visited strictly in construction order. OR returns true
    /// at the first true child; AND returns false at the first false child;
    /// remaining children are not evaluated.
    pub fn evaluate(&self, ctx: &EvaluationContext) -> bool {
        self.node.evaluate(ctx)
    }
}

impl Node {
    fn evaluate(&self, ctx: &EvaluationContext) -> bool {
        match self {
            Node::Leaf(predicate) => predicate.matches(ctx),
            Node::Not(child) => !child.evaluate(ctx),
            Node::AnyOf(children) => children.iter().any(|c| c.evaluate(ctx)),
            Node::AllOf(children) => children.iter().all(|c| c.evaluate(ctx)),
        }
    }
}
