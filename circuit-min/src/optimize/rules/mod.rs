// Copyright (c) The circuit-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The rewrite rule catalog.
//!
//! Every rule looks at the shape of a single node and never descends into it: traversal belongs
//! to the [`Optimizer`](crate::optimize::Optimizer).

mod absorption;
mod complementation;
mod constants;
mod de_morgan;
mod distributivity;
mod flatten;
mod idempotence;
mod negation;

pub use absorption::*;
pub use complementation::*;
pub use constants::*;
pub use de_morgan::*;
pub use distributivity::*;
pub use flatten::*;
pub use idempotence::*;
pub use negation::*;

use crate::node::Node;
use std::fmt;

/// An algebraic identity that may rewrite a node into an equivalent one.
pub trait Rule: fmt::Debug + Send + Sync {
    /// A short name used in logs.
    fn name(&self) -> &'static str;

    /// Returns the rewrite of `root` if its shape matches this rule. The rewrite may be larger
    /// than `root`; callers compare scores.
    fn check(&self, root: &Node) -> Option<OptimizationOutcome>;
}

/// A proposed rewrite and the change in size it causes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptimizationOutcome {
    /// `replacement.size() - root.size()`: negative means the rewrite shrinks the tree.
    pub score: isize,
    pub replacement: Node,
}

impl OptimizationOutcome {
    /// Scores `replacement` against the node it replaces.
    pub fn new(root: &Node, replacement: Node) -> Self {
        Self {
            score: replacement.size() as isize - root.size() as isize,
            replacement,
        }
    }
}

/// The full catalog, in the order ties between equally scoring rules are broken.
pub fn default_rules() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(NotConstant),
        Box::new(DoubleNot),
        Box::new(AndZero),
        Box::new(OrOne),
        Box::new(AndOne),
        Box::new(OrZero),
        Box::new(AndComplementation),
        Box::new(OrComplementation),
        Box::new(AndIdempotence),
        Box::new(OrIdempotence),
        Box::new(MergeAnd),
        Box::new(MergeOr),
        Box::new(DeMorganAnd),
        Box::new(DeMorganOr),
        Box::new(AndAbsorption),
        Box::new(OrAbsorption),
        Box::new(ReverseAndDistributivity),
        Box::new(ReverseOrDistributivity),
    ]
}

/// The operator of an And or Or node, used by rules that come in dual pairs.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Junction {
    And,
    Or,
}

impl Junction {
    /// The children of `node` if it is a junction of this kind.
    pub(crate) fn children_of(self, node: &Node) -> Option<&[Node]> {
        let matches = match self {
            Junction::And => node.is_and(),
            Junction::Or => node.is_or(),
        };
        matches.then(|| node.children())
    }

    pub(crate) fn dual(self) -> Self {
        match self {
            Junction::And => Junction::Or,
            Junction::Or => Junction::And,
        }
    }

    /// Builds a junction of this kind, collapsing zero or one children.
    pub(crate) fn build(self, children: impl IntoIterator<Item = Node>) -> Node {
        match self {
            Junction::And => Node::and_of(children),
            Junction::Or => Node::or_of(children),
        }
    }

    /// The constant that absorbs everything under this junction: `0` for And, `1` for Or.
    pub(crate) fn annihilator(self) -> Node {
        match self {
            Junction::And => Node::zero(),
            Junction::Or => Node::one(),
        }
    }

    /// The constant that leaves this junction unchanged: `1` for And, `0` for Or.
    pub(crate) fn identity(self) -> Node {
        self.dual().annihilator()
    }
}
