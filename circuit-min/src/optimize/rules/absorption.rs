// Copyright (c) The circuit-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{Junction, OptimizationOutcome, Rule};
use crate::node::Node;

/// `x & (x + y) = x`: an Or child is dropped if one of its own children is also a child of the
/// And.
#[derive(Copy, Clone, Debug)]
pub struct AndAbsorption;

impl Rule for AndAbsorption {
    fn name(&self) -> &'static str {
        "AndAbsorption"
    }

    fn check(&self, root: &Node) -> Option<OptimizationOutcome> {
        absorb(Junction::And, root)
    }
}

/// `x + (x & y) = x`: an And child is dropped if one of its own children is also a child of the
/// Or.
#[derive(Copy, Clone, Debug)]
pub struct OrAbsorption;

impl Rule for OrAbsorption {
    fn name(&self) -> &'static str {
        "OrAbsorption"
    }

    fn check(&self, root: &Node) -> Option<OptimizationOutcome> {
        absorb(Junction::Or, root)
    }
}

fn absorb(junction: Junction, root: &Node) -> Option<OptimizationOutcome> {
    let children = junction.children_of(root)?;
    let is_absorbed = |child: &Node| {
        junction
            .dual()
            .children_of(child)
            .map_or(false, |members| members.iter().any(|member| root.contains(member)))
    };
    if !children.iter().any(is_absorbed) {
        return None;
    }

    // The smallest child is never absorbed, so something is always kept.
    let kept = children.iter().filter(|child| !is_absorbed(*child)).cloned();
    Some(OptimizationOutcome::new(root, junction.build(kept)))
}
