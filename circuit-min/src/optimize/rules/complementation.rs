// Copyright (c) The circuit-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{Junction, OptimizationOutcome, Rule};
use crate::node::Node;

/// `x & ~x = 0`. Other children are kept next to the `0`.
#[derive(Copy, Clone, Debug)]
pub struct AndComplementation;

impl Rule for AndComplementation {
    fn name(&self) -> &'static str {
        "AndComplementation"
    }

    fn check(&self, root: &Node) -> Option<OptimizationOutcome> {
        complement(Junction::And, root)
    }
}

/// `x + ~x = 1`. Other children are kept next to the `1`.
#[derive(Copy, Clone, Debug)]
pub struct OrComplementation;

impl Rule for OrComplementation {
    fn name(&self) -> &'static str {
        "OrComplementation"
    }

    fn check(&self, root: &Node) -> Option<OptimizationOutcome> {
        complement(Junction::Or, root)
    }
}

fn complement(junction: Junction, root: &Node) -> Option<OptimizationOutcome> {
    let children = junction.children_of(root)?;
    // Every x such that both x and ~x are children.
    let complemented: Vec<&Node> = children
        .iter()
        .filter_map(|child| child.as_not().filter(|inner| root.contains(inner)))
        .collect();
    if complemented.is_empty() {
        return None;
    }

    let is_complemented = |node: &Node| complemented.iter().any(|x| *x == node);
    let mut rest: Vec<Node> = children
        .iter()
        .filter(|child| {
            !is_complemented(*child) && !child.as_not().map_or(false, is_complemented)
        })
        .cloned()
        .collect();

    let replacement = if rest.is_empty() {
        junction.annihilator()
    } else {
        rest.push(junction.annihilator());
        junction.build(rest)
    };
    Some(OptimizationOutcome::new(root, replacement))
}
