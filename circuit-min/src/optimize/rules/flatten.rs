// Copyright (c) The circuit-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{Junction, OptimizationOutcome, Rule};
use crate::node::Node;

/// `x & (y & z) = x & y & z`.
#[derive(Copy, Clone, Debug)]
pub struct MergeAnd;

impl Rule for MergeAnd {
    fn name(&self) -> &'static str {
        "MergeAnd"
    }

    fn check(&self, root: &Node) -> Option<OptimizationOutcome> {
        splice(Junction::And, root)
    }
}

/// `x + (y + z) = x + y + z`.
#[derive(Copy, Clone, Debug)]
pub struct MergeOr;

impl Rule for MergeOr {
    fn name(&self) -> &'static str {
        "MergeOr"
    }

    fn check(&self, root: &Node) -> Option<OptimizationOutcome> {
        splice(Junction::Or, root)
    }
}

fn splice(junction: Junction, root: &Node) -> Option<OptimizationOutcome> {
    let children = junction.children_of(root)?;
    let mut spliced = false;
    let mut flattened = Vec::with_capacity(children.len());
    for child in children {
        match junction.children_of(child) {
            Some(grandchildren) => {
                spliced = true;
                flattened.extend(grandchildren.iter().cloned());
            }
            None => flattened.push(child.clone()),
        }
    }
    spliced.then(|| OptimizationOutcome::new(root, junction.build(flattened)))
}
