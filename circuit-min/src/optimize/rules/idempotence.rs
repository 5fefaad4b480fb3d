// Copyright (c) The circuit-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{Junction, OptimizationOutcome, Rule};
use crate::node::Node;
use itertools::Itertools;

/// `x & x = x`.
#[derive(Copy, Clone, Debug)]
pub struct AndIdempotence;

impl Rule for AndIdempotence {
    fn name(&self) -> &'static str {
        "AndIdempotence"
    }

    fn check(&self, root: &Node) -> Option<OptimizationOutcome> {
        dedup(Junction::And, root)
    }
}

/// `x + x = x`.
#[derive(Copy, Clone, Debug)]
pub struct OrIdempotence;

impl Rule for OrIdempotence {
    fn name(&self) -> &'static str {
        "OrIdempotence"
    }

    fn check(&self, root: &Node) -> Option<OptimizationOutcome> {
        dedup(Junction::Or, root)
    }
}

fn dedup(junction: Junction, root: &Node) -> Option<OptimizationOutcome> {
    let children = junction.children_of(root)?;
    // Children are sorted, so duplicates are adjacent.
    let unique: Vec<Node> = children.iter().dedup().cloned().collect();
    if unique.len() == children.len() {
        return None;
    }
    Some(OptimizationOutcome::new(root, junction.build(unique)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimize::rules::test_helpers::*;

    #[test]
    fn test_and_idempotence() {
        assert_rewrites(&AndIdempotence, and([a(), a()]), a(), -2);
        assert_rewrites(&AndIdempotence, and([a(), b(), a()]), and([a(), b()]), -1);
        assert_rewrites(
            &AndIdempotence,
            and([or([a(), b()]), c(), or([b(), a()])]),
            and([c(), or([a(), b()])]),
            -3,
        );
        assert_rewrites(
            &AndIdempotence,
            and([a(), a(), b(), b(), b()]),
            and([a(), b()]),
            -3,
        );
        assert_no_match(&AndIdempotence, [or([a(), a()])]);
        assert_no_match(&AndIdempotence, plain_nodes());
    }

    #[test]
    fn test_or_idempotence() {
        assert_rewrites(&OrIdempotence, or([a(), a()]), a(), -2);
        assert_rewrites(&OrIdempotence, or([not(a()), b(), not(a())]), or([b(), not(a())]), -2);
        assert_no_match(&OrIdempotence, [and([a(), a()]), or([a(), not(a())])]);
    }
}
