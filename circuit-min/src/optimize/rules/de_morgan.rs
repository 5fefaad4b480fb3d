// Copyright (c) The circuit-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{Junction, OptimizationOutcome, Rule};
use crate::node::Node;

/// `~(x & y) = ~x + ~y`, and `~x & ~y = ~(x + y)`, whichever way makes the tree smaller.
#[derive(Copy, Clone, Debug)]
pub struct DeMorganAnd;

impl Rule for DeMorganAnd {
    fn name(&self) -> &'static str {
        "DeMorganAnd"
    }

    fn check(&self, root: &Node) -> Option<OptimizationOutcome> {
        de_morgan(Junction::And, root)
    }
}

/// `~(x + y) = ~x & ~y`, and `~x + ~y = ~(x & y)`, whichever way makes the tree smaller.
#[derive(Copy, Clone, Debug)]
pub struct DeMorganOr;

impl Rule for DeMorganOr {
    fn name(&self) -> &'static str {
        "DeMorganOr"
    }

    fn check(&self, root: &Node) -> Option<OptimizationOutcome> {
        de_morgan(Junction::Or, root)
    }
}

fn de_morgan(junction: Junction, root: &Node) -> Option<OptimizationOutcome> {
    let replacement = match root.as_not() {
        // Push the negation down.
        Some(inner) => {
            let children = junction.children_of(inner)?;
            junction.dual().build(children.iter().map(negate))
        }
        // Pull the negation up.
        None => {
            let children = junction.children_of(root)?;
            Node::not(junction.dual().build(children.iter().map(negate)))
        }
    };

    let outcome = OptimizationOutcome::new(root, replacement);
    (outcome.score < 0).then(|| outcome)
}

fn negate(node: &Node) -> Node {
    match node.as_not() {
        Some(inner) => inner.clone(),
        None => Node::not(node.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimize::rules::test_helpers::*;

    #[test]
    fn test_de_morgan_and() {
        assert_rewrites(&DeMorganAnd, not(and([not(a()), not(b())])), or([a(), b()]), -3);
        assert_rewrites(&DeMorganAnd, not(and([a(), not(b())])), or([not(a()), b()]), -1);
        assert_rewrites(
            &DeMorganAnd,
            not(and([not(a()), not(b()), not(c())])),
            or([a(), b(), c()]),
            -4,
        );
        assert_rewrites(&DeMorganAnd, and([not(a()), not(b())]), not(or([a(), b()])), -1);
        assert_rewrites(
            &DeMorganAnd,
            and([not(a()), not(b()), not(c())]),
            not(or([a(), b(), c()])),
            -2,
        );
        assert_no_match(
            &DeMorganAnd,
            [
                not(and([a(), b()])),
                and([not(a()), b(), c()]),
                not(or([not(a()), not(b())])),
            ],
        );
        assert_no_match(&DeMorganAnd, plain_nodes());
    }

    #[test]
    fn test_de_morgan_or() {
        assert_rewrites(&DeMorganOr, not(or([not(a()), not(b())])), and([a(), b()]), -3);
        assert_rewrites(&DeMorganOr, not(or([not(a()), b()])), and([a(), not(b())]), -1);
        assert_rewrites(&DeMorganOr, or([not(a()), not(b())]), not(and([a(), b()])), -1);
        assert_no_match(
            &DeMorganOr,
            [
                not(or([a(), b()])),
                or([a(), not(b())]),
                and([not(a()), not(b())]),
            ],
        );
    }
}
