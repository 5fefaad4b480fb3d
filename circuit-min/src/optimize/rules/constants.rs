// Copyright (c) The circuit-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{Junction, OptimizationOutcome, Rule};
use crate::node::{Node, NodeKind};

/// `~0 = 1` and `~1 = 0`.
#[derive(Copy, Clone, Debug)]
pub struct NotConstant;

impl Rule for NotConstant {
    fn name(&self) -> &'static str {
        "NotConstant"
    }

    fn check(&self, root: &Node) -> Option<OptimizationOutcome> {
        let replacement = match root.as_not()?.kind() {
            NodeKind::Zero => Node::one(),
            NodeKind::One => Node::zero(),
            _ => return None,
        };
        Some(OptimizationOutcome::new(root, replacement))
    }
}

/// `x & 0 = 0`.
#[derive(Copy, Clone, Debug)]
pub struct AndZero;

impl Rule for AndZero {
    fn name(&self) -> &'static str {
        "AndZero"
    }

    fn check(&self, root: &Node) -> Option<OptimizationOutcome> {
        annihilate(Junction::And, root)
    }
}

/// `x + 1 = 1`.
#[derive(Copy, Clone, Debug)]
pub struct OrOne;

impl Rule for OrOne {
    fn name(&self) -> &'static str {
        "OrOne"
    }

    fn check(&self, root: &Node) -> Option<OptimizationOutcome> {
        annihilate(Junction::Or, root)
    }
}

/// `x & 1 = x`.
#[derive(Copy, Clone, Debug)]
pub struct AndOne;

impl Rule for AndOne {
    fn name(&self) -> &'static str {
        "AndOne"
    }

    fn check(&self, root: &Node) -> Option<OptimizationOutcome> {
        drop_identity(Junction::And, root)
    }
}

/// `x + 0 = x`.
#[derive(Copy, Clone, Debug)]
pub struct OrZero;

impl Rule for OrZero {
    fn name(&self) -> &'static str {
        "OrZero"
    }

    fn check(&self, root: &Node) -> Option<OptimizationOutcome> {
        drop_identity(Junction::Or, root)
    }
}

fn annihilate(junction: Junction, root: &Node) -> Option<OptimizationOutcome> {
    let annihilator = junction.annihilator();
    junction
        .children_of(root)?
        .contains(&annihilator)
        .then(|| OptimizationOutcome::new(root, annihilator))
}

fn drop_identity(junction: Junction, root: &Node) -> Option<OptimizationOutcome> {
    let children = junction.children_of(root)?;
    let identity = junction.identity();
    if !children.contains(&identity) {
        return None;
    }
    let rest = children.iter().filter(|child| **child != identity).cloned();
    Some(OptimizationOutcome::new(root, junction.build(rest)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimize::rules::test_helpers::*;

    #[test]
    fn test_not_constant() {
        assert_rewrites(&NotConstant, not(Node::zero()), Node::one(), -1);
        assert_rewrites(&NotConstant, not(Node::one()), Node::zero(), -1);
        assert_no_match(&NotConstant, [not(a()), not(not(Node::one())), Node::zero()]);
    }

    #[test]
    fn test_and_zero() {
        assert_rewrites(&AndZero, and([a(), Node::zero()]), Node::zero(), -2);
        assert_rewrites(&AndZero, and([Node::zero(), Node::zero()]), Node::zero(), -2);
        assert_rewrites(
            &AndZero,
            and([Node::zero(), or([a(), b()]), c()]),
            Node::zero(),
            -5,
        );
        assert_no_match(&AndZero, [or([a(), Node::zero()]), not(Node::zero())]);
        assert_no_match(&AndZero, plain_nodes());
    }

    #[test]
    fn test_or_one() {
        assert_rewrites(&OrOne, or([a(), Node::one()]), Node::one(), -2);
        assert_rewrites(&OrOne, or([Node::one(), Node::one()]), Node::one(), -2);
        assert_no_match(&OrOne, [and([a(), Node::one()]), or([a(), Node::zero()])]);
    }

    #[test]
    fn test_and_one() {
        assert_rewrites(&AndOne, and([a(), Node::one()]), a(), -2);
        assert_rewrites(&AndOne, and([Node::one(), a(), b()]), and([a(), b()]), -1);
        assert_rewrites(&AndOne, and([Node::one(), Node::one()]), Node::one(), -2);
        assert_rewrites(
            &AndOne,
            and([Node::one(), Node::one(), a(), b()]),
            and([a(), b()]),
            -2,
        );
        assert_no_match(&AndOne, plain_nodes());
    }

    #[test]
    fn test_or_zero() {
        assert_rewrites(&OrZero, or([a(), Node::zero()]), a(), -2);
        assert_rewrites(&OrZero, or([Node::zero(), a(), b()]), or([a(), b()]), -1);
        assert_rewrites(&OrZero, or([Node::zero(), Node::zero()]), Node::zero(), -2);
        assert_no_match(&OrZero, [and([a(), Node::zero()]), or([a(), b()])]);
    }
}
