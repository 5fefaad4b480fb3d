// Copyright (c) The circuit-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{Junction, OptimizationOutcome, Rule};
use crate::node::Node;
use itertools::Itertools;
use std::collections::BTreeMap;

/// `(x & y) + (x & z) = x & (y + z)`.
///
/// The factored child is the one shared by the most And children, the smallest in canonical order
/// on ties. Other Or children are left alone.
#[derive(Copy, Clone, Debug)]
pub struct ReverseAndDistributivity;

impl Rule for ReverseAndDistributivity {
    fn name(&self) -> &'static str {
        "ReverseAndDistributivity"
    }

    fn check(&self, root: &Node) -> Option<OptimizationOutcome> {
        factor(Junction::Or, root)
    }
}

/// `(x + y) & (x + z) = x + (y & z)`.
///
/// The factored child is the one shared by the most Or children, the smallest in canonical order
/// on ties. Other And children are left alone.
#[derive(Copy, Clone, Debug)]
pub struct ReverseOrDistributivity;

impl Rule for ReverseOrDistributivity {
    fn name(&self) -> &'static str {
        "ReverseOrDistributivity"
    }

    fn check(&self, root: &Node) -> Option<OptimizationOutcome> {
        factor(Junction::And, root)
    }
}

/// Factors the most common member of the `outer.dual()` children of a root of kind `outer`.
fn factor(outer: Junction, root: &Node) -> Option<OptimizationOutcome> {
    let inner = outer.dual();
    let children = outer.children_of(root)?;

    let mut counts: BTreeMap<&Node, usize> = BTreeMap::new();
    let mut term_count = 0;
    for members in children.iter().filter_map(|child| inner.children_of(child)) {
        term_count += 1;
        for member in members.iter().dedup() {
            *counts.entry(member).or_default() += 1;
        }
    }
    if term_count < 2 {
        return None;
    }

    // Counts iterate in ascending node order, so keeping the first maximum breaks ties towards the
    // smallest node.
    let (common, count) = counts.into_iter().fold(None, |best, (member, count)| match best {
        Some((_, best_count)) if best_count >= count => best,
        _ => Some((member, count)),
    })?;
    if count < 2 {
        return None;
    }

    let mut rests = Vec::with_capacity(count);
    let mut others = Vec::with_capacity(children.len() - count + 1);
    for child in children {
        match inner.children_of(child) {
            Some(members) if child.contains(common) => {
                let mut removed = false;
                let rest = members.iter().filter(|member| {
                    if !removed && *member == common {
                        removed = true;
                        false
                    } else {
                        true
                    }
                });
                rests.push(inner.build(rest.cloned()));
            }
            _ => others.push(child.clone()),
        }
    }

    others.push(inner.build([common.clone(), outer.build(rests)]));
    Some(OptimizationOutcome::new(root, outer.build(others)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimize::rules::test_helpers::*;

    #[test]
    fn test_reverse_and_distributivity() {
        let rule = &ReverseAndDistributivity;
        assert_rewrites(
            rule,
            or([and([a(), b()]), and([a(), c()])]),
            and([a(), or([b(), c()])]),
            -2,
        );
        assert_rewrites(
            rule,
            or([and([a(), b()]), and([a(), c(), d()])]),
            and([a(), or([b(), and([c(), d()])])]),
            -1,
        );
        // Reported even though it does not shrink the tree.
        assert_rewrites(
            rule,
            or([and([a(), b(), c()]), and([a(), b(), d()])]),
            and([a(), or([and([b(), c()]), and([b(), d()])])]),
            0,
        );
        assert_rewrites(
            rule,
            or([and([a(), b()]), and([a(), c()]), and([a(), d()])]),
            and([a(), or([b(), c(), d()])]),
            -4,
        );
        assert_rewrites(
            rule,
            or([and([a(), b()]), and([b(), c()]), and([c(), d()])]),
            or([and([b(), or([a(), c()])]), and([c(), d()])]),
            -1,
        );
        assert_rewrites(
            rule,
            or([and([a(), b()]), and([a(), c()]), d()]),
            or([and([a(), or([b(), c()])]), d()]),
            -1,
        );
        assert_no_match(
            rule,
            [
                or([and([a(), b()]), and([c(), d()])]),
                or([and([a(), b()]), a()]),
                and([or([a(), b()]), or([a(), c()])]),
            ],
        );
        assert_no_match(rule, plain_nodes());
    }

    #[test]
    fn test_reverse_or_distributivity() {
        let rule = &ReverseOrDistributivity;
        assert_rewrites(
            rule,
            and([or([a(), b()]), or([a(), c()])]),
            or([a(), and([b(), c()])]),
            -2,
        );
        assert_rewrites(
            rule,
            and([or([a(), b()]), or([a(), c()]), d()]),
            and([or([a(), and([b(), c()])]), d()]),
            -1,
        );
        assert_no_match(
            rule,
            [
                and([or([a(), b()]), or([c(), d()])]),
                or([and([a(), b()]), and([a(), c()])]),
            ],
        );
        assert_no_match(rule, plain_nodes());
    }
}
