// Copyright (c) The circuit-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Term-rewriting optimization of expression trees.

pub mod rules;

use crate::{errors::OptimizerError, node::Node};
use log::{debug, trace};
use rules::{default_rules, OptimizationOutcome, Rule};

/// Shrinks expression trees by applying a catalog of [`Rule`]s bottom-up.
///
/// At every node, children are optimized first. Then every rule is checked against the rebuilt
/// node and the best rewrite (most negative score, earliest rule on ties) is applied if it shrinks
/// the node. This repeats at the same node up to `max_depth` times.
///
/// ```
/// use circuit_min::{node::Node, optimize::Optimizer};
///
/// let a = Node::variable("A").unwrap();
/// let b = Node::variable("B").unwrap();
/// let optimizer = Optimizer::default();
/// assert_eq!(optimizer.optimize(&(&a & &(&a | &b))), a);
/// ```
#[derive(Debug)]
pub struct Optimizer {
    max_depth: usize,
    rules: Vec<Box<dyn Rule>>,
}

impl Optimizer {
    /// Creates an optimizer with the full rule catalog.
    pub fn new(max_depth: usize) -> Result<Self, OptimizerError> {
        Self::with_rules(max_depth, default_rules())
    }

    /// Creates an optimizer with a custom catalog. Earlier rules win ties.
    pub fn with_rules(max_depth: usize, rules: Vec<Box<dyn Rule>>) -> Result<Self, OptimizerError> {
        if max_depth == 0 {
            return Err(OptimizerError::InvalidDepth);
        }
        Ok(Self { max_depth, rules })
    }

    #[inline]
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    #[inline]
    pub fn rules(&self) -> &[Box<dyn Rule>] {
        &self.rules
    }

    /// Optimizes `root` with repeated passes until a pass no longer shrinks it.
    ///
    /// The result is never larger than `root`, is equivalent to it, and is a fixed point:
    /// optimizing it again returns it unchanged.
    pub fn optimize(&self, root: &Node) -> Node {
        let mut current = root.clone();
        let mut pass = 0;
        loop {
            let next = self.optimize_once(&current);
            trace!("pass {}: size {} -> {}", pass, current.size(), next.size());
            if next.size() >= current.size() {
                debug!(
                    "optimized size {} to {} in {} passes",
                    root.size(),
                    current.size(),
                    pass + 1
                );
                return current;
            }
            current = next;
            pass += 1;
        }
    }

    /// Runs a single bottom-up pass over `root`.
    pub fn optimize_once(&self, root: &Node) -> Node {
        let children: Vec<Node> = root
            .children()
            .iter()
            .map(|child| self.optimize_once(child))
            .collect();
        let mut current = root.with_children(children);

        for _ in 0..self.max_depth {
            match self.best_outcome(&current) {
                Some((rule, outcome)) if outcome.score < 0 => {
                    debug!(
                        "{}: {} -> {} ({})",
                        rule.name(),
                        current,
                        outcome.replacement,
                        outcome.score
                    );
                    current = outcome.replacement;
                }
                _ => break,
            }
        }
        current
    }

    /// Returns the lowest-scoring outcome of every rule matching `node`. Earlier rules win ties.
    pub fn best_outcome(&self, node: &Node) -> Option<(&dyn Rule, OptimizationOutcome)> {
        let mut best: Option<(&dyn Rule, OptimizationOutcome)> = None;
        for rule in &self.rules {
            if let Some(outcome) = rule.check(node) {
                if best
                    .as_ref()
                    .map_or(true, |(_, best)| outcome.score < best.score)
                {
                    best = Some((&**rule, outcome));
                }
            }
        }
        best
    }
}

impl Default for Optimizer {
    fn default() -> Self {
        Self {
            max_depth: 1,
            rules: default_rules(),
        }
    }
}
