// Copyright (c) The circuit-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{OptimizationOutcome, Rule};
use crate::node::Node;

/// `~~x = x`.
#[derive(Copy, Clone, Debug)]
pub struct DoubleNot;

impl Rule for DoubleNot {
    fn name(&self) -> &'static str {
        "DoubleNot"
    }

    fn check(&self, root: &Node) -> Option<OptimizationOutcome> {
        let inner = root.as_not()?.as_not()?;
        Some(OptimizationOutcome::new(root, inner.clone()))
    }
}
