// Copyright (c) The circuit-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types returned by this crate.

use thiserror::Error;

/// The widest function the two-level minimizer accepts.
pub const MAX_BITS: usize = 16;

/// An error returned while preparing a two-level minimization problem.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum MinimizeError {
    /// The variable count is outside `1..=16`.
    #[error("invalid number of bits: expected between 1 and {MAX_BITS}, found {n_bits}")]
    BitCountOutOfRange {
        /// The variable count that was passed in.
        n_bits: usize,
    },

    /// A truth-table row does not fit in `n_bits` bits.
    #[error("row {row} does not fit in {n_bits} bits")]
    RowOutOfRange {
        /// The offending row.
        row: u32,
        /// The variable count of the function.
        n_bits: usize,
    },

    /// A node being tabulated uses a variable that was not given a bit.
    #[error(transparent)]
    UnboundVariable(#[from] UnboundVariable),
}

/// An error returned while constructing a [`Node`](crate::node::Node).
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum NodeError {
    /// A variable name was empty or made only of whitespace.
    #[error("invalid variable name: cannot be empty or blank")]
    EmptyVariableName,

    /// An And or Or node was given fewer than two children.
    #[error("invalid list of nodes for {kind}: should have had >= 2 elements but had {count}")]
    TooFewChildren {
        /// `"And"` or `"Or"`.
        kind: &'static str,
        /// The number of children that was passed in.
        count: usize,
    },

    /// A cover was rendered with the wrong number of variable names.
    #[error("expected {expected} variable names, found {actual}")]
    NameCountMismatch {
        /// The variable count of the cover.
        expected: usize,
        /// The number of names that was passed in.
        actual: usize,
    },
}

/// Evaluating a [`Node`](crate::node::Node) ran into a variable with no bound value.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("cannot evaluate without value of variable '{name}'")]
pub struct UnboundVariable {
    /// The name of the unbound variable.
    pub name: String,
}

/// An error returned while configuring an [`Optimizer`](crate::optimize::Optimizer).
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum OptimizerError {
    /// `max_depth` must be at least 1.
    #[error("invalid max depth: must be >= 1")]
    InvalidDepth,
}
