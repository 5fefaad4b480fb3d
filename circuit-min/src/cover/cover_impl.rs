// Copyright (c) The circuit-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    cover::{CoverAlgebraicDisplay, CoverMatrixDisplay},
    cube::{variable_symbol, Cube},
    errors::{MinimizeError, NodeError, MAX_BITS},
    node::Node,
};
use std::collections::BTreeSet;

/// A sum of cubes over `n_bits` variables: the function is 1 on every row covered by at least
/// one cube.
#[derive(Clone, PartialEq, Eq)]
pub struct Cover {
    n_bits: usize,
    cubes: Vec<Cube>,
}

impl Cover {
    /// Creates a cover from cubes, keeping their order.
    ///
    /// # Panics
    ///
    /// Panics if a cube fixes a variable at or beyond `n_bits`.
    pub fn new(
        n_bits: usize,
        cubes: impl IntoIterator<Item = Cube>,
    ) -> Result<Self, MinimizeError> {
        if !(1..=MAX_BITS).contains(&n_bits) {
            return Err(MinimizeError::BitCountOutOfRange { n_bits });
        }
        let cubes: Vec<_> = cubes.into_iter().collect();
        for cube in &cubes {
            assert!(
                n_bits == MAX_BITS || cube.mask() >> n_bits == 0,
                "cube {} must fit in {} bits",
                cube,
                n_bits
            );
        }
        Ok(Self { n_bits, cubes })
    }

    /// Creates the empty cover, which is 0 everywhere.
    pub fn empty(n_bits: usize) -> Result<Self, MinimizeError> {
        Self::new(n_bits, [])
    }

    /// Creates a cover from parts that are already known to be valid.
    pub(crate) fn from_parts(n_bits: usize, cubes: Vec<Cube>) -> Self {
        Self { n_bits, cubes }
    }

    #[inline]
    pub fn n_bits(&self) -> usize {
        self.n_bits
    }

    #[inline]
    pub fn cubes(&self) -> &[Cube] {
        &self.cubes
    }

    #[inline]
    pub fn cube_count(&self) -> usize {
        self.cubes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cubes.is_empty()
    }

    /// The total number of literals over all cubes.
    pub fn literal_count(&self) -> u32 {
        self.cubes.iter().map(Cube::literal_count).sum()
    }

    /// Returns the value of the function on truth-table row `row`.
    ///
    /// # Panics
    ///
    /// Panics if `row` does not fit in `n_bits` bits.
    pub fn evaluate(&self, row: u32) -> bool {
        assert!(
            row >> self.n_bits == 0,
            "row {} must fit in {} bits",
            row,
            self.n_bits
        );
        self.cubes.iter().any(|cube| cube.covers(row as u16))
    }

    /// Every row on which the function is 1, ascending.
    pub fn on_set(&self) -> Vec<u32> {
        self.rows().filter(|row| self.evaluate(*row)).collect()
    }

    /// Checks this cover against an on-set. On mismatch, returns the lowest row where they
    /// differ.
    pub fn check_logically_equivalent(
        &self,
        on_set: impl IntoIterator<Item = u32>,
    ) -> Result<(), u32> {
        let on_set: BTreeSet<u32> = on_set.into_iter().collect();
        if let Some(row) = on_set.iter().find(|row| **row >> self.n_bits != 0) {
            return Err(*row);
        }
        match self
            .rows()
            .find(|row| self.evaluate(*row) != on_set.contains(row))
        {
            Some(row) => Err(row),
            None => Ok(()),
        }
    }

    /// Converts this cover to an Or of Ands, naming bit 0 `A`, bit 1 `B` and so on.
    pub fn to_node(&self) -> Node {
        let variables: Vec<_> = (0..self.n_bits)
            .map(|bit| Node::symbol(variable_symbol(bit)))
            .collect();
        self.to_node_with(&variables)
    }

    /// Converts this cover to an Or of Ands, naming bit `i` `names[i]`.
    ///
    /// ```
    /// use circuit_min::{cover::Cover, cube::Cube};
    ///
    /// let cover = Cover::new(2, [Cube::new(0b01, 0b11), Cube::new(0b10, 0b10)]).unwrap();
    /// assert_eq!(cover.to_node_named(&["x", "y"]).unwrap().to_string(), "y+(x&~y)");
    /// ```
    pub fn to_node_named<S: AsRef<str>>(&self, names: &[S]) -> Result<Node, NodeError> {
        if names.len() != self.n_bits {
            return Err(NodeError::NameCountMismatch {
                expected: self.n_bits,
                actual: names.len(),
            });
        }
        let variables = names
            .iter()
            .map(Node::variable)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(self.to_node_with(&variables))
    }

    #[inline]
    pub fn matrix_display(&self) -> CoverMatrixDisplay<'_> {
        CoverMatrixDisplay::new(self)
    }

    #[inline]
    pub fn algebraic_display(&self) -> CoverAlgebraicDisplay<'_> {
        CoverAlgebraicDisplay::new(self)
    }

    // ---
    // Helper methods
    // ---

    fn rows(&self) -> impl Iterator<Item = u32> {
        0..(1u32 << self.n_bits)
    }

    fn to_node_with(&self, variables: &[Node]) -> Node {
        Node::or_of(self.cubes.iter().map(|cube| cube.to_node(variables)))
    }
}
