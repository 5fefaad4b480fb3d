// Copyright (c) The circuit-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    cube::{full_mask, variable_symbol, Cube},
    errors::MAX_BITS,
    node::Node,
};
use proptest::prelude::*;
use std::collections::BTreeMap;

impl Arbitrary for Cube {
    /// The number of variables the cube may fix. `None` means all 16.
    type Parameters = Option<usize>;
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(n_bits: Self::Parameters) -> Self::Strategy {
        let full = full_mask(n_bits.unwrap_or(MAX_BITS));
        (any::<u16>(), any::<u16>())
            .prop_map(move |(value, mask)| Cube::new(value, mask & full))
            .boxed()
    }
}

/// Shape limits for generated expression trees.
#[derive(Copy, Clone, Debug)]
pub struct NodeParams {
    /// Variables are drawn from the first `variable_count` of `A`, `B`, `C`, ...
    pub variable_count: usize,
    pub depth: u32,
    pub desired_size: u32,
    /// The largest number of children of a generated And or Or.
    pub max_width: usize,
}

impl Default for NodeParams {
    fn default() -> Self {
        Self {
            variable_count: 4,
            depth: 4,
            desired_size: 24,
            max_width: 3,
        }
    }
}

impl Arbitrary for Node {
    type Parameters = NodeParams;
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(params: Self::Parameters) -> Self::Strategy {
        let variable_count = params.variable_count.clamp(1, MAX_BITS);
        let leaf = prop_oneof![
            1 => any::<bool>().prop_map(Node::constant),
            6 => (0..variable_count).prop_map(|bit| Node::symbol(variable_symbol(bit))),
        ];

        let max_width = params.max_width.max(2);
        leaf.prop_recursive(params.depth, params.desired_size, max_width as u32, move |inner| {
            prop_oneof![
                inner.clone().prop_map(Node::not),
                prop::collection::vec(inner.clone(), 2..=max_width)
                    .prop_map(|children| Node::and_of(children)),
                prop::collection::vec(inner, 2..=max_width)
                    .prop_map(|children| Node::or_of(children)),
            ]
        })
        .boxed()
    }
}

/// Generates `(n_bits, on_set)` pairs with `n_bits` in `1..=max_bits` and every row in range.
pub fn on_set_strategy(max_bits: usize) -> impl Strategy<Value = (usize, Vec<u32>)> {
    (1..=max_bits.clamp(1, MAX_BITS))
        .prop_flat_map(|n_bits| (Just(n_bits), on_set_rows_strategy(n_bits)))
}

/// Generates on-sets over exactly `n_bits` variables. Rows may repeat.
pub fn on_set_rows_strategy(n_bits: usize) -> impl Strategy<Value = Vec<u32>> {
    let row_count = 1u32 << n_bits.min(MAX_BITS);
    prop::collection::vec(0..row_count, 0..=(row_count as usize))
}

/// Every assignment of the variables `node` refers to.
pub fn assignments(node: &Node) -> Vec<BTreeMap<String, bool>> {
    let names: Vec<&str> = node.variables().into_iter().collect();
    (0..(1u32 << names.len()))
        .map(|row| {
            names
                .iter()
                .enumerate()
                .map(|(bit, name)| (name.to_string(), row & (1 << bit) != 0))
                .collect()
        })
        .collect()
}
