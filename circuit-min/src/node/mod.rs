// Copyright (c) The circuit-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Boolean expression trees.

mod display;
mod node_impl;

pub use node_impl::*;

use std::{
    borrow::Borrow,
    collections::{BTreeMap, HashMap},
    hash::{BuildHasher, Hash},
};

/// A source of values for the free variables of a [`Node`].
pub trait Assignment {
    /// Returns the value bound to `name`, or `None` if it is unbound.
    fn value_of(&self, name: &str) -> Option<bool>;
}

impl<K, S> Assignment for HashMap<K, bool, S>
where
    K: Borrow<str> + Hash + Eq,
    S: BuildHasher,
{
    fn value_of(&self, name: &str) -> Option<bool> {
        self.get(name).copied()
    }
}

impl<K> Assignment for BTreeMap<K, bool>
where
    K: Borrow<str> + Ord,
{
    fn value_of(&self, name: &str) -> Option<bool> {
        self.get(name).copied()
    }
}
