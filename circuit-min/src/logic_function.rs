// Copyright (c) The circuit-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    cover::{Cover, CyclicCore, PrimeImplicantChart},
    cube::Cube,
    errors::{MinimizeError, MAX_BITS},
    node::{Assignment, Node},
    primes,
};
use log::debug;
use std::collections::BTreeSet;

/// Options for [`LogicFunction::minimize_with`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MinimizeOptions {
    pub cyclic_core: CyclicCore,
    pub parallel: bool,
}

impl MinimizeOptions {
    pub fn with_cyclic_core(mut self, cyclic_core: CyclicCore) -> Self {
        self.cyclic_core = cyclic_core;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

impl Default for MinimizeOptions {
    fn default() -> Self {
        Self {
            cyclic_core: CyclicCore::default(),
            parallel: true,
        }
    }
}

/// A single-output Boolean function of up to 16 variables, given as a truth table.
///
/// Rows are truth-table indexes: bit `i` of a row is the value of variable `i`. The function is 1
/// on `on_set`, may be anything on `dc_set`, and is 0 everywhere else.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogicFunction {
    n_bits: usize,
    on_set: BTreeSet<u16>,
    dc_set: BTreeSet<u16>,
}

impl LogicFunction {
    /// Creates a function. Duplicate rows are ignored, and rows that are in both sets are treated
    /// as on-set rows.
    pub fn new(
        n_bits: usize,
        on_set: impl IntoIterator<Item = u32>,
        dc_set: impl IntoIterator<Item = u32>,
    ) -> Result<Self, MinimizeError> {
        let on_set = primes::check_rows(n_bits, on_set)?;
        let mut dc_set = primes::check_rows(n_bits, dc_set)?;
        dc_set.retain(|row| !on_set.contains(row));
        Ok(Self {
            n_bits,
            on_set,
            dc_set,
        })
    }

    /// Tabulates `node` over every assignment of `names`, with bit `i` giving the value of
    /// `names[i]`.
    ///
    /// ```
    /// use circuit_min::{logic_function::LogicFunction, node::Node};
    ///
    /// let a = Node::variable("A").unwrap();
    /// let b = Node::variable("B").unwrap();
    /// let function = LogicFunction::from_node(&(a | !b), &["A", "B"]).unwrap();
    /// assert_eq!(function.on_set().collect::<Vec<_>>(), vec![0, 1, 3]);
    /// ```
    pub fn from_node<S: AsRef<str>>(node: &Node, names: &[S]) -> Result<Self, MinimizeError> {
        let n_bits = names.len();
        if !(1..=MAX_BITS).contains(&n_bits) {
            return Err(MinimizeError::BitCountOutOfRange { n_bits });
        }

        let mut on_set = BTreeSet::new();
        for row in 0..(1u32 << n_bits) {
            if node.evaluate(&RowAssignment { names, row })? {
                on_set.insert(row as u16);
            }
        }
        Ok(Self {
            n_bits,
            on_set,
            dc_set: BTreeSet::new(),
        })
    }

    #[inline]
    pub fn n_bits(&self) -> usize {
        self.n_bits
    }

    pub fn on_set(&self) -> impl Iterator<Item = u32> + '_ {
        self.on_set.iter().map(|row| u32::from(*row))
    }

    pub fn dc_set(&self) -> impl Iterator<Item = u32> + '_ {
        self.dc_set.iter().map(|row| u32::from(*row))
    }

    /// Every prime implicant of this function, with don't-care rows free to be either value.
    pub fn prime_implicants(&self, parallel: bool) -> Vec<Cube> {
        let rows: BTreeSet<u16> = self.on_set.union(&self.dc_set).copied().collect();
        primes::generate(self.n_bits, &rows, parallel)
    }

    /// Minimizes this function with default options.
    pub fn minimize(&self) -> Cover {
        self.minimize_with(MinimizeOptions::default())
    }

    /// Computes the prime implicants, then reduces the chart of primes against on-set rows to a
    /// cover.
    ///
    /// With [`CyclicCore::Leave`] the cover may miss on-set rows if the chart has a cyclic core.
    pub fn minimize_with(&self, options: MinimizeOptions) -> Cover {
        if self.on_set.is_empty() {
            return Cover::from_parts(self.n_bits, Vec::new());
        }

        let primes = self.prime_implicants(options.parallel);
        let columns: Vec<u16> = self.on_set.iter().copied().collect();
        let mut chart = PrimeImplicantChart::from_primes(&primes, &columns);
        let selected = chart.reduce(options.cyclic_core);
        debug!(
            "minimized {} on-set rows ({} don't cares) to {} of {} primes",
            self.on_set.len(),
            self.dc_set.len(),
            selected.len(),
            primes.len()
        );

        Cover::from_parts(self.n_bits, selected.into_iter().map(|ix| primes[ix]).collect())
    }
}

/// Minimizes the function that is 1 exactly on `on_set`.
///
/// ```
/// use circuit_min::{cube::Cube, logic_function::minimize};
///
/// // Every row where A (bit 0) is 0.
/// let cover = minimize(4, [0, 2, 4, 6, 8, 10, 12, 14]).unwrap();
/// assert_eq!(cover.cubes(), &[Cube::new(0, 0b0001)]);
/// ```
pub fn minimize(
    n_bits: usize,
    on_set: impl IntoIterator<Item = u32>,
) -> Result<Cover, MinimizeError> {
    Ok(LogicFunction::new(n_bits, on_set, [])?.minimize())
}

/// Binds `names[i]` to bit `i` of `row`.
struct RowAssignment<'a, S> {
    names: &'a [S],
    row: u32,
}

impl<'a, S: AsRef<str>> Assignment for RowAssignment<'a, S> {
    fn value_of(&self, name: &str) -> Option<bool> {
        self.names
            .iter()
            .position(|candidate| candidate.as_ref() == name)
            .map(|bit| self.row & (1 << bit) != 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{errors::UnboundVariable, proptest_helpers::on_set_strategy};
    use proptest::prelude::*;
    use std::hash::Hasher;
    use test_log::test;
    use twox_hash::XxHash64;

    fn var(name: &str) -> Node {
        Node::variable(name).unwrap()
    }

    fn vars() -> [Node; 4] {
        [var("A"), var("B"), var("C"), var("D")]
    }

    /// Tabulates `node` over A..D, minimizes it and converts the cover back to a node.
    fn minimize_node(node: &Node) -> Node {
        let function = LogicFunction::from_node(node, &["A", "B", "C", "D"]).unwrap();
        let cover = function.minimize();
        cover
            .check_logically_equivalent(function.on_set())
            .expect("cover matches on-set");
        cover.to_node()
    }

    #[test]
    fn test_invalid_input() {
        assert_eq!(
            LogicFunction::new(17, [], []),
            Err(MinimizeError::BitCountOutOfRange { n_bits: 17 })
        );
        assert_eq!(
            LogicFunction::new(2, [1], [4]),
            Err(MinimizeError::RowOutOfRange { row: 4, n_bits: 2 })
        );
        assert_eq!(
            LogicFunction::from_node(&var("Z"), &["A"]),
            Err(MinimizeError::UnboundVariable(UnboundVariable {
                name: "Z".to_string()
            }))
        );
        assert_eq!(
            LogicFunction::from_node::<&str>(&var("Z"), &[]),
            Err(MinimizeError::BitCountOutOfRange { n_bits: 0 })
        );
    }

    #[test]
    fn test_empty_on_set() {
        let cover = minimize(3, []).unwrap();
        assert!(cover.is_empty());
        assert_eq!(cover.to_node(), Node::zero());
    }

    #[test]
    fn test_tautology() {
        let cover = minimize(3, 0..8).unwrap();
        assert_eq!(cover.cubes(), &[Cube::UNIVERSE]);
        assert_eq!(cover.to_node(), Node::one());
    }

    #[test]
    fn test_single_cube() {
        // A&B&C&D + A&B&C&~D
        let cover = minimize(4, [7, 15]).unwrap();
        assert_eq!(cover.cubes(), &[Cube::new(0b0111, 0b0111)]);
    }

    #[test]
    fn test_minimize_table() {
        let [a, b, c, d] = vars();
        let cases = [
            (
                Node::and_of([a.clone(), b.clone(), c.clone(), d.clone()]),
                Node::and_of([a.clone(), b.clone(), c.clone(), d.clone()]),
            ),
            (
                Node::and_of([a.clone(), b.clone(), c.clone(), d.clone()])
                    | Node::and_of([a.clone(), b.clone(), c.clone(), !&d]),
                Node::and_of([a.clone(), b.clone(), c.clone()]),
            ),
            (
                Node::and_of([a.clone(), b.clone(), c.clone(), d.clone()])
                    | Node::and_of([!&a, b.clone(), c.clone(), d.clone()]),
                Node::and_of([b.clone(), c.clone(), d.clone()]),
            ),
            (&a | &(&a & &b), a.clone()),
            (&a & &(&a | &b), a.clone()),
            (
                Node::or_of([
                    a.clone(),
                    b.clone(),
                    Node::and_of([b.clone(), c.clone(), d.clone()]),
                ]),
                &a | &b,
            ),
            (
                (&a & &!&b) | (&!&a & &b),
                (&a & &!&b) | (&!&a & &b),
            ),
            (
                &a & &(&b | &(&c & &d)),
                (&a & &b) | Node::and_of([a.clone(), c.clone(), d.clone()]),
            ),
            (
                !Node::and_of([a.clone(), !&b, c.clone(), !&d]),
                Node::or_of([!&a, b.clone(), !&c, d.clone()]),
            ),
            (
                Node::or_of([
                    Node::and_of([b.clone(), !&c, !&d]),
                    &a & &!&b,
                    &a & &c,
                ]),
                Node::or_of([
                    Node::and_of([b.clone(), !&c, !&d]),
                    &a & &!&b,
                    &a & &c,
                ]),
            ),
        ];

        for (input, expected) in cases {
            assert_eq!(minimize_node(&input), expected, "minimizing {}", input);
        }
    }

    #[test]
    fn test_dont_cares() {
        // On {1, 3}, don't care {5, 7}: ~B&A&~C + ~C&A&B widens to A once 5 and 7 are free.
        let function = LogicFunction::new(3, [1, 3], [5, 7]).unwrap();
        assert_eq!(function.minimize().cubes(), &[Cube::new(0b001, 0b001)]);

        // Without don't cares the same on-set needs C.
        let function = LogicFunction::new(3, [1, 3], []).unwrap();
        assert_eq!(function.minimize().cubes(), &[Cube::new(0b001, 0b101)]);

        // A row in both sets is an on-set row.
        let function = LogicFunction::new(2, [1], [1, 2]).unwrap();
        assert_eq!(function.dc_set().collect::<Vec<_>>(), vec![2]);
    }

    #[test]
    fn test_cyclic_core_options() {
        let function = LogicFunction::new(3, [0, 1, 2, 5, 6, 7], []).unwrap();

        let greedy = function.minimize();
        assert_eq!(greedy.cube_count(), 3);
        assert_eq!(greedy.check_logically_equivalent(function.on_set()), Ok(()));

        let left = function
            .minimize_with(MinimizeOptions::default().with_cyclic_core(CyclicCore::Leave));
        assert!(left.is_empty());
    }

    #[test]
    fn test_dense_twelve_bits() {
        // About half of the 4096 rows, picked by hash so the function has no structure to exploit.
        let on_set: Vec<u32> = (0..4096u32)
            .filter(|row| {
                let mut hasher = XxHash64::with_seed(12);
                hasher.write_u32(*row);
                hasher.finish() & 1 == 1
            })
            .collect();
        let function = LogicFunction::new(12, on_set.iter().copied(), []).unwrap();
        let cover = function.minimize();
        assert_eq!(cover.check_logically_equivalent(on_set.iter().copied()), Ok(()));
        assert!(cover.cube_count() < on_set.len());
    }

    proptest! {
        #[test]
        fn proptest_cover_equivalent((n_bits, on_set) in on_set_strategy(8)) {
            let function = LogicFunction::new(n_bits, on_set.iter().copied(), []).unwrap();
            let cover = function.minimize();
            prop_assert_eq!(cover.check_logically_equivalent(on_set.iter().copied()), Ok(()));
            prop_assert_eq!(
                &cover,
                &function.minimize_with(MinimizeOptions::default().with_parallel(false)),
            );
        }
    }
}
