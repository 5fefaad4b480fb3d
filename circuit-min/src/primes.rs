// Copyright (c) The circuit-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Quine-McCluskey prime implicant generation.

use crate::{
    cube::Cube,
    errors::{MinimizeError, MAX_BITS},
};
use itertools::Itertools;
use log::{debug, trace};
use rayon::prelude::*;
use std::collections::{BTreeMap, BTreeSet};

/// Computes every prime implicant of the function that is 1 on `on_set`, merging mask groups
/// in parallel.
///
/// Primes are returned in ascending [`Cube`] order.
///
/// ```
/// use circuit_min::{cube::Cube, primes::prime_implicants};
///
/// // All rows where A (bit 0) is 0.
/// let primes = prime_implicants(4, [0, 2, 4, 6, 8, 10, 12, 14]).unwrap();
/// assert_eq!(primes, vec![Cube::new(0b0000, 0b0001)]);
/// ```
pub fn prime_implicants(
    n_bits: usize,
    on_set: impl IntoIterator<Item = u32>,
) -> Result<Vec<Cube>, MinimizeError> {
    let rows = check_rows(n_bits, on_set)?;
    Ok(generate(n_bits, &rows, true))
}

/// Like [`prime_implicants`], with `parallel` choosing between rayon tasks and a sequential
/// loop. The result is the same either way.
pub fn prime_implicants_with(
    n_bits: usize,
    on_set: impl IntoIterator<Item = u32>,
    parallel: bool,
) -> Result<Vec<Cube>, MinimizeError> {
    let rows = check_rows(n_bits, on_set)?;
    Ok(generate(n_bits, &rows, parallel))
}

/// Validates `n_bits` and every row, returning the deduplicated rows.
pub(crate) fn check_rows(
    n_bits: usize,
    rows: impl IntoIterator<Item = u32>,
) -> Result<BTreeSet<u16>, MinimizeError> {
    if !(1..=MAX_BITS).contains(&n_bits) {
        return Err(MinimizeError::BitCountOutOfRange { n_bits });
    }
    rows.into_iter()
        .map(|row| {
            if row >> n_bits != 0 {
                Err(MinimizeError::RowOutOfRange { row, n_bits })
            } else {
                Ok(row as u16)
            }
        })
        .collect()
}

/// Runs the merge rounds over already-validated rows.
pub(crate) fn generate(n_bits: usize, rows: &BTreeSet<u16>, parallel: bool) -> Vec<Cube> {
    let mut pool: BTreeSet<Cube> = rows.iter().map(|row| Cube::minterm(*row, n_bits)).collect();
    let mut primes = BTreeSet::new();

    let mut round = 0;
    while !pool.is_empty() {
        let mut groups: BTreeMap<u16, Vec<Cube>> = BTreeMap::new();
        for cube in pool {
            groups.entry(cube.mask()).or_default().push(cube);
        }
        let groups: Vec<Vec<Cube>> = groups.into_values().collect();

        // The collect is the round barrier: every group must finish before the next pool forms.
        let results: Vec<(Vec<Cube>, Vec<Cube>)> = if parallel {
            groups.par_iter().map(|group| merge_group(group)).collect()
        } else {
            groups.iter().map(|group| merge_group(group)).collect()
        };

        pool = BTreeSet::new();
        let primes_before = primes.len();
        for (emitted, group_primes) in results {
            pool.extend(emitted);
            primes.extend(group_primes);
        }
        debug!(
            "round {}: {} groups, {} new primes, {} cubes for the next round",
            round,
            groups.len(),
            primes.len() - primes_before,
            pool.len()
        );
        round += 1;
    }

    primes.into_iter().collect()
}

/// Merges every adjacent pair within one mask group. Returns the merged cubes and the cubes
/// that took part in no merge.
fn merge_group(group: &[Cube]) -> (Vec<Cube>, Vec<Cube>) {
    let mut consumed = vec![false; group.len()];
    let mut emitted = Vec::new();
    for (i, j) in (0..group.len()).tuple_combinations() {
        if let Some(merged) = group[i].merge(&group[j]) {
            trace!("merged {} and {} into {}", group[i], group[j], merged);
            emitted.push(merged);
            consumed[i] = true;
            consumed[j] = true;
        }
    }

    let primes = group
        .iter()
        .zip(consumed)
        .filter_map(|(cube, consumed)| (!consumed).then(|| *cube))
        .collect();
    (emitted, primes)
}
