// Copyright (c) The circuit-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::cube::{full_mask, Cube};
use bitvec::prelude::*;
use log::{debug, trace};
use std::fmt;

/// What [`PrimeImplicantChart::reduce`] does once no essential prime, dominated row or
/// dominated column is left but some columns are still uncovered.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum CyclicCore {
    /// Stop and leave the remaining columns uncovered.
    Leave,

    /// Select the row covering the most remaining columns (lowest index on ties), then resume
    /// reduction.
    #[default]
    Greedy,
}

/// A coverage matrix between candidate primes (rows) and the on-set rows they must cover
/// (columns).
///
/// Built once, then reduced in place by [`reduce`](Self::reduce). Cells are stored both by row
/// and by column so that either direction can be walked without scanning the whole chart.
#[derive(Clone, Debug)]
pub struct PrimeImplicantChart {
    rows: Vec<BitVec<u64, Lsb0>>,
    columns: Vec<BitVec<u64, Lsb0>>,
    deleted_rows: BitVec<u64, Lsb0>,
    deleted_columns: BitVec<u64, Lsb0>,
    selected: Vec<usize>,
}

impl PrimeImplicantChart {
    /// Creates an empty chart with no cell set.
    pub fn new(row_count: usize, column_count: usize) -> Self {
        Self {
            rows: vec![bitvec![u64, Lsb0; 0; column_count]; row_count],
            columns: vec![bitvec![u64, Lsb0; 0; row_count]; column_count],
            deleted_rows: bitvec![u64, Lsb0; 0; row_count],
            deleted_columns: bitvec![u64, Lsb0; 0; column_count],
            selected: Vec::new(),
        }
    }

    /// Creates the chart of `primes` against the truth-table rows in `on_set`.
    pub fn from_primes(primes: &[Cube], on_set: &[u16]) -> Self {
        let mut chart = Self::new(primes.len(), on_set.len());

        let mut by_minterm: Vec<(u16, usize)> = on_set.iter().copied().zip(0..).collect();
        by_minterm.sort_unstable();
        let width = on_set
            .iter()
            .max()
            .map_or(0, |max| (16 - max.leading_zeros()) as usize);
        let in_range = full_mask(width);

        for (row, prime) in primes.iter().enumerate() {
            // Walk every submask of the free bits: these are exactly the minterms the prime
            // covers below 2^width.
            let free = !prime.mask() & in_range;
            let mut sub = free;
            loop {
                let minterm = prime.value() | sub;
                let start = by_minterm.partition_point(|(m, _)| *m < minterm);
                for (_, column) in by_minterm[start..]
                    .iter()
                    .take_while(|(m, _)| *m == minterm)
                {
                    chart.set_cell(row, *column, true);
                }
                if sub == 0 {
                    break;
                }
                sub = (sub - 1) & free;
            }
        }
        chart
    }

    #[inline]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// # Panics
    ///
    /// Panics if `row` or `column` is out of range.
    pub fn get(&self, row: usize, column: usize) -> bool {
        self.check_row(row);
        self.check_column(column);
        self.rows[row][column]
    }

    /// # Panics
    ///
    /// Panics if `row` or `column` is out of range.
    pub fn set(&mut self, row: usize, column: usize, value: bool) {
        self.check_row(row);
        self.check_column(column);
        self.set_cell(row, column, value);
    }

    /// # Panics
    ///
    /// Panics if `row` is out of range.
    pub fn is_row_deleted(&self, row: usize) -> bool {
        self.check_row(row);
        self.deleted_rows[row]
    }

    /// # Panics
    ///
    /// Panics if `column` is out of range.
    pub fn is_column_deleted(&self, column: usize) -> bool {
        self.check_column(column);
        self.deleted_columns[column]
    }

    /// The rows selected so far, in the order they were selected.
    pub fn selected_rows(&self) -> &[usize] {
        &self.selected
    }

    /// Columns that are still live: not covered by a selected row, and not implied by another
    /// live column.
    pub fn uncovered_columns(&self) -> impl Iterator<Item = usize> + '_ {
        self.deleted_columns.iter_zeros()
    }

    /// Reduces the chart to a set of rows covering every column, and returns the selected rows
    /// in ascending order.
    ///
    /// Each step extracts essential rows (the only live row covering some column), deletes rows
    /// dominated by another row, and deletes columns that dominate another column. Steps repeat
    /// until nothing changes; `cyclic_core` decides what happens if columns are still uncovered
    /// at that point.
    pub fn reduce(&mut self, cyclic_core: CyclicCore) -> Vec<usize> {
        loop {
            let mut changed = self.select_essential_rows();
            changed |= self.delete_dominated_rows();
            changed |= self.delete_dominating_columns();
            if changed {
                continue;
            }

            if self.uncovered_columns().next().is_none() {
                break;
            }
            match cyclic_core {
                CyclicCore::Leave => {
                    debug!(
                        "cyclic core left with {} uncovered columns",
                        self.uncovered_columns().count()
                    );
                    break;
                }
                CyclicCore::Greedy => {
                    let best = self
                        .live_rows()
                        .map(|row| (self.live_columns_of(row).count(), row))
                        // max_by_key returns the last maximum, so compare on reversed index
                        .max_by_key(|&(count, row)| (count, std::cmp::Reverse(row)));
                    match best {
                        Some((count, row)) if count > 0 => {
                            debug!(
                                "cyclic core: greedily selecting row {} ({} columns)",
                                row, count
                            );
                            self.select_row(row);
                        }
                        _ => {
                            debug!("cyclic core: remaining columns cannot be covered");
                            break;
                        }
                    }
                }
            }
        }

        let mut selected = self.selected.clone();
        selected.sort_unstable();
        selected
    }

    // ---
    // Helper methods
    // ---

    fn check_row(&self, row: usize) {
        assert!(
            row < self.row_count(),
            "row {} must be in range [0..{})",
            row,
            self.row_count()
        );
    }

    fn check_column(&self, column: usize) {
        assert!(
            column < self.column_count(),
            "column {} must be in range [0..{})",
            column,
            self.column_count()
        );
    }

    fn set_cell(&mut self, row: usize, column: usize, value: bool) {
        self.rows[row].set(column, value);
        self.columns[column].set(row, value);
    }

    fn live_rows(&self) -> impl Iterator<Item = usize> + '_ {
        self.deleted_rows.iter_zeros()
    }

    fn live_rows_of(&self, column: usize) -> impl Iterator<Item = usize> + '_ {
        self.columns[column]
            .iter_ones()
            .filter(move |&row| !self.deleted_rows[row])
    }

    fn live_columns_of(&self, row: usize) -> impl Iterator<Item = usize> + '_ {
        self.rows[row]
            .iter_ones()
            .filter(move |&column| !self.deleted_columns[column])
    }

    fn select_row(&mut self, row: usize) {
        let covered: Vec<usize> = self.live_columns_of(row).collect();
        trace!("row {} covers columns {:?}", row, covered);
        for column in covered {
            self.deleted_columns.set(column, true);
        }
        self.deleted_rows.set(row, true);
        self.selected.push(row);
    }

    fn select_essential_rows(&mut self) -> bool {
        let mut changed = false;
        for column in 0..self.column_count() {
            if self.deleted_columns[column] {
                continue;
            }
            let only = {
                let mut covering = self.live_rows_of(column);
                match (covering.next(), covering.next()) {
                    (Some(row), None) => Some(row),
                    _ => None,
                }
            };
            if let Some(row) = only {
                debug!("row {} is essential for column {}", row, column);
                self.select_row(row);
                changed = true;
            }
        }
        changed
    }

    fn delete_dominated_rows(&mut self) -> bool {
        let mut changed = false;
        let candidates: Vec<usize> = self.live_rows().collect();
        for row in candidates {
            if self.is_row_dominated(row) {
                debug!("row {} is dominated", row);
                self.deleted_rows.set(row, true);
                changed = true;
            }
        }
        changed
    }

    /// Returns true if another live row covers every live column of `row`. Of two rows covering
    /// the same live columns, the later one is dominated.
    fn is_row_dominated(&self, row: usize) -> bool {
        let covered: Vec<usize> = self.live_columns_of(row).collect();
        let dominates = |other: usize| {
            other != row
                && covered.iter().all(|&column| self.rows[other][column])
                && (other < row || self.live_columns_of(other).any(|c| !self.rows[row][c]))
        };
        match covered.first() {
            // A dominating row covers the first column too.
            Some(&column) => self.live_rows_of(column).any(dominates),
            None => self.live_rows().any(dominates),
        }
    }

    fn delete_dominating_columns(&mut self) -> bool {
        let mut changed = false;
        let candidates: Vec<usize> = self.uncovered_columns().collect();
        for column in candidates {
            if self.is_column_dominating(column) {
                debug!("column {} dominates another column", column);
                self.deleted_columns.set(column, true);
                changed = true;
            }
        }
        changed
    }

    /// Returns true if the live rows covering another live column are all among the live rows
    /// covering `column`, so that covering the other column covers this one too. Of two columns
    /// covered by the same live rows, the later one is dominating.
    fn is_column_dominating(&self, column: usize) -> bool {
        let covering: Vec<usize> = self.live_rows_of(column).collect();
        // A dominated column has at least one live row, and that row also covers `column`.
        covering.iter().any(|&row| {
            self.live_columns_of(row).any(|other| {
                other != column
                    && self.live_rows_of(other).all(|r| self.rows[r][column])
                    && (other < column || covering.iter().any(|&r| !self.rows[r][other]))
            })
        })
    }
}

/// One line per row, one `0`/`1` per column.
impl fmt::Display for PrimeImplicantChart {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (ix, row) in self.rows.iter().enumerate() {
            if ix > 0 {
                writeln!(f)?;
            }
            for bit in row.iter() {
                write!(f, "{}", if *bit { '1' } else { '0' })?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    fn chart_from_rows(rows: &[&str]) -> PrimeImplicantChart {
        let column_count = rows.first().map_or(0, |row| row.len());
        let mut chart = PrimeImplicantChart::new(rows.len(), column_count);
        for (row, cells) in rows.iter().enumerate() {
            for (column, cell) in cells.chars().enumerate() {
                chart.set(row, column, cell == '1');
            }
        }
        chart
    }

    #[test]
    fn test_empty_chart() {
        let mut chart = PrimeImplicantChart::new(0, 0);
        assert_eq!(chart.reduce(CyclicCore::Greedy), Vec::<usize>::new());
        assert_eq!(chart.to_string(), "");
    }

    #[test]
    fn test_display() {
        let chart = chart_from_rows(&["110", "001"]);
        assert_eq!(chart.to_string(), "110\n001");
        assert!(chart.get(0, 1));
        assert!(!chart.get(1, 1));
    }

    #[test]
    #[should_panic(expected = "column 3 must be in range [0..3)")]
    fn test_set_out_of_range() {
        let mut chart = PrimeImplicantChart::new(2, 3);
        chart.set(1, 3, true);
    }

    #[test]
    #[should_panic(expected = "row 2 must be in range [0..2)")]
    fn test_is_row_deleted_out_of_range() {
        let chart = PrimeImplicantChart::new(2, 3);
        chart.is_row_deleted(2);
    }

    #[test]
    #[should_panic(expected = "column 5 must be in range [0..3)")]
    fn test_is_column_deleted_out_of_range() {
        let chart = PrimeImplicantChart::new(2, 3);
        chart.is_column_deleted(5);
    }

    #[test]
    fn test_from_primes_cells() {
        // Unsorted on-set with a repeated row, and primes with free bits above the widest row.
        let on_set = [6, 1, 3, 6, 0];
        let primes = [
            Cube::new(0b000, 0b001),
            Cube::new(0b001, 0b001),
            Cube::UNIVERSE,
            Cube::new(0b1000, 0b1000),
            Cube::new(0b011, 0b011),
        ];
        let chart = PrimeImplicantChart::from_primes(&primes, &on_set);
        for (row, prime) in primes.iter().enumerate() {
            for (column, minterm) in on_set.iter().enumerate() {
                assert_eq!(
                    chart.get(row, column),
                    prime.covers(*minterm),
                    "prime {} against row {}",
                    prime,
                    minterm
                );
            }
        }
    }

    #[test]
    fn test_essential_rows() {
        let mut chart = chart_from_rows(&["110", "010", "001"]);
        assert_eq!(chart.reduce(CyclicCore::Leave), vec![0, 2]);
        assert_eq!(chart.uncovered_columns().count(), 0);
    }

    #[test]
    fn test_row_and_column_dominance() {
        let mut chart = chart_from_rows(&["1100", "1000", "0011", "0110"]);
        assert_eq!(chart.reduce(CyclicCore::Leave), vec![0, 2]);
        assert!(chart.is_row_deleted(1));
        assert!(chart.is_row_deleted(3));
        assert_eq!(chart.selected_rows(), &[2, 0]);
    }

    #[test]
    fn test_equal_rows_keep_first() {
        let mut chart = chart_from_rows(&["11", "11"]);
        assert_eq!(chart.reduce(CyclicCore::Leave), vec![0]);
    }

    #[test]
    fn test_cyclic_core() {
        // On-set {0, 1, 2, 5, 6, 7} over 3 variables: every minterm is covered by exactly two
        // of the six primes.
        let on_set = [0, 1, 2, 5, 6, 7];
        let primes = [
            Cube::new(0b000, 0b110),
            Cube::new(0b000, 0b101),
            Cube::new(0b001, 0b011),
            Cube::new(0b010, 0b011),
            Cube::new(0b101, 0b101),
            Cube::new(0b110, 0b110),
        ];

        let mut chart = PrimeImplicantChart::from_primes(&primes, &on_set);
        assert_eq!(chart.reduce(CyclicCore::Leave), Vec::<usize>::new());
        assert_eq!(chart.uncovered_columns().count(), 6);

        let mut chart = PrimeImplicantChart::from_primes(&primes, &on_set);
        let selected = chart.reduce(CyclicCore::Greedy);
        assert_eq!(selected, vec![0, 3, 4]);
        for minterm in on_set {
            assert!(
                selected.iter().any(|&row| primes[row].covers(minterm)),
                "minterm {} covered",
                minterm
            );
        }
    }

    #[test]
    fn test_uncoverable_column() {
        let mut chart = chart_from_rows(&["10", "10"]);
        assert_eq!(chart.reduce(CyclicCore::Greedy), vec![0]);
        assert_eq!(chart.uncovered_columns().collect::<Vec<_>>(), vec![1]);
    }
}
