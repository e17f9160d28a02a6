// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Per-dimension sorted index.
//!
//! For each dimension the index keeps every tuple ordered by value (ties by
//! key), and for each tuple an offset row holding its rank in every
//! dimension followed by its worst rank and its rank sum:
//!
//! ```text
//! offsets[key] = [ rank_0, rank_1, ..., rank_{d-1}, max_rank, rank_sum ]
//! ```
//!
//! Both tables are computed once by [`DimensionIndex::build`] and never change.
//!
//! During a query the index also tracks, per dimension, the tuples confirmed
//! as skyline while scanning that dimension, and whether the dimension has
//! been stopped by the stop line.

pub mod entry;

pub use entry::Entry;

use crate::config::DimensionSelection;
use crate::matrix::Matrix;
use crate::statistics::{Counters, Statistics};
use crate::store::{Key, TupleStore};
use std::io::{self, Write};
use tracing::debug;

/// Read-only view of one tuple's offset row.
#[derive(Debug, Clone, Copy)]
pub struct Offsets<'a> {
    row: &'a [usize],
    dimensionality: usize,
}

impl<'a> Offsets<'a> {
    /// Rank of the tuple in dimension `d`.
    #[inline]
    pub fn rank(&self, d: usize) -> usize {
        self.row[d]
    }

    /// Ranks in every dimension.
    pub fn ranks(&self) -> &'a [usize] {
        &self.row[..self.dimensionality]
    }

    /// Worst rank across dimensions.
    #[inline]
    pub fn max_rank(&self) -> usize {
        self.row[self.dimensionality]
    }

    /// Sum of ranks across dimensions.
    #[inline]
    pub fn rank_sum(&self) -> usize {
        self.row[self.dimensionality + 1]
    }
}

/// Sorted orderings, offset matrix and per-dimension query state.
#[derive(Debug, Clone, Default)]
pub struct DimensionIndex {
    /// `dimensionality` rows of `cardinality` entries each.
    orderings: Matrix<Entry>,
    /// `cardinality` rows of `dimensionality + 2` columns.
    offsets: Matrix<usize>,
    /// Keys confirmed as skyline while scanning each dimension.
    confirmed: Vec<Vec<Key>>,
    stopped: Vec<bool>,
    cardinality: usize,
    dimensionality: usize,
}

impl DimensionIndex {
    /// Allocate an index sized for the tuples currently in `store`.
    pub fn new(store: &TupleStore) -> Self {
        let cardinality = store.len();
        let dimensionality = store.dimensionality();
        Self {
            orderings: Matrix::new(dimensionality, cardinality),
            offsets: Matrix::new(cardinality, dimensionality + 2),
            confirmed: vec![Vec::new(); dimensionality],
            stopped: vec![false; dimensionality],
            cardinality,
            dimensionality,
        }
    }

    /// Sort every dimension and fill the offset matrix.
    ///
    /// Reads each tuple once through [`TupleStore::row`].
    pub fn build(&mut self, store: &TupleStore, stats: &mut Statistics) {
        debug_assert_eq!(store.len(), self.cardinality);
        for key in 0..self.cardinality {
            let row = store.row(key, stats);
            for (d, &value) in row.iter().enumerate() {
                self.orderings[(d, key)] = Entry::new(key, value);
            }
        }

        let dimensionality = self.dimensionality;
        for d in 0..dimensionality {
            entry::sort_entries(self.orderings.row_mut(d));
            for rank in 0..self.cardinality {
                let key = self.orderings[(d, rank)].key;
                let offsets = self.offsets.row_mut(key);
                offsets[d] = rank;
                offsets[dimensionality] = offsets[dimensionality].max(rank);
                offsets[dimensionality + 1] += rank;
            }
        }
        debug!(
            cardinality = self.cardinality,
            dimensionality, "dimension index built"
        );
    }

    /// Number of indexed tuples.
    pub fn cardinality(&self) -> usize {
        self.cardinality
    }

    pub fn dimensionality(&self) -> usize {
        self.dimensionality
    }

    /// Dimension `d` in index order.
    pub fn entries(&self, d: usize) -> &[Entry] {
        self.orderings.row(d)
    }

    /// Entry at `rank` in dimension `d`.
    #[inline]
    pub fn entry(&self, d: usize, rank: usize) -> Entry {
        self.orderings[(d, rank)]
    }

    /// Offset row of a tuple. Valid after [`build`](Self::build).
    pub fn offsets(&self, key: Key) -> Offsets<'_> {
        Offsets {
            row: self.offsets.row(key),
            dimensionality: self.dimensionality,
        }
    }

    /// Non-stopped dimension with the fewest confirmed skyline points.
    ///
    /// Ties go to the lowest-numbered dimension. Returns `None` once every
    /// dimension is stopped.
    pub fn best(&self) -> Option<usize> {
        (0..self.dimensionality)
            .filter(|&d| !self.stopped[d])
            .min_by_key(|&d| self.confirmed[d].len())
    }

    /// Pick the next dimension to scan according to `selection`.
    pub fn select(&self, selection: DimensionSelection) -> Option<usize> {
        match selection {
            DimensionSelection::FewestSkyline => self.best(),
            DimensionSelection::Sequential => self.stopped.iter().position(|&s| !s),
            DimensionSelection::Reverse => self.stopped.iter().rposition(|&s| !s),
        }
    }

    /// Check whether any tuple confirmed in dimension `d` dominates `key`.
    ///
    /// Stops at the first dominator.
    pub fn dominate(
        &self,
        d: usize,
        key: Key,
        store: &TupleStore,
        stats: &mut Statistics,
    ) -> bool {
        self.confirmed[d]
            .iter()
            .any(|&confirmed| store.dominates(confirmed, key, stats))
    }

    /// Record `key` as confirmed skyline for dimension `d`.
    ///
    /// The row is pinned for later dominance checks, which counts as one I/O.
    pub fn skyline(&mut self, d: usize, key: Key, stats: &mut Statistics) {
        stats.increment(Counters::Io);
        self.confirmed[d].push(key);
    }

    /// Keys confirmed while scanning dimension `d`, in confirmation order.
    pub fn confirmed(&self, d: usize) -> &[Key] {
        &self.confirmed[d]
    }

    /// Number of skyline points confirmed in dimension `d`.
    pub fn skyline_count(&self, d: usize) -> usize {
        self.confirmed[d].len()
    }

    /// Clear every stop flag.
    pub fn clear_stops(&mut self) {
        self.stopped.iter_mut().for_each(|s| *s = false);
    }

    /// Stop dimension `d` and return how many dimensions are now stopped.
    pub fn stop(&mut self, d: usize) -> usize {
        self.stopped[d] = true;
        self.stopped.iter().filter(|&&s| s).count()
    }

    pub fn is_stopped(&self, d: usize) -> bool {
        self.stopped[d]
    }

    /// Write the orderings, one rank per line, `key:value` per dimension.
    pub fn dump<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for rank in 0..self.cardinality {
            for d in 0..self.dimensionality {
                if d > 0 {
                    write!(out, " ")?;
                }
                write!(out, "{}", self.entry(d, rank))?;
            }
            writeln!(out)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn built(text: &str, dimensionality: usize) -> (TupleStore, DimensionIndex, Statistics) {
        let mut store = TupleStore::new(64, dimensionality).unwrap();
        store.load(text.as_bytes()).unwrap();
        let mut stats = Statistics::new();
        let mut index = DimensionIndex::new(&store);
        index.build(&store, &mut stats);
        (store, index, stats)
    }

    #[test]
    fn test_build_orders_and_offsets() {
        let (_, index, stats) = built("1 5\n2 2\n5 1\n3 3\n2 2\n", 2);
        let keys: Vec<Key> = index.entries(0).iter().map(|e| e.key).collect();
        assert_eq!(keys, vec![0, 1, 4, 3, 2]);
        let keys: Vec<Key> = index.entries(1).iter().map(|e| e.key).collect();
        assert_eq!(keys, vec![2, 1, 4, 3, 0]);

        let o = index.offsets(0);
        assert_eq!(o.ranks(), &[0, 4]);
        assert_eq!(o.max_rank(), 4);
        assert_eq!(o.rank_sum(), 4);
        let o = index.offsets(4);
        assert_eq!((o.rank(0), o.rank(1), o.max_rank(), o.rank_sum()), (2, 2, 2, 4));

        assert_eq!(stats.get(Counters::Io), 5);
    }

    #[test]
    fn test_ranks_are_permutations() {
        let (_, index, _) = built("3 1 2\n1 1 1\n2 9 0\n0 0 5\n", 3);
        for d in 0..3 {
            let mut ranks: Vec<usize> = (0..4).map(|k| index.offsets(k).rank(d)).collect();
            ranks.sort();
            assert_eq!(ranks, vec![0, 1, 2, 3]);
        }
    }

    #[test]
    fn test_best_prefers_fewest_then_first() {
        let (_, mut index, mut stats) = built("1 2 3\n3 2 1\n", 3);
        assert_eq!(index.best(), Some(0));
        index.skyline(0, 0, &mut stats);
        assert_eq!(index.best(), Some(1));
        index.skyline(1, 1, &mut stats);
        assert_eq!(index.best(), Some(2));
        index.stop(2);
        assert_eq!(index.best(), Some(0));
    }

    #[test]
    fn test_select_variants() {
        let (_, mut index, _) = built("1 2 3\n", 3);
        index.stop(0);
        assert_eq!(index.select(DimensionSelection::Sequential), Some(1));
        assert_eq!(index.select(DimensionSelection::Reverse), Some(2));
        index.stop(2);
        assert_eq!(index.select(DimensionSelection::Reverse), Some(1));
    }

    #[test]
    fn test_stop_counts_and_clears() {
        let (_, mut index, _) = built("1 2\n", 2);
        assert_eq!(index.stop(1), 1);
        assert_eq!(index.stop(1), 1);
        assert_eq!(index.stop(0), 2);
        assert_eq!(index.best(), None);
        index.clear_stops();
        assert!(!index.is_stopped(0) && !index.is_stopped(1));
        assert_eq!(index.best(), Some(0));
    }

    #[test]
    fn test_dominate_checks_confirmed_list_only() {
        let (store, mut index, mut stats) = built("1 1\n2 2\n0 5\n", 2);
        assert!(!index.dominate(0, 1, &store, &mut stats));
        index.skyline(0, 0, &mut stats);
        assert!(index.dominate(0, 1, &store, &mut stats));
        assert!(!index.dominate(1, 1, &store, &mut stats));
        assert!(!index.dominate(0, 2, &store, &mut stats));
        assert_eq!(index.confirmed(0), &[0]);
        assert_eq!(index.skyline_count(1), 0);
    }

    #[test]
    fn test_dump() {
        let (_, index, _) = built("2 1\n1 2\n", 2);
        let mut out = Vec::new();
        index.dump(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "1:1 0:1\n0:2 1:2\n");
    }
}
