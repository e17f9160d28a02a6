// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Sorted-index entries.
//!
//! An [`Entry`] pairs a tuple key with its value in one dimension. Entries
//! order by value ascending, then by key ascending, which makes every
//! per-dimension ordering deterministic.
//!
//! Values are compared with [`f64::total_cmp`] after folding `-0.0` into
//! `0.0`, so the ordering is total even for NaN and agrees with
//! [`Entry::same_value`], the equality the engine uses to build tie-blocks.

use crate::store::Key;
use std::cmp::Ordering;
use std::fmt;

/// A (key, value) pair in one dimension's ordering.
#[derive(Debug, Clone, Copy, Default)]
pub struct Entry {
    pub key: Key,
    pub value: f64,
}

impl Entry {
    pub fn new(key: Key, value: f64) -> Self {
        Self { key, value }
    }

    /// Check whether this entry's value ties with `value` in the index ordering.
    #[inline]
    pub fn same_value(&self, value: f64) -> bool {
        compare_values(self.value, value) == Ordering::Equal
    }
}

#[inline]
fn canonical(value: f64) -> f64 {
    if value == 0.0 {
        0.0
    } else {
        value
    }
}

#[inline]
fn compare_values(a: f64, b: f64) -> Ordering {
    canonical(a).total_cmp(&canonical(b))
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_values(self.value, other.value).then(self.key.cmp(&other.key))
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.key, self.value)
    }
}

/// Sort one dimension's entries into index order (stable, O(n log n)).
pub fn sort_entries(entries: &mut [Entry]) {
    entries.sort();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_then_key() {
        let mut entries = vec![
            Entry::new(0, 3.0),
            Entry::new(3, 1.0),
            Entry::new(1, 1.0),
            Entry::new(2, -4.0),
        ];
        sort_entries(&mut entries);
        let keys: Vec<Key> = entries.iter().map(|e| e.key).collect();
        assert_eq!(keys, vec![2, 1, 3, 0]);
    }

    #[test]
    fn test_signed_zeros_tie() {
        let a = Entry::new(5, -0.0);
        let b = Entry::new(1, 0.0);
        assert!(a.same_value(0.0));
        assert!(b < a);
    }

    #[test]
    fn test_nan_sorts_last_and_ties_itself() {
        let mut entries = vec![Entry::new(0, f64::NAN), Entry::new(1, f64::INFINITY)];
        sort_entries(&mut entries);
        assert_eq!(entries[0].key, 1);
        assert!(entries[1].same_value(entries[1].value));
    }

    #[test]
    fn test_display() {
        assert_eq!(Entry::new(7, 2.5).to_string(), "7:2.5");
    }
}
