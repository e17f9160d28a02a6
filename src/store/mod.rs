// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! In-memory tuple store.
//!
//! The store owns every tuple's coordinates in one contiguous row-major buffer,
//! together with the per-tuple scalars used by the dominance pre-filter
//! (minimum coordinate and coordinate sum) and three bookkeeping flags
//! (tested, skyline, skipped).
//!
//! Tuples are addressed by [`Key`], their zero-based row number in load order.
//! Flag accessors perform no validation: callers keep them coherent
//! (skipped and skyline are never both set, and neither is ever cleared
//! within one run).
//!
//! # Examples
//!
//! ```
//! use sdi_skyline::store::TupleStore;
//! use sdi_skyline::statistics::Statistics;
//!
//! let mut store = TupleStore::new(3, 2).unwrap();
//! store.load("1 5\n2,2\n3 3\n".as_bytes()).unwrap();
//!
//! let mut stats = Statistics::new();
//! assert!(store.dominates(1, 2, &mut stats));
//! assert!(!store.dominates(0, 1, &mut stats));
//! ```

pub mod format;

use crate::config::CapacityPolicy;
use crate::error::{Result, SkylineError};
use crate::statistics::{Counters, Statistics};
use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;
use tracing::{debug, warn};

/// Row number of a tuple, `0..len()`.
pub type Key = usize;

/// Open a tuple file for loading.
pub fn open(path: &Path) -> Result<BufReader<File>> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|source| SkylineError::Open {
            path: path.to_path_buf(),
            source,
        })
}

/// Per-tuple bookkeeping flags as a small bitset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TupleFlags(u8);

impl TupleFlags {
    pub const TESTED: TupleFlags = TupleFlags(1 << 0);
    pub const SKYLINE: TupleFlags = TupleFlags(1 << 1);
    pub const SKIPPED: TupleFlags = TupleFlags(1 << 2);

    pub const fn empty() -> Self {
        Self(0)
    }

    pub fn contains(self, flag: TupleFlags) -> bool {
        self.0 & flag.0 == flag.0
    }

    pub fn set(&mut self, flag: TupleFlags, on: bool) {
        if on {
            self.0 |= flag.0;
        } else {
            self.0 &= !flag.0;
        }
    }
}

/// Scalars derived from a tuple's coordinates at load time.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Summary {
    min: f64,
    sum: f64,
}

/// Owns tuple coordinates, derived scalars and flags.
#[derive(Debug, Clone)]
pub struct TupleStore {
    values: Vec<f64>,
    summaries: Vec<Summary>,
    flags: Vec<TupleFlags>,
    cardinality: usize,
    dimensionality: usize,
    policy: CapacityPolicy,
}

impl TupleStore {
    /// Create an empty store for up to `cardinality` tuples of `dimensionality`
    /// coordinates each, enforcing the capacity strictly.
    pub fn new(cardinality: usize, dimensionality: usize) -> Result<Self> {
        Self::with_policy(cardinality, dimensionality, CapacityPolicy::Strict)
    }

    /// Create an empty store with an explicit capacity policy.
    pub fn with_policy(
        cardinality: usize,
        dimensionality: usize,
        policy: CapacityPolicy,
    ) -> Result<Self> {
        if dimensionality == 0 {
            return Err(SkylineError::InvalidDimensionality(dimensionality));
        }
        Ok(Self {
            values: Vec::with_capacity(cardinality.saturating_mul(dimensionality)),
            summaries: Vec::with_capacity(cardinality),
            flags: Vec::with_capacity(cardinality),
            cardinality,
            dimensionality,
            policy,
        })
    }

    /// Read tuples from `reader`, one per non-empty line.
    ///
    /// Bytes that are not valid UTF-8 never fail the load; the fields they
    /// fall in read as zero like any other malformed field.
    ///
    /// Returns the number of tuples appended.
    pub fn load<R: BufRead>(&mut self, mut reader: R) -> Result<usize> {
        let before = self.len();
        let mut coordinates = Vec::with_capacity(self.dimensionality);
        let mut buf = Vec::new();
        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            let line = String::from_utf8_lossy(&buf);
            if format::parse_line_into(&line, self.dimensionality, &mut coordinates) {
                self.push(&coordinates)?;
            }
        }
        let loaded = self.len() - before;
        if self.len() < self.cardinality {
            warn!(
                declared = self.cardinality,
                loaded = self.len(),
                "input holds fewer tuples than the declared cardinality"
            );
        }
        debug!(loaded, dimensionality = self.dimensionality, "tuples loaded");
        Ok(loaded)
    }

    /// Append one tuple. Missing coordinates are zero, surplus ones ignored.
    pub fn push(&mut self, coordinates: &[f64]) -> Result<Key> {
        let key = self.len();
        if key >= self.cardinality {
            match self.policy {
                CapacityPolicy::Strict => {
                    return Err(SkylineError::CapacityExceeded {
                        capacity: self.cardinality,
                        attempted: key,
                    });
                }
                CapacityPolicy::Grow => {
                    if key == self.cardinality {
                        warn!(
                            declared = self.cardinality,
                            "input exceeds the declared cardinality; growing storage"
                        );
                    }
                }
            }
        }

        let taken = coordinates.len().min(self.dimensionality);
        self.values.extend_from_slice(&coordinates[..taken]);
        self.values
            .resize(self.values.len() + self.dimensionality - taken, 0.0);

        let row = &self.values[key * self.dimensionality..];
        let summary = Summary {
            min: row.iter().copied().fold(f64::INFINITY, f64::min),
            sum: row.iter().sum(),
        };
        self.summaries.push(summary);
        self.flags.push(TupleFlags::empty());
        Ok(key)
    }

    /// Number of tuples loaded.
    pub fn len(&self) -> usize {
        self.flags.len()
    }

    /// Check if no tuple has been loaded.
    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    /// Declared cardinality.
    pub fn cardinality(&self) -> usize {
        self.cardinality
    }

    /// Coordinates per tuple.
    pub fn dimensionality(&self) -> usize {
        self.dimensionality
    }

    /// Fetch a tuple's coordinates, counting one I/O.
    pub fn row(&self, key: Key, stats: &mut Statistics) -> &[f64] {
        stats.increment(Counters::Io);
        self.coordinates(key)
    }

    #[inline]
    fn coordinates(&self, key: Key) -> &[f64] {
        let start = key * self.dimensionality;
        &self.values[start..start + self.dimensionality]
    }

    /// Smallest coordinate of a tuple.
    pub fn min(&self, key: Key) -> f64 {
        self.summaries[key].min
    }

    /// Sum of a tuple's coordinates.
    pub fn sum(&self, key: Key) -> f64 {
        self.summaries[key].sum
    }

    /// Check whether tuple `p` dominates tuple `q` (minimization).
    ///
    /// `p` dominates `q` when every coordinate of `p` is at most the matching
    /// coordinate of `q` and at least one is strictly smaller. Coordinate-equal
    /// tuples are ordered by key: the lower key dominates, so exactly one copy of
    /// a duplicated tuple can reach the skyline. A tuple never dominates itself.
    ///
    /// Every call counts an extended test; calls that get past the min/sum
    /// filter and compare coordinates also count a full test.
    pub fn dominates(&self, p: Key, q: Key, stats: &mut Statistics) -> bool {
        stats.increment(Counters::ExtendedDominanceTests);
        let (sp, sq) = (self.summaries[p], self.summaries[q]);
        if sp.min > sq.min || sp.sum > sq.sum {
            return false;
        }

        stats.increment(Counters::DominanceTests);
        let mut strictly = false;
        for (a, b) in self.coordinates(p).iter().zip(self.coordinates(q)) {
            if a > b {
                return false;
            }
            if a < b {
                strictly = true;
            }
        }
        strictly || p < q
    }

    pub fn flags(&self, key: Key) -> TupleFlags {
        self.flags[key]
    }

    pub fn is_tested(&self, key: Key) -> bool {
        self.flags[key].contains(TupleFlags::TESTED)
    }

    pub fn set_tested(&mut self, key: Key, on: bool) {
        self.flags[key].set(TupleFlags::TESTED, on);
    }

    pub fn is_skyline(&self, key: Key) -> bool {
        self.flags[key].contains(TupleFlags::SKYLINE)
    }

    pub fn set_skyline(&mut self, key: Key, on: bool) {
        self.flags[key].set(TupleFlags::SKYLINE, on);
    }

    pub fn is_skipped(&self, key: Key) -> bool {
        self.flags[key].contains(TupleFlags::SKIPPED)
    }

    pub fn set_skipped(&mut self, key: Key, on: bool) {
        self.flags[key].set(TupleFlags::SKIPPED, on);
    }

    /// Write every tuple's coordinates, one per line, flags excluded.
    pub fn dump<W: Write>(&self, out: &mut W) -> io::Result<()> {
        write!(out, "{}", self)
    }
}

impl fmt::Display for TupleStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for key in 0..self.len() {
            let mut first = true;
            for &value in self.coordinates(key) {
                if !first {
                    write!(f, " ")?;
                }
                write!(f, "{}", format::format_significant(value, format::DUMP_PRECISION))?;
                first = false;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
