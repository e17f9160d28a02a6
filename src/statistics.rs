// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Statistics
//!
//! Benchmark counters are kept in an explicit `Statistics` object that the caller
//! owns and passes by reference into the store, the index and the engine.
//! Counters only ever increase during a run; [`Statistics::reset`] starts a new one.

use std::fmt;
use strum::{EnumCount, IntoEnumIterator};
use strum_macros::{EnumCount as EnumCountMacro, EnumIter, IntoStaticStr};

#[derive(EnumCountMacro, EnumIter, IntoStaticStr, Debug, Copy, Clone, PartialEq, Eq)]
#[repr(u8)]
pub enum Counters {
    /// Dominance tests that passed the min/sum filter and scanned every coordinate.
    #[strum(serialize = "Dominance Test Count")]
    DominanceTests,
    /// Every call to the dominance predicate, filtered or not.
    #[strum(serialize = "Dominance Test Extended Count")]
    ExtendedDominanceTests,
    /// Confirmed skyline tuples.
    #[strum(serialize = "Skyline")]
    Skyline,
    /// Times the stop point was replaced.
    #[strum(serialize = "Stop Line Count")]
    StopLineChanges,
    /// Distinct tuples visited by a scan.
    #[strum(serialize = "Tested Tuple Count")]
    TestedTuples,
    /// Raw row accesses by key.
    #[strum(serialize = "IO Count")]
    Io,
}

impl Counters {
    /// Label used in benchmark reports.
    pub fn label(self) -> &'static str {
        self.into()
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Statistics {
    stats: [u64; Counters::COUNT],
}

impl Statistics {
    pub fn new() -> Self {
        Statistics::default()
    }

    /// Increment the specified counter by 1.
    #[inline]
    pub fn increment(&mut self, counter: Counters) {
        self.stats[counter as usize] += 1;
    }

    /// Get the current value of the specified counter.
    pub fn get(&self, counter: Counters) -> u64 {
        self.stats[counter as usize]
    }

    /// Zero every counter before an independent run.
    pub fn reset(&mut self) {
        self.stats = [0; Counters::COUNT];
    }

    /// All counters with their current values, in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (Counters, u64)> + '_ {
        Counters::iter().map(move |c| (c, self.get(c)))
    }
}

impl fmt::Display for Statistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (counter, value) in self.iter() {
            writeln!(f, "# {}: {}", counter.label(), value)?;
        }
        Ok(())
    }
}
