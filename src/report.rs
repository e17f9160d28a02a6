// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Benchmark report printed after a run.

use crate::statistics::{Counters, Statistics};
use std::fmt;
use std::time::Duration;

/// Name under which this method is reported.
pub const METHOD: &str = "SDI";

/// Everything printed for one run.
#[derive(Debug, Clone)]
pub struct Report {
    pub method: &'static str,
    pub cardinality: usize,
    pub dimensionality: usize,
    pub statistics: Statistics,
    pub build: Duration,
    pub query: Duration,
}

fn millis(duration: Duration) -> f64 {
    duration.as_nanos() as f64 / 1_000_000.0
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stats = &self.statistics;
        let (bt, qt) = (millis(self.build), millis(self.query));
        let tt = bt + qt;
        writeln!(f, "# Method: {}", self.method)?;
        writeln!(f, "# Size: {}", self.cardinality)?;
        writeln!(f, "# Dimensions: {}", self.dimensionality)?;
        writeln!(f, "# Skyline: {}", stats.get(Counters::Skyline))?;
        for counter in [
            Counters::DominanceTests,
            Counters::ExtendedDominanceTests,
            Counters::StopLineChanges,
            Counters::TestedTuples,
            Counters::Io,
        ] {
            writeln!(f, "# {}: {}", counter.label(), stats.get(counter))?;
        }
        writeln!(f, "# Build Time: {} ms", bt)?;
        writeln!(f, "# Query Time: {} ms", qt)?;
        writeln!(f, "# Total Time: {} ms", tt)?;
        writeln!(
            f,
            "#= {} | {} | {} | {} | {} | {} | {} | {} | {}",
            self.method,
            self.cardinality,
            self.dimensionality,
            stats.get(Counters::Skyline),
            stats.get(Counters::DominanceTests),
            stats.get(Counters::Io),
            bt,
            qt,
            tt
        )
    }
}
