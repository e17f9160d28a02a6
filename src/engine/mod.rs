// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Dimension-switching skyline engine.
//!
//! The engine owns a [`TupleStore`] and the [`DimensionIndex`] built over it,
//! and runs the skyline discovery loop once.
//!
//! # Algorithm
//!
//! Every dimension keeps a cursor into its sorted ordering and a pivot value.
//! Each outer iteration picks a dimension (by default the one with the fewest
//! confirmed skyline points) and scans it from its cursor:
//!
//! 1. Skipped tuples are passed over.
//! 2. Tuples equal to the pivot are collected in a tie-block.
//! 3. The first tuple with a new value commits the block, becomes the new
//!    pivot and is offered again next time (the cursor rolls back by one).
//! 4. A commit that confirms at least one new skyline point ends the scan, so
//!    the next iteration can switch dimension.
//! 5. When the rolled-back cursor is past the stop line in this dimension, the
//!    dimension is stopped.
//!
//! The run halts when some dimension is exhausted (final pass) or when every
//! dimension is stopped.
//!
//! # Example
//!
//! ```
//! use sdi_skyline::{SkylineConfig, SkylineEngine, Statistics};
//!
//! let mut stats = Statistics::new();
//! let mut engine = SkylineEngine::new(&SkylineConfig::new(5, 2)).unwrap();
//! engine.build("1 5\n2 2\n5 1\n3 3\n2 2\n".as_bytes(), &mut stats).unwrap();
//!
//! let mut skyline = engine.query(&mut stats).unwrap().to_vec();
//! skyline.sort();
//! assert_eq!(skyline, vec![0, 1, 2]);
//! ```

pub mod block;
pub mod stop_line;

pub use block::TieBlock;
pub use stop_line::StopLine;

use crate::config::{DimensionSelection, SkylineConfig};
use crate::error::{Result, SkylineError};
use crate::index::DimensionIndex;
use crate::statistics::{Counters, Statistics};
use crate::store::{Key, TupleStore};
use std::io::BufRead;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Empty,
    Built,
    Queried,
}

/// Runs one skyline query over one store.
#[derive(Debug)]
pub struct SkylineEngine {
    store: TupleStore,
    index: DimensionIndex,
    selection: DimensionSelection,
    /// Scan position per dimension.
    cursors: Vec<usize>,
    stop_line: Option<StopLine>,
    /// Confirmed skyline keys in discovery order.
    skyline: Vec<Key>,
    phase: Phase,
}

impl SkylineEngine {
    /// Create an engine with an empty store sized from `config`.
    pub fn new(config: &SkylineConfig) -> Result<Self> {
        config.validate()?;
        let store =
            TupleStore::with_policy(config.cardinality, config.dimensionality, config.capacity)?;
        Ok(Self::unbuilt(store, config.selection))
    }

    /// Create an engine over an already loaded store and build its index.
    pub fn from_store(
        store: TupleStore,
        selection: DimensionSelection,
        stats: &mut Statistics,
    ) -> Self {
        let mut engine = Self::unbuilt(store, selection);
        engine.index_store(stats);
        engine
    }

    fn unbuilt(store: TupleStore, selection: DimensionSelection) -> Self {
        Self {
            cursors: vec![0; store.dimensionality()],
            store,
            index: DimensionIndex::default(),
            selection,
            stop_line: None,
            skyline: Vec::new(),
            phase: Phase::Empty,
        }
    }

    /// Load tuples from `reader` and build the dimension index.
    pub fn build<R: BufRead>(&mut self, reader: R, stats: &mut Statistics) -> Result<()> {
        if self.phase != Phase::Empty {
            return Err(SkylineError::AlreadyBuilt);
        }
        self.store.load(reader)?;
        self.index_store(stats);
        Ok(())
    }

    fn index_store(&mut self, stats: &mut Statistics) {
        self.index = DimensionIndex::new(&self.store);
        self.index.build(&self.store, stats);
        self.phase = Phase::Built;
    }

    /// Compute the skyline. Returns the confirmed keys in discovery order.
    ///
    /// May be called once per engine, after [`build`](Self::build).
    pub fn query(&mut self, stats: &mut Statistics) -> Result<&[Key]> {
        match self.phase {
            Phase::Empty => return Err(SkylineError::NotBuilt),
            Phase::Queried => return Err(SkylineError::AlreadyQueried),
            Phase::Built => self.phase = Phase::Queried,
        }

        let cardinality = self.index.cardinality();
        let dimensionality = self.index.dimensionality();
        if cardinality == 0 {
            info!("empty input, empty skyline");
            return Ok(&self.skyline);
        }

        let mut pivots: Vec<f64> = (0..dimensionality)
            .map(|d| self.index.entry(d, 0).value)
            .collect();
        let mut block = TieBlock::default();
        let mut final_pass = false;

        loop {
            if self
                .stop_line
                .as_ref()
                .is_some_and(|line| line.stopped() >= dimensionality)
            {
                break;
            }
            let Some(d) = self.index.select(self.selection) else {
                break;
            };

            while self.cursors[d] < cardinality {
                let rank = self.cursors[d];
                self.cursors[d] += 1;
                final_pass = self.cursors[d] == cardinality;
                let entry = self.index.entry(d, rank);
                let key = entry.key;

                if self.store.is_skipped(key) {
                    if final_pass {
                        self.commit(&mut block, d, stats);
                    }
                    continue;
                }

                if !self.store.is_tested(key) {
                    self.store.set_tested(key, true);
                    stats.increment(Counters::TestedTuples);
                }

                if final_pass {
                    block.push(key);
                    self.commit(&mut block, d, stats);
                    break;
                }

                let mut discovered = 0;
                if entry.same_value(pivots[d]) {
                    block.push(key);
                } else {
                    discovered = self.commit(&mut block, d, stats);
                    block.clear();
                    pivots[d] = entry.value;
                    self.cursors[d] -= 1;
                    if cfg!(stopline) && self.passed_stop_line(d) {
                        let stopped = self.index.stop(d);
                        if let Some(line) = self.stop_line.as_mut() {
                            line.set_stopped(stopped);
                        }
                        debug!(dimension = d, stopped, "dimension passed the stop line");
                        break;
                    }
                }

                if discovered > 0 {
                    break;
                }
            }

            if final_pass {
                break;
            }
        }

        info!(
            skyline = self.skyline.len(),
            dominance_tests = stats.get(Counters::DominanceTests),
            tested = stats.get(Counters::TestedTuples),
            final_pass,
            "skyline query complete"
        );
        Ok(&self.skyline)
    }

    fn passed_stop_line(&self, d: usize) -> bool {
        self.stop_line
            .as_ref()
            .is_some_and(|line| self.cursors[d] > line.rank(d))
    }

    pub fn store(&self) -> &TupleStore {
        &self.store
    }

    pub fn index(&self) -> &DimensionIndex {
        &self.index
    }

    /// Confirmed skyline keys in discovery order.
    pub fn skyline(&self) -> &[Key] {
        &self.skyline
    }

    /// Current stop point, if any skyline point has been confirmed.
    pub fn stop_point(&self) -> Option<Key> {
        self.stop_line.as_ref().map(StopLine::point)
    }

    /// Scan position of dimension `d`: ranks below it have been offered.
    pub fn cursor(&self, d: usize) -> usize {
        self.cursors[d]
    }
}
