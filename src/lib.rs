// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Sort-based, dimension-switching skyline computation.
//!
//! The skyline of a tuple collection is its Pareto-minimal frontier: the tuples
//! that no other tuple matches or beats in every coordinate. This crate computes
//! it with a dimension-switching scan over per-dimension sorted indexes and
//! halts early with a stop line, counting dominance tests, tested tuples and
//! row accesses for benchmarking.
//!
//! # Architecture
//!
//! Components are layered bottom-up:
//!
//! - [`matrix::Matrix`]: fixed-size, zero-initialized 2D storage.
//! - [`store::TupleStore`]: coordinates, derived min/sum, per-tuple flags and
//!   the dominance predicate.
//! - [`index::DimensionIndex`]: value-ascending ordering of every dimension,
//!   per-tuple rank/offset rows, confirmed skyline lists and stop flags.
//! - [`engine::SkylineEngine`]: the discovery loop with tie-block commits and
//!   stop-line termination.
//!
//! Control flows from engine to index to store. Counters live in an explicit
//! [`Statistics`] object owned by the caller.
//!
//! # Stop line
//!
//! Stop-line pruning is on by default. Building with the `without_stopline`
//! feature disables it; the scan then runs until one dimension is exhausted.

pub mod config;
pub mod engine;
pub mod error;
pub mod index;
pub mod matrix;
pub mod report;
pub mod statistics;
pub mod store;

// Re-export commonly used types
pub use config::{CapacityPolicy, DimensionSelection, SkylineConfig};
pub use engine::SkylineEngine;
pub use error::{Result, SkylineError};
pub use statistics::{Counters, Statistics};
pub use store::{Key, TupleStore};
