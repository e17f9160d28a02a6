// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Common test utilities shared across integration tests.

#![allow(dead_code)]

use sdi_skyline::{DimensionSelection, Key, SkylineEngine, Statistics, TupleStore};

/// Load `rows` into a store sized exactly for them.
pub fn store_of(rows: &[Vec<f64>]) -> TupleStore {
    let dimensionality = rows.first().map_or(1, Vec::len);
    let mut store = TupleStore::new(rows.len(), dimensionality).unwrap();
    for row in rows {
        store.push(row).unwrap();
    }
    store
}

/// Run a full query over `rows` and return the engine with its statistics.
pub fn run_engine(rows: &[Vec<f64>], selection: DimensionSelection) -> (SkylineEngine, Statistics) {
    let mut stats = Statistics::new();
    let mut engine = SkylineEngine::from_store(store_of(rows), selection, &mut stats);
    engine.query(&mut stats).unwrap();
    (engine, stats)
}

/// Skyline keys, sorted, for `rows` under `selection`.
pub fn skyline_keys(rows: &[Vec<f64>], selection: DimensionSelection) -> Vec<Key> {
    let (engine, _) = run_engine(rows, selection);
    let mut keys = engine.skyline().to_vec();
    keys.sort();
    keys
}

/// Reference dominance: Pareto dominance, with coordinate-equal tuples
/// ordered by key.
pub fn dominates(rows: &[Vec<f64>], p: Key, q: Key) -> bool {
    let (a, b) = (&rows[p], &rows[q]);
    if a.iter().zip(b).any(|(x, y)| x > y) {
        return false;
    }
    a.iter().zip(b).any(|(x, y)| x < y) || p < q
}

/// Quadratic reference skyline, sorted by key.
pub fn brute_force_skyline(rows: &[Vec<f64>]) -> Vec<Key> {
    (0..rows.len())
        .filter(|&q| !(0..rows.len()).any(|p| dominates(rows, p, q)))
        .collect()
}

/// Parse whitespace-separated rows, one per line.
pub fn rows(text: &str) -> Vec<Vec<f64>> {
    text.lines()
        .filter(|l| !l.trim().is_empty())
        .map(|l| l.split_whitespace().map(|f| f.parse().unwrap()).collect())
        .collect()
}
