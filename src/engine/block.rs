// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Tie-block commit.
//!
//! Tuples that share one value in the scanned dimension cannot be ordered by
//! that dimension alone, so the engine collects them in a [`TieBlock`] and
//! resolves them together:
//!
//! 1. Pairwise pruning inside the block (pairs of confirmed skyline points are
//!    not compared, they cannot dominate each other).
//! 2. Each surviving unconfirmed member is checked against the dimension's
//!    confirmed list; it is either skipped or confirmed.
//! 3. Surviving members that were already skyline are added to the
//!    dimension's confirmed list as well.
//! 4. Each newly confirmed point may replace the stop point.

use super::stop_line::StopLine;
use super::SkylineEngine;
use crate::statistics::{Counters, Statistics};
use crate::store::Key;
use tracing::debug;

#[derive(Debug, Clone, Copy)]
struct Member {
    key: Key,
    active: bool,
}

/// Pending tuples tied on the current pivot value.
#[derive(Debug, Default)]
pub struct TieBlock {
    members: Vec<Member>,
}

impl TieBlock {
    pub fn push(&mut self, key: Key) {
        self.members.push(Member { key, active: true });
    }

    pub fn clear(&mut self) {
        self.members.clear();
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    fn key(&self, i: usize) -> Key {
        self.members[i].key
    }

    fn is_active(&self, i: usize) -> bool {
        self.members[i].active
    }

    fn deactivate(&mut self, i: usize) {
        self.members[i].active = false;
    }

    /// Keys still taking part in this commit, in block order.
    pub fn active_keys(&self) -> impl Iterator<Item = Key> + '_ {
        self.members.iter().filter(|m| m.active).map(|m| m.key)
    }
}

impl SkylineEngine {
    /// Resolve `block` along dimension `d`. Returns the number of new skyline points.
    pub(super) fn commit(&mut self, block: &mut TieBlock, d: usize, stats: &mut Statistics) -> usize {
        self.prune_block(block, stats);

        let mut discovered = 0;
        for key in block.active_keys() {
            if self.store.is_skyline(key) {
                self.index.skyline(d, key, stats);
                continue;
            }
            if self.index.dominate(d, key, &self.store, stats) {
                self.store.set_skipped(key, true);
                continue;
            }
            self.store.set_skyline(key, true);
            self.index.skyline(d, key, stats);
            self.skyline.push(key);
            stats.increment(Counters::Skyline);
            discovered += 1;
            self.update_stop_line(key, stats);
        }
        discovered
    }

    fn prune_block(&mut self, block: &mut TieBlock, stats: &mut Statistics) {
        let n = block.len();
        for i in 0..n.saturating_sub(1) {
            if !block.is_active(i) {
                continue;
            }
            let ik = block.key(i);
            if self.store.is_skipped(ik) {
                block.deactivate(i);
                continue;
            }
            let i_sky = self.store.is_skyline(ik);

            for j in (i + 1)..n {
                if !block.is_active(j) {
                    continue;
                }
                let jk = block.key(j);
                if self.store.is_skipped(jk) {
                    block.deactivate(j);
                    continue;
                }
                let j_sky = self.store.is_skyline(jk);
                if i_sky && j_sky {
                    continue;
                }
                if !j_sky && self.store.dominates(ik, jk, stats) {
                    self.store.set_skipped(jk, true);
                    block.deactivate(j);
                } else if !i_sky && self.store.dominates(jk, ik, stats) {
                    self.store.set_skipped(ik, true);
                    block.deactivate(i);
                    break;
                }
            }
        }
    }

    /// Replace the stop point with `key` if it is preferred.
    fn update_stop_line(&mut self, key: Key, stats: &mut Statistics) {
        if !cfg!(stopline) {
            return;
        }
        let candidate = self.index.offsets(key);
        if let Some(current) = &self.stop_line {
            if !current.prefers(candidate) {
                return;
            }
        }
        let line = StopLine::new(key, candidate);
        debug!(
            point = key,
            max_rank = candidate.max_rank(),
            rank_sum = candidate.rank_sum(),
            "stop point changed"
        );
        self.index.clear_stops();
        self.stop_line = Some(line);
        stats.increment(Counters::StopLineChanges);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_membership() {
        let mut block = TieBlock::default();
        assert!(block.is_empty());
        block.push(4);
        block.push(2);
        block.push(9);
        block.deactivate(1);
        assert_eq!(block.len(), 3);
        assert_eq!(block.active_keys().collect::<Vec<_>>(), vec![4, 9]);
        block.clear();
        assert!(block.is_empty());
    }
}
