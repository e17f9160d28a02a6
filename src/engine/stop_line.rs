// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Stop line.
//!
//! The stop point is the confirmed skyline tuple with the smallest worst-case
//! rank (ties broken by the smaller rank sum). Its ranks form the stop line:
//! once every dimension's cursor has moved past the stop point's rank in that
//! dimension, every tuple not yet seen is strictly worse than the stop point
//! in every dimension, so no further skyline tuple exists.

use crate::index::Offsets;
use crate::store::Key;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopLine {
    point: Key,
    ranks: Vec<usize>,
    max_rank: usize,
    rank_sum: usize,
    stopped: usize,
}

impl StopLine {
    /// Anchor a stop line at `point`, copying its offset row.
    pub fn new(point: Key, offsets: Offsets<'_>) -> Self {
        Self {
            point,
            ranks: offsets.ranks().to_vec(),
            max_rank: offsets.max_rank(),
            rank_sum: offsets.rank_sum(),
            stopped: 0,
        }
    }

    /// Key of the stop point.
    pub fn point(&self) -> Key {
        self.point
    }

    /// Stop-line rank in dimension `d`.
    #[inline]
    pub fn rank(&self, d: usize) -> usize {
        self.ranks[d]
    }

    /// Check whether a tuple with `candidate` offsets would make a better stop point.
    ///
    /// Smaller worst rank wins; on a tie the smaller rank sum wins. A full tie
    /// keeps the current stop point, so such ties never count as a
    /// `StopLineChanges` increment.
    pub fn prefers(&self, candidate: Offsets<'_>) -> bool {
        (candidate.max_rank(), candidate.rank_sum()) < (self.max_rank, self.rank_sum)
    }

    /// Dimensions whose cursor has passed this line.
    pub fn stopped(&self) -> usize {
        self.stopped
    }

    pub fn set_stopped(&mut self, stopped: usize) {
        self.stopped = stopped;
    }
}
