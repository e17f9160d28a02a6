// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Run configuration.
//!
//! Cardinality and dimensionality are supplied before construction and fixed
//! for the lifetime of the engine. The remaining knobs choose how strictly the
//! declared cardinality is enforced and which scan order the engine follows.

use crate::error::{Result, SkylineError};

/// What to do when the input holds more rows than the declared cardinality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CapacityPolicy {
    /// Fail with [`SkylineError::CapacityExceeded`].
    #[default]
    Strict,
    /// Grow storage and keep loading.
    Grow,
}

/// Rule for picking the dimension scanned by each outer iteration.
///
/// Every rule yields the same skyline; they differ only in scan order and
/// therefore in the benchmark counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DimensionSelection {
    /// Non-stopped dimension with the fewest confirmed skyline points, first on ties.
    #[default]
    FewestSkyline,
    /// Lowest-numbered non-stopped dimension.
    Sequential,
    /// Highest-numbered non-stopped dimension.
    Reverse,
}

/// Parameters for one skyline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkylineConfig {
    pub cardinality: usize,
    pub dimensionality: usize,
    pub capacity: CapacityPolicy,
    pub selection: DimensionSelection,
}

impl SkylineConfig {
    pub fn new(cardinality: usize, dimensionality: usize) -> Self {
        Self {
            cardinality,
            dimensionality,
            capacity: CapacityPolicy::default(),
            selection: DimensionSelection::default(),
        }
    }

    pub fn with_capacity_policy(mut self, capacity: CapacityPolicy) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_selection(mut self, selection: DimensionSelection) -> Self {
        self.selection = selection;
        self
    }

    /// Reject configurations no store can be built from.
    pub fn validate(&self) -> Result<()> {
        if self.dimensionality == 0 {
            return Err(SkylineError::InvalidDimensionality(self.dimensionality));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SkylineConfig::new(10, 3);
        assert_eq!(config.capacity, CapacityPolicy::Strict);
        assert_eq!(config.selection, DimensionSelection::FewestSkyline);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        let err = SkylineConfig::new(10, 0).validate().unwrap_err();
        assert!(matches!(err, SkylineError::InvalidDimensionality(0)));
    }

    #[test]
    fn test_builder_methods() {
        let config = SkylineConfig::new(1, 1)
            .with_capacity_policy(CapacityPolicy::Grow)
            .with_selection(DimensionSelection::Reverse);
        assert_eq!(config.capacity, CapacityPolicy::Grow);
        assert_eq!(config.selection, DimensionSelection::Reverse);
    }
}
