// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Error types for building and querying a skyline.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// A convenience `Result` type for skyline operations.
pub type Result<T> = std::result::Result<T, SkylineError>;

/// Errors raised at the boundaries of the store and the engine.
///
/// Malformed numeric fields are deliberately absent: they load as zero.
#[derive(Debug, Error)]
pub enum SkylineError {
    /// Tuples need at least one coordinate.
    #[error("Invalid dimensionality: {0} (must be at least 1)")]
    InvalidDimensionality(usize),

    /// The input holds more rows than the declared cardinality.
    #[error("Capacity exceeded: declared cardinality {capacity}, attempted to store row {attempted}")]
    CapacityExceeded {
        /// Declared cardinality.
        capacity: usize,
        /// Zero-based row that did not fit.
        attempted: usize,
    },

    /// Query was invoked before the build phase.
    #[error("Index has not been built; call build() before query()")]
    NotBuilt,

    /// Build was invoked on an engine that already holds data.
    #[error("Engine has already been built")]
    AlreadyBuilt,

    /// Query was invoked a second time on the same engine.
    #[error("Skyline has already been queried; flags are not reusable across runs")]
    AlreadyQueried,

    /// Input file could not be opened.
    #[error("Cannot open {}: {source}", path.display())]
    Open {
        /// Path given by the caller.
        path: PathBuf,
        /// Underlying cause.
        source: io::Error,
    },

    /// Underlying I/O error while reading tuples.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_message_names_both_numbers() {
        let err = SkylineError::CapacityExceeded {
            capacity: 3,
            attempted: 3,
        };
        let msg = err.to_string();
        assert!(msg.contains("cardinality 3"));
        assert!(msg.contains("row 3"));
    }

    #[test]
    fn test_io_error_converts() {
        let err: SkylineError = io::Error::new(io::ErrorKind::UnexpectedEof, "eof").into();
        assert!(matches!(err, SkylineError::Io(_)));
    }
}
