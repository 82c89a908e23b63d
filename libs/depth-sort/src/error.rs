//! # Error Types
//!
//! Errors raised by the depth sorter and its background worker.
//!
//! Empty and single-point sorts are not errors; they finish without running
//! any radix pass.

use thiserror::Error;

/// Errors that can occur while sorting.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SortError {
    /// A sorter was created without room for any point.
    #[error("Sorter capacity must be at least 1")]
    ZeroCapacity,

    /// More points were submitted than the sorter was sized for.
    #[error("Cannot sort {count} points with capacity {capacity}")]
    CapacityExceeded {
        /// Points submitted
        count: usize,
        /// Points the sorter holds buffers for
        capacity: usize,
    },

    /// A sort request named more points than the point buffer holds.
    #[error("Requested {count} points but only {available} are loaded")]
    PointCountExceeded {
        /// Points requested
        count: usize,
        /// Points in the buffer
        available: usize,
    },

    /// The background worker was shut down.
    #[error("Sort worker has stopped")]
    WorkerStopped,

    /// The background worker needs a tokio runtime to start.
    #[error("No tokio runtime available to run the sort worker")]
    NoRuntime,
}

/// Result type for sort operations
pub type SortResult<T> = Result<T, SortError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = SortError::CapacityExceeded {
            count: 10,
            capacity: 4,
        };
        assert_eq!(err.to_string(), "Cannot sort 10 points with capacity 4");
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SortError>();
    }
}
