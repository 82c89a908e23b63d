//! # Error Types
//!
//! Errors raised while fitting curves or solving their linear systems.

use thiserror::Error;

/// Errors that can occur in curve fitting.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CurveError {
    /// A spline needs at least two knots.
    #[error("Spline needs at least {min} points, got {count}")]
    TooFewPoints {
        /// Number of points supplied
        count: usize,
        /// Minimum accepted
        min: usize,
    },

    /// Two successive knots coincide or a knot is not finite.
    #[error("Chord {index} has no usable length")]
    ZeroLengthChord {
        /// Index of the chord's first knot
        index: usize,
    },

    /// End-point curl outside `[0, 1]`.
    #[error("Curl must lie in [0, 1], got {0}")]
    InvalidOmega(f64),

    /// Diagonals and right-hand side of a system differ in length.
    #[error("System expects {expected} coefficients per diagonal, got {found}")]
    LengthMismatch {
        /// Length of the main diagonal
        expected: usize,
        /// Offending length
        found: usize,
    },

    /// Elimination hit a zero pivot.
    #[error("Zero pivot in row {row}")]
    ZeroPivot {
        /// Row being eliminated
        row: usize,
    },
}

/// Result type for curve operations
pub type CurveResult<T> = Result<T, CurveError>;
