//! Error taxonomy for the dense element kernels
//!
//! All errors are synchronous and reported at the offending call; the kernel
//! never retries internally, since numerical failures (singularity,
//! indefiniteness) mean the input is unsuitable for the requested method.

use crate::dense::Decomposition;
use thiserror::Error;

/// Errors reported by the dense matrix kernels
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatrixError {
    /// Algebraic operation between matrices of incompatible shape
    #[error("matrix shape mismatch: expected {expected_rows}x{expected_cols}, got {found_rows}x{found_cols}")]
    ShapeMismatch {
        expected_rows: usize,
        expected_cols: usize,
        found_rows: usize,
        found_cols: usize,
    },

    /// Right-hand-side or solution vector of the wrong length
    #[error("vector length mismatch: expected {expected}, got {found}")]
    LengthMismatch { expected: usize, found: usize },

    /// Zero (or numerically zero) pivot during LU elimination.
    ///
    /// Callers may retry with partial pivoting enabled, or treat the system
    /// as structurally singular.
    #[error("matrix is singular: zero pivot in column {column}")]
    SingularMatrix { column: usize },

    /// Non-positive diagonal pivot during Cholesky factorization: the matrix
    /// is not symmetric positive definite. Callers must fall back to LU or
    /// reject the input.
    #[error("matrix is not positive definite: non-positive pivot at row {row}")]
    NotPositiveDefinite { row: usize },

    /// A solve or query was requested against factors of the wrong kind.
    ///
    /// Signals a caller programming error (e.g. `cholesky_solve` on a matrix
    /// still holding LU factors); always surfaced, never silently corrected.
    #[error("stale decomposition: matrix holds {held} factors but {requested} was requested")]
    DecompositionMismatch {
        held: Decomposition,
        requested: Decomposition,
    },

    /// Out-of-range element access through a checked accessor
    #[error("index ({row}, {col}) out of bounds for {rows}x{cols} matrix")]
    OutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = MatrixError::ShapeMismatch {
            expected_rows: 3,
            expected_cols: 3,
            found_rows: 2,
            found_cols: 3,
        };
        assert_eq!(
            err.to_string(),
            "matrix shape mismatch: expected 3x3, got 2x3"
        );

        let err = MatrixError::SingularMatrix { column: 1 };
        assert_eq!(err.to_string(), "matrix is singular: zero pivot in column 1");

        let err = MatrixError::DecompositionMismatch {
            held: Decomposition::Cholesky,
            requested: Decomposition::Lu,
        };
        assert_eq!(
            err.to_string(),
            "stale decomposition: matrix holds Cholesky factors but LU was requested"
        );
    }
}
