//! Dense element-local matrices
//!
//! This module provides the dense matrix kernel used to build and solve
//! small per-element systems:
//! - [`DenseMatrix`]: row-major contiguous storage with elementwise algebra,
//!   norms, in-place products and boundary-condition condensation
//! - LU decomposition with optional partial pivoting ([`DenseMatrix::lu_solve`],
//!   [`DenseMatrix::det`])
//! - Cholesky decomposition for SPD matrices, including real-matrix /
//!   complex-rhs solves ([`DenseMatrix::cholesky_solve`])

mod cholesky;
mod lu;
mod matrix;

pub use matrix::{Decomposition, DenseMatrix};
