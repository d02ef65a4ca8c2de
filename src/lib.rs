//! Dense element-local linear algebra for finite element assembly
//!
//! This crate provides the small dense-matrix kernel a physics simulator
//! uses to build and solve per-element systems (element stiffness and mass
//! matrices) before they are summed into a global system.
//!
//! # Features
//!
//! - **Dense storage**: contiguous row-major buffer with raw views for bulk
//!   transfer into a global assembled system
//! - **LU path**: in-place decomposition with optional partial pivoting,
//!   forward/back substitution, determinant
//! - **Cholesky path**: `A = L·Lᵗ` for SPD matrices, including real
//!   coefficients with complex right-hand sides (AC excitations)
//! - **Condensation**: symmetry-preserving Dirichlet boundary-condition
//!   elimination
//! - **Generic scalars**: works with `f64`, `f32`, `Complex64`, `Complex32`
//!
//! # Example
//!
//! ```
//! use fem_dense::DenseMatrix;
//! use ndarray::{array, Array1};
//!
//! # fn main() -> Result<(), fem_dense::MatrixError> {
//! let mut k = DenseMatrix::from_values(2, 2, vec![4.0_f64, 3.0, 6.0, 3.0])?;
//! let b = array![1.0, 1.0];
//! let mut x = Array1::zeros(2);
//!
//! k.lu_solve(&b, &mut x, true)?;
//! assert!((x[1] - 1.0 / 3.0).abs() < 1e-12);
//! # Ok(())
//! # }
//! ```
//!
//! The kernel is purely computational and single-threaded; parallel
//! assembly loops hold one matrix instance per worker.

pub mod dense;
pub mod error;
pub mod traits;

// Re-export main types
pub use dense::{Decomposition, DenseMatrix};
pub use error::MatrixError;
pub use traits::{ComplexField, PromoteInto};
