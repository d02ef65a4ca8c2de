//! LU decomposition and solve
//!
//! Gaussian elimination reducing the matrix in place to combined
//! unit-lower/upper-triangular factors, with optional partial pivoting.
//! Pivoting selects the largest-magnitude candidate in the current column
//! and records the swap LAPACK-style: `pivots[k]` is the row swapped into
//! position k at step k, replayed against the right-hand side before
//! forward substitution.

use crate::dense::matrix::{Decomposition, DenseMatrix};
use crate::error::MatrixError;
use crate::traits::ComplexField;
use ndarray::Array1;
use num_traits::{FromPrimitive, One};

impl<T: ComplexField> DenseMatrix<T> {
    /// Solve `A x = b`, writing the solution into `x`.
    ///
    /// Factors the matrix in place on first use (leaving it LU-decomposed);
    /// a matrix already holding LU factors is solved by substitution alone,
    /// so one factorization serves several right-hand sides. Without
    /// `partial_pivot` the natural pivot order is used, which is faster but
    /// fails with [`MatrixError::SingularMatrix`] on a zero pivot that a
    /// row swap would have avoided.
    ///
    /// After a [`MatrixError::SingularMatrix`] error the buffer holds a
    /// partially eliminated matrix (the state tag stays clean): refill the
    /// entries before retrying on the same instance, e.g. with pivoting
    /// enabled.
    ///
    /// Fails with [`MatrixError::DecompositionMismatch`] if the matrix
    /// holds Cholesky factors.
    pub fn lu_solve(
        &mut self,
        b: &Array1<T>,
        x: &mut Array1<T>,
        partial_pivot: bool,
    ) -> Result<(), MatrixError> {
        if self.m != self.n {
            return Err(MatrixError::ShapeMismatch {
                expected_rows: self.m,
                expected_cols: self.m,
                found_rows: self.m,
                found_cols: self.n,
            });
        }
        if b.len() != self.m {
            return Err(MatrixError::LengthMismatch {
                expected: self.m,
                found: b.len(),
            });
        }
        match self.state {
            Decomposition::Clean => self.lu_decompose(partial_pivot)?,
            Decomposition::Lu => {}
            Decomposition::Cholesky => {
                return Err(MatrixError::DecompositionMismatch {
                    held: Decomposition::Cholesky,
                    requested: Decomposition::Lu,
                });
            }
        }
        self.lu_back_substitute(b, x);
        Ok(())
    }

    /// Determinant: signed product of the diagonal of the U factor.
    ///
    /// Factors the matrix (with partial pivoting) as a side effect when it
    /// is clean, which is why this is not a `&self` query; the sign flips
    /// once per row swap recorded during pivoting. Fails with
    /// [`MatrixError::DecompositionMismatch`] on a Cholesky-decomposed
    /// matrix.
    pub fn det(&mut self) -> Result<T, MatrixError> {
        if self.m != self.n {
            return Err(MatrixError::ShapeMismatch {
                expected_rows: self.m,
                expected_cols: self.m,
                found_rows: self.m,
                found_cols: self.n,
            });
        }
        match self.state {
            Decomposition::Clean => self.lu_decompose(true)?,
            Decomposition::Lu => {}
            Decomposition::Cholesky => {
                return Err(MatrixError::DecompositionMismatch {
                    held: Decomposition::Cholesky,
                    requested: Decomposition::Lu,
                });
            }
        }
        let mut det = T::one();
        for k in 0..self.n {
            det = det * self.at(k, k);
        }
        let swaps = self
            .pivots
            .iter()
            .enumerate()
            .filter(|&(k, &p)| p != k)
            .count();
        if swaps % 2 == 1 {
            det = -det;
        }
        Ok(det)
    }

    /// In-place elimination to combined L/U factors.
    ///
    /// On failure the buffer holds a partial factorization (contents
    /// unspecified) but the state tag stays clean, so nothing will treat it
    /// as valid factors.
    fn lu_decompose(&mut self, partial_pivot: bool) -> Result<(), MatrixError> {
        let n = self.n;
        let tiny = T::Real::from_f64(1e-30).unwrap();
        self.pivots = (0..n).collect();

        for k in 0..n {
            if partial_pivot {
                let mut max_val = self.at(k, k).norm();
                let mut max_row = k;
                for i in (k + 1)..n {
                    let val = self.at(i, k).norm();
                    if val > max_val {
                        max_val = val;
                        max_row = i;
                    }
                }
                if max_row != k {
                    for j in 0..n {
                        let tmp = self.at(k, j);
                        *self.at_mut(k, j) = self.at(max_row, j);
                        *self.at_mut(max_row, j) = tmp;
                    }
                    self.pivots[k] = max_row;
                }
            }

            let pivot = self.at(k, k);
            if pivot.norm() < tiny {
                self.pivots.clear();
                return Err(MatrixError::SingularMatrix { column: k });
            }

            // store multipliers below the diagonal, eliminate to the right
            let pivot_inv = pivot.inv();
            for i in (k + 1)..n {
                let mult = self.at(i, k) * pivot_inv;
                *self.at_mut(i, k) = mult;
                for j in (k + 1)..n {
                    let update = mult * self.at(k, j);
                    *self.at_mut(i, j) -= update;
                }
            }
        }

        self.state = Decomposition::Lu;
        Ok(())
    }

    /// Permutation replay, then forward and backward substitution.
    ///
    /// The L factor has an implied unit diagonal; U diagonals are nonzero
    /// by construction (the factorization would have failed otherwise).
    fn lu_back_substitute(&self, b: &Array1<T>, x: &mut Array1<T>) {
        let n = self.n;
        let mut work: Vec<T> = b.iter().copied().collect();

        for (k, &p) in self.pivots.iter().enumerate() {
            if p != k {
                work.swap(k, p);
            }
        }

        // forward: L y = P b
        for i in 0..n {
            for j in 0..i {
                let update = self.at(i, j) * work[j];
                work[i] = work[i] - update;
            }
        }

        // backward: U x = y
        for i in (0..n).rev() {
            for j in (i + 1)..n {
                let update = self.at(i, j) * work[j];
                work[i] = work[i] - update;
            }
            work[i] *= self.at(i, i).inv();
        }

        *x = Array1::from_vec(work);
    }
}
