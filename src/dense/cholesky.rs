//! Cholesky decomposition and solve for SPD matrices
//!
//! Factors `A = L·Lᵗ` in place (roughly half the work of LU, no pivoting
//! needed for SPD systems), then solves by forward substitution `L y = b`
//! and backward substitution `Lᵗ x = y`. The coefficients may be real while
//! the right-hand side and solution are complex: the factorization stays in
//! the coefficient type and the substitution arithmetic promotes through
//! [`PromoteInto`], so one real factorization serves many complex
//! excitations (small-signal / AC analysis).

use crate::dense::matrix::{Decomposition, DenseMatrix};
use crate::error::MatrixError;
use crate::traits::{ComplexField, PromoteInto};
use ndarray::Array1;
use num_traits::Zero;

impl<T: ComplexField> DenseMatrix<T> {
    /// Solve `A x = b` for a symmetric positive-definite matrix, writing
    /// the solution into `x`.
    ///
    /// Factors the matrix in place on first use (leaving it
    /// Cholesky-decomposed); a matrix already holding Cholesky factors is
    /// solved by substitution alone. Fails with
    /// [`MatrixError::NotPositiveDefinite`] if a diagonal pivot is not
    /// strictly positive, and with [`MatrixError::DecompositionMismatch`]
    /// if the matrix holds LU factors.
    ///
    /// After a [`MatrixError::NotPositiveDefinite`] error the lower
    /// triangle holds a partial factor (the state tag stays clean): refill
    /// the entries before falling back to LU on the same instance.
    pub fn cholesky_solve<T2>(
        &mut self,
        b: &Array1<T2>,
        x: &mut Array1<T2>,
    ) -> Result<(), MatrixError>
    where
        T2: ComplexField,
        T: PromoteInto<T2>,
    {
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
            Decomposition::Clean => self.cholesky_decompose()?,
            Decomposition::Cholesky => {}
            Decomposition::Lu => {
                return Err(MatrixError::DecompositionMismatch {
                    held: Decomposition::Lu,
                    requested: Decomposition::Cholesky,
                });
            }
        }
        self.cholesky_back_substitute(b, x);
        Ok(())
    }

    /// In-place `A = L·Lᵗ`; L fills the lower triangle, the upper triangle
    /// keeps the original entries and is never read back.
    ///
    /// On failure the lower triangle holds a partial factor (contents
    /// unspecified) but the state tag stays clean.
    fn cholesky_decompose(&mut self) -> Result<(), MatrixError> {
        let n = self.n;
        for i in 0..n {
            for j in 0..=i {
                let mut sum = self.at(i, j);
                for k in 0..j {
                    let update = self.at(i, k) * self.at(j, k);
                    sum = sum - update;
                }
                if i == j {
                    if sum.re() <= T::Real::zero() {
                        return Err(MatrixError::NotPositiveDefinite { row: i });
                    }
                    *self.at_mut(i, i) = sum.sqrt();
                } else {
                    *self.at_mut(i, j) = sum * self.at(j, j).inv();
                }
            }
        }
        self.state = Decomposition::Cholesky;
        Ok(())
    }

    /// Forward then backward substitution against the L factor, with all
    /// coefficient arithmetic promoted into the right-hand-side scalar type.
    fn cholesky_back_substitute<T2>(&self, b: &Array1<T2>, x: &mut Array1<T2>)
    where
        T2: ComplexField,
        T: PromoteInto<T2>,
    {
        let n = self.n;
        let mut work: Vec<T2> = b.iter().copied().collect();

        // forward: L y = b
        for i in 0..n {
            let mut sum = work[i];
            for k in 0..i {
                let update = self.at(i, k).promote() * work[k];
                sum = sum - update;
            }
            work[i] = sum * self.at(i, i).promote().inv();
        }

        // backward: L^T x = y (reading L column-wise)
        for i in (0..n).rev() {
            let mut sum = work[i];
            for k in (i + 1)..n {
                let update = self.at(k, i).promote() * work[k];
                sum = sum - update;
            }
            work[i] = sum * self.at(i, i).promote().inv();
        }

        *x = Array1::from_vec(work);
    }
}
