//! Dense matrix storage and elementwise algebra
//!
//! Storage is a single contiguous row-major buffer: element (i, j) lives at
//! offset `i * cols + j`. The matrix carries a decomposition tag so that the
//! solve paths can detect stale or cross-kind factors (see
//! [`Decomposition`]).

use crate::error::MatrixError;
use crate::traits::ComplexField;
use ndarray::{Array1, ArrayView2, ArrayViewMut2};
use num_traits::{One, Zero};
use std::fmt;
use std::ops::{AddAssign, Index, IndexMut, MulAssign};

/// Which factorization, if any, the matrix buffer currently holds.
///
/// Every elementwise or structural mutation resets the tag to `Clean`; only
/// the decomposition routines set `Lu` or `Cholesky`. A solve against
/// factors of the other kind fails with
/// [`MatrixError::DecompositionMismatch`] instead of silently reusing them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decomposition {
    /// No factorization: the buffer holds the matrix entries themselves
    Clean,
    /// Combined unit-lower/upper LU factors (plus a pivot record)
    Lu,
    /// Lower-triangular Cholesky factor in the lower triangle
    Cholesky,
}

impl fmt::Display for Decomposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decomposition::Clean => write!(f, "no"),
            Decomposition::Lu => write!(f, "LU"),
            Decomposition::Cholesky => write!(f, "Cholesky"),
        }
    }
}

/// Dense matrix for element-local computations.
///
/// Holds the element stiffness/mass contributions of a single finite
/// element before summation into the global system. Optimized for small,
/// fully materialized matrices (single digits to low hundreds of degrees of
/// freedom); not a general large-matrix type.
///
/// Right-hand sides and solutions are caller-owned [`Array1`] vectors;
/// solve operations overwrite the supplied solution vector and leave the
/// matrix holding its factors.
#[derive(Debug, Clone)]
pub struct DenseMatrix<T: ComplexField> {
    pub(crate) m: usize,
    pub(crate) n: usize,
    /// Row-major values, `len == m * n`
    pub(crate) values: Vec<T>,
    pub(crate) state: Decomposition,
    /// Row-swap record from the last LU factorization: `pivots[k]` is the
    /// row swapped into position k at elimination step k. Identity when
    /// factored without pivoting, empty when `Clean`.
    pub(crate) pivots: Vec<usize>,
}

impl<T: ComplexField> Default for DenseMatrix<T> {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

impl<T: ComplexField> DenseMatrix<T> {
    /// Create a zero-filled `m` by `n` matrix
    pub fn new(m: usize, n: usize) -> Self {
        Self {
            m,
            n,
            values: vec![T::zero(); m * n],
            state: Decomposition::Clean,
            pivots: Vec::new(),
        }
    }

    /// Create a matrix from row-major values.
    ///
    /// Fails with [`MatrixError::LengthMismatch`] if `values.len() != m * n`.
    pub fn from_values(m: usize, n: usize, values: Vec<T>) -> Result<Self, MatrixError> {
        if values.len() != m * n {
            return Err(MatrixError::LengthMismatch {
                expected: m * n,
                found: values.len(),
            });
        }
        Ok(Self {
            m,
            n,
            values,
            state: Decomposition::Clean,
            pivots: Vec::new(),
        })
    }

    /// Number of rows
    #[inline]
    pub fn rows(&self) -> usize {
        self.m
    }

    /// Number of columns
    #[inline]
    pub fn cols(&self) -> usize {
        self.n
    }

    /// Which factorization the buffer currently holds
    #[inline]
    pub fn decomposition(&self) -> Decomposition {
        self.state
    }

    #[inline]
    pub(crate) fn reset(&mut self) {
        self.state = Decomposition::Clean;
        self.pivots.clear();
    }

    /// Unchecked-by-release element read, used by the factorization loops
    #[inline]
    pub(crate) fn at(&self, i: usize, j: usize) -> T {
        debug_assert!(i < self.m && j < self.n);
        self.values[i * self.n + j]
    }

    /// Unchecked-by-release element write target; does not touch the state
    /// tag (internal use only)
    #[inline]
    pub(crate) fn at_mut(&mut self, i: usize, j: usize) -> &mut T {
        debug_assert!(i < self.m && j < self.n);
        &mut self.values[i * self.n + j]
    }

    /// Resize to `m` by `n`.
    ///
    /// Never frees the underlying allocation, but may grow it. All entries
    /// are set to zero and the decomposition state resets to clean.
    pub fn resize(&mut self, m: usize, n: usize) {
        self.values.resize(m * n, T::zero());
        self.m = m;
        self.n = n;
        self.zero();
    }

    /// Set every entry to zero and reset the decomposition state
    pub fn zero(&mut self) {
        self.reset();
        self.values.fill(T::zero());
    }

    /// Checked element read
    pub fn get(&self, i: usize, j: usize) -> Result<T, MatrixError> {
        if i >= self.m || j >= self.n {
            return Err(MatrixError::OutOfBounds {
                row: i,
                col: j,
                rows: self.m,
                cols: self.n,
            });
        }
        Ok(self.values[i * self.n + j])
    }

    /// Checked mutable element access; resets the decomposition state
    pub fn get_mut(&mut self, i: usize, j: usize) -> Result<&mut T, MatrixError> {
        if i >= self.m || j >= self.n {
            return Err(MatrixError::OutOfBounds {
                row: i,
                col: j,
                rows: self.m,
                cols: self.n,
            });
        }
        self.reset();
        Ok(&mut self.values[i * self.n + j])
    }

    /// Element (j, i): read-only logical transpose accessor, no transposed
    /// copy is materialized
    #[inline]
    pub fn transpose(&self, i: usize, j: usize) -> T {
        self[(j, i)]
    }

    /// Raw row-major storage, for bulk transfer into a global system
    #[inline]
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Mutable raw storage; resets the decomposition state
    #[inline]
    pub fn values_mut(&mut self) -> &mut [T] {
        self.reset();
        &mut self.values
    }

    /// Read-only 2-d view over the row-major storage
    pub fn view(&self) -> ArrayView2<'_, T> {
        ArrayView2::from_shape((self.m, self.n), &self.values)
            .expect("buffer length always equals rows * cols")
    }

    /// Mutable 2-d view over the row-major storage; resets the
    /// decomposition state
    pub fn view_mut(&mut self) -> ArrayViewMut2<'_, T> {
        self.reset();
        ArrayViewMut2::from_shape((self.m, self.n), &mut self.values)
            .expect("buffer length always equals rows * cols")
    }

    /// Swap contents, dimensions and decomposition state with `other`
    pub fn swap(&mut self, other: &mut DenseMatrix<T>) {
        std::mem::swap(self, other);
    }

    /// Multiply every entry by `factor` in place
    pub fn scale(&mut self, factor: T) {
        self.reset();
        for v in &mut self.values {
            *v *= factor;
        }
    }

    /// Elementwise axpy: `self += factor * other`.
    ///
    /// Fails with [`MatrixError::ShapeMismatch`] unless `other` has
    /// identical dimensions.
    pub fn add(&mut self, factor: T, other: &DenseMatrix<T>) -> Result<(), MatrixError> {
        if self.m != other.m || self.n != other.n {
            return Err(MatrixError::ShapeMismatch {
                expected_rows: self.m,
                expected_cols: self.n,
                found_rows: other.m,
                found_cols: other.n,
            });
        }
        self.reset();
        for (v, o) in self.values.iter_mut().zip(&other.values) {
            *v += factor * *o;
        }
        Ok(())
    }

    /// Minimum entry, compared by real part.
    ///
    /// Calling this on an empty matrix is a contract violation (debug
    /// assertion).
    pub fn min(&self) -> T::Real {
        debug_assert!(self.m > 0 && self.n > 0);
        let mut best = self.values[0].re();
        for v in &self.values[1..] {
            let cur = v.re();
            if cur < best {
                best = cur;
            }
        }
        best
    }

    /// Maximum entry, compared by real part.
    ///
    /// Calling this on an empty matrix is a contract violation (debug
    /// assertion).
    pub fn max(&self) -> T::Real {
        debug_assert!(self.m > 0 && self.n > 0);
        let mut best = self.values[0].re();
        for v in &self.values[1..] {
            let cur = v.re();
            if cur > best {
                best = cur;
            }
        }
        best
    }

    /// l1-norm: maximum column abs-sum, the operator norm compatible with
    /// the vector 1-norm
    pub fn l1_norm(&self) -> T::Real {
        debug_assert!(self.m > 0 && self.n > 0);
        let mut max = T::Real::zero();
        for j in 0..self.n {
            let mut colsum = T::Real::zero();
            for i in 0..self.m {
                colsum += self.at(i, j).norm();
            }
            if j == 0 || colsum > max {
                max = colsum;
            }
        }
        max
    }

    /// linfty-norm: maximum row abs-sum, the operator norm compatible with
    /// the vector infinity-norm
    pub fn linfty_norm(&self) -> T::Real {
        debug_assert!(self.m > 0 && self.n > 0);
        let mut max = T::Real::zero();
        for i in 0..self.m {
            let mut rowsum = T::Real::zero();
            for j in 0..self.n {
                rowsum += self.at(i, j).norm();
            }
            if i == 0 || rowsum > max {
                max = rowsum;
            }
        }
        max
    }

    /// In-place product `self = m2 * self`.
    ///
    /// Fails with [`MatrixError::ShapeMismatch`] unless `m2.cols() ==
    /// self.rows()`.
    pub fn left_multiply(&mut self, m2: &DenseMatrix<T>) -> Result<(), MatrixError> {
        if m2.n != self.m {
            return Err(MatrixError::ShapeMismatch {
                expected_rows: m2.m,
                expected_cols: self.m,
                found_rows: m2.m,
                found_cols: m2.n,
            });
        }
        let p = m2.m;
        let q = self.n;
        let inner = self.m;
        let mut out = vec![T::zero(); p * q];
        for i in 0..p {
            for k in 0..inner {
                let coeff = m2.values[i * m2.n + k];
                let row = &self.values[k * q..(k + 1) * q];
                for (o, r) in out[i * q..(i + 1) * q].iter_mut().zip(row) {
                    *o += coeff * *r;
                }
            }
        }
        self.m = p;
        self.values = out;
        self.reset();
        Ok(())
    }

    /// In-place product `self = a^T * self`, without materializing the
    /// transpose.
    pub fn left_multiply_transpose(&mut self, a: &DenseMatrix<T>) -> Result<(), MatrixError> {
        if a.m != self.m {
            return Err(MatrixError::ShapeMismatch {
                expected_rows: self.m,
                expected_cols: a.n,
                found_rows: a.m,
                found_cols: a.n,
            });
        }
        let p = a.n;
        let q = self.n;
        let inner = a.m;
        let mut out = vec![T::zero(); p * q];
        for k in 0..inner {
            let row = &self.values[k * q..(k + 1) * q];
            for i in 0..p {
                let coeff = a.values[k * a.n + i];
                for (o, r) in out[i * q..(i + 1) * q].iter_mut().zip(row) {
                    *o += coeff * *r;
                }
            }
        }
        self.m = p;
        self.values = out;
        self.reset();
        Ok(())
    }

    /// In-place product `self = self * m3`.
    ///
    /// Fails with [`MatrixError::ShapeMismatch`] unless `m3.rows() ==
    /// self.cols()`.
    pub fn right_multiply(&mut self, m3: &DenseMatrix<T>) -> Result<(), MatrixError> {
        if m3.m != self.n {
            return Err(MatrixError::ShapeMismatch {
                expected_rows: self.n,
                expected_cols: m3.n,
                found_rows: m3.m,
                found_cols: m3.n,
            });
        }
        let p = self.m;
        let q = m3.n;
        let inner = self.n;
        let mut out = vec![T::zero(); p * q];
        for i in 0..p {
            for k in 0..inner {
                let coeff = self.values[i * inner + k];
                let row = &m3.values[k * q..(k + 1) * q];
                for (o, r) in out[i * q..(i + 1) * q].iter_mut().zip(row) {
                    *o += coeff * *r;
                }
            }
        }
        self.n = q;
        self.values = out;
        self.reset();
        Ok(())
    }

    /// In-place product `self = self * a^T`, without materializing the
    /// transpose.
    pub fn right_multiply_transpose(&mut self, a: &DenseMatrix<T>) -> Result<(), MatrixError> {
        if a.n != self.n {
            return Err(MatrixError::ShapeMismatch {
                expected_rows: a.m,
                expected_cols: self.n,
                found_rows: a.m,
                found_cols: a.n,
            });
        }
        let p = self.m;
        let q = a.m;
        let inner = self.n;
        let mut out = vec![T::zero(); p * q];
        for i in 0..p {
            let row = &self.values[i * inner..(i + 1) * inner];
            for j in 0..q {
                let arow = &a.values[j * inner..(j + 1) * inner];
                let mut sum = T::zero();
                for (r, s) in row.iter().zip(arow) {
                    sum += *r * *s;
                }
                out[i * q + j] = sum;
            }
        }
        self.n = q;
        self.values = out;
        self.reset();
        Ok(())
    }

    /// Matrix-vector product `A * v`.
    ///
    /// Fails with [`MatrixError::LengthMismatch`] unless `v.len() ==
    /// self.cols()`.
    pub fn vector_mult(&self, v: &Array1<T>) -> Result<Array1<T>, MatrixError> {
        if v.len() != self.n {
            return Err(MatrixError::LengthMismatch {
                expected: self.n,
                found: v.len(),
            });
        }
        let mut out = Array1::zeros(self.m);
        for i in 0..self.m {
            let row = &self.values[i * self.n..(i + 1) * self.n];
            let mut sum = T::zero();
            for (r, x) in row.iter().zip(v.iter()) {
                sum += *r * *x;
            }
            out[i] = sum;
        }
        Ok(out)
    }

    /// Condense out degree of freedom `i`, forcing it to the fixed value
    /// `val` while preserving matrix symmetry.
    ///
    /// Requires a diagonal target (`i == j`, debug-asserted). For every row
    /// k the known value is moved into the right-hand side
    /// (`rhs[k] -= A[k][j] * val`) and column `j` is zeroed; row `i` is then
    /// zeroed, `A[i][j]` set to one and `rhs[i]` to `val`. Any subsequent
    /// solve yields `x[i] == val` and the surviving submatrix stays
    /// symmetric whenever the input was.
    ///
    /// Fails with [`MatrixError::LengthMismatch`] unless `rhs.len() ==
    /// self.rows()`.
    pub fn condense(
        &mut self,
        i: usize,
        j: usize,
        val: T,
        rhs: &mut Array1<T>,
    ) -> Result<(), MatrixError> {
        debug_assert_eq!(i, j, "condensation targets a diagonal entry");
        debug_assert!(i < self.m && j < self.n);
        if rhs.len() != self.m {
            return Err(MatrixError::LengthMismatch {
                expected: self.m,
                found: rhs.len(),
            });
        }
        self.reset();

        // move the known value into the rhs and zero the column
        for k in 0..self.m {
            rhs[k] = rhs[k] - self.at(k, j) * val;
            *self.at_mut(k, j) = T::zero();
        }

        // zero the row
        for col in 0..self.n {
            *self.at_mut(i, col) = T::zero();
        }

        *self.at_mut(i, j) = T::one();
        rhs[i] = val;
        Ok(())
    }
}

impl<T: ComplexField> Index<(usize, usize)> for DenseMatrix<T> {
    type Output = T;

    /// Element (i, j). Bounds are debug-asserted; release builds trade the
    /// check for speed (use [`DenseMatrix::get`] for checked access).
    #[inline]
    fn index(&self, (i, j): (usize, usize)) -> &T {
        debug_assert!(i < self.m && j < self.n);
        &self.values[i * self.n + j]
    }
}

impl<T: ComplexField> IndexMut<(usize, usize)> for DenseMatrix<T> {
    /// Mutable element (i, j); resets the decomposition state
    #[inline]
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut T {
        debug_assert!(i < self.m && j < self.n);
        self.reset();
        &mut self.values[i * self.n + j]
    }
}

impl<T: ComplexField> MulAssign<T> for DenseMatrix<T> {
    fn mul_assign(&mut self, factor: T) {
        self.scale(factor);
    }
}

impl<T: ComplexField> AddAssign<&DenseMatrix<T>> for DenseMatrix<T> {
    /// Elementwise sum; dimensions must match (debug-asserted, see
    /// [`DenseMatrix::add`] for the checked form)
    fn add_assign(&mut self, other: &DenseMatrix<T>) {
        debug_assert!(self.m == other.m && self.n == other.n);
        self.reset();
        for (v, o) in self.values.iter_mut().zip(&other.values) {
            *v += *o;
        }
    }
}

impl<T: ComplexField> fmt::Display for DenseMatrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.m {
            for j in 0..self.n {
                if j > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{:?}", self.values[i * self.n + j])?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
