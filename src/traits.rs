//! Scalar traits for the dense element kernels
//!
//! This module defines the two abstractions the kernels are generic over:
//! - [`ComplexField`]: trait for scalar types (real and complex numbers)
//! - [`PromoteInto`]: coefficient promotion for mixed-scalar solves
//!   (real matrix, complex right-hand side)

use num_complex::{Complex32, Complex64};
use num_traits::{Float, FromPrimitive, NumAssign, One, Zero};
use std::fmt::Debug;
use std::ops::Neg;

/// Trait for scalar types that can fill a dense element matrix.
///
/// Abstracts over real and complex numbers, providing the operations the
/// factorization and substitution loops need: magnitude (for pivot
/// selection and norms), real-part projection (for ordering), inverse and
/// square root.
///
/// # Implementations
///
/// Provided for:
/// - `f64` (the default for device/field coefficients)
/// - `f32`
/// - `Complex64` (small-signal / AC excitations)
/// - `Complex32`
pub trait ComplexField:
    NumAssign + Clone + Copy + Send + Sync + Debug + Zero + One + Neg<Output = Self> + 'static
{
    /// The real number type underlying this field
    type Real: Float + NumAssign + FromPrimitive + Send + Sync + Debug + 'static;

    /// Real part (the imaginary part is ignored by ordering operations)
    fn re(&self) -> Self::Real;

    /// Squared magnitude |z|²
    fn norm_sqr(&self) -> Self::Real;

    /// Magnitude |z|
    fn norm(&self) -> Self::Real {
        self.norm_sqr().sqrt()
    }

    /// Create from a real value
    fn from_real(r: Self::Real) -> Self;

    /// Multiplicative inverse (1/z)
    fn inv(&self) -> Self;

    /// Square root
    fn sqrt(&self) -> Self;
}

impl ComplexField for f64 {
    type Real = f64;

    #[inline]
    fn re(&self) -> f64 {
        *self
    }

    #[inline]
    fn norm_sqr(&self) -> f64 {
        *self * *self
    }

    #[inline]
    fn norm(&self) -> f64 {
        self.abs()
    }

    #[inline]
    fn from_real(r: f64) -> Self {
        r
    }

    #[inline]
    fn inv(&self) -> Self {
        1.0 / *self
    }

    #[inline]
    fn sqrt(&self) -> Self {
        f64::sqrt(*self)
    }
}

impl ComplexField for f32 {
    type Real = f32;

    #[inline]
    fn re(&self) -> f32 {
        *self
    }

    #[inline]
    fn norm_sqr(&self) -> f32 {
        *self * *self
    }

    #[inline]
    fn norm(&self) -> f32 {
        self.abs()
    }

    #[inline]
    fn from_real(r: f32) -> Self {
        r
    }

    #[inline]
    fn inv(&self) -> Self {
        1.0 / *self
    }

    #[inline]
    fn sqrt(&self) -> Self {
        f32::sqrt(*self)
    }
}

impl ComplexField for Complex64 {
    type Real = f64;

    #[inline]
    fn re(&self) -> f64 {
        self.re
    }

    #[inline]
    fn norm_sqr(&self) -> f64 {
        self.re * self.re + self.im * self.im
    }

    #[inline]
    fn from_real(r: f64) -> Self {
        Complex64::new(r, 0.0)
    }

    #[inline]
    fn inv(&self) -> Self {
        let denom = self.norm_sqr();
        Complex64::new(self.re / denom, -self.im / denom)
    }

    #[inline]
    fn sqrt(&self) -> Self {
        Complex64::sqrt(*self)
    }
}

impl ComplexField for Complex32 {
    type Real = f32;

    #[inline]
    fn re(&self) -> f32 {
        self.re
    }

    #[inline]
    fn norm_sqr(&self) -> f32 {
        self.re * self.re + self.im * self.im
    }

    #[inline]
    fn from_real(r: f32) -> Self {
        Complex32::new(r, 0.0)
    }

    #[inline]
    fn inv(&self) -> Self {
        let denom = self.norm_sqr();
        Complex32::new(self.re / denom, -self.im / denom)
    }

    #[inline]
    fn sqrt(&self) -> Self {
        Complex32::sqrt(*self)
    }
}

/// Promotion of matrix coefficients into the scalar type of a right-hand
/// side.
///
/// A Cholesky factorization of a real-valued matrix can be reused against
/// complex right-hand sides (one factorization, many AC excitations). The
/// substitution loops then mix coefficient and vector scalars; this trait
/// states the promotion rule explicitly: real × complex → complex, a real
/// coefficient becomes `re + 0i`, and a scalar always promotes into itself.
/// There is no narrowing rule (complex coefficients never solve against a
/// real right-hand side).
pub trait PromoteInto<T2: ComplexField>: ComplexField {
    /// Promote a coefficient into the right-hand-side scalar type
    fn promote(self) -> T2;
}

impl PromoteInto<f64> for f64 {
    #[inline]
    fn promote(self) -> f64 {
        self
    }
}

impl PromoteInto<Complex64> for f64 {
    #[inline]
    fn promote(self) -> Complex64 {
        Complex64::new(self, 0.0)
    }
}

impl PromoteInto<f32> for f32 {
    #[inline]
    fn promote(self) -> f32 {
        self
    }
}

impl PromoteInto<Complex32> for f32 {
    #[inline]
    fn promote(self) -> Complex32 {
        Complex32::new(self, 0.0)
    }
}

impl PromoteInto<Complex64> for Complex64 {
    #[inline]
    fn promote(self) -> Complex64 {
        self
    }
}

impl PromoteInto<Complex32> for Complex32 {
    #[inline]
    fn promote(self) -> Complex32 {
        self
    }
}
