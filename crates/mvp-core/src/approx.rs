//! # Approximate Comparison
//!
//! Floating vectors, matrices and quaternions compare with a relative
//! tolerance scaled by the smaller operand's norm:
//!
//! `‖a − b‖ ≤ precision · min(‖a‖, ‖b‖)`
//!
//! Two zero values are approximately equal; a zero value is never
//! approximately equal to a non-zero one. Scalars are not routed through
//! this trait; they compare exactly.

use nalgebra::{Quaternion, SMatrix};

/// Default relative precision for double-precision comparison.
pub const DEFAULT_PRECISION: f64 = 1e-12;

/// Relative-tolerance equality for floating structured values.
pub trait ApproxEq {
    /// Compare with an explicit relative precision.
    fn is_approx_with(&self, other: &Self, precision: f64) -> bool;

    /// Compare with [`DEFAULT_PRECISION`].
    fn is_approx(&self, other: &Self) -> bool {
        self.is_approx_with(other, DEFAULT_PRECISION)
    }
}

impl<const R: usize, const C: usize> ApproxEq for SMatrix<f64, R, C> {
    fn is_approx_with(&self, other: &Self, precision: f64) -> bool {
        (self - other).norm() <= precision * self.norm().min(other.norm())
    }
}

impl ApproxEq for Quaternion<f64> {
    fn is_approx_with(&self, other: &Self, precision: f64) -> bool {
        self.coords.is_approx_with(&other.coords, precision)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::{Matrix3, Vector3};

    #[test]
    fn tiny_relative_error_is_approx() {
        let a = Vector3::new(1.0, 2.0, 3.0);
        let b = a * (1.0 + 1e-14);
        assert!(a.is_approx(&b));
        assert_ne!(a, b);
    }

    #[test]
    fn visible_difference_is_not_approx() {
        let a = Vector3::new(1.0, 2.0, 3.0);
        let b = Vector3::new(1.0, 2.0, 3.001);
        assert!(!a.is_approx(&b));
        assert!(a.is_approx_with(&b, 1e-3));
    }

    #[test]
    fn zero_only_matches_zero() {
        let zero = Matrix3::<f64>::zeros();
        assert!(zero.is_approx(&Matrix3::zeros()));
        assert!(!zero.is_approx(&(Matrix3::identity() * 1e-300)));
    }

    #[test]
    fn quaternion_compares_coefficients() {
        let q = Quaternion::new(1.0, 0.5, -0.5, 0.25);
        let p = Quaternion::new(1.0, 0.5, -0.5, 0.25 + 1e-15);
        assert!(q.is_approx(&p));
        assert!(!q.is_approx(&Quaternion::new(1.0, 0.0, 0.0, 0.0)));
    }
}
