//! # Vector and Matrix Policies
//!
//! - Scalar ⊕ vector/matrix and vector/matrix ⊕ scalar: elementwise
//!   `+ - * /`, result keeps the structured shape.
//! - Same shape: `+ -` and the coefficient-wise product and quotient.
//! - Algebraic products: row·column is a scalar, column·row a matrix, and
//!   matrix products follow the usual shape rules.
//! - Division by a matrix multiplies by its inverse; a singular divisor is
//!   [`PolicyError::SingularOperand`].
//! - Transpose swaps column and row vectors; invert applies to matrices.
//! - Dot and cross products between vectors of the same orientation.

use mvp_core::{Matrix3, OperationKind, PolicyError, RowVector3, Scalar, Vector3};

use crate::op::{
    AddOp, CrossOp, DivideOp, DotOp, ElementwiseDivideOp, ElementwiseMultiplyOp, InvertOp,
    MultiplyOp, SubtractOp, TransposeOp,
};
use crate::policy::{BinaryPolicy, UnaryPolicy};
use crate::rule::{PreserveRule, ProductRule, QuotientRule, ReciprocalRule, SameUnitRule};

// ─── Scalar broadcasting ────────────────────────────────────────────

macro_rules! broadcast_pair {
    ($s:ty, $m:ty) => {
        impl BinaryPolicy<AddOp, $m> for $s {
            type Output = $m;
            type Rule = SameUnitRule;

            fn apply(lhs: &$s, rhs: &$m) -> Result<$m, PolicyError> {
                Ok(rhs.add_scalar(Scalar::to_f64(*lhs)))
            }
        }

        impl BinaryPolicy<SubtractOp, $m> for $s {
            type Output = $m;
            type Rule = SameUnitRule;

            fn apply(lhs: &$s, rhs: &$m) -> Result<$m, PolicyError> {
                let k = Scalar::to_f64(*lhs);
                Ok(rhs.map(|x| k - x))
            }
        }

        impl BinaryPolicy<MultiplyOp, $m> for $s {
            type Output = $m;
            type Rule = ProductRule;

            fn apply(lhs: &$s, rhs: &$m) -> Result<$m, PolicyError> {
                Ok(rhs * Scalar::to_f64(*lhs))
            }
        }

        impl BinaryPolicy<DivideOp, $m> for $s {
            type Output = $m;
            type Rule = QuotientRule;

            fn apply(lhs: &$s, rhs: &$m) -> Result<$m, PolicyError> {
                let k = Scalar::to_f64(*lhs);
                Ok(rhs.map(|x| k / x))
            }
        }

        impl BinaryPolicy<AddOp, $s> for $m {
            type Output = $m;
            type Rule = SameUnitRule;

            fn apply(lhs: &$m, rhs: &$s) -> Result<$m, PolicyError> {
                Ok(lhs.add_scalar(Scalar::to_f64(*rhs)))
            }
        }

        impl BinaryPolicy<SubtractOp, $s> for $m {
            type Output = $m;
            type Rule = SameUnitRule;

            fn apply(lhs: &$m, rhs: &$s) -> Result<$m, PolicyError> {
                Ok(lhs.add_scalar(-Scalar::to_f64(*rhs)))
            }
        }

        impl BinaryPolicy<MultiplyOp, $s> for $m {
            type Output = $m;
            type Rule = ProductRule;

            fn apply(lhs: &$m, rhs: &$s) -> Result<$m, PolicyError> {
                Ok(lhs * Scalar::to_f64(*rhs))
            }
        }

        impl BinaryPolicy<DivideOp, $s> for $m {
            type Output = $m;
            type Rule = QuotientRule;

            fn apply(lhs: &$m, rhs: &$s) -> Result<$m, PolicyError> {
                Ok(lhs / Scalar::to_f64(*rhs))
            }
        }
    };
}

macro_rules! broadcast_scalar {
    ($($s:ty),*) => {
        $(
            broadcast_pair!($s, Vector3);
            broadcast_pair!($s, RowVector3);
            broadcast_pair!($s, Matrix3);
        )*
    };
}

broadcast_scalar!(i32, i64, f32, f64);

// ─── Same shape ─────────────────────────────────────────────────────

macro_rules! same_shape {
    ($($m:ty),*) => {
        $(
            impl BinaryPolicy<AddOp> for $m {
                type Output = $m;
                type Rule = SameUnitRule;

                fn apply(lhs: &$m, rhs: &$m) -> Result<$m, PolicyError> {
                    Ok(lhs + rhs)
                }
            }

            impl BinaryPolicy<SubtractOp> for $m {
                type Output = $m;
                type Rule = SameUnitRule;

                fn apply(lhs: &$m, rhs: &$m) -> Result<$m, PolicyError> {
                    Ok(lhs - rhs)
                }
            }

            impl BinaryPolicy<ElementwiseMultiplyOp> for $m {
                type Output = $m;
                type Rule = ProductRule;

                fn apply(lhs: &$m, rhs: &$m) -> Result<$m, PolicyError> {
                    Ok(lhs.component_mul(rhs))
                }
            }

            impl BinaryPolicy<ElementwiseDivideOp> for $m {
                type Output = $m;
                type Rule = QuotientRule;

                fn apply(lhs: &$m, rhs: &$m) -> Result<$m, PolicyError> {
                    Ok(lhs.component_div(rhs))
                }
            }
        )*
    };
}

same_shape!(Vector3, RowVector3, Matrix3);

// ─── Algebraic products ─────────────────────────────────────────────

macro_rules! product {
    ($l:ty, $r:ty => $o:ty, |$a:ident, $b:ident| $body:expr) => {
        impl BinaryPolicy<MultiplyOp, $r> for $l {
            type Output = $o;
            type Rule = ProductRule;

            fn apply($a: &$l, $b: &$r) -> Result<$o, PolicyError> {
                Ok($body)
            }
        }
    };
}

product!(RowVector3, Vector3 => f64, |a, b| a.transpose().dot(b));
product!(Vector3, RowVector3 => Matrix3, |a, b| a * b);
product!(Matrix3, Matrix3 => Matrix3, |a, b| a * b);
product!(Matrix3, Vector3 => Vector3, |a, b| a * b);
product!(RowVector3, Matrix3 => RowVector3, |a, b| a * b);

fn inverse(m: &Matrix3, operation: OperationKind) -> Result<Matrix3, PolicyError> {
    m.try_inverse()
        .ok_or(PolicyError::SingularOperand { operation })
}

impl BinaryPolicy<DivideOp> for Matrix3 {
    type Output = Matrix3;
    type Rule = QuotientRule;

    fn apply(lhs: &Matrix3, rhs: &Matrix3) -> Result<Matrix3, PolicyError> {
        Ok(lhs * inverse(rhs, OperationKind::Divide)?)
    }
}

impl BinaryPolicy<DivideOp, Matrix3> for RowVector3 {
    type Output = RowVector3;
    type Rule = QuotientRule;

    fn apply(lhs: &RowVector3, rhs: &Matrix3) -> Result<RowVector3, PolicyError> {
        Ok(lhs * inverse(rhs, OperationKind::Divide)?)
    }
}

// ─── Unary ──────────────────────────────────────────────────────────

impl UnaryPolicy<TransposeOp> for Vector3 {
    type Output = RowVector3;
    type Rule = PreserveRule;

    fn apply(value: &Vector3) -> Result<RowVector3, PolicyError> {
        Ok(value.transpose())
    }
}

impl UnaryPolicy<TransposeOp> for RowVector3 {
    type Output = Vector3;
    type Rule = PreserveRule;

    fn apply(value: &RowVector3) -> Result<Vector3, PolicyError> {
        Ok(value.transpose())
    }
}

impl UnaryPolicy<TransposeOp> for Matrix3 {
    type Output = Matrix3;
    type Rule = PreserveRule;

    fn apply(value: &Matrix3) -> Result<Matrix3, PolicyError> {
        Ok(value.transpose())
    }
}

impl UnaryPolicy<InvertOp> for Matrix3 {
    type Output = Matrix3;
    type Rule = ReciprocalRule;

    fn apply(value: &Matrix3) -> Result<Matrix3, PolicyError> {
        inverse(value, OperationKind::Invert)
    }
}

// ─── Dot and cross ──────────────────────────────────────────────────

macro_rules! vector_products {
    ($($v:ty),*) => {
        $(
            impl BinaryPolicy<DotOp> for $v {
                type Output = f64;
                type Rule = ProductRule;

                fn apply(lhs: &$v, rhs: &$v) -> Result<f64, PolicyError> {
                    Ok(lhs.dot(rhs))
                }
            }

            impl BinaryPolicy<CrossOp> for $v {
                type Output = $v;
                type Rule = ProductRule;

                fn apply(lhs: &$v, rhs: &$v) -> Result<$v, PolicyError> {
                    Ok(lhs.cross(rhs))
                }
            }
        )*
    };
}

vector_products!(Vector3, RowVector3);

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn scalar_broadcasts_over_vectors() {
        let v = Vector3::new(1.0, 2.0, 3.0);
        assert_eq!(
            <i32 as BinaryPolicy<AddOp, Vector3>>::apply(&1, &v),
            Ok(Vector3::new(2.0, 3.0, 4.0))
        );
        assert_eq!(
            <f64 as BinaryPolicy<SubtractOp, Vector3>>::apply(&10.0, &v),
            Ok(Vector3::new(9.0, 8.0, 7.0))
        );
        assert_eq!(
            <Vector3 as BinaryPolicy<SubtractOp, f64>>::apply(&v, &1.0),
            Ok(Vector3::new(0.0, 1.0, 2.0))
        );
        assert_eq!(
            <Vector3 as BinaryPolicy<DivideOp, i64>>::apply(&v, &2),
            Ok(Vector3::new(0.5, 1.0, 1.5))
        );
        assert_eq!(
            <f32 as BinaryPolicy<DivideOp, Vector3>>::apply(&6.0, &v),
            Ok(Vector3::new(6.0, 3.0, 2.0))
        );
    }

    #[test]
    fn row_times_column_is_scalar() {
        let r = RowVector3::new(1.0, 2.0, 3.0);
        let c = Vector3::new(4.0, 5.0, 6.0);
        assert_eq!(<RowVector3 as BinaryPolicy<MultiplyOp, Vector3>>::apply(&r, &c), Ok(32.0));
    }

    #[test]
    fn column_times_row_is_outer_product() {
        let c = Vector3::new(1.0, 2.0, 3.0);
        let r = RowVector3::new(1.0, 0.0, -1.0);
        let m = <Vector3 as BinaryPolicy<MultiplyOp, RowVector3>>::apply(&c, &r).unwrap();
        assert_eq!(m[(2, 0)], 3.0);
        assert_eq!(m[(1, 2)], -2.0);
    }

    #[test]
    fn matrix_division_multiplies_by_inverse() {
        let a = Matrix3::new(2.0, 0.0, 0.0, 0.0, 3.0, 0.0, 0.0, 0.0, 4.0);
        let q = <Matrix3 as BinaryPolicy<DivideOp>>::apply(&a, &a).unwrap();
        assert_relative_eq!(q, Matrix3::identity(), epsilon = 1e-12);

        let r = RowVector3::new(2.0, 3.0, 4.0);
        let rq = <RowVector3 as BinaryPolicy<DivideOp, Matrix3>>::apply(&r, &a).unwrap();
        assert_relative_eq!(rq, RowVector3::new(1.0, 1.0, 1.0), epsilon = 1e-12);
    }

    #[test]
    fn singular_divisor_is_an_error() {
        let zero = Matrix3::zeros();
        assert_eq!(
            <Matrix3 as BinaryPolicy<DivideOp>>::apply(&Matrix3::identity(), &zero),
            Err(PolicyError::SingularOperand {
                operation: OperationKind::Divide
            })
        );
        assert_eq!(
            <Matrix3 as UnaryPolicy<InvertOp>>::apply(&zero),
            Err(PolicyError::SingularOperand {
                operation: OperationKind::Invert
            })
        );
    }

    #[test]
    fn transpose_swaps_orientation() {
        let c = Vector3::new(1.0, 2.0, 3.0);
        let r = <Vector3 as UnaryPolicy<TransposeOp>>::apply(&c).unwrap();
        assert_eq!(r, RowVector3::new(1.0, 2.0, 3.0));
        assert_eq!(<RowVector3 as UnaryPolicy<TransposeOp>>::apply(&r), Ok(c));
    }

    #[test]
    fn cross_of_unit_axes() {
        let x = Vector3::x();
        let y = Vector3::y();
        assert_eq!(<Vector3 as BinaryPolicy<CrossOp>>::apply(&x, &y), Ok(Vector3::z()));
        let xr = RowVector3::new(1.0, 0.0, 0.0);
        let yr = RowVector3::new(0.0, 1.0, 0.0);
        assert_eq!(
            <RowVector3 as BinaryPolicy<CrossOp>>::apply(&xr, &yr),
            Ok(RowVector3::new(0.0, 0.0, 1.0))
        );
    }

    #[test]
    fn elementwise_product_and_quotient() {
        let a = Vector3::new(2.0, 4.0, 6.0);
        let b = Vector3::new(1.0, 2.0, 3.0);
        assert_eq!(
            <Vector3 as BinaryPolicy<ElementwiseMultiplyOp>>::apply(&a, &b),
            Ok(Vector3::new(2.0, 8.0, 18.0))
        );
        assert_eq!(
            <Vector3 as BinaryPolicy<ElementwiseDivideOp>>::apply(&a, &b),
            Ok(Vector3::new(2.0, 2.0, 2.0))
        );
    }

    #[test]
    fn dot_of_rows() {
        let r = RowVector3::new(1.0, 2.0, 3.0);
        assert_eq!(<RowVector3 as BinaryPolicy<DotOp>>::apply(&r, &r), Ok(14.0));
    }
}
