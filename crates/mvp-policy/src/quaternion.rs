//! # Quaternion Policies
//!
//! Coefficient-wise sum and difference, the Hamilton product, and division
//! as multiplication by the inverse. Scaling by a scalar from either side,
//! and division by a scalar, act on all four coefficients.

use mvp_core::{OperationKind, PolicyError, Quaternion, Scalar};

use crate::op::{AddOp, DivideOp, MultiplyOp, SubtractOp};
use crate::policy::BinaryPolicy;
use crate::rule::{ProductRule, QuotientRule, SameUnitRule};

impl BinaryPolicy<AddOp> for Quaternion {
    type Output = Quaternion;
    type Rule = SameUnitRule;

    fn apply(lhs: &Quaternion, rhs: &Quaternion) -> Result<Quaternion, PolicyError> {
        Ok(lhs + rhs)
    }
}

impl BinaryPolicy<SubtractOp> for Quaternion {
    type Output = Quaternion;
    type Rule = SameUnitRule;

    fn apply(lhs: &Quaternion, rhs: &Quaternion) -> Result<Quaternion, PolicyError> {
        Ok(lhs - rhs)
    }
}

impl BinaryPolicy<MultiplyOp> for Quaternion {
    type Output = Quaternion;
    type Rule = ProductRule;

    fn apply(lhs: &Quaternion, rhs: &Quaternion) -> Result<Quaternion, PolicyError> {
        Ok(lhs * rhs)
    }
}

impl BinaryPolicy<DivideOp> for Quaternion {
    type Output = Quaternion;
    type Rule = QuotientRule;

    fn apply(lhs: &Quaternion, rhs: &Quaternion) -> Result<Quaternion, PolicyError> {
        let inverse = rhs.try_inverse().ok_or(PolicyError::SingularOperand {
            operation: OperationKind::Divide,
        })?;
        Ok(lhs * inverse)
    }
}

fn scale(q: &Quaternion, k: f64) -> Quaternion {
    Quaternion::from_vector(q.coords * k)
}

macro_rules! quaternion_scaling {
    ($($s:ty),*) => {
        $(
            impl BinaryPolicy<MultiplyOp, $s> for Quaternion {
                type Output = Quaternion;
                type Rule = ProductRule;

                fn apply(lhs: &Quaternion, rhs: &$s) -> Result<Quaternion, PolicyError> {
                    Ok(scale(lhs, Scalar::to_f64(*rhs)))
                }
            }

            impl BinaryPolicy<MultiplyOp, Quaternion> for $s {
                type Output = Quaternion;
                type Rule = ProductRule;

                fn apply(lhs: &$s, rhs: &Quaternion) -> Result<Quaternion, PolicyError> {
                    Ok(scale(rhs, Scalar::to_f64(*lhs)))
                }
            }

            impl BinaryPolicy<DivideOp, $s> for Quaternion {
                type Output = Quaternion;
                type Rule = QuotientRule;

                fn apply(lhs: &Quaternion, rhs: &$s) -> Result<Quaternion, PolicyError> {
                    Ok(Quaternion::from_vector(lhs.coords / Scalar::to_f64(*rhs)))
                }
            }
        )*
    };
}

quaternion_scaling!(i32, i64, f32, f64);
