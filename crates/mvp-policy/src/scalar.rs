//! # Scalar ⊕ Scalar Policies
//!
//! Arithmetic between `i32`, `i64`, `f32` and `f64` in any combination. The
//! result is the common numeric type of the pair:
//!
//! | left \ right | i32 | i64 | f32 | f64 |
//! |--------------|-----|-----|-----|-----|
//! | i32 | i32 | i64 | f32 | f64 |
//! | i64 | i64 | i64 | f32 | f64 |
//! | f32 | f32 | f32 | f32 | f64 |
//! | f64 | f64 | f64 | f64 | f64 |
//!
//! Integer arithmetic wraps on overflow. Integer division by zero is
//! [`PolicyError::DivisionByZero`]; floating division follows IEEE 754.

use mvp_core::PolicyError;

use crate::op::{AddOp, DivideOp, MultiplyOp, SubtractOp};
use crate::policy::BinaryPolicy;
use crate::rule::{ProductRule, QuotientRule, SameUnitRule};

/// Arithmetic on a common numeric type.
pub(crate) trait Arithmetic: Copy {
    fn plus(self, rhs: Self) -> Self;
    fn minus(self, rhs: Self) -> Self;
    fn times(self, rhs: Self) -> Self;
    fn over(self, rhs: Self) -> Result<Self, PolicyError>;
}

macro_rules! integer_arithmetic {
    ($($t:ty),*) => {
        $(
            impl Arithmetic for $t {
                fn plus(self, rhs: Self) -> Self {
                    self.wrapping_add(rhs)
                }
                fn minus(self, rhs: Self) -> Self {
                    self.wrapping_sub(rhs)
                }
                fn times(self, rhs: Self) -> Self {
                    self.wrapping_mul(rhs)
                }
                fn over(self, rhs: Self) -> Result<Self, PolicyError> {
                    if rhs == 0 {
                        return Err(PolicyError::DivisionByZero);
                    }
                    Ok(self.wrapping_div(rhs))
                }
            }
        )*
    };
}

macro_rules! float_arithmetic {
    ($($t:ty),*) => {
        $(
            impl Arithmetic for $t {
                fn plus(self, rhs: Self) -> Self {
                    self + rhs
                }
                fn minus(self, rhs: Self) -> Self {
                    self - rhs
                }
                fn times(self, rhs: Self) -> Self {
                    self * rhs
                }
                fn over(self, rhs: Self) -> Result<Self, PolicyError> {
                    Ok(self / rhs)
                }
            }
        )*
    };
}

integer_arithmetic!(i32, i64);
float_arithmetic!(f32, f64);

macro_rules! scalar_pairs {
    ($($l:ty, $r:ty => $o:ty);* $(;)?) => {
        $(
            #[allow(clippy::unnecessary_cast)]
            impl BinaryPolicy<AddOp, $r> for $l {
                type Output = $o;
                type Rule = SameUnitRule;

                fn apply(lhs: &$l, rhs: &$r) -> Result<$o, PolicyError> {
                    Ok(<$o as Arithmetic>::plus(*lhs as $o, *rhs as $o))
                }
            }

            #[allow(clippy::unnecessary_cast)]
            impl BinaryPolicy<SubtractOp, $r> for $l {
                type Output = $o;
                type Rule = SameUnitRule;

                fn apply(lhs: &$l, rhs: &$r) -> Result<$o, PolicyError> {
                    Ok(<$o as Arithmetic>::minus(*lhs as $o, *rhs as $o))
                }
            }

            #[allow(clippy::unnecessary_cast)]
            impl BinaryPolicy<MultiplyOp, $r> for $l {
                type Output = $o;
                type Rule = ProductRule;

                fn apply(lhs: &$l, rhs: &$r) -> Result<$o, PolicyError> {
                    Ok(<$o as Arithmetic>::times(*lhs as $o, *rhs as $o))
                }
            }

            #[allow(clippy::unnecessary_cast)]
            impl BinaryPolicy<DivideOp, $r> for $l {
                type Output = $o;
                type Rule = QuotientRule;

                fn apply(lhs: &$l, rhs: &$r) -> Result<$o, PolicyError> {
                    <$o as Arithmetic>::over(*lhs as $o, *rhs as $o)
                }
            }
        )*
    };
}

scalar_pairs! {
    i32, i32 => i32;
    i32, i64 => i64;
    i32, f32 => f32;
    i32, f64 => f64;
    i64, i32 => i64;
    i64, i64 => i64;
    i64, f32 => f32;
    i64, f64 => f64;
    f32, i32 => f32;
    f32, i64 => f32;
    f32, f32 => f32;
    f32, f64 => f64;
    f64, i32 => f64;
    f64, i64 => f64;
    f64, f32 => f64;
    f64, f64 => f64;
}

#[cfg(test)]
mod tests {
    use super::*;
    use mvp_core::{category_of, Category};

    fn output_category<Op, L, R>() -> Category
    where
        Op: crate::op::Operation,
        L: BinaryPolicy<Op, R>,
        R: mvp_core::Primitive,
    {
        category_of::<L::Output>()
    }

    #[test]
    fn integer_pair_stays_integer() {
        assert_eq!(<i32 as BinaryPolicy<AddOp>>::apply(&2, &3), Ok(5i32));
        assert_eq!(<i32 as BinaryPolicy<DivideOp>>::apply(&7, &2), Ok(3i32));
    }

    #[test]
    fn mixed_pair_widens() {
        assert_eq!(<i32 as BinaryPolicy<AddOp, i64>>::apply(&2, &3), Ok(5i64));
        assert_eq!(<i32 as BinaryPolicy<DivideOp, f64>>::apply(&7, &2.0), Ok(3.5f64));
        assert_eq!(<i64 as BinaryPolicy<MultiplyOp, f32>>::apply(&3, &0.5), Ok(1.5f32));
        assert_eq!(<f32 as BinaryPolicy<SubtractOp, f64>>::apply(&1.5, &0.5), Ok(1.0f64));
    }

    #[test]
    fn integer_division_by_zero_is_an_error() {
        assert_eq!(
            <i64 as BinaryPolicy<DivideOp>>::apply(&1, &0),
            Err(PolicyError::DivisionByZero)
        );
        assert_eq!(
            <i32 as BinaryPolicy<DivideOp, i64>>::apply(&1, &0),
            Err(PolicyError::DivisionByZero)
        );
    }

    #[test]
    fn float_division_by_zero_is_infinite() {
        let q = <f64 as BinaryPolicy<DivideOp>>::apply(&1.0, &0.0).unwrap();
        assert!(q.is_infinite());
    }

    #[test]
    fn integer_overflow_wraps() {
        assert_eq!(<i32 as BinaryPolicy<AddOp>>::apply(&i32::MAX, &1), Ok(i32::MIN));
        assert_eq!(<i32 as BinaryPolicy<DivideOp>>::apply(&i32::MIN, &-1), Ok(i32::MIN));
    }

    #[test]
    fn results_are_scalars() {
        assert_eq!(output_category::<AddOp, i32, f64>(), Category::Scalar);
        assert_eq!(output_category::<DivideOp, f32, i64>(), Category::Scalar);
    }
}
