//! # Static Policies
//!
//! An operation is legal between two primitive types exactly when the left
//! type implements [`BinaryPolicy<Op, Rhs>`] (or [`UnaryPolicy<Op>`] for
//! single-operand operations). The impl fixes the result primitive, the unit
//! rule and the computation. A missing impl is a compile error at the call
//! site:
//!
//! ```compile_fail
//! use mvp_core::Matrix3;
//! use mvp_policy::{BinaryPolicy, CrossOp};
//!
//! // No cross product of two matrices.
//! let m = Matrix3::identity();
//! let _ = <Matrix3 as BinaryPolicy<CrossOp, Matrix3>>::apply(&m, &m);
//! ```

use mvp_core::{Primitive, PolicyError};

use crate::op::Operation;
use crate::rule::{BinaryUnitRule, UnaryUnitRule};
use crate::table::PolicyEntry;

/// The policy for `Self <Op> Rhs`.
pub trait BinaryPolicy<Op: Operation, Rhs: Primitive = Self>: Primitive {
    /// Result primitive type.
    type Output: Primitive;
    /// Unit rule of the result.
    type Rule: BinaryUnitRule;

    /// Compute one element of the result.
    fn apply(lhs: &Self, rhs: &Rhs) -> Result<Self::Output, PolicyError>;
}

/// The policy for `<Op> Self`.
pub trait UnaryPolicy<Op: Operation>: Primitive {
    /// Result primitive type.
    type Output: Primitive;
    /// Unit rule of the result.
    type Rule: UnaryUnitRule;

    /// Compute one element of the result.
    fn apply(value: &Self) -> Result<Self::Output, PolicyError>;
}

/// The table entry a static binary policy corresponds to.
pub fn binary_entry<Op, L, R>() -> PolicyEntry
where
    Op: Operation,
    L: BinaryPolicy<Op, R>,
    R: Primitive,
{
    PolicyEntry {
        left: L::CATEGORY,
        right: Some(R::CATEGORY),
        operation: Op::KIND,
        result: <L::Output as mvp_core::Classified>::CATEGORY,
        unit_rule: <L::Rule as BinaryUnitRule>::RULE,
    }
}

/// The table entry a static unary policy corresponds to.
pub fn unary_entry<Op, T>() -> PolicyEntry
where
    Op: Operation,
    T: UnaryPolicy<Op>,
{
    PolicyEntry {
        left: T::CATEGORY,
        right: None,
        operation: Op::KIND,
        result: <T::Output as mvp_core::Classified>::CATEGORY,
        unit_rule: <T::Rule as UnaryUnitRule>::RULE,
    }
}
