//! # Boolean and Text Policies
//!
//! Logical connectives on `bool` and concatenation of `String`. Both are
//! unit-free: operands must be dimensionless.

use mvp_core::PolicyError;

use crate::op::{AddOp, AndOp, NotOp, OrOp, XnorOp, XorOp};
use crate::policy::{BinaryPolicy, UnaryPolicy};
use crate::rule::DimensionlessRule;

macro_rules! connective {
    ($op:ty, |$a:ident, $b:ident| $body:expr) => {
        impl BinaryPolicy<$op> for bool {
            type Output = bool;
            type Rule = DimensionlessRule;

            fn apply($a: &bool, $b: &bool) -> Result<bool, PolicyError> {
                Ok($body)
            }
        }
    };
}

connective!(AndOp, |a, b| *a && *b);
connective!(OrOp, |a, b| *a || *b);
connective!(XorOp, |a, b| *a != *b);
connective!(XnorOp, |a, b| *a == *b);

impl UnaryPolicy<NotOp> for bool {
    type Output = bool;
    type Rule = DimensionlessRule;

    fn apply(value: &bool) -> Result<bool, PolicyError> {
        Ok(!*value)
    }
}

impl BinaryPolicy<AddOp> for String {
    type Output = String;
    type Rule = DimensionlessRule;

    fn apply(lhs: &String, rhs: &String) -> Result<String, PolicyError> {
        let mut joined = String::with_capacity(lhs.len() + rhs.len());
        joined.push_str(lhs);
        joined.push_str(rhs);
        Ok(joined)
    }
}
