//! # Runtime Policy Table
//!
//! The same matrix the static [`BinaryPolicy`](crate::BinaryPolicy) and
//! [`UnaryPolicy`](crate::UnaryPolicy) impls encode, as data over
//! [`Category`]. Runtime containers consult it before computing anything;
//! the CLI lists it.
//!
//! ## Invariant
//!
//! [`lookup`] is an exhaustive `match` over `(OperationKind, Category,
//! Option<Category>)`. For every triple it returns `Some` exactly when a
//! static impl exists for the corresponding primitive types, with the same
//! result category and unit rule. The integration tests pin this.

use mvp_core::{Category, OperationKind, PolicyError};
use mvp_units::Dimension;
use serde::{Deserialize, Serialize};

use crate::rule::UnitRule;

/// One enabled (operands, operation) combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PolicyEntry {
    /// Category of the left (or only) operand.
    pub left: Category,
    /// Category of the right operand, `None` for unary operations.
    pub right: Option<Category>,
    /// The operation.
    pub operation: OperationKind,
    /// Category of the result.
    pub result: Category,
    /// How the result unit derives from the operand units.
    pub unit_rule: UnitRule,
}

/// A policy entry together with the computed result unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    /// The matching entry.
    pub entry: PolicyEntry,
    /// The result unit.
    pub unit: Dimension,
}

fn arithmetic_broadcast(left: Category, right: Category) -> Option<Category> {
    use Category::*;
    match (left, right) {
        (Scalar, Scalar) => Some(Scalar),
        (Scalar, m) if m.is_vector_or_matrix() => Some(m),
        (m, Scalar) if m.is_vector_or_matrix() => Some(m),
        _ => None,
    }
}

fn same_vector_or_matrix(left: Category, right: Category) -> Option<Category> {
    (left == right && left.is_vector_or_matrix()).then_some(left)
}

fn binary_result(operation: OperationKind, left: Category, right: Category) -> Option<Category> {
    use Category::*;
    use OperationKind::*;
    match operation {
        Add => arithmetic_broadcast(left, right)
            .or_else(|| same_vector_or_matrix(left, right))
            .or(match (left, right) {
                (Quaternion, Quaternion) => Some(Quaternion),
                (Text, Text) => Some(Text),
                _ => None,
            }),
        Subtract => arithmetic_broadcast(left, right)
            .or_else(|| same_vector_or_matrix(left, right))
            .or(match (left, right) {
                (Quaternion, Quaternion) => Some(Quaternion),
                _ => None,
            }),
        Multiply => arithmetic_broadcast(left, right).or(match (left, right) {
            (RowVector3, ColumnVector3) => Some(Scalar),
            (ColumnVector3, RowVector3) => Some(Matrix3x3),
            (Matrix3x3, Matrix3x3) => Some(Matrix3x3),
            (Matrix3x3, ColumnVector3) => Some(ColumnVector3),
            (RowVector3, Matrix3x3) => Some(RowVector3),
            (Quaternion, Quaternion) | (Quaternion, Scalar) | (Scalar, Quaternion) => {
                Some(Quaternion)
            }
            _ => None,
        }),
        Divide => arithmetic_broadcast(left, right).or(match (left, right) {
            (Matrix3x3, Matrix3x3) => Some(Matrix3x3),
            (RowVector3, Matrix3x3) => Some(RowVector3),
            (Quaternion, Quaternion) | (Quaternion, Scalar) => Some(Quaternion),
            _ => None,
        }),
        And | Or | Xor | Xnor => match (left, right) {
            (Boolean, Boolean) => Some(Boolean),
            _ => None,
        },
        Dot => (left == right && left.is_vector()).then_some(Scalar),
        Cross => (left == right && left.is_vector()).then_some(left),
        ElementwiseMultiply | ElementwiseDivide => same_vector_or_matrix(left, right),
        Not | Transpose | Invert => None,
    }
}

fn unary_result(operation: OperationKind, operand: Category) -> Option<Category> {
    use Category::*;
    use OperationKind::*;
    match (operation, operand) {
        (Not, Boolean) => Some(Boolean),
        (Transpose, ColumnVector3) => Some(RowVector3),
        (Transpose, RowVector3) => Some(ColumnVector3),
        (Transpose, Matrix3x3) => Some(Matrix3x3),
        (Invert, Matrix3x3) => Some(Matrix3x3),
        _ => None,
    }
}

/// The unit rule an operation uses for the given left operand category.
pub fn unit_rule(operation: OperationKind, left: Category) -> UnitRule {
    use OperationKind::*;
    match operation {
        Add | Subtract if left == Category::Text => UnitRule::Dimensionless,
        Add | Subtract => UnitRule::SameUnit,
        Multiply | Dot | Cross | ElementwiseMultiply => UnitRule::Product,
        Divide | ElementwiseDivide => UnitRule::Quotient,
        And | Or | Xor | Xnor | Not => UnitRule::Dimensionless,
        Transpose => UnitRule::Preserve,
        Invert => UnitRule::Reciprocal,
    }
}

/// The policy entry for `left <operation> right`, or `left` alone when
/// `right` is `None`. `None` when no policy enables the combination,
/// including every arity mismatch.
pub fn lookup(
    left: Category,
    right: Option<Category>,
    operation: OperationKind,
) -> Option<PolicyEntry> {
    let result = match (operation.is_unary(), right) {
        (true, None) => unary_result(operation, left),
        (false, Some(r)) => binary_result(operation, left, r),
        (true, Some(_)) | (false, None) => None,
    }?;
    Some(PolicyEntry {
        left,
        right,
        operation,
        result,
        unit_rule: unit_rule(operation, left),
    })
}

/// Every enabled entry, ordered by operation, then left, then right
/// category.
pub fn entries() -> Vec<PolicyEntry> {
    let mut all = Vec::new();
    for operation in OperationKind::ALL {
        for left in Category::ALL {
            if operation.is_unary() {
                all.extend(lookup(left, None, operation));
            } else {
                for right in Category::ALL {
                    all.extend(lookup(left, Some(right), operation));
                }
            }
        }
    }
    all
}

/// Resolve an operation on categorised, unit-tagged operands: the matching
/// entry and the result unit.
///
/// Fails with [`PolicyError::Unavailable`] when no policy exists and with
/// [`PolicyError::UnitMismatch`] when the units fail the entry's rule.
/// Nothing is computed.
pub fn resolve(
    left: Category,
    right: Option<Category>,
    operation: OperationKind,
    left_unit: Dimension,
    right_unit: Option<Dimension>,
) -> Result<Resolution, PolicyError> {
    let Some(entry) = lookup(left, right, operation) else {
        tracing::debug!(
            %operation,
            %left,
            right = ?right,
            "no policy for operands"
        );
        return Err(PolicyError::Unavailable {
            operation,
            left,
            right,
        });
    };
    let unit = entry
        .unit_rule
        .apply(operation, left_unit, right_unit.unwrap_or(left_unit))
        .inspect_err(|err| tracing::debug!(%operation, %err, "unit rule rejected operands"))?;
    Ok(Resolution { entry, unit })
}

#[cfg(test)]
mod tests {
    use super::*;
    use mvp_units::{Metre, Millisecond, One, Second, Unit};
    use Category::*;
    use OperationKind::*;

    #[test]
    fn scalar_arithmetic() {
        for op in [Add, Subtract, Multiply, Divide] {
            let entry = lookup(Scalar, Some(Scalar), op).unwrap();
            assert_eq!(entry.result, Scalar);
        }
        assert!(lookup(Scalar, Some(Scalar), ElementwiseMultiply).is_none());
    }

    #[test]
    fn structured_products() {
        assert_eq!(lookup(RowVector3, Some(ColumnVector3), Multiply).unwrap().result, Scalar);
        assert_eq!(lookup(ColumnVector3, Some(RowVector3), Multiply).unwrap().result, Matrix3x3);
        assert_eq!(lookup(Matrix3x3, Some(ColumnVector3), Multiply).unwrap().result, ColumnVector3);
        assert_eq!(lookup(RowVector3, Some(Matrix3x3), Multiply).unwrap().result, RowVector3);
        assert!(lookup(ColumnVector3, Some(ColumnVector3), Multiply).is_none());
        assert!(lookup(ColumnVector3, Some(Matrix3x3), Multiply).is_none());
    }

    #[test]
    fn matrix_division_only_on_the_right() {
        assert!(lookup(Matrix3x3, Some(Matrix3x3), Divide).is_some());
        assert!(lookup(RowVector3, Some(Matrix3x3), Divide).is_some());
        assert!(lookup(ColumnVector3, Some(Matrix3x3), Divide).is_none());
        assert!(lookup(Matrix3x3, Some(RowVector3), Divide).is_none());
    }

    #[test]
    fn dot_and_cross_need_matching_orientation() {
        assert_eq!(lookup(ColumnVector3, Some(ColumnVector3), Dot).unwrap().result, Scalar);
        assert!(lookup(ColumnVector3, Some(RowVector3), Dot).is_none());
        assert_eq!(lookup(RowVector3, Some(RowVector3), Cross).unwrap().result, RowVector3);
        assert!(lookup(Matrix3x3, Some(Matrix3x3), Cross).is_none());
    }

    #[test]
    fn unary_operations() {
        assert_eq!(lookup(ColumnVector3, None, Transpose).unwrap().result, RowVector3);
        assert_eq!(lookup(Matrix3x3, None, Invert).unwrap().unit_rule, UnitRule::Reciprocal);
        assert_eq!(lookup(Boolean, None, Not).unwrap().result, Boolean);
        assert!(lookup(Quaternion, None, Invert).is_none());
        assert!(lookup(Scalar, None, Not).is_none());
    }

    #[test]
    fn arity_mismatch_has_no_entry() {
        assert!(lookup(Matrix3x3, Some(Matrix3x3), Transpose).is_none());
        assert!(lookup(Scalar, None, Add).is_none());
    }

    #[test]
    fn text_only_concatenates() {
        let entry = lookup(Text, Some(Text), Add).unwrap();
        assert_eq!(entry.unit_rule, UnitRule::Dimensionless);
        assert!(lookup(Text, Some(Text), Subtract).is_none());
        assert!(lookup(Text, Some(Scalar), Add).is_none());
    }

    #[test]
    fn resolve_checks_units() {
        let ok = resolve(
            Scalar,
            Some(Scalar),
            Add,
            Millisecond::DIMENSION,
            Some(Millisecond::DIMENSION),
        )
        .unwrap();
        assert_eq!(ok.unit, Millisecond::DIMENSION);

        let err = resolve(
            Scalar,
            Some(Scalar),
            Add,
            Second::DIMENSION,
            Some(Metre::DIMENSION),
        )
        .unwrap_err();
        assert!(matches!(err, PolicyError::UnitMismatch { operation: Add, .. }));
    }

    #[test]
    fn resolve_reports_unavailable_before_units() {
        let err = resolve(
            Text,
            Some(Scalar),
            Multiply,
            One::DIMENSION,
            Some(Metre::DIMENSION),
        )
        .unwrap_err();
        assert_eq!(
            err,
            PolicyError::Unavailable {
                operation: Multiply,
                left: Text,
                right: Some(Scalar),
            }
        );
    }

    #[test]
    fn resolve_unary_uses_operand_unit() {
        let r = resolve(Matrix3x3, None, Invert, Second::DIMENSION, None).unwrap();
        assert_eq!(r.unit, Second::DIMENSION.recip());
    }

    #[test]
    fn entries_are_unique_and_enabled() {
        let all = entries();
        let unique: std::collections::HashSet<_> = all.iter().collect();
        assert_eq!(unique.len(), all.len());
        for e in &all {
            assert_eq!(lookup(e.left, e.right, e.operation), Some(*e));
            assert_eq!(e.right.is_none(), e.operation.is_unary());
        }
    }

    #[test]
    fn entry_serializes_as_snake_case() {
        let entry = lookup(Matrix3x3, None, Invert).unwrap();
        let json = serde_json::to_value(entry).unwrap();
        assert_eq!(json["left"], "matrix3x3");
        assert_eq!(json["right"], serde_json::Value::Null);
        assert_eq!(json["unit_rule"], "reciprocal");
    }
}
