//! # Error Types — Structured Error Hierarchy
//!
//! Defines the error types used throughout the MethodVerse parameter stack.
//! All errors use `thiserror` for derive-based `Display` and `Error`
//! implementations.
//!
//! ## Design
//!
//! - Policy errors name the operation and the operand categories or units,
//!   and are raised before any value is computed.
//! - Parameter errors carry the offending index, length, or kind name.
//! - Registry errors carry the conflicting name.

use mvp_units::{Dimension, UnitError};
use thiserror::Error;

use crate::category::{Category, OperationKind};

/// Top-level error type for the parameter stack.
#[derive(Error, Debug)]
pub enum MvpError {
    /// Unit expression could not be parsed.
    #[error("unit error: {0}")]
    Unit(#[from] UnitError),

    /// Operation rejected by the policy table.
    #[error("policy error: {0}")]
    Policy(#[from] PolicyError),

    /// Container or tagged value misuse.
    #[error("parameter error: {0}")]
    Parameter(#[from] ParameterError),

    /// Parameter type registration failed.
    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),

    /// A category, operation, or kind name did not parse.
    #[error("parse error: {0}")]
    Parse(String),
}

fn right_operand(right: &Option<Category>) -> String {
    right.map_or_else(String::new, |c| format!(" and {c}"))
}

/// Rejection by the operation policy table.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PolicyError {
    /// No policy enables this operation for these categories.
    #[error("{operation} is not available for {left}{}", right_operand(.right))]
    Unavailable {
        /// The attempted operation.
        operation: OperationKind,
        /// Category of the left (or only) operand.
        left: Category,
        /// Category of the right operand, `None` for unary operations.
        right: Option<Category>,
    },

    /// The operands' units fail the operation's unit rule.
    #[error("{operation} requires compatible units, found {left} and {right}")]
    UnitMismatch {
        /// The attempted operation.
        operation: OperationKind,
        /// Left operand unit.
        left: Dimension,
        /// Right operand unit (the left unit again for unary rules).
        right: Dimension,
    },

    /// Operand count or structure does not fit the operation.
    #[error("{operation}: {detail}")]
    ShapeMismatch {
        /// The attempted operation.
        operation: OperationKind,
        /// What did not fit.
        detail: String,
    },

    /// The right operand (or the only operand) has no inverse.
    #[error("{operation} requires an invertible operand")]
    SingularOperand {
        /// The attempted operation.
        operation: OperationKind,
    },

    /// Integer division by zero.
    #[error("integer division by zero")]
    DivisionByZero,
}

/// Misuse of a typed container or tagged parameter.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParameterError {
    /// Values of different categories in one container.
    #[error("cannot classify values: {0}")]
    Classification(String),

    /// Index past the end of the value sequence.
    #[error("index {index} out of range for {len} values")]
    IndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of values held.
        len: usize,
    },

    /// An operand held no values.
    #[error("{operation} on an empty parameter")]
    EmptyValue {
        /// The attempted operation.
        operation: OperationKind,
    },

    /// Operand lengths cannot be broadcast together.
    #[error("cannot broadcast {left} values against {right} values")]
    ShapeMismatch {
        /// Length of the left operand.
        left: usize,
        /// Length of the right operand.
        right: usize,
    },

    /// Enum read back as a different enum type than was stored.
    #[error("enum type mismatch: stored {stored}, requested {requested}")]
    EnumTypeMismatch {
        /// Tag of the stored enum type.
        stored: String,
        /// Tag of the requested enum type.
        requested: String,
    },

    /// Stored integer is not a variant of the requested enum.
    #[error("{value} is not a variant of {enum_tag}")]
    InvalidEnumValue {
        /// Tag of the requested enum type.
        enum_tag: String,
        /// The stored integer.
        value: i64,
    },

    /// Read as a different kind than is stored.
    #[error("kind mismatch: stored {stored}, requested {requested}")]
    KindMismatch {
        /// Kind currently held.
        stored: &'static str,
        /// Kind requested by the caller.
        requested: &'static str,
    },

    /// The underlying operation was rejected by the policy table.
    #[error(transparent)]
    Policy(#[from] PolicyError),
}

/// Parameter type registration failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// A parameter type with this display name is already registered.
    #[error("parameter name {0:?} is already registered")]
    DuplicateName(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unavailable_names_operation_and_operands() {
        let err = PolicyError::Unavailable {
            operation: OperationKind::Cross,
            left: Category::Matrix3x3,
            right: Some(Category::Matrix3x3),
        };
        assert_eq!(
            err.to_string(),
            "cross is not available for matrix3x3 and matrix3x3"
        );
    }

    #[test]
    fn unary_unavailable_has_no_right_operand() {
        let err = PolicyError::Unavailable {
            operation: OperationKind::Invert,
            left: Category::Text,
            right: None,
        };
        assert_eq!(err.to_string(), "invert is not available for text");
    }

    #[test]
    fn policy_error_wraps_transparently() {
        let err: ParameterError = PolicyError::DivisionByZero.into();
        assert_eq!(err.to_string(), "integer division by zero");
        let top: MvpError = err.into();
        assert!(top.to_string().starts_with("parameter error:"));
    }

    #[test]
    fn unit_mismatch_renders_dimensions() {
        let err = PolicyError::UnitMismatch {
            operation: OperationKind::Add,
            left: mvp_units::Dimension::base(mvp_units::BaseDimension::Time),
            right: mvp_units::Dimension::base(mvp_units::BaseDimension::Length),
        };
        assert_eq!(err.to_string(), "add requires compatible units, found s and m");
    }
}
