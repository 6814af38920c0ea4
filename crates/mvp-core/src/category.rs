//! # Categories and Operation Kinds — Single Source of Truth
//!
//! [`Category`] is the closed set of value shapes the operator policy
//! dispatches on; [`OperationKind`] is the closed set of operations. Every
//! `match` on either is exhaustive, so adding a category or an operation
//! forces every policy consumer to handle it at compile time.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::MvpError;

/// Symbolic classification of a primitive value's shape.
///
/// | Category | Primitive types |
/// |----------|-----------------|
/// | Scalar | `i32`, `i64`, `f32`, `f64` (and every other numeric type for classification) |
/// | Boolean | `bool` |
/// | Text | `String`, `str`, `&str`, `Cow<str>` |
/// | ColumnVector3 | `nalgebra::Vector3<f64>` (one column) |
/// | RowVector3 | `nalgebra::RowVector3<f64>` (one row) |
/// | Matrix3x3 | `nalgebra::Matrix3<f64>` (any other shape) |
/// | Quaternion | `nalgebra::Quaternion<f64>` |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Numeric scalar.
    Scalar,
    /// Truth value.
    Boolean,
    /// Character string.
    Text,
    /// 3-element column vector.
    ColumnVector3,
    /// 3-element row vector.
    RowVector3,
    /// 3×3 matrix.
    Matrix3x3,
    /// Rotation quaternion.
    Quaternion,
}

impl Category {
    /// All seven categories in canonical order.
    pub const ALL: [Category; 7] = [
        Self::Scalar,
        Self::Boolean,
        Self::Text,
        Self::ColumnVector3,
        Self::RowVector3,
        Self::Matrix3x3,
        Self::Quaternion,
    ];

    /// Classify a structured numeric shape by its row and column counts.
    ///
    /// One row is a row vector, one column is a column vector, anything
    /// else is a matrix. Rows are tested first, so a 1×1 shape is a row
    /// vector.
    pub const fn from_shape(rows: usize, cols: usize) -> Category {
        if rows == 1 {
            Self::RowVector3
        } else if cols == 1 {
            Self::ColumnVector3
        } else {
            Self::Matrix3x3
        }
    }

    /// Vector-or-matrix generalization used by elementwise and transpose
    /// policies.
    pub const fn is_vector_or_matrix(self) -> bool {
        matches!(self, Self::ColumnVector3 | Self::RowVector3 | Self::Matrix3x3)
    }

    /// Vector generalization used by dot and cross policies.
    pub const fn is_vector(self) -> bool {
        matches!(self, Self::ColumnVector3 | Self::RowVector3)
    }

    /// Returns the snake_case identifier for this category.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Scalar => "scalar",
            Self::Boolean => "boolean",
            Self::Text => "text",
            Self::ColumnVector3 => "column_vector3",
            Self::RowVector3 => "row_vector3",
            Self::Matrix3x3 => "matrix3x3",
            Self::Quaternion => "quaternion",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = MvpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| MvpError::Parse(format!("unknown category: {s:?}")))
    }
}

/// The operations a policy can enable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    /// `a + b`.
    Add,
    /// `a - b`.
    Subtract,
    /// `a * b` (algebraic product for vectors, matrices and quaternions).
    Multiply,
    /// `a / b` (multiply by inverse for matrices and quaternions).
    Divide,
    /// Logical and.
    And,
    /// Logical or.
    Or,
    /// Logical exclusive or.
    Xor,
    /// Logical equivalence.
    Xnor,
    /// Logical negation (unary).
    Not,
    /// Inner product of two vectors.
    Dot,
    /// Cross product of two 3-vectors.
    Cross,
    /// Transpose (unary).
    Transpose,
    /// Matrix inverse (unary).
    Invert,
    /// Coefficient-wise product.
    ElementwiseMultiply,
    /// Coefficient-wise quotient.
    ElementwiseDivide,
}

impl OperationKind {
    /// All fifteen operations in canonical order.
    pub const ALL: [OperationKind; 15] = [
        Self::Add,
        Self::Subtract,
        Self::Multiply,
        Self::Divide,
        Self::And,
        Self::Or,
        Self::Xor,
        Self::Xnor,
        Self::Not,
        Self::Dot,
        Self::Cross,
        Self::Transpose,
        Self::Invert,
        Self::ElementwiseMultiply,
        Self::ElementwiseDivide,
    ];

    /// Whether the operation takes a single operand.
    pub const fn is_unary(self) -> bool {
        matches!(self, Self::Not | Self::Transpose | Self::Invert)
    }

    /// Returns the snake_case identifier for this operation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Subtract => "subtract",
            Self::Multiply => "multiply",
            Self::Divide => "divide",
            Self::And => "and",
            Self::Or => "or",
            Self::Xor => "xor",
            Self::Xnor => "xnor",
            Self::Not => "not",
            Self::Dot => "dot",
            Self::Cross => "cross",
            Self::Transpose => "transpose",
            Self::Invert => "invert",
            Self::ElementwiseMultiply => "elementwise_multiply",
            Self::ElementwiseDivide => "elementwise_divide",
        }
    }
}

impl std::fmt::Display for OperationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OperationKind {
    type Err = MvpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| MvpError::Parse(format!("unknown operation: {s:?}")))
    }
}
