//! # Runtime Values
//!
//! [`Value`] is the dynamically typed mirror of [`Primitive`]: one variant
//! per storage shape, classified by [`Value::category`]. Integers and reals
//! share the Scalar category; the runtime numeric common type is integer
//! only when both operands are integers.

use std::fmt;

use crate::approx::ApproxEq;
use crate::category::Category;
use crate::error::ParameterError;
use crate::primitive::{
    render_column, render_matrix, render_quaternion, render_row_vector, Matrix3, Primitive,
    Quaternion, RowVector3, Vector3,
};

/// A single primitive value whose type is known only at runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Integer scalar.
    Integer(i64),
    /// Floating scalar.
    Real(f64),
    /// Truth value.
    Boolean(bool),
    /// Character string.
    Text(String),
    /// 3-element column vector.
    ColumnVector(Vector3),
    /// 3-element row vector.
    RowVector(RowVector3),
    /// 3×3 matrix.
    Matrix(Matrix3),
    /// Quaternion.
    Quaternion(Quaternion),
}

impl Value {
    /// Category of this value. Total over every variant.
    pub fn category(&self) -> Category {
        match self {
            Self::Boolean(_) => Category::Boolean,
            Self::Text(_) => Category::Text,
            Self::Quaternion(_) => Category::Quaternion,
            Self::ColumnVector(_) => Category::ColumnVector3,
            Self::RowVector(_) => Category::RowVector3,
            Self::Matrix(_) => Category::Matrix3x3,
            Self::Integer(_) | Self::Real(_) => Category::Scalar,
        }
    }

    /// Short kind name used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Integer(_) => i64::KIND,
            Self::Real(_) => f64::KIND,
            Self::Boolean(_) => bool::KIND,
            Self::Text(_) => String::KIND,
            Self::ColumnVector(_) => Vector3::KIND,
            Self::RowVector(_) => RowVector3::KIND,
            Self::Matrix(_) => Matrix3::KIND,
            Self::Quaternion(_) => Quaternion::KIND,
        }
    }

    /// The default value of a category: zero, `false`, empty text, zero
    /// vector or matrix, identity quaternion.
    pub fn default_for(category: Category) -> Value {
        match category {
            Category::Scalar => Self::Real(0.0),
            Category::Boolean => Self::Boolean(false),
            Category::Text => Self::Text(String::new()),
            Category::ColumnVector3 => Self::ColumnVector(Vector3::zeros()),
            Category::RowVector3 => Self::RowVector(RowVector3::zeros()),
            Category::Matrix3x3 => Self::Matrix(Matrix3::zeros()),
            Category::Quaternion => Self::Quaternion(Quaternion::identity()),
        }
    }

    /// Numeric scalar widened to `f64`, `None` for every other kind.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Integer(i) => Some(*i as f64),
            Self::Real(r) => Some(*r),
            _ => None,
        }
    }

    /// Equality with relative tolerance for structured floating values and
    /// exact comparison otherwise. An integer and a real never compare equal.
    pub fn approx_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Self::ColumnVector(a), Self::ColumnVector(b)) => a.is_approx(b),
            (Self::RowVector(a), Self::RowVector(b)) => a.is_approx(b),
            (Self::Matrix(a), Self::Matrix(b)) => a.is_approx(b),
            (Self::Quaternion(a), Self::Quaternion(b)) => a.is_approx(b),
            _ => self == other,
        }
    }

    /// Extract a typed primitive.
    pub fn get<T: Primitive>(&self) -> Result<T, ParameterError> {
        T::from_value(self).ok_or(ParameterError::KindMismatch {
            stored: self.kind(),
            requested: T::KIND,
        })
    }
}

/// The single category shared by every value, `None` when empty.
///
/// Mixed categories fail with [`ParameterError::Classification`].
pub fn classify(values: &[Value]) -> Result<Option<Category>, ParameterError> {
    let mut category = None;
    for (index, value) in values.iter().enumerate() {
        let current = value.category();
        match category {
            None => category = Some(current),
            Some(expected) if expected != current => {
                return Err(ParameterError::Classification(format!(
                    "value {index} is {current}, expected {expected}"
                )));
            }
            Some(_) => {}
        }
    }
    Ok(category)
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(i) => write!(f, "{i}"),
            Self::Real(r) => write!(f, "{r}"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Text(s) => f.write_str(s),
            Self::ColumnVector(v) => f.write_str(&render_column(v)),
            Self::RowVector(v) => f.write_str(&render_row_vector(v)),
            Self::Matrix(m) => f.write_str(&render_matrix(m)),
            Self::Quaternion(q) => f.write_str(&render_quaternion(q)),
        }
    }
}

macro_rules! value_from {
    ($($t:ty),* $(,)?) => {
        $(
            impl From<$t> for Value {
                fn from(value: $t) -> Self {
                    value.to_value()
                }
            }
        )*
    };
}

value_from!(i32, i64, f32, f64, bool, String, Vector3, RowVector3, Matrix3, Quaternion);

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}
