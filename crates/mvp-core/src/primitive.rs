//! # Primitive Types and the Category Classifier
//!
//! [`Classified`] maps a Rust type to its [`Category`] as an associated
//! `const`; [`Primitive`] narrows that to the types a parameter can store.
//! Both traits are sealed: the category set is closed, and a type outside
//! it has no classification. Asking for one is a compile error:
//!
//! ```compile_fail
//! use mvp_core::category_of;
//!
//! struct Tensor4;
//! let _ = category_of::<Tensor4>();
//! ```
//!
//! ## Classification order
//!
//! `bool` and text types are classified before any numeric fallback, so a
//! boolean is never a scalar. Quaternions are classified on their own,
//! never by shape. Every other `nalgebra` matrix type is classified by its
//! row and column counts through [`Category::from_shape`].

use std::borrow::Cow;
use std::fmt;

use nalgebra::SMatrix;

use crate::approx::ApproxEq;
use crate::category::Category;
use crate::value::Value;

/// 3-element column vector of doubles.
pub type Vector3 = nalgebra::Vector3<f64>;
/// 3-element row vector of doubles.
pub type RowVector3 = nalgebra::RowVector3<f64>;
/// 3×3 matrix of doubles.
pub type Matrix3 = nalgebra::Matrix3<f64>;
/// Quaternion of doubles, `w + xi + yj + zk`.
pub type Quaternion = nalgebra::Quaternion<f64>;

mod private {
    pub trait Sealed {}
}

/// A type with a statically known [`Category`].
///
/// Sealed: implemented for numeric, boolean and text types, every
/// `nalgebra` matrix of doubles, and quaternions.
pub trait Classified: private::Sealed {
    /// The category of every value of this type.
    const CATEGORY: Category;
}

/// The category of `T`, fixed at compile time.
pub const fn category_of<T: Classified + ?Sized>() -> Category {
    T::CATEGORY
}

macro_rules! classify_numeric {
    ($($t:ty),* $(,)?) => {
        $(
            impl private::Sealed for $t {}
            impl Classified for $t {
                const CATEGORY: Category = Category::Scalar;
            }
        )*
    };
}

classify_numeric!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);

impl private::Sealed for bool {}
impl Classified for bool {
    const CATEGORY: Category = Category::Boolean;
}

impl private::Sealed for String {}
impl Classified for String {
    const CATEGORY: Category = Category::Text;
}

impl private::Sealed for str {}
impl Classified for str {
    const CATEGORY: Category = Category::Text;
}

impl private::Sealed for &str {}
impl Classified for &str {
    const CATEGORY: Category = Category::Text;
}

impl private::Sealed for Cow<'_, str> {}
impl Classified for Cow<'_, str> {
    const CATEGORY: Category = Category::Text;
}

impl private::Sealed for Quaternion {}
impl Classified for Quaternion {
    const CATEGORY: Category = Category::Quaternion;
}

impl<const R: usize, const C: usize> private::Sealed for SMatrix<f64, R, C> {}
impl<const R: usize, const C: usize> Classified for SMatrix<f64, R, C> {
    const CATEGORY: Category = Category::from_shape(R, C);
}

// ─── Storable primitives ────────────────────────────────────────────

/// A value type a parameter can hold.
///
/// Implemented for `i32`, `i64`, `f32`, `f64`, `bool`, `String`,
/// [`Vector3`], [`RowVector3`], [`Matrix3`] and [`Quaternion`].
pub trait Primitive: Classified + Clone + fmt::Debug + PartialEq + 'static {
    /// Short kind name used in diagnostics.
    const KIND: &'static str;

    /// The value a parameter reports when it holds nothing.
    fn default_value() -> Self;

    /// Element equality: relative tolerance for floating structured values,
    /// exact otherwise.
    fn approx_eq(&self, other: &Self) -> bool;

    /// Text rendering of a single value.
    fn render(&self) -> String;

    /// Convert to the runtime representation.
    fn to_value(&self) -> Value;

    /// Convert back from the runtime representation, `None` if the value is
    /// of another kind or out of range.
    fn from_value(value: &Value) -> Option<Self>;
}

/// Numeric scalars, the operand type of scalar broadcasting.
pub trait Scalar: Primitive + Copy + PartialOrd {
    /// Widen to `f64`.
    fn to_f64(self) -> f64;
}

macro_rules! primitive_integer {
    ($($t:ty => $kind:literal),* $(,)?) => {
        $(
            impl Primitive for $t {
                const KIND: &'static str = $kind;

                fn default_value() -> Self {
                    0
                }

                fn approx_eq(&self, other: &Self) -> bool {
                    self == other
                }

                fn render(&self) -> String {
                    self.to_string()
                }

                fn to_value(&self) -> Value {
                    Value::Integer(i64::from(*self))
                }

                fn from_value(value: &Value) -> Option<Self> {
                    match value {
                        Value::Integer(v) => <$t>::try_from(*v).ok(),
                        _ => None,
                    }
                }
            }

            impl Scalar for $t {
                fn to_f64(self) -> f64 {
                    self as f64
                }
            }
        )*
    };
}

primitive_integer!(i32 => "i32", i64 => "i64");

macro_rules! primitive_float {
    ($($t:ty => $kind:literal),* $(,)?) => {
        $(
            impl Primitive for $t {
                const KIND: &'static str = $kind;

                fn default_value() -> Self {
                    0.0
                }

                fn approx_eq(&self, other: &Self) -> bool {
                    self == other
                }

                fn render(&self) -> String {
                    self.to_string()
                }

                fn to_value(&self) -> Value {
                    Value::Real(f64::from(*self))
                }

                fn from_value(value: &Value) -> Option<Self> {
                    match value {
                        Value::Real(v) => Some(*v as $t),
                        _ => None,
                    }
                }
            }

            impl Scalar for $t {
                fn to_f64(self) -> f64 {
                    f64::from(self)
                }
            }
        )*
    };
}

primitive_float!(f32 => "f32", f64 => "f64");

impl Primitive for bool {
    const KIND: &'static str = "bool";

    fn default_value() -> Self {
        false
    }

    fn approx_eq(&self, other: &Self) -> bool {
        self == other
    }

    fn render(&self) -> String {
        self.to_string()
    }

    fn to_value(&self) -> Value {
        Value::Boolean(*self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }
}

impl Primitive for String {
    const KIND: &'static str = "text";

    fn default_value() -> Self {
        String::new()
    }

    fn approx_eq(&self, other: &Self) -> bool {
        self == other
    }

    fn render(&self) -> String {
        self.clone()
    }

    fn to_value(&self) -> Value {
        Value::Text(self.clone())
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Text(s) => Some(s.clone()),
            _ => None,
        }
    }
}

fn render_row<'a>(elements: impl Iterator<Item = &'a f64>) -> String {
    elements.map(f64::to_string).collect::<Vec<_>>().join(", ")
}

/// Column vector as `[x; y; z]`.
pub(crate) fn render_column(v: &Vector3) -> String {
    let parts: Vec<String> = v.iter().map(f64::to_string).collect();
    format!("[{}]", parts.join("; "))
}

/// Row vector as `[x, y, z]`.
pub(crate) fn render_row_vector(v: &RowVector3) -> String {
    format!("[{}]", render_row(v.iter()))
}

/// Matrix row by row, rows separated by `;`.
pub(crate) fn render_matrix(m: &Matrix3) -> String {
    let rows: Vec<String> = m.row_iter().map(|r| render_row(r.iter())).collect();
    format!("[{}]", rows.join("; "))
}

/// Quaternion as `w + xi + yj + zk`.
pub(crate) fn render_quaternion(q: &Quaternion) -> String {
    format!("{} + {}i + {}j + {}k", q.w, q.i, q.j, q.k)
}

impl Primitive for Vector3 {
    const KIND: &'static str = "vector3";

    fn default_value() -> Self {
        Vector3::zeros()
    }

    fn approx_eq(&self, other: &Self) -> bool {
        self.is_approx(other)
    }

    fn render(&self) -> String {
        render_column(self)
    }

    fn to_value(&self) -> Value {
        Value::ColumnVector(*self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::ColumnVector(v) => Some(*v),
            _ => None,
        }
    }
}

impl Primitive for RowVector3 {
    const KIND: &'static str = "row_vector3";

    fn default_value() -> Self {
        RowVector3::zeros()
    }

    fn approx_eq(&self, other: &Self) -> bool {
        self.is_approx(other)
    }

    fn render(&self) -> String {
        render_row_vector(self)
    }

    fn to_value(&self) -> Value {
        Value::RowVector(*self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::RowVector(v) => Some(*v),
            _ => None,
        }
    }
}

impl Primitive for Matrix3 {
    const KIND: &'static str = "matrix3";

    fn default_value() -> Self {
        Matrix3::zeros()
    }

    fn approx_eq(&self, other: &Self) -> bool {
        self.is_approx(other)
    }

    fn render(&self) -> String {
        render_matrix(self)
    }

    fn to_value(&self) -> Value {
        Value::Matrix(*self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Matrix(m) => Some(*m),
            _ => None,
        }
    }
}

impl Primitive for Quaternion {
    const KIND: &'static str = "quaternion";

    fn default_value() -> Self {
        Quaternion::identity()
    }

    fn approx_eq(&self, other: &Self) -> bool {
        self.is_approx(other)
    }

    fn render(&self) -> String {
        render_quaternion(self)
    }

    fn to_value(&self) -> Value {
        Value::Quaternion(*self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Quaternion(q) => Some(*q),
            _ => None,
        }
    }
}
