//! # Runtime-Checked Parameter
//!
//! [`DynTypedParameter`] holds [`Value`]s whose category and unit are known
//! only at runtime, e.g. parameters read from a protocol file or built by a
//! command line. Every operation resolves the operand categories against the
//! policy table and checks the unit rule before any element is computed.
//! The failures the typed container reports at compile time surface here as
//! [`PolicyError::Unavailable`](mvp_core::PolicyError::Unavailable) and
//! [`PolicyError::UnitMismatch`](mvp_core::PolicyError::UnitMismatch).

use std::borrow::Cow;
use std::fmt;

use mvp_core::{classify, Category, OperationKind, ParameterError, Primitive, Value};
use mvp_policy::{evaluate, resolve};
use mvp_units::{Dimension, Unit};

use crate::broadcast::{broadcast, map_all};
use crate::typed::TypedParameter;

/// A named sequence of runtime values sharing one category and one unit.
#[derive(Debug, Clone)]
pub struct DynTypedParameter {
    name: Cow<'static, str>,
    unit: Dimension,
    category: Category,
    values: Vec<Value>,
}

impl DynTypedParameter {
    /// An empty parameter of the given category and unit.
    pub fn new(category: Category, unit: Dimension) -> Self {
        Self {
            name: Cow::Borrowed(""),
            unit,
            category,
            values: Vec::new(),
        }
    }

    /// Classify `values` and wrap them.
    ///
    /// Fails with [`ParameterError::Classification`] when the values mix
    /// categories or when there are none to classify.
    pub fn from_values(values: Vec<Value>, unit: Dimension) -> Result<Self, ParameterError> {
        let category = classify(&values)?.ok_or_else(|| {
            ParameterError::Classification("no values to classify".to_string())
        })?;
        Ok(Self {
            name: Cow::Borrowed(""),
            unit,
            category,
            values,
        })
    }

    /// Set the display name.
    pub fn named(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.name = name.into();
        self
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Unit dimension.
    pub fn unit(&self) -> Dimension {
        self.unit
    }

    /// Category shared by every value.
    pub fn category(&self) -> Category {
        self.category
    }

    /// All values.
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Number of values held.
    pub fn size(&self) -> usize {
        self.values.len()
    }

    /// Whether no values are held.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Bounds-checked element access.
    pub fn get(&self, index: usize) -> Result<&Value, ParameterError> {
        self.values.get(index).ok_or(ParameterError::IndexOutOfRange {
            index,
            len: self.values.len(),
        })
    }

    /// Append a value of this parameter's category.
    pub fn push(&mut self, value: Value) -> Result<(), ParameterError> {
        if value.category() != self.category {
            return Err(ParameterError::Classification(format!(
                "cannot add {} value to {} parameter",
                value.category(),
                self.category
            )));
        }
        self.values.push(value);
        Ok(())
    }

    /// The first value, or the category default when empty.
    pub fn value(&self) -> Value {
        self.values
            .first()
            .cloned()
            .unwrap_or_else(|| Value::default_for(self.category))
    }

    /// A single value rendered directly, otherwise `[a, b, c]`.
    pub fn value_as_string(&self) -> String {
        match self.values.as_slice() {
            [single] => single.to_string(),
            values => {
                let parts: Vec<String> = values.iter().map(Value::to_string).collect();
                format!("[{}]", parts.join(", "))
            }
        }
    }

    /// Apply `operation` with an optional right operand.
    ///
    /// The categories and units are resolved first; values are only
    /// computed once the policy and unit rule admit the operands.
    pub fn apply(
        &self,
        operation: OperationKind,
        rhs: Option<&Self>,
    ) -> Result<Self, ParameterError> {
        let resolution = resolve(
            self.category,
            rhs.map(|r| r.category),
            operation,
            self.unit,
            rhs.map(|r| r.unit),
        )?;
        let values = match rhs {
            Some(rhs) => broadcast(operation, &self.values, &rhs.values, |a, b| {
                evaluate(operation, a, Some(b))
            })?,
            None => map_all(operation, &self.values, |a| evaluate(operation, a, None))?,
        };
        Ok(Self {
            name: Cow::Borrowed(""),
            unit: resolution.unit,
            category: resolution.entry.result,
            values,
        })
    }

    fn binary(&self, operation: OperationKind, rhs: &Self) -> Result<Self, ParameterError> {
        self.apply(operation, Some(rhs))
    }

    /// `self + rhs`.
    pub fn add(&self, rhs: &Self) -> Result<Self, ParameterError> {
        self.binary(OperationKind::Add, rhs)
    }

    /// `self - rhs`.
    pub fn sub(&self, rhs: &Self) -> Result<Self, ParameterError> {
        self.binary(OperationKind::Subtract, rhs)
    }

    /// `self * rhs`.
    pub fn mul(&self, rhs: &Self) -> Result<Self, ParameterError> {
        self.binary(OperationKind::Multiply, rhs)
    }

    /// `self / rhs`.
    pub fn div(&self, rhs: &Self) -> Result<Self, ParameterError> {
        self.binary(OperationKind::Divide, rhs)
    }

    /// Inner product.
    pub fn dot(&self, rhs: &Self) -> Result<Self, ParameterError> {
        self.binary(OperationKind::Dot, rhs)
    }

    /// Cross product.
    pub fn cross(&self, rhs: &Self) -> Result<Self, ParameterError> {
        self.binary(OperationKind::Cross, rhs)
    }

    /// Transpose every element.
    pub fn transpose(&self) -> Result<Self, ParameterError> {
        self.apply(OperationKind::Transpose, None)
    }

    /// Invert every element.
    pub fn inverse(&self) -> Result<Self, ParameterError> {
        self.apply(OperationKind::Invert, None)
    }
}

impl PartialEq for DynTypedParameter {
    fn eq(&self, other: &Self) -> bool {
        self.unit.same_as(&other.unit)
            && self.category == other.category
            && self.values.len() == other.values.len()
            && self
                .values
                .iter()
                .zip(&other.values)
                .all(|(a, b)| a.approx_eq(b))
    }
}

impl fmt::Display for DynTypedParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value_as_string())
    }
}

impl<T: Primitive, U: Unit> From<&TypedParameter<T, U>> for DynTypedParameter {
    fn from(typed: &TypedParameter<T, U>) -> Self {
        Self {
            name: Cow::Owned(typed.name().to_string()),
            unit: U::DIMENSION,
            category: T::CATEGORY,
            values: typed.iter().map(Primitive::to_value).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mvp_core::{Matrix3, PolicyError, RowVector3, Vector3};
    use mvp_units::{Metre, Millisecond, One, Second};

    fn scalars(values: &[f64], unit: Dimension) -> DynTypedParameter {
        DynTypedParameter::from_values(values.iter().copied().map(Value::Real).collect(), unit)
            .unwrap()
    }

    #[test]
    fn mixed_categories_fail_to_classify() {
        let err = DynTypedParameter::from_values(
            vec![Value::Real(1.0), Value::Boolean(true)],
            One::DIMENSION,
        )
        .unwrap_err();
        assert!(matches!(err, ParameterError::Classification(_)));
        assert!(DynTypedParameter::from_values(Vec::new(), One::DIMENSION).is_err());
    }

    #[test]
    fn push_checks_category() {
        let mut p = DynTypedParameter::new(Category::Boolean, One::DIMENSION);
        p.push(Value::Boolean(true)).unwrap();
        assert!(p.push(Value::Integer(1)).is_err());
        assert_eq!(p.size(), 1);
    }

    #[test]
    fn unit_mismatch_is_reported_before_computing() {
        let s = scalars(&[1.0], Second::DIMENSION);
        let m = scalars(&[1.0], Metre::DIMENSION);
        assert!(matches!(
            s.add(&m),
            Err(ParameterError::Policy(PolicyError::UnitMismatch {
                operation: OperationKind::Add,
                ..
            }))
        ));
        assert_eq!(s.mul(&m).unwrap().unit(), Second::DIMENSION.mul(&Metre::DIMENSION));
    }

    #[test]
    fn unavailable_operation_names_both_categories() {
        let text = DynTypedParameter::from_values(vec![Value::from("a")], One::DIMENSION).unwrap();
        let err = text.mul(&text).unwrap_err();
        assert_eq!(
            err,
            ParameterError::Policy(PolicyError::Unavailable {
                operation: OperationKind::Multiply,
                left: Category::Text,
                right: Some(Category::Text),
            })
        );
    }

    #[test]
    fn same_unit_arithmetic_broadcasts() {
        let a = scalars(&[1.0, 2.0, 3.0], Millisecond::DIMENSION);
        let b = scalars(&[10.0], Millisecond::DIMENSION);
        let sum = a.add(&b).unwrap();
        assert_eq!(sum.value_as_string(), "[11, 12, 13]");
        assert_eq!(sum.unit(), Millisecond::DIMENSION);
        assert_eq!(
            a.add(&scalars(&[1.0, 2.0], Millisecond::DIMENSION)).unwrap_err(),
            ParameterError::ShapeMismatch { left: 3, right: 2 }
        );
    }

    #[test]
    fn vector_products_change_category() {
        let row = DynTypedParameter::from_values(
            vec![Value::RowVector(RowVector3::new(1.0, 2.0, 3.0))],
            Metre::DIMENSION,
        )
        .unwrap();
        let col = row.transpose().unwrap();
        assert_eq!(col.category(), Category::ColumnVector3);
        assert_eq!(row.mul(&col).unwrap().category(), Category::Scalar);
        assert_eq!(col.mul(&row).unwrap().category(), Category::Matrix3x3);
        assert_eq!(row.dot(&row).unwrap().value(), Value::Real(14.0));
        assert_eq!(col.cross(&col).unwrap().value(), Value::ColumnVector(Vector3::zeros()));
    }

    #[test]
    fn inverse_has_reciprocal_unit() {
        let m = DynTypedParameter::from_values(
            vec![Value::Matrix(Matrix3::from_diagonal_element(2.0))],
            Second::DIMENSION,
        )
        .unwrap();
        let inv = m.inverse().unwrap();
        assert_eq!(inv.unit(), Second::DIMENSION.recip());
        assert_eq!(inv.value(), Value::Matrix(Matrix3::from_diagonal_element(0.5)));
        assert!(m.mul(&inv).unwrap().unit().is_dimensionless());
    }

    #[test]
    fn mirrors_a_typed_parameter() {
        let typed = TypedParameter::<f64, Metre>::from_values(vec![1.0, 2.0]).named("Offset");
        let dynamic = DynTypedParameter::from(&typed);
        assert_eq!(dynamic.name(), "Offset");
        assert_eq!(dynamic.category(), Category::Scalar);
        assert_eq!(dynamic.unit(), Metre::DIMENSION);
        assert_eq!(dynamic.value_as_string(), typed.value_as_string());
    }

    #[test]
    fn empty_value_defaults_to_category_default() {
        let p = DynTypedParameter::new(Category::Quaternion, One::DIMENSION);
        assert_eq!(p.value().to_string(), "1 + 0i + 0j + 0k");
        assert_eq!(p.value_as_string(), "[]");
        assert!(matches!(
            p.transpose(),
            Err(ParameterError::Policy(PolicyError::Unavailable { .. }))
        ));
    }
}
