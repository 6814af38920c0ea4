//! # Typed Parameter — Compile-Time Checked Container
//!
//! [`TypedParameter<T, U>`] is a named, ordered sequence of primitive values
//! of type `T` in unit `U`. Its operators exist only where a static policy
//! does, and the result's primitive type and unit are the policy's:
//!
//! ```
//! use mvp_param::TypedParameter;
//! use mvp_units::{Metre, Second, Unit};
//!
//! let distance = TypedParameter::<f64, Metre>::from_value(10.0);
//! let time = TypedParameter::<f64, Second>::from_value(4.0);
//! let speed = (&distance / &time).unwrap();
//! assert_eq!(speed.value(), 2.5);
//! assert_eq!(speed.unit_symbol(), "m/s");
//! ```
//!
//! ## Unit checking
//!
//! The unit rule's precondition is evaluated in `const` context when the
//! operator is instantiated. Adding metres to seconds does not build:
//!
//! ```compile_fail
//! use mvp_param::TypedParameter;
//! use mvp_units::{Metre, Second};
//!
//! let a = TypedParameter::<f64, Metre>::from_value(1.0);
//! let b = TypedParameter::<f64, Second>::from_value(1.0);
//! let _ = &a + &b;
//! ```
//!
//! Neither does an operation with no policy:
//!
//! ```compile_fail
//! use mvp_param::TypedParameter;
//!
//! let a = TypedParameter::<String>::from_value("a".to_string());
//! let _ = &a * &a;
//! ```
//!
//! ## Broadcasting
//!
//! A single value combines with every element of the other operand; two
//! sequences of equal length combine pairwise. Other lengths fail with
//! [`ParameterError::ShapeMismatch`], an empty operand with
//! [`ParameterError::EmptyValue`].
//!
//! ## Bare scalar operands
//!
//! `+ - * /` also accept an `i32`, `i64`, `f32` or `f64` on either side. The
//! scalar counts as a single value: in the container's unit for `+` and `-`,
//! dimensionless for `*` and `/`.
//!
//! ```
//! use mvp_param::TypedParameter;
//! use mvp_units::Millisecond;
//!
//! let te = TypedParameter::<f64, Millisecond>::from_values(vec![10.0, 20.0]);
//! assert_eq!((&te + 1.0f64).unwrap().values(), &[11.0, 21.0]);
//! assert_eq!((2i32 * &te).unwrap().unit_symbol(), "ms");
//! assert_eq!((100.0f64 / &te).unwrap().unit_symbol(), "1/ms");
//! ```

use std::borrow::Cow;
use std::fmt;
use std::marker::PhantomData;
use std::ops::{Add, BitAnd, BitOr, BitXor, Div, Index, IndexMut, Mul, Not, Sub};

use mvp_core::{Category, ParameterError, Primitive};
use mvp_policy::{
    AddOp, AndOp, BinaryPolicy, BinaryUnitCheck, BinaryUnitRule, CrossOp, DivideOp, DotOp,
    ElementwiseDivideOp, ElementwiseMultiplyOp, InvertOp, MultiplyOp, NotOp, Operation, OrOp,
    SameUnitRule, SubtractOp, TransposeOp, UnaryPolicy, UnaryUnitCheck, UnaryUnitRule, XnorOp,
    XorOp,
};
use mvp_units::{Dimension, One, Unit};

use crate::broadcast::{broadcast, map_all};

/// Result of `TypedParameter<T, U> <Op> TypedParameter<T2, U2>`.
pub type BinaryResult<Op, T, U, T2, U2> = TypedParameter<
    <T as BinaryPolicy<Op, T2>>::Output,
    <<T as BinaryPolicy<Op, T2>>::Rule as BinaryUnitRule>::Output<U, U2>,
>;

/// Result of `<Op> TypedParameter<T, U>`.
pub type UnaryResult<Op, T, U> = TypedParameter<
    <T as UnaryPolicy<Op>>::Output,
    <<T as UnaryPolicy<Op>>::Rule as UnaryUnitRule>::Output<U>,
>;

/// A named, unit-tagged sequence of primitive values.
pub struct TypedParameter<T, U = One> {
    name: Cow<'static, str>,
    values: Vec<T>,
    unit: PhantomData<fn() -> U>,
}

impl<T: Primitive, U: Unit> TypedParameter<T, U> {
    /// An unnamed parameter holding no values.
    pub fn new() -> Self {
        Self::from_values(Vec::new())
    }

    /// A parameter holding one value.
    pub fn from_value(value: T) -> Self {
        Self::from_values(vec![value])
    }

    /// A parameter holding a sequence of values.
    pub fn from_values(values: Vec<T>) -> Self {
        Self {
            name: Cow::Borrowed(""),
            values,
            unit: PhantomData,
        }
    }

    /// Set the display name.
    pub fn named(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.name = name.into();
        self
    }

    /// Display name, empty for intermediate results.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of values held.
    pub fn size(&self) -> usize {
        self.values.len()
    }

    /// Whether no values are held.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn out_of_range(&self, index: usize) -> ParameterError {
        ParameterError::IndexOutOfRange {
            index,
            len: self.values.len(),
        }
    }

    /// Bounds-checked element access.
    pub fn get(&self, index: usize) -> Result<&T, ParameterError> {
        self.values.get(index).ok_or_else(|| self.out_of_range(index))
    }

    /// Bounds-checked mutable element access.
    pub fn get_mut(&mut self, index: usize) -> Result<&mut T, ParameterError> {
        let len = self.values.len();
        self.values
            .get_mut(index)
            .ok_or(ParameterError::IndexOutOfRange { index, len })
    }

    /// Bounds-checked element replacement.
    pub fn set_at(&mut self, index: usize, value: T) -> Result<(), ParameterError> {
        *self.get_mut(index)? = value;
        Ok(())
    }

    /// The first value, or the type's default when empty.
    pub fn value(&self) -> T {
        self.values.first().cloned().unwrap_or_else(T::default_value)
    }

    /// All values.
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Iterate over the values.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.values.iter()
    }

    /// Replace the contents with a single value.
    pub fn set(&mut self, value: T) {
        self.values.clear();
        self.values.push(value);
    }

    /// Replace the contents with a sequence.
    pub fn set_values(&mut self, values: Vec<T>) {
        self.values = values;
    }

    /// Append a value.
    pub fn push(&mut self, value: T) {
        self.values.push(value);
    }

    /// Truncate, or extend with default values, to `len` values.
    pub fn resize(&mut self, len: usize) {
        self.values.resize_with(len, T::default_value);
    }

    /// Remove every value.
    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// Symbol of the unit `U`.
    pub fn unit_symbol(&self) -> Cow<'static, str> {
        U::symbol()
    }

    /// Dimension of the unit `U`.
    pub fn dimension(&self) -> Dimension {
        U::DIMENSION
    }

    /// Category of `T`.
    pub fn category(&self) -> Category {
        T::CATEGORY
    }

    /// A single value rendered directly, otherwise `[a, b, c]`.
    pub fn value_as_string(&self) -> String {
        match self.values.as_slice() {
            [single] => single.render(),
            values => {
                let parts: Vec<String> = values.iter().map(Primitive::render).collect();
                format!("[{}]", parts.join(", "))
            }
        }
    }

    /// Reinterpret in another unit type of the same dimension, e.g. a
    /// `Product<Hertz, Second>` result as `One`. A dimension mismatch does not
    /// build.
    pub fn rebind<U2: Unit>(self) -> TypedParameter<T, U2> {
        let () = BinaryUnitCheck::<SameUnitRule, U, U2>::PASSED;
        TypedParameter {
            name: self.name,
            values: self.values,
            unit: PhantomData,
        }
    }

    /// Apply a binary policy element by element, broadcasting single values.
    pub fn apply_binary<Op, T2, U2>(
        &self,
        rhs: &TypedParameter<T2, U2>,
    ) -> Result<BinaryResult<Op, T, U, T2, U2>, ParameterError>
    where
        Op: Operation,
        T: BinaryPolicy<Op, T2>,
        T2: Primitive,
        U2: Unit,
    {
        let () = BinaryUnitCheck::<<T as BinaryPolicy<Op, T2>>::Rule, U, U2>::PASSED;
        let values = broadcast(
            Op::KIND,
            &self.values,
            &rhs.values,
            <T as BinaryPolicy<Op, T2>>::apply,
        )?;
        Ok(TypedParameter::from_values(values))
    }

    /// Apply a unary policy to every element.
    pub fn apply_unary<Op>(&self) -> Result<UnaryResult<Op, T, U>, ParameterError>
    where
        Op: Operation,
        T: UnaryPolicy<Op>,
    {
        let () = UnaryUnitCheck::<<T as UnaryPolicy<Op>>::Rule, U>::PASSED;
        let values = map_all(Op::KIND, &self.values, <T as UnaryPolicy<Op>>::apply)?;
        Ok(TypedParameter::from_values(values))
    }

    /// Logical equivalence.
    pub fn xnor<T2: Primitive, U2: Unit>(
        &self,
        rhs: &TypedParameter<T2, U2>,
    ) -> Result<BinaryResult<XnorOp, T, U, T2, U2>, ParameterError>
    where
        T: BinaryPolicy<XnorOp, T2>,
    {
        self.apply_binary::<XnorOp, T2, U2>(rhs)
    }

    /// Inner product.
    pub fn dot<T2: Primitive, U2: Unit>(
        &self,
        rhs: &TypedParameter<T2, U2>,
    ) -> Result<BinaryResult<DotOp, T, U, T2, U2>, ParameterError>
    where
        T: BinaryPolicy<DotOp, T2>,
    {
        self.apply_binary::<DotOp, T2, U2>(rhs)
    }

    /// Cross product.
    pub fn cross<T2: Primitive, U2: Unit>(
        &self,
        rhs: &TypedParameter<T2, U2>,
    ) -> Result<BinaryResult<CrossOp, T, U, T2, U2>, ParameterError>
    where
        T: BinaryPolicy<CrossOp, T2>,
    {
        self.apply_binary::<CrossOp, T2, U2>(rhs)
    }

    /// Coefficient-wise product.
    pub fn elementwise_mul<T2: Primitive, U2: Unit>(
        &self,
        rhs: &TypedParameter<T2, U2>,
    ) -> Result<BinaryResult<ElementwiseMultiplyOp, T, U, T2, U2>, ParameterError>
    where
        T: BinaryPolicy<ElementwiseMultiplyOp, T2>,
    {
        self.apply_binary::<ElementwiseMultiplyOp, T2, U2>(rhs)
    }

    /// Coefficient-wise quotient.
    pub fn elementwise_div<T2: Primitive, U2: Unit>(
        &self,
        rhs: &TypedParameter<T2, U2>,
    ) -> Result<BinaryResult<ElementwiseDivideOp, T, U, T2, U2>, ParameterError>
    where
        T: BinaryPolicy<ElementwiseDivideOp, T2>,
    {
        self.apply_binary::<ElementwiseDivideOp, T2, U2>(rhs)
    }

    /// Transpose every element. The unit is preserved.
    pub fn transpose(&self) -> Result<UnaryResult<TransposeOp, T, U>, ParameterError>
    where
        T: UnaryPolicy<TransposeOp>,
    {
        self.apply_unary::<TransposeOp>()
    }

    /// Invert every element. The unit becomes its reciprocal.
    pub fn inverse(&self) -> Result<UnaryResult<InvertOp, T, U>, ParameterError>
    where
        T: UnaryPolicy<InvertOp>,
    {
        self.apply_unary::<InvertOp>()
    }
}

macro_rules! binary_operator {
    ($($trait:ident, $method:ident => $op:ty;)*) => {
        $(
            impl<'a, 'b, T, U, T2, U2> $trait<&'b TypedParameter<T2, U2>> for &'a TypedParameter<T, U>
            where
                T: BinaryPolicy<$op, T2>,
                T2: Primitive,
                U: Unit,
                U2: Unit,
            {
                type Output = Result<BinaryResult<$op, T, U, T2, U2>, ParameterError>;

                fn $method(self, rhs: &'b TypedParameter<T2, U2>) -> Self::Output {
                    self.apply_binary::<$op, T2, U2>(rhs)
                }
            }
        )*
    };
}

binary_operator! {
    Add, add => AddOp;
    Sub, sub => SubtractOp;
    Mul, mul => MultiplyOp;
    Div, div => DivideOp;
    BitAnd, bitand => AndOp;
    BitOr, bitor => OrOp;
    BitXor, bitxor => XorOp;
}

macro_rules! scalar_operand {
    (@same_unit $raw:ty: $($trait:ident, $method:ident => $op:ty);*) => {
        $(
            impl<T, U> $trait<$raw> for &TypedParameter<T, U>
            where
                T: BinaryPolicy<$op, $raw>,
                U: Unit,
            {
                type Output = Result<BinaryResult<$op, T, U, $raw, U>, ParameterError>;

                fn $method(self, rhs: $raw) -> Self::Output {
                    self.apply_binary::<$op, $raw, U>(&TypedParameter::from_value(rhs))
                }
            }

            impl<'a, T, U> $trait<&'a TypedParameter<T, U>> for $raw
            where
                $raw: BinaryPolicy<$op, T>,
                T: Primitive,
                U: Unit,
            {
                type Output = Result<BinaryResult<$op, $raw, U, T, U>, ParameterError>;

                fn $method(self, rhs: &'a TypedParameter<T, U>) -> Self::Output {
                    TypedParameter::<$raw, U>::from_value(self).apply_binary::<$op, T, U>(rhs)
                }
            }
        )*
    };
    (@dimensionless $raw:ty: $($trait:ident, $method:ident => $op:ty);*) => {
        $(
            impl<T, U> $trait<$raw> for &TypedParameter<T, U>
            where
                T: BinaryPolicy<$op, $raw>,
                U: Unit,
            {
                type Output = Result<BinaryResult<$op, T, U, $raw, One>, ParameterError>;

                fn $method(self, rhs: $raw) -> Self::Output {
                    self.apply_binary::<$op, $raw, One>(&TypedParameter::from_value(rhs))
                }
            }

            impl<'a, T, U> $trait<&'a TypedParameter<T, U>> for $raw
            where
                $raw: BinaryPolicy<$op, T>,
                T: Primitive,
                U: Unit,
            {
                type Output = Result<BinaryResult<$op, $raw, One, T, U>, ParameterError>;

                fn $method(self, rhs: &'a TypedParameter<T, U>) -> Self::Output {
                    TypedParameter::<$raw, One>::from_value(self).apply_binary::<$op, T, U>(rhs)
                }
            }
        )*
    };
    ($($raw:ty),*) => {
        $(
            scalar_operand!(@same_unit $raw: Add, add => AddOp; Sub, sub => SubtractOp);
            scalar_operand!(@dimensionless $raw: Mul, mul => MultiplyOp; Div, div => DivideOp);
        )*
    };
}

scalar_operand!(i32, i64, f32, f64);

impl<T, U> Not for &TypedParameter<T, U>
where
    T: UnaryPolicy<NotOp>,
    U: Unit,
{
    type Output = Result<UnaryResult<NotOp, T, U>, ParameterError>;

    fn not(self) -> Self::Output {
        self.apply_unary::<NotOp>()
    }
}

// ─── Std trait impls ────────────────────────────────────────────────

impl<T: Primitive, U: Unit> Default for TypedParameter<T, U> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone, U> Clone for TypedParameter<T, U> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            values: self.values.clone(),
            unit: PhantomData,
        }
    }
}

impl<T: fmt::Debug, U: Unit> fmt::Debug for TypedParameter<T, U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypedParameter")
            .field("name", &self.name)
            .field("values", &self.values)
            .field("unit", &U::symbol())
            .finish()
    }
}

impl<T: Primitive, U: Unit> fmt::Display for TypedParameter<T, U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value_as_string())
    }
}

impl<T: Primitive, U: Unit, U2: Unit> PartialEq<TypedParameter<T, U2>> for TypedParameter<T, U> {
    /// Equal units and element-wise equal values. Names are not compared.
    fn eq(&self, other: &TypedParameter<T, U2>) -> bool {
        U::DIMENSION.same_as(&U2::DIMENSION)
            && self.values.len() == other.values.len()
            && self
                .values
                .iter()
                .zip(&other.values)
                .all(|(a, b)| a.approx_eq(b))
    }
}

impl<T: Primitive, U: Unit> Index<usize> for TypedParameter<T, U> {
    type Output = T;

    /// Panics when `index >= size()`, like slice indexing. Use
    /// [`TypedParameter::get`] for a checked read.
    fn index(&self, index: usize) -> &T {
        &self.values[index]
    }
}

impl<T: Primitive, U: Unit> IndexMut<usize> for TypedParameter<T, U> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.values[index]
    }
}

impl<T: Primitive, U: Unit> From<T> for TypedParameter<T, U> {
    fn from(value: T) -> Self {
        Self::from_value(value)
    }
}

impl<T: Primitive, U: Unit> From<Vec<T>> for TypedParameter<T, U> {
    fn from(values: Vec<T>) -> Self {
        Self::from_values(values)
    }
}

impl<T: Primitive, U: Unit, const N: usize> From<[T; N]> for TypedParameter<T, U> {
    fn from(values: [T; N]) -> Self {
        Self::from_values(values.into())
    }
}

impl<'a, T: Primitive, U: Unit> IntoIterator for &'a TypedParameter<T, U> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}
