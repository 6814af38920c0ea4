//! # Runtime Evaluation
//!
//! [`evaluate`] computes an operation on runtime [`Value`]s. It consults
//! [`lookup`] first, then delegates to the static policy impl for the
//! operands' primitive types, so both paths share one computation.
//!
//! Runtime scalars are `i64` or `f64`: two integers use the integer policy,
//! any other scalar combination is widened to `f64`. Integer scalars
//! combined with structured values are widened the same way.

use mvp_core::{
    Matrix3, OperationKind, PolicyError, Primitive, Quaternion, RowVector3, Value, Vector3,
};

use crate::op::{
    AddOp, AndOp, CrossOp, DivideOp, DotOp, ElementwiseDivideOp, ElementwiseMultiplyOp,
    InvertOp, MultiplyOp, NotOp, Operation, OrOp, SubtractOp, TransposeOp, XnorOp, XorOp,
};
use crate::policy::{BinaryPolicy, UnaryPolicy};
use crate::table::lookup;

fn binary<Op, L, R>(lhs: &L, rhs: &R) -> Result<Value, PolicyError>
where
    Op: Operation,
    L: BinaryPolicy<Op, R>,
    R: Primitive,
{
    L::apply(lhs, rhs).map(|out| out.to_value())
}

fn unary<Op, T>(value: &T) -> Result<Value, PolicyError>
where
    Op: Operation,
    T: UnaryPolicy<Op>,
{
    T::apply(value).map(|out| out.to_value())
}

fn is_scalar(value: &Value) -> bool {
    matches!(value, Value::Integer(_) | Value::Real(_))
}

/// Scalar ⊕ scalar and scalar ⊕ structured, for the four arithmetic
/// operations.
fn arithmetic<Op>(lhs: &Value, rhs: &Value) -> Option<Result<Value, PolicyError>>
where
    Op: Operation,
    i64: BinaryPolicy<Op>,
    f64: BinaryPolicy<Op>
        + BinaryPolicy<Op, Vector3>
        + BinaryPolicy<Op, RowVector3>
        + BinaryPolicy<Op, Matrix3>,
    Vector3: BinaryPolicy<Op, f64>,
    RowVector3: BinaryPolicy<Op, f64>,
    Matrix3: BinaryPolicy<Op, f64>,
{
    use Value as V;
    let result = match (lhs, rhs) {
        (V::Integer(a), V::Integer(b)) => binary::<Op, i64, i64>(a, b),
        (a, b) if is_scalar(a) && is_scalar(b) => {
            binary::<Op, f64, f64>(&a.as_f64()?, &b.as_f64()?)
        }
        (s, V::ColumnVector(m)) => binary::<Op, f64, Vector3>(&s.as_f64()?, m),
        (s, V::RowVector(m)) => binary::<Op, f64, RowVector3>(&s.as_f64()?, m),
        (s, V::Matrix(m)) => binary::<Op, f64, Matrix3>(&s.as_f64()?, m),
        (V::ColumnVector(m), s) => binary::<Op, Vector3, f64>(m, &s.as_f64()?),
        (V::RowVector(m), s) => binary::<Op, RowVector3, f64>(m, &s.as_f64()?),
        (V::Matrix(m), s) => binary::<Op, Matrix3, f64>(m, &s.as_f64()?),
        _ => return None,
    };
    Some(result)
}

/// Vector/matrix ⊕ the same shape.
fn same_shape<Op>(lhs: &Value, rhs: &Value) -> Option<Result<Value, PolicyError>>
where
    Op: Operation,
    Vector3: BinaryPolicy<Op>,
    RowVector3: BinaryPolicy<Op>,
    Matrix3: BinaryPolicy<Op>,
{
    use Value as V;
    match (lhs, rhs) {
        (V::ColumnVector(a), V::ColumnVector(b)) => Some(binary::<Op, Vector3, Vector3>(a, b)),
        (V::RowVector(a), V::RowVector(b)) => Some(binary::<Op, RowVector3, RowVector3>(a, b)),
        (V::Matrix(a), V::Matrix(b)) => Some(binary::<Op, Matrix3, Matrix3>(a, b)),
        _ => None,
    }
}

/// Boolean connectives.
fn connective<Op>(lhs: &Value, rhs: &Value) -> Option<Result<Value, PolicyError>>
where
    Op: Operation,
    bool: BinaryPolicy<Op>,
{
    match (lhs, rhs) {
        (Value::Boolean(a), Value::Boolean(b)) => Some(binary::<Op, bool, bool>(a, b)),
        _ => None,
    }
}

/// Dot and cross products between like-oriented vectors.
fn vector_product<Op>(lhs: &Value, rhs: &Value) -> Option<Result<Value, PolicyError>>
where
    Op: Operation,
    Vector3: BinaryPolicy<Op>,
    RowVector3: BinaryPolicy<Op>,
{
    use Value as V;
    match (lhs, rhs) {
        (V::ColumnVector(a), V::ColumnVector(b)) => Some(binary::<Op, Vector3, Vector3>(a, b)),
        (V::RowVector(a), V::RowVector(b)) => Some(binary::<Op, RowVector3, RowVector3>(a, b)),
        _ => None,
    }
}

fn evaluate_binary(
    operation: OperationKind,
    lhs: &Value,
    rhs: &Value,
) -> Option<Result<Value, PolicyError>> {
    use Value as V;
    match operation {
        OperationKind::Add => arithmetic::<AddOp>(lhs, rhs)
            .or_else(|| same_shape::<AddOp>(lhs, rhs))
            .or_else(|| match (lhs, rhs) {
                (V::Quaternion(a), V::Quaternion(b)) => {
                    Some(binary::<AddOp, Quaternion, Quaternion>(a, b))
                }
                (V::Text(a), V::Text(b)) => Some(binary::<AddOp, String, String>(a, b)),
                _ => None,
            }),
        OperationKind::Subtract => arithmetic::<SubtractOp>(lhs, rhs)
            .or_else(|| same_shape::<SubtractOp>(lhs, rhs))
            .or_else(|| match (lhs, rhs) {
                (V::Quaternion(a), V::Quaternion(b)) => {
                    Some(binary::<SubtractOp, Quaternion, Quaternion>(a, b))
                }
                _ => None,
            }),
        OperationKind::Multiply => {
            if let (V::Quaternion(q), s) | (s, V::Quaternion(q)) = (lhs, rhs) {
                if is_scalar(s) {
                    return Some(binary::<MultiplyOp, Quaternion, f64>(q, &s.as_f64()?));
                }
            }
            arithmetic::<MultiplyOp>(lhs, rhs).or_else(|| {
                Some(match (lhs, rhs) {
                    (V::RowVector(a), V::ColumnVector(b)) => {
                        binary::<MultiplyOp, RowVector3, Vector3>(a, b)
                    }
                    (V::ColumnVector(a), V::RowVector(b)) => {
                        binary::<MultiplyOp, Vector3, RowVector3>(a, b)
                    }
                    (V::Matrix(a), V::Matrix(b)) => binary::<MultiplyOp, Matrix3, Matrix3>(a, b),
                    (V::Matrix(a), V::ColumnVector(b)) => {
                        binary::<MultiplyOp, Matrix3, Vector3>(a, b)
                    }
                    (V::RowVector(a), V::Matrix(b)) => {
                        binary::<MultiplyOp, RowVector3, Matrix3>(a, b)
                    }
                    (V::Quaternion(a), V::Quaternion(b)) => {
                        binary::<MultiplyOp, Quaternion, Quaternion>(a, b)
                    }
                    _ => return None,
                })
            })
        }
        OperationKind::Divide => {
            if let (V::Quaternion(q), s) = (lhs, rhs) {
                if is_scalar(s) {
                    return Some(binary::<DivideOp, Quaternion, f64>(q, &s.as_f64()?));
                }
            }
            arithmetic::<DivideOp>(lhs, rhs).or_else(|| {
                Some(match (lhs, rhs) {
                    (V::Matrix(a), V::Matrix(b)) => binary::<DivideOp, Matrix3, Matrix3>(a, b),
                    (V::RowVector(a), V::Matrix(b)) => {
                        binary::<DivideOp, RowVector3, Matrix3>(a, b)
                    }
                    (V::Quaternion(a), V::Quaternion(b)) => {
                        binary::<DivideOp, Quaternion, Quaternion>(a, b)
                    }
                    _ => return None,
                })
            })
        }
        OperationKind::And => connective::<AndOp>(lhs, rhs),
        OperationKind::Or => connective::<OrOp>(lhs, rhs),
        OperationKind::Xor => connective::<XorOp>(lhs, rhs),
        OperationKind::Xnor => connective::<XnorOp>(lhs, rhs),
        OperationKind::Dot => vector_product::<DotOp>(lhs, rhs),
        OperationKind::Cross => vector_product::<CrossOp>(lhs, rhs),
        OperationKind::ElementwiseMultiply => same_shape::<ElementwiseMultiplyOp>(lhs, rhs),
        OperationKind::ElementwiseDivide => same_shape::<ElementwiseDivideOp>(lhs, rhs),
        OperationKind::Not | OperationKind::Transpose | OperationKind::Invert => None,
    }
}

fn evaluate_unary(operation: OperationKind, value: &Value) -> Option<Result<Value, PolicyError>> {
    use Value as V;
    Some(match (operation, value) {
        (OperationKind::Not, V::Boolean(b)) => unary::<NotOp, bool>(b),
        (OperationKind::Transpose, V::ColumnVector(v)) => unary::<TransposeOp, Vector3>(v),
        (OperationKind::Transpose, V::RowVector(v)) => unary::<TransposeOp, RowVector3>(v),
        (OperationKind::Transpose, V::Matrix(m)) => unary::<TransposeOp, Matrix3>(m),
        (OperationKind::Invert, V::Matrix(m)) => unary::<InvertOp, Matrix3>(m),
        _ => return None,
    })
}

/// Compute `lhs <operation> rhs`, or `<operation> lhs` when `rhs` is `None`.
///
/// Fails with [`PolicyError::Unavailable`] when no policy enables the
/// operand categories, and with the policy's own error
/// ([`PolicyError::DivisionByZero`], [`PolicyError::SingularOperand`])
/// when the computation has no result. Units are not consulted; use
/// [`resolve`](crate::resolve) for that.
pub fn evaluate(
    operation: OperationKind,
    lhs: &Value,
    rhs: Option<&Value>,
) -> Result<Value, PolicyError> {
    let left = lhs.category();
    let right = rhs.map(Value::category);
    if lookup(left, right, operation).is_none() {
        tracing::debug!(%operation, %left, right = ?right, "no policy for operands");
        return Err(PolicyError::Unavailable {
            operation,
            left,
            right,
        });
    }
    let outcome = match rhs {
        Some(rhs) => evaluate_binary(operation, lhs, rhs),
        None => evaluate_unary(operation, lhs),
    };
    outcome.unwrap_or_else(|| {
        Err(PolicyError::ShapeMismatch {
            operation,
            detail: format!("no evaluator for {} and {:?}", lhs.kind(), rhs.map(Value::kind)),
        })
    })
}
