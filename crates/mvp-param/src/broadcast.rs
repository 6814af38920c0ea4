//! Elementwise application over two value sequences.
//!
//! | left | right | result |
//! |------|-------|--------|
//! | 1 | n | n, left repeated |
//! | n | 1 | n, right repeated |
//! | n | n | n, pairwise |
//! | n | m ≠ n | [`ParameterError::ShapeMismatch`] |
//! | 0 | any | [`ParameterError::EmptyValue`] |
//! | any | 0 | [`ParameterError::EmptyValue`] |

use mvp_core::{OperationKind, ParameterError, PolicyError};

pub(crate) fn broadcast<A, B, O>(
    operation: OperationKind,
    lhs: &[A],
    rhs: &[B],
    mut f: impl FnMut(&A, &B) -> Result<O, PolicyError>,
) -> Result<Vec<O>, ParameterError> {
    let out: Result<Vec<O>, PolicyError> = match (lhs, rhs) {
        ([], _) | (_, []) => return Err(ParameterError::EmptyValue { operation }),
        ([a], _) => rhs.iter().map(|b| f(a, b)).collect(),
        (_, [b]) => lhs.iter().map(|a| f(a, b)).collect(),
        _ if lhs.len() == rhs.len() => lhs.iter().zip(rhs).map(|(a, b)| f(a, b)).collect(),
        _ => {
            return Err(ParameterError::ShapeMismatch {
                left: lhs.len(),
                right: rhs.len(),
            })
        }
    };
    Ok(out?)
}

pub(crate) fn map_all<T, O>(
    operation: OperationKind,
    values: &[T],
    f: impl FnMut(&T) -> Result<O, PolicyError>,
) -> Result<Vec<O>, ParameterError> {
    if values.is_empty() {
        return Err(ParameterError::EmptyValue { operation });
    }
    Ok(values.iter().map(f).collect::<Result<Vec<O>, PolicyError>>()?)
}
