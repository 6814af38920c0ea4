//! # Unit Errors

use thiserror::Error;

/// Error while interpreting a unit expression.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UnitError {
    /// The symbol is not one of the predefined units.
    #[error("unknown unit symbol: {0:?}")]
    UnknownSymbol(String),

    /// A `^` exponent did not parse as a small integer.
    #[error("invalid unit exponent in {0:?}")]
    InvalidExponent(String),

    /// The expression has more than one `/`.
    #[error("malformed unit expression: {0:?}")]
    Malformed(String),
}
