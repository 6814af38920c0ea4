//! # mvp-units — Dimensional Algebra for Typed Parameters
//!
//! Units are zero-sized marker types whose [`Dimension`] is an associated
//! `const`. Multiplying, dividing and inverting units happens in the type
//! system through [`Product`], [`Quotient`] and [`Inverse`]; comparing two
//! units is a `const fn`, so operator unit rules are checked while the
//! compiler resolves the operator.
//!
//! ## Crate Policy
//!
//! - No runtime state: every unit operation is a `const fn`.
//! - Equality is exact exponent-vector equality (scale included).
//! - Symbols are for display only; parsing accepts predefined symbols.

pub mod dimension;
pub mod error;
pub mod si;
pub mod unit;

pub use dimension::{BaseDimension, Dimension, BASE_COUNT};
pub use error::UnitError;
pub use si::{
    Ampere, Candela, Degree, Hertz, Kelvin, Kilogram, Metre, Microsecond, Millimetre,
    Millisecond, Millitesla, Mole, One, Second, Tesla,
};
pub use unit::{same_unit, Inverse, Product, Quotient, Unit};
