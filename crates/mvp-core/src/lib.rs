//! # mvp-core — Foundational Types for MethodVerse Parameters
//!
//! Defines the closed vocabulary every other crate dispatches on: the seven
//! value [`Category`]s, the fifteen [`OperationKind`]s, the storable
//! [`Primitive`] types and their runtime mirror [`Value`], and the error
//! hierarchy.
//!
//! ## Key Design Principles
//!
//! 1. **Closed category set.** `Category` and `OperationKind` are plain
//!    enums matched exhaustively everywhere. Adding a variant forces every
//!    consumer to handle it.
//!
//! 2. **Classification is static.** A type's category is an associated
//!    `const` of the sealed [`Classified`] trait. Unsupported types have no
//!    impl, so classifying them does not compile.
//!
//! 3. **Structured floating values compare approximately.** Vectors,
//!    matrices and quaternions use a relative tolerance
//!    ([`DEFAULT_PRECISION`]); scalars compare exactly.
//!
//! ## Crate Policy
//!
//! - Depends only on `mvp-units` internally.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod approx;
pub mod category;
pub mod error;
pub mod primitive;
pub mod value;

// Re-export primary types for ergonomic imports.
pub use approx::{ApproxEq, DEFAULT_PRECISION};
pub use category::{Category, OperationKind};
pub use error::{MvpError, ParameterError, PolicyError, RegistryError};
pub use primitive::{
    category_of, Classified, Matrix3, Primitive, Quaternion, RowVector3, Scalar, Vector3,
};
pub use value::{classify, Value};
