#![deny(missing_docs)]

//! # mvp-param — Unit-Aware Parameter Containers
//!
//! Three levels of checking over the same policy table:
//!
//! | Type | Values | Units | Illegal operation |
//! |------|--------|-------|-------------------|
//! | [`TypedParameter<T, U>`] | `Vec<T>` | type `U` | does not compile |
//! | [`DynTypedParameter`] | `Vec<Value>` | runtime [`Dimension`](mvp_units::Dimension) | `PolicyError` at call time |
//! | [`Parameter`] | one [`ParameterValue`] | none | not offered |
//!
//! The declaration macros ([`declare_parameter!`], [`register_parameter!`],
//! [`parameter_enum!`]) build named parameter types on top, and
//! [`ParameterContainer`] / [`TypeRegistry`] collect them behind the
//! object-safe [`AnyParameter`] interface.
//!
//! ## Crate Policy
//!
//! - Single-threaded. [`Parameter`] uses `Rc`/`Weak` for observers and is
//!   neither `Send` nor `Sync`.
//! - No `panic!()` or `.unwrap()` outside tests. `Index`/`IndexMut` on the
//!   typed container panic on out-of-range indices, like slices; the `get`
//!   family returns [`ParameterError::IndexOutOfRange`] instead.
//! - Every public item is documented; `missing_docs` is denied.

mod broadcast;
pub mod declare;
pub mod dynamic;
pub mod parameter;
pub mod registry;
pub mod typed;

pub use declare::{name_hash, DeclaredParameter};
pub use dynamic::DynTypedParameter;
pub use parameter::{
    EnumHolder, NotificationHandler, Observer, Parameter, ParameterEnum, ParameterKind,
    ParameterValue, TypeTag,
};
pub use registry::{AnyParameter, ParameterContainer, ParameterDescriptor, TypeRegistry};
pub use typed::{BinaryResult, TypedParameter, UnaryResult};

// Used by the declaration macros through `$crate`.
pub use mvp_core::{Category, ParameterError, RegistryError};
pub use mvp_units::Unit;
