//! # mvp-policy — Operation Policy Table
//!
//! Decides, for every pair of value categories and every operation, whether
//! the operation is legal, what category the result has, and how the result
//! unit derives from the operand units.
//!
//! The matrix exists twice, and the two forms agree:
//!
//! - **Static.** [`BinaryPolicy`] and [`UnaryPolicy`] impls on primitive
//!   types, keyed by an operation marker ([`AddOp`], [`DotOp`], ...). The
//!   typed parameter container exposes an operator only where an impl
//!   exists, so an illegal operation does not compile.
//! - **Runtime.** [`lookup`], [`resolve`] and [`evaluate`] over
//!   [`Category`](mvp_core::Category) and [`Value`](mvp_core::Value), for
//!   containers whose shapes and units are known only at runtime.
//!
//! ## Crate Policy
//!
//! - Every operation on runtime values consults [`lookup`] before computing.
//! - Rejections are logged at `debug` level with the operation and operand
//!   categories.
//! - No `panic!()` or `.unwrap()` outside tests. Integer division by zero and
//!   singular divisors are errors, never panics.

pub mod eval;
pub mod op;
pub mod policy;
pub mod rule;
pub mod table;

// Impl-only modules: the static policy matrix, grouped by operand family.
mod linalg;
mod logical;
mod quaternion;
mod scalar;

pub use eval::evaluate;
pub use op::{
    AddOp, AndOp, CrossOp, DivideOp, DotOp, ElementwiseDivideOp, ElementwiseMultiplyOp,
    InvertOp, MultiplyOp, NotOp, Operation, OrOp, SubtractOp, TransposeOp, XnorOp, XorOp,
};
pub use policy::{binary_entry, unary_entry, BinaryPolicy, UnaryPolicy};
pub use rule::{
    BinaryUnitCheck, BinaryUnitRule, DimensionlessRule, PreserveRule, ProductRule, QuotientRule,
    ReciprocalRule, SameUnitRule, UnaryUnitCheck, UnaryUnitRule, UnitRule,
};
pub use table::{entries, lookup, resolve, unit_rule, PolicyEntry, Resolution};
