//! # mvp-cli — Command-Line Front End
//!
//! Provides the `mvp` binary for inspecting the operation policy table and
//! exercising the parameter containers.
//!
//! ## Subcommands
//!
//! - `mvp policy`: List the enabled (operands, operation) combinations.
//! - `mvp check`: Ask whether one operation is legal for given categories
//!   and units, and what it yields.
//! - `mvp demo`: Build a sample protocol from declared parameter types.
//!
//! ```bash
//! mvp policy --operation dot
//! mvp check column_vector3 cross column_vector3 --left-unit mm
//! mvp -v demo --te 8 --te 16 --tr 40
//! ```
//!
//! Every handler returns the process exit code: 0 on success, 1 when a
//! check is rejected. Errors are logged and also exit with 1.

pub mod check;
pub mod demo;
pub mod policy;
