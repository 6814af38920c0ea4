//! # Check Subcommand
//!
//! Asks the policy table whether one operation is legal for the given
//! operand categories and units, and reports the result category and unit.
//!
//! ```bash
//! mvp check scalar multiply scalar --left-unit m --right-unit s
//! mvp check matrix3x3 invert --left-unit ms
//! mvp check text add boolean --json
//! ```
//!
//! Exits 0 when the operation is allowed and 1 when it is rejected.

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use mvp_core::{Category, OperationKind};
use mvp_policy::{resolve, PolicyEntry};
use mvp_units::Dimension;

/// Arguments for the check subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Category of the left (or only) operand.
    pub left: Category,

    /// The operation to check.
    pub operation: OperationKind,

    /// Category of the right operand. Omit for unary operations.
    pub right: Option<Category>,

    /// Unit expression of the left operand (e.g. "ms", "m/s", "kg*m^2").
    #[arg(long, default_value = "")]
    pub left_unit: String,

    /// Unit expression of the right operand. Defaults to the left unit.
    #[arg(long)]
    pub right_unit: Option<String>,

    /// Print the verdict as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Outcome of one check.
#[derive(Debug, Serialize)]
pub struct CheckReport {
    pub allowed: bool,
    pub operation: OperationKind,
    pub left: Category,
    pub right: Option<Category>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry: Option<PolicyEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

fn parse_unit(expr: &str) -> Result<Dimension> {
    mvp_units::si::parse(expr).with_context(|| format!("invalid unit expression {expr:?}"))
}

/// Resolve the operation without printing anything.
pub fn evaluate(args: &CheckArgs) -> Result<CheckReport> {
    let left_unit = parse_unit(&args.left_unit)?;
    let right_unit = args.right_unit.as_deref().map(parse_unit).transpose()?;

    let mut report = CheckReport {
        allowed: false,
        operation: args.operation,
        left: args.left,
        right: args.right,
        entry: None,
        unit: None,
        error: None,
    };
    match resolve(args.left, args.right, args.operation, left_unit, right_unit) {
        Ok(resolution) => {
            report.allowed = true;
            report.entry = Some(resolution.entry);
            report.unit = Some(resolution.unit.to_string());
        }
        Err(err) => report.error = Some(err.to_string()),
    }
    Ok(report)
}

/// Execute the check subcommand.
pub fn run_check(args: &CheckArgs) -> Result<u8> {
    let report = evaluate(args)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if let (Some(entry), Some(unit)) = (&report.entry, &report.unit) {
        println!("allowed: {}", crate::policy::format_entry(entry));
        println!("  result unit: {unit}");
    } else if let Some(error) = &report.error {
        println!("rejected: {error}");
    }
    Ok(if report.allowed { 0 } else { 1 })
}
