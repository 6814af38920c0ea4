//! # Policy Subcommand
//!
//! Lists every enabled entry of the operation policy table.
//!
//! ```bash
//! mvp policy
//! mvp policy --operation cross
//! mvp policy --json
//! ```

use anyhow::Result;
use clap::Args;

use mvp_core::OperationKind;
use mvp_policy::{entries, PolicyEntry};

/// Arguments for the policy subcommand.
#[derive(Args, Debug)]
pub struct PolicyArgs {
    /// Only list entries for this operation (e.g. add, dot, invert).
    #[arg(long)]
    pub operation: Option<OperationKind>,

    /// Print the entries as a JSON array.
    #[arg(long)]
    pub json: bool,
}

/// Entries matching the optional operation filter, in table order.
pub fn select(operation: Option<OperationKind>) -> Vec<PolicyEntry> {
    entries()
        .into_iter()
        .filter(|e| operation.map_or(true, |op| e.operation == op))
        .collect()
}

/// One table row: `left op right -> result (rule)`.
pub fn format_entry(entry: &PolicyEntry) -> String {
    let operands = match entry.right {
        Some(right) => format!("{} {} {}", entry.left, entry.operation, right),
        None => format!("{} {}", entry.operation, entry.left),
    };
    format!(
        "{operands:<48} -> {:<14} ({})",
        entry.result.as_str(),
        entry.unit_rule
    )
}

/// Execute the policy subcommand.
pub fn run_policy(args: &PolicyArgs) -> Result<u8> {
    let selected = select(args.operation);
    tracing::debug!(count = selected.len(), "selected policy entries");
    if args.json {
        println!("{}", serde_json::to_string_pretty(&selected)?);
    } else {
        for entry in &selected {
            println!("{}", format_entry(entry));
        }
        println!();
        println!("{} entries", selected.len());
    }
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mvp_core::Category;

    #[test]
    fn unfiltered_selection_is_the_whole_table() {
        assert_eq!(select(None), entries());
    }

    #[test]
    fn filter_by_operation() {
        let cross = select(Some(OperationKind::Cross));
        assert_eq!(cross.len(), 2);
        assert!(cross.iter().all(|e| e.operation == OperationKind::Cross));
    }

    #[test]
    fn rows_show_operands_result_and_rule() {
        let invert = select(Some(OperationKind::Invert));
        assert_eq!(invert.len(), 1);
        let row = format_entry(&invert[0]);
        assert!(row.starts_with("invert matrix3x3"));
        assert!(row.contains("-> matrix3x3"));
        assert!(row.ends_with("(reciprocal)"));

        let dot = select(Some(OperationKind::Dot))
            .into_iter()
            .find(|e| e.left == Category::RowVector3)
            .unwrap();
        assert!(format_entry(&dot).starts_with("row_vector3 dot row_vector3"));
    }
}
