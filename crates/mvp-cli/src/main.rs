//! # mvp CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use mvp_cli::check::{run_check, CheckArgs};
use mvp_cli::demo::{run_demo, DemoArgs};
use mvp_cli::policy::{run_policy, PolicyArgs};

/// Unit-aware parameter toolkit.
///
/// Inspects the operation policy table over value categories and units, and
/// demonstrates typed, runtime-checked and tagged parameters.
#[derive(Parser, Debug)]
#[command(name = "mvp", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the operation policy table.
    Policy(PolicyArgs),

    /// Check one operation against the policy table and unit rules.
    Check(CheckArgs),

    /// Build and print a sample protocol.
    Demo(DemoArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Without -v, RUST_LOG decides; -v counts override it.
    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    tracing::debug!("mvp CLI v{} starting", env!("CARGO_PKG_VERSION"));

    let result = match cli.command {
        Commands::Policy(args) => run_policy(&args),
        Commands::Check(args) => run_check(&args),
        Commands::Demo(args) => run_demo(&args),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
