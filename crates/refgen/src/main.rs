//! refgen CLI - Multi-SDK API reference generator.
//!
//! Provides commands for:
//! - `build`: Write the payload of every reference page as JSON
//! - `paths`: Print every path a static build generates
//! - `menu`: Print the sidebar of one library version

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{BuildArgs, MenuArgs, PathsArgs};
use output::Output;

/// refgen - Multi-SDK API reference generator.
#[derive(Parser)]
#[command(name = "refgen", version, about)]
struct Cli {
    /// Enable verbose output (show progress and timing logs).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build page payloads for every library version.
    Build(BuildArgs),
    /// Print the static paths as JSON.
    Paths(PathsArgs),
    /// Print the sidebar menu of a library version as JSON.
    Menu(MenuArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Build(args) => args.execute(),
        Commands::Paths(args) => args.execute(),
        Commands::Menu(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(format_args!("Error: {err}"));
        std::process::exit(1);
    }
}
