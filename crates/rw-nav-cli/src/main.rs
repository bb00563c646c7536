//! RW navigation CLI.
//!
//! Provides commands for:
//! - `check`: Validate the navigation file against the documentation pages
//! - `show`: Print the normalized navigation or its reading order
//! - `watch`: Rebuild the navigation whenever its file changes

mod commands;
mod debouncer;
mod error;
mod output;
mod pages;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CheckArgs, ShowArgs, WatchArgs};
use output::Output;

/// RW navigation - sidebar and top bar configuration tools.
#[derive(Parser)]
#[command(name = "rw-nav", version, about)]
struct Cli {
    /// Enable verbose output (load and reload timing logs).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the navigation file and report every problem.
    Check(CheckArgs),
    /// Print the normalized navigation configuration.
    Show(ShowArgs),
    /// Watch the navigation file and rebuild it on change.
    Watch(WatchArgs),
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
        Commands::Check(args) => args.execute(),
        Commands::Show(args) => args.execute(),
        Commands::Watch(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
