//! mdnotion CLI - publish Markdown files as Notion pages.
//!
//! Provides commands for:
//! - `sync`: Convert markdown files and upload them as new Notion pages
//! - `convert`: Print the Notion block JSON for a markdown file

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{ConvertArgs, SyncArgs};
use output::Output;

/// mdnotion - Markdown to Notion publisher.
#[derive(Parser)]
#[command(name = "mdnotion", version, about)]
struct Cli {
    /// Log progress at info level (otherwise RUST_LOG applies).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload markdown files as new Notion pages.
    Sync(SyncArgs),
    /// Print Notion block JSON for a markdown file.
    Convert(ConvertArgs),
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
        Commands::Sync(args) => args.execute(),
        Commands::Convert(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
