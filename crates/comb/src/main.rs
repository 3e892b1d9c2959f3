//! comb CLI - documentation navigation.
//!
//! Provides commands for:
//! - `check`: Validate every sidebar against the docs directory
//! - `manifest`: Write the navigation manifest as JSON

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CheckArgs, ManifestArgs};
use output::Output;

/// comb - documentation navigation.
#[derive(Parser)]
#[command(name = "comb", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate sidebars against the docs directory.
    Check(CheckArgs),
    /// Build navigation and write the manifest as JSON.
    Manifest(ManifestArgs),
}

impl Commands {
    fn verbose(&self) -> bool {
        match self {
            Self::Check(args) => args.site.verbose,
            Self::Manifest(args) => args.site.verbose,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables DEBUG level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.command.verbose() {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Check(args) => args.execute(),
        Commands::Manifest(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
