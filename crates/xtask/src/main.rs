//! Development tasks for wakgear
//!
//! This binary provides development utilities using the cargo-xtask pattern.
//! Run with: `cargo xtask <command>`

mod commands;
mod dirs;

use anyhow::Result;
use clap::Parser;
use commands::{Clean, InspectCatalog, InspectCode, PackCatalog};

/// Development tasks for wakgear
#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Development tools for wakgear", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Convert a raw item export into a catalog bundle
    PackCatalog(PackCatalog),

    /// Summarize a catalog bundle or raw export
    InspectCatalog(InspectCatalog),

    /// Dump the layers of a build code
    InspectCode(InspectCode),

    /// Remove the installed catalog
    Clean(Clean),
}

fn main() -> Result<()> {
    // Load .env file if it exists (for WAKGEAR_CATALOG)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    match cli.command {
        Command::PackCatalog(cmd) => cmd.execute(),
        Command::InspectCatalog(cmd) => cmd.execute(),
        Command::InspectCode(cmd) => cmd.execute(),
        Command::Clean(cmd) => cmd.execute(),
    }
}
