//! `wakgear` command-line entry point.
mod commands;
mod config;
mod dirs;
mod logging;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use commands::{Decode, Encode, Solve};
use config::CliEnv;

/// Wakfu gear-set solver and build-code tools
#[derive(Parser)]
#[command(name = "wakgear")]
#[command(about = "Find high-mastery Wakfu gear sets and convert build codes", long_about = None)]
#[command(version)]
struct Cli {
    /// Also write logs to this file
    #[arg(long, global = true, value_name = "PATH")]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Search the catalog for the best gear sets
    Solve(Solve),

    /// Encode a compact build code
    Encode(Encode),

    /// Decode a compact or Wakforge build code
    Decode(Decode),
}

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let env = CliEnv::from_env();

    let log_file = cli.log_file.or_else(|| env.log_file.clone());
    let _guard = logging::setup_logging(log_file.as_deref())?;

    let result = match cli.command {
        Command::Solve(cmd) => cmd.execute(&env),
        Command::Encode(cmd) => cmd.execute(),
        Command::Decode(cmd) => cmd.execute(),
    };

    if let Err(err) = result {
        tracing::error!("{err:#}");
        // the worker guard does not run on process::exit
        drop(_guard);
        std::process::exit(1);
    }
    Ok(())
}
