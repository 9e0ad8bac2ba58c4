//! Remove the installed catalog
//!
//! Safety: Always prompts for confirmation before deletion.

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use std::io::{self, Write};

use crate::dirs;

/// Remove the installed catalog
#[derive(Parser, Debug)]
pub struct Clean {
    /// Remove the whole data directory, not just the catalog
    #[arg(long)]
    pub all: bool,

    /// Skip confirmation prompt (dangerous!)
    #[arg(short = 'y', long)]
    pub yes: bool,
}

impl Clean {
    pub fn execute(self) -> Result<()> {
        let target = if self.all {
            dirs::data_dir()
        } else {
            dirs::catalog_path()
        };

        if !target.exists() {
            println!("{}", style("Nothing to clean - path doesn't exist yet").dim());
            return Ok(());
        }

        println!("The following will be deleted:");
        println!("  {} {}", style("→").cyan(), style(target.display()).bold());
        println!();

        if !self.yes && !confirm()? {
            println!("{}", style("Cancelled").dim());
            return Ok(());
        }

        if target.is_dir() {
            std::fs::remove_dir_all(&target)
        } else {
            std::fs::remove_file(&target)
        }
        .with_context(|| format!("Failed to delete: {}", target.display()))?;

        println!("{}", style("✓ Cleanup complete!").green().bold());
        Ok(())
    }
}

/// Prompt user for confirmation
fn confirm() -> Result<bool> {
    print!("{} ", style("Proceed? [y/N]").yellow().bold());
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    let input = input.trim().to_lowercase();
    Ok(input == "y" || input == "yes")
}
