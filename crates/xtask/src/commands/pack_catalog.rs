//! Pack a raw item export into a catalog bundle
//!
//! The raw export is the game's `items.json` (optionally gzipped). Packing
//! parses it once, derives every stat, and writes the compact bundle the
//! solver loads at startup.

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use gear_content::{CatalogFormat, CatalogLoader};
use std::path::PathBuf;

use crate::dirs;

/// Convert a raw item export into a catalog bundle
#[derive(Parser, Debug)]
pub struct PackCatalog {
    /// Raw export (`items.json` or `items.json.gz`)
    #[arg(value_name = "EXPORT")]
    input: PathBuf,

    /// Output bundle (defaults to the installed catalog path)
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,
}

impl PackCatalog {
    pub fn execute(self) -> Result<()> {
        let format = match CatalogFormat::from_path(&self.input) {
            CatalogFormat::Bundle => CatalogFormat::RawJson,
            raw => raw,
        };
        let catalog = CatalogLoader::load_as(&self.input, format)?;

        let output = self.output.unwrap_or_else(dirs::catalog_path);
        if let Some(parent) = output.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        CatalogLoader::save_bundle(&catalog, &output)?;

        let size = std::fs::metadata(&output)?.len();
        println!(
            "{} Packed {} items into {} ({} bytes)",
            style("✓").green().bold(),
            style(catalog.len()).cyan(),
            style(output.display()).bold(),
            size
        );
        Ok(())
    }
}
