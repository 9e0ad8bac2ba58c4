//! Summarize a catalog bundle or raw export

use anyhow::Result;
use clap::Parser;
use console::style;
use gear_content::CatalogLoader;
use gear_core::{ItemSlot, Locale, Rarity};
use std::collections::BTreeMap;
use std::path::PathBuf;
use strum::IntoEnumIterator;

use crate::dirs;

/// Summarize a catalog bundle or raw export
#[derive(Parser)]
pub struct InspectCatalog {
    /// Catalog to read (defaults to the installed catalog)
    #[arg(value_name = "PATH")]
    path: Option<PathBuf>,

    /// Print the items with this id (repeatable)
    #[arg(long = "id", value_name = "ID")]
    ids: Vec<u32>,

    /// Print the items with this exact name
    #[arg(long, value_name = "NAME")]
    name: Option<String>,

    #[arg(long, default_value = "en")]
    locale: Locale,

    /// Print matching items as JSON
    #[arg(long)]
    json: bool,
}

impl InspectCatalog {
    pub fn execute(self) -> Result<()> {
        let path = self.path.clone().unwrap_or_else(dirs::catalog_path);
        let catalog = CatalogLoader::load(&path)?;

        let mut picked: Vec<_> = self.ids.iter().filter_map(|&id| catalog.get(id)).collect();
        if let Some(name) = &self.name {
            picked.extend(catalog.by_name(name, self.locale));
        }

        if !picked.is_empty() {
            if self.json {
                println!("{}", serde_json::to_string_pretty(&picked)?);
            } else {
                for item in picked {
                    println!("{}", item.display(self.locale));
                }
            }
            return Ok(());
        }
        if !self.ids.is_empty() || self.name.is_some() {
            anyhow::bail!("No matching items in {}", path.display());
        }

        println!("{}", style("=== Catalog ===").bold().green());
        println!("{} {}", style("Path:").bold().cyan(), path.display());
        println!("{} {}", style("Items:").bold().cyan(), catalog.len());

        let mut by_rarity: BTreeMap<u8, usize> = BTreeMap::new();
        let mut by_slot: BTreeMap<ItemSlot, usize> = BTreeMap::new();
        let mut levels = (u16::MAX, 0);
        for item in catalog.items() {
            *by_rarity.entry(item.rarity.ordinal()).or_default() += 1;
            *by_slot.entry(item.slot).or_default() += 1;
            levels = (levels.0.min(item.level), levels.1.max(item.level));
        }
        if !catalog.is_empty() {
            println!("{} {}..={}", style("Levels:").bold().cyan(), levels.0, levels.1);
        }

        println!();
        println!("{}", style("By rarity:").bold());
        for rarity in Rarity::iter() {
            let count = by_rarity.get(&rarity.ordinal()).copied().unwrap_or(0);
            println!("  {:<10} {count}", rarity.as_ref());
        }

        println!();
        println!("{}", style("By slot:").bold());
        for (slot, count) in by_slot {
            println!("  {:<14} {count}", slot.as_ref());
        }
        Ok(())
    }
}
