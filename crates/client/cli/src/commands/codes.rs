//! `wakgear encode` and `wakgear decode`.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use buildcodes::{Build, Buildv1, decode_build, encode_build, encode_partial};
use clap::{Parser, ValueEnum};
use console::style;

/// Encode a compact build code
///
/// Either pass `--ids` for a bare item list, or a JSON build file
/// (`-` reads standard input).
#[derive(Parser, Debug)]
pub struct Encode {
    /// JSON build to encode
    #[arg(value_name = "FILE", conflicts_with = "ids")]
    input: Option<PathBuf>,

    /// Item ids of a partial build
    #[arg(long, value_delimiter = ',', value_name = "IDS")]
    ids: Vec<u32>,

    /// Class name, full or short ("Osamodas", "Osa")
    #[arg(long)]
    class: Option<String>,

    #[arg(long = "lv", default_value_t = Build::DEFAULT_LEVEL)]
    level: u16,
}

impl Encode {
    pub fn execute(self) -> Result<()> {
        let code = match &self.input {
            Some(path) => {
                let build: Build = serde_json::from_str(&read_input(path)?)
                    .context("Build JSON is not valid")?;
                encode_build(&build)?
            }
            None => encode_partial(self.class.as_deref(), self.level, &self.ids)?,
        };
        println!("{code}");
        Ok(())
    }
}

fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text)?;
        return Ok(text);
    }
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum CodeFormat {
    #[default]
    Compact,
    Wakforge,
}

/// Decode a compact or Wakforge build code
#[derive(Parser, Debug)]
pub struct Decode {
    code: String,

    #[arg(long, value_enum, default_value_t = CodeFormat::Compact)]
    format: CodeFormat,
}

impl Decode {
    pub fn execute(self) -> Result<()> {
        let code = self.code.trim();
        match self.format {
            CodeFormat::Compact => {
                let build = decode_build(code)?;
                println!("{}", serde_json::to_string_pretty(&build)?);
            }
            CodeFormat::Wakforge => print_wakforge(&buildcodes::build_from_code(code)?),
        }
        Ok(())
    }
}

fn print_wakforge(build: &Buildv1) {
    let class = build
        .class
        .map_or_else(|| "-".to_owned(), |class| class.to_string());

    println!("{}", style("=== Wakforge Build ===").bold().green());
    println!("{} {}", style("Class:").bold().cyan(), class);
    println!("{} {}", style("Level:").bold().cyan(), build.level);

    println!("{}", style("Items:").bold().cyan());
    for item in build.items() {
        if item.elements.is_empty() {
            println!("  {}", item.item_id);
        } else {
            println!("  {} ({:?})", item.item_id, item.elements);
        }
    }

    let passives = build.passives();
    if !passives.is_empty() {
        println!("{} {:?}", style("Passives:").bold().cyan(), passives);
    }
    let sublimations = build.sublimations();
    if !sublimations.is_empty() {
        println!("{} {:?}", style("Sublimations:").bold().cyan(), sublimations);
    }

    let stats = build.allocated_stats();
    let values = stats.to_stat_values(build.class);
    println!(
        "{} {} / {}",
        style("Points spent:").bold().cyan(),
        stats.spent_points(),
        buildcodes::AllocatedStats::available_points(build.level)
    );
    println!(
        "  AP {}  MP {}  WP {}  Range {}  Crit {}%  Mastery {}",
        values.stats.ap,
        values.stats.mp,
        values.stats.wp,
        values.stats.range,
        values.stats.critical_hit,
        values.stats.elemental_mastery
    );
    if values.final_damage > 0 {
        println!("  Final damage +{}%", values.final_damage);
    }
}
