//! Dump the layers of a build code
//!
//! Peels a code back one layer at a time (base-2048 text, raw deflate,
//! MessagePack) so a broken code shows where it stops decoding.

use anyhow::{Context, Result};
use buildcodes::{base2048, deflate};
use clap::Parser;
use console::style;

/// Dump the layers of a build code
#[derive(Parser)]
pub struct InspectCode {
    /// The build code text
    code: String,

    /// Also print the raw byte layers as hex
    #[arg(long)]
    hex: bool,
}

impl InspectCode {
    pub fn execute(self) -> Result<()> {
        let code = self.code.trim();
        println!("{} {}", style("Symbols:").bold().cyan(), code.chars().count());

        let deflated = base2048::decode(code).context("Text layer")?;
        println!("{} {} bytes", style("Deflated:").bold().cyan(), deflated.len());
        if self.hex {
            println!("  {}", hex::encode(&deflated));
        }

        let packed = deflate::decompress(&deflated).context("Deflate layer")?;
        println!("{} {} bytes", style("MessagePack:").bold().cyan(), packed.len());
        if self.hex {
            println!("  {}", hex::encode(&packed));
        }

        match buildcodes::build_from_code(code) {
            Ok(build) => {
                println!("{} Wakforge v1", style("Format:").bold().cyan());
                println!("  level {}, {} items", build.level, build.items().len());
                let ids: Vec<u32> = build.items().iter().map(|item| item.item_id).collect();
                println!("  ids {ids:?}");
            }
            Err(_) => {
                let build = buildcodes::decode_build(code).context("MessagePack layer")?;
                println!("{} compact", style("Format:").bold().cyan());
                println!("{}", serde_json::to_string_pretty(&build)?);
            }
        }
        Ok(())
    }
}
