//! Item catalog loader.

use std::io::Read;
use std::path::Path;

use flate2::read::GzDecoder;

use crate::catalog::Catalog;
use crate::loaders::{LoadResult, read_bytes, read_file};

/// On-disk catalog representations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CatalogFormat {
    /// Packed bundle produced by `cargo xtask pack-catalog` (`.bin`).
    Bundle,
    /// Raw `items.json` export.
    RawJson,
    /// Gzip-compressed raw export (`.json.gz`).
    RawJsonGz,
}

impl CatalogFormat {
    /// Picks the format from the file name; anything unrecognised is treated
    /// as a bundle.
    pub fn from_path(path: &Path) -> Self {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        if name.ends_with(".json.gz") {
            Self::RawJsonGz
        } else if name.ends_with(".json") {
            Self::RawJson
        } else {
            Self::Bundle
        }
    }
}

/// Loader for item catalogs.
pub struct CatalogLoader;

impl CatalogLoader {
    /// Load a catalog, picking the format from the file extension.
    pub fn load(path: &Path) -> LoadResult<Catalog> {
        Self::load_as(path, CatalogFormat::from_path(path))
    }

    pub fn load_as(path: &Path, format: CatalogFormat) -> LoadResult<Catalog> {
        let catalog = match format {
            CatalogFormat::Bundle => {
                let bytes = read_bytes(path)?;
                Catalog::from_bundle_bytes(&bytes)
                    .map_err(|e| anyhow::anyhow!("Failed to decode catalog bundle {}: {}", path.display(), e))?
            }
            CatalogFormat::RawJson => {
                let content = read_file(path)?;
                Catalog::from_raw_json(&content)
                    .map_err(|e| anyhow::anyhow!("Failed to parse item export JSON: {}", e))?
            }
            CatalogFormat::RawJsonGz => {
                let bytes = read_bytes(path)?;
                let mut content = String::new();
                GzDecoder::new(bytes.as_slice())
                    .read_to_string(&mut content)
                    .map_err(|e| anyhow::anyhow!("Failed to decompress {}: {}", path.display(), e))?;
                Catalog::from_raw_json(&content)
                    .map_err(|e| anyhow::anyhow!("Failed to parse item export JSON: {}", e))?
            }
        };

        tracing::debug!(items = catalog.len(), path = %path.display(), "Loaded catalog");
        Ok(catalog)
    }

    /// Write `catalog` as a packed bundle.
    pub fn save_bundle(catalog: &Catalog, path: &Path) -> LoadResult<()> {
        let bytes = catalog
            .to_bundle()
            .and_then(|bundle| bundle.encode())
            .map_err(|e| anyhow::anyhow!("Failed to encode catalog bundle: {}", e))?;
        std::fs::write(path, bytes)
            .map_err(|e| anyhow::anyhow!("Failed to write file {}: {}", path.display(), e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_from_extension() {
        assert_eq!(CatalogFormat::from_path(Path::new("items.json")), CatalogFormat::RawJson);
        assert_eq!(CatalogFormat::from_path(Path::new("x/ITEMS.JSON.GZ")), CatalogFormat::RawJsonGz);
        assert_eq!(CatalogFormat::from_path(Path::new("catalog.bin")), CatalogFormat::Bundle);
    }
}
