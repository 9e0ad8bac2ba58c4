//! Loaders for reading catalogs and solver configuration from files.

pub mod catalog;
pub mod config;

pub use catalog::{CatalogFormat, CatalogLoader};
pub use config::ConfigLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}

/// Helper function to read binary file contents.
pub(crate) fn read_bytes(path: &Path) -> LoadResult<Vec<u8>> {
    std::fs::read(path).map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
