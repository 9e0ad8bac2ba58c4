//! Solver configuration loader.

use std::path::Path;

use gear_core::SolverConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for solver configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load a solver configuration from a TOML file.
    ///
    /// Keys missing from the file take their [`SolverConfig::default`] values.
    pub fn load(path: &Path) -> LoadResult<SolverConfig> {
        let content = read_file(path)?;
        let config: SolverConfig = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        Ok(config)
    }
}
