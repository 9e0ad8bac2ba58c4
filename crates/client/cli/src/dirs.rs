//! Platform-specific directory utilities

use std::path::PathBuf;

/// Get the platform-specific data directory for wakgear
///
/// Follows platform conventions:
/// - macOS: `~/Library/Application Support/wakgear`
/// - Linux: `~/.local/share/wakgear` (or `$XDG_DATA_HOME/wakgear`)
/// - Windows: `%APPDATA%\wakgear`
/// - Fallback: `./wakgear_data`
pub fn data_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "wakgear")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("./wakgear_data"))
}

/// Where `xtask pack-catalog` installs the bundle by default.
pub fn default_catalog_path() -> PathBuf {
    data_dir().join("catalog.bin")
}
