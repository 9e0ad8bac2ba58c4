//! Platform-specific directory utilities
//!
//! Mirrors the paths the `wakgear` binary reads from.

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

/// Installed catalog: `WAKGEAR_CATALOG`, else `<data dir>/catalog.bin`.
pub fn catalog_path() -> PathBuf {
    std::env::var_os("WAKGEAR_CATALOG")
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| data_dir().join("catalog.bin"))
}
