//! Settings read from the process environment.
use std::env;
use std::path::PathBuf;

/// Environment overrides, applied below command-line flags.
///
/// Environment variables:
/// - `WAKGEAR_CATALOG` - Catalog bundle or raw export (default: platform data dir)
/// - `WAKGEAR_LOG_FILE` - Extra log file (default: stderr only)
#[derive(Clone, Debug, Default)]
pub struct CliEnv {
    pub catalog: Option<PathBuf>,
    pub log_file: Option<PathBuf>,
}

impl CliEnv {
    pub fn from_env() -> Self {
        Self {
            catalog: read_path("WAKGEAR_CATALOG"),
            log_file: read_path("WAKGEAR_LOG_FILE"),
        }
    }
}

fn read_path(key: &str) -> Option<PathBuf> {
    env::var_os(key)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}
