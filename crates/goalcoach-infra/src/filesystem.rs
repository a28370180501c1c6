//! Data-directory layout.
//!
//! Everything goalcoach persists lives under one directory:
//! `config.toml` and the `goalcoach.db` SQLite file.

use std::path::{Path, PathBuf};

/// Environment variable that overrides the data directory.
pub const DATA_DIR_ENV: &str = "GOALCOACH_DATA_DIR";

/// Resolve the data directory.
///
/// `GOALCOACH_DATA_DIR` wins; otherwise `~/.goalcoach`, or `./.goalcoach`
/// when no home directory is known.
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        if !dir.trim().is_empty() {
            return PathBuf::from(dir);
        }
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".goalcoach");
    }

    PathBuf::from(".goalcoach")
}

/// `{data_dir}/config.toml`
pub fn config_path(data_dir: &Path) -> PathBuf {
    data_dir.join("config.toml")
}

/// SQLite URL for `{data_dir}/goalcoach.db`, created on first use.
pub fn database_url(data_dir: &Path) -> String {
    format!("sqlite://{}?mode=rwc", data_dir.join("goalcoach.db").display())
}
