//! Configuration loading and root folder resolution
//!
//! The root folder holds the SQLite database (`trackdle.db`) and the
//! rendered snippet clips (`snippets/`).

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Optional TOML config file (`~/.config/trackdle/config.toml`)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    pub root_folder: Option<PathBuf>,
    /// Path or name of the ffmpeg executable used for snippet rendering
    pub ffmpeg: Option<String>,
}

/// Root folder resolution, in priority order:
/// 1. Command-line argument (highest priority)
/// 2. `TRACKDLE_ROOT` environment variable
/// 3. TOML config file
/// 4. OS-dependent compiled default (fallback)
pub fn resolve_root_folder(cli_arg: Option<&Path>) -> PathBuf {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return path.to_path_buf();
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var("TRACKDLE_ROOT") {
        return PathBuf::from(path);
    }

    // Priority 3: TOML config file
    if let Ok(config) = load_config_file() {
        if let Some(root) = config.root_folder {
            return root;
        }
    }

    // Priority 4: OS-dependent compiled default
    default_root_folder()
}

/// Load the TOML config file for the platform, if one exists
pub fn load_config_file() -> Result<TomlConfig> {
    let path = config_file_path()?;
    let content = std::fs::read_to_string(&path)
        .map_err(|e| Error::Config(format!("cannot read {}: {}", path.display(), e)))?;
    toml::from_str(&content).map_err(|e| Error::Config(format!("invalid config file: {}", e)))
}

fn config_file_path() -> Result<PathBuf> {
    let path = dirs::config_dir()
        .map(|d| d.join("trackdle").join("config.toml"))
        .ok_or_else(|| Error::Config("could not determine config directory".to_string()))?;
    if path.exists() {
        Ok(path)
    } else {
        Err(Error::Config(format!("config file not found: {}", path.display())))
    }
}

/// OS-dependent default root folder path
pub fn default_root_folder() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("trackdle"))
        .unwrap_or_else(|| PathBuf::from("./trackdle_data"))
}

/// Database path inside the root folder
pub fn database_path(root: &Path) -> PathBuf {
    root.join("trackdle.db")
}

/// Snippet clip directory inside the root folder
pub fn snippets_dir(root: &Path) -> PathBuf {
    root.join("snippets")
}
