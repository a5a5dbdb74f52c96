use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{HbbError, Result};

/// User-level configuration loaded from `~/.config/hbb/config.toml`.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct UserConfig {
    /// Template locator, e.g. `"gh:owner/repo#main"`.
    pub template: Option<String>,
    /// Replaces the built-in reserved project names.
    pub reserved_names: Option<Vec<String>>,
    /// Extra entries allowed in the target directory.
    #[serde(default)]
    pub allow_list: Vec<String>,
    /// Extra file extensions copied without rendering.
    #[serde(default)]
    pub opaque_extensions: Vec<String>,
    /// Installer argv, e.g. `["yarn", "install"]`.
    pub install_command: Option<Vec<String>>,
    /// Where fetched templates are staged. Defaults to the system temp directory.
    pub staging_dir: Option<PathBuf>,
}

/// Get the path to the user config file. `HBB_CONFIG` takes precedence.
pub fn config_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("HBB_CONFIG") {
        return Some(PathBuf::from(path));
    }
    dirs::config_dir().map(|d| d.join("hbb").join("config.toml"))
}

/// Load user configuration from the XDG config directory.
///
/// Returns `Ok(None)` if the config file does not exist.
/// Returns `Err` if the file exists but cannot be read or parsed.
pub fn load_user_config() -> Result<Option<UserConfig>> {
    match config_path() {
        Some(path) => load_user_config_from(&path),
        None => Ok(None),
    }
}

pub fn load_user_config_from(path: &Path) -> Result<Option<UserConfig>> {
    if !path.exists() {
        return Ok(None);
    }

    let content = std::fs::read_to_string(path).map_err(|e| HbbError::Io {
        context: format!("reading user config {}", path.display()),
        source: e,
    })?;

    let config: UserConfig = toml::from_str(&content).map_err(|e| HbbError::ConfigParse {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(Some(config))
}
