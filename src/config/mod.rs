pub mod user;

use std::path::PathBuf;

use crate::error::{HbbError, Result};
use crate::install::CommandInstaller;
use crate::name::DEFAULT_RESERVED_NAMES;
use crate::render::DEFAULT_OPAQUE_EXTENSIONS;
use crate::safety::DEFAULT_ALLOW_LIST;
use crate::template::DEFAULT_TEMPLATE;

pub use user::{load_user_config, UserConfig};

/// Effective settings for one run: built-in defaults, then the user config file,
/// then `HBB_*` environment variables.
#[derive(Debug, Clone)]
pub struct Settings {
    pub template: String,
    pub reserved_names: Vec<String>,
    pub allow_list: Vec<String>,
    pub opaque_extensions: Vec<String>,
    pub installer: CommandInstaller,
    pub staging_root: PathBuf,
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            template: DEFAULT_TEMPLATE.to_string(),
            reserved_names: owned(DEFAULT_RESERVED_NAMES),
            allow_list: owned(DEFAULT_ALLOW_LIST),
            opaque_extensions: owned(DEFAULT_OPAQUE_EXTENSIONS),
            installer: CommandInstaller::default(),
            staging_root: std::env::temp_dir(),
        }
    }
}

impl Settings {
    /// Load the user config file and environment overrides.
    pub fn load() -> Result<Self> {
        let settings = Self::from_user_config(load_user_config()?)?;
        Ok(settings.with_env(|key| std::env::var(key).ok()))
    }

    pub fn from_user_config(config: Option<UserConfig>) -> Result<Self> {
        let mut settings = Self::default();
        let Some(config) = config else {
            return Ok(settings);
        };

        if let Some(template) = config.template {
            settings.template = template;
        }
        if let Some(reserved) = config.reserved_names {
            settings.reserved_names = reserved;
        }
        settings.allow_list.extend(config.allow_list);
        settings.opaque_extensions.extend(config.opaque_extensions);
        if let Some(argv) = config.install_command {
            settings.installer =
                CommandInstaller::from_argv(&argv).ok_or_else(|| HbbError::ConfigInvalid {
                    key: "install_command".into(),
                    reason: "must name a program".into(),
                })?;
        }
        if let Some(dir) = config.staging_dir {
            settings.staging_root = dir;
        }

        Ok(settings)
    }

    /// Apply `HBB_TEMPLATE` and `HBB_STAGING_DIR`, read through `lookup`.
    pub fn with_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(template) = lookup("HBB_TEMPLATE").filter(|t| !t.is_empty()) {
            self.template = template;
        }
        if let Some(dir) = lookup("HBB_STAGING_DIR").filter(|d| !d.is_empty()) {
            self.staging_root = PathBuf::from(dir);
        }
        self
    }
}
