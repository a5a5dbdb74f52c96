pub mod clone;
pub mod progress;
pub mod source;

use std::path::{Path, PathBuf};

use crate::error::Result;

pub use clone::{clone_template, GitFetcher};
pub use progress::SpinnerFetcher;
pub use source::{resolve_locator, TemplateLocator, DEFAULT_TEMPLATE};

/// Produces a local, unrendered copy of a remote template.
pub trait ArchiveFetcher {
    /// Fetch `locator` into a new directory under `staging_root` and return its path.
    ///
    /// On error, nothing is left behind for the caller to clean up.
    fn fetch(&self, locator: &str, staging_root: &Path) -> Result<PathBuf>;
}
