use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{HbbError, Result};

/// Delete `dir` and everything below it.
///
/// Directory contents are removed before the directory itself. Symbolic links are
/// unlinked, never followed, so cleanup cannot escape the tree. Nothing is restored
/// if a removal fails part way through.
pub fn remove_tree(dir: &Path) -> Result<()> {
    let cleanup_error = |path: &Path, source: std::io::Error| HbbError::CleanupError {
        path: path.to_path_buf(),
        source,
    };

    let meta = fs::symlink_metadata(dir).map_err(|e| cleanup_error(dir, e))?;
    if !meta.is_dir() {
        return fs::remove_file(dir).map_err(|e| cleanup_error(dir, e));
    }

    for entry in WalkDir::new(dir).follow_links(false).contents_first(true) {
        let entry = entry.map_err(|e| {
            let path = e.path().map(Path::to_path_buf).unwrap_or_else(|| dir.to_path_buf());
            HbbError::CleanupError {
                path,
                source: e.into(),
            }
        })?;

        let path = entry.path();
        let removed = if entry.file_type().is_dir() {
            fs::remove_dir(path)
        } else {
            fs::remove_file(path)
        };
        removed.map_err(|e| cleanup_error(path, e))?;
    }

    tracing::debug!(path = %dir.display(), "removed staging tree");
    Ok(())
}

/// Exclusive ownership of a staging directory for one run.
///
/// The directory is removed by [`Staging::cleanup`], or on drop if `cleanup` was
/// never reached.
#[derive(Debug)]
pub struct Staging {
    path: PathBuf,
    released: bool,
}

impl Staging {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            released: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Run `f` against the staged tree, then remove the tree whatever `f` returned.
    ///
    /// Returns the result of `f` and the result of the removal separately.
    pub fn use_then_remove<T>(self, f: impl FnOnce(&Path) -> Result<T>) -> (Result<T>, Result<()>) {
        let outcome = f(&self.path);
        let cleanup = self.cleanup();
        (outcome, cleanup)
    }

    pub fn cleanup(mut self) -> Result<()> {
        self.released = true;
        remove_tree(&self.path)
    }
}

impl Drop for Staging {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        if let Err(e) = remove_tree(&self.path) {
            tracing::warn!(path = %self.path.display(), error = %e, "staging cleanup on drop failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn populate(root: &Path) {
        fs::create_dir_all(root.join("a/b/c")).unwrap();
        fs::write(root.join("top.txt"), "top").unwrap();
        fs::write(root.join("a/one.txt"), "1").unwrap();
        fs::write(root.join("a/b/c/deep.txt"), "deep").unwrap();
        fs::write(root.join(".hidden"), "").unwrap();
        fs::create_dir(root.join("empty")).unwrap();
    }

    #[test]
    fn removes_nested_tree() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("staging");
        populate(&root);

        remove_tree(&root).unwrap();
        assert!(!root.exists());
    }

    #[test]
    fn removes_empty_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("staging");
        fs::create_dir(&root).unwrap();

        remove_tree(&root).unwrap();
        assert!(!root.exists());
    }

    #[test]
    fn nonexistent_path_is_a_cleanup_error() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("missing");

        match remove_tree(&missing).unwrap_err() {
            HbbError::CleanupError { path, source } => {
                assert_eq!(path, missing);
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("expected CleanupError, got: {other:?}"),
        }
    }

    #[test]
    fn second_removal_reports_instead_of_panicking() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("staging");
        populate(&root);

        remove_tree(&root).unwrap();
        assert!(remove_tree(&root).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn symlinks_are_unlinked_not_followed() {
        let tmp = tempfile::tempdir().unwrap();
        let outside = tmp.path().join("outside");
        fs::create_dir(&outside).unwrap();
        fs::write(outside.join("keep.txt"), "keep").unwrap();

        let root = tmp.path().join("staging");
        populate(&root);
        std::os::unix::fs::symlink(&outside, root.join("escape")).unwrap();
        std::os::unix::fs::symlink(outside.join("keep.txt"), root.join("a/file-link")).unwrap();

        remove_tree(&root).unwrap();
        assert!(!root.exists());
        assert!(outside.join("keep.txt").exists());
    }

    #[test]
    fn staging_is_removed_after_scope_even_on_error() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("staging");
        populate(&root);

        let staging = Staging::new(root.clone());
        let (outcome, cleanup) = staging.use_then_remove(|_| -> Result<()> {
            Err(HbbError::PromptCancelled)
        });

        assert!(outcome.is_err());
        assert!(cleanup.is_ok());
        assert!(!root.exists());
    }

    #[test]
    fn staging_is_removed_on_drop() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("staging");
        populate(&root);

        {
            let staging = Staging::new(root.clone());
            assert_eq!(staging.path(), root.as_path());
        }
        assert!(!root.exists());
    }
}
