use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{HbbError, Result};
use crate::staging::remove_tree;
use crate::template::source::resolve_locator;
use crate::template::ArchiveFetcher;

/// Classify git stderr output into a user-friendly error message with
/// actionable suggestions for common failure modes.
fn classify_clone_error(stderr: &str) -> String {
    if stderr.contains("Authentication failed") || stderr.contains("could not read Username") {
        format!("authentication failed — configure git credentials with `gh auth login` or set up SSH keys\n\ngit output:\n{stderr}")
    } else if stderr.contains("Repository not found")
        || (stderr.contains("not found") && stderr.contains("repository"))
    {
        format!("repository not found — check the URL; if private, ensure git credentials are configured\n\ngit output:\n{stderr}")
    } else if stderr.contains("Remote branch") && stderr.contains("not found") {
        format!("branch or tag not found in the template repository\n\ngit output:\n{stderr}")
    } else if stderr.contains("Host key verification failed") {
        format!("SSH host key verification failed — try: ssh-keyscan github.com >> ~/.ssh/known_hosts\n\ngit output:\n{stderr}")
    } else if stderr.contains("Could not resolve host") || stderr.contains("Connection refused") {
        format!(
            "network error — check your connection and the repository URL\n\ngit output:\n{stderr}"
        )
    } else {
        stderr.to_string()
    }
}

/// Shallow-clone `url` into a fresh `hbb-staging-*` directory under `staging_root`
/// and strip the clone's `.git` directory, leaving only template files.
///
/// Uses the system `git` binary so that the user's full credential stack
/// (SSH agent, `gh auth`, credential helpers, etc.) is inherited automatically.
/// Rejects `file://` URLs and warns on `http://`.
pub fn clone_template(url: &str, git_ref: Option<&str>, staging_root: &Path) -> Result<PathBuf> {
    if url.starts_with("file://") {
        return Err(HbbError::UnsafeUrl {
            url: url.to_string(),
            reason: "file:// URLs are not allowed for remote templates".into(),
        });
    }

    if url.starts_with("http://") {
        tracing::warn!(url, "using insecure http:// URL; consider using https:// instead");
    }

    Command::new("git")
        .arg("--version")
        .output()
        .map_err(|_| HbbError::GitNotFound)?;

    std::fs::create_dir_all(staging_root).map_err(|e| HbbError::Io {
        context: format!("creating staging root {}", staging_root.display()),
        source: e,
    })?;

    // Removed automatically if the clone fails
    let tmp_dir = tempfile::Builder::new()
        .prefix("hbb-staging-")
        .tempdir_in(staging_root)
        .map_err(|e| HbbError::Io {
            context: "creating staging directory for git clone".into(),
            source: e,
        })?;

    let mut cmd = Command::new("git");
    cmd.env("GIT_TERMINAL_PROMPT", "0")
        .arg("clone")
        .arg("--depth")
        .arg("1");

    if let Some(ref_name) = git_ref {
        cmd.arg("--branch").arg(ref_name);
    }

    cmd.arg(url).arg(tmp_dir.path());

    tracing::debug!(url, git_ref, dest = %tmp_dir.path().display(), "cloning template");
    let output = cmd.output().map_err(|e| HbbError::Io {
        context: "running git clone".into(),
        source: e,
    })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(HbbError::FetchError {
            locator: url.to_string(),
            reason: classify_clone_error(stderr.trim()),
        });
    }

    let git_dir = tmp_dir.path().join(".git");
    if git_dir.exists() {
        remove_tree(&git_dir).map_err(|e| HbbError::FetchError {
            locator: url.to_string(),
            reason: format!("could not strip git metadata from the clone: {e}"),
        })?;
    }

    Ok(tmp_dir.keep())
}

/// Fetches the template with a shallow `git clone`.
#[derive(Debug, Default)]
pub struct GitFetcher;

impl ArchiveFetcher for GitFetcher {
    fn fetch(&self, locator: &str, staging_root: &Path) -> Result<PathBuf> {
        let resolved = resolve_locator(locator)?;
        clone_template(&resolved.url, resolved.git_ref.as_deref(), staging_root)
    }
}
