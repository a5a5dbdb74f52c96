#![allow(unused_assignments)]

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

use crate::safety::Conflict;

#[derive(Debug, Error, Diagnostic)]
pub enum HbbError {
    #[error("Please specify the project directory: hbb <project-directory>")]
    #[diagnostic(help("For example `hbb my-app`. Run `hbb --help` to see all options"))]
    MissingProject,

    #[error(
        "Cannot create a project named {name} because of npm naming restrictions:\n{}",
        problems.iter().map(|p| format!("  * {p}")).collect::<Vec<_>>().join("\n")
    )]
    #[diagnostic(help("Please choose a different project name"))]
    InvalidName { name: String, problems: Vec<String> },

    #[error("Cannot create a project named {name} because a dependency with the same name exists")]
    #[diagnostic(help("Please choose a different project name"))]
    ReservedName { name: String },

    #[error(
        "The directory {name} contains files that could conflict:\n{}",
        conflicts.iter().map(|c| format!("  {c}")).collect::<Vec<_>>().join("\n")
    )]
    #[diagnostic(help(
        "Either try using a new directory name, or remove the files listed above"
    ))]
    Conflicts {
        name: String,
        conflicts: Vec<Conflict>,
    },

    #[error("Failed to fetch template {locator}: {reason}")]
    #[diagnostic(help("Check the template locator and your network connection"))]
    FetchError { locator: String, reason: String },

    #[error("Failed to render {}", file.display())]
    #[diagnostic(help("Check the template syntax in this file"))]
    RenderError {
        file: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },

    #[error("Failed to remove staging directory {}", path.display())]
    CleanupError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Dependency installation exited with status {code}")]
    #[diagnostic(help("Run the install command manually inside the project directory"))]
    InstallFailure { code: i32 },

    #[error("Could not run `{command}`")]
    #[diagnostic(help(
        "Install it, or set install_command in your hbb config, then install manually"
    ))]
    InstallerUnavailable {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {}", path.display())]
    #[diagnostic(help("Check the TOML syntax in your hbb config file"))]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid config value for '{key}': {reason}")]
    ConfigInvalid { key: String, reason: String },

    #[error("Prompt cancelled by user")]
    PromptCancelled,

    #[error("git executable not found")]
    #[diagnostic(help("Install git and make sure it is on your PATH"))]
    GitNotFound,

    #[error("Unsafe URL scheme in '{url}': {reason}")]
    #[diagnostic(help("Use https:// URLs for remote templates"))]
    UnsafeUrl { url: String, reason: String },

    #[error("Invalid template locator: {input}")]
    #[diagnostic(help(
        "Supported forms: gh:owner/repo, gl:owner/repo, bb:owner/repo, owner/repo, or a git URL, optionally followed by #ref"
    ))]
    InvalidLocator { input: String },
}

impl HbbError {
    /// Whether this error ends the run. Cleanup and install problems are reported
    /// as warnings instead.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            HbbError::CleanupError { .. }
                | HbbError::InstallFailure { .. }
                | HbbError::InstallerUnavailable { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, HbbError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::safety::{Conflict, EntryKind};

    #[test]
    fn invalid_name_lists_every_problem() {
        let err = HbbError::InvalidName {
            name: "Bad.".into(),
            problems: vec![
                "name can no longer contain capital letters".into(),
                "name cannot start with a period".into(),
            ],
        };
        let msg = err.to_string();
        assert!(msg.contains("Cannot create a project named Bad."));
        assert!(msg.contains("  * name can no longer contain capital letters"));
        assert!(msg.contains("  * name cannot start with a period"));
    }

    #[test]
    fn conflicts_message_marks_directories() {
        let err = HbbError::Conflicts {
            name: "my-app".into(),
            conflicts: vec![
                Conflict {
                    name: "notes.txt".into(),
                    kind: Some(EntryKind::File),
                },
                Conflict {
                    name: "src".into(),
                    kind: Some(EntryKind::Directory),
                },
            ],
        };
        let msg = err.to_string();
        assert!(msg.contains("  notes.txt"));
        assert!(msg.contains("  src/"));
    }

    #[test]
    fn missing_project_shows_usage() {
        let err = HbbError::MissingProject;
        assert!(err.to_string().contains("hbb <project-directory>"));
        let help = miette::Diagnostic::help(&err).unwrap().to_string();
        assert!(help.contains("hbb my-app"));
    }

    #[test]
    fn cleanup_and_install_are_not_fatal() {
        let cleanup = HbbError::CleanupError {
            path: PathBuf::from("/tmp/x"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert!(!cleanup.is_fatal());
        assert!(!HbbError::InstallFailure { code: 1 }.is_fatal());
        assert!(!HbbError::InstallerUnavailable {
            command: "npm install".into(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "npm"),
        }
        .is_fatal());
        assert!(HbbError::ReservedName {
            name: "react".into()
        }
        .is_fatal());
    }
}
