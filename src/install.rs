use std::path::Path;
use std::process::Command;

use crate::error::{HbbError, Result};

/// Installs the generated project's dependencies.
pub trait PackageInstaller {
    /// Run the install inside `dir` and return the process exit code.
    fn install(&self, dir: &Path) -> Result<i32>;
}

/// Runs an external command (by default `npm install`) with inherited stdio.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandInstaller {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandInstaller {
    /// Build from an argv list. Returns `None` for an empty list.
    pub fn from_argv(argv: &[String]) -> Option<Self> {
        let (program, args) = argv.split_first()?;
        Some(Self {
            program: program.clone(),
            args: args.to_vec(),
        })
    }

    /// The command as typed on a shell, for next-step hints.
    pub fn display(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Default for CommandInstaller {
    fn default() -> Self {
        Self {
            program: "npm".to_string(),
            args: vec!["install".to_string()],
        }
    }
}

impl PackageInstaller for CommandInstaller {
    fn install(&self, dir: &Path) -> Result<i32> {
        tracing::debug!(command = %self.display(), dir = %dir.display(), "running installer");
        let status = Command::new(&self.program)
            .args(&self.args)
            .current_dir(dir)
            .status()
            .map_err(|e| HbbError::InstallerUnavailable {
                command: self.display(),
                source: e,
            })?;

        // Killed by a signal: no exit code
        Ok(status.code().unwrap_or(-1))
    }
}
