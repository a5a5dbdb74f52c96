use std::collections::HashMap;
use std::path::PathBuf;

use crate::config::Settings;
use crate::error::{HbbError, Result};
use crate::install::PackageInstaller;
use crate::name::{name_from_arg, validate, ProjectName};
use crate::prompt::{collect_metadata, project_fields, PromptSource};
use crate::render::render;
use crate::safety::check_safe;
use crate::staging::Staging;
use crate::template::ArchiveFetcher;

/// States of one materialization run, in the order they are reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Start,
    NameValidated,
    DestinationPrepared,
    SafetyChecked,
    MetadataCollected,
    Staged,
    Rendered,
    StagingCleaned,
    InstallPrompted,
    Installed,
    Done,
}

pub struct CreateOptions {
    /// The project directory argument, relative to `base_dir` or absolute.
    pub project: String,
    pub base_dir: PathBuf,
    /// Metadata supplied up front; these keys are not prompted for.
    pub data: HashMap<String, String>,
    /// Offer to install dependencies after rendering.
    pub install: bool,
}

impl CreateOptions {
    pub fn new(project: impl Into<String>, base_dir: impl Into<PathBuf>) -> Self {
        Self {
            project: project.into(),
            base_dir: base_dir.into(),
            data: HashMap::new(),
            install: true,
        }
    }
}

/// Outcome of a successful run.
#[derive(Debug)]
pub struct Report {
    pub name: ProjectName,
    pub target_dir: PathBuf,
    pub files_created: Vec<PathBuf>,
    pub files_copied: Vec<PathBuf>,
    pub stages: Vec<Stage>,
    pub installed: bool,
    /// Non-fatal problems: staging cleanup and dependency installation.
    pub warnings: Vec<HbbError>,
}

struct Progress {
    stages: Vec<Stage>,
}

impl Progress {
    fn new() -> Self {
        Self {
            stages: vec![Stage::Start],
        }
    }

    fn enter(&mut self, stage: Stage) {
        tracing::debug!(?stage, "pipeline stage reached");
        self.stages.push(stage);
    }
}

/// Record a non-fatal error as a warning and carry on; a fatal one ends the run.
fn tolerate(warnings: &mut Vec<HbbError>, error: HbbError) -> Result<()> {
    if error.is_fatal() {
        return Err(error);
    }
    tracing::debug!(error = %error, "continuing past non-fatal error");
    warnings.push(error);
    Ok(())
}

/// The materialization pipeline with its collaborators.
pub struct Pipeline<'a> {
    pub settings: &'a Settings,
    pub fetcher: &'a dyn ArchiveFetcher,
    pub prompt: &'a dyn PromptSource,
    pub installer: &'a dyn PackageInstaller,
}

impl Pipeline<'_> {
    /// Validate, prepare the target, fetch, render, clean up staging, and optionally install.
    ///
    /// Every stage runs once, in order. The first fatal error is returned. Staging is removed
    /// whenever it was created, whether or not rendering succeeded; `StagingCleaned` is only
    /// recorded when that removal worked.
    pub fn run(&self, options: &CreateOptions) -> Result<Report> {
        let mut progress = Progress::new();
        let mut warnings = Vec::new();

        let name = validate(&name_from_arg(&options.project), &self.settings.reserved_names)?;
        progress.enter(Stage::NameValidated);

        let target_dir = options.base_dir.join(&options.project);
        std::fs::create_dir_all(&target_dir).map_err(|e| HbbError::Io {
            context: format!("creating project directory {}", target_dir.display()),
            source: e,
        })?;
        progress.enter(Stage::DestinationPrepared);

        let conflicts = check_safe(&target_dir, &self.settings.allow_list);
        if !conflicts.is_empty() {
            return Err(HbbError::Conflicts {
                name: options.project.clone(),
                conflicts,
            });
        }
        progress.enter(Stage::SafetyChecked);

        let metadata = collect_metadata(self.prompt, &project_fields(&name), &options.data)?;
        progress.enter(Stage::MetadataCollected);

        let staging = Staging::new(
            self.fetcher
                .fetch(&self.settings.template, &self.settings.staging_root)?,
        );
        tracing::debug!(staging = %staging.path().display(), "template staged");
        progress.enter(Stage::Staged);

        let (rendered, cleanup) = staging.use_then_remove(|source| {
            render(
                source,
                &target_dir,
                &metadata,
                &self.settings.opaque_extensions,
            )
        });
        if rendered.is_ok() {
            progress.enter(Stage::Rendered);
        }
        match cleanup {
            Ok(()) => progress.enter(Stage::StagingCleaned),
            Err(e) => tolerate(&mut warnings, e)?,
        }
        let project = rendered?;

        let mut installed = false;
        if options.install {
            progress.enter(Stage::InstallPrompted);
            let wants_install = self
                .prompt
                .confirm("Install dependencies?", true)
                .unwrap_or_else(|e| {
                    tracing::debug!(error = %e, "install prompt declined");
                    false
                });
            if wants_install {
                match self.installer.install(&target_dir) {
                    Ok(0) => installed = true,
                    Ok(code) => tolerate(&mut warnings, HbbError::InstallFailure { code })?,
                    Err(e) => tolerate(&mut warnings, e)?,
                }
                progress.enter(Stage::Installed);
            }
        }

        progress.enter(Stage::Done);
        Ok(Report {
            name,
            target_dir,
            files_created: project.files_created,
            files_copied: project.files_copied,
            stages: progress.stages,
            installed,
            warnings,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::path::Path;

    use crate::prompt::DefaultsPrompt;

    /// Stages a single README containing `{{name}}`.
    struct OneFileFetcher;

    impl ArchiveFetcher for OneFileFetcher {
        fn fetch(&self, _locator: &str, staging_root: &Path) -> Result<PathBuf> {
            let dir = staging_root.join("hbb-staging-test");
            std::fs::create_dir_all(&dir).unwrap();
            std::fs::write(dir.join("README.md"), "Hello {{name}}").unwrap();
            Ok(dir)
        }
    }

    struct CountingInstaller {
        calls: Cell<u32>,
        code: i32,
    }

    impl PackageInstaller for CountingInstaller {
        fn install(&self, _dir: &Path) -> Result<i32> {
            self.calls.set(self.calls.get() + 1);
            Ok(self.code)
        }
    }

    fn settings(staging_root: &Path) -> Settings {
        Settings {
            staging_root: staging_root.to_path_buf(),
            ..Settings::default()
        }
    }

    #[test]
    fn successful_run_reaches_every_stage() {
        let work = tempfile::tempdir().unwrap();
        let staging_root = tempfile::tempdir().unwrap();
        let settings = settings(staging_root.path());
        let installer = CountingInstaller {
            calls: Cell::new(0),
            code: 0,
        };
        let pipeline = Pipeline {
            settings: &settings,
            fetcher: &OneFileFetcher,
            prompt: &DefaultsPrompt,
            installer: &installer,
        };

        let report = pipeline
            .run(&CreateOptions::new("my-app", work.path()))
            .unwrap();

        assert_eq!(
            report.stages,
            vec![
                Stage::Start,
                Stage::NameValidated,
                Stage::DestinationPrepared,
                Stage::SafetyChecked,
                Stage::MetadataCollected,
                Stage::Staged,
                Stage::Rendered,
                Stage::StagingCleaned,
                Stage::InstallPrompted,
                Stage::Installed,
                Stage::Done,
            ]
        );
        assert!(report.installed);
        assert!(report.warnings.is_empty());
        assert_eq!(installer.calls.get(), 1);
    }

    #[test]
    fn install_failure_is_only_a_warning() {
        let work = tempfile::tempdir().unwrap();
        let staging_root = tempfile::tempdir().unwrap();
        let settings = settings(staging_root.path());
        let installer = CountingInstaller {
            calls: Cell::new(0),
            code: 1,
        };
        let pipeline = Pipeline {
            settings: &settings,
            fetcher: &OneFileFetcher,
            prompt: &DefaultsPrompt,
            installer: &installer,
        };

        let report = pipeline
            .run(&CreateOptions::new("my-app", work.path()))
            .unwrap();

        assert!(!report.installed);
        assert_eq!(report.stages.last(), Some(&Stage::Done));
        assert!(matches!(
            report.warnings.as_slice(),
            [HbbError::InstallFailure { code: 1 }]
        ));
    }

    struct MissingInstaller;

    impl PackageInstaller for MissingInstaller {
        fn install(&self, _dir: &Path) -> Result<i32> {
            Err(HbbError::InstallerUnavailable {
                command: "npm install".into(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "npm"),
            })
        }
    }

    #[test]
    fn unavailable_installer_is_only_a_warning() {
        let work = tempfile::tempdir().unwrap();
        let staging_root = tempfile::tempdir().unwrap();
        let settings = settings(staging_root.path());
        let pipeline = Pipeline {
            settings: &settings,
            fetcher: &OneFileFetcher,
            prompt: &DefaultsPrompt,
            installer: &MissingInstaller,
        };

        let report = pipeline
            .run(&CreateOptions::new("my-app", work.path()))
            .unwrap();

        assert!(!report.installed);
        assert!(matches!(
            report.warnings.as_slice(),
            [HbbError::InstallerUnavailable { .. }]
        ));
    }

    #[test]
    fn tolerate_keeps_warnings_and_stops_on_fatal() {
        let mut warnings = Vec::new();
        tolerate(&mut warnings, HbbError::InstallFailure { code: 2 }).unwrap();
        assert_eq!(warnings.len(), 1);

        let err = tolerate(&mut warnings, HbbError::PromptCancelled).unwrap_err();
        assert!(matches!(err, HbbError::PromptCancelled));
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn no_install_skips_the_installer() {
        let work = tempfile::tempdir().unwrap();
        let staging_root = tempfile::tempdir().unwrap();
        let settings = settings(staging_root.path());
        let installer = CountingInstaller {
            calls: Cell::new(0),
            code: 0,
        };
        let pipeline = Pipeline {
            settings: &settings,
            fetcher: &OneFileFetcher,
            prompt: &DefaultsPrompt,
            installer: &installer,
        };

        let mut options = CreateOptions::new("my-app", work.path());
        options.install = false;
        let report = pipeline.run(&options).unwrap();

        assert_eq!(installer.calls.get(), 0);
        assert!(!report.stages.contains(&Stage::InstallPrompted));
    }
}
