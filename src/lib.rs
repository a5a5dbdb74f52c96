pub mod config;
pub mod error;
pub mod install;
pub mod name;
pub mod pipeline;
pub mod prompt;
pub mod render;
pub mod safety;
pub mod staging;
pub mod template;

use crate::config::Settings;
use crate::error::Result;
use crate::prompt::{DefaultsPrompt, InteractivePrompt, PromptSource};
use crate::template::{GitFetcher, SpinnerFetcher};

pub use crate::pipeline::{CreateOptions, Pipeline, Report, Stage};

/// Create a project with the production collaborators: a git clone of the configured
/// template behind a progress spinner, terminal prompts (or defaults when `interactive`
/// is false), and the configured install command.
pub fn create_project(
    options: &CreateOptions,
    settings: &Settings,
    interactive: bool,
) -> Result<Report> {
    let prompt: &dyn PromptSource = if interactive {
        &InteractivePrompt
    } else {
        &DefaultsPrompt
    };

    let fetcher = SpinnerFetcher::new(&GitFetcher);
    let pipeline = Pipeline {
        settings,
        fetcher: &fetcher,
        prompt,
        installer: &settings.installer,
    };
    pipeline.run(options)
}
