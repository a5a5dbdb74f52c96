use std::path::{Path, PathBuf};
use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::error::Result;
use crate::template::ArchiveFetcher;

/// Shows a spinner on stderr while the wrapped fetcher downloads the template.
///
/// The spinner ends with a check mark on success and a cross on failure. Nothing is
/// drawn when stderr is not a terminal.
pub struct SpinnerFetcher<'a> {
    inner: &'a dyn ArchiveFetcher,
    bar: Option<ProgressBar>,
}

impl<'a> SpinnerFetcher<'a> {
    pub fn new(inner: &'a dyn ArchiveFetcher) -> Self {
        Self { inner, bar: None }
    }

    /// Report through `bar` instead of a fresh terminal spinner.
    pub fn with_bar(inner: &'a dyn ArchiveFetcher, bar: ProgressBar) -> Self {
        Self {
            inner,
            bar: Some(bar),
        }
    }

    fn start(&self) -> ProgressBar {
        if let Some(bar) = &self.bar {
            return bar.clone();
        }
        let bar = ProgressBar::new_spinner();
        if let Ok(spinner_style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}")
        {
            bar.set_style(spinner_style);
        }
        bar.enable_steady_tick(Duration::from_millis(100));
        bar
    }
}

impl ArchiveFetcher for SpinnerFetcher<'_> {
    fn fetch(&self, locator: &str, staging_root: &Path) -> Result<PathBuf> {
        let bar = self.start();
        bar.set_message(format!("Downloading project template {locator}..."));

        let fetched = self.inner.fetch(locator, staging_root);
        match &fetched {
            Ok(_) => bar.finish_with_message(format!(
                "{} Project template downloaded",
                style("✓").green().bold()
            )),
            Err(_) => bar.abandon_with_message(format!(
                "{} Project template download failed",
                style("✗").red().bold()
            )),
        }
        fetched
    }
}
