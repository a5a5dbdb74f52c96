use std::collections::HashMap;

use console::style;
use hbb::config::Settings;
use hbb::error::HbbError;
use hbb::CreateOptions;
use miette::Result;

use crate::cli::Cli;

fn parse_data(data: Vec<String>) -> HashMap<String, String> {
    data.into_iter()
        .filter_map(|kv| {
            let mut parts = kv.splitn(2, '=');
            let key = parts.next()?.to_string();
            let value = parts.next()?.to_string();
            Some((key, value))
        })
        .collect()
}

pub fn run(cli: Cli) -> Result<()> {
    let project = cli.project_directory.ok_or(HbbError::MissingProject)?;

    let mut settings = Settings::load()?;
    if let Some(template) = cli.template {
        settings.template = template;
    }

    let base_dir = std::env::current_dir().map_err(|e| HbbError::Io {
        context: "getting current directory".into(),
        source: e,
    })?;

    let options = CreateOptions {
        project,
        base_dir,
        data: parse_data(cli.data),
        install: !cli.no_install,
    };

    let report = hbb::create_project(&options, &settings, !cli.yes)?;

    for warning in &report.warnings {
        eprintln!(
            "{} {}",
            style("warning:").yellow().bold(),
            style(warning).yellow()
        );
    }

    println!(
        "\n{} Created {} at {}",
        style("✓").green().bold(),
        style(&report.name).green(),
        style(report.target_dir.display()).cyan()
    );
    println!(
        "  {} files rendered, {} files copied",
        report.files_created.len(),
        report.files_copied.len()
    );

    println!("\nGet started with:\n");
    println!("  {}", style(format!("cd {}", options.project)).green());
    if !report.installed {
        println!("  {}", style(settings.installer.display()).green());
    }
    println!("  {}", style("npm start").green());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_data_splits_on_first_equals() {
        let data = parse_data(vec![
            "name=my-app".into(),
            "projectDes=a=b".into(),
            "ignored".into(),
        ]);
        assert_eq!(data.len(), 2);
        assert_eq!(data["name"], "my-app");
        assert_eq!(data["projectDes"], "a=b");
    }
}
