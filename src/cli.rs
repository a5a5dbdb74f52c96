use clap::Parser;

#[derive(Parser)]
#[command(
    name = "hbb",
    about = "Scaffold a new project from a remote template",
    version
)]
pub struct Cli {
    /// Directory to create; its last path component becomes the project name
    #[arg(value_name = "PROJECT_DIRECTORY")]
    pub project_directory: Option<String>,

    /// Template source (gh:owner/repo#ref, owner/repo, or a git URL)
    #[arg(short, long)]
    pub template: Option<String>,

    /// Set metadata values without prompting (can be repeated: -d key=value)
    #[arg(short, long = "data", value_name = "KEY=VALUE")]
    pub data: Vec<String>,

    /// Accept default values without prompting
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// Do not offer to install dependencies
    #[arg(long)]
    pub no_install: bool,

    /// Show debug logging (RUST_LOG takes precedence)
    #[arg(short, long)]
    pub verbose: bool,
}
