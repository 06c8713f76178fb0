//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for bootsmith
#[derive(Parser, Debug)]
#[command(name = "bootsmith")]
#[command(author, version, about = "Bootstrap a project with an LLM-planned setup")]
#[command(long_about = r#"
Bootsmith collects a project profile, asks a model for an ordered list of
setup steps, then executes each step through a small set of local tools
(file writes, directory listings, npm installs) with the model driving.

Without flags, an interactive questionnaire collects the project name,
type, description and technology selection. Supplying --name,
--project-type and --tech skips the questionnaire entirely.

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./bootsmith.toml    Project-level config
3. ~/.config/bootsmith/config.toml   Global config

Example:
  bootsmith
  bootsmith --name my-api --project-type node --tech typescript --tech eslint
  bootsmith -vv --corpus ./my-instructions.txt
"#)]
pub struct Cli {
    /// Project name (skips the questionnaire when combined with
    /// --project-type and --tech)
    #[arg(long, value_name = "NAME")]
    pub name: Option<String>,

    /// Project type (node, web, native)
    #[arg(long, value_name = "TYPE")]
    pub project_type: Option<String>,

    /// Project description
    #[arg(long, value_name = "TEXT")]
    pub description: Option<String>,

    /// Technology to set up (can be specified multiple times)
    #[arg(long = "tech", value_name = "TECH")]
    pub technologies: Vec<String>,

    /// Path to an instruction corpus file (overrides config and the
    /// embedded default)
    #[arg(long, value_name = "PATH")]
    pub corpus: Option<PathBuf>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

impl Cli {
    /// True when the profile is fully specified by flags and the
    /// questionnaire can be skipped.
    pub fn has_full_profile(&self) -> bool {
        self.name.is_some() && self.project_type.is_some() && !self.technologies.is_empty()
    }
}
