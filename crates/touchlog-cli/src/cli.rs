use clap::{ArgAction, Args, Parser, Subcommand};
use clap_complete::Shell;

use touchlog_core::VERSION;

/// Touchlog - create dated, templated notes from a terminal wizard
#[derive(Parser)]
#[command(name = "touchlog")]
#[command(author, version = VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the config file
    #[arg(short, long, global = true, env = "TOUCHLOG_CONFIG")]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Plain, script-friendly output
    #[arg(long, global = true)]
    pub plain: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new entry (default)
    New(NewArgs),

    /// Write a starter config and template files
    Init(InitArgs),

    /// List available templates, or print one
    Templates(TemplatesArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_name = "SHELL")]
        shell: Shell,
    },
}

/// Arguments for the `new` command
#[derive(Args, Default)]
pub struct NewArgs {
    /// Directory the entry is saved in
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<String>,

    /// Template name
    #[arg(short, long)]
    pub template: Option<String>,

    /// Entry title
    #[arg(long)]
    pub title: Option<String>,

    /// Add tags to the entry
    #[arg(long, value_name = "TAG")]
    pub tag: Vec<String>,

    /// Entry message
    #[arg(short, long)]
    pub message: Option<String>,

    /// Editor command (must exist; no fallback)
    #[arg(short, long)]
    pub editor: Option<String>,

    /// IANA timezone for dates and the filename
    #[arg(long)]
    pub timezone: Option<String>,

    /// Replace an existing file instead of adding a numeric suffix
    #[arg(long)]
    pub overwrite: bool,

    /// Include git branch and commit of the output directory
    #[arg(long)]
    pub include_git: bool,

    /// Do not use the built-in editor when no external editor is found
    #[arg(long)]
    pub no_internal_editor: bool,

    /// Skip prompts and the editor; save straight from flags
    #[arg(long)]
    pub no_input: bool,
}

/// Arguments for the `init` command
#[derive(Args)]
pub struct InitArgs {
    /// Overwrite an existing config file
    #[arg(long)]
    pub force: bool,
}

/// Arguments for the `templates` command
#[derive(Args)]
pub struct TemplatesArgs {
    /// Print this template's body instead of listing
    #[arg(value_name = "NAME")]
    pub name: Option<String>,
}
