//! Touchlog CLI - create dated, templated notes from a terminal wizard
//!
//! This is the command-line interface for Touchlog. It drives the core
//! wizard with prompts and maps failures onto exit codes.

mod app;
mod cli;
mod commands;
mod config;
mod constants;
mod errors;
mod metadata;
mod ui;

use clap::{CommandFactory, Parser};
use log::LevelFilter;
use touchlog_core::TouchlogError;

use crate::app::AppContext;
use crate::cli::{Cli, Commands, NewArgs};
use crate::commands::{init, new, templates};
use crate::errors::CliError;
use crate::ui::{print_error, UiContext};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(err) = run(&cli) {
        let ui = UiContext::from_env(cli.plain, cli.no_color, cli.quiet);
        std::process::exit(report_error(&ui, &err));
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    let mut builder = env_logger::Builder::from_default_env();
    // RUST_LOG wins unless -v was given.
    if verbose > 0 || std::env::var_os("RUST_LOG").is_none() {
        builder.filter_level(level);
    }
    builder.format_timestamp(None).init();
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let ctx = AppContext::new(cli)?;

    match &cli.command {
        Some(Commands::New(args)) => new::handle_new(&ctx, args),
        None => new::handle_new(&ctx, &NewArgs::default()),
        Some(Commands::Init(args)) => init::handle_init(&ctx, args),
        Some(Commands::Templates(args)) => templates::handle_templates(&ctx, args),
        Some(Commands::Completions { shell }) => {
            let mut cmd = Cli::command();
            clap_complete::generate(*shell, &mut cmd, "touchlog", &mut std::io::stdout());
            Ok(())
        }
    }
}

/// Print `err` and return the process exit code for it.
fn report_error(ui: &UiContext, err: &anyhow::Error) -> i32 {
    let classified = err
        .downcast_ref::<TouchlogError>()
        .and_then(CliError::from_core);
    let cli_error = classified.as_ref().or_else(|| err.downcast_ref::<CliError>());

    match cli_error {
        Some(cli_error) => {
            print_error(ui, cli_error.message(), cli_error.hint());
            cli_error.exit_code()
        }
        None => {
            print_error(ui, &format!("{:#}", err), None);
            1
        }
    }
}
