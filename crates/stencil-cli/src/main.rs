//! `stencil`: answer a few questions, get a front-end project skeleton.
//!
//! Exit status follows [`CliError::exit_code`]: 0 on success, 1 for internal
//! failures, 2 for bad input, 3 when a template is missing and 4 for
//! configuration problems.

use std::{io::IsTerminal as _, process::ExitCode};

use clap::Parser;
use tracing::{debug, info, instrument};

use crate::{
    cli::{Cli, Commands},
    config::AppConfig,
    error::{CliError, CliResult},
    logging::init_logging,
    output::OutputManager,
};

mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod output;
mod progress;
#[cfg(feature = "interactive")]
mod prompt;

fn main() -> ExitCode {
    // A missing .env is the normal case.
    let _ = dotenvy::dotenv();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version come through here too.
            let _ = e.print();
            return ExitCode::from(if e.use_stderr() { 2 } else { 0 });
        }
    };

    if let Err(e) = init_logging(&cli.global) {
        eprintln!("stencil: {e:#}");
        return ExitCode::from(1);
    }
    debug!(global = ?cli.global, "arguments parsed");

    let verbose = cli.global.verbose > 0;
    let color = !cli.global.no_color && std::io::stderr().is_terminal();
    match start(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => report(&e, verbose, color),
    }
}

/// Load settings, then hand over to the subcommand.
fn start(cli: Cli) -> CliResult<()> {
    // `init` is allowed to point --config at a file it is about to create.
    let creating = matches!(cli.command, Commands::Init(_));
    let config =
        AppConfig::load(cli.global.config.as_ref(), creating).map_err(|e| CliError::ConfigError {
            message: format!("{e:#}"),
            source: None,
        })?;
    let output = OutputManager::new(&cli.global, &config);
    dispatch(cli, config, output)?;
    info!("done");
    Ok(())
}

#[instrument(skip_all)]
fn dispatch(cli: Cli, config: AppConfig, output: OutputManager) -> CliResult<()> {
    match cli.command {
        Commands::New(args) => commands::new::execute(args, cli.global, config, output),
        Commands::List(args) => commands::list::execute(args, config, output),
        Commands::Init(args) => commands::init::execute(args, cli.global, output),
        Commands::Completions(args) => commands::completions::execute(args),
        Commands::Config(cmd) => commands::config::execute(cmd, config, cli.global.config, output),
    }
}

/// Print the error on stderr and pick the exit status.
fn report(err: &CliError, verbose: bool, color: bool) -> ExitCode {
    err.log();
    eprint!("{}", err.render(verbose, color));
    ExitCode::from(err.exit_code())
}
