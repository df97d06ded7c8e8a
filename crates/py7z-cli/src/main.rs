//! py7z - friendly command line for the 7-Zip executable.

mod cli;
mod commands;
mod error;
mod logging;
mod output;

use anyhow::Result;
use clap::ArgMatches;
use clap::CommandFactory;
use clap::FromArgMatches;
use cli::Cli;
use cli::Commands;
use py7z_core::ProcessRunner;
use py7z_core::Settings;
use py7z_core::translate::Operation;
use std::process::ExitCode;

fn main() -> ExitCode {
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|err| err.exit());

    logging::init();

    match run(&cli, &matches) {
        Ok(code) => code,
        Err(err) => {
            error::report(&err);
            ExitCode::from(error::exit_code(&err))
        }
    }
}

fn run(cli: &Cli, matches: &ArgMatches) -> Result<ExitCode> {
    let runner = ProcessRunner::new(Settings::from_env());
    let sub_matches = matches.subcommand().map_or(matches, |(_, sub)| sub);

    match &cli.command {
        Commands::Add(args) => commands::archive::execute(Operation::Add, args, sub_matches, &runner),
        Commands::Extract(args) => {
            commands::archive::execute(Operation::Extract, args, sub_matches, &runner)
        }
        Commands::Ls(args) => commands::list::execute(args, &runner),
        Commands::Hash(args) => commands::hash::execute(args, &runner),
        Commands::Completion { shell } => {
            commands::completion::execute(*shell);
            Ok(ExitCode::SUCCESS)
        }
    }
}
