//! `finq` - query and edit finance-ops record collections from the shell.
//!
//! Records are read from `<data-root>/data/<domain>/<entity>.json`. Updates
//! and deletes apply to the in-memory copy for the duration of one command
//! and are printed, never written back.

use std::process::ExitCode;

use clap::Parser;

mod cli;
mod commands;

use cli::Cli;
use commands::Outcome;

fn main() -> ExitCode {
    finq_store::logging::init();
    let cli = Cli::parse();

    match commands::run(&cli) {
        Ok(Outcome::Output(json)) => match serde_json::to_string_pretty(&json) {
            Ok(text) => {
                println!("{text}");
                ExitCode::SUCCESS
            }
            Err(err) => {
                eprintln!("Error: {err}");
                ExitCode::FAILURE
            }
        },
        Ok(Outcome::NotFound(message)) => {
            eprintln!("{message}");
            ExitCode::FAILURE
        }
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
