//! Passenger survival CLI.
//!
//! Trains the frozen artifacts offline and runs quick predictions against them.

use std::process::ExitCode;

use clap::Parser;
use titanic_predictor::cli::{run_command, Cli};

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run_command(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
