//! Transcript locator - main entry point

use clap::Parser;
use std::process::ExitCode;
use transcript_locator::cli::{self, Cli};

fn main() -> ExitCode {
    let cli = Cli::parse();
    cli.setup_logging();

    match cli::run(&cli, std::io::stdin().lock(), std::io::stdout().lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err:#}");
            ExitCode::from(cli::exit_code(&err))
        }
    }
}
