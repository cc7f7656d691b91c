//! ReptiTrack storefront CLI

use std::process::ExitCode;

use tracing::error;

use crate::cli::Cli;

mod cli;
mod config;
mod observability;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = match Cli::load() {
        Ok(cli) => cli,
        Err(error) => error.exit(),
    };

    if let Err(error) = observability::init_subscriber(cli.logging()) {
        #[expect(
            clippy::print_stderr,
            reason = "logging failed to initialise, must use eprintln"
        )]
        {
            eprintln!("{error}");
        }

        return ExitCode::FAILURE;
    }

    match cli.run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            error!("{message}");

            ExitCode::FAILURE
        }
    }
}
