//! # OmniPrice Entry Point
//!
//! ## Startup Sequence
//! 1. Parse arguments
//! 2. Initialize tracing (stderr)
//! 3. Determine database path
//! 4. Connect to database & run migrations
//! 5. Load stored state (or defaults)
//! 6. Run the command, print its output to stdout

use std::process::ExitCode;

use clap::Parser;
use omniprice_cli_lib::cli::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match omniprice_cli_lib::run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err.message);
            ExitCode::FAILURE
        }
    }
}
