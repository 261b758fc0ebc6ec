//! Scrub CLI - apply declarative filter chains to JSON documents
//!
//! This is the entry point for the `scrub` binary: load a rules file,
//! sanitize a document, print the result.

mod cli;
mod error;
mod handlers;
mod logging;

use cli::{Cli, Commands};
use error::Result;
use std::process;

fn main() {
    let cli = Cli::parse_args();

    logging::init(cli.verbosity_level());

    match run(cli) {
        Ok(()) => process::exit(0),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(e.exit_code());
        }
    }
}

/// Main application logic
fn run(cli: Cli) -> Result<()> {
    tracing::debug!(command = ?cli.command, "executing command");

    match cli.command {
        Commands::Apply(args) => handlers::handle_apply(args),
        Commands::Filters => handlers::handle_filters(),
    }
}
