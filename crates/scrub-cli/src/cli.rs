//! Command-line interface argument parsing and definitions
//!
//! This module defines the CLI structure using clap's derive API.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Scrub CLI - apply declarative filter chains to JSON documents
///
/// Loads a rules file mapping field paths to filter chains
/// (`"trim|uppercase"`, `"cast:int"`), runs them against a JSON
/// document, and prints the sanitized result.
#[derive(Parser, Debug)]
#[command(
    name = "scrub",
    version,
    author,
    about,
    long_about = None,
    propagate_version = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Enable verbose output (can be used multiple times for increased verbosity)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all non-essential output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Apply a rules file to a JSON document
    Apply(ApplyArgs),

    /// List the registered built-in filters
    Filters,
}

/// Arguments for the apply command
#[derive(Parser, Debug)]
pub struct ApplyArgs {
    /// Path to the rules file (JSON or YAML), mapping field paths to
    /// filter chains
    #[arg(short, long, value_name = "RULES")]
    pub rules: PathBuf,

    /// Path to the input JSON document; reads stdin when omitted
    #[arg(value_name = "INPUT")]
    pub input: Option<PathBuf>,

    /// Write the result to a file instead of stdout
    #[arg(short, long, value_name = "OUTPUT")]
    pub output: Option<PathBuf>,

    /// Pretty-print the output document
    #[arg(short, long)]
    pub pretty: bool,
}

impl Cli {
    /// Parse arguments from the process environment.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Effective verbosity: quiet wins over -v flags.
    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose.saturating_add(1)
        }
    }
}
