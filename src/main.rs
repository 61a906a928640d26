//! # source-relocate CLI
//!
//! This is the binary entry point for the `source-relocate` command-line tool.
//!
//! Its primary responsibilities are:
//! - Parsing command-line arguments using `clap`.
//! - Setting up logging.
//! - Executing the relocation analysis and printing its result.
//!
//! The analysis itself lives in the `lib.rs` library crate, so the binary is
//! a thin wrapper around reusable library functionality.

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli.execute()
}
