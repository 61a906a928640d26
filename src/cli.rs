//! CLI argument parsing and command dispatch

use anyhow::Result;
use clap::Parser;

use crate::commands;

/// Predict BuildStream source cache moves between two commits
///
/// Prints one `mv <old> <new>` line for every cached git or ostree source
/// whose cache directory changes because an element's source URL changed.
#[derive(Parser, Debug)]
#[command(name = "source-relocate")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    relocate: commands::relocate::RelocateArgs,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, value_name = "LEVEL", default_value = "warn")]
    log_level: String,
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        init_logging(&self.log_level);
        commands::relocate::execute(self.relocate)
    }
}

/// Route `log` records to stderr. `RUST_LOG` takes precedence over
/// `--log-level`.
fn init_logging(level: &str) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .format_target(false)
        .init();
}
