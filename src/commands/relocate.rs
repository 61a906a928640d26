//! Relocate command implementation
//!
//! Compares two commits and prints the `mv` commands that would bring the
//! BuildStream source cache in line with the source URLs of the newer one.
//! Nothing on disk is modified.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use source_relocate::config::Settings;
use source_relocate::defaults::default_user_config;
use source_relocate::relocate::{plan_relocations, CommitRange};
use source_relocate::store::GitStore;
use source_relocate::suggestions;

/// Arguments for the relocation analysis
#[derive(Args, Debug)]
pub struct RelocateArgs {
    /// Commit range as `<commit1>..<commit2>`, or the two commits as separate
    /// arguments
    #[arg(value_name = "COMMITS", required = true, num_args = 1..=2)]
    pub commits: Vec<String>,

    /// Repository to inspect (defaults to the current directory)
    #[arg(short = 'C', long, value_name = "DIR", default_value = ".")]
    pub repo: PathBuf,

    /// BuildStream user configuration file
    ///
    /// Defaults to `buildstream.conf` in the platform configuration
    /// directory (`~/.config/buildstream.conf` on Linux).
    #[arg(long, value_name = "FILE", env = "SOURCE_RELOCATE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Source cache root, overriding `sourcedir` from the configuration file
    #[arg(long, value_name = "DIR", env = "SOURCE_RELOCATE_CACHE_ROOT")]
    pub cache_root: Option<PathBuf>,
}

/// Execute the relocation analysis
pub fn execute(args: RelocateArgs) -> Result<()> {
    let range = CommitRange::from_args(&args.commits).map_err(suggestions::explain)?;

    let config_path = args.config.unwrap_or_else(default_user_config);
    let settings =
        Settings::resolve(&config_path, args.cache_root).map_err(suggestions::explain)?;
    log::info!(
        "comparing {} with cache root {}",
        range,
        settings.cache_root.display()
    );

    let store = GitStore::new(args.repo);
    let relocations =
        plan_relocations(&store, &range, &settings).map_err(suggestions::explain)?;

    for relocation in &relocations {
        println!("{}", relocation);
    }

    Ok(())
}
