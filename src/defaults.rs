//! Default values for source-relocate configuration.
//!
//! This module provides the fixed names and fallback locations shared by the
//! library and the command-line tool.

use std::path::PathBuf;

/// File name marking a BuildStream project root.
pub const PROJECT_CONF: &str = "project.conf";

/// Extension carried by every element file.
pub const ELEMENT_EXTENSION: &str = ".bst";

/// Returns the default BuildStream source cache directory.
///
/// Uses the platform cache directory, which honours `XDG_CACHE_HOME` on
/// Linux: `~/.cache/buildstream/sources`.
///
/// Falls back to `.cache/buildstream/sources` relative to the current
/// directory if the platform cache directory cannot be determined.
///
/// This can be overridden by `sourcedir` in the user configuration, the
/// `--cache-root` CLI flag or the `SOURCE_RELOCATE_CACHE_ROOT` environment
/// variable.
pub fn default_cache_root() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from(".cache"))
        .join("buildstream")
        .join("sources")
}

/// Returns the location of the BuildStream user configuration file,
/// `~/.config/buildstream.conf` on Linux.
pub fn default_user_config() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from(".config"))
        .join("buildstream.conf")
}
