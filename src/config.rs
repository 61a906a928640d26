//! # Run Configuration
//!
//! The only setting the analysis needs from its environment is the root of
//! the BuildStream source cache. It is resolved once, up front, into an
//! immutable [`Settings`] value that is passed to the planner explicitly.
//!
//! Resolution order:
//!
//! 1. An explicit override (the `--cache-root` flag or its environment
//!    variable).
//! 2. The `sourcedir` key of the BuildStream user configuration file.
//! 3. [`default_cache_root`](crate::defaults::default_cache_root).
//!
//! A missing user configuration file is normal and falls through to the
//! default; a file that exists but cannot be read or parsed is an error.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::defaults::default_cache_root;
use crate::error::{Error, Result};

/// The keys of the BuildStream user configuration this tool reads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UserConfig {
    /// Directory holding BuildStream's source cache.
    #[serde(default)]
    pub sourcedir: Option<String>,
}

impl UserConfig {
    /// Parse user configuration YAML. An empty document yields the defaults.
    pub fn parse(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let value: serde_yaml::Value = serde_yaml::from_str(content)?;
        if value.is_null() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_value(value)?)
    }

    /// Read the configuration at `path`.
    ///
    /// Returns `Ok(None)` if the file does not exist.
    pub fn from_file(path: &Path) -> Result<Option<Self>> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(Error::UserConfig {
                    path: path.display().to_string(),
                    message: e.to_string(),
                })
            }
        };

        Self::parse(&content)
            .map(Some)
            .map_err(|e| Error::UserConfig {
                path: path.display().to_string(),
                message: e.to_string(),
            })
    }
}

/// Immutable settings for one analysis run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Root of the source cache whose layout is predicted.
    pub cache_root: PathBuf,
}

impl Settings {
    pub fn new(cache_root: PathBuf) -> Self {
        Self { cache_root }
    }

    /// Resolve settings from an optional override and the user
    /// configuration file at `config_path`.
    pub fn resolve(config_path: &Path, cache_root: Option<PathBuf>) -> Result<Self> {
        if let Some(cache_root) = cache_root {
            return Ok(Self::new(cache_root));
        }

        let sourcedir = UserConfig::from_file(config_path)?.and_then(|config| config.sourcedir);
        let cache_root = match sourcedir {
            Some(sourcedir) => expand_home(&sourcedir),
            None => default_cache_root(),
        };

        Ok(Self::new(cache_root))
    }
}

/// Expand a leading `~` to the home directory.
fn expand_home(path: &str) -> PathBuf {
    let home = dirs::home_dir();
    match (path, home) {
        ("~", Some(home)) => home,
        (path, Some(home)) if path.starts_with("~/") => home.join(&path[2..]),
        (path, _) => PathBuf::from(path),
    }
}
