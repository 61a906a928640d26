//! # Error Handling
//!
//! This module defines the centralized error type for `source-relocate`. It
//! uses `thiserror` to derive a single `Error` enum covering every failure
//! that can abort an analysis run, along with a `Result<T>` alias used
//! throughout the library.
//!
//! Conditions that only skip part of the analysis (an element missing at one
//! commit, an unparsable element file, a diff line that is not an element)
//! are not errors. They are modelled as explicit result variants by the
//! modules that produce them and never surface here.
//!
//! The fatal conditions are:
//!
//! - Malformed commit range arguments.
//! - Project configuration files missing required keys, or unparsable.
//! - Unreadable or malformed user configuration.
//! - Source URLs without a scheme delimiter.
//! - Element paths that no project root owns.
//! - Failing `git` queries against the versioned store.
//! - I/O, YAML and regex errors wrapped from their libraries.

use thiserror::Error;

/// Main error type for source-relocate operations
#[derive(Error, Debug)]
pub enum Error {
    /// The command line did not describe a usable commit range.
    #[error("Usage error: {message}")]
    Usage { message: String },

    /// A `project.conf` file was unparsable or lacked a required key.
    ///
    /// Includes the path of the offending file within the commit and an
    /// optional hint about how to fix it.
    #[error("Project configuration error in {path} at {commit}: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    ProjectConfig {
        commit: String,
        path: String,
        message: String,
        /// Optional hint for how to fix the configuration issue
        hint: Option<String>,
    },

    /// The user configuration file could not be read or parsed.
    #[error("User configuration error in {path}: {message}")]
    UserConfig { path: String, message: String },

    /// A source URL had no `scheme:` delimiter, so alias resolution is
    /// undefined for it.
    #[error("Malformed source URL '{url}': no ':' separating the alias scheme")]
    UrlFormat { url: String },

    /// An element path was not below any project root in its commit.
    #[error("No project owns element {path} at {commit}")]
    NoOwningProject { commit: String, path: String },

    /// A `git` command could not be spawned or exited unsuccessfully.
    #[error("Git command failed: {command} - {stderr}")]
    GitCommand { command: String, stderr: String },

    /// `git` printed output this tool could not make sense of.
    #[error("Unexpected output from {command}: {message}")]
    GitOutput { command: String, message: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A YAML parsing error, wrapped from `serde_yaml::Error`.
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A regular expression error, wrapped from `regex::Error`.
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
