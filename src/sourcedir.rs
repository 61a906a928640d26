//! Content-addressed source cache layout.
//!
//! BuildStream stores each fetched source under
//! `<sourcedir>/<kind>/<directory name>`, where the directory name is derived
//! from the fully resolved source URL. This module reproduces that naming so
//! the location of a cached source can be predicted without BuildStream.

use std::fmt;
use std::path::{Path, PathBuf};

/// The source kinds whose cache entries are inspected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    Git,
    Ostree,
}

impl SourceKind {
    /// Every inspected kind, in the order they are checked.
    pub const ALL: [SourceKind; 2] = [SourceKind::Git, SourceKind::Ostree];

    /// The `kind:` value used in element files and the cache subdirectory name.
    pub fn as_str(self) -> &'static str {
        match self {
            SourceKind::Git => "git",
            SourceKind::Ostree => "ostree",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A cache directory for one source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheDirectory {
    pub kind: SourceKind,
    pub path: PathBuf,
}

/// Normalize a resolved URL into a cache directory name.
///
/// Matches BuildStream's `url_directory_name`: ASCII letters, ASCII digits,
/// `%` and `_` are kept, every other character becomes a single `_`.
pub fn url_directory_name(url: &str) -> String {
    url.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '%' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Compute where a source with the given resolved URL is cached.
pub fn cache_directory(resolved_url: &str, kind: SourceKind, cache_root: &Path) -> CacheDirectory {
    CacheDirectory {
        kind,
        path: cache_root
            .join(kind.as_str())
            .join(url_directory_name(resolved_url)),
    }
}
