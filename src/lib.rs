//! # source-relocate Library
//!
//! This library predicts how BuildStream's source cache has to be rearranged
//! after the source URLs of elements change between two commits of a
//! project repository. It is used by the `source-relocate` command-line tool,
//! which prints the result as `mv` commands, but the analysis is available
//! on its own.
//!
//! ## Quick Example
//!
//! ```
//! use std::collections::BTreeMap;
//! use std::path::Path;
//! use source_relocate::alias::resolve_url;
//! use source_relocate::sourcedir::{cache_directory, SourceKind};
//!
//! let mut aliases = BTreeMap::new();
//! aliases.insert("gnome".to_string(), "https://gitlab.gnome.org/GNOME/".to_string());
//!
//! let url = resolve_url("gnome:glib.git", &aliases).unwrap();
//! assert_eq!(url, "https://gitlab.gnome.org/GNOME/glib.git");
//!
//! let dir = cache_directory(&url, SourceKind::Git, Path::new("/cache"));
//! assert_eq!(
//!     dir.path,
//!     Path::new("/cache/git/https___gitlab_gnome_org_GNOME_glib_git")
//! );
//! ```
//!
//! ## Core Concepts
//!
//! - **Versioned store (`store`, `git`)**: read-only queries against the
//!   repository: tree listings, file contents and the `--stat` diff summary.
//! - **Projects (`project`)**: every directory holding a `project.conf`,
//!   with the alias table its elements resolve source URLs against.
//! - **Renames (`diffstat`)**: the element paths changed between the two
//!   commits, paired old to new.
//! - **Elements (`element`)**: the declared sources of one element and the
//!   comparison of its URLs across commits.
//! - **Cache layout (`alias`, `sourcedir`)**: alias expansion and the
//!   directory name BuildStream derives from a resolved URL.
//! - **Planning (`relocate`)**: the pipeline combining all of the above.
//!
//! ## Execution Flow
//!
//! `relocate::plan_relocations` loads a project registry per commit, walks
//! the renamed and modified elements from the diff summary, and for each
//! git or ostree source whose cache directory changes reports a
//! `Relocation` from the old directory to the new one.

pub mod alias;
pub mod config;
pub mod defaults;
pub mod diffstat;
pub mod element;
pub mod error;
pub mod git;
pub mod project;
pub mod relocate;
pub mod sourcedir;
pub mod store;
pub mod suggestions;

#[cfg(test)]
mod proptests;
