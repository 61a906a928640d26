//! # Versioned Store Access
//!
//! This module provides the `VersionedStore` trait, the seam between the
//! analysis pipeline and the repository it inspects. The pipeline only ever
//! asks four questions of the store:
//!
//! - the recursive tree listing of a commit,
//! - the tree entry for one path at a commit,
//! - the raw content of an object,
//! - the `--stat` diff summary between two commits.
//!
//! `GitStore` answers them by running the system `git` command against a
//! repository directory. Tests substitute an in-memory implementation so the
//! pipeline can be exercised without creating repositories.

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::git::TreeEntry;

/// Read-only queries against a versioned store - allows mocking in tests
pub trait VersionedStore {
    /// Lists every entry in `commit`'s tree, recursively.
    fn list_tree(&self, commit: &str) -> Result<Vec<TreeEntry>>;

    /// Finds the entry for `path` in `commit`'s tree.
    ///
    /// Returns `Ok(None)` when the path does not exist at that commit; an
    /// `Err` is reserved for failures of the store itself.
    fn lookup(&self, commit: &str, path: &str) -> Result<Option<TreeEntry>>;

    /// Reads the raw content of an object.
    fn read_blob(&self, object_id: &str) -> Result<Vec<u8>>;

    /// Produces the `--stat` diff summary between two commits.
    fn diff_summary(&self, old: &str, new: &str) -> Result<String>;

    /// Reads the content of `path` at `commit`, or `None` when the path is
    /// absent or is not a file.
    fn read_file(&self, commit: &str, path: &str) -> Result<Option<Vec<u8>>> {
        match self.lookup(commit, path)? {
            Some(entry) if entry.is_blob() => self.read_blob(&entry.object_id).map(Some),
            _ => Ok(None),
        }
    }
}

/// The default implementation of `VersionedStore`, which uses the system's
/// `git` command against a repository on disk.
#[derive(Debug, Clone)]
pub struct GitStore {
    repo_dir: PathBuf,
}

impl GitStore {
    /// Creates a store querying the repository containing `repo_dir`.
    pub fn new(repo_dir: PathBuf) -> Self {
        Self { repo_dir }
    }

    /// The directory `git` commands run in.
    pub fn repo_dir(&self) -> &Path {
        &self.repo_dir
    }
}

impl VersionedStore for GitStore {
    fn list_tree(&self, commit: &str) -> Result<Vec<TreeEntry>> {
        crate::git::ls_tree_recursive(&self.repo_dir, commit)
    }

    fn lookup(&self, commit: &str, path: &str) -> Result<Option<TreeEntry>> {
        crate::git::ls_tree_path(&self.repo_dir, commit, path)
    }

    fn read_blob(&self, object_id: &str) -> Result<Vec<u8>> {
        crate::git::cat_blob(&self.repo_dir, object_id)
    }

    fn diff_summary(&self, old: &str, new: &str) -> Result<String> {
        crate::git::diff_stat(&self.repo_dir, old, new)
    }
}
