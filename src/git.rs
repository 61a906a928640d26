//! Thin wrappers around the system `git` command.
//!
//! Every query the analysis needs from the versioned store is answered by a
//! single `git` invocation run against a repository directory. Commands are
//! assembled inside the function that runs them; output is returned raw or
//! parsed into [`TreeEntry`] records.

use std::path::Path;
use std::process::Command;

use crate::error::{Error, Result};

/// One record of `git ls-tree` output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry {
    /// File mode, e.g. `100644`.
    pub mode: String,
    /// Object type: `blob`, `tree` or `commit`.
    pub kind: String,
    /// Object id of the entry.
    pub object_id: String,
    /// Path from the repository root.
    pub path: String,
}

impl TreeEntry {
    /// Whether the entry is a regular file (or symlink) blob.
    pub fn is_blob(&self) -> bool {
        self.kind == "blob"
    }
}

/// Run `git` with `args` inside `repo` and return its stdout.
///
/// A failure to spawn and a non-zero exit are both reported as
/// [`Error::GitCommand`].
fn run_git(repo: &Path, args: &[&str]) -> Result<Vec<u8>> {
    let command = format!("git {}", args.join(" "));

    let output = Command::new("git")
        .arg("-C")
        .arg(repo)
        .args(["-c", "core.quotepath=false"])
        .args(args)
        .output()
        .map_err(|e| Error::GitCommand {
            command: command.clone(),
            stderr: e.to_string(),
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(Error::GitCommand {
            command,
            stderr: stderr.trim().to_string(),
        });
    }

    log::debug!("{} returned {} bytes", command, output.stdout.len());
    Ok(output.stdout)
}

/// List every entry reachable from `commit`'s tree.
pub fn ls_tree_recursive(repo: &Path, commit: &str) -> Result<Vec<TreeEntry>> {
    let stdout = run_git(repo, &["ls-tree", "-r", "-z", "--full-tree", commit])?;
    parse_ls_tree(&stdout)
}

/// Look up a single path in `commit`'s tree.
///
/// Returns `Ok(None)` when the path does not exist at that commit.
pub fn ls_tree_path(repo: &Path, commit: &str, path: &str) -> Result<Option<TreeEntry>> {
    let stdout = run_git(repo, &["ls-tree", "-z", "--full-tree", commit, "--", path])?;
    let entries = parse_ls_tree(&stdout)?;
    Ok(entries.into_iter().find(|entry| entry.path == path))
}

/// Fetch the raw content of a blob.
pub fn cat_blob(repo: &Path, object_id: &str) -> Result<Vec<u8>> {
    run_git(repo, &["cat-file", "blob", object_id])
}

/// Produce the `--stat` summary between two commits.
///
/// Rename detection is forced on and the stat width is made large enough
/// that git never abbreviates a path with `...`.
pub fn diff_stat(repo: &Path, old: &str, new: &str) -> Result<String> {
    let stdout = run_git(
        repo,
        &[
            "diff",
            "--no-color",
            "--no-ext-diff",
            "-M",
            "--stat=100000,100000",
            old,
            new,
            "--",
        ],
    )?;
    Ok(String::from_utf8_lossy(&stdout).into_owned())
}

/// Parse NUL-terminated `git ls-tree -z` output.
///
/// Each record reads `<mode> SP <type> SP <object> TAB <path>`.
pub fn parse_ls_tree(output: &[u8]) -> Result<Vec<TreeEntry>> {
    let text = String::from_utf8_lossy(output);

    text.split('\0')
        .filter(|record| !record.is_empty())
        .map(|record| {
            let malformed = || Error::GitOutput {
                command: "git ls-tree".to_string(),
                message: format!("malformed record '{}'", record),
            };

            let (meta, path) = record.split_once('\t').ok_or_else(malformed)?;
            let mut fields = meta.split(' ');
            let (Some(mode), Some(kind), Some(object_id), None) =
                (fields.next(), fields.next(), fields.next(), fields.next())
            else {
                return Err(malformed());
            };

            Ok(TreeEntry {
                mode: mode.to_string(),
                kind: kind.to_string(),
                object_id: object_id.to_string(),
                path: path.to_string(),
            })
        })
        .collect()
}
