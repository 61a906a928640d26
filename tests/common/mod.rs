//! Shared test utilities for CLI end-to-end tests.
//!
//! The fixtures build small, throwaway git repositories laid out like
//! BuildStream projects, so the binary can be run against real commits.
//!
//! ## Usage
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let Some(repo) = GitFixture::new() else { return };
//!     repo.write("project.conf", configs::PROJECT);
//!     let first = repo.commit("initial");
//!     // ...
//! }
//! ```

use assert_fs::prelude::*;
use std::path::Path;
use std::process::Command;

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    #[allow(unused_imports)]
    pub use assert_cmd::cargo::cargo_bin_cmd;
    #[allow(unused_imports)]
    pub use assert_fs::prelude::*;
    #[allow(unused_imports)]
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::configs;
    #[allow(unused_imports)]
    pub use super::git_element;
    pub use super::GitFixture;
}

/// Common project and element YAML snippets for testing.
#[allow(dead_code)]
pub mod configs {
    /// Top-level project with an alias table.
    pub const PROJECT: &str = r#"name: fixture
min-version: 2.0
element-path: elements
aliases:
  example.com: https://cache.example.com/
  upstream: https://example.com/
"#;

    /// Project configuration without an alias table.
    pub const PROJECT_WITHOUT_ALIASES: &str = "name: broken\nelement-path: elements\n";

    /// Element without sources.
    pub const STACK: &str = "kind: stack\ndepends:\n- base.bst\n";
}

/// Element YAML declaring one git source, padded with enough unrelated lines
/// that git still detects a rename when only the URL changes.
#[allow(dead_code)]
pub fn git_element(url: &str) -> String {
    format!(
        r#"kind: autotools
description: fixture element used by the end-to-end tests
depends:
- base.bst
- toolchain.bst
variables:
  conf-local: --disable-docs --disable-tests
sources:
- kind: git
  url: {url}
  ref: 0123456789abcdef0123456789abcdef01234567
"#
    )
}

/// A git repository in a temporary directory.
pub struct GitFixture {
    temp_dir: assert_fs::TempDir,
}

#[allow(dead_code)]
impl GitFixture {
    /// Create an empty repository, or `None` when `git` is not installed.
    pub fn new() -> Option<Self> {
        let available = Command::new("git")
            .arg("--version")
            .output()
            .map(|output| output.status.success())
            .unwrap_or(false);
        if !available {
            eprintln!("git not available, skipping test");
            return None;
        }

        let fixture = Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        };
        fixture.git(&["init", "-q"]);
        Some(fixture)
    }

    /// Write a file relative to the repository root.
    pub fn write(&self, path: &str, content: &str) -> &Self {
        self.temp_dir
            .child(path)
            .write_str(content)
            .expect("Failed to write file");
        self
    }

    /// Rename a tracked file with `git mv`.
    pub fn rename(&self, from: &str, to: &str) -> &Self {
        if let Some(parent) = Path::new(to).parent() {
            std::fs::create_dir_all(self.path().join(parent)).expect("Failed to create dir");
        }
        self.git(&["mv", from, to]);
        self
    }

    /// Delete a tracked file with `git rm`.
    pub fn remove(&self, path: &str) -> &Self {
        self.git(&["rm", "-q", path]);
        self
    }

    /// Stage everything and commit; returns the new commit id.
    pub fn commit(&self, message: &str) -> String {
        self.git(&["add", "-A"]);
        self.git(&[
            "-c",
            "user.name=Fixture",
            "-c",
            "user.email=fixture@example.com",
            "-c",
            "commit.gpgsign=false",
            "commit",
            "-q",
            "--allow-empty",
            "-m",
            message,
        ]);
        self.git(&["rev-parse", "HEAD"]).trim().to_string()
    }

    /// Run git in the repository and return its stdout.
    pub fn git(&self, args: &[&str]) -> String {
        let output = Command::new("git")
            .arg("-C")
            .arg(self.path())
            .args(args)
            .output()
            .expect("Failed to run git");
        assert!(
            output.status.success(),
            "git {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8_lossy(&output.stdout).into_owned()
    }

    /// Get the path to the repository.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// A command for the binary, pointed at this repository with a fixed
    /// cache root and no user configuration.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("source-relocate");
        cmd.env_remove("SOURCE_RELOCATE_CACHE_ROOT")
            .env_remove("SOURCE_RELOCATE_CONFIG")
            .env_remove("RUST_LOG")
            .arg("-C")
            .arg(self.path())
            .arg("--config")
            .arg(self.path().join("no-such-buildstream.conf"))
            .arg("--cache-root")
            .arg("/cache");
        cmd
    }
}
