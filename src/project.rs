//! # Project Discovery
//!
//! A repository may hold several BuildStream projects, each rooted at the
//! directory containing its `project.conf`. The `ProjectRegistry` collects
//! every project of one commit together with the alias table that governs
//! the source URLs of its elements.
//!
//! Projects can be nested. An element belongs to the project with the
//! longest root that is a path prefix of the element's path, so elements of
//! a sub-project never pick up the aliases of an enclosing project.

use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};

use log::{debug, warn};
use serde::Deserialize;

use crate::alias::AliasTable;
use crate::defaults::PROJECT_CONF;
use crate::error::{Error, Result};
use crate::store::VersionedStore;

/// The keys of `project.conf` this tool reads.
#[derive(Debug, Deserialize)]
struct ProjectConf {
    #[serde(default)]
    aliases: Option<AliasTable>,
    #[serde(default, rename = "element-path")]
    element_path: Option<String>,
}

/// One BuildStream project found in a commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    /// Directory holding `project.conf`, relative to the repository root.
    /// Empty for a project at the top of the repository.
    pub root: String,
    pub aliases: AliasTable,
    /// Directory of the project's elements, relative to `root`.
    pub element_path: String,
}

impl Project {
    /// Parses the `project.conf` found at `conf_path` in `commit`.
    fn parse(commit: &str, conf_path: &str, root: String, content: &[u8]) -> Result<Self> {
        let config_error = |message: String, hint: Option<&str>| Error::ProjectConfig {
            commit: commit.to_string(),
            path: conf_path.to_string(),
            message,
            hint: hint.map(str::to_string),
        };

        let text = std::str::from_utf8(content)
            .map_err(|e| config_error(format!("not valid UTF-8: {}", e), None))?;
        let conf: ProjectConf =
            serde_yaml::from_str(text).map_err(|e| config_error(e.to_string(), None))?;

        let aliases = conf.aliases.ok_or_else(|| {
            config_error(
                "missing required key 'aliases'".to_string(),
                Some("Declare the alias table, even if empty: 'aliases: {}'"),
            )
        })?;
        let element_path = conf.element_path.ok_or_else(|| {
            config_error(
                "missing required key 'element-path'".to_string(),
                Some("Point 'element-path' at the element directory, e.g. 'element-path: elements'"),
            )
        })?;

        Ok(Self {
            root,
            aliases,
            element_path,
        })
    }

    /// Directory holding the project's elements, relative to the repository
    /// root.
    pub fn element_dir(&self) -> PathBuf {
        Path::new(&self.root)
            .join(&self.element_path)
            .components()
            .filter(|component| !matches!(component, Component::CurDir))
            .collect()
    }

    /// The BuildStream name of the element at `path`: its path relative to
    /// the element directory, or `path` itself for files outside it.
    pub fn element_name<'a>(&self, path: &'a str) -> std::borrow::Cow<'a, str> {
        match Path::new(path).strip_prefix(self.element_dir()) {
            Ok(relative) if !relative.as_os_str().is_empty() => {
                std::borrow::Cow::Owned(relative.to_string_lossy().into_owned())
            }
            _ => std::borrow::Cow::Borrowed(path),
        }
    }
}

/// All projects of one commit, keyed by root.
#[derive(Debug, Clone)]
pub struct ProjectRegistry {
    commit: String,
    projects: BTreeMap<String, Project>,
}

impl ProjectRegistry {
    /// Discovers every `project.conf` in `commit` and loads its project.
    ///
    /// # Errors
    ///
    /// Fails if the store cannot be queried or any `project.conf` is
    /// malformed or lacks `aliases` or `element-path`.
    pub fn load(store: &dyn VersionedStore, commit: &str) -> Result<Self> {
        let mut projects = BTreeMap::new();

        for entry in store.list_tree(commit)? {
            let path = Path::new(&entry.path);
            if !entry.is_blob() || path.file_name().and_then(|n| n.to_str()) != Some(PROJECT_CONF)
            {
                continue;
            }

            let root = path
                .parent()
                .map(|parent| parent.to_string_lossy().into_owned())
                .unwrap_or_default();
            let content = store.read_blob(&entry.object_id)?;
            let project = Project::parse(commit, &entry.path, root.clone(), &content)?;

            debug!(
                "project at '{}' in {}: {} aliases, elements in '{}'",
                root,
                commit,
                project.aliases.len(),
                project.element_path
            );
            projects.insert(root, project);
        }

        if projects.is_empty() {
            warn!("no {} found in {}", PROJECT_CONF, commit);
        }

        Ok(Self {
            commit: commit.to_string(),
            projects,
        })
    }

    /// Builds a registry from already loaded projects.
    pub fn from_projects(commit: &str, projects: impl IntoIterator<Item = Project>) -> Self {
        Self {
            commit: commit.to_string(),
            projects: projects
                .into_iter()
                .map(|project| (project.root.clone(), project))
                .collect(),
        }
    }

    /// The commit the registry describes.
    pub fn commit(&self) -> &str {
        &self.commit
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    pub fn get(&self, root: &str) -> Option<&Project> {
        self.projects.get(root)
    }

    /// Finds the project owning the element at `path`: the project whose
    /// root is the longest component-wise prefix of `path`.
    pub fn owning_project(&self, path: &str) -> Option<&Project> {
        let path = Path::new(path);
        self.projects
            .values()
            .filter(|project| path.starts_with(&project.root))
            .max_by_key(|project| Path::new(&project.root).components().count())
    }

    /// Like [`owning_project`](Self::owning_project), but a missing owner is
    /// an error.
    pub fn require_owner(&self, path: &str) -> Result<&Project> {
        self.owning_project(path)
            .ok_or_else(|| Error::NoOwningProject {
                commit: self.commit.clone(),
                path: path.to_string(),
            })
    }
}
