//! # Relocation Planning
//!
//! This module ties the analysis together. Given two commits of a
//! BuildStream repository it works out which source cache directories have
//! to move so that the sources already fetched for the old commit are found
//! again under the URLs declared at the new commit.
//!
//! ## Process
//!
//! 1. Load the project registry of each commit.
//! 2. Read the `--stat` summary between the commits and extract the element
//!    rename pairs.
//! 3. For each pair, load both element versions. Pairs where either side is
//!    missing, empty or malformed are skipped.
//! 4. Find the owning project of the old path in the old registry and of the
//!    new path in the new registry.
//! 5. For each source kind, compare the declared URLs, resolve them through
//!    their project's aliases, and map them to cache directories. Differing
//!    directories make a [`Relocation`].
//!
//! The registries are the only state shared between pairs and are never
//! modified after loading.

use std::fmt;

use log::{debug, info, warn};

use crate::alias::resolve_url;
use crate::config::Settings;
use crate::diffstat::{DiffStatGrammar, RenamePair};
use crate::element::{detect_difference, load_element, ElementDescriptor, ElementLookup};
use crate::error::{Error, Result};
use crate::project::ProjectRegistry;
use crate::sourcedir::{cache_directory, CacheDirectory, SourceKind};
use crate::store::VersionedStore;

/// The two commits being compared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRange {
    pub old: String,
    pub new: String,
}

impl CommitRange {
    pub fn new(old: &str, new: &str) -> Self {
        Self {
            old: old.to_string(),
            new: new.to_string(),
        }
    }

    /// Builds a range from positional arguments: either a single
    /// `<old>..<new>` token or two commits.
    pub fn from_args(args: &[String]) -> Result<Self> {
        match args {
            [range] => Self::parse(range),
            [old, new] => {
                if old.is_empty() || new.is_empty() {
                    return Err(usage("commits must not be empty"));
                }
                Ok(Self::new(old, new))
            }
            _ => Err(usage(&format!(
                "expected <commit1>..<commit2> or <commit1> <commit2>, got {} arguments",
                args.len()
            ))),
        }
    }

    /// Parses an `<old>..<new>` token.
    pub fn parse(token: &str) -> Result<Self> {
        if token.contains("...") {
            return Err(usage(&format!(
                "'{}' is a symmetric range; use <commit1>..<commit2>",
                token
            )));
        }
        match token.split_once("..") {
            Some((old, new)) if !old.is_empty() && !new.is_empty() => Ok(Self::new(old, new)),
            _ => Err(usage(&format!(
                "'{}' is not a commit range of the form <commit1>..<commit2>",
                token
            ))),
        }
    }
}

impl fmt::Display for CommitRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.old, self.new)
    }
}

fn usage(message: &str) -> Error {
    Error::Usage {
        message: message.to_string(),
    }
}

/// A cache directory that must be moved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relocation {
    /// Element name at the new commit.
    pub element: String,
    pub from: CacheDirectory,
    pub to: CacheDirectory,
}

impl Relocation {
    pub fn kind(&self) -> SourceKind {
        self.to.kind
    }
}

impl fmt::Display for Relocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "mv {} {}",
            self.from.path.display(),
            self.to.path.display()
        )
    }
}

/// Computes every relocation between the two commits of `range`.
///
/// # Errors
///
/// Fails when a store query fails, a `project.conf` is invalid, or an
/// element path has no owning project. Problems confined to one element or
/// one source are logged and skipped.
pub fn plan_relocations(
    store: &dyn VersionedStore,
    range: &CommitRange,
    settings: &Settings,
) -> Result<Vec<Relocation>> {
    let grammar = DiffStatGrammar::for_elements()?;

    let old_projects = ProjectRegistry::load(store, &range.old)?;
    let new_projects = ProjectRegistry::load(store, &range.new)?;
    info!(
        "{} project(s) at {}, {} at {}",
        old_projects.len(),
        range.old,
        new_projects.len(),
        range.new
    );

    let summary = store.diff_summary(&range.old, &range.new)?;

    let mut relocations = Vec::new();
    for pair in grammar.pairs(&summary) {
        relocations.extend(plan_pair(
            store,
            &pair,
            &old_projects,
            &new_projects,
            settings,
        )?);
    }

    Ok(relocations)
}

/// Relocations caused by one changed element.
fn plan_pair(
    store: &dyn VersionedStore,
    pair: &RenamePair,
    old_projects: &ProjectRegistry,
    new_projects: &ProjectRegistry,
    settings: &Settings,
) -> Result<Vec<Relocation>> {
    let old = load_element(store, old_projects.commit(), &pair.old_path)?;
    let new = load_element(store, new_projects.commit(), &pair.new_path)?;
    let (Some(old), Some(new)) = (
        usable(old, old_projects.commit(), &pair.old_path),
        usable(new, new_projects.commit(), &pair.new_path),
    ) else {
        return Ok(Vec::new());
    };

    let old_project = old_projects.require_owner(&pair.old_path)?;
    let new_project = new_projects.require_owner(&pair.new_path)?;
    let element = new_project.element_name(&pair.new_path);

    let mut relocations = Vec::new();
    for kind in SourceKind::ALL {
        let Some(change) = detect_difference(&old, &new, kind, &element) else {
            continue;
        };

        let resolved = resolve_url(&change.old, &old_project.aliases)
            .and_then(|old_url| Ok((old_url, resolve_url(&change.new, &new_project.aliases)?)));
        let (old_url, new_url) = match resolved {
            Ok(urls) => urls,
            Err(e) => {
                warn!("skipping {} source of {}: {}", kind, element, e);
                continue;
            }
        };

        let from = cache_directory(&old_url, kind, &settings.cache_root);
        let to = cache_directory(&new_url, kind, &settings.cache_root);
        if from == to {
            debug!("{} {} source stays at {}", element, kind, to.path.display());
            continue;
        }

        relocations.push(Relocation {
            element: element.to_string(),
            from,
            to,
        });
    }

    Ok(relocations)
}

/// The descriptor of a lookup, or `None` (with a log line) when the element
/// cannot take part in the comparison.
fn usable(lookup: ElementLookup, commit: &str, path: &str) -> Option<ElementDescriptor> {
    match lookup {
        ElementLookup::Found(descriptor) => Some(descriptor),
        ElementLookup::NotFound => {
            debug!("{} does not exist at {}", path, commit);
            None
        }
        ElementLookup::Empty => {
            debug!("{} is empty at {}", path, commit);
            None
        }
        ElementLookup::Malformed(reason) => {
            info!("skipping {} at {}: {}", path, commit, reason);
            None
        }
    }
}
