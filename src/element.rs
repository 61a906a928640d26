//! # Element Descriptors
//!
//! Loading BuildStream element files from a commit and comparing the source
//! URLs they declare.
//!
//! Only the `sources` list is modelled; every other key of an element file
//! is ignored. Within a source only `kind` and `url` are read, so sources
//! that need no URL (`local`, `patch`, ...) parse without complaint.
//!
//! Loading never fails because of the element itself. A missing path, an
//! empty file and malformed YAML are all reported as [`ElementLookup`]
//! variants so that the caller can skip the element and carry on; only a
//! failing store query becomes an error.

use log::warn;
use serde::Deserialize;

use crate::error::Result;
use crate::sourcedir::SourceKind;
use crate::store::VersionedStore;

/// The parts of an element file this tool reads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ElementDescriptor {
    /// Declared sources, in declaration order. `None` when the element has
    /// no `sources` key.
    #[serde(default)]
    pub sources: Option<Vec<SourceEntry>>,
}

/// One entry of an element's `sources` list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SourceEntry {
    pub kind: String,
    #[serde(default)]
    pub url: Option<String>,
}

impl ElementDescriptor {
    /// Parses element YAML.
    ///
    /// Returns `Ok(None)` for a document that is empty or `null`.
    pub fn parse(content: &str) -> std::result::Result<Option<Self>, serde_yaml::Error> {
        if content.trim().is_empty() {
            return Ok(None);
        }
        let value: serde_yaml::Value = serde_yaml::from_str(content)?;
        if value.is_null() {
            return Ok(None);
        }
        serde_yaml::from_value(value).map(Some)
    }

    /// URLs of all sources of `kind`, in declaration order.
    ///
    /// `None` when the element declares no `sources` at all.
    pub fn urls_of_kind(&self, kind: SourceKind) -> Option<Vec<&str>> {
        let sources = self.sources.as_ref()?;
        Some(
            sources
                .iter()
                .filter(|source| source.kind == kind.as_str())
                .filter_map(|source| source.url.as_deref())
                .collect(),
        )
    }
}

/// Outcome of looking up an element at a commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementLookup {
    /// The path does not exist at the commit.
    NotFound,
    /// The file exists but holds no document.
    Empty,
    /// The file exists but is not a valid element document.
    Malformed(String),
    Found(ElementDescriptor),
}

/// Load the element at `path` in `commit`.
///
/// # Errors
///
/// Only failures of the store itself are returned as errors.
pub fn load_element(
    store: &dyn VersionedStore,
    commit: &str,
    path: &str,
) -> Result<ElementLookup> {
    let Some(raw) = store.read_file(commit, path)? else {
        return Ok(ElementLookup::NotFound);
    };

    let content = match String::from_utf8(raw) {
        Ok(content) => content,
        Err(e) => return Ok(ElementLookup::Malformed(e.to_string())),
    };

    Ok(match ElementDescriptor::parse(&content) {
        Ok(Some(descriptor)) => ElementLookup::Found(descriptor),
        Ok(None) => ElementLookup::Empty,
        Err(e) => ElementLookup::Malformed(e.to_string()),
    })
}

/// The source URL of one kind before and after a change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlChange {
    pub old: String,
    pub new: String,
}

/// Extract the `kind` source URL from both versions of an element.
///
/// Returns `None` if either version lacks a `sources` key or declares no
/// source of `kind`. When a version declares several, a warning naming
/// `element` is logged and the first one is used.
pub fn detect_difference(
    old: &ElementDescriptor,
    new: &ElementDescriptor,
    kind: SourceKind,
    element: &str,
) -> Option<UrlChange> {
    let old_urls = old.urls_of_kind(kind)?;
    let new_urls = new.urls_of_kind(kind)?;

    let (old_url, new_url) = match (old_urls.first(), new_urls.first()) {
        (Some(old_url), Some(new_url)) => (*old_url, *new_url),
        _ => return None,
    };

    if old_urls.len() > 1 || new_urls.len() > 1 {
        warn!(
            "element {} has more than one {} source; only the first is compared",
            element, kind
        );
    }

    Some(UrlChange {
        old: old_url.to_string(),
        new: new_url.to_string(),
    })
}
