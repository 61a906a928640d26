//! Source URL alias resolution.
//!
//! BuildStream projects let element files write source URLs as
//! `<alias>:<remainder>`, where the alias is looked up in the project's
//! `aliases` table and replaced by its base URL.

use std::collections::BTreeMap;

use crate::error::{Error, Result};

/// Mapping from alias scheme to base URL, as declared in `project.conf`.
pub type AliasTable = BTreeMap<String, String>;

/// Expand `url` against `aliases`.
///
/// The URL is split at its first `:`. When the part before it names an
/// alias, the alias base is prepended to the remainder; otherwise the URL is
/// returned unchanged.
///
/// # Errors
///
/// Returns [`Error::UrlFormat`] if the URL contains no `:` at all.
pub fn resolve_url(url: &str, aliases: &AliasTable) -> Result<String> {
    let (scheme, remainder) = url.split_once(':').ok_or_else(|| Error::UrlFormat {
        url: url.to_string(),
    })?;

    match aliases.get(scheme) {
        Some(base) => Ok(format!("{}{}", base, remainder)),
        None => Ok(url.to_string()),
    }
}
