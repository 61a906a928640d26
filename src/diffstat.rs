//! Element renames from a `git diff --stat` summary.
//!
//! A stat summary prints one line per changed path followed by an aggregate
//! footer:
//!
//! ```text
//!  elements/{core => base}/glib.bst | 2 +-
//!  elements/gtk.bst                  | 4 ++--
//!  2 files changed, 3 insertions(+), 3 deletions(-)
//! ```
//!
//! Renamed paths are printed with the changed part in braces around a
//! common prefix and suffix, or as `old => new` when nothing is shared.
//! [`DiffStatGrammar`] turns the element lines of such a summary into
//! [`RenamePair`]s, leaving every other line alone.

use std::iter::Peekable;
use std::str::Lines;

use regex::Regex;

use crate::defaults::ELEMENT_EXTENSION;
use crate::error::Result;

/// Old and new path of one changed element.
///
/// Both paths are equal when the element kept its name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenamePair {
    pub old_path: String,
    pub new_path: String,
}

impl RenamePair {
    /// Whether the element changed its path.
    pub fn is_rename(&self) -> bool {
        self.old_path != self.new_path
    }
}

/// Recognizes element lines of a stat summary.
#[derive(Debug, Clone)]
pub struct DiffStatGrammar {
    line: Regex,
    brace: Regex,
    extension: String,
}

impl DiffStatGrammar {
    /// Builds a grammar accepting paths that end in `extension`.
    pub fn new(extension: &str) -> Result<Self> {
        Ok(Self {
            line: Regex::new(r"^\s*(?P<path>\S.*?) +\| +\d+(?: [+-]*)?$")?,
            brace: Regex::new(
                r"^(?P<prefix>[^{]*)\{(?P<old>[^{}]*) => (?P<new>[^{}]*)\}(?P<suffix>.*)$",
            )?,
            extension: extension.to_string(),
        })
    }

    /// Builds a grammar for BuildStream element files.
    pub fn for_elements() -> Result<Self> {
        Self::new(ELEMENT_EXTENSION)
    }

    /// Parses one stat line.
    ///
    /// Returns `None` for lines that are not a text change to an element
    /// file: binary changes, other files, the footer, blank lines.
    pub fn parse_line(&self, line: &str) -> Option<RenamePair> {
        let captures = self.line.captures(line)?;
        let path = captures.name("path")?.as_str();

        let (old_path, new_path) = if let Some(brace) = self.brace.captures(path) {
            let prefix = &brace["prefix"];
            let suffix = &brace["suffix"];
            (
                normalize(&format!("{}{}{}", prefix, &brace["old"], suffix)),
                normalize(&format!("{}{}{}", prefix, &brace["new"], suffix)),
            )
        } else if let Some((old, new)) = path.split_once(" => ") {
            (normalize(old), normalize(new))
        } else {
            (normalize(path), normalize(path))
        };

        if !old_path.ends_with(&self.extension) || !new_path.ends_with(&self.extension) {
            return None;
        }

        Some(RenamePair { old_path, new_path })
    }

    /// Lazily extracts the rename pairs of a whole summary.
    ///
    /// The last line is the aggregate footer and is never parsed.
    pub fn pairs<'a>(&'a self, summary: &'a str) -> RenamePairs<'a> {
        RenamePairs {
            grammar: self,
            lines: summary.lines().peekable(),
        }
    }
}

/// Iterator over the rename pairs of a stat summary, see
/// [`DiffStatGrammar::pairs`].
#[derive(Debug)]
pub struct RenamePairs<'a> {
    grammar: &'a DiffStatGrammar,
    lines: Peekable<Lines<'a>>,
}

impl Iterator for RenamePairs<'_> {
    type Item = RenamePair;

    fn next(&mut self) -> Option<RenamePair> {
        loop {
            let line = self.lines.next()?;
            if self.lines.peek().is_none() {
                return None;
            }
            if let Some(pair) = self.grammar.parse_line(line) {
                return Some(pair);
            }
        }
    }
}

/// Drops empty path components left behind by empty brace segments, as in
/// `dir/{ => sub}/x.bst`.
fn normalize(path: &str) -> String {
    path.split('/')
        .filter(|component| !component.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}
