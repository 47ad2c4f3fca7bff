//! Per-language documentation markers and layout rules

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Matches a platform shebang on the first line of a file.
static SHEBANG_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#!.+").expect("Invalid shebang regex"));

/// Documentation conventions for one source language.
///
/// Only the canonical marker is a positional anchor when locating existing
/// documentation. Alternate markers are recognised when cleaning generated
/// text but never when scanning source lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Dialect {
    /// Language name passed to the generation service.
    pub name: String,
    pub canonical_marker: String,
    pub alternate_markers: Vec<String>,
    /// Token ending a block header, e.g. `:` for Python.
    pub block_opener: String,
    /// Prefix of a line comment, e.g. `#` for Python.
    pub line_comment: String,
    /// Extra indentation of documentation relative to its declaration.
    pub indent_width: usize,
    pub max_line_length: usize,
}

impl Default for Dialect {
    fn default() -> Self {
        Self::python()
    }
}

impl Dialect {
    pub fn python() -> Self {
        Self {
            name: "Python".to_string(),
            canonical_marker: "\"\"\"".to_string(),
            alternate_markers: vec!["'''".to_string(), "```".to_string()],
            block_opener: ":".to_string(),
            line_comment: "#".to_string(),
            indent_width: 4,
            max_line_length: 79,
        }
    }

    /// Check that the markers are usable.
    pub fn validate(&self) -> Result<()> {
        if self.canonical_marker.trim().is_empty() {
            return Err(Error::InvalidDialect(
                "canonical marker must not be empty".into(),
            ));
        }
        if self.block_opener.trim().is_empty() {
            return Err(Error::InvalidDialect("block opener must not be empty".into()));
        }
        if self.line_comment.trim().is_empty() {
            return Err(Error::InvalidDialect("line comment must not be empty".into()));
        }
        if self.alternate_markers.iter().any(|m| m.trim().is_empty()) {
            return Err(Error::InvalidDialect(
                "alternate markers must not be empty".into(),
            ));
        }
        Ok(())
    }

    /// Every marker accepted as a content delimiter, canonical first.
    pub fn recognized_markers(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.canonical_marker.as_str())
            .chain(self.alternate_markers.iter().map(String::as_str))
    }

    /// Whether a line opens or closes a documentation block.
    pub fn is_marker_line(&self, line: &str) -> bool {
        line.trim().starts_with(&self.canonical_marker)
    }

    /// Whether a marker line also closes itself (`"""text"""`).
    pub fn is_single_line_doc(&self, line: &str) -> bool {
        let trimmed = line.trim();
        trimmed.len() >= self.canonical_marker.len() * 2
            && trimmed.starts_with(&self.canonical_marker)
            && trimmed.ends_with(&self.canonical_marker)
    }

    /// Whether a line carries neither code nor documentation.
    pub fn is_blank_or_comment(&self, line: &str) -> bool {
        let trimmed = line.trim();
        trimmed.is_empty() || trimmed.starts_with(&self.line_comment)
    }

    /// Whether a header line ends with the block opener, ignoring a
    /// trailing comment.
    pub fn opens_block(&self, line: &str) -> bool {
        if line.trim_end().ends_with(&self.block_opener) {
            return true;
        }
        // The comment prefix may also appear inside a string literal on the
        // header, so every occurrence is tried as the comment start.
        line.match_indices(&self.line_comment)
            .any(|(at, _)| line[..at].trim_end().ends_with(&self.block_opener))
    }

    pub fn has_shebang(&self, first_line: &str) -> bool {
        SHEBANG_REGEX.is_match(first_line)
    }
}
