//! Line-range primitive shared by code blocks and documentation blocks.

use serde::{Deserialize, Serialize};

/// Sentinel used for both body bounds of an empty position.
pub const UNSET: isize = -1;

/// A line range inside a file's line array.
///
/// Line numbers are 0-indexed. Values are signed so that an empty position
/// can carry the [`UNSET`] sentinel and so that re-basing arithmetic never
/// underflows. The type is immutable: every adjustment produces a new value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    indent_level: usize,
    body_start: isize,
    body_end: isize,
}

impl Position {
    /// Create a populated position.
    pub fn new(indent_level: usize, body_start: isize, body_end: isize) -> Self {
        Self {
            indent_level,
            body_start,
            body_end,
        }
    }

    /// A position with no content assigned yet.
    pub fn empty(indent_level: usize) -> Self {
        Self {
            indent_level,
            body_start: UNSET,
            body_end: UNSET,
        }
    }

    pub fn indent_level(&self) -> usize {
        self.indent_level
    }

    pub fn body_start(&self) -> isize {
        self.body_start
    }

    pub fn body_end(&self) -> isize {
        self.body_end
    }

    /// Whether no content has been assigned.
    pub fn is_empty(&self) -> bool {
        self.body_end < 0
    }

    /// Number of lines spanned, or 0 for an empty position.
    pub fn len(&self) -> usize {
        if self.body_end < 0 {
            return 0;
        }
        (self.body_end - self.body_start).max(0) as usize
    }

    /// Move both bounds by `delta` lines. Empty positions stay empty.
    pub fn shifted(&self, delta: isize) -> Self {
        if self.is_empty() {
            return *self;
        }
        Self {
            indent_level: self.indent_level,
            body_start: self.body_start + delta,
            body_end: self.body_end + delta,
        }
    }

    pub fn with_body_start(&self, body_start: isize) -> Self {
        Self {
            body_start,
            ..*self
        }
    }

    pub fn with_body_end(&self, body_end: isize) -> Self {
        Self { body_end, ..*self }
    }

    /// Apply an insertion of `count` lines at `line`.
    ///
    /// Bounds at or after `line` move down by `count`.
    pub fn after_insert(&self, line: isize, count: usize) -> Self {
        if self.is_empty() {
            return *self;
        }
        let count = count as isize;
        let bump = |value: isize| if value >= line { value + count } else { value };
        Self {
            indent_level: self.indent_level,
            body_start: bump(self.body_start),
            body_end: bump(self.body_end),
        }
    }
}

/// Convert a populated line number into a vector index.
pub(crate) fn to_index(line: isize) -> Option<usize> {
    usize::try_from(line).ok()
}
