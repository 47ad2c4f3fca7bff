//! Code block and documentation block types

use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::position::Position;

/// Structural kind of a code block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    Module,
    Class,
    Function,
}

impl BlockKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Module => "module",
            Self::Class => "class",
            Self::Function => "function",
        }
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for BlockKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "module" => Ok(Self::Module),
            "class" => Ok(Self::Class),
            "function" => Ok(Self::Function),
            other => Err(other.to_string()),
        }
    }
}

/// A documentation string attached to a code block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentationBlock {
    raw_lines: Vec<String>,
    position: Position,
}

impl DocumentationBlock {
    pub fn new(raw_lines: Vec<String>, position: Position) -> Self {
        Self {
            raw_lines,
            position,
        }
    }

    /// Build from a text blob, splitting it into lines that keep their terminators.
    pub fn from_text(text: &str, position: Position) -> Self {
        Self::new(split_lines(text), position)
    }

    pub fn raw_lines(&self) -> &[String] {
        &self.raw_lines
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn text(&self) -> String {
        self.raw_lines.concat()
    }

    /// Lines covered by the block; 0 when its position is empty.
    pub fn len(&self) -> usize {
        self.position.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn with_position(&self, position: Position) -> Self {
        Self {
            raw_lines: self.raw_lines.clone(),
            position,
        }
    }
}

/// A named module, class or function with its line ranges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeBlock {
    name: String,
    kind: BlockKind,
    declaration_start: isize,
    position: Position,
    documentation: Option<DocumentationBlock>,
    /// Documentation exists in the source but its lines could not be located.
    #[serde(default)]
    unlocated_documentation: bool,
}

impl CodeBlock {
    pub fn new(
        name: impl Into<String>,
        kind: BlockKind,
        declaration_start: isize,
        position: Position,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            declaration_start,
            position,
            documentation: None,
            unlocated_documentation: false,
        }
    }

    pub fn with_documentation(mut self, documentation: DocumentationBlock) -> Self {
        self.documentation = Some(documentation);
        self
    }

    /// Record documentation the parser saw but the line scan could not anchor.
    pub(crate) fn with_unlocated_documentation(mut self) -> Self {
        self.unlocated_documentation = true;
        self
    }

    /// Whether the block is documented in a form that cannot be spliced.
    pub fn has_unlocated_documentation(&self) -> bool {
        self.unlocated_documentation
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> BlockKind {
        self.kind
    }

    pub fn declaration_start(&self) -> isize {
        self.declaration_start
    }

    /// The body range.
    pub fn position(&self) -> Position {
        self.position
    }

    pub fn documentation(&self) -> Option<&DocumentationBlock> {
        self.documentation.as_ref()
    }

    pub fn has_documentation(&self) -> bool {
        self.documentation.is_some()
    }

    pub fn is_module(&self) -> bool {
        self.kind == BlockKind::Module
    }

    /// Whether `other` lies lexically inside this block.
    pub fn contains(&self, other: &CodeBlock) -> bool {
        self.declaration_start <= other.declaration_start
            && other.position.body_end() <= self.position.body_end()
    }

    /// Lines from the declaration through the last body line.
    pub fn code_range(&self) -> RangeInclusive<isize> {
        self.declaration_start..=self.position.body_end()
    }

    /// Indentation applied to this block's documentation lines.
    pub fn documentation_indent(&self, indent_width: usize) -> usize {
        if self.is_module() {
            0
        } else {
            self.position.indent_level() + indent_width
        }
    }

    pub(crate) fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    pub(crate) fn take_documentation(&mut self) -> Option<DocumentationBlock> {
        self.documentation.take()
    }

    pub(crate) fn set_documentation(&mut self, documentation: DocumentationBlock) {
        self.documentation = Some(documentation);
    }

    /// Move every recorded line number by `delta`.
    pub(crate) fn rebase(&mut self, delta: isize) {
        self.declaration_start += delta;
        self.position = self.position.shifted(delta);
        if let Some(doc) = &self.documentation {
            self.documentation = Some(doc.with_position(doc.position().shifted(delta)));
        }
    }

    /// Account for `count` lines inserted at `line` somewhere in the file.
    pub(crate) fn apply_insert(&mut self, line: isize, count: usize) {
        if self.declaration_start >= line {
            self.declaration_start += count as isize;
        }
        self.position = self.position.after_insert(line, count);
        if let Some(doc) = &self.documentation {
            self.documentation = Some(doc.with_position(doc.position().after_insert(line, count)));
        }
    }
}

impl fmt::Display for CodeBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{}: {} (doc: {})",
            self.kind,
            self.name,
            self.documentation.is_some()
        )?;
        write!(
            f,
            "Start: {} End: {}",
            self.declaration_start,
            self.position.body_end()
        )
    }
}

/// Split text into lines, keeping each line's terminator.
pub fn split_lines(text: &str) -> Vec<String> {
    text.split_inclusive('\n').map(str::to_string).collect()
}
