//! The per-file unit of mutation

use serde::Serialize;

use crate::block::{CodeBlock, split_lines};
use crate::position::to_index;

/// A file's lines together with the code blocks found in them.
///
/// `blocks` is a flat list ordered by declaration line. A class and its
/// methods are siblings here; containment is derived from ranges on demand
/// (see [`CodeBlock::contains`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceUnit {
    name: String,
    lines: Vec<String>,
    blocks: Vec<CodeBlock>,
}

impl SourceUnit {
    pub fn new(name: impl Into<String>, lines: Vec<String>, mut blocks: Vec<CodeBlock>) -> Self {
        // Stable, so a module emitted first stays ahead of a block on line 0.
        blocks.sort_by_key(CodeBlock::declaration_start);
        Self {
            name: name.into(),
            lines,
            blocks,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn blocks(&self) -> &[CodeBlock] {
        &self.blocks
    }

    pub fn block(&self, name: &str) -> Option<&CodeBlock> {
        self.blocks.iter().find(|b| b.name() == name)
    }

    pub fn module(&self) -> Option<&CodeBlock> {
        self.blocks.iter().find(|b| b.is_module())
    }

    /// Blocks that lexically contain the block at `index`, outermost first.
    pub fn enclosing(&self, index: usize) -> Vec<&CodeBlock> {
        let Some(target) = self.blocks.get(index) else {
            return Vec::new();
        };
        self.blocks[..index]
            .iter()
            .filter(|candidate| candidate.contains(target))
            .collect()
    }

    /// Text from a block's declaration through its body end, inclusive.
    pub fn code_sample(&self, block: &CodeBlock) -> String {
        let range = block.code_range();
        let Some(start) = to_index(*range.start()) else {
            return String::new();
        };
        let end = to_index(*range.end())
            .map(|end| (end + 1).min(self.lines.len()))
            .unwrap_or(0);
        if start >= end {
            return String::new();
        }
        self.lines[start..end].concat()
    }

    /// Concatenated text, ready to be written back.
    pub fn to_text(&self) -> String {
        self.lines.concat()
    }

    /// Hand the line array back for storage.
    pub fn serialize(self) -> Vec<String> {
        self.lines
    }

    pub(crate) fn parts_mut(&mut self) -> (&mut Vec<String>, &mut Vec<CodeBlock>) {
        (&mut self.lines, &mut self.blocks)
    }
}

/// Split file text into the line array a unit operates on.
pub fn lines_of(text: &str) -> Vec<String> {
    split_lines(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BlockKind, Position};
    use pretty_assertions::assert_eq;

    fn sample_unit() -> SourceUnit {
        let lines = lines_of("class A:\n    def m(self):\n        pass\n\ndef f():\n    pass\n");
        let blocks = vec![
            CodeBlock::new("f", BlockKind::Function, 4, Position::new(0, 5, 5)),
            CodeBlock::new("m", BlockKind::Function, 1, Position::new(4, 2, 2)),
            CodeBlock::new("A", BlockKind::Class, 0, Position::new(0, 1, 2)),
            CodeBlock::new("a.py", BlockKind::Module, 0, Position::new(0, 0, 6)),
        ];
        SourceUnit::new("a.py", lines, blocks)
    }

    #[test]
    fn blocks_are_sorted_by_declaration() {
        let unit = sample_unit();
        let starts: Vec<isize> = unit.blocks().iter().map(|b| b.declaration_start()).collect();
        assert_eq!(starts, vec![0, 0, 1, 4]);
    }

    #[test]
    fn code_sample_is_inclusive_of_body_end() {
        let unit = sample_unit();
        let func = unit.block("f").unwrap();
        assert_eq!(unit.code_sample(func), "def f():\n    pass\n");
    }

    #[test]
    fn module_sample_is_clamped_to_file() {
        let unit = sample_unit();
        let module = unit.module().unwrap();
        assert_eq!(unit.code_sample(module), unit.to_text());
    }

    #[test]
    fn enclosing_is_derived_from_ranges() {
        let unit = sample_unit();
        let index = unit.blocks().iter().position(|b| b.name() == "m").unwrap();
        let names: Vec<&str> = unit.enclosing(index).iter().map(|b| b.name()).collect();
        assert!(names.contains(&"A"));
        assert!(!names.contains(&"f"));
    }

    #[test]
    fn serialize_round_trips_text() {
        let text = "#!/usr/bin/env python\r\nx = 1\r\ny = 2";
        let unit = SourceUnit::new("b.py", lines_of(text), Vec::new());
        assert_eq!(unit.line_count(), 3);
        assert_eq!(unit.serialize().concat(), text);
    }
}
