//! Removing and inserting documentation without corrupting block positions.
//!
//! The two passes walk the block list in opposite directions:
//!
//! - **Removal** runs forward in declaration order. Lines deleted for earlier
//!   blocks are accumulated in a running count and subtracted from every later
//!   block before that block is looked at.
//! - **Embedding** runs backward. Each insertion lands at or after every line
//!   still to be read for the remaining, earlier blocks, so their starts stay
//!   valid without re-basing.

use tracing::{debug, warn};

use crate::block::{CodeBlock, DocumentationBlock};
use crate::dialect::Dialect;
use crate::error::BlockError;
use crate::format::format_docstring;
use crate::generate::{GenerationRequest, Generator};
use crate::position::{Position, to_index};
use crate::unit::SourceUnit;

/// Outcome of one pass over a unit.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct SpliceReport {
    pub removed_lines: usize,
    pub inserted_lines: usize,
    /// Names of blocks whose documentation was removed or inserted.
    pub touched_blocks: Vec<String>,
    pub failures: Vec<BlockError>,
}

impl SpliceReport {
    /// Whether some blocks were skipped.
    pub fn is_partial(&self) -> bool {
        !self.failures.is_empty()
    }

    pub fn merge(&mut self, other: SpliceReport) {
        self.removed_lines += other.removed_lines;
        self.inserted_lines += other.inserted_lines;
        self.touched_blocks.extend(other.touched_blocks);
        self.failures.extend(other.failures);
    }
}

/// Removes and (re)inserts documentation blocks in a [`SourceUnit`].
#[derive(Debug, Clone, Default)]
pub struct DocumentationSplicer {
    dialect: Dialect,
}

impl DocumentationSplicer {
    pub fn new(dialect: Dialect) -> Self {
        Self { dialect }
    }

    pub fn dialect(&self) -> &Dialect {
        &self.dialect
    }

    /// Strip every documentation block from the unit's lines.
    ///
    /// Each block's body end shrinks by the length of its own documentation,
    /// later blocks are re-based by the lines already removed, and blocks
    /// enclosing a removed span shrink with it. Afterwards the module range
    /// covers the whole file again.
    pub fn remove_documentation(&self, unit: &mut SourceUnit) -> SpliceReport {
        let mut report = SpliceReport::default();
        let (lines, blocks) = unit.parts_mut();
        let mut removed_count: isize = 0;

        for index in 0..blocks.len() {
            let block = &mut blocks[index];
            block.rebase(-removed_count);

            let Some(doc) = block.take_documentation() else {
                continue;
            };
            let length = doc.len();
            let start = doc.position().body_start();

            // Reported rather than fatal. Lines and this block's range stay as
            // they were; only the documentation reference is dropped.
            if !self.points_at_marker(lines, start, length) {
                warn!(
                    block = %block.name(),
                    line = start,
                    "Documentation position does not point at a marker, leaving lines untouched"
                );
                report.failures.push(BlockError::PositionCorruption {
                    block: block.name().to_string(),
                    line: start,
                    marker: self.dialect.canonical_marker.clone(),
                });
                continue;
            }
            if length == 0 {
                continue;
            }

            let body_end = block.position().body_end() - length as isize;
            block.set_position(block.position().with_body_end(body_end));
            let name = block.name().to_string();

            let first = start as usize;
            lines.drain(first..first + length);
            removed_count += length as isize;

            shrink_enclosing(&mut blocks[..index], start, length);

            debug!(block = %name, start, length, removed_count, "Removed documentation");
            report.removed_lines += length;
            report.touched_blocks.push(name);
        }

        let line_count = lines.len() as isize;
        if let Some(module) = blocks.iter_mut().find(|b| b.is_module()) {
            module.set_position(module.position().with_body_end(line_count));
        }

        report
    }

    /// Generate and insert documentation for every block lacking it.
    ///
    /// Blocks are visited from the last declaration to the first. Failures
    /// from the generator skip the block and are listed in the report.
    pub fn embed_documentation(
        &self,
        unit: &mut SourceUnit,
        generator: &dyn Generator,
    ) -> SpliceReport {
        let mut report = SpliceReport::default();

        for index in (0..unit.blocks().len()).rev() {
            let block = &unit.blocks()[index];
            if block.has_documentation() {
                continue;
            }
            if block.has_unlocated_documentation() {
                debug!(block = %block.name(), "Skipping block with unlocated documentation");
                continue;
            }
            if !block.is_module() && block.position().body_start() <= block.declaration_start() {
                report.failures.push(BlockError::UnsupportedDialect {
                    block: block.name().to_string(),
                    detail: "body shares the declaration line".into(),
                });
                continue;
            }

            let code_sample = unit.code_sample(block);
            let request = GenerationRequest {
                name: block.name(),
                kind: block.kind(),
                code_sample: &code_sample,
                max_line_length: self.line_length_hint(block),
                language: &self.dialect.name,
            };

            let generated = match generator.generate(&request) {
                Ok(text) if !text.trim().is_empty() => text,
                Ok(_) => {
                    report.failures.push(BlockError::GenerationFailure {
                        block: block.name().to_string(),
                        message: "generator returned no text".into(),
                    });
                    continue;
                }
                Err(e) => {
                    warn!(block = %block.name(), error = %e, "Documentation generation failed");
                    report.failures.push(BlockError::GenerationFailure {
                        block: block.name().to_string(),
                        message: e.message,
                    });
                    continue;
                }
            };

            let indent = block.documentation_indent(self.dialect.indent_width);
            let formatted = format_docstring(&generated, &self.dialect, indent);
            let name = block.name().to_string();
            let inserted = insert_documentation(unit, index, formatted, indent);

            debug!(block = %name, inserted, "Inserted documentation");
            report.inserted_lines += inserted;
            report.touched_blocks.push(name);
        }

        report
    }

    /// Line-length hint handed to the generator; 0 leaves it unconstrained.
    pub fn line_length_hint(&self, block: &CodeBlock) -> usize {
        if block.is_module() {
            return 0;
        }
        let indent = block.documentation_indent(self.dialect.indent_width);
        self.dialect.max_line_length.saturating_sub(indent)
    }

    fn points_at_marker(&self, lines: &[String], start: isize, length: usize) -> bool {
        let Some(first) = to_index(start) else {
            return false;
        };
        first + length <= lines.len() && self.dialect.is_marker_line(&lines[first])
    }
}

/// Shrink already-visited blocks whose body contained a removed span.
///
/// Only the block's own documentation length is subtracted from its own
/// range, so without this an enclosing class keeps its old body end.
fn shrink_enclosing(visited: &mut [CodeBlock], start: isize, length: usize) {
    for outer in visited.iter_mut() {
        let end = outer.position().body_end();
        if outer.declaration_start() <= start && end >= start {
            let shrunk = (end - length as isize).max(start - 1);
            outer.set_position(outer.position().with_body_end(shrunk));
        }
    }
}

/// Splice `formatted` in at the body start of block `index`.
///
/// The block gains a documentation block covering the new lines. Every other
/// block is adjusted for the insertion: blocks declared later shift down and
/// blocks whose body encloses the insertion point grow. Starts of earlier
/// blocks are never at or past the insertion point, so they are unchanged.
fn insert_documentation(
    unit: &mut SourceUnit,
    index: usize,
    formatted: Vec<String>,
    indent: usize,
) -> usize {
    let (lines, blocks) = unit.parts_mut();
    let at = blocks[index].position().body_start();
    let count = formatted.len();
    let offset = (at.max(0) as usize).min(lines.len());
    lines.splice(offset..offset, formatted.iter().cloned());

    for (other, block) in blocks.iter_mut().enumerate() {
        if other != index {
            block.apply_insert(at, count);
        }
    }

    let block = &mut blocks[index];
    let position = block.position();
    block.set_position(position.with_body_end(position.body_end() + count as isize));
    block.set_documentation(DocumentationBlock::new(
        formatted,
        Position::new(indent, at, at + count as isize),
    ));
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BlockKind;
    use crate::generate::GenerationError;
    use crate::unit::lines_of;
    use pretty_assertions::assert_eq;

    fn documented_function() -> SourceUnit {
        let lines = lines_of("def f():\n    \"\"\"doc\"\"\"\n    pass\n");
        let doc = DocumentationBlock::new(vec![lines[1].clone()], Position::new(4, 1, 2));
        let block = CodeBlock::new("f", BlockKind::Function, 0, Position::new(0, 1, 2))
            .with_documentation(doc);
        SourceUnit::new("f.py", lines, vec![block])
    }

    fn stub(_: &GenerationRequest<'_>) -> Result<String, GenerationError> {
        Ok("does a thing".to_string())
    }

    #[test]
    fn removes_single_documentation_block() {
        let mut unit = documented_function();
        let report = DocumentationSplicer::default().remove_documentation(&mut unit);

        assert_eq!(unit.lines(), &["def f():\n", "    pass\n"]);
        let func = unit.block("f").unwrap();
        assert_eq!(func.position().body_end(), 1);
        assert!(!func.has_documentation());
        assert_eq!(report.removed_lines, 1);
        assert!(!report.is_partial());
    }

    #[test]
    fn embeds_into_undocumented_block() {
        let mut unit = documented_function();
        let splicer = DocumentationSplicer::default();
        splicer.remove_documentation(&mut unit);

        let report = splicer.embed_documentation(&mut unit, &stub);

        assert_eq!(
            unit.lines(),
            &[
                "def f():\n",
                "    \"\"\"\n",
                "    does a thing\n",
                "    \"\"\"\n",
                "    pass\n",
            ]
        );
        let func = unit.block("f").unwrap();
        assert_eq!(func.position().body_start(), 1);
        assert_eq!(func.position().body_end(), 1 + 3);
        assert_eq!(func.documentation().unwrap().position(), Position::new(4, 1, 4));
        assert_eq!(report.inserted_lines, 3);
    }

    #[test]
    fn corrupt_position_leaves_lines_and_clears_reference() {
        let lines = lines_of("def f():\n    pass\n    return 1\n");
        let doc = DocumentationBlock::new(vec!["    pass\n".into()], Position::new(4, 1, 2));
        let block = CodeBlock::new("f", BlockKind::Function, 0, Position::new(0, 1, 2))
            .with_documentation(doc);
        let mut unit = SourceUnit::new("f.py", lines.clone(), vec![block]);

        let report = DocumentationSplicer::default().remove_documentation(&mut unit);

        assert_eq!(unit.lines(), lines.as_slice());
        assert_eq!(unit.block("f").unwrap().position(), Position::new(0, 1, 2));
        assert!(!unit.block("f").unwrap().has_documentation());
        assert!(matches!(
            report.failures.as_slice(),
            [BlockError::PositionCorruption { line: 1, .. }]
        ));
    }

    #[test]
    fn generation_failure_skips_only_that_block() {
        let lines = lines_of("def a():\n    pass\ndef b():\n    pass\n");
        let blocks = vec![
            CodeBlock::new("a", BlockKind::Function, 0, Position::new(0, 1, 1)),
            CodeBlock::new("b", BlockKind::Function, 2, Position::new(0, 3, 3)),
        ];
        let mut unit = SourceUnit::new("m.py", lines, blocks);
        let generator = |req: &GenerationRequest<'_>| {
            if req.name == "b" {
                Err(GenerationError::new("quota exceeded"))
            } else {
                Ok("Doc.".to_string())
            }
        };

        let report = DocumentationSplicer::default().embed_documentation(&mut unit, &generator);

        assert!(unit.block("a").unwrap().has_documentation());
        assert!(!unit.block("b").unwrap().has_documentation());
        assert_eq!(unit.block("b").unwrap().declaration_start(), 5);
        assert!(matches!(
            report.failures.as_slice(),
            [BlockError::GenerationFailure { block, message }] if block == "b" && message == "quota exceeded"
        ));
    }

    #[test]
    fn empty_generation_is_a_failure() {
        let mut unit = documented_function();
        let splicer = DocumentationSplicer::default();
        splicer.remove_documentation(&mut unit);
        let blank = |_: &GenerationRequest<'_>| Ok::<_, GenerationError>("  \n".to_string());

        let report = splicer.embed_documentation(&mut unit, &blank);

        assert_eq!(report.inserted_lines, 0);
        assert_eq!(report.failures.len(), 1);
    }

    #[test]
    fn one_line_body_is_unsupported() {
        let lines = lines_of("def f(): pass\n");
        let block = CodeBlock::new("f", BlockKind::Function, 0, Position::new(0, 0, 0));
        let mut unit = SourceUnit::new("m.py", lines, vec![block]);

        let report = DocumentationSplicer::default().embed_documentation(&mut unit, &stub);

        assert_eq!(unit.line_count(), 1);
        assert!(matches!(
            report.failures.as_slice(),
            [BlockError::UnsupportedDialect { .. }]
        ));
    }

    #[test]
    fn removal_shrinks_undocumented_enclosing_block() {
        let lines = lines_of("class A:\n    def m(self):\n        \"\"\"doc\"\"\"\n        pass\nx = 1\n");
        let doc = DocumentationBlock::new(vec![lines[2].clone()], Position::new(8, 2, 3));
        let blocks = vec![
            CodeBlock::new("A", BlockKind::Class, 0, Position::new(0, 1, 3)),
            CodeBlock::new("m", BlockKind::Function, 1, Position::new(4, 2, 3)).with_documentation(doc),
        ];
        let mut unit = SourceUnit::new("m.py", lines, blocks);

        let report = DocumentationSplicer::default().remove_documentation(&mut unit);

        assert_eq!(report.removed_lines, 1);
        assert_eq!(unit.block("A").unwrap().position(), Position::new(0, 1, 2));
        assert_eq!(unit.block("m").unwrap().position(), Position::new(4, 2, 2));
        assert_eq!(unit.lines()[2], "        pass\n");
    }

    #[test]
    fn unlocated_documentation_is_not_duplicated() {
        let lines = lines_of("def f():\n    '''Old.'''\n    pass\n");
        let block = CodeBlock::new("f", BlockKind::Function, 0, Position::new(0, 1, 2))
            .with_unlocated_documentation();
        let mut unit = SourceUnit::new("m.py", lines.clone(), vec![block]);

        let report = DocumentationSplicer::default().embed_documentation(&mut unit, &stub);

        assert_eq!(unit.lines(), lines.as_slice());
        assert_eq!(report.inserted_lines, 0);
        assert!(report.touched_blocks.is_empty());
        assert!(report.failures.is_empty());
    }

    #[test]
    fn line_length_hint_accounts_for_indent() {
        let splicer = DocumentationSplicer::default();
        let method = CodeBlock::new("m", BlockKind::Function, 3, Position::new(4, 4, 6));
        let module = CodeBlock::new("m.py", BlockKind::Module, 0, Position::new(0, 0, 9));
        assert_eq!(splicer.line_length_hint(&method), 79 - 8);
        assert_eq!(splicer.line_length_hint(&module), 0);
    }
}
