//! Building a [`SourceUnit`] from a provider's parse tree

use tracing::{debug, warn};

use crate::block::{BlockKind, CodeBlock, DocumentationBlock};
use crate::dialect::Dialect;
use crate::error::{BlockError, Error, Result};
use crate::position::Position;
use crate::tree::{NodeDescriptor, ParseTree};
use crate::unit::SourceUnit;

/// A unit plus the blocks that could only be partially extracted.
#[derive(Debug)]
pub struct Extraction {
    pub unit: SourceUnit,
    pub failures: Vec<BlockError>,
}

impl Extraction {
    pub fn is_partial(&self) -> bool {
        !self.failures.is_empty()
    }
}

/// Derives code block positions from parse tree descriptors and raw lines.
#[derive(Debug, Clone, Default)]
pub struct BlockExtractor {
    dialect: Dialect,
}

impl BlockExtractor {
    pub fn new(dialect: Dialect) -> Self {
        Self { dialect }
    }

    pub fn dialect(&self) -> &Dialect {
        &self.dialect
    }

    /// Produce one code block per module, class and function node.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NodeOutOfBounds`] when the tree does not describe
    /// `lines`. Per-block problems are collected in
    /// [`Extraction::failures`] instead.
    pub fn extract(&self, tree: &ParseTree, lines: Vec<String>) -> Result<Extraction> {
        let mut blocks = Vec::with_capacity(tree.nodes.len() + 1);
        let mut failures = Vec::new();

        let module = self.module_block(tree, &lines, &mut failures);
        blocks.push(module);

        for node in &tree.nodes {
            if node.start_line > node.end_line || node.end_line >= lines.len() {
                return Err(Error::NodeOutOfBounds {
                    name: node.name.clone(),
                    start: node.start_line,
                    end: node.end_line,
                    line_count: lines.len(),
                });
            }

            let kind = match node.kind.parse::<BlockKind>() {
                Ok(BlockKind::Module) => {
                    failures.push(BlockError::UnsupportedDialect {
                        block: node.name.clone(),
                        detail: "nested module nodes are not supported".into(),
                    });
                    continue;
                }
                Ok(kind) => kind,
                Err(unknown) => {
                    warn!(block = %node.name, kind = %unknown, "Skipping node of unknown kind");
                    failures.push(BlockError::UnsupportedDialect {
                        block: node.name.clone(),
                        detail: format!("unknown block kind '{}'", unknown),
                    });
                    continue;
                }
            };

            let mut block = self.node_block(node, kind, &lines);
            if node.documentation.is_some() {
                block = match self.documentation_for(&block, &lines) {
                    Some(doc) => block.with_documentation(doc),
                    None => {
                        warn!(block = %node.name, "Documentation reported but marker not found");
                        failures.push(BlockError::MarkerNotFound {
                            block: node.name.clone(),
                            marker: self.dialect.canonical_marker.clone(),
                        });
                        block.with_unlocated_documentation()
                    }
                };
            }
            blocks.push(block);
        }

        debug!(
            module = %tree.module_name,
            blocks = blocks.len(),
            failures = failures.len(),
            "Extracted code blocks"
        );

        Ok(Extraction {
            unit: SourceUnit::new(tree.module_name.clone(), lines, blocks),
            failures,
        })
    }

    fn module_block(
        &self,
        tree: &ParseTree,
        lines: &[String],
        failures: &mut Vec<BlockError>,
    ) -> CodeBlock {
        let body_start = match lines.first() {
            Some(first) if self.dialect.has_shebang(first) => 1,
            _ => 0,
        };
        let position = Position::new(0, body_start, lines.len() as isize);
        let module = CodeBlock::new(tree.module_name.clone(), BlockKind::Module, 0, position);

        if tree.module_documentation.is_none() {
            return module;
        }
        match self.documentation_for(&module, lines) {
            Some(doc) => module.with_documentation(doc),
            None => {
                failures.push(BlockError::MarkerNotFound {
                    block: tree.module_name.clone(),
                    marker: self.dialect.canonical_marker.clone(),
                });
                module.with_unlocated_documentation()
            }
        }
    }

    fn node_block(&self, node: &NodeDescriptor, kind: BlockKind, lines: &[String]) -> CodeBlock {
        let declaration_start = node.start_line;
        let body_start = (declaration_start..node.end_line)
            .find(|&index| self.dialect.opens_block(&lines[index]))
            .map(|index| index + 1)
            .unwrap_or_else(|| {
                debug!(block = %node.name, "No block opener found, using declaration line");
                declaration_start
            });

        let position = Position::new(
            node.column.unwrap_or(0),
            body_start as isize,
            node.end_line as isize,
        );
        CodeBlock::new(node.name.clone(), kind, declaration_start as isize, position)
    }

    /// Locate the documentation text inside `owner`'s body.
    fn documentation_for(&self, owner: &CodeBlock, lines: &[String]) -> Option<DocumentationBlock> {
        let from = usize::try_from(owner.position().body_start()).ok()?;
        let last = usize::try_from(owner.position().body_end())
            .ok()?
            .min(lines.len().checked_sub(1)?);

        let (start, end) = self.scan_markers(lines, from, last)?;
        let position = Position::new(
            owner.documentation_indent(self.dialect.indent_width),
            start as isize,
            end as isize,
        );
        Some(DocumentationBlock::new(lines[start..end].to_vec(), position))
    }

    /// Find the opening marker line and the line after the closing one.
    ///
    /// Documentation must be the first statement of the body, so only the
    /// first line after blanks and comments may open it.
    fn scan_markers(&self, lines: &[String], from: usize, last: usize) -> Option<(usize, usize)> {
        let marker = self.dialect.canonical_marker.as_str();
        let opening =
            (from..=last).find(|&index| !self.dialect.is_blank_or_comment(&lines[index]))?;
        if !self.dialect.is_marker_line(&lines[opening]) {
            return None;
        }
        if self.dialect.is_single_line_doc(&lines[opening]) {
            return Some((opening, opening + 1));
        }

        (opening + 1..=last)
            .find(|&index| {
                let trimmed = lines[index].trim();
                trimmed.starts_with(marker) || trimmed.ends_with(marker)
            })
            .map(|closing| (opening, closing + 1))
    }
}
