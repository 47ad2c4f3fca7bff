//! Tree-sitter walk producing [`ParseTree`] descriptors

use docsplice_blocks::{NodeDescriptor, ParseTree};
use tracing::debug;
use tree_sitter::{Node, Parser};

use crate::error::{Error, Result};

const FUNCTION: &str = "function_definition";
const CLASS: &str = "class_definition";
const DECORATED: &str = "decorated_definition";

/// Reduces Python source to the descriptors the block extractor consumes.
///
/// Every class and function is reported, however deeply nested, as a flat
/// list in source order. Decorated definitions are reported from their
/// `def`/`class` line, never from the decorator.
#[derive(Debug, Default, Clone, Copy)]
pub struct PythonParser;

impl PythonParser {
    pub fn new() -> Self {
        Self
    }

    pub fn supports_extension(&self, ext: &str) -> bool {
        matches!(ext, "py" | "pyi")
    }

    /// Parse `source` into a tree named `module_name`.
    pub fn parse(&self, source: &str, module_name: &str) -> Result<ParseTree> {
        let mut parser = Parser::new();
        parser.set_language(&tree_sitter_python::language())?;

        let tree = parser.parse(source, None).ok_or_else(|| Error::NoTree {
            module: module_name.to_string(),
        })?;
        let root = tree.root_node();

        if root.has_error() {
            return Err(Error::Syntax {
                module: module_name.to_string(),
                line: first_error_line(&root).unwrap_or(0),
            });
        }

        let mut parse_tree = ParseTree::new(module_name);
        if let Some(doc) = leading_docstring(&root, source) {
            parse_tree = parse_tree.with_module_documentation(doc);
        }

        let mut nodes = Vec::new();
        collect_definitions(&root, source, &mut nodes);
        debug!(module = module_name, nodes = nodes.len(), "Parsed Python source");

        parse_tree.nodes = nodes;
        Ok(parse_tree)
    }
}

fn collect_definitions(node: &Node, source: &str, out: &mut Vec<NodeDescriptor>) {
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        let definition = if child.kind() == DECORATED {
            match child.child_by_field_name("definition") {
                Some(inner) => inner,
                None => continue,
            }
        } else {
            child
        };

        match definition.kind() {
            FUNCTION => out.push(describe(&definition, "function", source)),
            CLASS => out.push(describe(&definition, "class", source)),
            _ => {}
        }
        collect_definitions(&definition, source, out);
    }
}

fn describe(node: &Node, kind: &str, source: &str) -> NodeDescriptor {
    let name = node
        .child_by_field_name("name")
        .map(|n| node_text(&n, source).to_string())
        .unwrap_or_default();
    let start = node.start_position();

    let mut descriptor = NodeDescriptor::new(name, kind, start.row, last_row(node))
        .with_column(start.column);
    let doc = node
        .child_by_field_name("body")
        .and_then(|body| leading_docstring(&body, source));
    if let Some(doc) = doc {
        descriptor = descriptor.with_documentation(doc);
    }
    descriptor
}

/// Row of the last character covered by `node`.
fn last_row(node: &Node) -> usize {
    let end = node.end_position();
    if end.column == 0 && end.row > node.start_position().row {
        end.row - 1
    } else {
        end.row
    }
}

/// Text of a string literal opening `body` (a module or block node).
fn leading_docstring(body: &Node, source: &str) -> Option<String> {
    let mut cursor = body.walk();
    let first = body
        .named_children(&mut cursor)
        .find(|n| n.kind() != "comment")?;
    if first.kind() != "expression_statement" {
        return None;
    }
    let literal = first.named_child(0)?;
    if literal.kind() != "string" {
        return None;
    }
    Some(strip_quotes(node_text(&literal, source)))
}

fn strip_quotes(raw: &str) -> String {
    let unprefixed = raw.trim_start_matches(|c: char| "rRbBuUfF".contains(c));
    for quote in ["\"\"\"", "'''", "\"", "'"] {
        if let Some(inner) = unprefixed
            .strip_prefix(quote)
            .and_then(|s| s.strip_suffix(quote))
        {
            return inner.trim().to_string();
        }
    }
    unprefixed.trim().to_string()
}

fn node_text<'a>(node: &Node, source: &'a str) -> &'a str {
    source.get(node.byte_range()).unwrap_or("")
}

fn first_error_line(node: &Node) -> Option<usize> {
    if node.is_error() || node.is_missing() {
        return Some(node.start_position().row);
    }
    let mut cursor = node.walk();
    let children: Vec<Node> = node.children(&mut cursor).collect();
    children
        .iter()
        .filter(|child| child.has_error())
        .find_map(first_error_line)
}
