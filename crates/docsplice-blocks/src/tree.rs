//! Language-neutral parse tree descriptors.
//!
//! A parse-tree provider (e.g. `docsplice-python`) reduces a language's
//! syntax tree to these descriptors. The core never parses grammar itself.

use serde::{Deserialize, Serialize};

/// One class or function node reported by a provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeDescriptor {
    pub name: String,
    /// Kind name, resolved against [`crate::BlockKind`].
    pub kind: String,
    /// First source line of the node, 0-indexed.
    pub start_line: usize,
    /// Last source line of the node, 0-indexed and inclusive.
    pub end_line: usize,
    /// Column offset of the declaration, when known.
    pub column: Option<usize>,
    /// Text of the attached documentation string, when the provider found one.
    pub documentation: Option<String>,
}

impl NodeDescriptor {
    pub fn new(
        name: impl Into<String>,
        kind: impl Into<String>,
        start_line: usize,
        end_line: usize,
    ) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            start_line,
            end_line,
            column: None,
            documentation: None,
        }
    }

    pub fn with_column(mut self, column: usize) -> Self {
        self.column = Some(column);
        self
    }

    pub fn with_documentation(mut self, documentation: impl Into<String>) -> Self {
        self.documentation = Some(documentation.into());
        self
    }
}

/// Everything a provider reports for one file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseTree {
    /// Name given to the module block, usually the file path.
    pub module_name: String,
    pub module_documentation: Option<String>,
    pub nodes: Vec<NodeDescriptor>,
}

impl ParseTree {
    pub fn new(module_name: impl Into<String>) -> Self {
        Self {
            module_name: module_name.into(),
            ..Self::default()
        }
    }

    pub fn with_module_documentation(mut self, documentation: impl Into<String>) -> Self {
        self.module_documentation = Some(documentation.into());
        self
    }

    pub fn with_node(mut self, node: NodeDescriptor) -> Self {
        self.nodes.push(node);
        self
    }
}
