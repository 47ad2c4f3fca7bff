//! Error types for docsplice-blocks

use serde::Serialize;

pub type Result<T> = std::result::Result<T, Error>;

/// Structural failures that abort processing of a whole source unit.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Failed to parse {language} source: {message}")]
    Parse { language: String, message: String },

    #[error("Node {name} spans lines {start}..={end} outside a {line_count}-line file")]
    NodeOutOfBounds {
        name: String,
        start: usize,
        end: usize,
        line_count: usize,
    },

    #[error("Invalid dialect: {0}")]
    InvalidDialect(String),
}

impl Error {
    pub fn parse(language: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            language: language.into(),
            message: message.into(),
        }
    }
}

/// Failures scoped to a single code block.
///
/// These never abort a pass over a unit: the block is skipped and the
/// failure is carried in the pass report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BlockError {
    /// A documentation string was reported but its closing marker is missing.
    #[error("documentation marker {marker} not found for {block}")]
    MarkerNotFound { block: String, marker: String },

    /// A recorded position no longer points at marker text after re-basing.
    #[error("position corruption in {block}: line {line} does not start with {marker}")]
    PositionCorruption {
        block: String,
        line: isize,
        marker: String,
    },

    /// The generation collaborator failed, timed out or was cancelled.
    #[error("documentation generation failed for {block}: {message}")]
    GenerationFailure { block: String, message: String },

    /// The block cannot be handled by the dialect's formatting rules.
    #[error("unsupported block {block}: {detail}")]
    UnsupportedDialect { block: String, detail: String },
}

impl BlockError {
    /// Name of the block the failure belongs to.
    pub fn block(&self) -> &str {
        match self {
            Self::MarkerNotFound { block, .. }
            | Self::PositionCorruption { block, .. }
            | Self::GenerationFailure { block, .. }
            | Self::UnsupportedDialect { block, .. } => block,
        }
    }
}
