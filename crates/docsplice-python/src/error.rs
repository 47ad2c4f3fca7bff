//! Error types for the Python provider

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Failed to load the Python grammar: {0}")]
    Grammar(#[from] tree_sitter::LanguageError),

    #[error("Parser produced no tree for {module}")]
    NoTree { module: String },

    /// The source does not parse. `line` is 0-indexed.
    #[error("Syntax error in {module} at line {line}")]
    Syntax { module: String, line: usize },
}

impl From<Error> for docsplice_blocks::Error {
    fn from(e: Error) -> Self {
        docsplice_blocks::Error::parse("Python", e.to_string())
    }
}
