//! Python parse-tree provider for docsplice.
//!
//! Wraps `tree-sitter-python` and reduces a file to the
//! [`docsplice_blocks::ParseTree`] descriptors the block extractor consumes.
//! [`extract`] runs both steps for a whole file.

pub mod error;
pub mod parser;

pub use error::{Error, Result};
pub use parser::PythonParser;

use docsplice_blocks::{BlockExtractor, Dialect, Extraction, lines_of};

/// Parse `source` and extract its code blocks with `dialect`.
pub fn extract(
    source: &str,
    module_name: &str,
    dialect: &Dialect,
) -> std::result::Result<Extraction, docsplice_blocks::Error> {
    let tree = PythonParser::new().parse(source, module_name)?;
    BlockExtractor::new(dialect.clone()).extract(&tree, lines_of(source))
}
