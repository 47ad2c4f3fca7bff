//! Code block positions and documentation splicing for docsplice.
//!
//! This crate is language agnostic. A parse-tree provider reduces a source
//! file to [`ParseTree`] descriptors; [`BlockExtractor`] turns those and the
//! file's raw lines into a [`SourceUnit`]; [`DocumentationSplicer`] then
//! removes and re-inserts documentation while keeping every recorded
//! [`Position`] correct.
//!
//! ```text
//! text --lines--> BlockExtractor --> SourceUnit
//!                                      |
//!                    DocumentationSplicer::remove_documentation
//!                                      |
//!                    DocumentationSplicer::embed_documentation (Generator)
//!                                      |
//!                               SourceUnit::serialize
//! ```
//!
//! # Position conventions
//!
//! All line numbers are 0-indexed. A code block's body end is the last line
//! of the block; a documentation block's body end is the line after its
//! closing marker. The module block always ends at the file's line count.

pub mod block;
pub mod dialect;
pub mod error;
pub mod extract;
pub mod format;
pub mod generate;
pub mod position;
pub mod splice;
pub mod tree;
pub mod unit;

pub use block::{BlockKind, CodeBlock, DocumentationBlock};
pub use dialect::Dialect;
pub use error::{BlockError, Error, Result};
pub use extract::{BlockExtractor, Extraction};
pub use format::format_docstring;
pub use generate::{GenerationError, GenerationRequest, Generator, STYLE_PROMPT};
pub use position::{Position, UNSET};
pub use splice::{DocumentationSplicer, SpliceReport};
pub use tree::{NodeDescriptor, ParseTree};
pub use unit::{SourceUnit, lines_of};
