//! Core orchestration layer for docsplice
//!
//! This crate ties the block engine to its collaborators:
//!
//! - **Settings**: `docsplice.toml` / `.json` / `.yaml` with defaults
//! - **Language detection**: which parse-tree provider handles a file
//! - **FilePipeline**: read, extract, remove, embed and write one file
//! - **Runner**: the pipeline over a directory tree on a bounded worker pool
//!
//! # Architecture
//!
//! ```text
//!                    docsplice-cli
//!                         |
//!                   docsplice-core
//!                         |
//!     +-----------+-------+---------+--------------+
//!     |           |                 |              |
//! docsplice-fs  docsplice-python  docsplice-agent  docsplice-blocks
//! ```

pub mod diff;
pub mod error;
pub mod language;
pub mod pipeline;
pub mod report;
pub mod runner;
pub mod settings;

pub use diff::unified_diff;
pub use error::{Error, Result};
pub use language::Language;
pub use pipeline::{FilePipeline, Operation, inspect};
pub use report::{FileReport, FileStatus, RunReport};
pub use runner::Runner;
pub use settings::{CONFIG_STEM, DialectOverrides, Settings};
