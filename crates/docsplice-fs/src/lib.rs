//! Filesystem collaborator for docsplice
//!
//! Reads a source file once, writes it back once with write-to-temp-then-rename,
//! discovers source files under a directory, and loads configuration files in
//! any supported format.

pub mod config;
pub mod error;
pub mod io;
pub mod walk;

pub use config::{ConfigStore, Format};
pub use error::{Error, Result};
pub use io::RobustnessConfig;
pub use walk::{DEFAULT_IGNORED_DIRS, SourceWalker};
