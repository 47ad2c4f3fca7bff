//! Shared test utilities for the docsplice workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`sources`]: Python sources with and without documentation
//! - [`generator`]: in-process [`Generator`](docsplice_blocks::Generator) doubles
//! - [`project`]: [`TestProject`] temporary source trees

pub mod generator;
pub mod project;
pub mod sources;

pub use generator::{FailingGenerator, StubGenerator};
pub use project::TestProject;
