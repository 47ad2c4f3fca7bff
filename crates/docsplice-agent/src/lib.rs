//! External documentation generator integration for docsplice
//!
//! Documentation text comes from a user-configured program. This crate
//! provides the [`CommandGenerator`], which implements the splicer's
//! [`docsplice_blocks::Generator`] seam by running that program once per
//! block. It handles:
//!
//! - Locating the program on `PATH` before any file is touched
//! - Sending the request as JSON on stdin and reading the text from stdout
//! - Per-call timeouts and bounded retries with exponential backoff
//! - Cooperative cancellation through a shared flag
//!
//! The request format mirrors a chat completion: a system message carrying
//! [`docsplice_blocks::STYLE_PROMPT`] and a user message carrying the
//! block-specific prompt.

pub mod discovery;
pub mod error;
pub mod generator;
pub mod subprocess;
pub mod types;

pub use discovery::resolve_command;
pub use error::{AgentError, Result};
pub use generator::CommandGenerator;
pub use types::{BlockInfo, GenerationPayload, GeneratorConfig, Message};
