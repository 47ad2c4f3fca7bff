//! Generator doubles that never leave the process.

use std::sync::Mutex;

use docsplice_blocks::{GenerationError, GenerationRequest, Generator};

/// Answers every request with `Summary of <name>.` and records the names
/// it was asked about, in call order.
#[derive(Debug, Default)]
pub struct StubGenerator {
    requests: Mutex<Vec<String>>,
}

impl StubGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Block names requested so far.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

impl Generator for StubGenerator {
    fn generate(&self, request: &GenerationRequest<'_>) -> Result<String, GenerationError> {
        self.requests.lock().unwrap().push(request.name.to_string());
        Ok(format!("Summary of {}.", request.name))
    }
}

/// Fails every request for the named blocks and succeeds like
/// [`StubGenerator`] for the rest.
#[derive(Debug, Default)]
pub struct FailingGenerator {
    failing: Vec<String>,
}

impl FailingGenerator {
    /// Fail for every block.
    pub fn always() -> Self {
        Self::default()
    }

    /// Fail only for `names`.
    pub fn for_blocks(names: &[&str]) -> Self {
        Self {
            failing: names.iter().map(|n| n.to_string()).collect(),
        }
    }
}

impl Generator for FailingGenerator {
    fn generate(&self, request: &GenerationRequest<'_>) -> Result<String, GenerationError> {
        if self.failing.is_empty() || self.failing.iter().any(|n| n == request.name) {
            Err(GenerationError::new(format!("no documentation for {}", request.name)))
        } else {
            Ok(format!("Summary of {}.", request.name))
        }
    }
}
