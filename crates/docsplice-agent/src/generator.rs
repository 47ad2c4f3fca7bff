//! [`Generator`] implementation backed by an external program

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::time::Duration;

use backoff::ExponentialBackoffBuilder;
use docsplice_blocks::{GenerationError, GenerationRequest, Generator};
use tracing::{debug, warn};

use crate::discovery::resolve_command;
use crate::error::{AgentError, Result};
use crate::subprocess::run_with_input;
use crate::types::{GenerationPayload, GeneratorConfig};

/// Runs the configured program once per documentation request.
///
/// Shared by every worker thread. The cancel flag is shared with whoever
/// stops the run (the CLI's Ctrl-C handler).
#[derive(Debug, Clone)]
pub struct CommandGenerator {
    program: PathBuf,
    config: GeneratorConfig,
    cancel: Arc<AtomicBool>,
    initial_backoff: Duration,
}

impl CommandGenerator {
    /// Build from configuration, resolving the program up front.
    pub fn new(config: GeneratorConfig) -> Result<Self> {
        let command = config.command.as_deref().ok_or(AgentError::NotConfigured)?;
        let program = resolve_command(command)?;
        Ok(Self {
            program,
            config,
            cancel: Arc::new(AtomicBool::new(false)),
            initial_backoff: Duration::from_millis(250),
        })
    }

    pub fn with_cancel(mut self, cancel: Arc<AtomicBool>) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn with_initial_backoff(mut self, interval: Duration) -> Self {
        self.initial_backoff = interval;
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn cancel_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancel)
    }

    /// Run the program, retrying transient failures up to `retries` times.
    pub fn run(&self, request: &GenerationRequest<'_>) -> Result<String> {
        let payload = GenerationPayload::from_request(request, self.config.model.clone());
        let input = serde_json::to_vec(&payload)?;
        let timeout = Duration::from_secs(self.config.timeout_secs.max(1));
        let attempts = AtomicU32::new(0);

        let policy = ExponentialBackoffBuilder::new()
            .with_initial_interval(self.initial_backoff)
            .with_max_elapsed_time(None)
            .build();

        let operation = || {
            let attempt = attempts.fetch_add(1, Ordering::Relaxed);
            let outcome = run_with_input(
                &self.program,
                &self.config.args,
                input.clone(),
                timeout,
                &self.cancel,
            );
            match outcome {
                Ok(text) => Ok(text),
                Err(e) if e.is_transient() && attempt < self.config.retries => {
                    warn!(block = request.name, attempt, error = %e, "Generator failed, retrying");
                    Err(backoff::Error::transient(e))
                }
                Err(e) => Err(backoff::Error::permanent(e)),
            }
        };

        let text = backoff::retry(policy, operation).map_err(|e| match e {
            backoff::Error::Permanent(err) => err,
            backoff::Error::Transient { err, .. } => err,
        })?;
        debug!(block = request.name, bytes = text.len(), "Generated documentation");
        Ok(text)
    }
}

impl Generator for CommandGenerator {
    fn generate(
        &self,
        request: &GenerationRequest<'_>,
    ) -> std::result::Result<String, GenerationError> {
        self.run(request).map_err(|e| GenerationError::new(e.to_string()))
    }
}
