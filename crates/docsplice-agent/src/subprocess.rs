//! Running the generator program with a timeout and cancellation
//!
//! The child runs on a current-thread tokio runtime: stdin is fed while
//! stdout/stderr are collected, so a chatty program never blocks on a full
//! pipe. Dropping the child on timeout or cancellation kills it.

use std::path::Path;
use std::process::Stdio;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::error::{AgentError, Result};

const CANCEL_POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Run `program args...`, write `input` to its stdin and return its stdout.
///
/// The child is killed when `timeout` elapses or `cancel` becomes true.
pub fn run_with_input(
    program: &Path,
    args: &[String],
    input: Vec<u8>,
    timeout: Duration,
    cancel: &AtomicBool,
) -> Result<String> {
    if cancel.load(Ordering::Relaxed) {
        return Err(AgentError::Cancelled);
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(run(program, args, input, timeout, cancel))
}

async fn run(
    program: &Path,
    args: &[String],
    input: Vec<u8>,
    timeout: Duration,
    cancel: &AtomicBool,
) -> Result<String> {
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()?;

    let stdin = child.stdin.take();
    let feed = async move {
        if let Some(mut stdin) = stdin {
            // A program that ignores its input may close the pipe early.
            let _ = stdin.write_all(&input).await;
        }
    };
    let finished = async move {
        let ((), output) = tokio::join!(feed, child.wait_with_output());
        output
    };

    let started = Instant::now();
    let output = tokio::select! {
        outcome = tokio::time::timeout(timeout, finished) => match outcome {
            Ok(output) => output?,
            Err(_) => {
                warn!(program = %program.display(), ?timeout, "Generator timed out");
                return Err(AgentError::Timeout(timeout));
            }
        },
        () = cancelled(cancel) => {
            debug!(program = %program.display(), "Generator cancelled");
            return Err(AgentError::Cancelled);
        }
    };

    debug!(
        program = %program.display(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        code = ?output.status.code(),
        "Generator finished"
    );

    if output.status.success() {
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    } else {
        Err(AgentError::CommandFailed {
            code: output.status.code().unwrap_or(-1),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        })
    }
}

/// Resolves once `cancel` is set.
async fn cancelled(cancel: &AtomicBool) {
    let mut ticks = tokio::time::interval(CANCEL_POLL_INTERVAL);
    loop {
        ticks.tick().await;
        if cancel.load(Ordering::Relaxed) {
            return;
        }
    }
}
