//! Ctrl-C handling

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use colored::Colorize;
use tracing::{debug, warn};

/// Set `cancel` on the first Ctrl-C.
///
/// The listener runs a single-threaded tokio runtime on its own thread; the
/// workers never see tokio. Files finished before the signal keep their
/// writes, the rest are left untouched.
pub fn cancel_on_ctrl_c(cancel: Arc<AtomicBool>) {
    let spawned = thread::Builder::new()
        .name("docsplice-signal".into())
        .spawn(move || {
            let runtime = match tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
            {
                Ok(runtime) => runtime,
                Err(e) => {
                    warn!(error = %e, "Ctrl-C handler unavailable");
                    return;
                }
            };
            if runtime.block_on(tokio::signal::ctrl_c()).is_ok() {
                eprintln!("{} finishing in-flight files", "Cancelling:".yellow().bold());
                cancel.store(true, Ordering::Relaxed);
            }
        });
    if let Err(e) = spawned {
        warn!(error = %e, "Could not start signal listener");
    } else {
        debug!("Ctrl-C cancels the run");
    }
}
