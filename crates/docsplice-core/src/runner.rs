//! Running the pipeline over many files

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use docsplice_blocks::Generator;
use rayon::ThreadPoolBuilder;
use rayon::prelude::*;
use tracing::{debug, info};

use crate::pipeline::{FilePipeline, Operation};
use crate::report::RunReport;
use crate::settings::Settings;
use crate::{Error, Result};

/// Processes every source file under a target on a bounded worker pool.
///
/// Each file is one task that owns its unit from read to write, so workers
/// share nothing but the read-only pipeline and the cancel flag.
#[derive(Clone)]
pub struct Runner {
    pipeline: FilePipeline,
    workers: usize,
}

impl Runner {
    pub fn new(settings: Settings, operation: Operation) -> Self {
        let workers = settings.workers;
        Self {
            pipeline: FilePipeline::new(settings, operation),
            workers,
        }
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.pipeline = self.pipeline.dry_run(dry_run);
        self
    }

    pub fn with_generator(mut self, generator: Arc<dyn Generator>) -> Self {
        self.pipeline = self.pipeline.with_generator(generator);
        self
    }

    pub fn with_cancel(mut self, cancel: Arc<AtomicBool>) -> Self {
        self.pipeline = self.pipeline.with_cancel(cancel);
        self
    }

    /// Override the configured worker count.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Process `target`, a single file or a directory tree.
    pub fn run(&self, target: &Path) -> Result<RunReport> {
        if self.pipeline.operation().embeds() && !self.pipeline.has_generator() {
            return Err(Error::MissingGenerator);
        }

        let files = self.pipeline.settings().walker().walk(target)?;
        debug!(files = files.len(), workers = self.workers, "Starting run");

        let pool = ThreadPoolBuilder::new()
            .num_threads(self.workers)
            .thread_name(|i| format!("docsplice-worker-{}", i))
            .build()?;
        let reports = pool.install(|| {
            files
                .par_iter()
                .map(|path| self.pipeline.process(path))
                .collect::<Vec<_>>()
        });

        let report = RunReport {
            files: reports,
            cancelled: self.pipeline.is_cancelled(),
        };
        info!(
            files = report.files.len(),
            modified = report.modified(),
            failed = report.failed(),
            partial = report.partial(),
            cancelled = report.cancelled,
            "Run finished"
        );
        Ok(report)
    }
}
