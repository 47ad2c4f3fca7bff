//! The per-file pipeline
//!
//! read -> detect language -> parse -> extract -> remove -> embed ->
//! serialize -> atomic write. A file is read once and written at most once.

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use docsplice_blocks::{
    Dialect, DocumentationSplicer, Extraction, GenerationError, GenerationRequest, Generator,
    SpliceReport,
};
use docsplice_fs::{RobustnessConfig, io};
use tracing::{info, warn};

use crate::diff::unified_diff;
use crate::language::require_language;
use crate::report::{FileReport, FileStatus};
use crate::settings::Settings;
use crate::{Error, Result};

/// What a run does to each file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Document undocumented blocks; with `replace`, strip existing
    /// documentation first so every block is regenerated.
    Embed { replace: bool },
    /// Remove all documentation.
    Strip,
}

impl Operation {
    pub fn removes(&self) -> bool {
        matches!(self, Self::Strip | Self::Embed { replace: true })
    }

    pub fn embeds(&self) -> bool {
        matches!(self, Self::Embed { .. })
    }
}

/// Processes single files. Shared read-only by every worker.
#[derive(Clone)]
pub struct FilePipeline {
    settings: Settings,
    operation: Operation,
    dry_run: bool,
    generator: Option<Arc<dyn Generator>>,
    cancel: Arc<AtomicBool>,
    robustness: RobustnessConfig,
}

impl FilePipeline {
    pub fn new(settings: Settings, operation: Operation) -> Self {
        Self {
            settings,
            operation,
            dry_run: false,
            generator: None,
            cancel: Arc::new(AtomicBool::new(false)),
            robustness: RobustnessConfig::default(),
        }
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn with_generator(mut self, generator: Arc<dyn Generator>) -> Self {
        self.generator = Some(generator);
        self
    }

    pub fn with_cancel(mut self, cancel: Arc<AtomicBool>) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }

    pub fn has_generator(&self) -> bool {
        self.generator.is_some()
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.load(Ordering::Relaxed)
    }

    /// Process one file. Structural errors are reported, never propagated,
    /// so one bad file does not stop the others.
    pub fn process(&self, path: &Path) -> FileReport {
        match self.try_process(path) {
            Ok(report) => report,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "File failed");
                FileReport::failed(path, e)
            }
        }
    }

    fn try_process(&self, path: &Path) -> Result<FileReport> {
        if self.is_cancelled() {
            return Ok(FileReport::new(path, FileStatus::Cancelled));
        }

        let text = io::read_text(path)?;
        let (dialect, Extraction { mut unit, failures }) = prepare(path, &text, &self.settings)?;
        let splicer = DocumentationSplicer::new(dialect);

        let mut splice = SpliceReport {
            failures,
            ..SpliceReport::default()
        };
        if self.operation.removes() {
            splice.merge(splicer.remove_documentation(&mut unit));
        }
        if self.operation.embeds() {
            let generator = self.generator.as_deref().ok_or(Error::MissingGenerator)?;
            let guarded = Cancellable {
                inner: generator,
                cancel: &self.cancel,
            };
            splice.merge(splicer.embed_documentation(&mut unit, &guarded));
        }

        let mut report = FileReport::new(path, FileStatus::Unchanged);
        if self.is_cancelled() {
            report.status = FileStatus::Cancelled;
            report.splice = splice;
            return Ok(report);
        }

        let updated = unit.to_text();
        if updated != text {
            if self.dry_run {
                report.diff = Some(unified_diff(path, &text, &updated));
                report.status = FileStatus::WouldModify;
            } else {
                io::write_lines(path, &unit.serialize(), self.robustness)?;
                report.status = FileStatus::Modified;
            }
        }

        info!(
            path = %path.display(),
            status = ?report.status,
            removed = splice.removed_lines,
            inserted = splice.inserted_lines,
            skipped = splice.failures.len(),
            "Processed file"
        );
        report.splice = splice;
        Ok(report)
    }
}

/// Read-only extraction for `path`, used by inspection.
pub fn inspect(path: &Path, settings: &Settings) -> Result<Extraction> {
    let text = io::read_text(path)?;
    let (_, extraction) = prepare(path, &text, settings)?;
    Ok(extraction)
}

/// Detect the language and extract the unit, named after the file.
fn prepare(path: &Path, text: &str, settings: &Settings) -> Result<(Dialect, Extraction)> {
    let language = require_language(path, text.lines().next())?;
    let dialect = language.dialect(settings);
    let module_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let extraction = language.extract(text, &module_name, &dialect)?;
    Ok((dialect, extraction))
}

/// Refuses further generation once the run is cancelled.
struct Cancellable<'a> {
    inner: &'a dyn Generator,
    cancel: &'a AtomicBool,
}

impl Generator for Cancellable<'_> {
    fn generate(
        &self,
        request: &GenerationRequest<'_>,
    ) -> std::result::Result<String, GenerationError> {
        if self.cancel.load(Ordering::Relaxed) {
            return Err(GenerationError::new("cancelled"));
        }
        self.inner.generate(request)
    }
}
