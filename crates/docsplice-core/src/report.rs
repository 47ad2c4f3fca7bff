//! Per-file and per-run outcomes

use std::path::PathBuf;

use docsplice_blocks::SpliceReport;
use serde::Serialize;

/// What happened to one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "status", content = "reason")]
pub enum FileStatus {
    Unchanged,
    Modified,
    /// Dry run: the file would have been rewritten.
    WouldModify,
    /// Stopped before writing; the file is untouched.
    Cancelled,
    /// A structural error; the file is untouched.
    Failed(String),
}

#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    pub status: FileStatus,
    pub splice: SpliceReport,
    /// Unified diff, produced on dry runs only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff: Option<String>,
}

impl FileReport {
    pub fn new(path: impl Into<PathBuf>, status: FileStatus) -> Self {
        Self {
            path: path.into(),
            status,
            splice: SpliceReport::default(),
            diff: None,
        }
    }

    pub fn failed(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::new(path, FileStatus::Failed(reason.to_string()))
    }

    /// Some blocks were skipped but the file was otherwise processed.
    pub fn is_partial(&self) -> bool {
        self.splice.is_partial()
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct RunReport {
    pub files: Vec<FileReport>,
    pub cancelled: bool,
}

impl RunReport {
    fn count(&self, status: &FileStatus) -> usize {
        self.files.iter().filter(|f| &f.status == status).count()
    }

    pub fn modified(&self) -> usize {
        self.count(&FileStatus::Modified) + self.count(&FileStatus::WouldModify)
    }

    pub fn unchanged(&self) -> usize {
        self.count(&FileStatus::Unchanged)
    }

    pub fn failed(&self) -> usize {
        self.files
            .iter()
            .filter(|f| matches!(f.status, FileStatus::Failed(_)))
            .count()
    }

    pub fn partial(&self) -> usize {
        self.files.iter().filter(|f| f.is_partial()).count()
    }

    pub fn removed_lines(&self) -> usize {
        self.files.iter().map(|f| f.splice.removed_lines).sum()
    }

    pub fn inserted_lines(&self) -> usize {
        self.files.iter().map(|f| f.splice.inserted_lines).sum()
    }

    pub fn has_failures(&self) -> bool {
        self.failed() > 0
    }
}
