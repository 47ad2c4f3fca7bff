//! Source file discovery

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use tracing::{debug, trace};
use walkdir::{DirEntry, WalkDir};

use crate::{Error, Result};

/// Directory names never descended into.
pub const DEFAULT_IGNORED_DIRS: &[&str] = &[
    ".venv",
    "venv",
    ".env",
    "__pycache__",
    ".git",
    ".mypy_cache",
    ".pytest_cache",
    ".ipynb_checkpoints",
    "node_modules",
    ".vscode",
    "build",
    "dist",
    "site-packages",
    ".idea",
    "logs",
    "log",
    "assets",
    "static",
    ".tox",
    ".sass-cache",
    ".cache",
    ".dockerignore",
    ".hypothesis",
    ".eggs",
    "eggs",
    "parts",
    "bin",
    "lib64",
    "include",
    "share",
    "local",
    "instance",
    ".bundle",
    ".config",
    ".yarn-cache",
    "htmlcov",
    "doc",
    "docs",
    ".DS_Store",
    "Thumbs.db",
];

/// Finds source files by extension below a root, skipping ignored directories.
#[derive(Debug, Clone)]
pub struct SourceWalker {
    extensions: BTreeSet<String>,
    ignored_dirs: BTreeSet<String>,
}

impl Default for SourceWalker {
    fn default() -> Self {
        Self::new(["py"], DEFAULT_IGNORED_DIRS.iter().copied())
    }
}

impl SourceWalker {
    pub fn new<E, I>(extensions: E, ignored_dirs: I) -> Self
    where
        E: IntoIterator,
        E::Item: Into<String>,
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self {
            extensions: extensions
                .into_iter()
                .map(|e| e.into().trim_start_matches('.').to_lowercase())
                .collect(),
            ignored_dirs: ignored_dirs.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether `path` has one of the walked extensions.
    pub fn matches(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| self.extensions.contains(&e.to_lowercase()))
    }

    fn is_ignored(&self, entry: &DirEntry) -> bool {
        entry.depth() > 0
            && entry.file_type().is_dir()
            && entry
                .file_name()
                .to_str()
                .is_some_and(|name| self.ignored_dirs.contains(name))
    }

    /// Collect matching files under `root`, sorted by path.
    ///
    /// A file given directly as `root` is returned as-is, whatever its
    /// extension.
    pub fn walk(&self, root: &Path) -> Result<Vec<PathBuf>> {
        let root = dunce::canonicalize(root).map_err(|e| Error::io(root, e))?;
        if root.is_file() {
            return Ok(vec![root]);
        }

        let mut files = Vec::new();
        let walker = WalkDir::new(&root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| {
                let ignored = self.is_ignored(entry);
                if ignored {
                    trace!(path = %entry.path().display(), "Skipping ignored directory");
                }
                !ignored
            });

        for entry in walker {
            let entry = entry.map_err(|e| Error::Walk {
                path: root.clone(),
                message: e.to_string(),
            })?;
            if entry.file_type().is_file() && self.matches(entry.path()) {
                files.push(entry.into_path());
            }
        }

        debug!(root = %root.display(), files = files.len(), "Discovered source files");
        Ok(files)
    }
}
