//! Run settings loaded from `docsplice.toml` (or `.json` / `.yaml`)

use std::path::{Path, PathBuf};

use docsplice_agent::GeneratorConfig;
use docsplice_blocks::Dialect;
use docsplice_fs::{ConfigStore, DEFAULT_IGNORED_DIRS, SourceWalker};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{Error, Result};

/// File stem probed in the target directory.
pub const CONFIG_STEM: &str = "docsplice";

/// Dialect fields a config file may override.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DialectOverrides {
    pub max_line_length: Option<usize>,
    pub indent_width: Option<usize>,
}

/// Everything a run needs besides the target path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Files processed concurrently.
    pub workers: usize,
    pub extensions: Vec<String>,
    /// Directory names never descended into.
    pub ignored_dirs: Vec<String>,
    pub generator: GeneratorConfig,
    pub dialect: DialectOverrides,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            workers: 4,
            extensions: vec!["py".to_string()],
            ignored_dirs: DEFAULT_IGNORED_DIRS.iter().map(|d| d.to_string()).collect(),
            generator: GeneratorConfig::default(),
            dialect: DialectOverrides::default(),
        }
    }
}

impl Settings {
    /// Load settings for a run over `target`.
    ///
    /// An `explicit` path must exist. Otherwise `docsplice.*` is looked up in
    /// `target` (or its parent when `target` is a file) and defaults are used
    /// when there is none.
    pub fn load(target: &Path, explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) if path.is_file() => Some(path.to_path_buf()),
            Some(path) => {
                return Err(Error::ConfigNotFound {
                    path: path.to_path_buf(),
                });
            }
            None => ConfigStore::discover(&config_dir(target), CONFIG_STEM),
        };

        let settings = match path {
            Some(path) => {
                debug!(path = %path.display(), "Using config file");
                ConfigStore::new().load::<Settings>(&path)?
            }
            None => Settings::default(),
        };
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if self.workers == 0 {
            return Err(Error::InvalidConfig {
                message: "workers must be at least 1".into(),
            });
        }
        if self.extensions.is_empty() {
            return Err(Error::InvalidConfig {
                message: "at least one extension is required".into(),
            });
        }
        self.dialect_for(Dialect::python()).validate()?;
        Ok(())
    }

    /// `base` with this file's overrides applied.
    pub fn dialect_for(&self, base: Dialect) -> Dialect {
        Dialect {
            max_line_length: self.dialect.max_line_length.unwrap_or(base.max_line_length),
            indent_width: self.dialect.indent_width.unwrap_or(base.indent_width),
            ..base
        }
    }

    pub fn walker(&self) -> SourceWalker {
        SourceWalker::new(self.extensions.iter().cloned(), self.ignored_dirs.iter().cloned())
    }
}

fn config_dir(target: &Path) -> PathBuf {
    if target.is_file() {
        target
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."))
    } else {
        target.to_path_buf()
    }
}
