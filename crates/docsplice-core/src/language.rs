//! Mapping files to a parse-tree provider

use std::fmt;
use std::path::Path;

use docsplice_blocks::{Dialect, Extraction};

use crate::settings::Settings;
use crate::{Error, Result};

/// Languages with a parse-tree provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    Python,
}

impl Language {
    /// Pick a language from the extension, or from a shebang for
    /// extensionless scripts.
    pub fn detect(path: &Path, first_line: Option<&str>) -> Option<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if docsplice_python::PythonParser::new().supports_extension(ext) => {
                Some(Self::Python)
            }
            Some(_) => None,
            None => first_line
                .filter(|line| line.starts_with("#!") && line.contains("python"))
                .map(|_| Self::Python),
        }
    }

    pub fn dialect(&self, settings: &Settings) -> Dialect {
        match self {
            Self::Python => settings.dialect_for(Dialect::python()),
        }
    }

    /// Parse `source` and extract its code blocks.
    pub fn extract(
        &self,
        source: &str,
        module_name: &str,
        dialect: &Dialect,
    ) -> Result<Extraction> {
        match self {
            Self::Python => Ok(docsplice_python::extract(source, module_name, dialect)?),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Python => write!(f, "python"),
        }
    }
}

/// [`Language::detect`] as a hard requirement.
pub fn require_language(path: &Path, first_line: Option<&str>) -> Result<Language> {
    Language::detect(path, first_line).ok_or_else(|| Error::UnsupportedLanguage {
        path: path.to_path_buf(),
    })
}
