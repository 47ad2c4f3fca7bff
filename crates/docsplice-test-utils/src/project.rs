//! [`TestProject`]: a temporary source tree for pipeline and CLI tests.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A temporary directory with helpers for writing sources and asserting on
/// their contents afterwards.
///
/// # Example
///
/// ```rust,no_run
/// use docsplice_test_utils::{TestProject, sources};
///
/// let project = TestProject::new();
/// project.write("pkg/greetings.py", sources::UNDOCUMENTED);
/// project.assert_file_contains("pkg/greetings.py", "def greet");
/// ```
pub struct TestProject {
    temp_dir: TempDir,
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

impl TestProject {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.root().join(relative)
    }

    /// Write `content` to `relative`, creating parent directories.
    pub fn write(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    pub fn read(&self, relative: &str) -> String {
        let path = self.path(relative);
        fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("Could not read {}: {e}", path.display()))
    }

    /// Write `docsplice.toml` at the project root.
    pub fn write_config(&self, toml: &str) -> PathBuf {
        self.write("docsplice.toml", toml)
    }

    /// # Panics
    /// Panics if the file differs from `expected`.
    pub fn assert_file_eq(&self, relative: &str, expected: &str) {
        let actual = self.read(relative);
        assert!(
            actual == expected,
            "File {} differs.\nExpected:\n{}\nActual:\n{}",
            relative,
            expected,
            actual
        );
    }

    /// # Panics
    /// Panics if the file does not contain `content`.
    pub fn assert_file_contains(&self, relative: &str, content: &str) {
        let actual = self.read(relative);
        assert!(
            actual.contains(content),
            "File {} does not contain expected content.\nExpected: {}\nActual: {}",
            relative,
            content,
            actual
        );
    }
}
