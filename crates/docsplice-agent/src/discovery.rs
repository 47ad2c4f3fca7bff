//! Locating the generator program

use std::env;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{AgentError, Result};

/// Resolve `command` to an executable path.
///
/// A command containing a path separator is checked as given. A bare name is
/// searched for in every `PATH` directory, with `.exe` appended on Windows.
pub fn resolve_command(command: &str) -> Result<PathBuf> {
    let as_path = Path::new(command);
    if as_path.components().count() > 1 || as_path.is_absolute() {
        return if as_path.is_file() {
            Ok(as_path.to_path_buf())
        } else {
            Err(not_found(command))
        };
    }

    let path_var = env::var_os("PATH").ok_or_else(|| not_found(command))?;
    let found = env::split_paths(&path_var)
        .flat_map(|dir| candidates(&dir, command))
        .find(|candidate| candidate.is_file());

    match found {
        Some(path) => {
            debug!(command, path = %path.display(), "Resolved generator command");
            Ok(path)
        }
        None => Err(not_found(command)),
    }
}

fn candidates(dir: &Path, command: &str) -> Vec<PathBuf> {
    let mut paths = vec![dir.join(command)];
    if cfg!(windows) {
        paths.push(dir.join(format!("{}.exe", command)));
    }
    paths
}

fn not_found(command: &str) -> AgentError {
    AgentError::CommandNotFound {
        command: command.to_string(),
    }
}
