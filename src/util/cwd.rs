//! Scoped changes of the process working directory.

use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Changes the working directory and restores the previous one on drop.
///
/// The restore runs on every exit path out of the scope holding the guard,
/// including `?` returns and panics that unwind.
#[derive(Debug)]
#[must_use = "the previous directory is restored when the guard is dropped"]
pub struct WorkingDir {
    previous: PathBuf,
}

impl WorkingDir {
    /// Enter `dir`, remembering the current directory.
    pub fn enter(dir: &Path) -> Result<Self> {
        let previous = env::current_dir().context("failed to read current directory")?;
        env::set_current_dir(dir)
            .with_context(|| format!("failed to enter directory: {}", dir.display()))?;
        tracing::debug!("entered {}", dir.display());

        Ok(WorkingDir { previous })
    }
}

impl Drop for WorkingDir {
    fn drop(&mut self) {
        if let Err(e) = env::set_current_dir(&self.previous) {
            tracing::error!(
                "failed to restore working directory {}: {}",
                self.previous.display(),
                e
            );
        }
    }
}

/// Run `f` with `dir` as the working directory.
pub fn with_dir<T>(dir: &Path, f: impl FnOnce() -> Result<T>) -> Result<T> {
    let _guard = WorkingDir::enter(dir)?;
    f()
}
