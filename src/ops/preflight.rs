//! Host environment check run before anything is touched.
//!
//! On Windows QMK only builds from an MSYS2 shell, so the presence of
//! `pacman` on `PATH` is used to tell whether we are inside one.

use std::path::PathBuf;

use crate::core::Platform;
use crate::error::KeymakeError;
use crate::util::process::find_executable;

/// Package manager that marks an MSYS2 environment.
pub const PACKAGE_MANAGER: &str = "pacman";

/// Check the host environment using `PATH` lookup.
pub fn preflight(platform: Platform, force: bool) -> Result<(), KeymakeError> {
    preflight_with(platform, force, find_executable)
}

/// Check the host environment, resolving executables with `lookup`.
pub fn preflight_with(
    platform: Platform,
    force: bool,
    lookup: impl Fn(&str) -> Option<PathBuf>,
) -> Result<(), KeymakeError> {
    if !platform.is_windows() || force {
        tracing::debug!("skipping host check");
        return Ok(());
    }

    match lookup(PACKAGE_MANAGER) {
        Some(path) => {
            tracing::debug!("found {} at {}", PACKAGE_MANAGER, path.display());
            Ok(())
        }
        None => Err(KeymakeError::MissingDependency {
            tool: PACKAGE_MANAGER.to_string(),
            hint: "not in MSYS?".to_string(),
        }),
    }
}
