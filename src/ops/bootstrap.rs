//! QMK checkout initialization.

use anyhow::Result;

use crate::core::Layout;
use crate::util::cwd::with_dir;
use crate::util::process::ProcessBuilder;

/// Outcome of [`bootstrap`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bootstrap {
    /// The checkout already had its Makefile; nothing ran.
    Skipped,
    /// Submodules were fetched and QMK's own submodules set up.
    Initialized,
}

/// Make sure the QMK checkout is populated.
///
/// The Makefile is the only thing checked; an existing checkout is never
/// re-synced or version-checked.
pub fn bootstrap(layout: &Layout) -> Result<Bootstrap> {
    if layout.toolchain_manifest().exists() {
        tracing::debug!("{} present", layout.toolchain_manifest().display());
        return Ok(Bootstrap::Skipped);
    }

    tracing::info!("Initializing QMK in {}", layout.toolchain_root().display());

    ProcessBuilder::new("git")
        .args(["submodule", "update", "--init", "--recursive"])
        .cwd(layout.root())
        .run()?;

    with_dir(&layout.toolchain_root(), || {
        ProcessBuilder::new("make").arg("git-submodule").run()
    })?;

    Ok(Bootstrap::Initialized)
}
