//! Firmware build pipeline.
//!
//! A build runs these steps in order and stops at the first error:
//!
//! 1. host check ([`preflight_with`])
//! 2. QMK checkout initialization ([`bootstrap`])
//! 3. keymap staging ([`StagingStrategy`])
//! 4. `make <keyboard>/<revision>:<user>` inside the checkout
//! 5. artifact collection ([`collect_artifacts`])
//! 6. removal of the staged keymap ([`unstage`])
//!
//! Nothing is rolled back on failure: a failed build leaves the staged
//! keymap and whatever QMK produced in place.

use std::path::PathBuf;

use anyhow::Result;

use crate::core::{Layout, Platform, Target};
use crate::ops::bootstrap::bootstrap;
use crate::ops::collect::collect_artifacts;
use crate::ops::preflight::preflight_with;
use crate::ops::stage::{strategy_for, unstage, StagingStrategy};
use crate::util::cwd::with_dir;
use crate::util::process::{find_executable, ProcessBuilder};

/// Everything a build needs to know.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    pub target: Target,
    pub layout: Layout,
    pub platform: Platform,
    /// Skip the host environment check.
    pub force: bool,
}

/// Result of a successful build.
#[derive(Debug)]
pub struct BuildResult {
    /// Collected artifacts, in the output directory.
    pub artifacts: Vec<PathBuf>,
    pub output_dir: PathBuf,
}

/// Run the full pipeline for `config`.
pub fn build(config: &BuildConfig) -> Result<BuildResult> {
    build_with(
        config,
        strategy_for(config.platform).as_ref(),
        find_executable,
    )
}

/// Run the full pipeline, staging the keymap with `staging` and resolving
/// host tools for the preflight check with `lookup`.
pub fn build_with(
    config: &BuildConfig,
    staging: &dyn StagingStrategy,
    lookup: impl Fn(&str) -> Option<PathBuf>,
) -> Result<BuildResult> {
    let BuildConfig {
        target,
        layout,
        platform,
        force,
    } = config;

    preflight_with(*platform, *force, lookup)?;
    bootstrap(layout)?;

    let staged = layout.staged_keymap(target);
    tracing::debug!(
        "staging {} at {} ({})",
        layout.keymap_src().display(),
        staged.display(),
        staging.name()
    );
    staging.stage(layout.keymap_src(), &staged)?;

    run_make(layout, target)?;

    let artifacts = collect_artifacts(target, &layout.toolchain_build_dir(), &layout.output_dir())?;

    unstage(&staged)?;

    Ok(BuildResult {
        artifacts,
        output_dir: layout.output_dir(),
    })
}

/// Invoke QMK's make for `target` from inside the checkout.
pub fn run_make(layout: &Layout, target: &Target) -> Result<()> {
    tracing::info!("   Compiling {}", target);

    with_dir(&layout.toolchain_root(), || {
        ProcessBuilder::new("make").arg(target.make_target()).run()
    })
}
