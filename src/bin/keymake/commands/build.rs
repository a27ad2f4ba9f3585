//! Default command: build and collect the firmware.

use anyhow::{Context, Result};

use crate::cli::BuildArgs;
use keymake::ops::{build, BuildConfig};
use keymake::{Layout, Platform, Target};

pub fn execute(args: BuildArgs) -> Result<()> {
    let username = args
        .username
        .context("no username given; pass --username or set USERNAME")?;
    let target = Target::new(args.keyboard, args.revision, username)?;

    let root = std::env::current_dir().context("failed to read current directory")?;
    let keymap = args
        .keymap
        .unwrap_or_else(|| target.keyboard().into());

    let config = BuildConfig {
        layout: Layout::new(root, keymap),
        target,
        platform: Platform::current(),
        force: args.force,
    };

    let result = build(&config)?;

    tracing::info!(
        "    Finished `{}` -> {} ({} artifacts)",
        config.target,
        result.output_dir.display(),
        result.artifacts.len()
    );

    Ok(())
}
