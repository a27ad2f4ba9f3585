//! High-level operations.
//!
//! Each build step lives in its own module; [`firmware_build`] strings them
//! together.

pub mod bootstrap;
pub mod collect;
pub mod firmware_build;
pub mod preflight;
pub mod stage;

pub use bootstrap::{bootstrap, Bootstrap};
pub use collect::collect_artifacts;
pub use firmware_build::{build, build_with, run_make, BuildConfig, BuildResult};
pub use preflight::{preflight, preflight_with};
pub use stage::{strategy_for, unstage, MirrorStaging, StagingStrategy, SymlinkStaging};
