//! Keymake - build QMK keyboard firmware for a personal keymap
//!
//! This crate drives a QMK checkout: it initializes the checkout, stages the
//! user's keymap where QMK expects it, runs the build and collects the
//! resulting firmware files.

pub mod core;
pub mod error;
pub mod ops;
pub mod util;

pub use crate::core::{Layout, Platform, Target};
pub use error::KeymakeError;
pub use ops::{build, BuildConfig, BuildResult};
