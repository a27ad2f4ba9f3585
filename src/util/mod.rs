//! Shared utilities

pub mod cwd;
pub mod fs;
pub mod process;

pub use cwd::WorkingDir;
pub use process::ProcessBuilder;
