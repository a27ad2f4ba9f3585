//! Error types for firmware builds.
//!
//! Most failures travel as `anyhow::Error` with context attached. The
//! variants here are the ones callers need to tell apart, most notably a
//! missing host dependency, which the CLI reports with its own exit code.

use thiserror::Error;

/// Error raised by a build step.
#[derive(Debug, Error)]
pub enum KeymakeError {
    /// A host tool the build environment depends on is missing.
    #[error("{tool} not found; {hint}")]
    MissingDependency { tool: String, hint: String },

    #[error("`{command}` failed with exit code {code:?}")]
    CommandFailed { command: String, code: Option<i32> },

    #[error("invalid {field} `{value}`: {reason}")]
    InvalidIdentifier {
        field: &'static str,
        value: String,
        reason: &'static str,
    },
}

impl KeymakeError {
    /// Whether this error should terminate with the dedicated preflight exit code.
    pub fn is_missing_dependency(&self) -> bool {
        matches!(self, KeymakeError::MissingDependency { .. })
    }
}
