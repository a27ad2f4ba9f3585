//! Build target identity.
//!
//! A [`Target`] names one firmware variant: a keyboard, its hardware
//! revision and the user whose keymap is compiled in. QMK derives both its
//! make target and its output file names from these three values.

use std::fmt;

use crate::error::KeymakeError;

/// Keyboard, revision and keymap owner of one firmware build.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Target {
    keyboard: String,
    revision: String,
    username: String,
}

impl Target {
    /// Create a target, rejecting identifiers QMK cannot use as path segments.
    pub fn new(
        keyboard: impl Into<String>,
        revision: impl Into<String>,
        username: impl Into<String>,
    ) -> Result<Self, KeymakeError> {
        let target = Target {
            keyboard: keyboard.into(),
            revision: revision.into(),
            username: username.into(),
        };

        validate("keyboard", &target.keyboard)?;
        validate("revision", &target.revision)?;
        validate("username", &target.username)?;

        Ok(target)
    }

    pub fn keyboard(&self) -> &str {
        &self.keyboard
    }

    pub fn revision(&self) -> &str {
        &self.revision
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// The argument passed to `make`: `<keyboard>/<revision>:<username>`.
    pub fn make_target(&self) -> String {
        format!("{}/{}:{}", self.keyboard, self.revision, self.username)
    }

    /// File stem QMK gives the artifacts of this target.
    pub fn artifact_stem(&self) -> String {
        format!("{}_{}_{}", self.keyboard, self.revision, self.username)
    }

    /// Glob matching every artifact of this target, e.g. `preonic_rev3_alice.*`.
    ///
    /// Identifier text is escaped, so the extension is the only wildcard.
    pub fn artifact_pattern(&self) -> String {
        format!("{}.*", glob::Pattern::escape(&self.artifact_stem()))
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.make_target())
    }
}

fn validate(field: &'static str, value: &str) -> Result<(), KeymakeError> {
    let reason = if value.is_empty() {
        "must not be empty"
    } else if value.contains(['/', '\\', ':']) {
        "must not contain `/`, `\\` or `:`"
    } else if value == "." || value == ".." {
        "must not be a relative path component"
    } else {
        return Ok(());
    };

    Err(KeymakeError::InvalidIdentifier {
        field,
        value: value.to_string(),
        reason,
    })
}
