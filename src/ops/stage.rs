//! Staging the user's keymap inside the QMK tree.
//!
//! QMK only builds keymaps found under `keyboards/<kb>/keymaps/<user>`. The
//! keymap lives outside the checkout, so for the duration of a build it is
//! made visible there by one of two strategies:
//!
//! - [`SymlinkStaging`]: a relative symlink. Idempotent; an existing entry at
//!   the staged path is left alone.
//! - [`MirrorStaging`]: a `robocopy /mir` copy, used on Windows where QMK
//!   does not follow links. Always re-synced.
//!
//! Both are undone by [`unstage`].

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::core::Platform;
use crate::util::fs::{clean_path, entry_exists, relative_path, remove_path, symlink_dir};
use crate::util::process::ProcessBuilder;

/// A way of making `src` visible at `staged`.
pub trait StagingStrategy {
    /// Short name used in log output.
    fn name(&self) -> &'static str;

    /// Make `src` reachable at `staged`.
    fn stage(&self, src: &Path, staged: &Path) -> Result<()>;
}

/// Strategy used on `platform`.
pub fn strategy_for(platform: Platform) -> Box<dyn StagingStrategy> {
    match platform {
        Platform::Windows => Box::new(MirrorStaging::default()),
        Platform::Unix => Box::new(SymlinkStaging),
    }
}

/// Stage with a symlink whose target is relative to the link's directory.
#[derive(Debug, Clone, Copy, Default)]
pub struct SymlinkStaging;

impl StagingStrategy for SymlinkStaging {
    fn name(&self) -> &'static str {
        "symlink"
    }

    fn stage(&self, src: &Path, staged: &Path) -> Result<()> {
        if entry_exists(staged) {
            tracing::debug!("{} already exists, leaving it", staged.display());
            return Ok(());
        }

        let parent = staged
            .parent()
            .with_context(|| format!("staged path has no parent: {}", staged.display()))?;
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory: {}", parent.display()))?;

        let link_target = relative_path(parent, src);
        symlink_dir(&link_target, staged).with_context(|| {
            format!(
                "failed to link {} -> {}",
                staged.display(),
                link_target.display()
            )
        })?;

        tracing::debug!("linked {} -> {}", staged.display(), link_target.display());
        Ok(())
    }
}

/// Stage with a mirrored copy made by `robocopy`.
#[derive(Debug, Clone)]
pub struct MirrorStaging {
    program: String,
}

impl MirrorStaging {
    /// Mirror using `program` instead of `robocopy`.
    pub fn with_program(program: impl Into<String>) -> Self {
        MirrorStaging {
            program: program.into(),
        }
    }

    /// The command that mirrors `src` onto `staged`.
    ///
    /// `/mir` copies recursively and deletes destination entries missing
    /// from the source; `/njh` and `/njs` drop the job header and summary.
    pub fn command(&self, src: &Path, staged: &Path) -> ProcessBuilder {
        ProcessBuilder::new(&self.program)
            .args(["/mir", "/njh", "/njs"])
            .arg(clean_path(src))
            .arg(clean_path(staged))
    }
}

impl Default for MirrorStaging {
    fn default() -> Self {
        MirrorStaging::with_program("robocopy")
    }
}

/// Lowest robocopy exit code that signals a failed copy. Codes below it
/// report what was copied or pruned.
const ROBOCOPY_FAILURE: i32 = 8;

impl StagingStrategy for MirrorStaging {
    fn name(&self) -> &'static str {
        "mirror"
    }

    fn stage(&self, src: &Path, staged: &Path) -> Result<()> {
        let cmd = self.command(src, staged);
        let status = cmd.status()?;

        match status.code() {
            Some(code) if code < ROBOCOPY_FAILURE => {
                tracing::debug!("mirrored {} (robocopy code {})", staged.display(), code);
                Ok(())
            }
            _ => Err(cmd.failure(status).into()),
        }
    }
}

/// Remove a staged keymap, whichever strategy created it.
///
/// Only the staged entry goes; a `keymaps` directory created by
/// [`SymlinkStaging`] is left in the checkout.
pub fn unstage(staged: &Path) -> Result<()> {
    remove_path(staged)?;
    tracing::debug!("removed {}", staged.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn keymap_fixture(tmp: &TempDir) -> std::path::PathBuf {
        let src = tmp.path().join("preonic");
        fs::create_dir_all(&src).unwrap();
        fs::write(src.join("keymap.c"), "// layers").unwrap();
        src
    }

    #[test]
    fn test_strategy_selection() {
        assert_eq!(strategy_for(Platform::Windows).name(), "mirror");
        assert_eq!(strategy_for(Platform::Unix).name(), "symlink");
    }

    #[cfg(unix)]
    #[test]
    fn test_mirror_command_cleans_paths() {
        let cmd = MirrorStaging::default().command(
            Path::new("./preonic/"),
            Path::new("qmk/keyboards/preonic/keymaps/alice/"),
        );

        assert_eq!(
            cmd.display_command(),
            "robocopy /mir /njh /njs preonic qmk/keyboards/preonic/keymaps/alice"
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_points_back_to_source() {
        let tmp = TempDir::new().unwrap();
        let src = keymap_fixture(&tmp);
        let staged = tmp.path().join("qmk/keyboards/preonic/keymaps/alice");

        SymlinkStaging.stage(&src, &staged).unwrap();

        let target = fs::read_link(&staged).unwrap();
        assert!(target.is_relative());
        assert_eq!(target, Path::new("../../../../preonic"));

        let resolved = staged.parent().unwrap().join(&target);
        assert_eq!(
            resolved.canonicalize().unwrap(),
            src.canonicalize().unwrap()
        );
        assert!(staged.join("keymap.c").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_skips_existing_entry() {
        let tmp = TempDir::new().unwrap();
        let src = keymap_fixture(&tmp);
        let staged = tmp.path().join("qmk/keyboards/preonic/keymaps/alice");
        fs::create_dir_all(&staged).unwrap();
        fs::write(staged.join("keymap.c"), "// stale").unwrap();

        SymlinkStaging.stage(&src, &staged).unwrap();

        let meta = fs::symlink_metadata(&staged).unwrap();
        assert!(meta.is_dir());
        assert_eq!(
            fs::read_to_string(staged.join("keymap.c")).unwrap(),
            "// stale"
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_mirror_always_runs() {
        let tmp = TempDir::new().unwrap();
        let src = keymap_fixture(&tmp);
        let staged = tmp.path().join("staged");
        let log = tmp.path().join("calls");

        let fake = tmp.path().join("fake-robocopy");
        fs::write(
            &fake,
            format!("#!/bin/sh\necho \"$@\" >> '{}'\nexit 1\n", log.display()),
        )
        .unwrap();
        make_executable(&fake);

        let strategy = MirrorStaging::with_program(fake.to_string_lossy());
        strategy.stage(&src, &staged).unwrap();
        fs::create_dir_all(&staged).unwrap();
        strategy.stage(&src, &staged).unwrap();

        let calls = fs::read_to_string(&log).unwrap();
        assert_eq!(calls.lines().count(), 2);
        assert!(calls.lines().all(|l| l.starts_with("/mir /njh /njs ")));
    }

    #[cfg(unix)]
    #[test]
    fn test_mirror_failure_code() {
        let tmp = TempDir::new().unwrap();
        let src = keymap_fixture(&tmp);

        let fake = tmp.path().join("fake-robocopy");
        fs::write(&fake, "#!/bin/sh\nexit 8\n").unwrap();
        make_executable(&fake);

        let err = MirrorStaging::with_program(fake.to_string_lossy())
            .stage(&src, &tmp.path().join("staged"))
            .unwrap_err();
        assert!(err.to_string().contains("exit code Some(8)"));
    }

    #[cfg(unix)]
    #[test]
    fn test_unstage_removes_link_only() {
        let tmp = TempDir::new().unwrap();
        let src = keymap_fixture(&tmp);
        let staged = tmp.path().join("qmk/keyboards/preonic/keymaps/alice");
        SymlinkStaging.stage(&src, &staged).unwrap();

        unstage(&staged).unwrap();

        assert!(!entry_exists(&staged));
        assert!(src.join("keymap.c").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_unstage_keeps_created_keymaps_dir() {
        let tmp = TempDir::new().unwrap();
        let src = keymap_fixture(&tmp);
        let keymaps = tmp.path().join("qmk/keyboards/preonic/keymaps");
        let staged = keymaps.join("alice");
        SymlinkStaging.stage(&src, &staged).unwrap();

        unstage(&staged).unwrap();

        assert!(keymaps.is_dir());
        assert_eq!(fs::read_dir(&keymaps).unwrap().count(), 0);
    }

    #[test]
    fn test_symlink_fails_when_parent_is_file() {
        let tmp = TempDir::new().unwrap();
        let src = keymap_fixture(&tmp);
        let keymaps = tmp.path().join("qmk/keyboards/preonic/keymaps");
        fs::create_dir_all(keymaps.parent().unwrap()).unwrap();
        fs::write(&keymaps, "not a directory").unwrap();

        let err = SymlinkStaging
            .stage(&src, &keymaps.join("alice"))
            .unwrap_err();

        assert!(err.to_string().contains("failed to create directory"));
        assert!(keymaps.is_file());
    }

    #[cfg(unix)]
    #[test]
    fn test_unstage_fails_under_file() {
        let tmp = TempDir::new().unwrap();
        let keymaps = tmp.path().join("keymaps");
        fs::write(&keymaps, "not a directory").unwrap();

        let err = unstage(&keymaps.join("alice")).unwrap_err();

        assert!(err.to_string().contains("failed to inspect"));
    }

    #[test]
    fn test_unstage_removes_mirrored_tree() {
        let tmp = TempDir::new().unwrap();
        let staged = tmp.path().join("alice");
        fs::create_dir_all(staged.join("sub")).unwrap();
        fs::write(staged.join("sub/rules.mk"), "").unwrap();

        unstage(&staged).unwrap();

        assert!(!entry_exists(&staged));
    }

    #[cfg(unix)]
    fn make_executable(path: &Path) {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
    }
}
