//! Moving built firmware out of the QMK tree.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::core::Target;
use crate::util::fs::{ensure_dir, glob_in, move_into};

/// Move every artifact of `target` from `build_dir` into `output_dir`.
///
/// Only files matching [`Target::artifact_pattern`] are touched. Returns the
/// new paths in the output directory.
pub fn collect_artifacts(
    target: &Target,
    build_dir: &Path,
    output_dir: &Path,
) -> Result<Vec<PathBuf>> {
    ensure_dir(output_dir)?;

    let pattern = target.artifact_pattern();
    let matches = glob_in(build_dir, &pattern)?;
    if matches.is_empty() {
        tracing::warn!("no artifacts matching `{}` in {}", pattern, build_dir.display());
    }

    let mut moved = Vec::with_capacity(matches.len());
    for artifact in matches {
        let dest = move_into(&artifact, output_dir)?;
        tracing::info!("   Collected {}", dest.display());
        moved.push(dest);
    }

    Ok(moved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_moves_only_matching_artifacts() {
        let tmp = TempDir::new().unwrap();
        let build_dir = tmp.path().join("qmk/.build");
        let output_dir = tmp.path().join("build");
        fs::create_dir_all(&build_dir).unwrap();
        fs::write(build_dir.join("preonic_rev3_alice.hex"), "alice").unwrap();
        fs::write(build_dir.join("preonic_rev3_alice.bin"), "alice").unwrap();
        fs::write(build_dir.join("preonic_rev3_bob.hex"), "bob").unwrap();

        let target = Target::new("preonic", "rev3", "alice").unwrap();
        let moved = collect_artifacts(&target, &build_dir, &output_dir).unwrap();

        assert_eq!(
            moved,
            vec![
                output_dir.join("preonic_rev3_alice.bin"),
                output_dir.join("preonic_rev3_alice.hex"),
            ]
        );
        assert!(!build_dir.join("preonic_rev3_alice.hex").exists());
        assert!(!build_dir.join("preonic_rev3_alice.bin").exists());
        assert!(build_dir.join("preonic_rev3_bob.hex").exists());
        assert!(!output_dir.join("preonic_rev3_bob.hex").exists());
    }

    #[test]
    fn test_existing_output_dir_and_no_artifacts() {
        let tmp = TempDir::new().unwrap();
        let output_dir = tmp.path().join("build");
        fs::create_dir_all(&output_dir).unwrap();
        fs::write(output_dir.join("old.hex"), "old").unwrap();

        let target = Target::new("preonic", "rev3", "alice").unwrap();
        let moved =
            collect_artifacts(&target, &tmp.path().join("qmk/.build"), &output_dir).unwrap();

        assert!(moved.is_empty());
        assert!(output_dir.join("old.hex").exists());
    }

    #[test]
    fn test_overwrites_previous_artifact() {
        let tmp = TempDir::new().unwrap();
        let build_dir = tmp.path().join(".build");
        let output_dir = tmp.path().join("build");
        fs::create_dir_all(&build_dir).unwrap();
        fs::create_dir_all(&output_dir).unwrap();
        fs::write(build_dir.join("preonic_rev3_alice.hex"), "new").unwrap();
        fs::write(output_dir.join("preonic_rev3_alice.hex"), "old").unwrap();

        let target = Target::new("preonic", "rev3", "alice").unwrap();
        collect_artifacts(&target, &build_dir, &output_dir).unwrap();

        assert_eq!(
            fs::read_to_string(output_dir.join("preonic_rev3_alice.hex")).unwrap(),
            "new"
        );
    }
}
