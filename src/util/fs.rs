//! Filesystem utilities.

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use anyhow::{Context, Result};
use glob::glob;

/// Ensure a directory exists, creating it and its parents with mode `0o777`
/// (before umask) if necessary.
pub fn ensure_dir(path: &Path) -> Result<()> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o777);
    }

    builder
        .create(path)
        .with_context(|| format!("failed to create directory: {}", path.display()))
}

/// Whether anything exists at `path`, without following a final symlink.
///
/// A dangling symlink counts as existing.
pub fn entry_exists(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok()
}

/// Remove whatever is at `path`: a symlink is unlinked, never followed,
/// and a directory is removed with its contents. Missing paths are ignored.
pub fn remove_path(path: &Path) -> Result<()> {
    let meta = match fs::symlink_metadata(path) {
        Ok(meta) => meta,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(e) => {
            return Err(e).with_context(|| format!("failed to inspect: {}", path.display()))
        }
    };

    let result = if meta.is_dir() {
        fs::remove_dir_all(path)
    } else {
        remove_link_or_file(path)
    };

    result.with_context(|| format!("failed to remove: {}", path.display()))
}

#[cfg(windows)]
fn remove_link_or_file(path: &Path) -> io::Result<()> {
    // Directory symlinks and junctions are removed as directories on Windows.
    fs::remove_file(path).or_else(|_| fs::remove_dir(path))
}

#[cfg(not(windows))]
fn remove_link_or_file(path: &Path) -> io::Result<()> {
    fs::remove_file(path)
}

/// Move a file into `dir`, keeping its file name. Returns the new path.
pub fn move_into(file: &Path, dir: &Path) -> Result<PathBuf> {
    let name = file
        .file_name()
        .with_context(|| format!("path has no file name: {}", file.display()))?;
    let dest = dir.join(name);

    fs::rename(file, &dest).with_context(|| {
        format!("failed to move {} to {}", file.display(), dest.display())
    })?;
    Ok(dest)
}

/// Paths in `base` matching a single-component glob `pattern`.
pub fn glob_in(base: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let full_pattern = glob::Pattern::escape(&base.to_string_lossy()) + "/" + pattern;

    let mut results = Vec::new();
    for entry in
        glob(&full_pattern).with_context(|| format!("invalid glob pattern: {}", pattern))?
    {
        let path = entry.with_context(|| format!("failed to match `{}`", pattern))?;
        results.push(path);
    }

    results.sort();
    Ok(results)
}

/// Get the relative path from `base` to `path`.
pub fn relative_path(base: &Path, path: &Path) -> PathBuf {
    pathdiff::diff_paths(path, base).unwrap_or_else(|| path.to_path_buf())
}

/// Lexically normalize a path: drop `.` components and trailing separators,
/// and fold `dir/..` pairs. The filesystem is not consulted.
pub fn clean_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let can_pop = matches!(
                    out.components().next_back(),
                    Some(Component::Normal(_))
                );
                if can_pop {
                    out.pop();
                } else if !matches!(
                    out.components().next_back(),
                    Some(Component::RootDir | Component::Prefix(_))
                ) {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }

    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}

/// Create a directory symlink (platform-aware).
#[cfg(unix)]
pub fn symlink_dir(src: &Path, dst: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(src, dst)
}

#[cfg(windows)]
pub fn symlink_dir(src: &Path, dst: &Path) -> io::Result<()> {
    std::os::windows::fs::symlink_dir(src, dst)
}
