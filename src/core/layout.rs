//! Project directory layout.
//!
//! ```text
//! <root>/
//! ├── <keymap>/                          user's keymap sources
//! ├── qmk/                               QMK checkout (git submodule)
//! │   ├── Makefile
//! │   ├── keyboards/<kb>/keymaps/<user>  staged keymap
//! │   └── .build/<kb>_<rev>_<user>.*     raw artifacts
//! └── build/                             collected artifacts
//! ```

use std::path::{Path, PathBuf};

use super::target::Target;

/// Name of the QMK checkout inside the project root.
pub const TOOLCHAIN_DIR: &str = "qmk";

/// Name of the output directory inside the project root.
pub const OUTPUT_DIR: &str = "build";

/// Absolute paths used by one build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    root: PathBuf,
    keymap_src: PathBuf,
}

impl Layout {
    /// Layout rooted at `root`, staging the keymap found at `keymap_src`.
    ///
    /// A relative `keymap_src` is taken relative to `root`.
    pub fn new(root: impl Into<PathBuf>, keymap_src: impl AsRef<Path>) -> Self {
        let root = root.into();
        let keymap_src = root.join(keymap_src);
        Layout { root, keymap_src }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The user's keymap source directory.
    pub fn keymap_src(&self) -> &Path {
        &self.keymap_src
    }

    /// Root of the QMK checkout.
    pub fn toolchain_root(&self) -> PathBuf {
        self.root.join(TOOLCHAIN_DIR)
    }

    /// File whose presence marks the checkout as bootstrapped.
    pub fn toolchain_manifest(&self) -> PathBuf {
        self.toolchain_root().join("Makefile")
    }

    /// Where QMK looks for the keymap of `target`.
    pub fn staged_keymap(&self, target: &Target) -> PathBuf {
        self.toolchain_root()
            .join("keyboards")
            .join(target.keyboard())
            .join("keymaps")
            .join(target.username())
    }

    /// Directory QMK writes build artifacts into.
    pub fn toolchain_build_dir(&self) -> PathBuf {
        self.toolchain_root().join(".build")
    }

    /// Directory collected artifacts are moved into.
    pub fn output_dir(&self) -> PathBuf {
        self.root.join(OUTPUT_DIR)
    }
}
