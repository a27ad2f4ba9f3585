//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

/// Keymake - build QMK keyboard firmware for a personal keymap
///
/// Run from the directory holding the `qmk` checkout and the keymap
/// sources. Firmware files are collected into `build/`.
#[derive(Parser)]
#[command(name = "keymake")]
#[command(author, version, about, long_about)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(flatten)]
    pub build: BuildArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct BuildArgs {
    /// Skip the MSYS2 environment check on Windows
    #[arg(short, long)]
    pub force: bool,

    /// Keyboard to build for
    #[arg(short, long, default_value = "preonic")]
    pub keyboard: String,

    /// Hardware revision of the keyboard
    #[arg(short, long, default_value = "rev3")]
    pub revision: String,

    /// Owner of the keymap
    #[arg(short, long, env = "USERNAME", hide_env_values = true)]
    pub username: Option<String>,

    /// Keymap source directory (defaults to the keyboard name)
    #[arg(long, value_name = "DIR")]
    pub keymap: Option<PathBuf>,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
