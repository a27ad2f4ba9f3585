//! Keymake CLI - build QMK keyboard firmware for a personal keymap

use anyhow::Result;
use clap::Parser;
use keymake::KeymakeError;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};

/// Exit code for every failure other than a missing host dependency.
const EXIT_FAILURE: i32 = 2;

fn main() {
    if let Err(e) = run() {
        match e.downcast_ref::<KeymakeError>() {
            Some(err) if err.is_missing_dependency() => {
                eprintln!("{}", err);
                std::process::exit(1);
            }
            _ => {
                eprintln!("error: {:#}", e);
                std::process::exit(EXIT_FAILURE);
            }
        }
    }
}

fn run() -> Result<()> {
    // Parse CLI
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("keymake=debug")
    } else {
        EnvFilter::new("keymake=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    // Execute command
    match cli.command {
        Some(Commands::Completions(args)) => commands::completions::execute(args),
        None => commands::build::execute(cli.build),
    }
}
