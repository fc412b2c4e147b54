//! # Dirpack Main Entry Point
//!
//! File: cli/src/main.rs
//!
//! ## Overview
//!
//! This file serves as the main entry point for the `dirpack` CLI. It handles:
//! - Command-line argument parsing using Clap
//! - Setting up the logging system based on verbosity flags
//! - Routing execution to the pack command handler
//!
//! ## Architecture
//!
//! `dirpack` is a one-shot batch utility: it archives every immediate
//! subdirectory of a source directory into its own `.tar.gz` in a target
//! directory, deletes each subdirectory whose archive verified, and finally
//! removes the source directory itself once it is empty.
//!
//! The crate is split into three layers:
//! - `commands`: argument structs and user-facing output (the `pack` command)
//! - `core`: orchestration, worker tasks, and error types
//! - `common`: shared archive and filesystem utilities
//!
//! All errors propagate to this level for consistent handling and exit-code
//! mapping: any fatal error (missing source directory included) exits 1,
//! while per-subdirectory failures are reported on stdout and exit 0.
//!
//! ## Examples
//!
//! ```bash
//! # Archive every subdirectory of ./inbox into ./archives
//! dirpack ./inbox ./archives
//!
//! # Process in descending name order, with at most 4 concurrent workers
//! dirpack --reverse --max-workers 4 ./inbox ./archives
//!
//! # Increase log verbosity
//! dirpack -vv ./inbox ./archives
//! ```
//!
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

// Declare the top-level modules of the CLI crate.
mod commands; // Command argument structs and handlers (pack).
mod common; // Shared utilities (archive, fs).
mod core; // Core infrastructure (errors, orchestrator, worker).

/// Defines the top-level command-line arguments structure using Clap's derive macros.
#[derive(Parser, Debug)]
#[command(
    name = "dirpack",
    about = "📦 dirpack: batch-archive subdirectories into .tar.gz files and sweep them away",
    long_about = "Archives each immediate subdirectory of SOURCE_DIR into \
                  TARGET_DIR/<name>.tar.gz, deletes each subdirectory whose \
                  archive verified, and removes SOURCE_DIR once empty.",
    version
)]
struct Cli {
    #[command(flatten)]
    pack: commands::pack::PackArgs,
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    if let Err(e) = commands::pack::handle_pack(cli.pack).await {
        tracing::error!("Command execution failed: {:?}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}

// --- Basic Integration Tests ---
#[cfg(test)]
mod tests {
    use assert_cmd::Command;
    use predicates::prelude::*;
    fn dirpack_cmd() -> Command {
        Command::cargo_bin("dirpack").expect("Failed to find dirpack binary for testing")
    }
    #[test]
    fn test_main_help_flag() {
        dirpack_cmd().arg("--help").assert().success();
    }
    #[test]
    fn test_main_version_flag() {
        dirpack_cmd()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    }
}
