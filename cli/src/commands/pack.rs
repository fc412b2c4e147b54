//! # Dirpack Pack Command
//!
//! File: cli/src/commands/pack.rs
//!
//! ## Overview
//!
//! This module implements the one command `dirpack` exposes: archive every
//! immediate subdirectory of a source directory into the target directory,
//! delete each subdirectory whose archive verified, and remove the source
//! directory once empty.
//!
//! ## Architecture
//!
//! The command flow follows these steps:
//! 1. Parse command arguments (source, target, ordering, worker bound).
//! 2. Invoke the core orchestrator (`core::orchestrator::process_directories`).
//! 3. Print one line per failed subdirectory and a final summary count.
//!
//! Per-subdirectory failures are a reporting concern, not an error: the
//! command still returns `Ok` (exit 0) when some subdirectories failed.
//! Only fatal conditions — missing source, source not a directory, target
//! creation failure — propagate as errors and exit 1.
//!
//! ## Examples
//!
//! ```bash
//! # Archive every subdirectory of ./inbox into ./archives
//! dirpack ./inbox ./archives
//!
//! # Descending name order, at most 8 concurrent workers
//! dirpack --reverse --max-workers 8 ./inbox ./archives
//! ```
//!
use crate::core::error::Result;
use crate::core::orchestrator;
use clap::Parser;
use std::path::PathBuf;
use tracing::debug;

/// # Pack Arguments (`PackArgs`)
///
/// Command-line arguments of the pack operation. Flattened into the
/// top-level CLI in `main.rs`.
#[derive(Parser, Debug)]
pub struct PackArgs {
    /// Source directory whose immediate subdirectories are archived and removed.
    pub source_dir: PathBuf,

    /// Target directory receiving one `<name>.tar.gz` per subdirectory.
    /// Created (with parents) if it does not exist.
    pub target_dir: PathBuf,

    /// Process subdirectories in descending name order.
    #[arg(long)]
    pub reverse: bool,

    /// Maximum number of subdirectories archived concurrently.
    /// Defaults to CPU count × 5.
    #[arg(long, value_name = "N", env = "DIRPACK_MAX_WORKERS")]
    pub max_workers: Option<usize>,
}

/// # Handle Pack Command (`handle_pack`)
///
/// Runs the orchestrator and reports the result on stdout: one
/// `Failed: <name>` line per failed subdirectory, then a
/// `Processed <successful>/<total> directories` summary.
///
/// ## Errors
///
/// Propagates only fatal run errors (missing/invalid source directory,
/// target creation failure, final cleanup I/O errors). A run with
/// per-subdirectory failures is still `Ok`.
pub async fn handle_pack(args: PackArgs) -> Result<()> {
    debug!("Packing {:?} into {:?}", args.source_dir, args.target_dir);

    let result = orchestrator::process_directories(
        &args.source_dir,
        &args.target_dir,
        args.reverse,
        args.max_workers,
    )
    .await?;

    for name in &result.failed_names {
        println!("Failed: {}", name);
    }
    println!(
        "Processed {}/{} directories",
        result.successful_count,
        result.total()
    );

    Ok(())
}
