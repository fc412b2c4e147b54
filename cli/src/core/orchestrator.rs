//! # Dirpack Orchestrator (`core::orchestrator`)
//!
//! File: cli/src/core/orchestrator.rs
//!
//! ## Overview
//!
//! This module implements the run-level workflow around the per-subdirectory
//! worker tasks. A run moves through the states Validating → Enumerating →
//! Dispatching → Collecting → FinalCleanup → Done:
//!
//! 1. Validate the source directory and create the target directory.
//! 2. Enumerate the source's immediate child directories (plain files are
//!    ignored), optionally in descending name order.
//! 3. Dispatch one worker task per subdirectory onto a bounded pool.
//! 4. Collect every outcome (completion order, no early exit on failure).
//! 5. Remove the source directory itself, but only if it is now empty.
//!
//! ## Architecture
//!
//! Fan-out/fan-in uses a `tokio::task::JoinSet`; the concurrency bound is an
//! `Arc<Semaphore>` whose permits gate how many blocking workers run at
//! once. Tasks share no mutable state — each returns its `Outcome` through
//! the JoinSet and aggregation is a post-join reduction, so there are no
//! concurrent counter updates to lose.
//!
//! Only two conditions abort a run before any work: a missing source
//! directory and a source path that is not a directory. Everything a single
//! subdirectory can do wrong is absorbed by its worker task and surfaces as
//! a name in `RunResult::failed_names`.
//!
use crate::common::fs as fs_util;
use crate::core::error::{DirpackError, Result};
use crate::core::worker::{self, Outcome};
use anyhow::Context;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, error, info};

/// Multiplier applied to the detected hardware parallelism when no explicit
/// worker bound is given. The work is I/O-bound, so oversubscribing the CPUs
/// keeps the disks busy (historical default: CPU count × 5).
const DEFAULT_WORKERS_PER_CPU: usize = 5;

/// Aggregated result of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunResult {
    /// Number of subdirectories archived, verified, and deleted.
    pub successful_count: usize,
    /// Names of subdirectories that failed, in completion order.
    pub failed_names: Vec<String>,
}

impl RunResult {
    /// Total number of subdirectories that were enumerated.
    pub fn total(&self) -> usize {
        self.successful_count + self.failed_names.len()
    }
}

/// # Process All Subdirectories (`process_directories`)
///
/// Archives each immediate subdirectory of `source_dir` into
/// `target_dir/<name>.tar.gz`, deletes each subdirectory whose archive
/// verified, and removes `source_dir` itself once it contains nothing.
///
/// ## Arguments
///
/// * `source_dir` - Directory whose immediate child directories are processed.
///   Must exist and be a directory.
/// * `target_dir` - Directory receiving the archives; created (with parents)
///   if absent before any work begins.
/// * `reverse` - Sort subdirectories in descending name order before
///   dispatch. Affects submission order only; tasks are independent.
/// * `max_workers` - Upper bound on concurrently running worker tasks.
///   `None` selects `available_parallelism() × 5`; the bound is clamped to
///   at least 1.
///
/// ## Returns
///
/// * `Result<RunResult>` - Success count plus the names of failed
///   subdirectories. `successful_count + failed_names.len()` always equals
///   the number of subdirectories enumerated.
///
/// ## Errors
///
/// Returns an `Err` if:
/// - `source_dir` does not exist (`DirpackError::SourceNotFound`).
/// - `source_dir` is not a directory (`DirpackError::SourceNotADirectory`).
/// - The target directory cannot be created, enumeration fails, or the
///   final source-directory cleanup hits an I/O error.
///
/// Per-subdirectory failures are not errors: they are reported through
/// `failed_names` and leave the affected subdirectory untouched.
pub async fn process_directories(
    source_dir: &Path,
    target_dir: &Path,
    reverse: bool,
    max_workers: Option<usize>,
) -> Result<RunResult> {
    // --- Validating ---
    if !source_dir.exists() {
        return Err(DirpackError::SourceNotFound {
            path: source_dir.to_path_buf(),
        }
        .into());
    }
    if !source_dir.is_dir() {
        return Err(DirpackError::SourceNotADirectory {
            path: source_dir.to_path_buf(),
        }
        .into());
    }
    fs::create_dir_all(target_dir).with_context(|| {
        format!("Failed to create target directory: {}", target_dir.display())
    })?;

    // --- Enumerating ---
    let mut subdirs = fs_util::list_subdirectories(source_dir)?;
    if reverse {
        subdirs.sort_by(|a, b| b.file_name().cmp(&a.file_name()));
    }
    debug!("Enumerated {} subdirectories", subdirs.len());

    // --- Dispatching ---
    let limit = max_workers.unwrap_or_else(default_worker_count).max(1);
    debug!("Dispatching with at most {} concurrent workers", limit);
    let semaphore = Arc::new(Semaphore::new(limit));
    let mut join_set = JoinSet::new();
    for subdir in subdirs {
        let semaphore = Arc::clone(&semaphore);
        let target = target_dir.to_path_buf();
        join_set.spawn(async move {
            let name = worker::subdir_name(&subdir);
            // The permit gates how many workers touch the disk at once.
            let _permit = match semaphore.acquire_owned().await {
                Ok(permit) => permit,
                // Closed semaphore means the runtime is shutting down.
                Err(_) => {
                    return Outcome {
                        name,
                        succeeded: false,
                    }
                }
            };
            // The worker is blocking std::fs work; keep it off the async threads.
            match tokio::task::spawn_blocking(move || worker::run(&subdir, &target)).await {
                Ok(outcome) => outcome,
                Err(e) => {
                    error!("Worker for '{}' did not finish: {}", name, e);
                    Outcome {
                        name,
                        succeeded: false,
                    }
                }
            }
        });
    }

    // --- Collecting ---
    // Every submitted task yields exactly one Outcome; failures never cancel
    // siblings. Aggregation happens here, after the join, so no counters are
    // shared between tasks.
    let mut successful_count = 0;
    let mut failed_names = Vec::new();
    while let Some(joined) = join_set.join_next().await {
        let outcome = joined.context("Worker task was cancelled before completing")?;
        if outcome.succeeded {
            successful_count += 1;
        } else {
            failed_names.push(outcome.name);
        }
    }

    // --- FinalCleanup ---
    // Re-list the source: anything left (failed subdirectories, stray files
    // that were never tasks) blocks its removal.
    if fs_util::dir_is_empty(source_dir)? {
        fs::remove_dir(source_dir).with_context(|| {
            format!("Failed to remove source directory: {}", source_dir.display())
        })?;
        info!("Deleted empty source directory: {}", source_dir.display());
    } else {
        debug!(
            "Source directory {} still contains items and was not deleted",
            source_dir.display()
        );
    }

    Ok(RunResult {
        successful_count,
        failed_names,
    })
}

/// Default worker bound: hardware parallelism times an I/O oversubscription
/// factor, falling back to a single worker if detection fails.
fn default_worker_count() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
        * DEFAULT_WORKERS_PER_CPU
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::tempdir;

    /// Creates `count` subdirectories under `source`, each holding
    /// `files_per_dir` small text files.
    fn populate_source(source: &Path, count: usize, files_per_dir: usize) -> Result<Vec<PathBuf>> {
        let mut subdirs = Vec::new();
        for i in 0..count {
            let subdir = source.join(format!("subdir_{}", i));
            fs::create_dir(&subdir)?;
            for j in 0..files_per_dir {
                fs::write(subdir.join(format!("file_{}.txt", j)), format!("content {}-{}", i, j))?;
            }
            subdirs.push(subdir);
        }
        Ok(subdirs)
    }

    #[tokio::test]
    async fn test_all_subdirectories_processed() -> Result<()> {
        let temp = tempdir()?;
        let source = temp.path().join("source");
        let target = temp.path().join("target");
        fs::create_dir(&source)?;
        let subdirs = populate_source(&source, 3, 2)?;

        let result = process_directories(&source, &target, false, None).await?;

        assert_eq!(result.successful_count, 3);
        assert!(result.failed_names.is_empty());
        assert_eq!(result.total(), 3);
        for subdir in &subdirs {
            let name = subdir.file_name().unwrap().to_string_lossy();
            let archive = target.join(format!("{}.tar.gz", name));
            assert!(fs_util::is_valid_archive(&archive));
            assert!(!subdir.exists());
        }
        // Source contained nothing but the subdirectories, so it is gone too.
        assert!(!source.exists());
        Ok(())
    }

    #[tokio::test]
    async fn test_empty_subdirectory_archived_and_removed() -> Result<()> {
        let temp = tempdir()?;
        let source = temp.path().join("source");
        let target = temp.path().join("target");
        fs::create_dir_all(source.join("empty_dir"))?;

        let result = process_directories(&source, &target, false, None).await?;

        assert_eq!(result.successful_count, 1);
        assert!(result.failed_names.is_empty());
        assert!(fs_util::is_valid_archive(&target.join("empty_dir.tar.gz")));
        assert!(!source.exists());
        Ok(())
    }

    #[tokio::test]
    async fn test_missing_source_is_fatal_and_creates_nothing() -> Result<()> {
        let temp = tempdir()?;
        let source = temp.path().join("does_not_exist");
        let target = temp.path().join("target");

        let err = process_directories(&source, &target, false, None)
            .await
            .expect_err("missing source must fail the run");

        assert!(matches!(
            err.downcast_ref::<DirpackError>(),
            Some(DirpackError::SourceNotFound { .. })
        ));
        // Fatal validation happens before any filesystem work.
        assert!(!target.exists());
        Ok(())
    }

    #[tokio::test]
    async fn test_source_file_is_not_a_directory() -> Result<()> {
        let temp = tempdir()?;
        let source = temp.path().join("plain_file");
        fs::write(&source, "not a directory")?;
        let target = temp.path().join("target");

        let err = process_directories(&source, &target, false, None)
            .await
            .expect_err("file source must fail the run");

        assert!(matches!(
            err.downcast_ref::<DirpackError>(),
            Some(DirpackError::SourceNotADirectory { .. })
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_target_directory_created_with_parents() -> Result<()> {
        let temp = tempdir()?;
        let source = temp.path().join("source");
        fs::create_dir_all(source.join("sub"))?;
        fs::write(source.join("sub/data.txt"), "data")?;
        let target = temp.path().join("deep/nested/target");

        let result = process_directories(&source, &target, false, None).await?;

        assert_eq!(result.successful_count, 1);
        assert!(fs_util::is_valid_archive(&target.join("sub.tar.gz")));
        Ok(())
    }

    #[tokio::test]
    async fn test_partial_failure_keeps_source() -> Result<()> {
        let temp = tempdir()?;
        let source = temp.path().join("source");
        let target = temp.path().join("target");
        fs::create_dir_all(source.join("good"))?;
        fs::write(source.join("good/a.txt"), "fine")?;
        fs::create_dir_all(source.join("bad"))?;
        fs::write(source.join("bad/b.txt"), "doomed")?;
        // A directory squatting on bad's archive path forces its task to fail.
        fs::create_dir_all(target.join("bad.tar.gz"))?;

        let result = process_directories(&source, &target, false, None).await?;

        assert_eq!(result.successful_count, 1);
        assert_eq!(result.failed_names, vec!["bad".to_string()]);
        assert_eq!(result.total(), 2);
        // The failed subdirectory is untouched; the source root survives.
        assert!(source.join("bad/b.txt").exists());
        assert!(!source.join("good").exists());
        assert!(source.exists());
        Ok(())
    }

    #[tokio::test]
    async fn test_stray_file_blocks_source_removal() -> Result<()> {
        let temp = tempdir()?;
        let source = temp.path().join("source");
        fs::create_dir_all(source.join("sub"))?;
        fs::write(source.join("sub/x.txt"), "x")?;
        fs::write(source.join("loose.txt"), "never processed")?;
        let target = temp.path().join("target");

        let result = process_directories(&source, &target, false, None).await?;

        // The stray file is neither archived nor reported, but it keeps the
        // source directory alive.
        assert_eq!(result.successful_count, 1);
        assert!(result.failed_names.is_empty());
        assert!(source.exists());
        assert!(source.join("loose.txt").exists());
        assert!(!target.join("loose.txt.tar.gz").exists());
        Ok(())
    }

    #[tokio::test]
    async fn test_reverse_processes_every_subdirectory() -> Result<()> {
        let temp = tempdir()?;
        let source = temp.path().join("source");
        let target = temp.path().join("target");
        for name in ["a", "b", "c"] {
            fs::create_dir_all(source.join(name))?;
            fs::write(source.join(name).join("f.txt"), name)?;
        }

        let result = process_directories(&source, &target, true, None).await?;

        // Reverse affects dispatch order only, never the outcome set.
        assert_eq!(result.successful_count, 3);
        assert!(result.failed_names.is_empty());
        for name in ["a", "b", "c"] {
            assert!(fs_util::is_valid_archive(&target.join(format!("{}.tar.gz", name))));
        }
        assert!(!source.exists());
        Ok(())
    }

    #[tokio::test]
    async fn test_single_worker_bound() -> Result<()> {
        let temp = tempdir()?;
        let source = temp.path().join("source");
        let target = temp.path().join("target");
        fs::create_dir(&source)?;
        populate_source(&source, 5, 1)?;

        let result = process_directories(&source, &target, false, Some(1)).await?;

        assert_eq!(result.successful_count, 5);
        assert!(result.failed_names.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_zero_worker_bound_clamped() -> Result<()> {
        let temp = tempdir()?;
        let source = temp.path().join("source");
        let target = temp.path().join("target");
        fs::create_dir_all(source.join("only"))?;

        // A bound of 0 would deadlock every task; it is clamped to 1.
        let result = process_directories(&source, &target, false, Some(0)).await?;

        assert_eq!(result.successful_count, 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_empty_source_removes_itself() -> Result<()> {
        let temp = tempdir()?;
        let source = temp.path().join("source");
        fs::create_dir(&source)?;
        let target = temp.path().join("target");

        let result = process_directories(&source, &target, false, None).await?;

        assert_eq!(result.successful_count, 0);
        assert!(result.failed_names.is_empty());
        // No subdirectories, so the already-empty source is removed.
        assert!(!source.exists());
        // Target was still created up front.
        assert!(target.is_dir());
        Ok(())
    }

    #[test]
    fn test_default_worker_count_positive() {
        assert!(default_worker_count() >= DEFAULT_WORKERS_PER_CPU);
    }
}
