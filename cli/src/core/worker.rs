//! # Dirpack Worker Task (`core::worker`)
//!
//! File: cli/src/core/worker.rs
//!
//! ## Overview
//!
//! The worker task handles exactly one subdirectory: build its archive,
//! verify the archive landed on disk with a non-zero size, and only then
//! delete the subdirectory tree. The two steps are deliberately not
//! transactional — a crash between archive write and delete leaves both the
//! archive and the subdirectory in place, which the next run tolerates.
//!
//! ## Architecture
//!
//! `run` is the error boundary of the whole per-subdirectory workflow: it
//! never returns an error. Every failure from the archiver or from
//! `finalize` is logged and folded into an [`Outcome`] with
//! `succeeded: false`, so one broken subdirectory can never take down its
//! siblings or the run.
//!
//! All I/O here is blocking `std::fs`; the orchestrator runs `run` on the
//! tokio blocking pool.
//!
use crate::common::{archive, fs as fs_util};
use crate::core::error::{DirpackError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Extension appended to the subdirectory name to form the archive filename.
pub const ARCHIVE_EXT: &str = "tar.gz";

/// Result of processing one subdirectory, fed into run-level aggregation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// The subdirectory's name (final path component).
    pub name: String,
    /// Whether the archive was written, verified, and the subdirectory deleted.
    pub succeeded: bool,
}

/// # Run One Subdirectory Task (`run`)
///
/// Archives `subdir` into `target_root/<name>.tar.gz`, verifies the archive,
/// and deletes the subdirectory tree on success.
///
/// Never returns an error: any failure is converted into an [`Outcome`]
/// carrying the subdirectory's name with `succeeded: false`, and the
/// subdirectory is left on disk for a later retry.
pub fn run(subdir: &Path, target_root: &Path) -> Outcome {
    let name = subdir_name(subdir);
    match archive_and_sweep(subdir, target_root, &name) {
        Ok(true) => Outcome {
            name,
            succeeded: true,
        },
        Ok(false) => {
            warn!("Archive for '{}' is missing or empty, keeping directory", name);
            Outcome {
                name,
                succeeded: false,
            }
        }
        Err(e) => {
            warn!("Failed to process '{}': {:#}", name, e);
            Outcome {
                name,
                succeeded: false,
            }
        }
    }
}

/// # Verify Archive, Then Delete (`finalize`)
///
/// Checks that `archive_path` exists with size > 0. If valid, recursively
/// deletes `subdir` and returns `Ok(true)`. If invalid, leaves `subdir`
/// untouched and returns `Ok(false)`.
///
/// ## Errors
///
/// Returns an `Err` only when the archive verified but the subdirectory
/// tree could not be removed; the caller records that as a failure even
/// though the archive itself is usable.
pub fn finalize(subdir: &Path, archive_path: &Path) -> Result<bool> {
    if !fs_util::is_valid_archive(archive_path) {
        return Ok(false);
    }
    fs::remove_dir_all(subdir).map_err(|e| {
        DirpackError::FileSystem(format!(
            "Failed to delete directory '{}': {}",
            subdir.display(),
            e
        ))
    })?;
    debug!("Deleted: {}", subdir.display());
    Ok(true)
}

/// Archive one subdirectory and, if the archive verifies, delete it.
fn archive_and_sweep(subdir: &Path, target_root: &Path, name: &str) -> Result<bool> {
    let archive_path = archive_destination(target_root, name);

    archive::tar::create_archive(subdir, &archive_path).map_err(|e| {
        DirpackError::ArchiveFailed {
            name: name.to_string(),
            cause: e,
        }
    })?;
    info!("Created: {}", archive_path.display());

    finalize(subdir, &archive_path)
}

/// Destination path of a subdirectory's archive inside the target root.
pub fn archive_destination(target_root: &Path, name: &str) -> PathBuf {
    target_root.join(format!("{}.{}", name, ARCHIVE_EXT))
}

/// The subdirectory's final path component, used as its failure key.
pub fn subdir_name(subdir: &Path) -> String {
    subdir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| subdir.display().to_string())
}
