//! # Dirpack Filesystem Utilities (`common::fs`)
//!
//! File: cli/src/common/fs/mod.rs
//!
//! ## Overview
//!
//! Small filesystem helpers shared by the orchestrator and the worker task:
//! enumerating the immediate subdirectories of a source root, checking
//! whether a directory is empty (the gate for final source-root removal),
//! and checking whether a written archive file is valid.
//!
//! ## Architecture
//!
//! All helpers are synchronous `std::fs` wrappers. Callers running inside
//! the async orchestrator invoke them from blocking task contexts or accept
//! the short metadata syscalls inline.
//!
use crate::core::error::Result;
use anyhow::Context;
use std::fs;
use std::path::{Path, PathBuf};

/// # List Immediate Subdirectories (`list_subdirectories`)
///
/// Returns the immediate child directories of `dir`, in the order the
/// underlying directory iterator yields them (platform-dependent, not
/// sorted). Plain files, symlinks to files, and other entry kinds directly
/// under `dir` are ignored.
///
/// ## Arguments
///
/// * `dir` - The directory to enumerate. Must exist.
///
/// ## Returns
///
/// * `Result<Vec<PathBuf>>` - Paths of the child directories.
///
/// ## Errors
///
/// Returns an `Err` if `dir` cannot be read or an entry's type cannot be
/// determined.
pub fn list_subdirectories(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut subdirs = Vec::new();
    let entries = fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory: {}", dir.display()))?;
    for entry in entries {
        let entry =
            entry.with_context(|| format!("Failed to read entry in: {}", dir.display()))?;
        let file_type = entry.file_type().with_context(|| {
            format!("Failed to determine type of: {}", entry.path().display())
        })?;
        if file_type.is_dir() {
            subdirs.push(entry.path());
        }
    }
    Ok(subdirs)
}

/// # Check Directory Emptiness (`dir_is_empty`)
///
/// Returns `true` when `dir` contains no entries at all. Used to decide
/// whether the source root itself may be removed after all tasks finished.
///
/// ## Errors
///
/// Returns an `Err` if `dir` cannot be read.
pub fn dir_is_empty(dir: &Path) -> Result<bool> {
    let mut entries = fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory: {}", dir.display()))?;
    Ok(entries.next().is_none())
}

/// # Check Archive Validity (`is_valid_archive`)
///
/// An archive is considered valid when the path exists, is a regular file,
/// and has a size greater than zero. A missing or zero-size file is the
/// signal left behind by an interrupted or failed archive write, and the
/// caller must not delete the corresponding source subdirectory.
///
/// Never errors: any metadata failure counts as "not valid".
pub fn is_valid_archive(path: &Path) -> bool {
    fs::metadata(path)
        .map(|meta| meta.is_file() && meta.len() > 0)
        .unwrap_or(false)
}
