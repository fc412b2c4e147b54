//! # Dirpack TAR Archive Operations (`common::archive::tar`)
//!
//! File: cli/src/common/archive/tar.rs
//!
//! ## Overview
//!
//! This module provides functionality for creating gzipped tarballs
//! (`.tar.gz`). Its single use within dirpack is to archive one source
//! subdirectory into one output file before that subdirectory is deleted.
//!
//! ## Architecture
//!
//! The module leverages the `tar` crate for building the archive structure,
//! the `flate2` crate for Gzip compression, and `walkdir` for the recursive
//! tree walk.
//!
//! - Every regular file under the source directory is appended under its
//!   path relative to that directory's root, so the archive is
//!   location-independent while preserving internal structure.
//! - Directory entries themselves are not stored; a subdirectory with no
//!   files produces a valid archive containing zero entries.
//! - The archive is streamed straight to its final path on disk. There is
//!   no temp-file-and-rename step: an interrupted write leaves a truncated
//!   or zero-size file, which the caller's validity check rejects.
//!
use crate::core::error::Result;
use anyhow::Context;
use std::fs::File;
use std::path::Path;
use walkdir::WalkDir;

/// # Create Gzipped TAR Archive (`create_archive`)
///
/// Creates a gzipped TAR archive at `archive_path` containing every regular
/// file found under `src_dir` (recursively), stored at paths relative to
/// `src_dir`.
///
/// ## Arguments
///
/// * `src_dir` - The directory whose file tree should be archived. Must exist.
/// * `archive_path` - Destination file path; created or truncated.
///
/// ## Returns
///
/// * `Result<()>` - `Ok` once the tar structure and the gzip stream are both
///   finalized on disk.
///
/// ## Errors
///
/// Returns an `Err` if:
/// - The destination file cannot be created.
/// - The tree walk fails (unreadable entry, permissions).
/// - Any file cannot be appended to the archive.
/// - Finishing the TAR structure or the Gzip stream fails.
pub fn create_archive(src_dir: &Path, archive_path: &Path) -> Result<()> {
    // Stream the compressed archive straight to its destination file.
    let file = File::create(archive_path).with_context(|| {
        format!("Failed to create archive file: {}", archive_path.display())
    })?;
    let enc = flate2::write::GzEncoder::new(file, flate2::Compression::default());
    let mut tar_builder = tar::Builder::new(enc);

    // Walk the full tree and append regular files under their relative paths.
    // Only files are stored; an empty directory yields a zero-entry archive.
    for entry in WalkDir::new(src_dir) {
        let entry = entry.with_context(|| {
            format!("Failed to walk directory: {}", src_dir.display())
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let rel_path = entry.path().strip_prefix(src_dir).with_context(|| {
            format!(
                "Path '{}' is not under '{}'",
                entry.path().display(),
                src_dir.display()
            )
        })?;
        tar_builder
            .append_path_with_name(entry.path(), rel_path)
            .with_context(|| {
                format!("Failed to add '{}' to the tar archive", entry.path().display())
            })?;
    }

    // Finalize the TAR archive structure, then the Gzip compression stream.
    let encoder = tar_builder
        .into_inner()
        .context("Failed to finalize tar archive structure")?;
    encoder
        .finish()
        .context("Failed to finish gzip compression stream")?;

    Ok(())
}
