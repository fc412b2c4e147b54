//! # Dirpack Error Types
//!
//! File: cli/src/core/error.rs
//!
//! ## Overview
//!
//! This module defines the error types and error handling mechanisms used
//! throughout dirpack. It provides a consistent approach to error management
//! with detailed error information and context.
//!
//! ## Architecture
//!
//! The error system consists of two main components:
//! - `DirpackError`: A custom error enum using `thiserror` for the
//!   distinguished error conditions
//! - `Result<T>`: A type alias for `anyhow::Result<T>` for flexible error
//!   handling
//!
//! Two variants are fatal and abort a run before any subdirectory is
//! touched: `SourceNotFound` and `SourceNotADirectory`. `ArchiveFailed`
//! is recoverable — it is swallowed at the worker-task boundary and only
//! surfaces as an entry in the run's `failed_names`.
//!
//! ## Examples
//!
//! ```rust
//! // Return a distinguished error type
//! if !source.exists() {
//!     return Err(DirpackError::SourceNotFound { path: source.to_path_buf() }.into());
//! }
//!
//! // Add context to errors using anyhow
//! let file = File::create(&archive_path)
//!     .with_context(|| format!("Failed to create archive file: {}", archive_path.display()))?;
//! ```
//!
use std::path::PathBuf;
use thiserror::Error;

/// Custom error type for the dirpack application.
#[derive(Error, Debug)]
pub enum DirpackError {
    /// The source directory passed on the command line does not exist.
    /// Fatal: the run aborts before any work is attempted.
    #[error("Source directory does not exist: {path}")]
    SourceNotFound { path: PathBuf },

    /// The source path exists but is not a directory. Fatal.
    #[error("Source path is not a directory: {path}")]
    SourceNotADirectory { path: PathBuf },

    /// Archive creation or verification failed for one subdirectory.
    /// Recoverable: recorded in the run result, the subdirectory is left
    /// untouched, and sibling tasks continue.
    #[error("Archive creation failed for '{name}': {cause:#}")]
    ArchiveFailed { name: String, cause: anyhow::Error },

    /// Generic filesystem error outside the per-subdirectory workflow.
    #[error("Filesystem error: {0}")]
    FileSystem(String),
}

/// Type alias for Result using anyhow::Error for broad compatibility.
/// Anyhow allows for easy context addition and flexible error handling.
pub type Result<T> = anyhow::Result<T>;
