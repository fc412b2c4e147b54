//! # Dirpack Core Infrastructure
//!
//! File: cli/src/core/mod.rs
//!
//! ## Overview
//!
//! This module aggregates the core components of the archive-then-delete
//! workflow. The command layer calls into `orchestrator`, which fans worker
//! tasks out per subdirectory and aggregates their outcomes.
//!
//! ## Architecture
//!
//! - `error`: Error types (`DirpackError`) and the shared `Result` alias
//! - `orchestrator`: run validation, subdirectory enumeration, bounded
//!   fan-out/fan-in, and final source-directory cleanup
//! - `worker`: the per-subdirectory task (archive, verify, delete)
//!
//! ## Usage
//!
//! ```rust
//! use crate::core::error::{DirpackError, Result};
//! use crate::core::orchestrator; // process_directories, RunResult
//! ```
//!
pub mod error;
pub mod orchestrator;
pub mod worker;
