//! # Dirpack Shared Utilities (`common`)
//!
//! File: cli/src/common/mod.rs
//!
//! ## Overview
//!
//! Shared utility modules used by the core workflow:
//!
//! - **`archive`**: creation of gzipped TAR archives from directory trees.
//! - **`fs`**: small filesystem helpers (subdirectory listing, emptiness
//!   checks, archive validity checks).
//!
pub mod archive;
pub mod fs;
