//! # Dirpack Archive Utilities (`common::archive`)
//!
//! File: cli/src/common/archive/mod.rs
//!
//! ## Overview
//!
//! Functionality for creating compressed archives. The `tar` submodule
//! builds gzipped tarballs (`.tar.gz`) from a directory's file tree, storing
//! entries at paths relative to that directory's root.
//!
/// Creation of gzipped TAR archives (`create_archive`).
pub mod tar;
