//! # Dirpack CLI Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//!
//! ## Overview
//!
//! Shared helpers for the integration tests in `cli/tests/`. Each `.rs`
//! file in that directory is compiled as a separate test crate running the
//! compiled `dirpack` binary, so everything common lives here.
//!

// Allow potentially unused code in this common module, as different test
// files might use different helpers.
#![allow(dead_code)]

pub use assert_cmd::Command;

use std::fs;
use std::path::Path;

/// # Get Dirpack Command (`dirpack_cmd`)
///
/// Creates an `assert_cmd::Command` pointing to the compiled `dirpack`
/// binary target for the current test run.
///
/// ## Panics
/// Panics if the `dirpack` binary cannot be found via `Command::cargo_bin`.
pub fn dirpack_cmd() -> Command {
    Command::cargo_bin("dirpack").expect("Failed to find dirpack binary for testing")
}

/// # Populate Source Directory (`populate_source`)
///
/// Creates `count` subdirectories named `subdir_<i>` under `source`, each
/// holding `files_per_dir` small text files, mirroring the layout the
/// end-to-end scenarios expect.
pub fn populate_source(source: &Path, count: usize, files_per_dir: usize) {
    for i in 0..count {
        let subdir = source.join(format!("subdir_{}", i));
        fs::create_dir_all(&subdir).expect("Failed to create test subdirectory");
        for j in 0..files_per_dir {
            fs::write(
                subdir.join(format!("file_{}.txt", j)),
                format!("Test content {}-{}", i, j),
            )
            .expect("Failed to write test file");
        }
    }
}
