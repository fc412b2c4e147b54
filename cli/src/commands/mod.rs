//! # Dirpack Commands
//!
//! File: cli/src/commands/mod.rs
//!
//! ## Overview
//!
//! Aggregates the command handlers of the CLI. `dirpack` currently exposes a
//! single operation — `pack` — whose arguments are flattened directly into
//! the top-level CLI rather than nested behind a subcommand.
//!
pub mod pack;
