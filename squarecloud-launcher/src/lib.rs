//! # squarecloud-launcher
//!
//! A thin bootstrap launcher for the Square Cloud CLI.
//!
//! ## Overview
//!
//! The launcher is what the npm package installs. It does not implement any
//! CLI behaviour itself: `squarecloud update` downloads the prebuilt binary
//! for the current platform from the latest GitHub release and unpacks it
//! into the binary directory, and every other invocation is forwarded to that
//! binary with stdout, stderr and the exit status passed through.
//!
//! ## Usage
//!
//! ```bash
//! # Fetch or refresh the real CLI
//! squarecloud update
//!
//! # Anything else runs the installed binary
//! squarecloud deploy --env prod
//! ```
//!
//! ## Configuration
//!
//! Configuration is read from `$SQUARECLOUD_LAUNCHER_CONFIG`,
//! `<install root>/launcher.toml`, or `~/.config/squarecloud/launcher.toml`.
//! Every field has a default, so no file is required.

/// Release asset name matching
pub mod asset;

/// Command-line capture and update/forward classification
pub mod cli;

/// Configuration file handling
pub mod config;

/// Execution of the installed binary
pub mod dispatcher;

/// Error types and error handling utilities
pub mod error;

/// Release host client and release metadata
pub mod github;

/// Download, extraction and the update flow
pub mod installer;

/// Update-or-forward entry point shared by the binary and tests
pub mod launcher;

/// Host OS/arch to asset naming tokens
pub mod platform;

/// Archive extraction and file permission helpers
pub mod utils;
