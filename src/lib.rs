//! Per-application dotfile backup and restore.
//!
//! Tracks, per named app, a list of dotfile paths in `config.json`, copies
//! them into `backups/<app>/` on demand, and copies them back on restore.
//!
//! The public API is organised into layers:
//!
//! - **[`store`]**: the config file, the backup tree, and the five operations
//! - **[`commands`]**: subcommand handlers that report store results
//! - **[`cli`]**: argument parsing
//! - **[`logging`]**: console and file output through `tracing`
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod error;
pub mod logging;
pub mod store;
