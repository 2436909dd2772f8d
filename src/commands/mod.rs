//! Top-level subcommand handlers.
//!
//! Each handler opens the [`DotfileStore`] described by the global options,
//! runs one store operation, and turns its result into log lines.
pub mod add;
pub mod backup;
pub mod list;
pub mod remove;
pub mod restore;
pub mod version;

use std::path::PathBuf;

use anyhow::Result;

use crate::cli::GlobalOpts;
use crate::error::StoreError;
use crate::logging::{Level, Log};
use crate::store::{BACKUP_DIR, CONFIG_FILE, DotfileStore, ItemOutcome, Report};

/// Build the store from the global options.
///
/// `--config` and `--backup-dir` take precedence over `--root`; without
/// either, paths are relative to the current directory.
#[must_use]
pub fn open_store(global: &GlobalOpts, home: Option<PathBuf>, log: &dyn Log) -> DotfileStore {
    let root = global.root.clone().unwrap_or_default();
    let config = global
        .config
        .clone()
        .unwrap_or_else(|| root.join(CONFIG_FILE));
    let backups = global
        .backup_dir
        .clone()
        .unwrap_or_else(|| root.join(BACKUP_DIR));

    log.debug(&format!("config: {}", config.display()));
    log.debug(&format!("backups: {}", backups.display()));
    match &home {
        Some(home) => log.debug(&format!("home: {}", home.display())),
        None => log.debug("home: <unset>"),
    }

    DotfileStore::new(config, backups, home)
}

/// Level an item outcome is reported at.
const fn level_for(outcome: &ItemOutcome) -> Level {
    match outcome {
        ItemOutcome::Copied { .. } => Level::Info,
        ItemOutcome::SourceMissing | ItemOutcome::BackupMissing => Level::Warn,
        ItemOutcome::PermissionDenied | ItemOutcome::Failed { .. } => Level::Error,
    }
}

/// Log one line per item, then a summary line.
pub fn log_report(report: &Report, log: &dyn Log) {
    for item in &report.items {
        log.log(level_for(&item.outcome), &item.to_string());
    }
    log.info(&report.summary().to_string());
}

/// Log the outcome of a backup or restore run.
///
/// An unknown app is reported as a warning and is not an error.
///
/// # Errors
///
/// Returns any other store error (config parse/read/write, unset home).
pub fn finish_run(result: Result<Report, StoreError>, log: &dyn Log) -> Result<()> {
    match result {
        Ok(report) => {
            log_report(&report, log);
            Ok(())
        }
        Err(err @ StoreError::AppNotFound(_)) => {
            log.warn(&err.to_string());
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}
