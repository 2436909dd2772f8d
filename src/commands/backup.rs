//! Backup command implementation.
use anyhow::Result;

use crate::cli::AppOpts;
use crate::logging::Log;
use crate::store::DotfileStore;

/// Run the backup command.
///
/// # Errors
///
/// Returns an error if the config cannot be loaded or a `~` path cannot be
/// expanded.  Individual dotfiles that fail are only reported.
pub fn run(store: &DotfileStore, opts: &AppOpts, log: &dyn Log) -> Result<()> {
    log.stage(&format!("Backing up {}", opts.app_name));
    super::finish_run(store.backup(&opts.app_name), log)
}
