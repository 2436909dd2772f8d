//! Remove command implementation.
use anyhow::Result;

use crate::cli::AppOpts;
use crate::logging::Log;
use crate::store::{DotfileStore, RemoveOutcome};

/// Run the remove command.
///
/// Deletes the app's backups only.  If the app is still tracked, a note
/// says so, since its config entry is kept.  The note is best-effort: a
/// config that cannot be read is only warned about.
///
/// # Errors
///
/// Returns an error if the backup directory cannot be deleted.
pub fn run(store: &DotfileStore, opts: &AppOpts, log: &dyn Log) -> Result<()> {
    let app = &opts.app_name;
    match store.remove(app)? {
        RemoveOutcome::Removed { path } => {
            log.debug(&format!("deleted {}", path.display()));
            log.info(&format!("Removed backups for app '{app}'."));
        }
        RemoveOutcome::NoBackups => {
            log.info(&format!("No backups found for app '{app}'."));
        }
    }

    if !store.config_path().exists() {
        return Ok(());
    }
    let config = match store.load_config() {
        Ok(config) => config,
        Err(err) => {
            log.warn(&format!("Could not check config for app '{app}': {err}"));
            return Ok(());
        }
    };
    if let Some(dotfiles) = config.dotfiles(app) {
        log.info(&format!(
            "App '{app}' still tracks {} dotfile(s) in {}.",
            dotfiles.len(),
            store.config_path().display()
        ));
    }
    Ok(())
}
