//! Add command implementation.
use anyhow::Result;

use crate::cli::AddOpts;
use crate::logging::Log;
use crate::store::DotfileStore;

/// Run the add command.
///
/// # Errors
///
/// Returns an error if the config cannot be loaded or saved.
pub fn run(store: &DotfileStore, opts: &AddOpts, log: &dyn Log) -> Result<()> {
    store.add(&opts.app_name, &opts.dotfile)?;
    log.info(&format!(
        "Added dotfile '{}' for app '{}'.",
        opts.dotfile, opts.app_name
    ));
    Ok(())
}
