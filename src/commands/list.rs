//! List command implementation.
use anyhow::Result;

use crate::logging::Log;
use crate::store::DotfileStore;

/// Run the list command: one `App:` block per backed-up app.
///
/// # Errors
///
/// Returns an error if the backup directory exists but cannot be read.
pub fn run(store: &DotfileStore, log: &dyn Log) -> Result<()> {
    let listing = store.list_backups()?;
    for line in listing.lines() {
        log.info(&line);
    }
    Ok(())
}
