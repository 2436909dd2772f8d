//! Snapshot of what is in the backup tree.
use std::fmt;

/// Backups held for one app.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppBackups {
    /// App name (the directory name under the backup root).
    pub app: String,
    /// Names of the immediate children of the app directory, sorted.
    pub entries: Vec<String>,
}

/// All apps under the backup root, sorted by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BackupListing {
    /// One element per app directory.
    pub apps: Vec<AppBackups>,
}

impl BackupListing {
    /// `true` when there is nothing to list.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.apps.is_empty()
    }

    /// Look up the backups for `app`.
    #[must_use]
    pub fn get(&self, app: &str) -> Option<&AppBackups> {
        self.apps.iter().find(|a| a.app == app)
    }

    /// Render the listing as output lines.
    ///
    /// Each app is introduced by a blank line and an `App: <name>` header,
    /// followed by ` - <entry>` lines.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        if self.is_empty() {
            return vec!["No backups found.".to_string()];
        }
        let mut lines = Vec::new();
        for app in &self.apps {
            lines.push(String::new());
            lines.push(format!("App: {}", app.app));
            lines.extend(app.entries.iter().map(|e| format!(" - {e}")));
        }
        lines
    }
}

impl fmt::Display for BackupListing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.lines() {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
