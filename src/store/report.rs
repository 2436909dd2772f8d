//! Per-dotfile outcomes of a backup or restore run.
use std::fmt;
use std::io;
use std::path::PathBuf;

use super::fs::io_error_kind;

/// Which operation produced a [`Report`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Copy tracked dotfiles into the backup tree.
    Backup,
    /// Copy backups back onto their original paths.
    Restore,
}

/// Shape of a copied entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// A regular file (or a symlink to one).
    File,
    /// A directory, copied recursively.
    Directory,
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File => f.write_str("file"),
            Self::Directory => f.write_str("directory"),
        }
    }
}

/// Result of processing one dotfile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemOutcome {
    /// The entry was copied.
    Copied {
        /// Whether a file or a directory tree was copied.
        kind: EntryKind,
    },
    /// The dotfile does not exist on disk (backup).
    SourceMissing,
    /// No backup exists for the dotfile (restore).
    BackupMissing,
    /// The OS refused access while copying.
    PermissionDenied,
    /// Any other failure.
    Failed {
        /// Human-readable cause.
        reason: String,
    },
}

impl ItemOutcome {
    /// Classify a copy failure by the I/O error at the bottom of its chain.
    #[must_use]
    pub fn from_error(err: &anyhow::Error) -> Self {
        if io_error_kind(err) == Some(io::ErrorKind::PermissionDenied) {
            Self::PermissionDenied
        } else {
            Self::Failed {
                reason: format!("{err:#}"),
            }
        }
    }

    /// `true` when the entry was copied.
    #[must_use]
    pub const fn is_copied(&self) -> bool {
        matches!(self, Self::Copied { .. })
    }

    /// `true` when the entry was skipped because something did not exist.
    #[must_use]
    pub const fn is_skipped(&self) -> bool {
        matches!(self, Self::SourceMissing | Self::BackupMissing)
    }

    /// `true` when copying was attempted and failed.
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::PermissionDenied | Self::Failed { .. })
    }
}

/// Outcome for one tracked dotfile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemReport {
    /// Operation this item belongs to.
    pub operation: Operation,
    /// The dotfile path exactly as written in the config.
    pub dotfile: String,
    /// Where data was copied from: the resolved dotfile for a backup, the
    /// backup entry for a restore.
    pub source: PathBuf,
    /// Where data was copied to.
    pub destination: PathBuf,
    /// What happened.
    pub outcome: ItemOutcome,
}

impl fmt::Display for ItemReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let src = self.source.display();
        let dst = self.destination.display();
        match (self.operation, &self.outcome) {
            (Operation::Backup, ItemOutcome::Copied { kind }) => {
                write!(f, "Backed up {kind} '{src}' to '{dst}'.")
            }
            (Operation::Restore, ItemOutcome::Copied { .. }) => {
                write!(f, "Restored '{src}' to '{dst}'.")
            }
            (_, ItemOutcome::SourceMissing) => {
                write!(f, "Dotfile '{}' does not exist.", self.dotfile)
            }
            (_, ItemOutcome::BackupMissing) => {
                write!(f, "Backup file '{src}' does not exist. Skipping.")
            }
            (Operation::Backup, ItemOutcome::PermissionDenied) => write!(
                f,
                "Permission denied: Unable to back up '{src}'. Please check your permissions."
            ),
            (Operation::Restore, ItemOutcome::PermissionDenied) => {
                write!(f, "Permission denied: Unable to restore '{src}' to '{dst}'.")
            }
            (Operation::Backup, ItemOutcome::Failed { reason }) => {
                write!(f, "Error: Unable to back up '{src}'. {reason}")
            }
            (Operation::Restore, ItemOutcome::Failed { reason }) => {
                write!(f, "Error: Unable to restore '{src}' to '{dst}'. {reason}")
            }
        }
    }
}

/// Counts of item outcomes in a [`Report`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    /// Entries copied.
    pub copied: usize,
    /// Entries skipped because a source or backup was missing.
    pub skipped: usize,
    /// Entries that failed to copy.
    pub failed: usize,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total = self.copied + self.skipped + self.failed;
        write!(
            f,
            "{total} dotfile(s): {} copied, {} skipped, {} failed",
            self.copied, self.skipped, self.failed
        )
    }
}

/// Every item of one backup or restore run, in config order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    /// Operation that produced the report.
    pub operation: Operation,
    /// App the run was for.
    pub app: String,
    /// One entry per tracked dotfile.
    pub items: Vec<ItemReport>,
}

impl Report {
    /// Start an empty report.
    #[must_use]
    pub fn new(operation: Operation, app: &str) -> Self {
        Self {
            operation,
            app: app.to_string(),
            items: Vec::new(),
        }
    }

    /// Append an item.
    pub fn push(
        &mut self,
        dotfile: &str,
        source: PathBuf,
        destination: PathBuf,
        outcome: ItemOutcome,
    ) {
        self.items.push(ItemReport {
            operation: self.operation,
            dotfile: dotfile.to_string(),
            source,
            destination,
            outcome,
        });
    }

    /// Tally outcomes.
    #[must_use]
    pub fn summary(&self) -> Summary {
        self.items
            .iter()
            .fold(Summary::default(), |mut acc, item| {
                if item.outcome.is_copied() {
                    acc.copied += 1;
                } else if item.outcome.is_skipped() {
                    acc.skipped += 1;
                } else {
                    acc.failed += 1;
                }
                acc
            })
    }
}
