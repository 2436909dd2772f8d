//! The dotfile store: tracked paths in `config.json` plus the backup tree.
//!
//! [`DotfileStore`] is built from explicit paths, so every operation can be
//! pointed at a temporary directory.  Backup and restore never stop at the
//! first bad dotfile; each one gets its own entry in the returned
//! [`Report`].
pub mod config;
pub mod fs;
pub mod listing;
pub mod report;

use std::path::{Path, PathBuf};

pub use config::Config;
pub use listing::{AppBackups, BackupListing};
pub use report::{EntryKind, ItemOutcome, ItemReport, Operation, Report, Summary};

use crate::error::StoreError;

/// Default config file name, relative to the store root.
pub const CONFIG_FILE: &str = "config.json";

/// Default backup directory name, relative to the store root.
pub const BACKUP_DIR: &str = "backups";

/// Resolve the current user's home directory.
///
/// Used for `~` expansion and for the default log location.
#[must_use]
pub fn resolve_home() -> Option<PathBuf> {
    dirs::home_dir().filter(|h| !h.as_os_str().is_empty())
}

/// What [`DotfileStore::remove`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoveOutcome {
    /// The app's backup directory was deleted.
    Removed {
        /// The directory that was deleted.
        path: PathBuf,
    },
    /// There was no backup directory for the app.
    NoBackups,
}

/// Config file, backup root, and home directory used by every operation.
#[derive(Debug, Clone)]
pub struct DotfileStore {
    config_path: PathBuf,
    backup_root: PathBuf,
    home: Option<PathBuf>,
}

impl DotfileStore {
    /// Create a store from explicit locations.
    ///
    /// `home` is used to expand a leading `~` in dotfile paths; `None` makes
    /// such paths an error.
    #[must_use]
    pub const fn new(config_path: PathBuf, backup_root: PathBuf, home: Option<PathBuf>) -> Self {
        Self {
            config_path,
            backup_root,
            home,
        }
    }

    /// Create a store with `config.json` and `backups/` under `root`.
    #[must_use]
    pub fn in_root(root: &Path, home: Option<PathBuf>) -> Self {
        Self::new(root.join(CONFIG_FILE), root.join(BACKUP_DIR), home)
    }

    /// Path of the config file.
    #[must_use]
    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Root of the backup tree.
    #[must_use]
    pub fn backup_root(&self) -> &Path {
        &self.backup_root
    }

    /// Backup directory for `app`.
    #[must_use]
    pub fn app_dir(&self, app: &str) -> PathBuf {
        self.backup_root.join(app)
    }

    /// Load the config, creating an empty one if it does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be read, parsed, or created.
    pub fn load_config(&self) -> Result<Config, StoreError> {
        Ok(Config::load(&self.config_path)?)
    }

    /// Persist `config`, replacing the file on disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be written.
    pub fn save_config(&self, config: &Config) -> Result<(), StoreError> {
        Ok(config.save(&self.config_path)?)
    }

    /// Expand a leading `~` in `raw` to the home directory.
    ///
    /// Only `~` on its own and `~/…` are expanded; `~user` forms and every
    /// other path are returned unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::HomeNotSet`] if expansion is needed but the
    /// store has no home directory.
    pub fn expand_home(&self, raw: &str) -> Result<PathBuf, StoreError> {
        let rest = if raw == "~" {
            Some("")
        } else {
            raw.strip_prefix("~/")
                .or_else(|| raw.strip_prefix('~').filter(|r| cfg!(windows) && r.starts_with('\\')))
                .map(|r| r.trim_start_matches(['/', '\\']))
        };
        match rest {
            None => Ok(PathBuf::from(raw)),
            Some(rest) => {
                let home = self.home.as_deref().ok_or(StoreError::HomeNotSet)?;
                Ok(if rest.is_empty() {
                    home.to_path_buf()
                } else {
                    home.join(rest)
                })
            }
        }
    }

    /// Append `dotfile` to `app`'s tracked paths and persist the config.
    ///
    /// The path is stored verbatim: not validated, not de-duplicated.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be loaded or saved.
    pub fn add(&self, app: &str, dotfile: &str) -> Result<(), StoreError> {
        let mut config = self.load_config()?;
        config.add(app, dotfile);
        self.save_config(&config)
    }

    /// Copy every tracked dotfile of `app` into `backups/<app>/<basename>`.
    ///
    /// Directories are merged into an existing backup of the same name;
    /// files overwrite theirs.  A missing or failing dotfile is recorded and
    /// the rest still run.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::AppNotFound`] for an unknown app (nothing is
    /// written) and a config error if the config cannot be loaded.  A `~`
    /// path that cannot be expanded only fails its own item.
    pub fn backup(&self, app: &str) -> Result<Report, StoreError> {
        let config = self.load_config()?;
        let dotfiles = config
            .dotfiles(app)
            .ok_or_else(|| StoreError::AppNotFound(app.to_string()))?;

        let app_dir = self.app_dir(app);
        let mut report = Report::new(Operation::Backup, app);
        for dotfile in dotfiles {
            let source = match self.expand_home(dotfile) {
                Ok(path) => path,
                Err(err) => {
                    let outcome = unexpanded(&err);
                    report.push(dotfile, PathBuf::from(dotfile), app_dir.clone(), outcome);
                    continue;
                }
            };
            if !source.exists() {
                report.push(dotfile, source, app_dir.clone(), ItemOutcome::SourceMissing);
                continue;
            }
            let Some(name) = source.file_name() else {
                let outcome = no_file_name(&source);
                report.push(dotfile, source, app_dir.clone(), outcome);
                continue;
            };
            let destination = app_dir.join(name);
            let outcome = copy_entry(&source, &destination);
            report.push(dotfile, source, destination, outcome);
        }
        Ok(report)
    }

    /// Copy every backup of `app` back onto its original path.
    ///
    /// Mirrors [`backup`](Self::backup): file backups overwrite the original,
    /// directory backups are merged into it.  Dotfiles without a backup are
    /// skipped and their originals left untouched.
    ///
    /// # Errors
    ///
    /// Same as [`backup`](Self::backup).
    pub fn restore(&self, app: &str) -> Result<Report, StoreError> {
        let config = self.load_config()?;
        let dotfiles = config
            .dotfiles(app)
            .ok_or_else(|| StoreError::AppNotFound(app.to_string()))?;

        let app_dir = self.app_dir(app);
        let mut report = Report::new(Operation::Restore, app);
        for dotfile in dotfiles {
            let original = match self.expand_home(dotfile) {
                Ok(path) => path,
                Err(err) => {
                    let outcome = unexpanded(&err);
                    report.push(dotfile, app_dir.clone(), PathBuf::from(dotfile), outcome);
                    continue;
                }
            };
            let Some(name) = original.file_name() else {
                let outcome = no_file_name(&original);
                report.push(dotfile, app_dir.clone(), original, outcome);
                continue;
            };
            let backup = app_dir.join(name);
            if !backup.exists() {
                report.push(dotfile, backup, original, ItemOutcome::BackupMissing);
                continue;
            }
            let outcome = copy_entry(&backup, &original);
            report.push(dotfile, backup, original, outcome);
        }
        Ok(report)
    }

    /// List app directories under the backup root and their immediate
    /// children, both sorted by name.
    ///
    /// A missing backup root yields an empty listing.  Plain files directly
    /// under the root are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if a directory cannot be read.
    pub fn list_backups(&self) -> Result<BackupListing, StoreError> {
        if !self.backup_root.exists() {
            return Ok(BackupListing::default());
        }
        let mut apps = Vec::new();
        for path in read_dir_paths(&self.backup_root)? {
            if !path.is_dir() {
                continue;
            }
            let mut entries: Vec<String> = read_dir_paths(&path)?
                .iter()
                .filter_map(|p| p.file_name())
                .map(|n| n.to_string_lossy().into_owned())
                .collect();
            entries.sort();
            let app = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            apps.push(AppBackups { app, entries });
        }
        apps.sort_by(|a, b| a.app.cmp(&b.app));
        Ok(BackupListing { apps })
    }

    /// Delete `backups/<app>` and everything below it.
    ///
    /// The app's config entry is left as it is.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the directory exists but cannot be
    /// removed.
    pub fn remove(&self, app: &str) -> Result<RemoveOutcome, StoreError> {
        let path = self.app_dir(app);
        if !path.exists() {
            return Ok(RemoveOutcome::NoBackups);
        }
        std::fs::remove_dir_all(&path).map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })?;
        Ok(RemoveOutcome::Removed { path })
    }
}

/// Copy `src` onto `dst` (recursive merge for directories) and classify the
/// result.
fn copy_entry(src: &Path, dst: &Path) -> ItemOutcome {
    let (kind, result) = if src.is_dir() {
        (EntryKind::Directory, fs::copy_dir_merge(src, dst))
    } else {
        (
            EntryKind::File,
            fs::ensure_parent_dir(dst).and_then(|()| fs::copy_file_preserving(src, dst)),
        )
    };
    match result {
        Ok(()) => ItemOutcome::Copied { kind },
        Err(err) => ItemOutcome::from_error(&err),
    }
}

fn unexpanded(err: &StoreError) -> ItemOutcome {
    ItemOutcome::Failed {
        reason: err.to_string(),
    }
}

fn no_file_name(path: &Path) -> ItemOutcome {
    ItemOutcome::Failed {
        reason: format!("'{}' has no file name", path.display()),
    }
}

fn read_dir_paths(dir: &Path) -> Result<Vec<PathBuf>, StoreError> {
    let io_err = |source| StoreError::Io {
        path: dir.to_path_buf(),
        source,
    };
    std::fs::read_dir(dir)
        .map_err(io_err)?
        .map(|entry| entry.map(|e| e.path()).map_err(io_err))
        .collect()
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use std::fs as stdfs;

    /// A store rooted in a temp dir with a separate temp home.
    struct Fixture {
        root: tempfile::TempDir,
        home: tempfile::TempDir,
        store: DotfileStore,
    }

    impl Fixture {
        fn new() -> Self {
            let root = tempfile::tempdir().unwrap();
            let home = tempfile::tempdir().unwrap();
            let store = DotfileStore::in_root(root.path(), Some(home.path().to_path_buf()));
            Self { root, home, store }
        }

        fn home_file(&self, rel: &str, content: &str) -> PathBuf {
            let path = self.home.path().join(rel);
            stdfs::create_dir_all(path.parent().unwrap()).unwrap();
            stdfs::write(&path, content).unwrap();
            path
        }
    }

    #[test]
    fn expand_home_handles_tilde_forms() {
        let fx = Fixture::new();
        let home = fx.home.path();
        assert_eq!(fx.store.expand_home("~").unwrap(), home);
        assert_eq!(fx.store.expand_home("~/.bashrc").unwrap(), home.join(".bashrc"));
        assert_eq!(
            fx.store.expand_home("/etc/hosts").unwrap(),
            PathBuf::from("/etc/hosts")
        );
        assert_eq!(
            fx.store.expand_home("~other/.bashrc").unwrap(),
            PathBuf::from("~other/.bashrc")
        );
    }

    #[test]
    fn expand_home_without_home_fails_only_when_needed() {
        let dir = tempfile::tempdir().unwrap();
        let store = DotfileStore::in_root(dir.path(), None);
        assert!(matches!(
            store.expand_home("~/.bashrc"),
            Err(StoreError::HomeNotSet)
        ));
        assert_eq!(store.expand_home("/tmp/x").unwrap(), PathBuf::from("/tmp/x"));
    }

    #[test]
    fn missing_home_fails_only_tilde_items() {
        let root = tempfile::tempdir().unwrap();
        let elsewhere = tempfile::tempdir().unwrap();
        let abs = elsewhere.path().join(".abs");
        stdfs::write(&abs, "abs").unwrap();
        let store = DotfileStore::in_root(root.path(), None);
        store.add("app", "~/.early").unwrap();
        store.add("app", abs.to_str().unwrap()).unwrap();
        store.add("app", "~/.later").unwrap();

        let report = store.backup("app").unwrap();

        assert_eq!(report.items.len(), 3);
        assert!(report.items[0].outcome.is_failure());
        assert!(report.items[1].outcome.is_copied());
        assert!(report.items[2].outcome.is_failure());
        assert_eq!(
            report.items[2].to_string(),
            "Error: Unable to back up '~/.later'. home directory could not be determined"
        );
        assert_eq!(
            stdfs::read_to_string(root.path().join("backups/app/.abs")).unwrap(),
            "abs"
        );

        stdfs::write(&abs, "changed").unwrap();
        let report = store.restore("app").unwrap();
        assert_eq!(report.summary().copied, 1);
        assert_eq!(report.summary().failed, 2);
        assert_eq!(stdfs::read_to_string(&abs).unwrap(), "abs");
    }

    #[test]
    fn backup_copies_file_under_app_dir() {
        let fx = Fixture::new();
        fx.home_file(".bashrc", "export X=1");
        fx.store.add("shell", "~/.bashrc").unwrap();

        let report = fx.store.backup("shell").unwrap();

        let dest = fx.root.path().join("backups/shell/.bashrc");
        assert_eq!(stdfs::read_to_string(&dest).unwrap(), "export X=1");
        assert_eq!(report.items.len(), 1);
        assert_eq!(
            report.items[0].outcome,
            ItemOutcome::Copied {
                kind: EntryKind::File
            }
        );
        assert_eq!(report.items[0].destination, dest);
    }

    #[test]
    fn backup_unknown_app_writes_nothing() {
        let fx = Fixture::new();
        let err = fx.store.backup("ghost").unwrap_err();
        assert!(matches!(err, StoreError::AppNotFound(ref app) if app == "ghost"));
        assert!(!fx.store.backup_root().exists());
    }

    #[test]
    fn backup_skips_missing_source_and_continues() {
        let fx = Fixture::new();
        fx.home_file(".vimrc", "set nu");
        fx.store.add("vim", "~/.missing").unwrap();
        fx.store.add("vim", "~/.vimrc").unwrap();

        let report = fx.store.backup("vim").unwrap();

        assert_eq!(report.items[0].outcome, ItemOutcome::SourceMissing);
        assert!(report.items[1].outcome.is_copied());
        assert_eq!(report.summary().skipped, 1);
        assert!(fx.root.path().join("backups/vim/.vimrc").exists());
    }

    #[test]
    fn backup_copies_directory_recursively() {
        let fx = Fixture::new();
        fx.home_file(".config/nvim/init.lua", "vim.o.number = true");
        fx.home_file(".config/nvim/lua/plugins.lua", "return {}");
        fx.store.add("nvim", "~/.config/nvim").unwrap();

        let report = fx.store.backup("nvim").unwrap();

        assert_eq!(
            report.items[0].outcome,
            ItemOutcome::Copied {
                kind: EntryKind::Directory
            }
        );
        let dest = fx.root.path().join("backups/nvim/nvim");
        assert_eq!(
            stdfs::read_to_string(dest.join("lua/plugins.lua")).unwrap(),
            "return {}"
        );
    }

    #[test]
    fn restore_without_backup_leaves_original() {
        let fx = Fixture::new();
        let original = fx.home_file(".bashrc", "current");
        fx.store.add("shell", "~/.bashrc").unwrap();

        let report = fx.store.restore("shell").unwrap();

        assert_eq!(report.items[0].outcome, ItemOutcome::BackupMissing);
        assert_eq!(stdfs::read_to_string(original).unwrap(), "current");
    }

    #[test]
    fn restore_recreates_missing_parent_directories() {
        let fx = Fixture::new();
        let original = fx.home_file(".config/git/config", "[user]");
        fx.store.add("git", "~/.config/git/config").unwrap();
        fx.store.backup("git").unwrap();
        stdfs::remove_dir_all(fx.home.path().join(".config")).unwrap();

        let report = fx.store.restore("git").unwrap();

        assert!(report.items[0].outcome.is_copied());
        assert_eq!(stdfs::read_to_string(original).unwrap(), "[user]");
    }

    #[test]
    fn list_backups_ignores_plain_files_at_root() {
        let fx = Fixture::new();
        let root = fx.store.backup_root().to_path_buf();
        stdfs::create_dir_all(root.join("zsh")).unwrap();
        stdfs::write(root.join("zsh/.zshrc"), "").unwrap();
        stdfs::create_dir_all(root.join("git")).unwrap();
        stdfs::write(root.join("stray.txt"), "").unwrap();

        let listing = fx.store.list_backups().unwrap();

        let names: Vec<&str> = listing.apps.iter().map(|a| a.app.as_str()).collect();
        assert_eq!(names, ["git", "zsh"]);
        assert_eq!(listing.get("zsh").unwrap().entries, [".zshrc"]);
        assert!(listing.get("git").unwrap().entries.is_empty());
    }

    #[test]
    fn empty_backup_root_lists_no_backups() {
        let fx = Fixture::new();
        stdfs::create_dir_all(fx.store.backup_root()).unwrap();

        let listing = fx.store.list_backups().unwrap();

        assert!(listing.is_empty());
        assert_eq!(listing.lines(), ["No backups found."]);
    }

    #[test]
    fn list_backups_without_root_is_empty() {
        let fx = Fixture::new();
        assert!(fx.store.list_backups().unwrap().is_empty());
    }

    #[test]
    fn remove_reports_missing_backups() {
        let fx = Fixture::new();
        assert_eq!(fx.store.remove("shell").unwrap(), RemoveOutcome::NoBackups);
    }
}
