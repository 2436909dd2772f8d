// Shared helpers for integration tests.
//
// Provides a temporary store root plus a separate temporary home directory,
// so each test gets an isolated config.json, backups/ tree, and `~`.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::path::{Path, PathBuf};

use dotbackup_cli::store::DotfileStore;

/// An isolated store backed by two [`tempfile::TempDir`]s.
#[derive(Debug)]
pub struct TestStore {
    /// Holds `config.json` and `backups/`.
    pub root: tempfile::TempDir,
    /// Stands in for the user's home directory.
    pub home: tempfile::TempDir,
    /// Store wired to `root` and `home`.
    pub store: DotfileStore,
}

impl TestStore {
    /// Create an empty store; no config file exists yet.
    pub fn new() -> Self {
        let root = tempfile::tempdir().expect("create root dir");
        let home = tempfile::tempdir().expect("create home dir");
        let store = DotfileStore::in_root(root.path(), Some(home.path().to_path_buf()));
        Self { root, home, store }
    }

    /// Path to the store root.
    pub fn root_path(&self) -> &Path {
        self.root.path()
    }

    /// `backups/<app>/<name>` under the store root.
    pub fn backup_path(&self, app: &str, name: &str) -> PathBuf {
        self.root.path().join("backups").join(app).join(name)
    }

    /// Absolute path of `rel` under the fake home.
    pub fn home_path(&self, rel: &str) -> PathBuf {
        self.home.path().join(rel)
    }

    /// Write `content` to `rel` under the fake home, creating parents.
    pub fn write_home(&self, rel: &str, content: &str) -> PathBuf {
        let path = self.home_path(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create home parent");
        }
        std::fs::write(&path, content).expect("write home file");
        path
    }

    /// Register `dotfile` under `app`.
    pub fn track(&self, app: &str, dotfile: &str) -> &Self {
        self.store.add(app, dotfile).expect("add dotfile");
        self
    }
}

/// Read a file to a string.
pub fn read(path: &Path) -> String {
    std::fs::read_to_string(path).expect("read file")
}
