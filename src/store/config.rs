//! The persisted mapping of app name to tracked dotfile paths.
use std::collections::BTreeMap;
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::Write as _;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// App name to ordered list of dotfile paths, stored as a JSON object.
///
/// Paths keep insertion order and may repeat.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Config {
    apps: BTreeMap<String, Vec<String>>,
}

impl Config {
    /// Load the config at `path`.
    ///
    /// A missing file is created holding an empty mapping.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] if the file cannot be read,
    /// [`ConfigError::Parse`] if it is not a JSON object of string lists, and
    /// a write error if the empty file cannot be created.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            let empty = Self::default();
            empty.save(path)?;
            return Ok(empty);
        }
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Persist the config to `path`, replacing it atomically.
    ///
    /// The JSON is written to a sibling temporary file, synced, and renamed
    /// over `path`, so a crash never leaves a half-written config behind.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or any file operation fails.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let data = self.to_json()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let tmp = temp_path(path);
        let write_tmp = || -> std::io::Result<()> {
            let mut file = File::create(&tmp)?;
            file.write_all(&data)?;
            file.sync_all()
        };
        if let Err(source) = write_tmp() {
            let _ = fs::remove_file(&tmp);
            return Err(ConfigError::Write { path: tmp, source });
        }

        fs::rename(&tmp, path).map_err(|source| {
            let _ = fs::remove_file(&tmp);
            ConfigError::Write {
                path: path.to_path_buf(),
                source,
            }
        })
    }

    /// Serialize as JSON indented by four spaces, with a trailing newline.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Serialize`] if serialization fails.
    pub fn to_json(&self) -> Result<Vec<u8>, ConfigError> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut ser).map_err(ConfigError::Serialize)?;
        buf.push(b'\n');
        Ok(buf)
    }

    /// Append `dotfile` to `app`'s list, creating the app if needed.
    pub fn add(&mut self, app: &str, dotfile: &str) {
        self.apps
            .entry(app.to_string())
            .or_default()
            .push(dotfile.to_string());
    }

    /// The dotfiles tracked for `app`, or `None` if the app is unknown.
    #[must_use]
    pub fn dotfiles(&self, app: &str) -> Option<&[String]> {
        self.apps.get(app).map(Vec::as_slice)
    }
}

/// `config.json` -> `config.json.tmp`, in the same directory.
fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map_or_else(|| OsString::from("config"), OsString::from);
    name.push(".tmp");
    path.with_file_name(name)
}
