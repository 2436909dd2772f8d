//! Domain-specific error types for the backup store.
//!
//! Store operations return typed errors ([`ConfigError`], [`StoreError`])
//! while command handlers at the CLI boundary convert them to
//! [`anyhow::Error`] via the standard `?` operator.
//!
//! # Error hierarchy
//!
//! ```text
//! StoreError
//! ├── Config(ConfigError)   reading, parsing or writing config.json
//! ├── AppNotFound           app name unknown to the config (non-fatal)
//! ├── HomeNotSet            `~` cannot be expanded (fails one item only)
//! └── Io                    backup root could not be read or removed
//! ```
//!
//! Failures of a single dotfile during backup or restore are not errors at
//! this level; they are recorded in the operation's
//! [`Report`](crate::store::Report).

use std::path::PathBuf;

use thiserror::Error;

/// Errors that arise while loading or persisting `config.json`.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config file exists but could not be read.
    #[error("IO error reading config file {path}: {source}")]
    Read {
        /// Path of the config file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The config file is not a JSON object of app name to path list.
    #[error("Invalid config file {path}: {source}")]
    Parse {
        /// Path of the config file.
        path: PathBuf,
        /// Underlying JSON error.
        source: serde_json::Error,
    },

    /// The config file (or its temporary sibling) could not be written.
    #[error("IO error writing config file {path}: {source}")]
    Write {
        /// Path that could not be written.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The in-memory config could not be serialized.
    #[error("Failed to serialize config: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Top-level error type for store operations.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Config loading or saving failed.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The app has no entry in the config.
    #[error("App '{0}' not found in config.")]
    AppNotFound(String),

    /// The home directory could not be determined.
    #[error("home directory could not be determined")]
    HomeNotSet,

    /// An I/O error on the backup tree outside per-item copies.
    #[error("IO error on {path}: {source}")]
    Io {
        /// Path the operation failed on.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn app_not_found_display() {
        let e = StoreError::AppNotFound("ghost".to_string());
        assert_eq!(e.to_string(), "App 'ghost' not found in config.");
    }

    #[test]
    fn config_parse_display_names_file() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let e = ConfigError::Parse {
            path: PathBuf::from("/data/config.json"),
            source,
        };
        assert!(e.to_string().contains("/data/config.json"));
        assert!(e.to_string().starts_with("Invalid config file"));
    }

    #[test]
    fn config_read_has_source() {
        use std::error::Error as StdError;
        let e = ConfigError::Read {
            path: PathBuf::from("config.json"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"),
        };
        assert!(e.source().is_some());
    }

    #[test]
    fn store_error_from_config_error_is_transparent() {
        let inner = ConfigError::Write {
            path: PathBuf::from("config.json.tmp"),
            source: io::Error::other("disk full"),
        };
        let msg = inner.to_string();
        let e: StoreError = inner.into();
        assert_eq!(e.to_string(), msg);
    }

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn all_error_types_are_send_sync() {
        assert_send_sync::<ConfigError>();
        assert_send_sync::<StoreError>();
    }

    #[test]
    fn store_error_converts_to_anyhow() {
        let e = StoreError::HomeNotSet;
        let _anyhow_err: anyhow::Error = e.into();
    }
}
