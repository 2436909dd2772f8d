//! Log file location, ANSI stripping, and timestamps for the file layer.
use std::path::PathBuf;

use crate::store::resolve_home;

/// Timestamp format of the run header in the log file.
pub(super) const HEADER_TIME: &str = "%Y-%m-%d %H:%M:%S";

/// Timestamp format prefixed to each log line.
pub(super) const LINE_TIME: &str = "%H:%M:%S";

/// Remove terminal escape sequences from `s`.
///
/// A CSI sequence (`ESC [` ... final byte in `@`..=`~`) is dropped whole;
/// any other escape drops itself and the character after it.
pub(super) fn strip_ansi(s: &str) -> String {
    let mut parts = s.split('\x1b');
    let mut out = parts.next().unwrap_or_default().to_string();
    for part in parts {
        let rest = part.strip_prefix('[').map_or_else(
            || {
                let skip = part.chars().next().map_or(0, char::len_utf8);
                part.get(skip..).unwrap_or_default()
            },
            |csi| {
                csi.find(|c| ('@'..='~').contains(&c))
                    .and_then(|end| csi.get(end + 1..))
                    .unwrap_or_default()
            },
        );
        out.push_str(rest);
    }
    out
}

/// Return the log file path for `command`:
/// `$XDG_CACHE_HOME/dotbackup/<command>.log`, falling back to
/// `<home>/.cache/dotbackup/` and, without a home, `./.cache/dotbackup/`.
pub(super) fn log_file_path(command: &str) -> PathBuf {
    let cache = std::env::var_os("XDG_CACHE_HOME")
        .filter(|v| !v.is_empty())
        .map_or_else(
            || {
                resolve_home()
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join(".cache")
            },
            PathBuf::from,
        );
    cache.join("dotbackup").join(format!("{command}.log"))
}

/// Current UTC time rendered with a `chrono` format string.
pub(super) fn utc_now(format: &str) -> String {
    chrono::Utc::now().format(format).to_string()
}
