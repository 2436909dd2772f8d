//! File-system helpers for copying dotfiles in and out of the backup tree.
use anyhow::{Context as _, Result};
use std::fs::{self, File, FileTimes};
use std::io;
use std::path::Path;

/// Ensure the parent directory of `path` exists, creating it (and any
/// ancestors) if necessary.
///
/// # Errors
///
/// Returns an error if the directory cannot be created.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("create parent: {}", parent.display()))?;
    }
    Ok(())
}

/// Copy a regular file, overwriting `dst`, and carry over its permissions
/// and access/modification times.
///
/// # Errors
///
/// Returns an error if the content cannot be copied or the times cannot be
/// applied to `dst`.
pub fn copy_file_preserving(src: &Path, dst: &Path) -> Result<()> {
    fs::copy(src, dst)
        .with_context(|| format!("copying {} to {}", src.display(), dst.display()))?;
    let meta = fs::metadata(src).with_context(|| format!("reading metadata {}", src.display()))?;
    copy_times(&meta, dst).with_context(|| format!("setting times on {}", dst.display()))?;
    Ok(())
}

fn copy_times(meta: &fs::Metadata, dst: &Path) -> io::Result<()> {
    let times = FileTimes::new()
        .set_accessed(meta.accessed()?)
        .set_modified(meta.modified()?);
    // Windows needs a writable handle to change times.
    let file = if cfg!(windows) {
        File::options().write(true).open(dst)?
    } else {
        File::open(dst)?
    };
    file.set_times(times)
}

/// Recursively copy a directory tree into `dst`, merging with whatever is
/// already there.
///
/// Files at matching relative paths are overwritten; files that exist only
/// under `dst` are left alone. Symlinks within the source tree are
/// followed, so their content is copied rather than the link itself.
///
/// An entry that cannot be copied does not stop its siblings: every entry
/// is attempted and the failures are returned together at the end.
///
/// # Errors
///
/// Returns an error if `dst` cannot be created or `src` cannot be listed,
/// or, after the walk, if any entry failed.  The returned error wraps the
/// first failure, so its I/O cause stays reachable through the chain.
pub fn copy_dir_merge(src: &Path, dst: &Path) -> Result<()> {
    let mut failures = Vec::new();
    copy_dir_entries(src, dst, &mut failures)?;
    let total = failures.len();
    let mut failures = failures.into_iter();
    match failures.next() {
        None => Ok(()),
        Some(first) if total == 1 => Err(first),
        Some(first) => {
            let rest: Vec<String> = failures.map(|e| format!("{e:#}")).collect();
            Err(first.context(format!(
                "{total} entries under {} could not be copied (also: {})",
                src.display(),
                rest.join("; ")
            )))
        }
    }
}

/// Copy the entries of `src` into `dst`, pushing per-entry failures onto
/// `failures`.  Only failing to create `dst` or list `src` returns early.
fn copy_dir_entries(src: &Path, dst: &Path, failures: &mut Vec<anyhow::Error>) -> Result<()> {
    fs::create_dir_all(dst).with_context(|| format!("creating directory {}", dst.display()))?;
    for entry in fs::read_dir(src).with_context(|| format!("reading directory {}", src.display()))?
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                failures.push(
                    anyhow::Error::new(err)
                        .context(format!("reading entry in {}", src.display())),
                );
                continue;
            }
        };
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());
        let result = if src_path.is_dir() {
            copy_dir_entries(&src_path, &dst_path, failures)
        } else {
            copy_file_preserving(&src_path, &dst_path)
        };
        if let Err(err) = result {
            failures.push(err);
        }
    }
    Ok(())
}

/// Return the kind of the first [`io::Error`] in `err`'s cause chain.
#[must_use]
pub fn io_error_kind(err: &anyhow::Error) -> Option<io::ErrorKind> {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<io::Error>())
        .map(io::Error::kind)
}
