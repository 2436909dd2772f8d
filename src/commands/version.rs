//! Command: print version information.

/// The version string: `DOTBACKUP_VERSION` from the build, else the crate
/// version.
#[must_use]
pub fn version() -> &'static str {
    option_env!("DOTBACKUP_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"))
}

/// Print the version to stdout.
#[allow(clippy::print_stdout)]
pub fn run() {
    println!("dotbackup {}", version());
}
