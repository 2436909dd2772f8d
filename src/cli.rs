use std::path::{Component, Path, PathBuf};

use clap::{Parser, Subcommand};

/// Top-level CLI entry point for the dotfile backup tool.
#[derive(Parser, Debug)]
#[command(
    name = "dotbackup",
    about = "Back up and restore dotfiles per application",
    version
)]
pub struct Cli {
    /// Subcommand to run; help is printed when omitted.
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Locations of the config file and backup tree.
    #[command(flatten)]
    pub global: GlobalOpts,
}

/// Options shared across all subcommands.
#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOpts {
    /// Directory holding config.json and backups/ (default: current directory)
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// Override the config file location
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the backup directory location
    #[arg(long, global = true)]
    pub backup_dir: Option<PathBuf>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Backup dotfiles for an app
    Backup(AppOpts),
    /// Restore dotfiles for an app
    Restore(AppOpts),
    /// List all backups
    List,
    /// Add a dotfile to the config
    Add(AddOpts),
    /// Remove backups for an app
    Remove(AppOpts),
    /// Print version information
    Version,
}

impl Command {
    /// Short name used for the log file.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Backup(_) => "backup",
            Self::Restore(_) => "restore",
            Self::List => "list",
            Self::Add(_) => "add",
            Self::Remove(_) => "remove",
            Self::Version => "version",
        }
    }
}

/// Options for subcommands that act on one app.
#[derive(Parser, Debug, Clone)]
pub struct AppOpts {
    /// Name of the app
    #[arg(value_parser = parse_app_name)]
    pub app_name: String,
}

/// Options for the `add` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct AddOpts {
    /// Name of the app
    #[arg(value_parser = parse_app_name)]
    pub app_name: String,

    /// Path to the dotfile
    pub dotfile: String,
}

/// Accept app names that are a single plain path component, so that
/// `backups/<app>` always stays inside the backup directory.
fn parse_app_name(s: &str) -> Result<String, String> {
    let mut components = Path::new(s).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(name)), None) if name == s => Ok(s.to_string()),
        _ => Err(format!(
            "'{s}' is not a valid app name (must be a single path component)"
        )),
    }
}
