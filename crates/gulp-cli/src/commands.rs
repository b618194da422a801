//! Main commands enum and subcommands.

use clap::Subcommand;

/// Available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Download a gallery URL with gallery-dl
    Download {
        /// Gallery or post URL understood by gallery-dl
        url: String,
        /// Destination directory (defaults to the configured output directory)
        #[arg(short, long)]
        output: Option<String>,
        /// Re-download files already recorded in the download archive
        #[arg(long)]
        no_skip_existing: bool,
        /// Write a metadata file next to each download
        #[arg(long)]
        write_metadata: bool,
        /// Do not print a completion notice
        #[arg(long)]
        no_notify: bool,
        /// Only show the progress bar, not gallery-dl's output
        #[arg(short, long)]
        quiet: bool,
    },

    /// Inspect or prune the run history
    History {
        #[command(subcommand)]
        command: HistoryCommand,
    },

    /// View or change download preferences
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },

    /// Show resolved paths and the gallery-dl binary in use
    Paths,
}

/// Run history command variants.
#[derive(Subcommand)]
pub enum HistoryCommand {
    /// List recorded runs, newest first
    List {
        /// Group runs under Today / Yesterday / This Week / Older
        #[arg(long)]
        grouped: bool,
        /// Show at most this many runs
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Show one run with its full log
    Show {
        /// Run id or a unique prefix of it
        id: String,
    },
    /// Delete one run from the history
    Delete {
        /// Run id or a unique prefix of it
        id: String,
    },
    /// Delete every run from the history
    Clear {
        /// Skip the confirmation notice
        #[arg(short, long)]
        force: bool,
    },
}

/// Settings command variants.
#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current preferences
    Show,
    /// Update preferences
    Set {
        /// Default destination directory for downloads
        #[arg(long)]
        output_dir: Option<String>,
        /// Skip files already in the download archive
        #[arg(long)]
        skip_existing: Option<bool>,
        /// Write metadata files next to downloads
        #[arg(long)]
        save_metadata: Option<bool>,
        /// Print a notice when a download completes
        #[arg(long)]
        notifications: Option<bool>,
    },
    /// Reset all preferences to defaults
    Reset,
}
