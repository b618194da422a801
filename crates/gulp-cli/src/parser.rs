//! Main CLI parser and top-level argument handling.

use std::path::PathBuf;

use clap::Parser;

use crate::commands::Commands;

/// Download galleries with gallery-dl and keep a history of every run.
#[derive(Parser)]
#[command(name = "gulp")]
#[command(about = "Supervised gallery-dl downloads with run history")]
#[command(version)]
pub struct Cli {
    /// Directory holding history, settings and the gallery-dl config
    #[arg(long = "data-dir", global = true, env = "GULP_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}
