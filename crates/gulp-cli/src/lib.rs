//! Command-line adapter for gulp.
//!
//! `main.rs` is the composition root; everything it wires together lives in
//! [`bootstrap`]. Handlers receive a [`CliContext`] and never build
//! infrastructure themselves.

pub mod bootstrap;
pub mod commands;
pub mod error;
pub mod handlers;
pub mod parser;
pub mod presentation;

// Re-export primary types for convenient access
pub use bootstrap::{CliConfig, CliContext, bootstrap};
pub use commands::{Commands, ConfigCommand, HistoryCommand};
pub use error::CliError;
pub use parser::Cli;
