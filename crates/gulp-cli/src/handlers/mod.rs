//! Command handlers.
//!
//! Each handler takes the [`crate::CliContext`] plus its parsed arguments.

pub mod config;
pub mod download;
pub mod history;
pub mod paths;
