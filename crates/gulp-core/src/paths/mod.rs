//! Path utilities for gulp data directories and user-supplied locations.
//!
//! This module provides the canonical path resolution for all gulp components:
//! - Run history and settings files
//! - The gallery-dl config file handed to each run
//! - Default download destination
//!
//! # Design
//!
//! - Returns `PathBuf` and `PathError` for clear error handling
//! - No interactive/terminal I/O - adapters handle user prompts separately
//! - OS-specific logic is kept private in `platform`

mod ensure;
mod error;
mod files;
mod platform;

pub use ensure::ensure_directory;
pub use error::PathError;
pub use files::{
    HISTORY_FILE_NAME, SETTINGS_FILE_NAME, TOOL_CONFIG_FILE_NAME, default_output_dir,
    history_path, settings_path, tool_config_path,
};
pub use platform::{DATA_DIR_ENV, data_root, normalize_user_path};
