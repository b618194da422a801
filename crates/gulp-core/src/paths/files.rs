//! Locations of the files gulp keeps in its data root.

use std::path::PathBuf;

use super::error::PathError;
use super::platform::data_root;

/// Run history file name inside the data root.
pub const HISTORY_FILE_NAME: &str = "history.json";

/// Settings file name inside the data root.
pub const SETTINGS_FILE_NAME: &str = "settings.json";

/// gallery-dl config file name inside the data root.
pub const TOOL_CONFIG_FILE_NAME: &str = "config.json";

/// Path to the run history file.
pub fn history_path() -> Result<PathBuf, PathError> {
    Ok(data_root()?.join(HISTORY_FILE_NAME))
}

/// Path to the persisted settings.
pub fn settings_path() -> Result<PathBuf, PathError> {
    Ok(data_root()?.join(SETTINGS_FILE_NAME))
}

/// Path to the gallery-dl config file handed to every run.
pub fn tool_config_path() -> Result<PathBuf, PathError> {
    Ok(data_root()?.join(TOOL_CONFIG_FILE_NAME))
}

/// Default destination for downloads: the user's download directory.
///
/// Falls back to `~/Downloads` when the platform has no download directory.
pub fn default_output_dir() -> Result<PathBuf, PathError> {
    if let Some(dir) = dirs::download_dir() {
        return Ok(dir);
    }
    let home = dirs::home_dir().ok_or(PathError::NoHomeDir)?;
    Ok(home.join("Downloads"))
}
