//! Settings domain types and validation.
//!
//! This module contains the user preferences that shape each run. These are
//! pure domain types with no infrastructure dependencies.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::download::DownloadOptions;
use crate::paths::{PathError, default_output_dir};

/// Application settings structure.
///
/// All fields are optional to support partial updates and graceful defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Destination for downloads when none is given on the command line.
    pub output_directory: Option<PathBuf>,

    /// Skip files already recorded in the destination's download archive.
    pub skip_existing: Option<bool>,

    /// Write metadata sidecar files next to each download.
    pub save_metadata: Option<bool>,

    /// Notify when a run completes successfully.
    pub show_notifications: Option<bool>,
}

impl Settings {
    /// Create settings with sensible defaults.
    #[must_use]
    pub const fn with_defaults() -> Self {
        Self {
            output_directory: None,
            skip_existing: Some(true),
            save_metadata: Some(false),
            show_notifications: Some(true),
        }
    }

    /// Resolve the per-run options, filling gaps with defaults.
    #[must_use]
    pub fn download_options(&self) -> DownloadOptions {
        let defaults = DownloadOptions::default();
        DownloadOptions {
            skip_existing: self.skip_existing.unwrap_or(defaults.skip_existing),
            save_metadata: self.save_metadata.unwrap_or(defaults.save_metadata),
            notify_on_completion: self
                .show_notifications
                .unwrap_or(defaults.notify_on_completion),
        }
    }

    /// The configured output directory, or the platform download directory.
    pub fn effective_output_directory(&self) -> Result<PathBuf, PathError> {
        match &self.output_directory {
            Some(dir) => Ok(dir.clone()),
            None => default_output_dir(),
        }
    }

    /// Merge an update into these settings.
    ///
    /// Only fields present in the update are changed.
    pub fn merge(&mut self, update: &SettingsUpdate) {
        if let Some(ref dir) = update.output_directory {
            self.output_directory.clone_from(dir);
        }
        if let Some(value) = update.skip_existing {
            self.skip_existing = value;
        }
        if let Some(value) = update.save_metadata {
            self.save_metadata = value;
        }
        if let Some(value) = update.show_notifications {
            self.show_notifications = value;
        }
    }
}

/// Partial update for settings.
///
/// Each field uses `Option<Option<T>>`:
/// - `None` = don't change this field
/// - `Some(None)` = reset to default
/// - `Some(Some(value))` = set to value
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SettingsUpdate {
    pub output_directory: Option<Option<PathBuf>>,
    pub skip_existing: Option<Option<bool>>,
    pub save_metadata: Option<Option<bool>>,
    pub show_notifications: Option<Option<bool>>,
}

/// Settings validation errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("Output directory must be an absolute path: {0}")]
    RelativeOutputDirectory(PathBuf),

    #[error("Output directory cannot be empty")]
    EmptyOutputDirectory,
}

/// Validate settings values.
pub fn validate_settings(settings: &Settings) -> Result<(), SettingsError> {
    if let Some(ref dir) = settings.output_directory {
        if dir.as_os_str().is_empty() {
            return Err(SettingsError::EmptyOutputDirectory);
        }
        if !dir.is_absolute() {
            return Err(SettingsError::RelativeOutputDirectory(dir.clone()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = Settings::default().download_options();
        assert_eq!(options, DownloadOptions::default());
        assert!(options.skip_existing);
        assert!(!options.save_metadata);
        assert!(options.notify_on_completion);
    }

    #[test]
    fn test_options_follow_settings() {
        let settings = Settings {
            skip_existing: Some(false),
            save_metadata: Some(true),
            show_notifications: Some(false),
            ..Settings::default()
        };
        let options = settings.download_options();
        assert!(!options.skip_existing);
        assert!(options.save_metadata);
        assert!(!options.notify_on_completion);
    }

    #[test]
    fn test_merge_partial_update() {
        let mut settings = Settings::with_defaults();
        settings.merge(&SettingsUpdate {
            save_metadata: Some(Some(true)),
            output_directory: Some(Some(PathBuf::from("/data/pics"))),
            ..SettingsUpdate::default()
        });
        assert_eq!(settings.save_metadata, Some(true));
        assert_eq!(settings.skip_existing, Some(true));
        assert_eq!(settings.output_directory, Some(PathBuf::from("/data/pics")));
    }

    #[test]
    fn test_merge_reset_to_default() {
        let mut settings = Settings::with_defaults();
        settings.merge(&SettingsUpdate {
            skip_existing: Some(None),
            ..SettingsUpdate::default()
        });
        assert_eq!(settings.skip_existing, None);
        assert!(settings.download_options().skip_existing);
    }

    #[test]
    fn test_validate_rejects_relative_directory() {
        let settings = Settings {
            output_directory: Some(PathBuf::from("relative/dir")),
            ..Settings::default()
        };
        assert!(matches!(
            validate_settings(&settings),
            Err(SettingsError::RelativeOutputDirectory(_))
        ));
    }

    #[test]
    fn test_settings_deserialize_partial() {
        let settings: Settings = serde_json::from_str(r#"{"save_metadata": true}"#).unwrap();
        assert_eq!(settings.save_metadata, Some(true));
        assert_eq!(settings.skip_existing, None);
    }
}
