//! CLI bootstrap - the composition root.
//!
//! This module is the ONLY place where infrastructure is wired together
//! for the CLI adapter:
//! - Run history and settings stores (via gulp-store)
//! - gallery-dl config and process launcher (via gulp-runner)
//!
//! Command handlers receive the composed [`CliContext`].

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use tracing::debug;

use gulp_core::data_root;
use gulp_core::paths::{HISTORY_FILE_NAME, SETTINGS_FILE_NAME, TOOL_CONFIG_FILE_NAME};
use gulp_runner::{DefaultToolConfig, DownloadOrchestrator, TokioProcessLauncher, default_candidates};
use gulp_store::{JsonRunStore, SettingsStore};

/// Bootstrap configuration for the CLI.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Directory holding history, settings and the gallery-dl config.
    pub data_dir: PathBuf,
    /// Ordered gallery-dl locations to probe.
    pub candidates: Vec<PathBuf>,
}

impl CliConfig {
    /// Create config with default paths.
    pub fn with_defaults() -> Result<Self> {
        Ok(Self::with_data_dir(data_root()?))
    }

    /// Create config rooted at an explicit data directory.
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            candidates: default_candidates(),
        }
    }

    pub fn history_path(&self) -> PathBuf {
        self.data_dir.join(HISTORY_FILE_NAME)
    }

    pub fn settings_path(&self) -> PathBuf {
        self.data_dir.join(SETTINGS_FILE_NAME)
    }

    pub fn tool_config_path(&self) -> PathBuf {
        self.data_dir.join(TOOL_CONFIG_FILE_NAME)
    }
}

/// Fully composed application context for CLI commands.
pub struct CliContext {
    /// Configuration the context was built from.
    pub config: CliConfig,
    /// Persistent run history.
    pub history: Arc<JsonRunStore>,
    /// Persistent user preferences.
    pub settings: SettingsStore,
    /// gallery-dl config file, created on first download.
    pub tool_config: Arc<DefaultToolConfig>,
}

impl CliContext {
    /// Access the data directory.
    pub fn data_dir(&self) -> &Path {
        &self.config.data_dir
    }

    /// Build an orchestrator over this context's stores.
    ///
    /// Callers attach their own notifier and emitter.
    pub fn orchestrator(&self) -> DownloadOrchestrator {
        DownloadOrchestrator::new(
            Arc::new(TokioProcessLauncher::new()),
            self.history.clone(),
            self.tool_config.clone(),
        )
        .with_candidates(self.config.candidates.clone())
    }
}

/// Bootstrap the CLI application.
///
/// Loads the run history eagerly; nothing is written until a command
/// changes something.
pub fn bootstrap(config: CliConfig) -> CliContext {
    debug!(data_dir = %config.data_dir.display(), "Bootstrapping CLI context");
    let history = Arc::new(JsonRunStore::open(config.history_path()));
    let settings = SettingsStore::new(config.settings_path());
    let tool_config = Arc::new(DefaultToolConfig::new(config.tool_config_path()));
    CliContext {
        config,
        history,
        settings,
        tool_config,
    }
}
