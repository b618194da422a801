//! JSON file repositories for gulp.
//!
//! - [`JsonRunStore`] keeps the run history in `history.json`
//! - [`SettingsStore`] keeps user preferences in `settings.json`
//!
//! Both write atomically (temp file + rename) and load fail-soft: an
//! unreadable file is logged and treated as empty.

mod atomic;
mod error;
mod run_store;
mod schema;
mod settings_store;

pub use error::StoreError;
pub use run_store::{JsonRunStore, MAX_RETAINED_RUNS, load_runs, save_runs};
pub use schema::HISTORY_FORMAT_VERSION;
pub use settings_store::SettingsStore;
