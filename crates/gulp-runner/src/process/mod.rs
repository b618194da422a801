//! Tokio-backed implementation of the process launcher port.
//!
//! - `stream` - lossy line readers feeding one ordered channel
//! - `terminate` - SIGTERM delivery (plain kill off Unix)
//! - `launcher` - spawning and supervising the child

mod launcher;
mod stream;
mod terminate;

pub use launcher::TokioProcessLauncher;
