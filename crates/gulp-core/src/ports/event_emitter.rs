//! Run event emitter port.
//!
//! This port abstracts run event emission, allowing the orchestrator to
//! publish log lines and lifecycle changes without coupling to a transport.

use crate::download::RunEvent;

/// Port for emitting run events.
///
/// Implementations handle the actual event delivery (channels, terminal
/// output). This method should not block.
pub trait RunEventEmitterPort: Send + Sync {
    fn emit(&self, event: RunEvent);
}

/// A no-op event emitter for tests and headless contexts.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopRunEmitter;

impl RunEventEmitterPort for NoopRunEmitter {
    fn emit(&self, _event: RunEvent) {
        // Intentionally do nothing
    }
}
