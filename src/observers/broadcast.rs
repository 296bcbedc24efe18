//! Broadcast reading sink
//!
//! Serializes each reading to its text line and hands it to the transport
//! layer through a lock-free handle. The enqueue never blocks, so the
//! sampler thread is isolated from network state: zero connected clients is
//! a no-op, a full queue drops the line, and client-level send errors stay
//! inside the broadcaster's service loop.

use crate::core::reading::Reading;
use crate::observers::ReadingObserver;
use crate::streaming::BroadcastHandle;

/// Sink that broadcasts every reading to all connected TCP clients
pub struct BroadcastSink {
    handle: BroadcastHandle,
}

impl BroadcastSink {
    /// Create a sink feeding the given broadcaster
    pub fn new(handle: BroadcastHandle) -> Self {
        Self { handle }
    }
}

impl ReadingObserver for BroadcastSink {
    fn on_reading(&mut self, reading: &Reading) {
        self.handle.broadcast_text(reading.to_string());
    }
}
