//! Log-based reading sink
//!
//! Writes every reading to the process log stream via the `log` facade.
//! Best-effort by construction: a logger write failure is not observable
//! at this layer and never reaches the sampling path.

use crate::core::reading::Reading;
use crate::observers::ReadingObserver;
use log::info;

/// Sink that logs every reading to the diagnostic stream
pub struct LogSink;

impl LogSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogSink {
    fn default() -> Self {
        Self::new()
    }
}

impl ReadingObserver for LogSink {
    fn on_reading(&mut self, reading: &Reading) {
        info!("{}", reading);
    }
}
