//! VayuIO - environmental sampling and broadcast library
//!
//! Periodically samples a temperature/humidity sensor and fans each reading
//! out to a fixed set of consumers: a log sink and a TCP text broadcast to
//! all connected clients.
//!
//! ## Architecture
//! ```text
//!  sampler thread                          foreground (main) thread
//!  ┌───────────────────────────┐           ┌───────────────────────────┐
//!  │ Sampler                   │           │ TcpBroadcaster            │
//!  │   SensorPort::read()      │           │   service_loop():         │
//!  │     │                     │           │     accept clients        │
//!  │     ▼                     │   lock-   │     drain line queue      │
//!  │ ObserverRegistry          │   free    │     write to each client  │
//!  │   ├─ LogSink ──► log      │   queue   │     prune dead clients    │
//!  │   └─ BroadcastSink ───────┼──────────►│                           │
//!  └───────────────────────────┘           └───────────────────────────┘
//! ```
//!
//! Consumers are notified synchronously, in registration order, on the
//! sampler thread. The only state shared between the two threads is the
//! broadcaster's bounded line queue.

pub mod config;
pub mod core;
pub mod devices;
pub mod error;
pub mod observers;
pub mod sampler;
pub mod streaming;

// Re-export commonly used types
pub use config::Config;
pub use crate::core::{Reading, SensorPort};
pub use error::{Error, Result};
pub use observers::{BroadcastSink, LogSink, ObserverRegistry, ReadingObserver};
pub use sampler::Sampler;
pub use streaming::{BroadcastHandle, TcpBroadcaster};
