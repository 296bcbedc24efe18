//! Reading consumers and the bounded fan-out registry

pub mod broadcast;
pub mod log;

pub use self::broadcast::BroadcastSink;
pub use self::log::LogSink;

use crate::core::reading::Reading;
use crate::error::{Error, Result};

/// Fixed upper bound on registered consumers
pub const OBSERVER_CAPACITY: usize = 10;

/// A consumer of readings
///
/// Implementations are best-effort: `on_reading` has no way to fail the
/// pipeline and must not block indefinitely.
pub trait ReadingObserver: Send {
    /// Handle one reading. Called synchronously on the sampler thread.
    fn on_reading(&mut self, reading: &Reading);
}

/// Bounded, ordered set of reading consumers
///
/// Registration is append-only for the process lifetime; there is no removal.
/// The same consumer type may be registered twice and will then be notified
/// twice. Notification runs each consumer in registration order on the
/// caller's thread; there is no per-consumer fault isolation, so a consumer
/// that panics or blocks delays or aborts delivery to the consumers after it.
pub struct ObserverRegistry {
    observers: Vec<Box<dyn ReadingObserver>>,
    capacity: usize,
}

impl ObserverRegistry {
    /// Registry with the default capacity ([`OBSERVER_CAPACITY`])
    pub fn new() -> Self {
        Self::with_capacity(OBSERVER_CAPACITY)
    }

    /// Registry with an explicit capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            observers: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a consumer, preserving notification order
    ///
    /// Fails with [`Error::RegistryFull`] once the fixed capacity is reached;
    /// existing registrations are never overwritten.
    pub fn register(&mut self, observer: Box<dyn ReadingObserver>) -> Result<()> {
        if self.observers.len() >= self.capacity {
            return Err(Error::RegistryFull {
                capacity: self.capacity,
            });
        }
        self.observers.push(observer);
        Ok(())
    }

    /// Deliver one reading to every registered consumer, in registration order
    pub fn notify_all(&mut self, reading: &Reading) {
        for observer in &mut self.observers {
            observer.on_reading(reading);
        }
    }

    /// Number of registered consumers
    pub fn len(&self) -> usize {
        self.observers.len()
    }

    /// True when no consumer is registered
    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}

impl Default for ObserverRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Records which observer saw which value, in global call order
    struct Recorder {
        name: &'static str,
        calls: Arc<Mutex<Vec<(&'static str, Reading)>>>,
    }

    impl ReadingObserver for Recorder {
        fn on_reading(&mut self, reading: &Reading) {
            self.calls.lock().unwrap().push((self.name, *reading));
        }
    }

    #[test]
    fn test_notify_all_in_registration_order() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let mut registry = ObserverRegistry::new();
        for name in ["a", "b", "c"] {
            registry
                .register(Box::new(Recorder {
                    name,
                    calls: Arc::clone(&calls),
                }))
                .unwrap();
        }

        let reading = Reading::try_new(21.5, 48.0).unwrap();
        registry.notify_all(&reading);

        let calls = calls.lock().unwrap();
        assert_eq!(
            *calls,
            vec![("a", reading), ("b", reading), ("c", reading)]
        );
    }

    #[test]
    fn test_register_beyond_capacity_fails() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let mut registry = ObserverRegistry::with_capacity(2);

        for name in ["a", "b"] {
            registry
                .register(Box::new(Recorder {
                    name,
                    calls: Arc::clone(&calls),
                }))
                .unwrap();
        }
        let err = registry.register(Box::new(Recorder {
            name: "c",
            calls: Arc::clone(&calls),
        }));
        assert!(matches!(err, Err(Error::RegistryFull { capacity: 2 })));
        assert_eq!(registry.len(), 2);

        // Existing slots are intact: a full notify pass still reaches a and b
        let reading = Reading::try_new(20.0, 40.0).unwrap();
        registry.notify_all(&reading);
        let names: Vec<_> = calls.lock().unwrap().iter().map(|(n, _)| *n).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_duplicate_registration_notifies_twice() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let mut registry = ObserverRegistry::new();
        for _ in 0..2 {
            registry
                .register(Box::new(Recorder {
                    name: "dup",
                    calls: Arc::clone(&calls),
                }))
                .unwrap();
        }

        registry.notify_all(&Reading::try_new(19.0, 51.0).unwrap());
        assert_eq!(calls.lock().unwrap().len(), 2);
    }

    #[test]
    fn test_notify_with_no_observers_is_noop() {
        let mut registry = ObserverRegistry::new();
        assert!(registry.is_empty());
        registry.notify_all(&Reading::try_new(22.0, 50.0).unwrap());
    }
}
