//! Periodic sampling scheduler
//!
//! Runs on a dedicated thread, isolated from the foreground I/O servicing:
//! read the sensor, fan the reading out to the registry, sleep for the fixed
//! interval, repeat until shutdown. The interval is measured from the end of
//! one cycle to the start of the sleep, so slow reads or notifies drift the
//! effective period; there is no catch-up logic and no backoff on repeated
//! sensor failure. A failed or invalid read skips notification for that tick
//! and retries after the same delay.

use crate::core::sensor::SensorPort;
use crate::error::Result;
use crate::observers::ObserverRegistry;
use log::{error, info, warn};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Sleep source for the sampling loop
///
/// Seam for driving the loop with simulated time in tests; production code
/// uses [`SystemClock`].
pub trait Clock: Send {
    /// Block the sampling thread for `duration`
    fn sleep(&mut self, duration: Duration);
}

/// Wall-clock [`Clock`] backed by `thread::sleep`
pub struct SystemClock;

impl Clock for SystemClock {
    fn sleep(&mut self, duration: Duration) {
        thread::sleep(duration);
    }
}

/// Periodic read-and-notify scheduler
///
/// Takes ownership of the sensor and the registry; after setup no other
/// thread can reach either.
pub struct Sampler {
    sensor: Box<dyn SensorPort>,
    registry: ObserverRegistry,
    interval: Duration,
    clock: Box<dyn Clock>,
}

impl Sampler {
    /// Build a sampler with the wall clock
    pub fn new(
        sensor: Box<dyn SensorPort>,
        registry: ObserverRegistry,
        interval: Duration,
    ) -> Self {
        Self {
            sensor,
            registry,
            interval,
            clock: Box::new(SystemClock),
        }
    }

    /// Spawn the sampling thread
    ///
    /// The loop runs until `running` clears. The thread is named so it shows
    /// up in diagnostics.
    pub fn spawn(self, running: Arc<AtomicBool>) -> Result<JoinHandle<()>> {
        let handle = thread::Builder::new()
            .name("sampler".to_string())
            .spawn(move || {
                let mut sampler = self;
                sampler.run(&running);
            })?;
        Ok(handle)
    }

    /// Sampling loop: tick, then sleep the fixed interval
    fn run(&mut self, running: &AtomicBool) {
        info!(
            "Sampler running every {:?} with {} consumer(s)",
            self.interval,
            self.registry.len()
        );
        if self.registry.is_empty() {
            error!("Sampler started with no registered consumers");
        }

        while running.load(Ordering::Relaxed) {
            self.tick();
            self.clock.sleep(self.interval);
        }
        info!("Sampler stopped");
    }

    /// One sample cycle. Returns whether consumers were notified.
    fn tick(&mut self) -> bool {
        match self.sensor.read() {
            Ok(reading) => {
                self.registry.notify_all(&reading);
                true
            }
            Err(e) => {
                warn!("Sensor read failed, skipping this cycle: {}", e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::reading::Reading;
    use crate::error::Error;
    use crate::observers::ReadingObserver;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Clock that advances simulated time and stops the loop after a budget
    /// of sleeps
    struct FakeClock {
        slept: Arc<Mutex<Vec<Duration>>>,
        remaining: u32,
        running: Arc<AtomicBool>,
    }

    impl Clock for FakeClock {
        fn sleep(&mut self, duration: Duration) {
            self.slept.lock().unwrap().push(duration);
            self.remaining -= 1;
            if self.remaining == 0 {
                self.running.store(false, Ordering::Relaxed);
            }
        }
    }

    /// Sensor that replays a script of results
    struct ScriptedSensor {
        script: VecDeque<Result<Reading>>,
    }

    impl SensorPort for ScriptedSensor {
        fn read(&mut self) -> Result<Reading> {
            self.script
                .pop_front()
                .unwrap_or_else(|| Err(Error::Timeout))
        }
    }

    struct CountingObserver {
        seen: Arc<Mutex<Vec<Reading>>>,
    }

    impl ReadingObserver for CountingObserver {
        fn on_reading(&mut self, reading: &Reading) {
            self.seen.lock().unwrap().push(*reading);
        }
    }

    fn sampler_with_script(
        script: Vec<Result<Reading>>,
        cycles: u32,
        interval: Duration,
        running: &Arc<AtomicBool>,
        seen: &Arc<Mutex<Vec<Reading>>>,
        slept: &Arc<Mutex<Vec<Duration>>>,
    ) -> Sampler {
        let mut registry = ObserverRegistry::new();
        registry
            .register(Box::new(CountingObserver {
                seen: Arc::clone(seen),
            }))
            .unwrap();

        Sampler {
            sensor: Box::new(ScriptedSensor {
                script: script.into(),
            }),
            registry,
            interval,
            clock: Box::new(FakeClock {
                slept: Arc::clone(slept),
                remaining: cycles,
                running: Arc::clone(running),
            }),
        }
    }

    #[test]
    fn test_three_intervals_three_cycles() {
        let interval = Duration::from_secs(5);
        let running = Arc::new(AtomicBool::new(true));
        let seen = Arc::new(Mutex::new(Vec::new()));
        let slept = Arc::new(Mutex::new(Vec::new()));

        let reading = Reading::try_new(21.0, 45.0).unwrap();
        let mut sampler = sampler_with_script(
            vec![Ok(reading), Ok(reading), Ok(reading)],
            3,
            interval,
            &running,
            &seen,
            &slept,
        );
        sampler.run(&running);

        // Exactly 3 read+notify cycles, one full interval of simulated time
        // between consecutive cycles
        assert_eq!(seen.lock().unwrap().as_slice(), &[reading; 3]);
        assert_eq!(slept.lock().unwrap().as_slice(), &[interval; 3]);
    }

    #[test]
    fn test_failed_read_skips_notification() {
        let running = Arc::new(AtomicBool::new(true));
        let seen = Arc::new(Mutex::new(Vec::new()));
        let slept = Arc::new(Mutex::new(Vec::new()));

        let first = Reading::try_new(21.0, 45.0).unwrap();
        let third = Reading::try_new(22.0, 46.0).unwrap();
        let mut sampler = sampler_with_script(
            vec![Ok(first), Err(Error::Timeout), Ok(third)],
            3,
            Duration::from_secs(5),
            &running,
            &seen,
            &slept,
        );
        sampler.run(&running);

        // Cycle 2 failed: notify happened exactly twice, and never with a
        // placeholder reading in between
        assert_eq!(seen.lock().unwrap().as_slice(), &[first, third]);
        // The failed cycle still waited the full interval before retrying
        assert_eq!(slept.lock().unwrap().len(), 3);
    }

    #[test]
    fn test_tick_reports_notification() {
        let running = Arc::new(AtomicBool::new(true));
        let seen = Arc::new(Mutex::new(Vec::new()));
        let slept = Arc::new(Mutex::new(Vec::new()));

        let reading = Reading::try_new(19.5, 50.0).unwrap();
        let mut sampler = sampler_with_script(
            vec![Err(Error::Timeout), Ok(reading)],
            2,
            Duration::from_secs(1),
            &running,
            &seen,
            &slept,
        );

        assert!(!sampler.tick());
        assert!(sampler.tick());
        assert_eq!(seen.lock().unwrap().len(), 1);
    }
}
