//! Simulated environmental sensor
//!
//! Produces a slow deterministic oscillation around configured baselines,
//! for hardware-free development and tests.

use crate::core::reading::Reading;
use crate::core::sensor::SensorPort;
use crate::error::Result;

/// Simulated temperature/humidity sensor
pub struct MockSensor {
    base_temperature_c: f32,
    base_humidity_pct: f32,
    tick: u32,
}

impl MockSensor {
    /// Create a simulated sensor oscillating around the given baselines
    pub fn new(base_temperature_c: f32, base_humidity_pct: f32) -> Self {
        Self {
            base_temperature_c,
            base_humidity_pct,
            tick: 0,
        }
    }
}

impl SensorPort for MockSensor {
    fn read(&mut self) -> Result<Reading> {
        self.tick = self.tick.wrapping_add(1);
        let t = self.tick as f32;

        // Slow drift with a faster ripple on top, roughly what a room sensor
        // reports across a day of samples.
        let temperature_c = self.base_temperature_c + 1.5 * (t * 0.02).sin() + 0.2 * (t * 0.3).sin();
        let humidity_pct =
            (self.base_humidity_pct + 4.0 * (t * 0.01).cos() + 0.5 * (t * 0.25).sin())
                .clamp(0.0, 100.0);

        Reading::try_new(temperature_c, humidity_pct)
    }
}
