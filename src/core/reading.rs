//! One environmental sample: a temperature/humidity pair
//!
//! Readings are validated at construction. NaN values and values outside the
//! sensor's physical range never enter the notification pipeline; a failed
//! hardware transaction surfaces as an error at the [`SensorPort`] boundary
//! instead of a garbage sample reaching consumers.
//!
//! [`SensorPort`]: crate::core::sensor::SensorPort

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// DHT22-class sensor limits: -40..=80 °C, 0..=100 % RH
const TEMPERATURE_RANGE_C: (f32, f32) = (-40.0, 80.0);
const HUMIDITY_RANGE_PCT: (f32, f32) = (0.0, 100.0);

/// One immutable temperature/humidity sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    /// Temperature in degrees Celsius
    pub temperature_c: f32,
    /// Relative humidity in percent
    pub humidity_pct: f32,
}

impl Reading {
    /// Build a validated reading from raw sensor values
    ///
    /// Rejects NaN, infinities, and values outside the sensor's physical
    /// range with [`Error::InvalidReading`].
    pub fn try_new(temperature_c: f32, humidity_pct: f32) -> Result<Self> {
        let temp_ok = temperature_c.is_finite()
            && (TEMPERATURE_RANGE_C.0..=TEMPERATURE_RANGE_C.1).contains(&temperature_c);
        let hum_ok = humidity_pct.is_finite()
            && (HUMIDITY_RANGE_PCT.0..=HUMIDITY_RANGE_PCT.1).contains(&humidity_pct);

        if temp_ok && hum_ok {
            Ok(Self {
                temperature_c,
                humidity_pct,
            })
        } else {
            Err(Error::InvalidReading {
                temperature_c,
                humidity_pct,
            })
        }
    }
}

impl fmt::Display for Reading {
    /// The one text format consumers see, on the log stream and on the wire.
    /// Two-decimal precision is a contract; clients parse nothing else.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Temperature: {:.2} °C, Humidity: {:.2} %",
            self.temperature_c, self.humidity_pct
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_reading() {
        let r = Reading::try_new(23.456, 60.1).unwrap();
        assert_eq!(r.temperature_c, 23.456);
        assert_eq!(r.humidity_pct, 60.1);
    }

    #[test]
    fn test_display_format() {
        let r = Reading::try_new(23.456, 60.1).unwrap();
        assert_eq!(r.to_string(), "Temperature: 23.46 °C, Humidity: 60.10 %");
    }

    #[test]
    fn test_nan_rejected() {
        assert!(matches!(
            Reading::try_new(f32::NAN, 50.0),
            Err(Error::InvalidReading { .. })
        ));
        assert!(matches!(
            Reading::try_new(21.0, f32::NAN),
            Err(Error::InvalidReading { .. })
        ));
    }

    #[test]
    fn test_out_of_range_rejected() {
        assert!(Reading::try_new(-41.0, 50.0).is_err());
        assert!(Reading::try_new(80.5, 50.0).is_err());
        assert!(Reading::try_new(21.0, -0.1).is_err());
        assert!(Reading::try_new(21.0, 100.1).is_err());
        assert!(Reading::try_new(f32::INFINITY, 50.0).is_err());
    }

    #[test]
    fn test_range_boundaries_accepted() {
        assert!(Reading::try_new(-40.0, 0.0).is_ok());
        assert!(Reading::try_new(80.0, 100.0).is_ok());
    }
}
