//! Sensor implementations

pub mod mock;
pub mod serial;

use crate::config::Config;
use crate::core::sensor::SensorPort;
use crate::error::{Error, Result};
use mock::MockSensor;
use serial::SerialSensor;

/// Create a sensor based on configuration
pub fn create_sensor(config: &Config) -> Result<Box<dyn SensorPort>> {
    match config.sensor.kind.as_str() {
        "serial" => {
            let sensor = SerialSensor::open(
                &config.sensor.port,
                config.sensor.baud_rate,
                config.sensor.read_timeout(),
            )?;
            Ok(Box::new(sensor))
        }
        "mock" => Ok(Box::new(MockSensor::new(
            config.sensor.base_temperature_c,
            config.sensor.base_humidity_pct,
        ))),
        _ => Err(Error::UnknownSensor(config.sensor.kind.clone())),
    }
}
