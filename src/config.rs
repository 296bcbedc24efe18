//! Configuration for the VayuIO daemon
//!
//! Loads configuration from a TOML file with the minimal parameters needed
//! for sampling and broadcast.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Top-level application configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub sensor: SensorConfig,
    #[serde(default)]
    pub sampling: SamplingConfig,
    #[serde(default)]
    pub network: NetworkConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Sensor configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SensorConfig {
    /// Sensor kind: "serial" (probe on a serial line) or "mock" (simulated)
    pub kind: String,
    /// Serial device path (serial kind only)
    pub port: String,
    /// Serial baud rate (serial kind only)
    pub baud_rate: u32,
    /// Read timeout for one sensor transaction, in milliseconds
    pub read_timeout_ms: u64,
    /// Baseline temperature for the mock sensor, °C
    pub base_temperature_c: f32,
    /// Baseline relative humidity for the mock sensor, %
    pub base_humidity_pct: f32,
}

/// Sampling cadence configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SamplingConfig {
    /// Fixed delay between the end of one sample cycle and the next, seconds
    pub interval_secs: u64,
}

/// TCP broadcast configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// TCP bind address for the broadcast listener
    ///
    /// Examples:
    /// - `0.0.0.0:8081` - Bind to all interfaces on port 8081
    /// - `127.0.0.1:8081` - Localhost only
    pub bind_address: String,
    /// Maximum bind attempts before startup fails
    pub bind_retry_max: u32,
    /// Delay between bind attempts, in milliseconds
    pub bind_retry_delay_ms: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            kind: "mock".to_string(),
            port: "/dev/ttyUSB0".to_string(),
            baud_rate: 9600,
            read_timeout_ms: 2000,
            base_temperature_c: 22.0,
            base_humidity_pct: 55.0,
        }
    }
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self { interval_secs: 5 }
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8081".to_string(),
            bind_retry_max: 10,
            bind_retry_delay_ms: 2000,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl SensorConfig {
    /// Read timeout as a [`Duration`]
    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }
}

impl SamplingConfig {
    /// Sampling interval as a [`Duration`]
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

impl NetworkConfig {
    /// Delay between bind attempts as a [`Duration`]
    pub fn bind_retry_delay(&self) -> Duration {
        Duration::from_millis(self.bind_retry_delay_ms)
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Default configuration with the simulated sensor
    ///
    /// Suitable for testing and development. Deployments with real hardware
    /// should use a proper TOML configuration file.
    pub fn mock_defaults() -> Self {
        Self {
            sensor: SensorConfig::default(),
            sampling: SamplingConfig::default(),
            network: NetworkConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::mock_defaults()
    }
}
