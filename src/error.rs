//! Error types for VayuIO

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// VayuIO error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Serial port error
    #[error("Serial port error: {0}")]
    Serial(#[from] serialport::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file parse error
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Sensor read timeout
    #[error("Sensor read timeout")]
    Timeout,

    /// Reading failed validation (NaN or outside the sensor's physical range)
    #[error("Invalid reading: {temperature_c} °C / {humidity_pct} %")]
    InvalidReading {
        /// Temperature reported by the sensor
        temperature_c: f32,
        /// Relative humidity reported by the sensor
        humidity_pct: f32,
    },

    /// Malformed sensor record
    #[error("Invalid sensor record: {0}")]
    InvalidPacket(String),

    /// Observer registry is at capacity
    #[error("Observer registry full (capacity {capacity})")]
    RegistryFull {
        /// Fixed registry capacity
        capacity: usize,
    },

    /// TCP listener bind retries exhausted
    #[error("Failed to bind {addr} after {attempts} attempts")]
    BindFailed {
        /// Requested bind address
        addr: String,
        /// Attempts made before giving up
        attempts: u32,
    },

    /// Config names a sensor kind we don't know
    #[error("Unknown sensor kind: {0}")]
    UnknownSensor(String),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}
