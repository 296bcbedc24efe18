//! Core types and traits shared across the daemon

pub mod reading;
pub mod sensor;

pub use reading::Reading;
pub use sensor::SensorPort;
