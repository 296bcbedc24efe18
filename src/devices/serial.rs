//! Serial-attached environmental probe
//!
//! Speaks the probe's line protocol: one ASCII record per transaction,
//! `"<temperature>,<humidity>"` terminated by LF (optional CR), e.g.
//! `23.4,56.7`. This covers DHT22-class sensors behind a USB/UART bridge
//! that handles the raw single-wire timing itself.

use crate::core::reading::Reading;
use crate::core::sensor::SensorPort;
use crate::error::{Error, Result};
use std::io::Read;
use std::time::Duration;

/// Longest record we accept before declaring the stream corrupt
const MAX_RECORD_LEN: usize = 64;

/// Environmental sensor on a serial line
pub struct SerialSensor {
    port: Box<dyn serialport::SerialPort>,
}

impl SerialSensor {
    /// Open the serial device
    ///
    /// # Arguments
    /// - `path`: serial device path (e.g. `/dev/ttyUSB0`)
    /// - `baud_rate`: line speed (probe default is 9600)
    /// - `timeout`: per-transaction read timeout
    pub fn open(path: &str, baud_rate: u32, timeout: Duration) -> Result<Self> {
        let port = serialport::new(path, baud_rate).timeout(timeout).open()?;
        log::info!("Serial sensor opened on {} @ {} baud", path, baud_rate);
        Ok(Self { port })
    }

    /// Read bytes until LF, bounded by the port timeout and `MAX_RECORD_LEN`
    fn read_record(&mut self) -> Result<String> {
        let mut record = Vec::with_capacity(16);
        let mut byte = [0u8; 1];

        loop {
            match self.port.read(&mut byte) {
                Ok(0) => {
                    return Err(Error::InvalidPacket("serial stream closed".to_string()));
                }
                Ok(_) => {
                    if byte[0] == b'\n' {
                        break;
                    }
                    record.push(byte[0]);
                    if record.len() > MAX_RECORD_LEN {
                        return Err(Error::InvalidPacket(format!(
                            "record exceeds {} bytes without terminator",
                            MAX_RECORD_LEN
                        )));
                    }
                }
                Err(ref e) if e.kind() == std::io::ErrorKind::TimedOut => {
                    return Err(Error::Timeout);
                }
                Err(e) => return Err(e.into()),
            }
        }

        String::from_utf8(record)
            .map_err(|_| Error::InvalidPacket("record is not valid UTF-8".to_string()))
    }
}

/// Parse one `"<temperature>,<humidity>"` record into raw values
fn parse_record(record: &str) -> Result<(f32, f32)> {
    let trimmed = record.trim_end_matches('\r').trim();
    let mut fields = trimmed.split(',');

    let temperature = fields
        .next()
        .and_then(|f| f.trim().parse::<f32>().ok())
        .ok_or_else(|| Error::InvalidPacket(format!("bad temperature field in {:?}", trimmed)))?;
    let humidity = fields
        .next()
        .and_then(|f| f.trim().parse::<f32>().ok())
        .ok_or_else(|| Error::InvalidPacket(format!("bad humidity field in {:?}", trimmed)))?;

    if fields.next().is_some() {
        return Err(Error::InvalidPacket(format!(
            "trailing fields in {:?}",
            trimmed
        )));
    }

    Ok((temperature, humidity))
}

impl SensorPort for SerialSensor {
    fn read(&mut self) -> Result<Reading> {
        let record = self.read_record()?;
        let (temperature_c, humidity_pct) = parse_record(&record)?;
        Reading::try_new(temperature_c, humidity_pct)
    }
}
