//! SensorPort trait definition

use crate::core::reading::Reading;
use crate::error::Result;

/// Abstraction over the physical environmental sensor
///
/// An implementation owns exclusive access to the one hardware channel; the
/// `&mut self` receiver plus single-owner construction in `main` prevent two
/// threads from ever driving the same sensor transaction. The sampler thread
/// is the only caller.
pub trait SensorPort: Send {
    /// Perform one hardware transaction and return a validated reading
    ///
    /// Blocks up to the transaction's timeout. A timed-out or invalid
    /// transaction returns an error; the caller skips that sample cycle.
    fn read(&mut self) -> Result<Reading>;
}
