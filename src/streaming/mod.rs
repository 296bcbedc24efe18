//! TCP text broadcast for VayuIO

pub mod broadcaster;

pub use broadcaster::{BroadcastHandle, TcpBroadcaster};
