//! Frame transmission and the update loop.
//!
//! This module carries everything downstream of the encoder: the raw
//! little-endian wire format, the best-effort UDP sender, the destination
//! configuration, and the monitor loop that drives a cycle every period.

pub mod config;
pub mod monitor;
pub mod udp;
pub mod wire;

// Re-export commonly used items
pub use config::TelemetryConfig;
pub use monitor::Monitor;
pub use udp::{TransportStats, UdpSender};
