//! # sensorcast - Fixed-Slot Hardware Telemetry over UDP
//!
//! A small Rust crate that polls hardware sensor readings at a fixed interval
//! and transmits them as a compact binary packet over UDP to a fixed remote
//! collector. The core is the sensor-selection pipeline: given a large,
//! machine-dependent tree of hardware sensors, deterministically extract a
//! fixed, ordered subset into a stable-width frame that a dumb receiver can
//! decode with nothing but the deployment's selection spec.
//!
//! ## Features
//!
//! - **Sensor discovery**: CPU, memory, thermal, storage, and network sensors
//!   via `sysinfo`, presented as a deterministic traversal tree
//! - **Three selection modes**: identifier→slot map, positional index list,
//!   identifier allow-list
//! - **Stable wire format**: N little-endian `f32`s, no header, no handshake
//! - **Best-effort delivery**: send failures are counted, never fatal
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sensorcast::{Monitor, SelectionSpec, SysinfoSource, TelemetryConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let source = SysinfoSource::new()?;
//!     let config = TelemetryConfig::new("192.168.0.128", 35432);
//!     let monitor = Monitor::new(source, SelectionSpec::default(), &config)?;
//!     monitor.run().await?;
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod selection;
pub mod sensors;
pub mod telemetry;

// Re-export public API
pub use error::{Result, TelemetryError};
pub use selection::{FrameEncoder, SelectionSpec};
pub use sensors::{HardwareNode, Sensor, SensorKind, SensorSource, SensorTree, SysinfoSource};
pub use telemetry::{Monitor, TelemetryConfig, TransportStats, UdpSender};

/// The default update period in milliseconds
pub const DEFAULT_INTERVAL_MS: u64 = 2000;

/// The default collector UDP port
pub const DEFAULT_PORT: u16 = 35432;
