//! Hardware sensor discovery and the sensor tree.
//!
//! This module owns the traversable tree of hardware nodes and sensors that
//! the selection pipeline consumes, plus the default `sysinfo`-backed source
//! that discovers and refreshes it.

pub mod source;
pub mod traits;
pub mod tree;

// Re-export commonly used items
pub use source::SysinfoSource;
pub use traits::SensorSource;
pub use tree::{HardwareNode, Sensor, SensorKind, SensorTree};
