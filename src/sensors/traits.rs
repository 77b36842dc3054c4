//! Traits for sensor tree providers.

use crate::error::Result;
use crate::sensors::tree::SensorTree;

/// Trait for anything that owns and refreshes a hardware sensor tree.
///
/// The monitor loop calls [`SensorSource::refresh`] once per cycle before the
/// tree is read; implementations must not expect values to stay current
/// without it. The selector never triggers a refresh itself.
pub trait SensorSource {
    /// Re-read every sensor value in the tree.
    fn refresh(&mut self) -> Result<()>;

    /// The current sensor tree, in the source's fixed traversal order.
    fn tree(&self) -> &SensorTree;
}
