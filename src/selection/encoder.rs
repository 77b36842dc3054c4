//! Fixed-slot frame encoding from a sensor tree.

use crate::selection::spec::SelectionSpec;
use crate::sensors::tree::SensorTree;
use std::collections::HashMap;

/// Walks the sensor tree in its fixed traversal order and fills a
/// fixed-length `f32` frame according to the selection spec.
///
/// The frame length is fixed at construction and never changes. Slot-miss
/// policy differs by variant:
///
/// - `SlotMap`: **stale-on-miss** — the buffer persists across cycles, so a
///   mapped sensor that disappears from the tree keeps its last transmitted
///   value. Slots never written since construction stay at zero.
/// - `Positional` / `AllowList`: rebuilt from zero each cycle; the write
///   cursor resets and unmatched slots transmit as zero.
pub struct FrameEncoder {
    spec: SelectionSpec,
    frame: Vec<f32>,
}

impl FrameEncoder {
    /// Create an encoder with the frame length fixed by the spec.
    pub fn new(spec: SelectionSpec) -> Self {
        let frame = vec![0.0; spec.frame_len()];
        Self { spec, frame }
    }

    /// The selection spec this encoder applies.
    pub fn spec(&self) -> &SelectionSpec {
        &self.spec
    }

    /// The fixed output frame length.
    pub fn frame_len(&self) -> usize {
        self.frame.len()
    }

    /// Fill the frame from the tree's current values and return it.
    ///
    /// The caller is responsible for refreshing the tree first; encoding the
    /// same unrefreshed tree twice yields identical output. Never fails: a
    /// sensor with no match is simply skipped, and a spec entry with no
    /// matching sensor leaves its slot at the variant's miss value.
    pub fn encode(&mut self, tree: &SensorTree) -> &[f32] {
        let frame = &mut self.frame;

        match &self.spec {
            SelectionSpec::SlotMap { slots } => {
                // No reset: stale-on-miss.
                tree.for_each_sensor(|sensor| {
                    if let Some(&slot) = slots.get(&sensor.identifier) {
                        frame[slot] = sensor.value as f32;
                    }
                });
            }
            SelectionSpec::Positional { positions } => {
                frame.fill(0.0);
                let mut position = 0usize;
                tree.for_each_sensor(|sensor| {
                    // One sensor fills every slot whose listed position
                    // matches its traversal position.
                    for (slot, &wanted) in positions.iter().enumerate() {
                        if wanted == position {
                            frame[slot] = sensor.value as f32;
                        }
                    }
                    position += 1;
                });
            }
            SelectionSpec::AllowList { identifiers } => {
                frame.fill(0.0);
                let mut cursor = 0usize;
                tree.for_each_sensor(|sensor| {
                    if cursor < frame.len()
                        && identifiers.iter().any(|id| *id == sensor.identifier)
                    {
                        // Traversal-encounter order wins over list order.
                        frame[cursor] = sensor.value as f32;
                        cursor += 1;
                    }
                });
            }
        }

        &self.frame
    }

    /// The most recently encoded frame without re-encoding.
    pub fn frame(&self) -> &[f32] {
        &self.frame
    }

    /// Build an identifier → traversal-position index for the given tree.
    ///
    /// Useful for auditing positional specs against the machine they will run
    /// on, since positions shift whenever the driver reorders the tree.
    pub fn positions_of(tree: &SensorTree) -> HashMap<String, usize> {
        let mut index = HashMap::new();
        let mut position = 0usize;
        tree.for_each_sensor(|sensor| {
            index.entry(sensor.identifier.clone()).or_insert(position);
            position += 1;
        });
        index
    }
}
