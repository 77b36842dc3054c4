//! Selection spec: which sensors populate which output slots.

use crate::error::{Result, TelemetryError};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// Upper bound on frame width. A slot index past this is almost certainly a
/// typo in the spec file, not a 4 KiB telemetry frame.
pub const MAX_FRAME_SLOTS: usize = 1024;

/// Static policy mapping sensors to output slots.
///
/// Constructed once at startup, validated, and immutable thereafter. The
/// frame length is fixed by the spec and never changes across update cycles.
///
/// ```json
/// {"mode": "map", "slots": {"/ram/data/0": 5, "/cpu/load/0": 0}}
/// {"mode": "positional", "positions": [3, 33, 33]}
/// {"mode": "allow_list", "identifiers": ["/cpu/load/0", "/ram/data/0"]}
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum SelectionSpec {
    /// Identifier → explicit slot index. Keys are unique but several
    /// identifiers may share a target slot; slot indices need not be
    /// contiguous. Frame length is `max(slot) + 1`.
    #[serde(rename = "map")]
    SlotMap {
        /// Sensor identifier → output slot index
        slots: HashMap<String, usize>,
    },

    /// Ordered 0-based traversal positions, included in list order as
    /// sequential output slots. Duplicate positions are allowed and
    /// re-selected for each occurrence. Frame length is the list length.
    Positional {
        /// Traversal positions to include, in output slot order
        positions: Vec<usize>,
    },

    /// Ordered identifier allow-list. Matching sensors are appended in
    /// traversal-encounter order, NOT list order. Frame length is the list
    /// length; identifiers absent from the tree leave trailing slots at zero.
    AllowList {
        /// Sensor identifiers to include
        identifiers: Vec<String>,
    },
}

impl Default for SelectionSpec {
    /// Built-in map over the sensors the default `sysinfo` source always
    /// exposes, for running without a spec file.
    fn default() -> Self {
        let mut slots = HashMap::new();
        slots.insert("/cpu/load/0".to_string(), 0);
        slots.insert("/cpu/clock/0".to_string(), 1);
        slots.insert("/ram/load/0".to_string(), 2);
        slots.insert("/ram/data/0".to_string(), 3);
        SelectionSpec::SlotMap { slots }
    }
}

impl SelectionSpec {
    /// Load and validate a spec from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&content)
    }

    /// Parse and validate a spec from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        let spec: SelectionSpec = serde_json::from_str(json)
            .map_err(|e| TelemetryError::spec_error(format!("JSON parse failed: {}", e)))?;
        spec.validate()?;
        Ok(spec)
    }

    /// The fixed output frame length this spec produces.
    pub fn frame_len(&self) -> usize {
        match self {
            SelectionSpec::SlotMap { slots } => {
                slots.values().max().map(|max| max + 1).unwrap_or(0)
            }
            SelectionSpec::Positional { positions } => positions.len(),
            SelectionSpec::AllowList { identifiers } => identifiers.len(),
        }
    }

    /// Check the spec for construction-time errors.
    pub fn validate(&self) -> Result<()> {
        match self {
            SelectionSpec::SlotMap { slots } => {
                if slots.is_empty() {
                    return Err(TelemetryError::spec_error("slot map is empty"));
                }
                for (identifier, &slot) in slots {
                    if slot >= MAX_FRAME_SLOTS {
                        return Err(TelemetryError::spec_error(format!(
                            "slot {} for {} exceeds the {}-slot frame limit",
                            slot, identifier, MAX_FRAME_SLOTS
                        )));
                    }
                }
            }
            SelectionSpec::Positional { positions } => {
                if positions.is_empty() {
                    return Err(TelemetryError::spec_error("position list is empty"));
                }
                if positions.len() > MAX_FRAME_SLOTS {
                    return Err(TelemetryError::spec_error(format!(
                        "{} positions exceed the {}-slot frame limit",
                        positions.len(),
                        MAX_FRAME_SLOTS
                    )));
                }
            }
            SelectionSpec::AllowList { identifiers } => {
                if identifiers.is_empty() {
                    return Err(TelemetryError::spec_error("allow-list is empty"));
                }
                if identifiers.len() > MAX_FRAME_SLOTS {
                    return Err(TelemetryError::spec_error(format!(
                        "{} identifiers exceed the {}-slot frame limit",
                        identifiers.len(),
                        MAX_FRAME_SLOTS
                    )));
                }
                let mut seen = HashSet::new();
                for identifier in identifiers {
                    if !seen.insert(identifier.as_str()) {
                        // A duplicate entry could never fill its second slot,
                        // since each sensor is appended at most once.
                        return Err(TelemetryError::spec_error(format!(
                            "duplicate identifier in allow-list: {}",
                            identifier
                        )));
                    }
                }
            }
        }
        Ok(())
    }

    /// Short human-readable description for logs and the `info` command.
    pub fn describe(&self) -> String {
        match self {
            SelectionSpec::SlotMap { slots } => {
                format!("map of {} identifiers, {} slots", slots.len(), self.frame_len())
            }
            SelectionSpec::Positional { positions } => {
                format!("{} traversal positions", positions.len())
            }
            SelectionSpec::AllowList { identifiers } => {
                format!("allow-list of {} identifiers", identifiers.len())
            }
        }
    }
}
