//! Data structures for the hardware sensor tree.

use serde::{Deserialize, Serialize};

/// What a sensor measures. Informational only; selection never dispatches on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SensorKind {
    /// Utilization percentage (0.0 to 100.0)
    Load,
    /// Temperature in Celsius
    Temperature,
    /// Power draw in watts
    Power,
    /// Fan speed in RPM
    Fan,
    /// Data throughput in bytes per refresh interval
    Throughput,
    /// A data quantity in GiB
    Data,
    /// Clock frequency in MHz
    Clock,
}

impl std::fmt::Display for SensorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SensorKind::Load => "load",
            SensorKind::Temperature => "temperature",
            SensorKind::Power => "power",
            SensorKind::Fan => "fan",
            SensorKind::Throughput => "throughput",
            SensorKind::Data => "data",
            SensorKind::Clock => "clock",
        };
        write!(f, "{}", name)
    }
}

/// A leaf measurement point with a stable identifier and a refreshable value.
///
/// Identifiers are stable across runs for a given machine and driver version
/// (e.g. `/ram/data/0`), but are not portable across machines.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sensor {
    /// Stable string identifier, e.g. `/cpu/load/0`
    pub identifier: String,
    /// What this sensor measures
    pub kind: SensorKind,
    /// Most recently refreshed reading
    pub value: f64,
}

impl Sensor {
    /// Create a new sensor with the given identifier, kind, and reading.
    pub fn new(identifier: impl Into<String>, kind: SensorKind, value: f64) -> Self {
        Self {
            identifier: identifier.into(),
            kind,
            value,
        }
    }
}

/// An internal tree node grouping sensors and/or child nodes
/// (e.g. a CPU package grouping per-core sensors).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HardwareNode {
    /// Human-readable node name (e.g. "cpu", "nvme0")
    pub name: String,
    /// Child hardware nodes, in source-reported order
    pub children: Vec<HardwareNode>,
    /// The node's own direct sensors, in source-reported order
    pub sensors: Vec<Sensor>,
}

impl HardwareNode {
    /// Create an empty node with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
            sensors: Vec::new(),
        }
    }

    /// Visit every sensor under this node: children first, then own sensors.
    pub fn for_each_sensor<'a>(&'a self, f: &mut impl FnMut(&'a Sensor)) {
        for child in &self.children {
            child.for_each_sensor(f);
        }
        for sensor in &self.sensors {
            f(sensor);
        }
    }
}

/// A rooted forest of hardware nodes as reported by the sensor source.
///
/// Traversal order is an invariant the selection logic depends on: top-level
/// nodes in source-reported order, and within each node children before the
/// node's own direct sensors. Reordering the source tree silently reorders
/// positional selection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SensorTree {
    /// Top-level hardware nodes in source-reported order
    pub nodes: Vec<HardwareNode>,
}

impl SensorTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Visit every sensor in the fixed traversal order.
    pub fn for_each_sensor<'a>(&'a self, mut f: impl FnMut(&'a Sensor)) {
        for node in &self.nodes {
            node.for_each_sensor(&mut f);
        }
    }

    /// All sensors flattened in traversal order.
    pub fn sensors(&self) -> Vec<&Sensor> {
        let mut out = Vec::new();
        self.for_each_sensor(|s| out.push(s));
        out
    }

    /// Total number of sensors in the tree.
    pub fn sensor_count(&self) -> usize {
        let mut count = 0;
        self.for_each_sensor(|_| count += 1);
        count
    }

    /// Find a sensor by identifier.
    pub fn find(&self, identifier: &str) -> Option<&Sensor> {
        let mut found = None;
        self.for_each_sensor(|s| {
            if found.is_none() && s.identifier == identifier {
                found = Some(s);
            }
        });
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_level_tree() -> SensorTree {
        let mut cpu = HardwareNode::new("cpu");
        let mut core0 = HardwareNode::new("core0");
        core0.sensors.push(Sensor::new("/cpu/0/load/0", SensorKind::Load, 10.0));
        let mut core1 = HardwareNode::new("core1");
        core1.sensors.push(Sensor::new("/cpu/1/load/0", SensorKind::Load, 20.0));
        cpu.children.push(core0);
        cpu.children.push(core1);
        cpu.sensors.push(Sensor::new("/cpu/load/0", SensorKind::Load, 15.0));

        let mut ram = HardwareNode::new("ram");
        ram.sensors.push(Sensor::new("/ram/data/0", SensorKind::Data, 7.5));

        SensorTree {
            nodes: vec![cpu, ram],
        }
    }

    #[test]
    fn test_traversal_children_before_own_sensors() {
        let tree = two_level_tree();
        let order: Vec<&str> = tree
            .sensors()
            .iter()
            .map(|s| s.identifier.as_str())
            .collect();

        // Per-core sensors come before the package's own aggregate sensor.
        assert_eq!(
            order,
            vec!["/cpu/0/load/0", "/cpu/1/load/0", "/cpu/load/0", "/ram/data/0"]
        );
    }

    #[test]
    fn test_sensor_count_and_find() {
        let tree = two_level_tree();
        assert_eq!(tree.sensor_count(), 4);

        let sensor = tree.find("/ram/data/0").expect("sensor should exist");
        assert_eq!(sensor.kind, SensorKind::Data);
        assert_eq!(sensor.value, 7.5);

        assert!(tree.find("/gpu/0/load/0").is_none());
    }

    #[test]
    fn test_empty_tree() {
        let tree = SensorTree::new();
        assert_eq!(tree.sensor_count(), 0);
        assert!(tree.sensors().is_empty());
    }
}
