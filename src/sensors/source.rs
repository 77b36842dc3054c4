//! Default sensor source backed by the `sysinfo` crate.

use crate::error::{Result, TelemetryError};
use crate::sensors::traits::SensorSource;
use crate::sensors::tree::{HardwareNode, Sensor, SensorKind, SensorTree};
use sysinfo::{Components, Disks, Networks, System};

/// Sensor source that discovers CPU, memory, thermal, storage, and network
/// sensors through `sysinfo` and presents them as a [`SensorTree`].
///
/// Identifiers follow the `/<hardware>/<index>/<kind>/<channel>` convention
/// (e.g. `/cpu/0/load/0`, `/ram/data/0`) and are stable for a given machine
/// as long as the hardware configuration does not change.
pub struct SysinfoSource {
    system: System,
    disks: Disks,
    networks: Networks,
    components: Components,
    tree: SensorTree,
}

impl SysinfoSource {
    /// Create a new source and perform the initial discovery pass.
    ///
    /// Fails fast when the platform exposes no CPU information at all, since
    /// a tree without sensors can never populate a frame.
    pub fn new() -> Result<Self> {
        let mut system = System::new_all();
        system.refresh_all();
        let disks = Disks::new_with_refreshed_list();
        let networks = Networks::new_with_refreshed_list();
        let components = Components::new_with_refreshed_list();

        if system.cpus().is_empty() {
            return Err(TelemetryError::source_error(
                "No CPU information available from this platform",
            ));
        }

        let tree = Self::build_tree(&system, &disks, &networks, &components);
        Ok(Self {
            system,
            disks,
            networks,
            components,
            tree,
        })
    }

    /// Rebuild the sensor tree from the current sysinfo state.
    fn build_tree(
        system: &System,
        disks: &Disks,
        networks: &Networks,
        components: &Components,
    ) -> SensorTree {
        let mut nodes = Vec::new();
        nodes.push(Self::cpu_node(system));
        nodes.push(Self::memory_node(system));
        nodes.push(Self::thermal_node(components));
        nodes.push(Self::storage_node(disks));
        nodes.push(Self::network_node(networks));
        SensorTree { nodes }
    }

    fn cpu_node(system: &System) -> HardwareNode {
        let mut node = HardwareNode::new("cpu");

        for (i, cpu) in system.cpus().iter().enumerate() {
            let mut core = HardwareNode::new(format!("core{}", i));
            core.sensors.push(Sensor::new(
                format!("/cpu/{}/load/0", i),
                SensorKind::Load,
                cpu.cpu_usage() as f64,
            ));
            node.children.push(core);
        }

        // Aggregate sensors live on the package node itself, after the cores.
        let cores = system.cpus().len().max(1) as f64;
        let usage: f64 = system
            .cpus()
            .iter()
            .map(|cpu| cpu.cpu_usage() as f64)
            .sum::<f64>()
            / cores;
        node.sensors
            .push(Sensor::new("/cpu/load/0", SensorKind::Load, usage));
        let frequency = system.cpus().first().map(|c| c.frequency()).unwrap_or(0);
        node.sensors.push(Sensor::new(
            "/cpu/clock/0",
            SensorKind::Clock,
            frequency as f64,
        ));

        node
    }

    fn memory_node(system: &System) -> HardwareNode {
        let mut node = HardwareNode::new("ram");
        let total = system.total_memory();
        let used = system.used_memory();
        let usage_percent = if total > 0 {
            (used as f64 / total as f64) * 100.0
        } else {
            0.0
        };

        node.sensors
            .push(Sensor::new("/ram/load/0", SensorKind::Load, usage_percent));
        node.sensors.push(Sensor::new(
            "/ram/data/0",
            SensorKind::Data,
            used as f64 / 1024.0 / 1024.0 / 1024.0,
        ));
        node.sensors.push(Sensor::new(
            "/ram/data/1",
            SensorKind::Data,
            system.available_memory() as f64 / 1024.0 / 1024.0 / 1024.0,
        ));
        node.sensors.push(Sensor::new(
            "/ram/data/2",
            SensorKind::Data,
            system.used_swap() as f64 / 1024.0 / 1024.0 / 1024.0,
        ));

        node
    }

    fn thermal_node(components: &Components) -> HardwareNode {
        let mut node = HardwareNode::new("thermal");

        // Component order is not guaranteed by the platform; sort by label so
        // traversal positions stay stable across runs.
        let mut labeled: Vec<(&str, f64)> = components
            .iter()
            .map(|c| (c.label(), c.temperature() as f64))
            .collect();
        labeled.sort_by(|a, b| a.0.cmp(b.0));

        for (i, (label, celsius)) in labeled.iter().enumerate() {
            let mut zone = HardwareNode::new(label.to_string());
            zone.sensors.push(Sensor::new(
                format!("/thermal/{}/temperature/0", i),
                SensorKind::Temperature,
                *celsius,
            ));
            node.children.push(zone);
        }

        node
    }

    fn storage_node(disks: &Disks) -> HardwareNode {
        let mut node = HardwareNode::new("storage");

        let mut sorted: Vec<&sysinfo::Disk> = disks.iter().collect();
        sorted.sort_by_key(|d| d.mount_point().to_path_buf());

        for (i, disk) in sorted.iter().enumerate() {
            let total = disk.total_space();
            let available = disk.available_space();
            let used = total.saturating_sub(available);
            let usage_percent = if total > 0 {
                (used as f64 / total as f64) * 100.0
            } else {
                0.0
            };

            let mut drive = HardwareNode::new(disk.mount_point().to_string_lossy().to_string());
            drive.sensors.push(Sensor::new(
                format!("/storage/{}/load/0", i),
                SensorKind::Load,
                usage_percent,
            ));
            drive.sensors.push(Sensor::new(
                format!("/storage/{}/data/0", i),
                SensorKind::Data,
                available as f64 / 1024.0 / 1024.0 / 1024.0,
            ));
            node.children.push(drive);
        }

        node
    }

    fn network_node(networks: &Networks) -> HardwareNode {
        let mut node = HardwareNode::new("net");

        // Networks iterate in hash order; sort by interface name for a stable
        // traversal.
        let mut sorted: Vec<(&String, &sysinfo::NetworkData)> = networks.iter().collect();
        sorted.sort_by(|a, b| a.0.cmp(b.0));

        for (name, data) in sorted {
            let mut iface = HardwareNode::new(name.clone());
            iface.sensors.push(Sensor::new(
                format!("/nic/{}/throughput/0", name),
                SensorKind::Throughput,
                data.received() as f64,
            ));
            iface.sensors.push(Sensor::new(
                format!("/nic/{}/throughput/1", name),
                SensorKind::Throughput,
                data.transmitted() as f64,
            ));
            node.children.push(iface);
        }

        node
    }
}

impl SensorSource for SysinfoSource {
    fn refresh(&mut self) -> Result<()> {
        self.system.refresh_all();
        self.disks.refresh();
        self.networks.refresh();
        self.components.refresh();
        self.tree = Self::build_tree(&self.system, &self.disks, &self.networks, &self.components);
        Ok(())
    }

    fn tree(&self) -> &SensorTree {
        &self.tree
    }
}
