use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use sensorcast::{
    telemetry::wire, FrameEncoder, HardwareNode, SelectionSpec, Sensor, SensorKind, SensorTree,
};
use std::collections::HashMap;

/// Build a synthetic tree shaped like a real machine: a handful of top-level
/// nodes, each with child nodes carrying the sensors.
fn synthetic_tree(sensors_per_node: usize) -> SensorTree {
    let mut nodes = Vec::new();
    for h in 0..8 {
        let mut hardware = HardwareNode::new(format!("hw{}", h));
        for c in 0..4 {
            let mut child = HardwareNode::new(format!("sub{}", c));
            for s in 0..sensors_per_node {
                child.sensors.push(Sensor::new(
                    format!("/hw{}/{}/load/{}", h, c, s),
                    SensorKind::Load,
                    (h * c * s) as f64,
                ));
            }
            hardware.children.push(child);
        }
        nodes.push(hardware);
    }
    SensorTree { nodes }
}

/// Benchmark map-variant encoding over a realistic tree
fn bench_map_encoding(c: &mut Criterion) {
    let tree = synthetic_tree(8);
    let mut slots = HashMap::new();
    for (i, id) in ["/hw0/0/load/0", "/hw3/2/load/5", "/hw7/3/load/7"]
        .iter()
        .enumerate()
    {
        slots.insert(id.to_string(), i * 4);
    }
    let mut encoder = FrameEncoder::new(SelectionSpec::SlotMap { slots });

    c.bench_function("map_encoding", |b| {
        b.iter(|| {
            encoder.encode(&tree).len()
        })
    });
}

/// Benchmark positional encoding as the position list grows
fn bench_positional_encoding(c: &mut Criterion) {
    let tree = synthetic_tree(8);

    for list_len in [4, 16, 64].iter() {
        let positions: Vec<usize> = (0..*list_len).map(|i| i * 3).collect();
        let mut encoder = FrameEncoder::new(SelectionSpec::Positional { positions });

        c.bench_with_input(
            BenchmarkId::new("positional_encoding", list_len),
            list_len,
            |b, _| {
                b.iter(|| {
                    encoder.encode(&tree).len()
                })
            },
        );
    }
}

/// Benchmark allow-list encoding
fn bench_allow_list_encoding(c: &mut Criterion) {
    let tree = synthetic_tree(8);
    let identifiers: Vec<String> = (0..16).map(|i| format!("/hw{}/0/load/0", i % 8)).collect();
    // Dedup keeps the spec valid; identifiers repeat across hw indices.
    let identifiers: Vec<String> = {
        let mut seen = std::collections::HashSet::new();
        identifiers
            .into_iter()
            .filter(|id| seen.insert(id.clone()))
            .collect()
    };
    let mut encoder = FrameEncoder::new(SelectionSpec::AllowList { identifiers });

    c.bench_function("allow_list_encoding", |b| {
        b.iter(|| {
            encoder.encode(&tree).len()
        })
    });
}

/// Benchmark wire serialization of an encoded frame
fn bench_wire_serialization(c: &mut Criterion) {
    let frame: Vec<f32> = (0..64).map(|i| i as f32 * 1.5).collect();

    c.bench_function("wire_serialization", |b| {
        b.iter(|| {
            wire::frame_to_bytes(&frame).len()
        })
    });

    c.bench_function("wire_serialization_reused_buffer", |b| {
        let mut buffer = Vec::with_capacity(frame.len() * 4);
        b.iter(|| {
            buffer.clear();
            wire::write_frame(&mut buffer, &frame);
            buffer.len()
        })
    });
}

/// Benchmark the identifier → position index build
fn bench_position_index(c: &mut Criterion) {
    let tree = synthetic_tree(8);

    c.bench_function("position_index_build", |b| {
        b.iter(|| {
            FrameEncoder::positions_of(&tree).len()
        })
    });
}

criterion_group!(
    benches,
    bench_map_encoding,
    bench_positional_encoding,
    bench_allow_list_encoding,
    bench_wire_serialization,
    bench_position_index
);

criterion_main!(benches);
