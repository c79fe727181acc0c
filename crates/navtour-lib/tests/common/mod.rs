// Shared fixtures for navtour-lib integration tests
#![allow(dead_code)]

use navtour_lib::{Node, NodeRegistry, Position};
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

/// A-B-C-D-E along the x axis, one unit apart, connected in sequence.
pub fn line_graph() -> NodeRegistry {
    let mut registry = NodeRegistry::new();
    for (i, name) in ["A", "B", "C", "D", "E"].iter().enumerate() {
        registry
            .insert(*name, Position::new(i as f64, 0.0))
            .expect("unique name");
    }
    for pair in ["A", "B", "C", "D", "E"].windows(2) {
        assert!(registry.connect(pair[0], pair[1]));
    }
    registry
}

/// Two components: {Ankara, Konya, Izmir} and {Van, Kars}.
pub fn split_graph() -> NodeRegistry {
    let mut registry = NodeRegistry::new();
    registry.insert("Ankara", Position::new(0.0, 0.0)).unwrap();
    registry.insert("Konya", Position::new(-1.0, -3.0)).unwrap();
    registry.insert("Izmir", Position::new(-6.0, -1.0)).unwrap();
    registry.insert("Van", Position::new(12.0, -2.0)).unwrap();
    registry.insert("Kars", Position::new(12.0, 3.0)).unwrap();
    registry.connect("Ankara", "Konya");
    registry.connect("Konya", "Izmir");
    registry.connect("Ankara", "Izmir");
    registry.connect("Van", "Kars");
    registry
}

/// Corners of the unit square listed in perimeter order.
pub fn unit_square() -> Vec<Node> {
    nodes(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)])
}

/// Houses named `1..=N` at the given coordinates.
pub fn nodes(points: &[(f64, f64)]) -> Vec<Node> {
    points
        .iter()
        .enumerate()
        .map(|(i, &(x, y))| Node::new((i + 1).to_string(), Position::new(x, y)))
        .collect()
}

/// Deterministic pseudo-random houses inside a 100x100 square.
pub fn random_nodes(count: usize, seed: u64) -> Vec<Node> {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
    (0..count)
        .map(|i| {
            Node::new(
                (i + 1).to_string(),
                Position::new(rng.gen_range(0.0..100.0), rng.gen_range(0.0..100.0)),
            )
        })
        .collect()
}

/// Random planar graph: each node linked to `fanout` random others.
pub fn random_graph(count: usize, fanout: usize, seed: u64) -> NodeRegistry {
    let mut registry = NodeRegistry::from_nodes(random_nodes(count, seed)).expect("unique names");
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed ^ 0x5eed);
    for a in 0..count {
        for _ in 0..fanout {
            let b = rng.gen_range(0..count);
            registry.connect_ids(a, b);
        }
    }
    registry
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
