use std::hash::{Hash, Hasher};

use serde::Serialize;

/// Dense node identifier: the node's position in registry insertion order.
pub type NodeId = usize;

/// Planar coordinates for a node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Calculate the Euclidean distance to another position.
    pub fn distance_to(&self, other: &Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    pub(crate) fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Named, positioned node. Equality and hashing only consider the name.
#[derive(Debug, Clone, Serialize)]
pub struct Node {
    pub name: String,
    pub position: Position,
}

impl Node {
    pub fn new(name: impl Into<String>, position: Position) -> Self {
        Self {
            name: name.into(),
            position,
        }
    }

    pub fn distance_to(&self, other: &Node) -> f64 {
        self.position.distance_to(&other.position)
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Node {}

impl Hash for Node {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}
