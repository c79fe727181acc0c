use std::collections::HashMap;

use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::node::{Node, NodeId, Position};

/// Minimum Jaro-Winkler similarity for a name to be offered as a suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.75;

/// Undirected edge stored on both endpoints' adjacency lists.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Edge {
    pub target: NodeId,
    pub distance: f64,
}

/// Registry of uniquely named nodes and the symmetric adjacency between them.
///
/// Nodes are addressed by [`NodeId`], which is their insertion index. The
/// adjacency is simple (no parallel edges, no self loops) and every edge is
/// weighted by the Euclidean distance between its endpoints.
#[derive(Debug, Clone, Default)]
pub struct NodeRegistry {
    nodes: Vec<Node>,
    name_to_id: HashMap<String, NodeId>,
    adjacency: Vec<Vec<Edge>>,
}

impl NodeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from nodes without any connections.
    pub fn from_nodes(nodes: impl IntoIterator<Item = Node>) -> Result<Self> {
        let mut registry = Self::new();
        for node in nodes {
            registry.insert(node.name, node.position)?;
        }
        Ok(registry)
    }

    /// Insert a node, returning its identifier.
    pub fn insert(&mut self, name: impl Into<String>, position: Position) -> Result<NodeId> {
        let name = name.into();
        if self.name_to_id.contains_key(&name) {
            return Err(Error::DuplicateNode { name });
        }
        if !position.is_finite() {
            return Err(Error::InvalidPosition {
                name,
                x: position.x,
                y: position.y,
            });
        }

        let id = self.nodes.len();
        self.name_to_id.insert(name.clone(), id);
        self.nodes.push(Node::new(name, position));
        self.adjacency.push(Vec::new());
        Ok(id)
    }

    /// Connect two nodes by name.
    ///
    /// Unknown names, self connections, and already existing edges are
    /// ignored and reported as `false`; this never fails. Use
    /// [`NodeRegistry::connect_strict`] to reject unknown names instead.
    pub fn connect(&mut self, a: &str, b: &str) -> bool {
        match (self.index_of(a), self.index_of(b)) {
            (Some(from), Some(to)) => self.connect_ids(from, to),
            _ => {
                debug!(from = a, to = b, "dropping connection with unknown endpoint");
                false
            }
        }
    }

    /// Connect two nodes by name, failing on the first unknown name.
    pub fn connect_strict(&mut self, a: &str, b: &str) -> Result<bool> {
        let from = self.resolve(a)?;
        let to = self.resolve(b)?;
        Ok(self.connect_ids(from, to))
    }

    /// Connect two nodes by identifier. Returns `true` when a new edge was added.
    pub fn connect_ids(&mut self, a: NodeId, b: NodeId) -> bool {
        if a == b || a >= self.nodes.len() || b >= self.nodes.len() {
            return false;
        }
        if self.adjacency[a].iter().any(|edge| edge.target == b) {
            return false;
        }

        let distance = self.distance(a, b);
        self.adjacency[a].push(Edge {
            target: b,
            distance,
        });
        self.adjacency[b].push(Edge {
            target: a,
            distance,
        });
        true
    }

    /// Lookup a node identifier by its case-sensitive name.
    pub fn index_of(&self, name: &str) -> Option<NodeId> {
        self.name_to_id.get(name).copied()
    }

    /// Resolve a name or produce an [`Error::UnknownNode`] with suggestions.
    pub fn resolve(&self, name: &str) -> Result<NodeId> {
        self.index_of(name).ok_or_else(|| Error::UnknownNode {
            name: name.to_string(),
            suggestions: self.fuzzy_matches(name, 3),
        })
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Lookup a node name by identifier.
    pub fn name(&self, id: NodeId) -> Option<&str> {
        self.nodes.get(id).map(|node| node.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Iterate `(id, node)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> + '_ {
        self.nodes.iter().enumerate()
    }

    /// Return the neighbours for a given node identifier.
    pub fn neighbours(&self, id: NodeId) -> &[Edge] {
        self.adjacency.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Total number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum::<usize>() / 2
    }

    /// Euclidean distance between two registered nodes.
    ///
    /// # Panics
    ///
    /// Panics if either identifier is out of range.
    pub fn distance(&self, a: NodeId, b: NodeId) -> f64 {
        self.nodes[a].distance_to(&self.nodes[b])
    }

    /// Names similar to `name`, best match first.
    pub fn fuzzy_matches(&self, name: &str, limit: usize) -> Vec<String> {
        let needle = name.to_lowercase();
        let mut scored: Vec<(f64, &str)> = self
            .nodes
            .iter()
            .map(|node| {
                let score = strsim::jaro_winkler(&needle, &node.name.to_lowercase());
                (score, node.name.as_str())
            })
            .filter(|(score, _)| *score >= SUGGESTION_THRESHOLD)
            .collect();

        scored.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.cmp(b.1)));
        scored
            .into_iter()
            .take(limit)
            .map(|(_, name)| name.to_string())
            .collect()
    }
}
