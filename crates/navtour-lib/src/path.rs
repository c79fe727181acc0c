use std::cmp::Ordering;
use std::collections::BinaryHeap;

use serde::Serialize;

use crate::node::NodeId;
use crate::registry::NodeRegistry;

/// Lowest-cost path between two nodes, endpoints inclusive.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShortestPath {
    pub nodes: Vec<NodeId>,
    pub cost: f64,
}

impl ShortestPath {
    /// Number of edges traversed.
    pub fn hop_count(&self) -> usize {
        self.nodes.len().saturating_sub(1)
    }
}

/// Result of a point-to-point search. An unreachable target is an expected
/// outcome, never an error and never a partial path.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PathOutcome {
    Found(ShortestPath),
    Unreachable,
}

impl PathOutcome {
    pub fn is_reachable(&self) -> bool {
        matches!(self, PathOutcome::Found(_))
    }

    pub fn path(&self) -> Option<&ShortestPath> {
        match self {
            PathOutcome::Found(path) => Some(path),
            PathOutcome::Unreachable => None,
        }
    }

    pub fn cost(&self) -> Option<f64> {
        self.path().map(|path| path.cost)
    }

    pub fn into_path(self) -> Option<ShortestPath> {
        match self {
            PathOutcome::Found(path) => Some(path),
            PathOutcome::Unreachable => None,
        }
    }
}

/// Run Dijkstra's algorithm with a binary-heap frontier.
///
/// The frontier pops the lowest tentative distance first and, among equal
/// distances, the lowest node index, so the settle order matches
/// [`find_route_dijkstra_scan`] exactly. Identifiers outside the registry are
/// reported as unreachable.
pub fn find_route_dijkstra(registry: &NodeRegistry, start: NodeId, goal: NodeId) -> PathOutcome {
    let Some(mut search) = SearchState::new(registry, start, goal) else {
        return PathOutcome::Unreachable;
    };
    if start == goal {
        return search.found(goal);
    }

    let mut queue = BinaryHeap::new();
    queue.push(QueueEntry::new(start, 0.0));

    while let Some(entry) = queue.pop() {
        let current = entry.node;
        if search.settled[current] || entry.cost.0 > search.distances[current] {
            continue;
        }
        search.settled[current] = true;

        if current == goal {
            return search.found(goal);
        }

        for next in search.relax(registry, current) {
            queue.push(QueueEntry::new(next, search.distances[next]));
        }
    }

    PathOutcome::Unreachable
}

/// Run Dijkstra's algorithm selecting the next node by a linear scan.
///
/// O(V²); the scan keeps the first (lowest index) node among equal minimal
/// tentative distances.
pub fn find_route_dijkstra_scan(
    registry: &NodeRegistry,
    start: NodeId,
    goal: NodeId,
) -> PathOutcome {
    let Some(mut search) = SearchState::new(registry, start, goal) else {
        return PathOutcome::Unreachable;
    };
    if start == goal {
        return search.found(goal);
    }

    loop {
        let mut selected = None;
        let mut best = f64::INFINITY;
        for (node, &distance) in search.distances.iter().enumerate() {
            if !search.settled[node] && distance < best {
                best = distance;
                selected = Some(node);
            }
        }

        // Only infinite distances remain: the goal is in another component.
        let Some(current) = selected else {
            return PathOutcome::Unreachable;
        };
        search.settled[current] = true;

        if current == goal {
            return search.found(goal);
        }

        search.relax(registry, current);
    }
}

/// Run A* search using the straight-line distance to the goal as heuristic.
///
/// Edge weights are Euclidean distances, so the heuristic is admissible and
/// consistent and the returned cost equals Dijkstra's.
pub fn find_route_a_star(registry: &NodeRegistry, start: NodeId, goal: NodeId) -> PathOutcome {
    let Some(mut search) = SearchState::new(registry, start, goal) else {
        return PathOutcome::Unreachable;
    };
    if start == goal {
        return search.found(goal);
    }

    let mut queue = BinaryHeap::new();
    queue.push(AStarEntry::new(start, 0.0, registry.distance(start, goal)));

    while let Some(entry) = queue.pop() {
        let current = entry.node;
        if search.settled[current] || entry.cost.0 > search.distances[current] {
            continue;
        }
        search.settled[current] = true;

        if current == goal {
            return search.found(goal);
        }

        for next in search.relax(registry, current) {
            let heuristic = registry.distance(next, goal);
            queue.push(AStarEntry::new(next, search.distances[next], heuristic));
        }
    }

    PathOutcome::Unreachable
}

/// Per-query mutable state; nothing is shared between concurrent queries.
struct SearchState {
    start: NodeId,
    distances: Vec<f64>,
    parents: Vec<Option<NodeId>>,
    settled: Vec<bool>,
}

impl SearchState {
    fn new(registry: &NodeRegistry, start: NodeId, goal: NodeId) -> Option<Self> {
        let len = registry.len();
        if start >= len || goal >= len {
            return None;
        }

        let mut distances = vec![f64::INFINITY; len];
        distances[start] = 0.0;
        Some(Self {
            start,
            distances,
            parents: vec![None; len],
            settled: vec![false; len],
        })
    }

    /// Relax every unsettled neighbour of `current`, returning the improved ones.
    fn relax(&mut self, registry: &NodeRegistry, current: NodeId) -> Vec<NodeId> {
        let base = self.distances[current];
        let mut improved = Vec::new();
        for edge in registry.neighbours(current) {
            let next = edge.target;
            if self.settled[next] {
                continue;
            }

            let next_cost = base + edge.distance;
            if next_cost < self.distances[next] {
                self.distances[next] = next_cost;
                self.parents[next] = Some(current);
                improved.push(next);
            }
        }
        improved
    }

    fn found(&self, goal: NodeId) -> PathOutcome {
        PathOutcome::Found(ShortestPath {
            nodes: reconstruct_path(&self.parents, self.start, goal),
            cost: self.distances[goal],
        })
    }
}

fn reconstruct_path(parents: &[Option<NodeId>], start: NodeId, goal: NodeId) -> Vec<NodeId> {
    let mut path = Vec::new();
    let mut current = Some(goal);
    while let Some(node) = current {
        path.push(node);
        if node == start {
            break;
        }
        current = parents[node];
    }
    path.reverse();
    path
}

#[derive(Copy, Clone, Debug, Default)]
struct FloatOrd(f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct QueueEntry {
    node: NodeId,
    cost: FloatOrd,
}

impl QueueEntry {
    fn new(node: NodeId, cost: f64) -> Self {
        Self {
            node,
            cost: FloatOrd(cost),
        }
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap becomes a min-heap by cost, then index.
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct AStarEntry {
    node: NodeId,
    cost: FloatOrd,
    estimate: FloatOrd,
}

impl AStarEntry {
    fn new(node: NodeId, cost: f64, heuristic: f64) -> Self {
        Self {
            node,
            cost: FloatOrd(cost),
            estimate: FloatOrd(cost + heuristic),
        }
    }
}

impl Ord for AStarEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .estimate
            .cmp(&self.estimate)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for AStarEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
