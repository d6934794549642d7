//! Simple undirected graph using petgraph.

use crate::{Error, Result};
use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use serde::{Deserialize, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};

/// Opaque node identifier. Ordered so motifs can be canonicalized by sorting.
pub type NodeId = String;

/// A simple, undirected, unweighted graph.
///
/// Node order is insertion order. Every algorithm in this crate iterates nodes
/// in that order, so results (including floating-point sums) are reproducible
/// for a fixed construction sequence.
///
/// # Example
///
/// ```rust
/// use motifrank::Graph;
///
/// let g = Graph::from_edges([("1", "2"), ("2", "3"), ("3", "1")]);
/// assert_eq!(g.node_count(), 3);
/// assert_eq!(g.edge_count(), 3);
/// assert!(g.has_edge("3", "2"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Graph {
    graph: UnGraph<NodeId, ()>,
    node_index: HashMap<NodeId, NodeIndex>,
}

impl Graph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a graph with estimated capacity.
    pub fn with_capacity(nodes: usize, edges: usize) -> Self {
        Self {
            graph: UnGraph::with_capacity(nodes, edges),
            node_index: HashMap::with_capacity(nodes),
        }
    }

    /// Build a graph from an edge list.
    pub fn from_edges<I, A, B>(edges: I) -> Self
    where
        I: IntoIterator<Item = (A, B)>,
        A: Into<NodeId>,
        B: Into<NodeId>,
    {
        let mut g = Self::new();
        for (a, b) in edges {
            g.add_edge(a, b);
        }
        g
    }

    /// Add a node if absent. Returns its index either way.
    pub fn add_node(&mut self, id: impl Into<NodeId>) -> NodeIndex {
        let id = id.into();
        if let Some(&idx) = self.node_index.get(&id) {
            return idx;
        }
        let idx = self.graph.add_node(id.clone());
        self.node_index.insert(id, idx);
        idx
    }

    /// Add an undirected edge, creating endpoints as needed.
    ///
    /// Self-loops register the node but add no edge; duplicate edges are ignored.
    /// Returns `true` if a new edge was inserted.
    pub fn add_edge(&mut self, a: impl Into<NodeId>, b: impl Into<NodeId>) -> bool {
        let a = self.add_node(a);
        let b = self.add_node(b);
        if a == b || self.graph.find_edge(a, b).is_some() {
            return false;
        }
        self.graph.add_edge(a, b, ());
        true
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Iterate over node ids in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &NodeId> {
        self.graph.node_weights()
    }

    /// Iterate over edges as node id pairs.
    pub fn edges(&self) -> impl Iterator<Item = (&NodeId, &NodeId)> {
        self.graph
            .edge_references()
            .map(|e| (&self.graph[e.source()], &self.graph[e.target()]))
    }

    /// Whether the node exists.
    pub fn contains_node(&self, id: &str) -> bool {
        self.node_index.contains_key(id)
    }

    /// Index of a node, if present.
    pub fn index_of(&self, id: &str) -> Option<NodeIndex> {
        self.node_index.get(id).copied()
    }

    /// Id of the node at `idx`.
    pub fn node_id(&self, idx: NodeIndex) -> &NodeId {
        &self.graph[idx]
    }

    /// Whether `a` and `b` are adjacent. Unknown nodes are never adjacent.
    pub fn has_edge(&self, a: &str, b: &str) -> bool {
        match (self.index_of(a), self.index_of(b)) {
            (Some(a), Some(b)) => self.graph.find_edge(a, b).is_some(),
            _ => false,
        }
    }

    /// Neighbors of a node.
    pub fn neighbors(&self, id: &str) -> Result<Vec<&NodeId>> {
        let idx = self
            .index_of(id)
            .ok_or_else(|| Error::UnknownNode(id.to_string()))?;
        Ok(self.graph.neighbors(idx).map(|n| &self.graph[n]).collect())
    }

    /// Degree of a node.
    pub fn degree(&self, id: &str) -> Result<usize> {
        let idx = self
            .index_of(id)
            .ok_or_else(|| Error::UnknownNode(id.to_string()))?;
        Ok(self.graph.neighbors(idx).count())
    }

    /// Get the underlying petgraph for advanced operations.
    pub fn as_petgraph(&self) -> &UnGraph<NodeId, ()> {
        &self.graph
    }

    /// Structural hash of nodes and edges, used as a memoization key.
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.node_count().hash(&mut hasher);
        for id in self.nodes() {
            id.hash(&mut hasher);
        }
        for e in self.graph.edge_references() {
            e.source().index().hash(&mut hasher);
            e.target().index().hash(&mut hasher);
        }
        hasher.finish()
    }

    /// Compute statistics about the graph.
    pub fn stats(&self) -> GraphStats {
        let node_count = self.node_count();
        let edge_count = self.edge_count();
        let isolated_count = self
            .graph
            .node_indices()
            .filter(|&idx| self.graph.neighbors(idx).next().is_none())
            .count();
        let avg_degree = if node_count > 0 {
            2.0 * edge_count as f64 / node_count as f64
        } else {
            0.0
        };

        GraphStats {
            node_count,
            edge_count,
            isolated_count,
            avg_degree,
        }
    }
}

/// Statistics about a graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphStats {
    /// Number of nodes.
    pub node_count: usize,
    /// Number of edges.
    pub edge_count: usize,
    /// Nodes with no incident edge.
    pub isolated_count: usize,
    /// Mean degree.
    pub avg_degree: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_edges() {
        let mut g = Graph::new();
        assert!(g.add_edge("a", "b"));
        assert!(g.add_edge("b", "c"));
        assert!(!g.add_edge("c", "b"), "duplicate edge in reverse direction");

        assert_eq!(g.node_count(), 3);
        assert_eq!(g.edge_count(), 2);
        assert!(g.has_edge("a", "b"));
        assert!(g.has_edge("b", "a"));
        assert!(!g.has_edge("a", "c"));
    }

    #[test]
    fn test_self_loop_keeps_node() {
        let mut g = Graph::new();
        assert!(!g.add_edge("x", "x"));
        assert_eq!(g.node_count(), 1);
        assert_eq!(g.edge_count(), 0);
        assert_eq!(g.degree("x").unwrap(), 0);
    }

    #[test]
    fn test_insertion_order() {
        let g = Graph::from_edges([("3", "1"), ("1", "2")]);
        let ids: Vec<&str> = g.nodes().map(String::as_str).collect();
        assert_eq!(ids, vec!["3", "1", "2"]);
    }

    #[test]
    fn test_unknown_node() {
        let g = Graph::from_edges([("a", "b")]);
        assert!(matches!(g.degree("zz"), Err(Error::UnknownNode(_))));
        assert!(!g.has_edge("a", "zz"));
    }

    #[test]
    fn test_fingerprint_tracks_structure() {
        let g1 = Graph::from_edges([("a", "b"), ("b", "c")]);
        let g2 = Graph::from_edges([("a", "b"), ("b", "c")]);
        let g3 = Graph::from_edges([("a", "b"), ("a", "c")]);
        assert_eq!(g1.fingerprint(), g2.fingerprint());
        assert_ne!(g1.fingerprint(), g3.fingerprint());
    }

    #[test]
    fn test_stats() {
        let mut g = Graph::from_edges([("a", "b"), ("b", "c")]);
        g.add_node("lonely");
        let stats = g.stats();
        assert_eq!(stats.node_count, 4);
        assert_eq!(stats.edge_count, 2);
        assert_eq!(stats.isolated_count, 1);
        assert!((stats.avg_degree - 1.0).abs() < 1e-12);
    }
}
