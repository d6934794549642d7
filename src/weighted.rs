//! Motif-weighted graph.
//!
//! Every edge of the source graph starts at weight 1. Each motif of size `s` then adds
//! `s` to every edge it covers, so an edge inside one triangle ends at 4 and
//! an edge shared by a triangle and a 4-clique containing it ends at 1 + 3 + 4.
//!
//! | Quantity | Definition |
//! |----------|------------|
//! | degree   | number of incident edges (same as the source graph) |
//! | strength | sum of incident edge weights |

use crate::motif::MotifSet;
use crate::{Graph, NodeId};
use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;

/// Weighted companion of a [`Graph`] with the same node set and node order.
#[derive(Debug, Clone)]
pub struct WeightedMotifGraph {
    graph: UnGraph<NodeId, u64>,
}

impl WeightedMotifGraph {
    /// Build the weighted graph from `graph` and its motifs.
    ///
    /// Isolated nodes are kept with degree and strength 0. Motif pairs that are
    /// not edges of `graph` are ignored (they cannot occur for motifs found by
    /// [`find_motifs`](crate::motif::find_motifs)).
    #[must_use]
    pub fn build(graph: &Graph, motifs: &MotifSet) -> Self {
        let src = graph.as_petgraph();
        let mut weighted = UnGraph::with_capacity(src.node_count(), src.edge_count());
        for idx in src.node_indices() {
            weighted.add_node(src[idx].clone());
        }
        for edge in src.edge_references() {
            weighted.add_edge(edge.source(), edge.target(), 1_u64);
        }

        for motif in motifs.iter() {
            let size = motif.size() as u64;
            for (a, b) in motif.pairs() {
                let (Some(ia), Some(ib)) = (graph.index_of(a), graph.index_of(b)) else {
                    continue;
                };
                if let Some(e) = weighted.find_edge(ia, ib) {
                    weighted[e] += size;
                }
            }
        }

        Self { graph: weighted }
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Weight of the edge between `a` and `b`, if any.
    pub fn weight(&self, a: NodeIndex, b: NodeIndex) -> Option<u64> {
        self.graph.find_edge(a, b).map(|e| self.graph[e])
    }

    /// Number of incident edges.
    pub fn degree(&self, idx: NodeIndex) -> usize {
        self.graph.edges(idx).count()
    }

    /// Sum of incident edge weights.
    pub fn strength(&self, idx: NodeIndex) -> u64 {
        self.graph.edges(idx).map(|e| *e.weight()).sum()
    }

    /// Underlying petgraph graph.
    pub fn as_petgraph(&self) -> &UnGraph<NodeId, u64> {
        &self.graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motif::find_motifs;

    fn idx(g: &Graph, id: &str) -> NodeIndex {
        g.index_of(id).unwrap()
    }

    #[test]
    fn test_triangle_with_tail() {
        let g = Graph::from_edges([("1", "2"), ("1", "3"), ("2", "3"), ("3", "4")]);
        let w = WeightedMotifGraph::build(&g, &find_motifs(&g, Some(3)));

        assert_eq!(w.weight(idx(&g, "1"), idx(&g, "2")), Some(4));
        assert_eq!(w.weight(idx(&g, "3"), idx(&g, "4")), Some(1));
        assert_eq!(w.weight(idx(&g, "1"), idx(&g, "4")), None);

        assert_eq!(w.strength(idx(&g, "3")), 9);
        assert_eq!(w.strength(idx(&g, "4")), 1);
        assert_eq!(w.degree(idx(&g, "3")), 3);
    }

    #[test]
    fn test_k4_weights_accumulate_by_size() {
        let mut g = Graph::new();
        for (u, v) in [("a", "b"), ("a", "c"), ("a", "d"), ("b", "c"), ("b", "d"), ("c", "d")] {
            g.add_edge(u, v);
        }
        let w = WeightedMotifGraph::build(&g, &find_motifs(&g, None));
        // Each edge lies in 2 triangles and the single 4-clique: 1 + 2*3 + 4
        assert_eq!(w.weight(idx(&g, "a"), idx(&g, "b")), Some(11));
        assert_eq!(w.strength(idx(&g, "a")), 33);
    }

    #[test]
    fn test_isolated_nodes_retained() {
        let mut g = Graph::from_edges([("a", "b")]);
        g.add_node("z");
        let w = WeightedMotifGraph::build(&g, &MotifSet::default());
        assert_eq!(w.node_count(), 3);
        assert_eq!(w.degree(idx(&g, "z")), 0);
        assert_eq!(w.strength(idx(&g, "z")), 0);
        assert_eq!(w.as_petgraph()[idx(&g, "z")], "z");
    }
}
