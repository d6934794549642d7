//! Betweenness centrality: measuring brokerage and bridging.
//!
//! # Definition
//!
//! ```text
//! C_B(v) = Σ_{s≠v≠t} σ_st(v) / σ_st
//! ```
//!
//! Where:
//! - σ_st = number of shortest paths from s to t
//! - σ_st(v) = number of those paths passing through v
//!
//! # Brandes' Algorithm (2001)
//!
//! 1. Run BFS from each source s
//! 2. Track σ_sv (shortest path counts) during forward pass
//! 3. Accumulate dependencies δ_s(v) during backward pass
//!
//! ```text
//! δ_s(v) = Σ_{w: v∈P_s(w)} (σ_sv/σ_sw) × (1 + δ_s(w))
//! ```
//!
//! # Normalization
//!
//! Running Brandes from every source of an undirected graph visits each
//! unordered pair twice. Normalized scores divide the doubled sum by
//! (n-1)(n-2); raw scores halve it.

use crate::{Graph, NodeId};
use petgraph::graph::{NodeIndex, UnGraph};
use std::collections::{HashMap, VecDeque};

/// Configuration for betweenness centrality.
#[derive(Debug, Clone, Copy)]
pub struct BetweennessConfig {
    /// Normalize scores to [0, 1] range.
    pub normalized: bool,
}

impl Default for BetweennessConfig {
    fn default() -> Self {
        Self { normalized: true }
    }
}

/// Compute betweenness centrality using Brandes' algorithm.
///
/// # Complexity
///
/// - Time: O(VE)
/// - Space: O(V + E)
///
/// # Example
///
/// ```
/// use motifrank::Graph;
/// use motifrank::algo::centrality::{betweenness_centrality, BetweennessConfig};
///
/// let g = Graph::from_edges([("A", "B"), ("B", "C")]);
/// let scores = betweenness_centrality(&g, BetweennessConfig::default());
///
/// // B is on the only path from A to C
/// assert!((scores["B"] - 1.0).abs() < 1e-12);
/// assert_eq!(scores["A"], 0.0);
/// ```
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn betweenness_centrality(graph: &Graph, config: BetweennessConfig) -> HashMap<NodeId, f64> {
    let pg = graph.as_petgraph();
    let n = pg.node_count();
    if n < 3 {
        return pg.node_indices().map(|idx| (pg[idx].clone(), 0.0)).collect();
    }

    let mut betweenness = vec![0.0_f64; n];

    for s in pg.node_indices() {
        let (sigma, predecessors, order) = bfs_shortest_paths(pg, s);

        let mut delta = vec![0.0_f64; n];

        // Reverse BFS order: farthest first
        for &w in order.iter().rev() {
            let w_idx = w.index();
            for &v in &predecessors[w_idx] {
                let v_idx = v.index();
                let coeff = sigma[v_idx] / sigma[w_idx];
                delta[v_idx] += coeff * (1.0 + delta[w_idx]);
            }
            if w != s {
                betweenness[w_idx] += delta[w_idx];
            }
        }
    }

    let scale = if config.normalized {
        1.0 / ((n - 1) * (n - 2)) as f64
    } else {
        0.5
    };

    pg.node_indices()
        .map(|idx| (pg[idx].clone(), betweenness[idx.index()] * scale))
        .collect()
}

/// BFS to find shortest paths from source.
///
/// Returns:
/// - sigma: σ_sv = number of shortest paths from s to v
/// - predecessors: P_s(v) = predecessors on shortest paths
/// - order: nodes in BFS order (for backward pass)
fn bfs_shortest_paths(
    pg: &UnGraph<NodeId, ()>,
    source: NodeIndex,
) -> (Vec<f64>, Vec<Vec<NodeIndex>>, Vec<NodeIndex>) {
    let n = pg.node_count();
    let mut sigma = vec![0.0_f64; n];
    let mut dist = vec![-1_i64; n];
    let mut predecessors: Vec<Vec<NodeIndex>> = vec![Vec::new(); n];
    let mut order = Vec::with_capacity(n);

    sigma[source.index()] = 1.0;
    dist[source.index()] = 0;

    let mut queue = VecDeque::new();
    queue.push_back(source);

    while let Some(v) = queue.pop_front() {
        order.push(v);
        let v_idx = v.index();
        let v_dist = dist[v_idx];

        for w in pg.neighbors(v) {
            let w_idx = w.index();

            if dist[w_idx] < 0 {
                dist[w_idx] = v_dist + 1;
                queue.push_back(w);
            }

            if dist[w_idx] == v_dist + 1 {
                sigma[w_idx] += sigma[v_idx];
                predecessors[w_idx].push(v);
            }
        }
    }

    (sigma, predecessors, order)
}
