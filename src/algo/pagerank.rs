//! `PageRank` centrality algorithm.
//!
//! Computes the importance of nodes based on link structure. On an undirected
//! graph every edge is followed in both directions. Higher scores indicate more
//! "important" nodes.

use crate::{Graph, NodeId};
use std::collections::HashMap;
use tracing::warn;

/// `PageRank` configuration.
#[derive(Debug, Clone, Copy)]
pub struct PageRankConfig {
    /// Damping factor (probability of following a link vs teleporting).
    /// Typically 0.85.
    pub damping_factor: f64,
    /// Maximum iterations before stopping.
    pub max_iterations: usize,
    /// Per-node convergence tolerance (L1 norm of score changes divided by n).
    pub tolerance: f64,
}

impl Default for PageRankConfig {
    fn default() -> Self {
        Self {
            damping_factor: 0.85,
            max_iterations: 100,
            tolerance: 1e-6,
        }
    }
}

/// Compute `PageRank` for all nodes via power iteration.
///
/// Returns a map of node id -> score, where scores sum to 1.0. Mass held by
/// isolated (dangling) nodes is redistributed uniformly.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn pagerank(graph: &Graph, config: PageRankConfig) -> HashMap<NodeId, f64> {
    let pg = graph.as_petgraph();
    let n = pg.node_count();
    if n == 0 {
        return HashMap::new();
    }

    let d = config.damping_factor;
    let uniform = 1.0 / n as f64;
    let degree: Vec<usize> = pg.node_indices().map(|idx| pg.neighbors(idx).count()).collect();

    let mut scores = vec![uniform; n];
    let mut next = vec![0.0_f64; n];
    let mut converged = false;

    for _ in 0..config.max_iterations {
        let dangling: f64 = pg
            .node_indices()
            .filter(|idx| degree[idx.index()] == 0)
            .map(|idx| scores[idx.index()])
            .sum();
        next.fill((1.0 - d) * uniform + d * dangling * uniform);

        for u in pg.node_indices() {
            let deg = degree[u.index()];
            if deg == 0 {
                continue;
            }
            let share = d * scores[u.index()] / deg as f64;
            for v in pg.neighbors(u) {
                next[v.index()] += share;
            }
        }

        let diff: f64 = scores
            .iter()
            .zip(next.iter())
            .map(|(a, b)| (a - b).abs())
            .sum();

        std::mem::swap(&mut scores, &mut next);

        if diff < n as f64 * config.tolerance {
            converged = true;
            break;
        }
    }

    if !converged {
        warn!(
            max_iterations = config.max_iterations,
            "pagerank did not converge; returning last iterate"
        );
    }

    pg.node_indices()
        .map(|idx| (pg[idx].clone(), scores[idx.index()]))
        .collect()
}
