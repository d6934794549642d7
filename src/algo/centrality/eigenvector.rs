//! Eigenvector centrality: importance via important neighbors.
//!
//! # Definition
//!
//! ```text
//! x_v = (1/λ) × Σ_{u~v} x_u
//! ```
//!
//! Equivalently: Ax = λx, where A is the adjacency matrix and λ is
//! the largest eigenvalue (spectral radius).
//!
//! # Algorithm: Power Iteration on (A + I)
//!
//! 1. Initialize x uniformly
//! 2. Repeat: x' = (A + I) × x, then normalize x' = x' / ||x'||
//! 3. Stop when Σ|x' - x| < n × tolerance
//!
//! The identity shift has the same dominant eigenvector as A but removes the
//! oscillation power iteration shows on bipartite graphs.
//!
//! # References
//!
//! - Bonacich (1972). "Factoring and weighting approaches to status scores"
//! - Bonacich (1987). "Power and centrality: A family of measures"

use crate::{Graph, NodeId};
use std::collections::HashMap;
use tracing::warn;

/// Configuration for eigenvector centrality.
#[derive(Debug, Clone, Copy)]
pub struct EigenvectorConfig {
    /// Maximum iterations before stopping.
    pub max_iterations: usize,
    /// Per-node convergence tolerance (L1 norm of change divided by n).
    pub tolerance: f64,
}

impl Default for EigenvectorConfig {
    fn default() -> Self {
        Self {
            max_iterations: 100,
            tolerance: 1e-6,
        }
    }
}

/// Compute eigenvector centrality via power iteration.
///
/// If the iteration budget runs out the last iterate is returned and a
/// warning is logged.
///
/// # Example
///
/// ```
/// use motifrank::Graph;
/// use motifrank::algo::centrality::{eigenvector_centrality, EigenvectorConfig};
///
/// let g = Graph::from_edges([("A", "B"), ("B", "C"), ("C", "A")]);
/// let scores = eigenvector_centrality(&g, EigenvectorConfig::default());
/// assert!((scores["A"] - scores["B"]).abs() < 1e-9);
/// ```
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn eigenvector_centrality(graph: &Graph, config: EigenvectorConfig) -> HashMap<NodeId, f64> {
    let pg = graph.as_petgraph();
    let n = pg.node_count();
    if n == 0 {
        return HashMap::new();
    }

    let mut scores = vec![1.0 / n as f64; n];
    let mut new_scores = vec![0.0; n];
    let mut converged = false;

    for _iter in 0..config.max_iterations {
        new_scores.copy_from_slice(&scores);
        for idx in pg.node_indices() {
            let x = scores[idx.index()];
            for nbr in pg.neighbors(idx) {
                new_scores[nbr.index()] += x;
            }
        }

        let norm: f64 = new_scores.iter().map(|x| x * x).sum::<f64>().sqrt();
        let norm = if norm > 0.0 { norm } else { 1.0 };
        for s in &mut new_scores {
            *s /= norm;
        }

        let diff: f64 = scores
            .iter()
            .zip(new_scores.iter())
            .map(|(old, new)| (old - new).abs())
            .sum();

        std::mem::swap(&mut scores, &mut new_scores);

        if diff < n as f64 * config.tolerance {
            converged = true;
            break;
        }
    }

    if !converged {
        warn!(
            max_iterations = config.max_iterations,
            "eigenvector centrality did not converge; returning last iterate"
        );
    }

    pg.node_indices()
        .map(|idx| (pg[idx].clone(), scores[idx.index()]))
        .collect()
}
