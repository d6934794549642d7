//! Degree centrality: the simplest centrality measure.
//!
//! # Normalization
//!
//! ```text
//! C_D(v) = deg(v) / (n - 1)
//! ```
//!
//! Where n is the number of nodes. This gives values in [0, 1] for simple graphs.
//!
//! # Limitations
//!
//! - Ignores network structure beyond immediate neighbors
//! - A node with 10 low-degree neighbors ranks same as one with 10 hubs

use crate::{Graph, NodeId};
use std::collections::HashMap;

/// Compute normalized degree centrality for all nodes.
///
/// # Example
///
/// ```
/// use motifrank::Graph;
/// use motifrank::algo::centrality::degree_centrality;
///
/// let g = Graph::from_edges([("A", "B"), ("A", "C")]);
/// let degrees = degree_centrality(&g);
/// assert_eq!(degrees["A"], 1.0);
/// assert_eq!(degrees["B"], 0.5);
/// ```
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn degree_centrality(graph: &Graph) -> HashMap<NodeId, f64> {
    let pg = graph.as_petgraph();
    let n = pg.node_count();
    if n == 0 {
        return HashMap::new();
    }

    let norm_factor = if n > 1 { (n - 1) as f64 } else { 1.0 };

    pg.node_indices()
        .map(|idx| {
            let deg = pg.neighbors(idx).count();
            (pg[idx].clone(), deg as f64 / norm_factor)
        })
        .collect()
}
