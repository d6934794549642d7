//! Synthetic scale-free networks with known key nodes.
//!
//! Each node gets an intrinsic fitness `q`, drawn log-normal (μ = −1, σ = 0.8)
//! and rescaled to [0.1, 1.0]. Growth starts from a complete seed graph; each
//! new node attaches `links_per_node` edges to distinct existing nodes with
//! probability ∝ `q(j)·(deg(j) + 1)`. Random extra edges are then accepted with
//! probability `p_ij / max_p`, `p_ij = q(i)(deg(i)+1) · q(j)(deg(j)+1)`, until
//! the mean degree reaches `avg_degree`. `max_p` is refreshed every 100 edges.
//!
//! The highest-fitness nodes serve as ground-truth key nodes.

use crate::error::{Error, Result};
use crate::{Graph, NodeId};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, LogNormal};
use std::cmp::Ordering;
use std::collections::HashMap;
use tracing::{debug, info};

/// Generator settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitnessNetworkConfig {
    /// Total number of nodes.
    pub nodes: usize,
    /// Target mean degree.
    pub avg_degree: usize,
    /// Size of the complete seed graph.
    pub initial_nodes: usize,
    /// Edges added by each arriving node.
    pub links_per_node: usize,
    /// RNG seed; `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for FitnessNetworkConfig {
    fn default() -> Self {
        Self {
            nodes: 1000,
            avg_degree: 10,
            initial_nodes: 5,
            links_per_node: 2,
            seed: None,
        }
    }
}

/// A generated graph and the fitness of each node. Node `i` has id `i.to_string()`.
#[derive(Debug, Clone)]
pub struct FitnessNetwork {
    /// The graph.
    pub graph: Graph,
    /// Fitness by node number.
    pub fitness: Vec<f64>,
}

impl FitnessNetwork {
    /// Fitness keyed by node id.
    pub fn fitness_map(&self) -> HashMap<NodeId, f64> {
        self.fitness
            .iter()
            .enumerate()
            .map(|(i, &q)| (i.to_string(), q))
            .collect()
    }

    /// The `top_n` highest-fitness node ids.
    pub fn key_nodes(&self, top_n: usize) -> Vec<NodeId> {
        key_nodes_by_fitness(&self.fitness, top_n)
    }
}

const LOGNORMAL_MU: f64 = -1.0;
const LOGNORMAL_SIGMA: f64 = 0.8;
const MAX_P_REFRESH: usize = 100;

/// Generate a fitness-driven preferential-attachment network.
///
/// # Errors
///
/// `Error::InvalidParameter` if `initial_nodes` is 0, smaller than
/// `links_per_node`, or larger than `nodes`.
#[allow(clippy::cast_precision_loss)]
pub fn generate(config: &FitnessNetworkConfig) -> Result<FitnessNetwork> {
    let n = config.nodes;
    let m0 = config.initial_nodes;
    let m = config.links_per_node;
    if m0 == 0 || m0 < m || m0 > n {
        return Err(Error::InvalidParameter(format!(
            "need 0 < links_per_node ({m}) <= initial_nodes ({m0}) <= nodes ({n})"
        )));
    }

    let mut rng = config
        .seed
        .map_or_else(ChaCha8Rng::from_entropy, ChaCha8Rng::seed_from_u64);
    let fitness = draw_fitness(n, &mut rng)?;

    let mut graph = Graph::with_capacity(n, n * config.avg_degree / 2);
    for i in 0..n {
        graph.add_node(i.to_string());
    }
    let mut degree = vec![0_usize; n];
    let connect = |graph: &mut Graph, degree: &mut [usize], i: usize, j: usize| -> bool {
        let added = graph.add_edge(i.to_string(), j.to_string());
        if added {
            degree[i] += 1;
            degree[j] += 1;
        }
        added
    };

    for i in 0..m0 {
        for j in i + 1..m0 {
            connect(&mut graph, &mut degree, i, j);
        }
    }

    let attractiveness = |q: &[f64], degree: &[usize], j: usize| q[j] * (degree[j] + 1) as f64;

    for i in m0..n {
        let existing: Vec<usize> = (0..i).collect();
        let targets: Vec<usize> = existing
            .choose_multiple_weighted(&mut rng, m, |&j| attractiveness(&fitness, &degree, j))
            .map_err(|e| Error::InvalidParameter(format!("attachment weights: {e}")))?
            .copied()
            .collect();
        for j in targets {
            connect(&mut graph, &mut degree, i, j);
        }
    }
    debug!(edges = graph.edge_count(), "growth phase finished");

    let max_edges = n * n.saturating_sub(1) / 2;
    let target_edges = (n * config.avg_degree / 2).min(max_edges);
    let max_q = fitness.iter().copied().fold(0.0, f64::max);
    let max_p = |degree: &[usize]| {
        let max_deg = degree.iter().copied().max().unwrap_or(0);
        (max_q * (max_deg + 1) as f64).powi(2)
    };
    let mut p_max = max_p(&degree);

    while graph.edge_count() < target_edges {
        let i = rng.gen_range(0..n);
        let j = rng.gen_range(0..n);
        if i == j || graph.has_edge(&i.to_string(), &j.to_string()) {
            continue;
        }
        let p = attractiveness(&fitness, &degree, i) * attractiveness(&fitness, &degree, j);
        if rng.gen::<f64>() < p / p_max && connect(&mut graph, &mut degree, i, j)
            && graph.edge_count() % MAX_P_REFRESH == 0
        {
            p_max = max_p(&degree);
        }
    }

    info!(
        nodes = n,
        edges = graph.edge_count(),
        avg_degree = 2.0 * graph.edge_count() as f64 / n as f64,
        "fitness network generated"
    );

    Ok(FitnessNetwork { graph, fitness })
}

/// Node ids ordered by descending fitness, first `top_n`. Ties keep the lower node number first.
pub fn key_nodes_by_fitness(fitness: &[f64], top_n: usize) -> Vec<NodeId> {
    let mut order: Vec<usize> = (0..fitness.len()).collect();
    order.sort_by(|&a, &b| fitness[b].partial_cmp(&fitness[a]).unwrap_or(Ordering::Equal));
    order.into_iter().take(top_n).map(|i| i.to_string()).collect()
}

/// Log-normal draws min-max rescaled to [0.1, 1.0].
fn draw_fitness(n: usize, rng: &mut ChaCha8Rng) -> Result<Vec<f64>> {
    let dist = LogNormal::new(LOGNORMAL_MU, LOGNORMAL_SIGMA)
        .map_err(|e| Error::InvalidParameter(format!("log-normal: {e}")))?;
    let raw: Vec<f64> = (0..n).map(|_| dist.sample(rng)).collect();
    let lo = raw.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = raw.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = hi - lo;
    Ok(raw
        .into_iter()
        .map(|q| if range > 0.0 { (q - lo) / range * 0.9 + 0.1 } else { 1.0 })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small(seed: u64) -> FitnessNetworkConfig {
        FitnessNetworkConfig {
            nodes: 200,
            avg_degree: 6,
            seed: Some(seed),
            ..Default::default()
        }
    }

    #[test]
    fn test_edge_target_reached() {
        let net = generate(&small(1)).unwrap();
        assert_eq!(net.graph.node_count(), 200);
        assert_eq!(net.graph.edge_count(), 600);
    }

    #[test]
    fn test_fitness_range() {
        let net = generate(&small(2)).unwrap();
        let min = net.fitness.iter().copied().fold(f64::INFINITY, f64::min);
        let max = net.fitness.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        assert!((min - 0.1).abs() < 1e-12);
        assert!((max - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_seed_reproducible() {
        let a = generate(&small(9)).unwrap();
        let b = generate(&small(9)).unwrap();
        assert_eq!(a.fitness, b.fitness);
        assert_eq!(a.graph.fingerprint(), b.graph.fingerprint());
    }

    #[test]
    fn test_seed_graph_is_complete() {
        let net = generate(&small(4)).unwrap();
        for i in 0..5 {
            for j in i + 1..5 {
                assert!(net.graph.has_edge(&i.to_string(), &j.to_string()));
            }
        }
    }

    #[test]
    fn test_key_nodes_by_fitness() {
        let keys = key_nodes_by_fitness(&[0.2, 0.9, 0.5, 0.9], 3);
        assert_eq!(keys, vec!["1", "3", "2"]);
    }

    #[test]
    fn test_invalid_config() {
        let config = FitnessNetworkConfig {
            initial_nodes: 1,
            ..small(0)
        };
        assert!(matches!(generate(&config), Err(Error::InvalidParameter(_))));
    }
}
