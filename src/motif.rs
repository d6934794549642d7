//! Clique motif enumeration.
//!
//! A motif here is a clique of three or more nodes. For every size `s` in
//! `3..=max_size`, every `s`-subset of every maximal clique large enough to
//! hold it is collected, canonicalized as a sorted tuple, and deduplicated
//! (overlapping maximal cliques share sub-cliques).
//!
//! # Cost
//!
//! Enumeration is combinatorial: a maximal clique of size `k` contributes
//! `C(k, s)` subsets at size `s`, so a single 20-clique already yields
//! 184,756 motifs at `s = 10`. Callers scoring the same graph repeatedly
//! should enumerate once and reuse the result (see
//! [`MotifProfile`](crate::scoring::MotifProfile)).
//!
//! Sizes are processed in parallel with rayon; results are collected into
//! ordered sets so the output never depends on scheduling.

use crate::algo::cliques::{adjacency_sets, maximal_cliques};
use crate::{Graph, NodeId};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::fmt;
use tracing::debug;

/// Smallest clique size treated as a motif.
pub const MIN_MOTIF_SIZE: usize = 3;

/// Count of motifs containing a node, keyed by clique size.
pub type NodeMotifCount = BTreeMap<usize, usize>;

/// A clique motif: distinct node ids in ascending order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Motif(Vec<NodeId>);

impl Motif {
    /// Canonicalize a set of node ids by sorting.
    pub fn new<I, S>(nodes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<NodeId>,
    {
        let mut nodes: Vec<NodeId> = nodes.into_iter().map(Into::into).collect();
        nodes.sort();
        nodes.dedup();
        Self(nodes)
    }

    fn from_indices(graph: &Graph, indices: &[usize]) -> Self {
        Self::new(
            indices
                .iter()
                .map(|&i| graph.node_id(petgraph::graph::NodeIndex::new(i)).clone()),
        )
    }

    /// Number of nodes.
    pub fn size(&self) -> usize {
        self.0.len()
    }

    /// Node ids in canonical order.
    pub fn nodes(&self) -> &[NodeId] {
        &self.0
    }

    /// Whether the motif contains `id`.
    pub fn contains(&self, id: &str) -> bool {
        self.0.binary_search_by(|n| n.as_str().cmp(id)).is_ok()
    }

    /// All unordered node pairs, i.e. the edges the motif covers.
    pub fn pairs(&self) -> impl Iterator<Item = (&NodeId, &NodeId)> {
        self.0
            .iter()
            .enumerate()
            .flat_map(move |(i, a)| self.0[i + 1..].iter().map(move |b| (a, b)))
    }
}

impl fmt::Display for Motif {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})", self.0.join(", "))
    }
}

/// Deduplicated motifs grouped by size. Only sizes with at least one motif are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MotifSet {
    by_size: BTreeMap<usize, BTreeSet<Motif>>,
}

impl MotifSet {
    /// Total number of motifs across sizes.
    pub fn len(&self) -> usize {
        self.by_size.values().map(BTreeSet::len).sum()
    }

    /// Whether no motif of any size was found.
    pub fn is_empty(&self) -> bool {
        self.by_size.is_empty()
    }

    /// Distinct sizes present, ascending.
    pub fn sizes(&self) -> impl Iterator<Item = usize> + '_ {
        self.by_size.keys().copied()
    }

    /// Motifs of one size, in canonical order.
    pub fn of_size(&self, size: usize) -> impl Iterator<Item = &Motif> {
        self.by_size.get(&size).into_iter().flatten()
    }

    /// All motifs, by size then canonical order.
    pub fn iter(&self) -> impl Iterator<Item = &Motif> {
        self.by_size.values().flatten()
    }

    /// Whether the exact motif is present.
    pub fn contains(&self, motif: &Motif) -> bool {
        self.by_size
            .get(&motif.size())
            .is_some_and(|set| set.contains(motif))
    }

    /// Per-node participation counts, indexed like the graph's nodes.
    ///
    /// Every node gets an entry for every size present, zero included.
    pub fn participation(&self, graph: &Graph) -> Vec<NodeMotifCount> {
        let empty: NodeMotifCount = self.sizes().map(|s| (s, 0)).collect();
        let mut counts = vec![empty; graph.node_count()];
        for motif in self.iter() {
            for id in motif.nodes() {
                if let Some(idx) = graph.index_of(id) {
                    *counts[idx.index()].entry(motif.size()).or_insert(0) += 1;
                }
            }
        }
        counts
    }

    /// Node-participation totals per size: `size × (number of motifs of that size)`.
    pub fn totals(&self) -> BTreeMap<usize, usize> {
        self.by_size
            .iter()
            .map(|(&size, set)| (size, size * set.len()))
            .collect()
    }
}

/// Find all clique motifs of sizes `3..=max_size`.
///
/// `max_size` defaults to the size of the largest clique in `graph`. Returns an
/// empty set when the graph holds no triangle.
///
/// # Example
///
/// ```
/// use motifrank::Graph;
/// use motifrank::motif::{find_motifs, Motif};
///
/// let g = Graph::from_edges([("1", "2"), ("1", "3"), ("2", "3"), ("3", "4")]);
/// let motifs = find_motifs(&g, None);
/// assert_eq!(motifs.len(), 1);
/// assert!(motifs.contains(&Motif::new(["1", "2", "3"])));
/// ```
#[must_use]
pub fn find_motifs(graph: &Graph, max_size: Option<usize>) -> MotifSet {
    let cliques = maximal_cliques(graph);
    let max_size =
        max_size.unwrap_or_else(|| cliques.iter().map(Vec::len).max().unwrap_or(0));
    find_motifs_from_cliques(graph, &cliques, max_size)
}

/// Motifs of sizes `3..=max_size` drawn from already enumerated maximal cliques.
pub(crate) fn find_motifs_from_cliques(
    graph: &Graph,
    cliques: &[Vec<usize>],
    max_size: usize,
) -> MotifSet {
    if max_size < MIN_MOTIF_SIZE {
        return MotifSet::default();
    }

    let adj = adjacency_sets(graph);
    let by_size: BTreeMap<usize, BTreeSet<Motif>> = (MIN_MOTIF_SIZE..=max_size)
        .into_par_iter()
        .map(|size| {
            let mut found = BTreeSet::new();
            for clique in cliques.iter().filter(|c| c.len() >= size) {
                for_each_combination(clique, size, |subset| {
                    if is_clique_indices(&adj, subset) {
                        found.insert(Motif::from_indices(graph, subset));
                    }
                });
            }
            (size, found)
        })
        .filter(|(_, found)| !found.is_empty())
        .collect();

    let set = MotifSet { by_size };
    debug!(
        max_size,
        maximal_cliques = cliques.len(),
        motifs = set.len(),
        "motif enumeration finished"
    );
    set
}

/// Whether every pair of `nodes` is adjacent in `graph`.
///
/// Sets with fewer than two nodes, or containing unknown nodes, are not cliques.
pub fn is_clique(graph: &Graph, nodes: &[&str]) -> bool {
    if nodes.len() < 2 {
        return false;
    }
    nodes.iter().enumerate().all(|(i, a)| {
        nodes[i + 1..].iter().all(|b| graph.has_edge(a, b))
    })
}

fn is_clique_indices(adj: &[HashSet<usize>], nodes: &[usize]) -> bool {
    nodes
        .iter()
        .enumerate()
        .all(|(i, a)| nodes[i + 1..].iter().all(|b| adj[*a].contains(b)))
}

/// Call `f` with every `k`-subset of `items`, in lexicographic index order.
fn for_each_combination(items: &[usize], k: usize, mut f: impl FnMut(&[usize])) {
    let n = items.len();
    if k == 0 || k > n {
        return;
    }
    let mut idx: Vec<usize> = (0..k).collect();
    let mut buf: Vec<usize> = idx.iter().map(|&i| items[i]).collect();
    loop {
        f(&buf);
        let Some(i) = (0..k).rev().find(|&i| idx[i] != i + n - k) else {
            return;
        };
        idx[i] += 1;
        for j in i + 1..k {
            idx[j] = idx[j - 1] + 1;
        }
        for j in i..k {
            buf[j] = items[idx[j]];
        }
    }
}
