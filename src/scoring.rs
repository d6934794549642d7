//! Motif-corrected centrality scores (CDR and CSR).
//!
//! # Definition
//!
//! For node `v` with base score `b(v)`, normalized motif metric `m(v)` and
//! participation count `c_s(v)` in motifs of size `s`:
//!
//! ```text
//! correction(v) = 1 + Σ_s λ_s · c_s(v) / Σ_u c_s(u)
//! raw(v)        = b(v) · m(v)^θ · correction(v)
//! score(v)      = raw(v) / Σ_u raw(u)
//! ```
//!
//! | Variant | `m(v)` |
//! |---------|--------|
//! | CDR | motif degree / total degree |
//! | CSR | motif strength / total strength |
//!
//! Both variants share the base scores and the correction term; they differ
//! only in the metric raised to `θ`. The motif metrics and the per-size totals
//! carry a `1e-10` guard; the final normalization divides by the exact sum and
//! falls back to uniform when every raw score is zero.
//!
//! The motif-derived quantities depend only on the graph and the clique size
//! bound, so they are computed once into a [`MotifProfile`] and reused for
//! every parameter vector scored against the same graph.

use crate::algo::centrality::CentralityKind;
use crate::algo::cliques::maximal_cliques;
use crate::error::{Error, Result};
use crate::motif::{find_motifs_from_cliques, MotifSet, NodeMotifCount};
use crate::params::ParameterVector;
use crate::weighted::WeightedMotifGraph;
use crate::{Graph, NodeId};
use petgraph::graph::NodeIndex;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Denominator guard for the motif metrics and per-size totals.
pub const EPSILON: f64 = 1e-10;

/// Where base scores come from.
#[derive(Debug, Clone)]
pub enum BaseScores {
    /// Run a conventional centrality on the graph.
    Kind(CentralityKind),
    /// Caller-supplied scores; must cover every node.
    Custom(HashMap<NodeId, f64>),
}

impl BaseScores {
    /// Base scores in graph index order.
    ///
    /// # Errors
    ///
    /// `Error::MissingScore` if a custom mapping lacks a graph node.
    pub fn resolve(&self, graph: &Graph) -> Result<Vec<f64>> {
        let computed;
        let map = match self {
            Self::Kind(kind) => {
                computed = kind.compute(graph);
                &computed
            }
            Self::Custom(map) => map,
        };
        graph
            .nodes()
            .map(|id| {
                map.get(id)
                    .copied()
                    .ok_or_else(|| Error::MissingScore(id.clone()))
            })
            .collect()
    }
}

impl Default for BaseScores {
    fn default() -> Self {
        Self::Kind(CentralityKind::Degree)
    }
}

impl From<CentralityKind> for BaseScores {
    fn from(kind: CentralityKind) -> Self {
        Self::Kind(kind)
    }
}

impl From<HashMap<NodeId, f64>> for BaseScores {
    fn from(map: HashMap<NodeId, f64>) -> Self {
        Self::Custom(map)
    }
}

impl FromStr for BaseScores {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        s.parse().map(Self::Kind)
    }
}

/// Which distribution a caller ranks by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RankType {
    /// Motif-degree corrected.
    Cdr,
    /// Motif-strength corrected.
    #[default]
    Csr,
}

impl fmt::Display for RankType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Cdr => "cdr",
            Self::Csr => "csr",
        })
    }
}

impl FromStr for RankType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cdr" => Ok(Self::Cdr),
            "csr" => Ok(Self::Csr),
            _ => Err(Error::InvalidRankType(s.to_string())),
        }
    }
}

/// The two score distributions produced for one parameter vector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScorePair {
    /// Motif-degree corrected scores; sums to 1.
    pub cdr: HashMap<NodeId, f64>,
    /// Motif-strength corrected scores; sums to 1.
    pub csr: HashMap<NodeId, f64>,
}

impl ScorePair {
    /// The distribution selected by `rank_type`.
    pub fn get(&self, rank_type: RankType) -> &HashMap<NodeId, f64> {
        match rank_type {
            RankType::Cdr => &self.cdr,
            RankType::Csr => &self.csr,
        }
    }

    /// Take ownership of the distribution selected by `rank_type`.
    pub fn into_rank(self, rank_type: RankType) -> HashMap<NodeId, f64> {
        match rank_type {
            RankType::Cdr => self.cdr,
            RankType::Csr => self.csr,
        }
    }
}

/// Motif-derived per-node data for one graph and clique size bound.
#[derive(Debug, Clone)]
pub struct MotifProfile {
    fingerprint: u64,
    max_clique: usize,
    motifs: MotifSet,
    weighted: WeightedMotifGraph,
    norm_degree: Vec<f64>,
    norm_strength: Vec<f64>,
    counts: Vec<NodeMotifCount>,
    totals: BTreeMap<usize, usize>,
}

impl MotifProfile {
    /// Enumerate motifs and derive the normalized metrics.
    ///
    /// `max_clique` defaults to the largest clique in `graph`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn new(graph: &Graph, max_clique: Option<usize>) -> Self {
        let cliques = maximal_cliques(graph);
        let max_clique =
            max_clique.unwrap_or_else(|| cliques.iter().map(Vec::len).max().unwrap_or(0));
        let motifs = find_motifs_from_cliques(graph, &cliques, max_clique);
        let weighted = WeightedMotifGraph::build(graph, &motifs);

        let pg = weighted.as_petgraph();
        let degree: Vec<f64> = pg
            .node_indices()
            .map(|idx| weighted.degree(idx) as f64)
            .collect();
        let strength: Vec<f64> = pg
            .node_indices()
            .map(|idx| weighted.strength(idx) as f64)
            .collect();

        let counts = motifs.participation(graph);
        let totals = motifs.totals();

        debug!(
            nodes = graph.node_count(),
            max_clique,
            motifs = motifs.len(),
            "motif profile built"
        );

        Self {
            fingerprint: graph.fingerprint(),
            max_clique,
            motifs,
            weighted,
            norm_degree: normalize_guarded(&degree),
            norm_strength: normalize_guarded(&strength),
            counts,
            totals,
        }
    }

    /// Whether this profile was built from a graph with `graph`'s structure.
    pub fn belongs_to(&self, graph: &Graph) -> bool {
        self.fingerprint == graph.fingerprint()
    }

    /// Clique size bound the motifs were enumerated with.
    pub fn max_clique(&self) -> usize {
        self.max_clique
    }

    /// Enumerated motifs.
    pub fn motifs(&self) -> &MotifSet {
        &self.motifs
    }

    /// Motif-weighted graph.
    pub fn weighted(&self) -> &WeightedMotifGraph {
        &self.weighted
    }

    /// Normalized motif degree, graph index order.
    pub fn norm_degree(&self) -> &[f64] {
        &self.norm_degree
    }

    /// Normalized motif strength, graph index order.
    pub fn norm_strength(&self) -> &[f64] {
        &self.norm_strength
    }

    /// Participation counts of the node at `idx`.
    pub fn counts(&self, idx: NodeIndex) -> &NodeMotifCount {
        &self.counts[idx.index()]
    }

    /// Participation totals per size, summed over nodes.
    pub fn totals(&self) -> &BTreeMap<usize, usize> {
        &self.totals
    }

    /// `1 + Σ_s λ_s · c_s(v) / total_s` for the node at `idx`.
    #[allow(clippy::cast_precision_loss)]
    pub fn correction(&self, idx: NodeIndex, params: &ParameterVector) -> f64 {
        let counts = &self.counts[idx.index()];
        1.0 + counts
            .iter()
            .map(|(size, &count)| {
                let total = self.totals.get(size).copied().unwrap_or(0);
                let total = if total == 0 { EPSILON } else { total as f64 };
                params.lambda(*size) * count as f64 / total
            })
            .sum::<f64>()
    }

    fn metric(&self, rank_type: RankType) -> &[f64] {
        match rank_type {
            RankType::Cdr => &self.norm_degree,
            RankType::Csr => &self.norm_strength,
        }
    }
}

/// Scores one graph under many parameter vectors.
///
/// Base scores and the motif profile are resolved once at construction.
///
/// # Example
///
/// ```
/// use motifrank::{CentralityKind, CentralityScorer, Graph, ParameterVector};
///
/// let g = Graph::from_edges([("1", "2"), ("1", "3"), ("2", "3"), ("3", "4")]);
/// let scorer = CentralityScorer::new(&g, &CentralityKind::Degree.into(), None).unwrap();
/// let scores = scorer.score(&ParameterVector::uniform(scorer.max_clique()));
///
/// let total: f64 = scores.csr.values().sum();
/// assert!((total - 1.0).abs() < 1e-6);
/// assert!(scores.csr["3"] > scores.csr["4"]);
/// ```
#[derive(Debug, Clone)]
pub struct CentralityScorer<'g> {
    graph: &'g Graph,
    base: Vec<f64>,
    profile: MotifProfile,
}

impl<'g> CentralityScorer<'g> {
    /// Resolve base scores and build the motif profile.
    ///
    /// # Errors
    ///
    /// `Error::MissingScore` if custom base scores do not cover every node.
    pub fn new(graph: &'g Graph, base: &BaseScores, max_clique: Option<usize>) -> Result<Self> {
        let base = base.resolve(graph)?;
        Ok(Self {
            graph,
            base,
            profile: MotifProfile::new(graph, max_clique),
        })
    }

    /// Reuse a profile built earlier for the same graph.
    ///
    /// # Errors
    ///
    /// `Error::InvalidParameter` if `profile` was built from a different graph,
    /// `Error::MissingScore` as for [`new`](Self::new).
    pub fn with_profile(graph: &'g Graph, base: &BaseScores, profile: MotifProfile) -> Result<Self> {
        if !profile.belongs_to(graph) {
            return Err(Error::InvalidParameter(
                "motif profile was built for a different graph".to_string(),
            ));
        }
        Ok(Self {
            graph,
            base: base.resolve(graph)?,
            profile,
        })
    }

    /// Clique size bound in use.
    pub fn max_clique(&self) -> usize {
        self.profile.max_clique()
    }

    /// The shared motif profile.
    pub fn profile(&self) -> &MotifProfile {
        &self.profile
    }

    /// Both distributions for `params`.
    #[must_use]
    pub fn score(&self, params: &ParameterVector) -> ScorePair {
        ScorePair {
            cdr: self.score_rank(params, RankType::Cdr),
            csr: self.score_rank(params, RankType::Csr),
        }
    }

    /// One distribution for `params`.
    #[must_use]
    pub fn score_rank(&self, params: &ParameterVector, rank_type: RankType) -> HashMap<NodeId, f64> {
        let metric = self.profile.metric(rank_type);
        let raw: Vec<f64> = (0..self.graph.node_count())
            .into_par_iter()
            .map(|i| {
                let idx = NodeIndex::new(i);
                self.base[i] * base_effect(metric[i], params.theta) * self.profile.correction(idx, params)
            })
            .collect();

        self.graph
            .nodes()
            .cloned()
            .zip(normalize_scores(&raw))
            .collect()
    }

    /// The correction term of one node.
    ///
    /// # Errors
    ///
    /// `Error::UnknownNode` if `node` is not in the graph.
    pub fn high_order_correction(&self, node: &str, params: &ParameterVector) -> Result<f64> {
        let idx = self
            .graph
            .index_of(node)
            .ok_or_else(|| Error::UnknownNode(node.to_string()))?;
        Ok(self.profile.correction(idx, params))
    }
}

/// Score `graph` once.
///
/// `max_clique` defaults to the largest clique and `params` to
/// [`ParameterVector::uniform`].
///
/// # Errors
///
/// `Error::MissingScore` if custom base scores do not cover every node.
pub fn score(
    graph: &Graph,
    base: &BaseScores,
    max_clique: Option<usize>,
    params: Option<&ParameterVector>,
) -> Result<ScorePair> {
    let scorer = CentralityScorer::new(graph, base, max_clique)?;
    Ok(match params {
        Some(p) => scorer.score(p),
        None => scorer.score(&ParameterVector::uniform(scorer.max_clique())),
    })
}

/// `metric^theta`. `theta = 0` yields 1 for any metric, zero included.
#[inline]
pub fn base_effect(metric: f64, theta: f64) -> f64 {
    metric.powf(theta)
}

fn normalize_guarded(values: &[f64]) -> Vec<f64> {
    let total = values.iter().sum::<f64>() + EPSILON;
    values.iter().map(|v| v / total).collect()
}

/// Normalize to a distribution; all-zero input becomes uniform.
///
/// A positive sum is divided out exactly, so the result sums to 1 whatever
/// the magnitude of the raw scores.
#[allow(clippy::cast_precision_loss)]
fn normalize_scores(raw: &[f64]) -> Vec<f64> {
    let sum: f64 = raw.iter().sum();
    if sum > 0.0 {
        raw.iter().map(|v| v / sum).collect()
    } else {
        let n = raw.len().max(1) as f64;
        vec![1.0 / n; raw.len()]
    }
}
