//! Motif-aware centrality ranking with tuned higher-order corrections.
//!
//! A conventional centrality (degree, betweenness, closeness, eigenvector,
//! PageRank) is multiplied by a normalized motif metric raised to `theta` and
//! by a per-size clique participation correction weighted by `lambda[s]`. Two
//! distributions come out: CDR (motif degree) and CSR (motif strength). The
//! parameters can be tuned against known key nodes with a sequential
//! black-box search.
//!
//! # Example
//!
//! ```rust
//! use motifrank::{score, BaseScores, CentralityKind, Graph};
//!
//! let g = Graph::from_edges([("1", "2"), ("1", "3"), ("2", "3"), ("3", "4")]);
//! let scores = score(&g, &BaseScores::Kind(CentralityKind::Degree), None, None).unwrap();
//!
//! // Node 3 sits in the triangle and bridges to 4.
//! assert!(scores.cdr["3"] > scores.cdr["1"]);
//! assert!(scores.cdr["1"] > scores.cdr["4"]);
//! ```
//!
//! # Tuning
//!
//! ```rust,no_run
//! use motifrank::optimize::{OptimizerConfig, ParameterOptimizer};
//! use motifrank::{io, score, BaseScores};
//!
//! let g = io::read_edgelist("ppi.edgelist")?;
//! let key = io::read_node_list("essential.txt")?;
//! let base = BaseScores::default();
//!
//! let mut optimizer = ParameterOptimizer::new(OptimizerConfig::default());
//! let outcome = optimizer.optimize(&g, &base, &key, None)?;
//! let tuned = score(&g, &base, None, Some(&outcome.best_params))?;
//! io::save_scores(&tuned.csr, "csr.json")?;
//! # Ok::<(), motifrank::Error>(())
//! ```
//!
//! # Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`graph`] | undirected graph over string ids |
//! | [`algo`] | conventional centralities, maximal cliques |
//! | [`motif`] | clique motif enumeration |
//! | [`weighted`] | motif-weighted graph |
//! | [`params`], [`scoring`] | parameters, CDR / CSR |
//! | [`evaluate`] | AUC, AP, F1 against labels |
//! | [`optimize`] | sequential parameter search |
//! | [`stats`] | top-N classification indices |
//! | [`io`] | edge lists, node lists, score files |
//! | [`generate`] | synthetic fitness networks |

pub mod algo;
pub mod error;
pub mod evaluate;
pub mod generate;
pub mod graph;
pub mod io;
pub mod motif;
pub mod optimize;
pub mod params;
pub mod scoring;
pub mod stats;
pub mod weighted;

pub use algo::centrality::CentralityKind;
pub use error::{Error, Result};
pub use evaluate::{evaluate, Metric};
pub use graph::{Graph, GraphStats, NodeId};
pub use motif::{find_motifs, Motif, MotifSet, NodeMotifCount};
pub use optimize::{OptimizationOutcome, OptimizerConfig, ParameterOptimizer};
pub use params::ParameterVector;
pub use scoring::{score, BaseScores, CentralityScorer, MotifProfile, RankType, ScorePair};
pub use weighted::WeightedMotifGraph;

// Re-export petgraph for advanced graph operations
pub use petgraph;
