//! Centrality algorithms for measuring node importance.
//!
//! These are the conventional, single-node measures that motif-aware scoring
//! uses as its multiplicative base.
//!
//! | Algorithm | Question Answered | Complexity |
//! |-----------|-------------------|------------|
//! | Degree | How many connections? | O(V) |
//! | Betweenness | How often on shortest paths? | O(VE) |
//! | Closeness | How close to all others? | O(VE) |
//! | Eigenvector | Connected to important nodes? | O(E × iterations) |
//! | PageRank | Where do random walks end? | O(E × iterations) |
//!
//! All graphs here are undirected.
//!
//! # References
//!
//! - Freeman (1977). "A set of measures of centrality based on betweenness"
//! - Bonacich (1987). "Power and centrality"
//! - Brandes (2001). "A faster algorithm for betweenness centrality"
//! - Wasserman & Faust (1994). "Social Network Analysis"

mod betweenness;
mod closeness;
mod degree;
mod eigenvector;

pub use betweenness::{betweenness_centrality, BetweennessConfig};
pub use closeness::{closeness_centrality, ClosenessConfig};
pub use degree::degree_centrality;
pub use eigenvector::{eigenvector_centrality, EigenvectorConfig};

use crate::algo::pagerank::{pagerank, PageRankConfig};
use crate::{Error, Graph, NodeId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// The conventional centrality measures usable as base scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CentralityKind {
    /// Normalized degree (`dc`).
    Degree,
    /// Brandes betweenness (`bc`).
    Betweenness,
    /// Wasserman-Faust closeness (`cc`).
    Closeness,
    /// Eigenvector centrality (`ec`).
    Eigenvector,
    /// PageRank (`pr`).
    #[serde(rename = "pagerank")]
    PageRank,
}

impl CentralityKind {
    /// All kinds, in tag order.
    pub const ALL: [CentralityKind; 5] = [
        Self::Degree,
        Self::Betweenness,
        Self::Closeness,
        Self::Eigenvector,
        Self::PageRank,
    ];

    /// Short tag.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Degree => "dc",
            Self::Betweenness => "bc",
            Self::Closeness => "cc",
            Self::Eigenvector => "ec",
            Self::PageRank => "pr",
        }
    }

    /// Run the algorithm with its default configuration.
    #[must_use]
    pub fn compute(self, graph: &Graph) -> HashMap<NodeId, f64> {
        match self {
            Self::Degree => degree_centrality(graph),
            Self::Betweenness => betweenness_centrality(graph, BetweennessConfig::default()),
            Self::Closeness => closeness_centrality(graph, ClosenessConfig::default()),
            Self::Eigenvector => eigenvector_centrality(graph, EigenvectorConfig::default()),
            Self::PageRank => pagerank(graph, PageRankConfig::default()),
        }
    }
}

impl fmt::Display for CentralityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for CentralityKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dc" | "degree" => Ok(Self::Degree),
            "bc" | "betweenness" => Ok(Self::Betweenness),
            "cc" | "closeness" => Ok(Self::Closeness),
            "ec" | "eigenvector" => Ok(Self::Eigenvector),
            "pr" | "pagerank" => Ok(Self::PageRank),
            _ => Err(Error::InvalidBaseScoreKind(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tags() {
        for kind in CentralityKind::ALL {
            assert_eq!(kind.tag().parse::<CentralityKind>().unwrap(), kind);
        }
        assert_eq!(
            "PageRank".parse::<CentralityKind>().unwrap(),
            CentralityKind::PageRank
        );
        assert!(matches!(
            "katz".parse::<CentralityKind>(),
            Err(Error::InvalidBaseScoreKind(tag)) if tag == "katz"
        ));
    }

    #[test]
    fn test_every_kind_covers_every_node() {
        let mut g = Graph::from_edges([("a", "b"), ("b", "c"), ("c", "a"), ("c", "d")]);
        g.add_node("e");
        for kind in CentralityKind::ALL {
            let scores = kind.compute(&g);
            assert_eq!(scores.len(), 5, "{kind} dropped nodes");
            assert!(scores.values().all(|s| s.is_finite() && *s >= 0.0));
        }
    }
}
