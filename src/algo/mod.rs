//! Graph algorithms: conventional centralities, PageRank, and clique search.

pub mod centrality;
pub mod cliques;
pub mod pagerank;
