//! Error types for motifrank.

use thiserror::Error;

/// Errors surfaced by scoring, evaluation, optimization and I/O.
///
/// Structural input problems (unknown tags, missing entries) abort the current
/// operation. Degenerate statistical conditions are never errors: they are
/// absorbed with a fallback value where they occur.
#[derive(Error, Debug)]
pub enum Error {
    /// Base-score tag is not one of the known centrality algorithms.
    #[error("invalid base score kind '{0}': expected one of dc, bc, cc, ec, pr")]
    InvalidBaseScoreKind(String),

    /// A graph node has no entry in a caller-supplied base-score mapping.
    #[error("missing base score for node '{0}'")]
    MissingScore(String),

    /// Ranking metric tag is not recognized.
    #[error("invalid metric '{0}': expected one of auc, ap, f1")]
    InvalidMetric(String),

    /// Rank type tag is neither `cdr` nor `csr`.
    #[error("invalid rank type '{0}': expected cdr or csr")]
    InvalidRankType(String),

    /// Parameter vector outside its declared bounds.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Node id not present in the graph.
    #[error("unknown node: {0}")]
    UnknownNode(String),

    /// Key and non-key label sets share nodes.
    #[error("{count} node(s) labelled both key and non-key, e.g. '{example}'")]
    OverlappingLabels {
        /// Number of overlapping nodes.
        count: usize,
        /// One overlapping node, for the message.
        example: String,
    },

    /// Malformed line in a text input.
    #[error("parse error at line {line}: {message}")]
    Parse {
        /// 1-based line number.
        line: usize,
        /// What was wrong.
        message: String,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for motifrank operations.
pub type Result<T> = std::result::Result<T, Error>;
