//! Ranking quality against labelled key / non-key nodes.
//!
//! | Metric | Meaning | Single-class fallback |
//! |--------|---------|-----------------------|
//! | `auc` | area under the ROC curve (Mann-Whitney U) | 0.5 |
//! | `ap` | average precision, step-wise over distinct thresholds | 0.0 |
//! | `f1` | F1 at a threshold, or the best F1 over every observed score | 0.0 |
//!
//! Nodes labelled but absent from the score map count as score 0. A node is
//! predicted positive when its score is `>=` the threshold.

use crate::error::{Error, Result};
use crate::{Graph, NodeId};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

/// Ranking-quality metric.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    /// ROC AUC.
    Auc,
    /// Average precision.
    #[default]
    Ap,
    /// F1 score.
    F1,
}

impl Metric {
    /// Value returned when the labels hold fewer than two classes.
    pub fn fallback(self) -> f64 {
        match self {
            Self::Auc => 0.5,
            Self::Ap | Self::F1 => 0.0,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Auc => "auc",
            Self::Ap => "ap",
            Self::F1 => "f1",
        })
    }
}

impl FromStr for Metric {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auc" => Ok(Self::Auc),
            "ap" => Ok(Self::Ap),
            "f1" => Ok(Self::F1),
            _ => Err(Error::InvalidMetric(s.to_string())),
        }
    }
}

/// Key and non-key nodes restricted to a universe, deduplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Labels {
    key: Vec<NodeId>,
    non_key: Vec<NodeId>,
}

impl Labels {
    /// Keep only labelled nodes that are in `universe`.
    pub fn new<S: AsRef<str>>(key: &[S], non_key: &[S], universe: &HashSet<NodeId>) -> Self {
        let restrict = |nodes: &[S]| -> Vec<NodeId> {
            nodes
                .iter()
                .map(AsRef::as_ref)
                .filter(|id| universe.contains(*id))
                .map(str::to_string)
                .collect::<BTreeSet<_>>()
                .into_iter()
                .collect()
        };
        Self {
            key: restrict(key),
            non_key: restrict(non_key),
        }
    }

    /// Labels over the nodes of `graph`. Without `non_key`, every graph node
    /// not in `key` is non-key.
    pub fn from_graph<S: AsRef<str>>(graph: &Graph, key: &[S], non_key: Option<&[S]>) -> Self {
        let universe: HashSet<NodeId> = graph.nodes().cloned().collect();
        match non_key {
            Some(non_key) => Self::new(key, non_key, &universe),
            None => {
                let key_set: HashSet<&str> = key.iter().map(AsRef::as_ref).collect();
                let rest: Vec<&str> = graph
                    .nodes()
                    .map(String::as_str)
                    .filter(|id| !key_set.contains(id))
                    .collect();
                let key: Vec<&str> = key.iter().map(AsRef::as_ref).collect();
                Self::new(key.as_slice(), rest.as_slice(), &universe)
            }
        }
    }

    /// Key nodes kept.
    pub fn key(&self) -> &[NodeId] {
        &self.key
    }

    /// Non-key nodes kept.
    pub fn non_key(&self) -> &[NodeId] {
        &self.non_key
    }

    /// Whether both classes are present.
    pub fn has_both_classes(&self) -> bool {
        !self.key.is_empty() && !self.non_key.is_empty()
    }

    /// Score `scores` under `metric`.
    ///
    /// `threshold` only applies to [`Metric::F1`]; without it the best F1 over
    /// every observed score is returned.
    #[must_use]
    pub fn evaluate(&self, scores: &HashMap<NodeId, f64>, metric: Metric, threshold: Option<f64>) -> f64 {
        if !self.has_both_classes() {
            return metric.fallback();
        }
        let lookup = |ids: &[NodeId]| -> Vec<f64> {
            ids.iter().map(|id| scores.get(id).copied().unwrap_or(0.0)).collect()
        };
        let pos = lookup(&self.key);
        let neg = lookup(&self.non_key);
        match (metric, threshold) {
            (Metric::Auc, _) => roc_auc(&pos, &neg),
            (Metric::Ap, _) => average_precision(&pos, &neg),
            (Metric::F1, Some(t)) => f1_at(&pos, &neg, t),
            (Metric::F1, None) => best_f1(&pos, &neg),
        }
    }
}

/// Evaluate `scores` against key / non-key labels restricted to `universe`.
///
/// # Example
///
/// ```
/// use motifrank::evaluate::{evaluate, Metric};
/// use std::collections::{HashMap, HashSet};
///
/// let scores = HashMap::from([("a".to_string(), 0.9), ("b".to_string(), 0.1)]);
/// let universe: HashSet<String> = scores.keys().cloned().collect();
/// let auc = evaluate(&scores, &["a"], &["b"], &universe, Metric::Auc, None);
/// assert_eq!(auc, 1.0);
/// ```
#[must_use]
pub fn evaluate<S: AsRef<str>>(
    scores: &HashMap<NodeId, f64>,
    key_nodes: &[S],
    non_key_nodes: &[S],
    universe: &HashSet<NodeId>,
    metric: Metric,
    threshold: Option<f64>,
) -> f64 {
    Labels::new(key_nodes, non_key_nodes, universe).evaluate(scores, metric, threshold)
}

/// Fail if any node is labelled both key and non-key.
///
/// # Errors
///
/// `Error::OverlappingLabels` with the overlap size and its smallest id.
pub fn check_disjoint<S: AsRef<str>>(key: &[S], non_key: &[S]) -> Result<()> {
    let key: HashSet<&str> = key.iter().map(AsRef::as_ref).collect();
    let overlap: BTreeSet<&str> = non_key
        .iter()
        .map(AsRef::as_ref)
        .filter(|id| key.contains(id))
        .collect();
    match overlap.first() {
        None => Ok(()),
        Some(example) => Err(Error::OverlappingLabels {
            count: overlap.len(),
            example: (*example).to_string(),
        }),
    }
}

/// ROC AUC via the rank-sum statistic with average ranks for ties.
///
/// Only exactly equal scores share a rank. Returns 0.5 if either side is empty.
#[allow(clippy::cast_precision_loss, clippy::float_cmp)]
pub fn roc_auc(pos: &[f64], neg: &[f64]) -> f64 {
    if pos.is_empty() || neg.is_empty() {
        return 0.5;
    }
    let mut all: Vec<(f64, bool)> = pos
        .iter()
        .map(|&s| (s, true))
        .chain(neg.iter().map(|&s| (s, false)))
        .collect();
    all.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));

    let n = all.len();
    let mut rank_sum_pos = 0.0;
    let mut i = 0;
    while i < n {
        let mut j = i;
        while j < n && all[j].0 == all[i].0 {
            j += 1;
        }
        let avg_rank = (i + 1 + j) as f64 / 2.0;
        let positives = all[i..j].iter().filter(|(_, label)| *label).count();
        rank_sum_pos += avg_rank * positives as f64;
        i = j;
    }

    let p = pos.len() as f64;
    let q = neg.len() as f64;
    let u = rank_sum_pos - p * (p + 1.0) / 2.0;
    (u / (p * q)).clamp(0.0, 1.0)
}

/// Average precision: `Σ (R_k − R_{k−1}) · P_k` over distinct thresholds, descending.
///
/// Returns 0 if there are no positives.
#[allow(clippy::cast_precision_loss, clippy::float_cmp)]
pub fn average_precision(pos: &[f64], neg: &[f64]) -> f64 {
    if pos.is_empty() {
        return 0.0;
    }
    let mut all: Vec<(f64, bool)> = pos
        .iter()
        .map(|&s| (s, true))
        .chain(neg.iter().map(|&s| (s, false)))
        .collect();
    all.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));

    let total_pos = pos.len() as f64;
    let (mut tp, mut fp) = (0_usize, 0_usize);
    let mut prev_recall = 0.0;
    let mut ap = 0.0;
    let mut i = 0;
    while i < all.len() {
        let mut j = i;
        while j < all.len() && all[j].0 == all[i].0 {
            if all[j].1 {
                tp += 1;
            } else {
                fp += 1;
            }
            j += 1;
        }
        let recall = tp as f64 / total_pos;
        let precision = tp as f64 / (tp + fp) as f64;
        ap += (recall - prev_recall) * precision;
        prev_recall = recall;
        i = j;
    }
    ap
}

/// F1 with `score >= threshold` predicted positive; 0 when undefined.
#[allow(clippy::cast_precision_loss)]
pub fn f1_at(pos: &[f64], neg: &[f64], threshold: f64) -> f64 {
    let tp = pos.iter().filter(|&&s| s >= threshold).count();
    let fn_ = pos.len() - tp;
    let fp = neg.iter().filter(|&&s| s >= threshold).count();
    let denom = 2 * tp + fp + fn_;
    if denom == 0 {
        0.0
    } else {
        (2 * tp) as f64 / denom as f64
    }
}

/// Best F1 over every distinct observed score used as threshold.
pub fn best_f1(pos: &[f64], neg: &[f64]) -> f64 {
    let mut thresholds: Vec<f64> = pos.iter().chain(neg.iter()).copied().collect();
    thresholds.sort_by(|a, b| b.partial_cmp(a).unwrap_or(Ordering::Equal));
    thresholds.dedup();

    let mut best = 0.0;
    for t in thresholds {
        let f1 = f1_at(pos, neg, t);
        if f1 > best {
            best = f1;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(pairs: &[(&str, f64)]) -> HashMap<NodeId, f64> {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    fn universe(ids: &[&str]) -> HashSet<NodeId> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_auc_known_value() {
        // Ranks 1..5 with positives at 3 and 5: U = 8 - 3 = 5
        let auc = roc_auc(&[3.0, 5.0], &[1.0, 2.0, 4.0]);
        assert!((auc - 5.0 / 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_auc_ties() {
        assert!((roc_auc(&[0.5, 0.5], &[0.5]) - 0.5).abs() < 1e-12);
        assert!((roc_auc(&[1.0, 0.5], &[0.5]) - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_tiny_distinct_scores_are_not_tied() {
        // Normalized scores on large graphs routinely sit below 1e-15
        assert_eq!(roc_auc(&[2e-17], &[1e-17]), 1.0);
        assert_eq!(roc_auc(&[1e-17], &[2e-17]), 0.0);
        assert_eq!(average_precision(&[2e-17], &[1e-17]), 1.0);
        assert!((average_precision(&[1e-17], &[2e-17]) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_average_precision() {
        // Descending: P(0.9) N(0.8) P(0.7) N(0.1)
        // AP = 0.5 * 1 + 0.5 * 2/3
        let ap = average_precision(&[0.9, 0.7], &[0.8, 0.1]);
        assert!((ap - (0.5 + 1.0 / 3.0)).abs() < 1e-12);

        assert!((average_precision(&[1.0, 0.9], &[0.1]) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_average_precision_tied_group() {
        // All tied: one threshold, precision 1/2, recall 1
        assert!((average_precision(&[0.3], &[0.3]) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_f1() {
        // t = 0.75: tp 1, fp 1, fn 1 -> 2 / 4
        assert!((f1_at(&[0.9, 0.7], &[0.8, 0.1], 0.75) - 0.5).abs() < 1e-12);
        // t = 0.7: tp 2, fp 1 -> 4 / 5
        assert!((best_f1(&[0.9, 0.7], &[0.8, 0.1]) - 0.8).abs() < 1e-12);
        assert_eq!(f1_at(&[0.1], &[0.2], 0.5), 0.0);
    }

    #[test]
    fn test_single_class_fallback() {
        let s = scores(&[("a", 0.9), ("b", 0.1)]);
        let u = universe(&["a", "b"]);
        let none: [&str; 0] = [];
        assert_eq!(evaluate(&s, &["a", "b"], &none, &u, Metric::Auc, None), 0.5);
        assert_eq!(evaluate(&s, &["a", "b"], &none, &u, Metric::Ap, None), 0.0);
        assert_eq!(evaluate(&s, &none, &["a"], &u, Metric::F1, None), 0.0);
    }

    #[test]
    fn test_universe_restriction_and_missing_scores() {
        let s = scores(&[("a", 0.9), ("b", 0.5)]);
        let u = universe(&["a", "b", "c"]);
        // "z" is outside the universe; "c" has no score and counts as 0
        let auc = evaluate(&s, &["a", "z"], &["b", "c"], &u, Metric::Auc, None);
        assert_eq!(auc, 1.0);

        let only_outside = evaluate(&s, &["z"], &["b"], &u, Metric::Auc, None);
        assert_eq!(only_outside, 0.5);
    }

    #[test]
    fn test_labels_from_graph_defaults_non_key() {
        let g = Graph::from_edges([("a", "b"), ("b", "c")]);
        let labels = Labels::from_graph(&g, &["b"], None);
        assert_eq!(labels.key(), ["b".to_string()]);
        assert_eq!(labels.non_key(), ["a".to_string(), "c".to_string()]);
    }

    #[test]
    fn test_metric_parse() {
        assert_eq!("AP".parse::<Metric>().unwrap(), Metric::Ap);
        assert!(matches!("mrr".parse::<Metric>(), Err(Error::InvalidMetric(_))));
        assert_eq!(Metric::default(), Metric::Ap);
    }

    #[test]
    fn test_check_disjoint() {
        assert!(check_disjoint(&["a", "b"], &["c"]).is_ok());
        let err = check_disjoint(&["a", "b", "c"], &["c", "b", "d"]).unwrap_err();
        assert!(matches!(
            err,
            Error::OverlappingLabels { count: 2, ref example } if example == "b"
        ));
    }
}
