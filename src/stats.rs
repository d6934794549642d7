//! Top-N classification statistics.
//!
//! The `n` highest-scoring nodes are predicted key, everything else non-key.
//!
//! | Index | Formula |
//! |-------|---------|
//! | SN (sensitivity) | TP / (TP + FN) |
//! | SP (specificity) | TN / (TN + FP) |
//! | PPV | TP / (TP + FP) |
//! | NPV | TN / (TN + FN) |
//! | F | 2 · PPV · SN / (PPV + SN) |
//! | ACC | (TP + TN) / (TP + FP + TN + FN) |
//!
//! Every ratio is 0 when its denominator is 0.

use crate::NodeId;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap, HashSet};

/// The `n` highest-scoring nodes, descending. Ties are broken by node id.
#[must_use]
pub fn top_n(scores: &HashMap<NodeId, f64>, n: usize) -> Vec<NodeId> {
    let mut ranked: Vec<(&NodeId, f64)> = scores.iter().map(|(k, &v)| (k, v)).collect();
    ranked.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.0.cmp(b.0))
    });
    ranked.into_iter().take(n).map(|(k, _)| k.clone()).collect()
}

/// Counts of a top-N prediction against key / non-key labels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfusionMatrix {
    /// Predicted key, labelled key.
    pub tp: usize,
    /// Predicted key, labelled non-key.
    pub fp: usize,
    /// Not predicted, labelled non-key.
    pub tn: usize,
    /// Not predicted, labelled key.
    pub fn_: usize,
}

impl ConfusionMatrix {
    /// Tally `top` against the labels. Nodes in neither label set are ignored.
    pub fn from_top_n<S: AsRef<str>>(top: &[NodeId], key: &[S], non_key: &[S]) -> Self {
        let top: HashSet<&str> = top.iter().map(String::as_str).collect();
        let key: HashSet<&str> = key.iter().map(AsRef::as_ref).collect();
        let non_key: HashSet<&str> = non_key.iter().map(AsRef::as_ref).collect();

        let tp = key.iter().filter(|id| top.contains(*id)).count();
        let fp = non_key.iter().filter(|id| top.contains(*id)).count();
        Self {
            tp,
            fp,
            tn: non_key.len() - fp,
            fn_: key.len() - tp,
        }
    }

    /// Derived indices.
    pub fn report(&self) -> ClassificationReport {
        let sensitivity = ratio(self.tp, self.tp + self.fn_);
        let specificity = ratio(self.tn, self.tn + self.fp);
        let ppv = ratio(self.tp, self.tp + self.fp);
        let npv = ratio(self.tn, self.tn + self.fn_);
        let f_measure = if ppv + sensitivity > 0.0 {
            2.0 * ppv * sensitivity / (ppv + sensitivity)
        } else {
            0.0
        };
        let accuracy = ratio(self.tp + self.tn, self.tp + self.fp + self.tn + self.fn_);
        ClassificationReport {
            sensitivity,
            specificity,
            ppv,
            npv,
            f_measure,
            accuracy,
        }
    }
}

/// SN, SP, PPV, NPV, F and ACC of one ranking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassificationReport {
    /// SN.
    pub sensitivity: f64,
    /// SP.
    pub specificity: f64,
    /// Positive predictive value.
    pub ppv: f64,
    /// Negative predictive value.
    pub npv: f64,
    /// F-measure.
    pub f_measure: f64,
    /// ACC.
    pub accuracy: f64,
}

/// Report for every named ranking at the same cut-off.
pub fn report_all<S: AsRef<str>>(
    rankings: &BTreeMap<String, HashMap<NodeId, f64>>,
    key: &[S],
    non_key: &[S],
    n: usize,
) -> BTreeMap<String, ClassificationReport> {
    rankings
        .iter()
        .map(|(name, scores)| {
            let top = top_n(scores, n);
            (name.clone(), ConfusionMatrix::from_top_n(&top, key, non_key).report())
        })
        .collect()
}

#[allow(clippy::cast_precision_loss)]
fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores() -> HashMap<NodeId, f64> {
        [("a", 0.4), ("b", 0.3), ("c", 0.3), ("d", 0.1)]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect()
    }

    #[test]
    fn test_top_n_ties_by_id() {
        assert_eq!(top_n(&scores(), 3), vec!["a", "b", "c"]);
        assert_eq!(top_n(&scores(), 2), vec!["a", "b"]);
        assert_eq!(top_n(&scores(), 10).len(), 4);
    }

    #[test]
    fn test_confusion_and_report() {
        let top = top_n(&scores(), 2);
        let cm = ConfusionMatrix::from_top_n(&top, &["a", "c"], &["b", "d"]);
        assert_eq!(cm, ConfusionMatrix { tp: 1, fp: 1, tn: 1, fn_: 1 });

        let r = cm.report();
        assert_eq!(r.sensitivity, 0.5);
        assert_eq!(r.specificity, 0.5);
        assert_eq!(r.ppv, 0.5);
        assert_eq!(r.npv, 0.5);
        assert!((r.f_measure - 0.5).abs() < 1e-12);
        assert_eq!(r.accuracy, 0.5);
    }

    #[test]
    fn test_zero_denominators() {
        let r = ConfusionMatrix::default().report();
        assert_eq!(r, ClassificationReport::default());
    }

    #[test]
    fn test_report_all() {
        let rankings = BTreeMap::from([("dc".to_string(), scores())]);
        let reports = report_all(&rankings, &["a"], &["b", "c", "d"], 1);
        let r = reports["dc"];
        assert_eq!(r.sensitivity, 1.0);
        assert_eq!(r.specificity, 1.0);
        assert_eq!(r.accuracy, 1.0);
    }
}
