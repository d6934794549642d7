//! Property-based tests for motif-aware scoring.
//!
//! These tests verify invariants that should hold for any graph:
//! - Score distributions are normalized
//! - Motif enumeration is deterministic and yields cliques
//! - Graphs without triangles get no correction
//! - Degenerate label sets produce the documented fallback values

use proptest::prelude::*;

use motifrank::evaluate::{evaluate, Metric};
use motifrank::motif::is_clique;
use motifrank::scoring::base_effect;
use motifrank::{
    find_motifs, score, BaseScores, CentralityKind, CentralityScorer, Graph, ParameterVector,
};
use std::collections::{BTreeMap, HashMap, HashSet};

/// Graph on `n` labelled nodes (all present, possibly isolated) plus random edges.
fn arb_graph() -> impl Strategy<Value = (usize, Vec<(usize, usize)>)> {
    (1usize..12).prop_flat_map(|n| (Just(n), prop::collection::vec((0..n, 0..n), 0..30)))
}

/// Random tree or forest: every node but the first links to one earlier node at most.
fn arb_forest() -> impl Strategy<Value = (usize, Vec<(usize, usize)>)> {
    (2usize..15).prop_flat_map(|n| {
        let parents = (1..n)
            .map(|i| prop::option::of(0..i))
            .collect::<Vec<_>>();
        (Just(n), parents).prop_map(|(n, parents)| {
            let edges = parents
                .into_iter()
                .enumerate()
                .filter_map(|(i, p)| p.map(|p| (i + 1, p)))
                .collect();
            (n, edges)
        })
    })
}

fn build(n: usize, edges: &[(usize, usize)]) -> Graph {
    let mut g = Graph::new();
    for i in 0..n {
        g.add_node(format!("n{i}"));
    }
    for &(a, b) in edges {
        g.add_edge(format!("n{a}"), format!("n{b}"));
    }
    g
}

/// Larger sparse graph: mean degree between 2 and 4.
fn arb_sparse_graph() -> impl Strategy<Value = (usize, Vec<(usize, usize)>)> {
    (20usize..150).prop_flat_map(|n| (Just(n), prop::collection::vec((0..n, 0..n), n..2 * n)))
}

/// Per-node base values `w · 10^exponent`, with some nodes forced to zero.
fn custom_base(n: usize, exponent: i32, weights: &[f64], zeros: &[bool]) -> BaseScores {
    let scale = 10f64.powi(exponent);
    let map: HashMap<String, f64> = (0..n)
        .map(|i| {
            let v = if zeros[i % zeros.len()] { 0.0 } else { weights[i % weights.len()] * scale };
            (format!("n{i}"), v)
        })
        .collect();
    BaseScores::Custom(map)
}

fn assert_distribution(values: &HashMap<String, f64>, n: usize) -> Result<(), TestCaseError> {
    prop_assert_eq!(values.len(), n);
    let total: f64 = values.values().sum();
    prop_assert!((total - 1.0).abs() < 1e-9, "sums to {}", total);
    prop_assert!(values.values().all(|v| *v >= 0.0 && v.is_finite()));
    Ok(())
}

fn arb_kind() -> impl Strategy<Value = CentralityKind> {
    prop::sample::select(CentralityKind::ALL.to_vec())
}

mod scoring_props {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn distributions_sum_to_one(
            (n, edges) in arb_graph(),
            kind in arb_kind(),
            theta in 0.0f64..=1.0,
            lambdas in prop::collection::vec(0.0f64..=1.0, 10),
        ) {
            let g = build(n, &edges);
            let scorer = CentralityScorer::new(&g, &BaseScores::Kind(kind), None).unwrap();
            let max_clique = scorer.max_clique();
            let mut point = vec![theta];
            point.extend(lambdas.iter().take(ParameterVector::dimensions(max_clique) - 1));
            let params = ParameterVector::from_point(&point, max_clique).unwrap();

            let scores = scorer.score(&params);
            prop_assert_eq!(scores.cdr.len(), n);
            prop_assert_eq!(scores.csr.len(), n);

            let cdr: f64 = scores.cdr.values().sum();
            let csr: f64 = scores.csr.values().sum();
            prop_assert!((cdr - 1.0).abs() < 1e-6, "CDR sums to {} with {}", cdr, kind);
            prop_assert!((csr - 1.0).abs() < 1e-6, "CSR sums to {} with {}", csr, kind);
            prop_assert!(scores.cdr.values().chain(scores.csr.values()).all(|v| *v >= 0.0));
        }

        #[test]
        fn custom_bases_sum_to_one(
            (n, edges) in arb_graph(),
            exponent in -12i32..4,
            weights in prop::collection::vec(0.0f64..1.0, 1..12),
            zeros in prop::collection::vec(any::<bool>(), 1..12),
            theta in 0.0f64..=1.0,
        ) {
            let g = build(n, &edges);
            let base = custom_base(n, exponent, &weights, &zeros);
            let scorer = CentralityScorer::new(&g, &base, None).unwrap();
            let params = ParameterVector::new(theta, BTreeMap::new(), scorer.max_clique()).unwrap();

            let scores = scorer.score(&params);
            assert_distribution(&scores.cdr, n)?;
            assert_distribution(&scores.csr, n)?;
        }

        #[test]
        fn all_zero_custom_base_is_uniform(
            (n, edges) in arb_graph(),
        ) {
            let g = build(n, &edges);
            let scores = score(&g, &custom_base(n, 0, &[1.0], &[true]), None, None).unwrap();
            for v in scores.cdr.values().chain(scores.csr.values()) {
                prop_assert!((v - 1.0 / n as f64).abs() < 1e-12);
            }
        }

        #[test]
        fn forests_get_no_correction(
            (n, edges) in arb_forest(),
            theta in 0.0f64..=1.0,
        ) {
            let g = build(n, &edges);
            let scorer = CentralityScorer::new(&g, &BaseScores::default(), None).unwrap();
            prop_assert!(scorer.profile().motifs().is_empty());

            let params = ParameterVector::new(theta, BTreeMap::new(), scorer.max_clique()).unwrap();
            for id in g.nodes() {
                prop_assert_eq!(scorer.high_order_correction(id, &params).unwrap(), 1.0);
            }

            // Every edge weighs 1, so motif degree and strength coincide.
            let scores = scorer.score(&params);
            for id in g.nodes() {
                prop_assert!((scores.cdr[id] - scores.csr[id]).abs() < 1e-12);
            }
        }

        #[test]
        fn forests_with_theta_zero_reduce_to_base(
            (n, edges) in arb_forest(),
        ) {
            let g = build(n, &edges);
            prop_assume!(g.edge_count() > 0);

            let base = CentralityKind::Degree.compute(&g);
            let total: f64 = base.values().sum();
            let scorer = CentralityScorer::new(&g, &BaseScores::default(), None).unwrap();
            let params = ParameterVector::new(0.0, BTreeMap::new(), scorer.max_clique()).unwrap();
            let scores = scorer.score(&params);

            for id in g.nodes() {
                prop_assert!((scores.cdr[id] - base[id] / total).abs() < 1e-9);
            }
        }

        #[test]
        fn sparse_graphs_sum_to_one(
            (n, edges) in arb_sparse_graph(),
            exponent in -12i32..1,
            kind in arb_kind(),
        ) {
            let g = build(n, &edges);
            for base in [BaseScores::Kind(kind), custom_base(n, exponent, &[0.3, 0.7, 0.1], &[false])] {
                let scores = score(&g, &base, None, None).unwrap();
                assert_distribution(&scores.cdr, n)?;
                assert_distribution(&scores.csr, n)?;
            }
        }

        #[test]
        fn larger_theta_pulls_further_from_one(
            metric in 0.001f64..0.999,
            theta in 0.0f64..0.99,
            step in 0.005f64..0.5,
        ) {
            let low = base_effect(metric, theta);
            let high = base_effect(metric, (theta + step).min(1.0));
            prop_assert!(high < low, "m={} theta={} step={}", metric, theta, step);
        }
    }
}

mod motif_props {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn enumeration_is_idempotent_and_order_independent(
            (n, edges) in arb_graph(),
        ) {
            let forward = build(n, &edges);
            let mut reversed_edges = edges.clone();
            reversed_edges.reverse();
            let mut backward = Graph::new();
            for i in (0..n).rev() {
                backward.add_node(format!("n{i}"));
            }
            for &(a, b) in &reversed_edges {
                backward.add_edge(format!("n{b}"), format!("n{a}"));
            }

            let first = find_motifs(&forward, None);
            prop_assert_eq!(&first, &find_motifs(&forward, None));
            prop_assert_eq!(&first, &find_motifs(&backward, None));
        }

        #[test]
        fn motifs_are_sorted_cliques(
            (n, edges) in arb_graph(),
        ) {
            let g = build(n, &edges);
            for motif in find_motifs(&g, None).iter() {
                prop_assert!(motif.size() >= 3);
                prop_assert!(motif.nodes().windows(2).all(|w| w[0] < w[1]));
                let ids: Vec<&str> = motif.nodes().iter().map(String::as_str).collect();
                prop_assert!(is_clique(&g, &ids));
            }
        }
    }
}

mod evaluate_props {
    use super::*;

    fn labelled(values: &[f64]) -> (HashMap<String, f64>, Vec<String>, HashSet<String>) {
        let scores: HashMap<String, f64> = values
            .iter()
            .enumerate()
            .map(|(i, &v)| (format!("n{i}"), v))
            .collect();
        let ids: Vec<String> = scores.keys().cloned().collect();
        let universe = ids.iter().cloned().collect();
        (scores, ids, universe)
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn single_class_gives_fallback(
            values in prop::collection::vec(0.0f64..1.0, 1..20),
            threshold in prop::option::of(0.0f64..1.0),
        ) {
            let (scores, ids, universe) = labelled(&values);
            let none: Vec<String> = Vec::new();

            prop_assert_eq!(evaluate(&scores, &ids, &none, &universe, Metric::Auc, None), 0.5);
            prop_assert_eq!(evaluate(&scores, &ids, &none, &universe, Metric::Ap, None), 0.0);
            prop_assert_eq!(evaluate(&scores, &none, &ids, &universe, Metric::F1, threshold), 0.0);
        }

        #[test]
        fn metrics_stay_in_unit_interval(
            values in prop::collection::vec(0.0f64..1.0, 2..30),
            split in 1usize..29,
        ) {
            let (scores, mut ids, universe) = labelled(&values);
            ids.sort();
            let split = split.min(ids.len() - 1);
            let (key, non_key) = ids.split_at(split);

            for metric in [Metric::Auc, Metric::Ap, Metric::F1] {
                let v = evaluate(&scores, key, non_key, &universe, metric, None);
                prop_assert!((0.0..=1.0).contains(&v), "{} gave {}", metric, v);
            }
        }
    }
}
