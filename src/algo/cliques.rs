//! Maximal clique enumeration.
//!
//! Bron–Kerbosch with Tomita pivoting, seeded in degeneracy order
//! (Eppstein, Löffler & Strash). Each top-level call only sees the later
//! neighbors of its vertex, so on sparse graphs the candidate sets stay
//! bounded by the degeneracy instead of the node count. Output is still
//! worst-case exponential (a graph can hold 3^(n/3) maximal cliques).
//!
//! # References
//!
//! - Bron & Kerbosch (1973). "Algorithm 457: finding all cliques of an undirected graph"
//! - Tomita, Tanaka & Takahashi (2006). "The worst-case time complexity for
//!   generating all maximal cliques"
//! - Eppstein, Löffler & Strash (2010). "Listing all maximal cliques in sparse
//!   graphs in near-optimal time"

use crate::Graph;
use std::collections::{BTreeSet, HashSet};

/// All maximal cliques as lists of node indices (petgraph `NodeIndex::index()`).
///
/// Isolated nodes are maximal cliques of size 1 and single edges not inside a
/// triangle are maximal cliques of size 2. Each clique is sorted ascending and
/// the outer list is sorted, so the output is deterministic.
#[must_use]
pub fn maximal_cliques(graph: &Graph) -> Vec<Vec<usize>> {
    let adj = adjacency_sets(graph);
    if adj.is_empty() {
        return Vec::new();
    }
    let order = degeneracy_order(&adj);
    let mut position = vec![0; adj.len()];
    for (i, &v) in order.iter().enumerate() {
        position[v] = i;
    }

    let mut out = Vec::new();
    let mut r = Vec::new();
    for &v in &order {
        let (p, x): (HashSet<usize>, HashSet<usize>) =
            adj[v].iter().partition(|&&w| position[w] > position[v]);
        r.push(v);
        expand(&mut r, p, x, &adj, &mut out);
        r.pop();
    }

    for clique in &mut out {
        clique.sort_unstable();
    }
    out.sort_unstable();
    out
}

/// Size of the largest clique; 0 for an empty graph.
#[must_use]
pub fn max_clique_size(graph: &Graph) -> usize {
    maximal_cliques(graph).iter().map(Vec::len).max().unwrap_or(0)
}

/// Neighbor index sets, one per node.
pub(crate) fn adjacency_sets(graph: &Graph) -> Vec<HashSet<usize>> {
    let pg = graph.as_petgraph();
    pg.node_indices()
        .map(|idx| pg.neighbors(idx).map(|n| n.index()).collect())
        .collect()
}

/// Repeatedly remove a node of minimum remaining degree.
fn degeneracy_order(adj: &[HashSet<usize>]) -> Vec<usize> {
    let mut degree: Vec<usize> = adj.iter().map(HashSet::len).collect();
    let mut queue: BTreeSet<(usize, usize)> =
        degree.iter().enumerate().map(|(v, &d)| (d, v)).collect();
    let mut removed = vec![false; adj.len()];
    let mut order = Vec::with_capacity(adj.len());

    while let Some((_, v)) = queue.pop_first() {
        removed[v] = true;
        order.push(v);
        for &w in &adj[v] {
            if !removed[w] {
                queue.remove(&(degree[w], w));
                degree[w] -= 1;
                queue.insert((degree[w], w));
            }
        }
    }
    order
}

/// `|set ∩ N(u)|`, walking whichever side is smaller.
fn common(set: &HashSet<usize>, neighbors: &HashSet<usize>) -> usize {
    if set.len() <= neighbors.len() {
        set.iter().filter(|w| neighbors.contains(w)).count()
    } else {
        neighbors.iter().filter(|w| set.contains(w)).count()
    }
}

fn intersect(set: &HashSet<usize>, neighbors: &HashSet<usize>) -> HashSet<usize> {
    if set.len() <= neighbors.len() {
        set.iter().copied().filter(|w| neighbors.contains(w)).collect()
    } else {
        neighbors.iter().copied().filter(|w| set.contains(w)).collect()
    }
}

fn expand(
    r: &mut Vec<usize>,
    mut p: HashSet<usize>,
    mut x: HashSet<usize>,
    adj: &[HashSet<usize>],
    out: &mut Vec<Vec<usize>>,
) {
    let Some(pivot) = p
        .iter()
        .chain(x.iter())
        .copied()
        .max_by_key(|&u| common(&p, &adj[u]))
    else {
        out.push(r.clone());
        return;
    };

    let candidates: Vec<usize> = p
        .iter()
        .copied()
        .filter(|v| !adj[pivot].contains(v))
        .collect();

    for v in candidates {
        let next_p = intersect(&p, &adj[v]);
        let next_x = intersect(&x, &adj[v]);
        r.push(v);
        expand(r, next_p, next_x, adj, out);
        r.pop();

        p.remove(&v);
        x.insert(v);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sizes(graph: &Graph) -> Vec<usize> {
        let mut s: Vec<usize> = maximal_cliques(graph).iter().map(Vec::len).collect();
        s.sort_unstable();
        s
    }

    #[test]
    fn test_triangle_with_tail() {
        let g = Graph::from_edges([("1", "2"), ("1", "3"), ("2", "3"), ("3", "4")]);
        assert_eq!(sizes(&g), vec![2, 3]);
        assert_eq!(max_clique_size(&g), 3);
    }

    #[test]
    fn test_two_overlapping_k4() {
        // K4 on {a,b,c,d} and K4 on {c,d,e,f} sharing edge c-d
        let mut g = Graph::new();
        for (u, v) in [("a", "b"), ("a", "c"), ("a", "d"), ("b", "c"), ("b", "d"), ("c", "d")] {
            g.add_edge(u, v);
        }
        for (u, v) in [("c", "e"), ("c", "f"), ("d", "e"), ("d", "f"), ("e", "f")] {
            g.add_edge(u, v);
        }
        assert_eq!(sizes(&g), vec![4, 4]);
    }

    #[test]
    fn test_isolated_and_forest() {
        let mut g = Graph::from_edges([("a", "b"), ("b", "c")]);
        g.add_node("z");
        assert_eq!(sizes(&g), vec![1, 2, 2]);
        assert_eq!(max_clique_size(&g), 2);
    }

    #[test]
    fn test_long_path_stays_fast() {
        let n = 20_000;
        let g = Graph::from_edges((1..n).map(|i| (format!("v{}", i - 1), format!("v{i}"))));
        let cliques = maximal_cliques(&g);
        assert_eq!(cliques.len(), n - 1);
        assert!(cliques.iter().all(|c| c.len() == 2));
        assert_eq!(max_clique_size(&g), 2);
    }

    #[test]
    fn test_wheel_cliques_are_maximal() {
        // Hub joined to a 6-cycle: six triangles through the hub
        let mut g = Graph::new();
        for i in 0..6 {
            g.add_edge("hub", format!("r{i}"));
            g.add_edge(format!("r{i}"), format!("r{}", (i + 1) % 6));
        }
        let adj = adjacency_sets(&g);
        let cliques = maximal_cliques(&g);
        assert_eq!(cliques.len(), 6);
        for c in &cliques {
            assert!(c.iter().all(|&u| c.iter().all(|&v| u == v || adj[u].contains(&v))));
            let extendable = (0..adj.len())
                .filter(|w| !c.contains(w))
                .any(|w| c.iter().all(|u| adj[*u].contains(&w)));
            assert!(!extendable, "{c:?} is not maximal");
        }
    }

    #[test]
    fn test_empty_graph() {
        assert!(maximal_cliques(&Graph::new()).is_empty());
        assert_eq!(max_clique_size(&Graph::new()), 0);
    }
}
