//! Link-authority scoring by power iteration
//!
//! Computes the stationary authority distribution of the induced link graph.
//! Rank mass of dangling nodes (no out-links) is redistributed uniformly
//! across all nodes each iteration, so total mass stays at 1.0 instead of
//! draining out of the system.

use crate::config::PagerankConfig;
use crate::graph::InducedGraph;
use std::collections::{BTreeMap, HashMap};

/// Computes PageRank scores for every node of the induced graph.
///
/// Power iteration: every node starts at `1/n`; each step assigns
/// `(1 - d)/n + d * (sum of incoming score shares + dangling mass / n)`.
/// Iteration stops when the L1 distance between successive vectors drops
/// below the configured tolerance or the iteration cap is reached; the last
/// iterate is returned either way, so ranking degrades gracefully when the
/// solver does not converge.
///
/// An empty graph yields an empty vector; a single isolated node scores 1.0.
pub fn compute_pagerank(graph: &InducedGraph, params: &PagerankConfig) -> BTreeMap<String, f64> {
    let nodes: Vec<&String> = graph.adjacency.keys().collect();
    let n = nodes.len();
    if n == 0 {
        return BTreeMap::new();
    }

    let index: HashMap<&str, usize> = nodes
        .iter()
        .enumerate()
        .map(|(i, url)| (url.as_str(), i))
        .collect();

    // Outgoing edges as node indices. Targets outside the node set would
    // violate the induced-graph closure invariant; they are dropped here so
    // a hand-edited artifact cannot corrupt the distribution.
    let edges: Vec<Vec<usize>> = nodes
        .iter()
        .map(|url| {
            graph.adjacency[*url]
                .iter()
                .filter_map(|t| index.get(t.as_str()).copied())
                .collect()
        })
        .collect();

    let n_f = n as f64;
    let damping = params.damping;
    let mut scores = vec![1.0 / n_f; n];

    for iteration in 0..params.max_iterations {
        let mut next = vec![(1.0 - damping) / n_f; n];
        let mut dangling_mass = 0.0;

        for (source, targets) in edges.iter().enumerate() {
            if targets.is_empty() {
                dangling_mass += scores[source];
            } else {
                let share = damping * scores[source] / targets.len() as f64;
                for &target in targets {
                    next[target] += share;
                }
            }
        }

        let dangling_share = damping * dangling_mass / n_f;
        for value in &mut next {
            *value += dangling_share;
        }

        let delta: f64 = next
            .iter()
            .zip(&scores)
            .map(|(a, b)| (a - b).abs())
            .sum();
        scores = next;

        if delta < params.tolerance {
            tracing::debug!(
                "PageRank converged after {} iterations (delta {:.3e})",
                iteration + 1,
                delta
            );
            break;
        }
    }

    nodes
        .into_iter()
        .zip(scores)
        .map(|(url, score)| (url.clone(), score))
        .collect()
}
