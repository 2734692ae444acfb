use std::collections::{BTreeMap, HashSet};

/// The link graph restricted to edges between fetched pages, plus degree
/// statistics.
///
/// Invariant: every URL appearing as a key or a target is a visited page.
/// This is the only graph form the PageRank engine consumes.
#[derive(Debug, Clone, Default)]
pub struct InducedGraph {
    /// Visited source URL -> visited target URLs
    pub adjacency: BTreeMap<String, Vec<String>>,

    /// Incoming edge count per node
    pub in_degree: BTreeMap<String, usize>,

    /// Outgoing edge count per node
    pub out_degree: BTreeMap<String, usize>,
}

impl InducedGraph {
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn edge_count(&self) -> usize {
        self.out_degree.values().sum()
    }
}

/// Derives the induced subgraph from raw per-page out-link lists.
///
/// Every visited URL becomes a node (even with no surviving edges); out-links
/// pointing at pages that were never fetched are dropped. A pure function of
/// the crawler's final state, so the reduction can be re-derived from
/// persisted data without re-crawling.
pub fn reduce_graph(
    raw: &BTreeMap<String, Vec<String>>,
    visited: &HashSet<String>,
) -> InducedGraph {
    let mut adjacency: BTreeMap<String, Vec<String>> = visited
        .iter()
        .map(|url| (url.clone(), Vec::new()))
        .collect();
    let mut in_degree: BTreeMap<String, usize> =
        visited.iter().map(|url| (url.clone(), 0)).collect();
    let mut out_degree = in_degree.clone();

    for (source, targets) in raw {
        if !visited.contains(source) {
            continue;
        }
        let kept: Vec<String> = targets
            .iter()
            .filter(|t| visited.contains(*t))
            .cloned()
            .collect();

        out_degree.insert(source.clone(), kept.len());
        for target in &kept {
            *in_degree.entry(target.clone()).or_insert(0) += 1;
        }
        adjacency.insert(source.clone(), kept);
    }

    InducedGraph {
        adjacency,
        in_degree,
        out_degree,
    }
}
