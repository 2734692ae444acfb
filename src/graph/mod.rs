//! Link graph reduction and authority scoring

mod pagerank;
mod reduce;

pub use pagerank::compute_pagerank;
pub use reduce::{reduce_graph, InducedGraph};
