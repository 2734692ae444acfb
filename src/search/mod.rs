//! Query-time search
//!
//! Combines the inverted index, the authority vector, and per-page display
//! metadata into ranked results. All inputs are loaded once from disk; the
//! engine itself never touches the network or the crawl artifacts' storage.

mod engine;
mod stopwords;

pub use engine::{SearchEngine, SearchResult};
pub use stopwords::StopWords;
