//! Frontier-driven domain crawler
//!
//! The crawler walks one domain breadth-first through an abstract [`Fetcher`]
//! capability, producing the raw link graph, the inverted index, and page
//! display metadata in a single pass.

mod coordinator;
mod fetcher;
mod frontier;
mod parser;

use serde::{Deserialize, Serialize};

pub use coordinator::{CrawlOutput, CrawlReport, Crawler};
pub use fetcher::{build_http_client, FetchError, FetchedPage, Fetcher, HttpFetcher};
pub use frontier::Frontier;
pub use parser::extract_links;

/// Display metadata stored per fetched page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    /// Page title, at most 100 characters
    pub title: String,
    /// Body snippet, at most 200 characters, word-boundary truncated
    pub snippet: String,
}
