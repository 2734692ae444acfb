//! Seine: a domain-scoped web search pipeline
//!
//! This crate implements a small search pipeline: a breadth-first crawler that
//! builds a link graph and an inverted text index over a single domain, a
//! PageRank engine over the induced subgraph of fetched pages, and a
//! query-time ranking engine that fuses lexical match quality with link
//! authority.

pub mod config;
pub mod crawler;
pub mod graph;
pub mod search;
pub mod storage;
pub mod text;
pub mod url;

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Seine operations
#[derive(Debug, Error)]
pub enum SeineError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("URL error: {0}")]
    Url(#[from] UrlError),

    #[error("Missing prerequisite data file: {path} (run `seine crawl` and `seine rank` first)")]
    MissingData { path: PathBuf },

    #[error("Failed to read artifact {path}: {source}")]
    ArtifactRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write artifact {path}: {source}")]
    ArtifactWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Malformed artifact {path}: {source}")]
    ArtifactFormat {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid seed URL: {0}")]
    InvalidSeed(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Missing host in URL: {0}")]
    MissingHost(String),
}

/// Result type alias for Seine operations
pub type Result<T> = std::result::Result<T, SeineError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::{Config, CrawlerConfig, RankingConfig};
pub use crawler::{CrawlOutput, CrawlReport, Crawler, Fetcher};
pub use graph::{compute_pagerank, reduce_graph, InducedGraph};
pub use search::{SearchEngine, SearchResult, StopWords};
pub use url::{is_admissible, normalize_url, seed_domain};
