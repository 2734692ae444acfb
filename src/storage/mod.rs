//! Crawl artifact persistence
//!
//! Every pipeline stage communicates through JSON files in a single data
//! directory, so each stage can run in a separate process invocation. All
//! persisted maps are `BTreeMap`s, which keeps the serialized artifacts
//! byte-stable across runs with the same inputs.

use crate::crawler::PageInfo;
use crate::graph::{reduce_graph, InducedGraph};
use crate::{Result, SeineError};
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

pub const GRAPH_FILE: &str = "graph.json";
pub const INDEX_FILE: &str = "index.json";
pub const PAGE_INFO_FILE: &str = "page_info.json";
pub const PAGERANK_FILE: &str = "pagerank.json";
pub const STOPWORDS_FILE: &str = "stopwords.txt";

/// Reads and writes the pipeline's JSON artifacts under one data directory.
pub struct ArtifactStore {
    data_dir: PathBuf,
}

impl ArtifactStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Path of the optional stop-word file inside the data directory.
    pub fn stopwords_path(&self) -> PathBuf {
        self.data_dir.join(STOPWORDS_FILE)
    }

    /// Creates the data directory if it does not exist yet.
    pub fn ensure_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.data_dir)?;
        Ok(())
    }

    /// Persists the induced graph as a plain source URL -> target URLs map.
    ///
    /// Degree statistics are derived data and are not written; `load_graph`
    /// rebuilds them from the adjacency map.
    pub fn save_graph(&self, graph: &InducedGraph) -> Result<()> {
        self.write_json(GRAPH_FILE, &graph.adjacency)
    }

    pub fn load_graph(&self) -> Result<InducedGraph> {
        let adjacency: BTreeMap<String, Vec<String>> = self.read_json(GRAPH_FILE)?;
        // Every key of the stored map is a fetched page, so re-reducing over
        // the key set reconstructs the graph with its degree statistics.
        let visited: HashSet<String> = adjacency.keys().cloned().collect();
        Ok(reduce_graph(&adjacency, &visited))
    }

    pub fn save_index(&self, index: &BTreeMap<String, Vec<String>>) -> Result<()> {
        self.write_json(INDEX_FILE, index)
    }

    pub fn load_index(&self) -> Result<BTreeMap<String, Vec<String>>> {
        self.read_json(INDEX_FILE)
    }

    pub fn save_page_info(&self, page_info: &BTreeMap<String, PageInfo>) -> Result<()> {
        self.write_json(PAGE_INFO_FILE, page_info)
    }

    pub fn load_page_info(&self) -> Result<BTreeMap<String, PageInfo>> {
        self.read_json(PAGE_INFO_FILE)
    }

    pub fn save_pagerank(&self, scores: &BTreeMap<String, f64>) -> Result<()> {
        self.write_json(PAGERANK_FILE, scores)
    }

    pub fn load_pagerank(&self) -> Result<BTreeMap<String, f64>> {
        self.read_json(PAGERANK_FILE)
    }

    fn write_json<T: serde::Serialize>(&self, name: &str, value: &T) -> Result<()> {
        let path = self.data_dir.join(name);
        let json = serde_json::to_string_pretty(value).map_err(|source| {
            SeineError::ArtifactFormat {
                path: path.clone(),
                source,
            }
        })?;
        fs::write(&path, json).map_err(|source| SeineError::ArtifactWrite {
            path: path.clone(),
            source,
        })?;
        info!("Wrote {}", path.display());
        Ok(())
    }

    fn read_json<T: serde::de::DeserializeOwned>(&self, name: &str) -> Result<T> {
        let path = self.data_dir.join(name);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(SeineError::MissingData { path });
            }
            Err(source) => return Err(SeineError::ArtifactRead { path, source }),
        };
        serde_json::from_str(&content).map_err(|source| SeineError::ArtifactFormat { path, source })
    }
}
