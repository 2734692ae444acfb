//! Configuration for Seine
//!
//! Configuration is a declarative TOML file parsed into typed structs. The
//! crawler and PageRank sections are validated strictly (a bad crawl config
//! is a startup failure); the ranking section degrades to built-in defaults
//! with a warning, so a broken weights file can never take search down.

use crate::{url::seed_domain, ConfigError, ConfigResult};
use serde::Deserialize;
use std::path::Path;

/// Main configuration structure for Seine
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub ranking: RankingConfig,
    #[serde(default)]
    pub pagerank: PagerankConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// URL the crawl starts from; its host defines the crawl domain
    #[serde(rename = "seed-url")]
    pub seed_url: String,

    /// Maximum number of pages to fetch in one run
    #[serde(rename = "max-pages", default = "default_max_pages")]
    pub max_pages: usize,

    /// Polite delay before each fetch (milliseconds)
    #[serde(rename = "fetch-delay-ms", default = "default_fetch_delay_ms")]
    pub fetch_delay_ms: u64,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Directory holding the persisted JSON artifacts
    #[serde(rename = "data-dir", default = "default_data_dir")]
    pub data_dir: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

/// PageRank solver parameters
#[derive(Debug, Clone, Deserialize)]
pub struct PagerankConfig {
    /// Probability of following a link vs jumping to a random page
    #[serde(default = "default_damping")]
    pub damping: f64,

    /// Iteration cap; the last iterate is returned even without convergence
    #[serde(rename = "max-iterations", default = "default_max_iterations")]
    pub max_iterations: usize,

    /// L1 distance between successive vectors that counts as converged
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
}

impl Default for PagerankConfig {
    fn default() -> Self {
        Self {
            damping: default_damping(),
            max_iterations: default_max_iterations(),
            tolerance: default_tolerance(),
        }
    }
}

/// Ranking weights for the query-time scoring function
///
/// All fields have documented defaults; any invalid value reverts the whole
/// section to defaults rather than failing startup.
#[derive(Debug, Clone, Deserialize)]
pub struct RankingConfig {
    /// Weight of non-stop query words in the match fraction (> 0)
    #[serde(rename = "meaningful-word-weight", default = "default_meaningful_weight")]
    pub meaningful_word_weight: f64,

    /// Weight of stop words in the match fraction (>= 0)
    #[serde(rename = "stop-word-weight", default = "default_stop_weight")]
    pub stop_word_weight: f64,

    /// Floor of the rescaled score when all meaningful words match (0..=1)
    #[serde(rename = "perfect-match-bonus-min", default = "default_perfect_bonus")]
    pub perfect_match_bonus_min: f64,

    /// Floor of the rescaled score when all words match (0..=1)
    #[serde(rename = "all-words-match-bonus-min", default = "default_all_words_bonus")]
    pub all_words_match_bonus_min: f64,

    /// Multiplier applied to partial matches (0..=1)
    #[serde(rename = "partial-match-penalty", default = "default_partial_penalty")]
    pub partial_match_penalty: f64,

    /// Weight of normalized text relevance in the final score (>= 0)
    #[serde(rename = "text-relevance-weight", default = "default_text_weight")]
    pub text_relevance_weight: f64,

    /// Weight of link authority in the final score (>= 0)
    #[serde(rename = "pagerank-weight", default = "default_pagerank_weight")]
    pub pagerank_weight: f64,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            meaningful_word_weight: default_meaningful_weight(),
            stop_word_weight: default_stop_weight(),
            perfect_match_bonus_min: default_perfect_bonus(),
            all_words_match_bonus_min: default_all_words_bonus(),
            partial_match_penalty: default_partial_penalty(),
            text_relevance_weight: default_text_weight(),
            pagerank_weight: default_pagerank_weight(),
        }
    }
}

fn default_max_pages() -> usize {
    2000
}
fn default_fetch_delay_ms() -> u64 {
    100
}
fn default_data_dir() -> String {
    "./data".to_string()
}
fn default_damping() -> f64 {
    0.85
}
fn default_max_iterations() -> usize {
    10_000
}
fn default_tolerance() -> f64 {
    1e-8
}
fn default_meaningful_weight() -> f64 {
    3.0
}
fn default_stop_weight() -> f64 {
    1.0
}
fn default_perfect_bonus() -> f64 {
    0.8
}
fn default_all_words_bonus() -> f64 {
    0.7
}
fn default_partial_penalty() -> f64 {
    0.5
}
fn default_text_weight() -> f64 {
    0.9
}
fn default_pagerank_weight() -> f64 {
    0.1
}

impl RankingConfig {
    /// Checks every weight against its documented range.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.meaningful_word_weight <= 0.0 {
            return Err(ConfigError::Validation(
                "meaningful-word-weight must be > 0".to_string(),
            ));
        }
        if self.stop_word_weight < 0.0 {
            return Err(ConfigError::Validation(
                "stop-word-weight must be >= 0".to_string(),
            ));
        }
        for (name, value) in [
            ("perfect-match-bonus-min", self.perfect_match_bonus_min),
            ("all-words-match-bonus-min", self.all_words_match_bonus_min),
            ("partial-match-penalty", self.partial_match_penalty),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Validation(format!(
                    "{name} must be within 0.0..=1.0, got {value}"
                )));
            }
        }
        if self.text_relevance_weight < 0.0 || self.pagerank_weight < 0.0 {
            return Err(ConfigError::Validation(
                "ranking weights must be >= 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Returns the config unchanged when valid, otherwise the documented
    /// defaults. Invalid ranking weights are never a startup failure.
    pub fn sanitized(self) -> Self {
        match self.validate() {
            Ok(()) => self,
            Err(e) => {
                tracing::warn!("Invalid ranking configuration ({e}); using defaults");
                Self::default()
            }
        }
    }
}

/// Validates the strict (non-ranking) sections of a configuration.
fn validate(config: &Config) -> ConfigResult<()> {
    if config.crawler.max_pages == 0 {
        return Err(ConfigError::Validation(
            "crawler.max-pages must be at least 1".to_string(),
        ));
    }
    let normalized = crate::url::normalize_url(&config.crawler.seed_url);
    seed_domain(&normalized)
        .map_err(|e| ConfigError::InvalidSeed(format!("{}: {e}", config.crawler.seed_url)))?;

    if !(0.0..1.0).contains(&config.pagerank.damping) {
        return Err(ConfigError::Validation(format!(
            "pagerank.damping must be within 0.0..1.0, got {}",
            config.pagerank.damping
        )));
    }
    if config.pagerank.max_iterations == 0 {
        return Err(ConfigError::Validation(
            "pagerank.max-iterations must be at least 1".to_string(),
        ));
    }
    if config.pagerank.tolerance <= 0.0 {
        return Err(ConfigError::Validation(
            "pagerank.tolerance must be > 0".to_string(),
        ));
    }
    Ok(())
}

/// Loads and validates a configuration file.
///
/// The crawler and PageRank sections must be valid; the ranking section is
/// sanitized (invalid weights revert to defaults with a warning).
pub fn load_config(path: &Path) -> ConfigResult<Config> {
    let content = std::fs::read_to_string(path)?;
    let mut config: Config = toml::from_str(&content)?;
    validate(&config)?;
    config.ranking = config.ranking.sanitized();
    Ok(config)
}
