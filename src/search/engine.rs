//! Query-time ranking engine
//!
//! Fuses lexical match quality against the inverted index with link authority
//! from the PageRank vector. The engine holds read-only snapshots of the
//! persisted artifacts for the lifetime of a search session; queries mutate
//! nothing, so concurrent searches need no locking.

use crate::config::RankingConfig;
use crate::crawler::PageInfo;
use crate::search::StopWords;
use crate::text::tokenize;
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap, HashSet};

/// One ranked hit, constructed fresh per query
#[derive(Debug, Clone)]
pub struct SearchResult {
    pub url: String,
    pub title: String,
    pub snippet: String,
    /// Combined text-relevance and authority score
    pub score: f64,
    /// The authority contribution (0.0 when the URL was never ranked)
    pub authority: f64,
}

/// Ranking engine over read-only index/authority/metadata snapshots
pub struct SearchEngine {
    index: BTreeMap<String, Vec<String>>,
    authority: BTreeMap<String, f64>,
    page_info: BTreeMap<String, PageInfo>,
    stop_words: StopWords,
    config: RankingConfig,
}

impl SearchEngine {
    pub fn new(
        index: BTreeMap<String, Vec<String>>,
        authority: BTreeMap<String, f64>,
        page_info: BTreeMap<String, PageInfo>,
        stop_words: StopWords,
        config: RankingConfig,
    ) -> Self {
        Self {
            index,
            authority,
            page_info,
            stop_words,
            config,
        }
    }

    /// Searches for pages matching the query.
    ///
    /// Scoring:
    /// 1. The candidate set is the union of posting lists of all query tokens
    ///    found in the index.
    /// 2. Each candidate gets a weighted match fraction (meaningful words
    ///    count more than stop words), rescaled upward when the page matches
    ///    every meaningful word or every word, and penalized when it matches
    ///    only a subset.
    /// 3. Text scores are normalized by the per-query maximum, then combined
    ///    with the page's authority score.
    ///
    /// Results are ordered by combined score descending with lexical URL
    /// order as the tie-break, so identical queries always produce identical
    /// orderings. An unmatched query yields an empty list, never an error.
    pub fn search(&self, query: &str, max_results: usize) -> Vec<SearchResult> {
        let query_words = tokenize(query);
        if query_words.is_empty() {
            return Vec::new();
        }

        // Posting sets for the query tokens that exist in the index.
        let pages_by_word: HashMap<&str, HashSet<&str>> = query_words
            .iter()
            .filter_map(|word| {
                self.index.get(word).map(|urls| {
                    (
                        word.as_str(),
                        urls.iter().map(String::as_str).collect::<HashSet<&str>>(),
                    )
                })
            })
            .collect();
        if pages_by_word.is_empty() {
            return Vec::new();
        }

        let candidates: HashSet<&str> = pages_by_word.values().flatten().copied().collect();

        // Duplicated query words intentionally count once per occurrence.
        let meaningful: Vec<&String> = query_words
            .iter()
            .filter(|w| !self.stop_words.is_stop(w))
            .collect();
        let stop: Vec<&String> = query_words
            .iter()
            .filter(|w| self.stop_words.is_stop(w))
            .collect();

        let mut scored: Vec<(&str, f64)> = Vec::new();
        for url in candidates {
            if let Some(text_score) =
                self.text_score(url, &query_words, &meaningful, &stop, &pages_by_word)
            {
                scored.push((url, text_score));
            }
        }
        if scored.is_empty() {
            return Vec::new();
        }

        // Normalize text scores into [0, 1] for cross-query comparability.
        let max_text = scored.iter().map(|(_, s)| *s).fold(f64::MIN, f64::max);
        if max_text > 0.0 {
            for (_, score) in &mut scored {
                *score /= max_text;
            }
        }

        let mut results: Vec<SearchResult> = scored
            .into_iter()
            .map(|(url, text_score)| {
                let authority = self.authority.get(url).copied().unwrap_or(0.0);
                let score = self.config.text_relevance_weight * text_score
                    + self.config.pagerank_weight * authority;
                let info = self.page_info.get(url);
                SearchResult {
                    url: url.to_string(),
                    title: info.map_or_else(|| url.to_string(), |i| i.title.clone()),
                    snippet: info.map_or_else(String::new, |i| i.snippet.clone()),
                    score,
                    authority,
                }
            })
            .collect();

        results.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.url.cmp(&b.url))
        });
        results.truncate(max_results);
        results
    }

    /// Computes the pre-normalization text score of one candidate, or None
    /// when the page matches no query word.
    fn text_score(
        &self,
        url: &str,
        query_words: &[String],
        meaningful: &[&String],
        stop: &[&String],
        pages_by_word: &HashMap<&str, HashSet<&str>>,
    ) -> Option<f64> {
        let matches = |words: &[&String]| {
            words
                .iter()
                .filter(|w| {
                    pages_by_word
                        .get(w.as_str())
                        .is_some_and(|urls| urls.contains(url))
                })
                .count()
        };
        let matching_meaningful = matches(meaningful);
        let matching_stop = matches(stop);
        let matching_total = matching_meaningful + matching_stop;
        if matching_total == 0 {
            return None;
        }

        let cfg = &self.config;
        let weighted = matching_meaningful as f64 * cfg.meaningful_word_weight
            + matching_stop as f64 * cfg.stop_word_weight;
        let max_weighted = meaningful.len() as f64 * cfg.meaningful_word_weight
            + stop.len() as f64 * cfg.stop_word_weight;

        let mut text_score = if max_weighted > 0.0 {
            weighted / max_weighted
        } else {
            // Query is entirely stop words with zero stop weight.
            matching_total as f64 / query_words.len() as f64
        };

        if matching_total == query_words.len() {
            if matching_meaningful == meaningful.len() && !meaningful.is_empty() {
                // All meaningful words present: rescale into the top band.
                text_score =
                    cfg.perfect_match_bonus_min + (1.0 - cfg.perfect_match_bonus_min) * text_score;
            } else {
                text_score = cfg.all_words_match_bonus_min
                    + (1.0 - cfg.all_words_match_bonus_min) * text_score;
            }
        } else {
            text_score *= cfg.partial_match_penalty;
        }

        Some(text_score)
    }
}
