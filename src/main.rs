//! Seine main entry point
//!
//! This is the command-line interface for the Seine search pipeline.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use seine::config::{load_config, Config, RankingConfig};
use seine::crawler::{Crawler, HttpFetcher};
use seine::graph::{compute_pagerank, reduce_graph};
use seine::search::{SearchEngine, StopWords};
use seine::storage::ArtifactStore;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

const USER_AGENT: &str = concat!("seine/", env!("CARGO_PKG_VERSION"));

/// Seine: a domain-scoped web search pipeline
///
/// Seine crawls a single domain breadth-first, computes PageRank over the
/// fetched pages, and answers queries by fusing lexical match quality with
/// link authority. Each stage persists its output as JSON, so the three
/// stages run as separate invocations.
#[derive(Parser, Debug)]
#[command(name = "seine")]
#[command(version)]
#[command(about = "A domain-scoped web search pipeline", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG", default_value = "seine.toml")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose", global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Crawl the configured domain and write the graph, index, and metadata
    Crawl,
    /// Compute PageRank over the crawled link graph
    Rank,
    /// Query the crawled and ranked data
    Search {
        /// The query words
        #[arg(value_name = "QUERY", required = true)]
        query: Vec<String>,

        /// Maximum number of results to print
        #[arg(short = 'n', long, default_value_t = 10)]
        max_results: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    match cli.command {
        Command::Crawl => handle_crawl(&cli.config).await,
        Command::Rank => handle_rank(&cli.config),
        Command::Search { query, max_results } => {
            handle_search(&cli.config, &query.join(" "), max_results)
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("seine=info,warn"),
            1 => EnvFilter::new("seine=debug,info"),
            2 => EnvFilter::new("seine=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads the configuration, failing loudly. Crawl and rank cannot run
/// without a valid config.
fn load_config_strict(path: &PathBuf) -> Result<Config> {
    tracing::info!("Loading configuration from: {}", path.display());
    match load_config(path) {
        Ok(config) => Ok(config),
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            Err(e.into())
        }
    }
}

/// Handles the crawl subcommand: fetch, reduce, persist.
async fn handle_crawl(config_path: &PathBuf) -> Result<()> {
    let config = load_config_strict(config_path)?;
    let store = ArtifactStore::new(&config.output.data_dir);
    store
        .ensure_dir()
        .with_context(|| format!("creating data directory {}", config.output.data_dir))?;

    // Ctrl-C requests a clean stop; the crawl finishes its current page and
    // the partial results are persisted as usual.
    let stop = Arc::new(AtomicBool::new(false));
    {
        let stop = stop.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::info!("Interrupt received; finishing current page");
                stop.store(true, Ordering::Relaxed);
            }
        });
    }

    let fetcher = HttpFetcher::new(USER_AGENT).context("building HTTP client")?;
    let crawler = Crawler::new(config.crawler, fetcher, stop)?;
    let output = crawler.run().await;

    let induced = reduce_graph(&output.graph, &output.visited);
    tracing::info!(
        "Induced graph: {} nodes, {} edges",
        induced.node_count(),
        induced.edge_count()
    );

    store.save_graph(&induced)?;
    store.save_index(&output.index)?;
    store.save_page_info(&output.page_info)?;

    println!(
        "Crawled {} pages ({} failed, {} still queued), {} unique tokens",
        output.report.visited,
        output.report.known_bad,
        output.report.queued,
        output.report.unique_tokens
    );
    Ok(())
}

/// Handles the rank subcommand: load the graph, run PageRank, persist scores.
fn handle_rank(config_path: &PathBuf) -> Result<()> {
    let config = load_config_strict(config_path)?;
    let store = ArtifactStore::new(&config.output.data_dir);

    let graph = store.load_graph()?;
    tracing::info!(
        "Ranking {} nodes, {} edges",
        graph.node_count(),
        graph.edge_count()
    );

    let scores = compute_pagerank(&graph, &config.pagerank);
    store.save_pagerank(&scores)?;

    // Top pages by authority, highest first.
    let mut ranked: Vec<(&String, f64)> = scores.iter().map(|(url, s)| (url, *s)).collect();
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    println!("Top pages by authority:");
    for (url, score) in ranked.iter().take(10) {
        println!("  {score:.6}  {url}");
    }
    Ok(())
}

/// Handles the search subcommand.
///
/// A missing or broken config file is non-fatal here: search degrades to
/// default weights and the default data directory. Missing crawl artifacts
/// are fatal, with a hint to run the earlier stages.
fn handle_search(
    config_path: &PathBuf,
    query: &str,
    max_results: usize,
) -> Result<()> {
    let (ranking, data_dir) = match load_config(config_path) {
        Ok(config) => (config.ranking, config.output.data_dir),
        Err(e) => {
            tracing::warn!("Could not load configuration ({e}); using defaults");
            (RankingConfig::default(), "./data".to_string())
        }
    };

    let store = ArtifactStore::new(&data_dir);
    let index = store.load_index()?;
    let authority = store.load_pagerank()?;
    let page_info = store.load_page_info()?;
    let stop_words = StopWords::load(&store.stopwords_path());

    let engine = SearchEngine::new(index, authority, page_info, stop_words, ranking);
    let results = engine.search(query, max_results);

    if results.is_empty() {
        println!("No results for \"{query}\"");
        return Ok(());
    }

    for (rank, result) in results.iter().enumerate() {
        println!("{}. {}", rank + 1, result.title);
        println!("   {}", result.url);
        if !result.snippet.is_empty() {
            println!("   {}", result.snippet);
        }
        println!(
            "   score: {:.4} (authority: {:.6})",
            result.score, result.authority
        );
        println!();
    }
    Ok(())
}
