// CLI Interface
//
// This module provides the command-line interface for LeConseil.

use crate::batch;
use crate::config::ProjectConfig;
use crate::response::{parse_preferences, RecommendationResponse};
use anyhow::{Context, Result as AnyhowResult};
use clap::{Parser, Subcommand};
use lecatalogue::Catalog;
use leconseil::{Query, RecommendationEngine};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// LeConseil - Assessment Recommendation Engine
#[derive(Parser, Debug)]
#[command(name = "leconseil")]
#[command(author = "LeConseil Contributors")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Recommend assessments for hiring queries from a TF-IDF indexed catalog", long_about = None)]
pub struct Cli {
    /// Path to a config file (default: .leconseil/config.toml in the current directory)
    #[arg(global = true, long = "config", short = 'c')]
    pub config: Option<PathBuf>,

    /// Path to the catalog JSON file, overriding the config
    #[arg(global = true, long = "catalog")]
    pub catalog: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(global = true, long = "verbose", short = 'v')]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Recommend assessments for one query
    Recommend {
        /// Hiring query
        #[arg(value_name = "QUERY")]
        query: String,

        /// Number of recommendations (default: output.max_recommendations)
        #[arg(long = "k", short = 'k')]
        k: Option<usize>,

        /// Drop assessments longer than this many minutes
        #[arg(long = "max-duration")]
        max_duration: Option<u32>,

        /// Preferred test type, by label or code (K, P, A, S); repeatable
        #[arg(long = "prefer", value_name = "TYPE")]
        prefer: Vec<String>,

        /// Print the JSON payload instead of a table
        #[arg(long = "json")]
        json: bool,
    },

    /// Predict URLs for every query in a file, one query per line
    Batch {
        /// File of queries
        #[arg(value_name = "QUERIES_FILE")]
        queries: PathBuf,

        /// Predictions per query (default: output.max_recommendations)
        #[arg(long = "k", short = 'k')]
        k: Option<usize>,

        /// Write the report here instead of stdout
        #[arg(long = "output", short = 'o')]
        output: Option<PathBuf>,
    },

    /// Build a catalog file from a list of assessment URLs
    Catalog {
        /// File of assessment URLs, one per line
        #[arg(value_name = "URLS_FILE")]
        urls: PathBuf,

        /// Catalog JSON to write
        #[arg(long = "output", short = 'o')]
        output: PathBuf,
    },

    /// Show catalog and index diagnostics
    Diagnostics,
}

impl Cli {
    /// Run the CLI
    pub async fn run(self) -> AnyhowResult<()> {
        init_logging_impl(self.verbose);

        let config = load_config(self.config.as_deref())?.with_catalog_override(self.catalog);

        match self.command {
            Commands::Recommend {
                query,
                k,
                max_duration,
                prefer,
                json,
            } => cmd_recommend_impl(config, query, k, max_duration, prefer, json).await,
            Commands::Batch { queries, k, output } => {
                cmd_batch_impl(config, queries, k, output).await
            }
            Commands::Catalog { urls, output } => cmd_catalog_impl(urls, output).await,
            Commands::Diagnostics => cmd_diagnostics_impl(config).await,
        }
    }
}

/// Initialize logging implementation
fn init_logging_impl(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}

/// Load the explicit config file, or the project config from the current directory
fn load_config(explicit: Option<&Path>) -> AnyhowResult<ProjectConfig> {
    match explicit {
        Some(path) => ProjectConfig::load_file(path),
        None => {
            let current_dir =
                std::env::current_dir().context("Failed to get current directory")?;
            ProjectConfig::load(current_dir)
        }
    }
}

/// Load the catalog and build the engine off the async runtime
async fn load_engine(config: &ProjectConfig) -> AnyhowResult<RecommendationEngine> {
    let path = config.catalog.path.clone();
    let ranking = config.ranking;

    info!("Loading catalog from: {}", path.display());

    tokio::task::spawn_blocking(move || RecommendationEngine::load(&path, ranking))
        .await
        .context("Engine build task failed")?
        .map_err(|e| match e.suggestion() {
            Some(hint) => anyhow::anyhow!("{} ({})", e, hint),
            None => anyhow::anyhow!(e),
        })
        .context("Failed to build recommendation engine")
}

/// Recommend command implementation
async fn cmd_recommend_impl(
    config: ProjectConfig,
    text: String,
    k: Option<usize>,
    max_duration: Option<u32>,
    prefer: Vec<String>,
    json: bool,
) -> AnyhowResult<()> {
    let engine = load_engine(&config).await?;
    let max = config.output.max_recommendations;
    let k = k.unwrap_or(max);

    let mut query = Query::new(text.clone()).with_preferences(parse_preferences(&prefer));
    query.max_duration = max_duration;

    let results = engine.recommend(&query, k);
    let response = RecommendationResponse::from_candidates(&results, max);

    if json {
        let payload =
            serde_json::to_string_pretty(&response).context("Failed to serialize response")?;
        println!("{}", payload);
        return Ok(());
    }

    if response.recommended_assessments.is_empty() {
        println!("No recommendations for: {}", text);
        return Ok(());
    }

    println!(
        "\n{} recommendation(s) for: '{}'\n",
        response.recommended_assessments.len(),
        text
    );
    for (i, rec) in response.recommended_assessments.iter().enumerate() {
        let flag = if rec.low_relevance { "  [low relevance]" } else { "" };
        println!("{}. {} ({:.3}){}", i + 1, rec.name, rec.score, flag);
        println!("   URL: {}", rec.url);
        println!("   Test type: {}", rec.test_type.join(", "));
        println!(
            "   Duration: {} min | Adaptive: {} | Remote: {}",
            rec.duration, rec.adaptive_support, rec.remote_support
        );
        println!();
    }

    Ok(())
}

/// Batch command implementation
async fn cmd_batch_impl(
    config: ProjectConfig,
    queries_path: PathBuf,
    k: Option<usize>,
    output: Option<PathBuf>,
) -> AnyhowResult<()> {
    let queries = batch::read_queries(&queries_path)?;
    if queries.is_empty() {
        warn!("No queries found in {}", queries_path.display());
    }

    let engine = Arc::new(load_engine(&config).await?);
    let k = k.unwrap_or(config.output.max_recommendations);
    let report = batch::run(engine, queries, k).await;

    match output {
        Some(path) => {
            report.write(&path)?;
            println!("\n✓ Predictions complete!");
            println!("  Queries: {}", report.predictions.len());
            println!("  Without predictions: {}", report.empty_count());
            println!("  Output: {}", path.display());
        }
        None => {
            let json =
                serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
            println!("{}", json);
        }
    }

    Ok(())
}

/// Catalog command implementation
async fn cmd_catalog_impl(urls_path: PathBuf, output: PathBuf) -> AnyhowResult<()> {
    let content = fs::read_to_string(&urls_path)
        .with_context(|| format!("Failed to read URLs file: {:?}", urls_path))?;

    let catalog = Catalog::from_urls(content.lines().map(str::trim))
        .context("Failed to build catalog from URLs")?;

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory: {:?}", parent))?;
    }
    catalog
        .save(&output)
        .with_context(|| format!("Failed to save catalog: {:?}", output))?;

    println!("\n✓ Catalog built!");
    println!("  Assessments: {}", catalog.len());
    println!("  Fingerprint: {}", catalog.fingerprint());
    println!("  Output: {}", output.display());

    Ok(())
}

/// Diagnostics command implementation
async fn cmd_diagnostics_impl(config: ProjectConfig) -> AnyhowResult<()> {
    info!("Fetching diagnostics");

    let engine = load_engine(&config).await?;
    let catalog = engine.catalog();
    let index = engine.index();
    let ranking = engine.config();

    println!("\nLeConseil Diagnostics\n");
    println!("Catalog: {}", config.catalog.path.display());
    println!("  Assessments: {}", catalog.len());
    println!("  Fingerprint: {}", catalog.fingerprint());
    println!("\nIndex:");
    println!("  Documents: {}", index.len());
    println!("  Vocabulary: {} terms", index.vocabulary_size());
    println!("  Current: {}", if index.is_current(catalog) { "yes" } else { "no" });
    println!("\nRanking:");
    println!("  Candidate pool: {}", ranking.candidate_pool);
    println!("  Preference boost: {}", ranking.preference_boost);
    println!("  Relevance threshold: {}", ranking.relevance_threshold);
    println!("  Max recommendations: {}", config.output.max_recommendations);

    Ok(())
}

/// Main entry point for the CLI
pub async fn main() -> AnyhowResult<()> {
    let cli = Cli::parse();
    cli.run().await
}
