// Batch Predictions
//
// *Le Lot* (The Batch) - Evaluate many queries against one shared engine

use anyhow::{Context, Result};
use chrono::Utc;
use leconseil::{Query, RecommendationEngine};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Predicted URLs for one query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryPredictions {
    /// Query text as read from the input
    pub query: String,
    /// Recommended assessment URLs, best first
    pub predictions: Vec<String>,
}

/// Predictions for a whole query file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
    /// RFC 3339 timestamp of report generation
    pub generated_at: String,
    /// One entry per input query, in input order
    pub predictions: Vec<QueryPredictions>,
}

impl BatchReport {
    /// Number of queries that produced no predictions
    pub fn empty_count(&self) -> usize {
        self.predictions
            .iter()
            .filter(|p| p.predictions.is_empty())
            .count()
    }

    /// Write the report as pretty JSON
    pub fn write<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self).context("Failed to serialize report")?;
        fs::write(path, json).with_context(|| format!("Failed to write report: {:?}", path))
    }
}

/// Read one query per non-blank line
pub fn read_queries<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read queries file: {:?}", path))?;

    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

/// Evaluate every query concurrently on blocking tasks
///
/// A query whose task fails is recorded with an empty prediction list.
pub async fn run(
    engine: Arc<RecommendationEngine>,
    queries: Vec<String>,
    k: usize,
) -> BatchReport {
    info!("Running batch of {} queries", queries.len());

    let handles: Vec<_> = queries
        .iter()
        .cloned()
        .map(|text| {
            let engine = Arc::clone(&engine);
            tokio::task::spawn_blocking(move || {
                engine
                    .recommend(&Query::new(text), k)
                    .into_iter()
                    .map(|c| c.item.url)
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let mut predictions = Vec::with_capacity(queries.len());
    for (i, (query, handle)) in queries.into_iter().zip(handles).enumerate() {
        let urls = match handle.await {
            Ok(urls) => urls,
            Err(e) => {
                warn!("Query {} failed: {}", i + 1, e);
                Vec::new()
            }
        };
        debug!("Query {}: {} predictions", i + 1, urls.len());
        predictions.push(QueryPredictions {
            query,
            predictions: urls,
        });
    }

    BatchReport {
        generated_at: Utc::now().to_rfc3339(),
        predictions,
    }
}
