// Recommendation engine

use crate::attributes::{infer, TestType};
use crate::config::RankingConfig;
use crate::error::Result;
use crate::ranking;
use lecatalogue::{Catalog, CatalogItem};
use lerecherche::CorpusIndex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::path::Path;
use tracing::{debug, info, warn};

/// Recommendation request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Query {
    /// Free-text hiring query
    pub text: String,

    /// Drop candidates longer than this many minutes
    pub max_duration: Option<u32>,

    /// Categories that earn a score boost
    pub preferred_test_types: BTreeSet<TestType>,
}

impl Query {
    /// Create a query with no filters or preferences
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Set the maximum duration filter
    pub fn with_max_duration(mut self, minutes: u32) -> Self {
        self.max_duration = Some(minutes);
        self
    }

    /// Add preferred test types
    pub fn with_preferences(mut self, types: impl IntoIterator<Item = TestType>) -> Self {
        self.preferred_test_types.extend(types);
        self
    }
}

/// A catalog item scored and annotated for one query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedCandidate {
    /// 1-based position in the returned list, 0 before selection
    pub rank: usize,

    /// The underlying catalog record
    pub item: CatalogItem,

    /// Cosine similarity from the corpus index
    pub similarity_score: f32,

    /// Similarity plus any preference boost
    pub adjusted_score: f32,

    /// Inferred categories, primary first
    pub test_type: Vec<TestType>,

    /// Adaptive testing support
    pub adaptive_support: bool,

    /// Remote testing support
    pub remote_support: bool,

    /// Expected duration
    pub duration_minutes: u32,

    /// Adjusted score fell below the relevance threshold
    pub low_relevance: bool,
}

impl EnrichedCandidate {
    /// Category used to group candidates during diversification
    pub fn primary_test_type(&self) -> TestType {
        self.test_type
            .first()
            .copied()
            .unwrap_or(TestType::KnowledgeSkills)
    }
}

/// Catalog plus its corpus index, immutable after construction
///
/// `recommend` takes `&self` and keeps all per-query state local, so one engine
/// can be shared across threads behind an `Arc`.
#[derive(Debug, Clone)]
pub struct RecommendationEngine {
    catalog: Catalog,
    index: CorpusIndex,
    config: RankingConfig,
}

impl RecommendationEngine {
    /// Build an engine with the default ranking configuration
    pub fn new(catalog: Catalog) -> Result<Self> {
        Self::with_config(catalog, RankingConfig::default())
    }

    /// Build an engine with explicit ranking settings
    pub fn with_config(catalog: Catalog, config: RankingConfig) -> Result<Self> {
        config.validate()?;
        let index = CorpusIndex::from_catalog(&catalog)?;
        info!(
            "Recommendation engine ready: {} assessments, {} terms",
            catalog.len(),
            index.vocabulary_size()
        );
        Ok(Self {
            catalog,
            index,
            config,
        })
    }

    /// Load a catalog file and build an engine over it
    pub fn load<P: AsRef<Path>>(path: P, config: RankingConfig) -> Result<Self> {
        let catalog = Catalog::load(path)?;
        Self::with_config(catalog, config)
    }

    /// Recommend up to `k` assessments for a query
    ///
    /// Retrieves a fixed-size candidate pool, enriches and filters it, applies
    /// preference boosts, flags low relevance, then selects a diversified
    /// top-`k`. Empty queries and `k == 0` produce an empty list.
    pub fn recommend(&self, query: &Query, k: usize) -> Vec<EnrichedCandidate> {
        if k == 0 {
            debug!("k is 0, returning no recommendations");
            return Vec::new();
        }
        if query.text.trim().is_empty() {
            warn!("Empty query text, returning no recommendations");
            return Vec::new();
        }

        let preview: String = query.text.chars().take(80).collect();
        debug!("Processing query: {}", preview);

        let candidates = self.enrich(query);
        if candidates.is_empty() {
            info!("No candidates left after filtering");
            return Vec::new();
        }

        let mut selected = ranking::select(candidates, k, self.config.relevance_threshold);
        for (i, candidate) in selected.iter_mut().enumerate() {
            candidate.rank = i + 1;
        }

        debug!("Generated {} recommendations", selected.len());
        selected
    }

    /// Retrieve, dedupe, filter, boost, and flag the candidate pool
    fn enrich(&self, query: &Query) -> Vec<EnrichedCandidate> {
        let hits = self.index.search(&query.text, self.config.candidate_pool);
        let mut seen: HashSet<&str> = HashSet::with_capacity(hits.len());
        let mut candidates = Vec::with_capacity(hits.len());

        for hit in hits {
            let Some(item) = self.catalog.get(hit.index) else {
                continue;
            };
            if !seen.insert(item.url.as_str()) {
                continue;
            }

            let attrs = infer(&item.name);
            if let Some(max) = query.max_duration {
                if attrs.duration_minutes > max {
                    continue;
                }
            }

            let adjusted_score = ranking::boost(
                hit.score,
                &attrs.test_type,
                &query.preferred_test_types,
                self.config.preference_boost,
            );

            candidates.push(EnrichedCandidate {
                rank: 0,
                item: item.clone(),
                similarity_score: hit.score,
                adjusted_score,
                test_type: attrs.test_type,
                adaptive_support: attrs.adaptive_support,
                remote_support: attrs.remote_support,
                duration_minutes: attrs.duration_minutes,
                low_relevance: adjusted_score < self.config.relevance_threshold,
            });
        }

        candidates
    }

    /// The catalog this engine serves
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The corpus index built from the catalog
    pub fn index(&self) -> &CorpusIndex {
        &self.index
    }

    /// Active ranking settings
    pub fn config(&self) -> &RankingConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> RecommendationEngine {
        let catalog = Catalog::new(vec![
            CatalogItem::new(
                "Java Programming",
                "url1",
                "SHL assessment for Java programming skills assessment",
            ),
            CatalogItem::new(
                "Leadership Assessment",
                "url2",
                "SHL assessment for Leadership skills evaluation",
            ),
        ])
        .unwrap();
        RecommendationEngine::new(catalog).unwrap()
    }

    #[test]
    fn test_java_developer_scenario() {
        let results = engine().recommend(&Query::new("java developer"), 2);

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].item.name, "Java Programming");
        assert!(results[0].test_type.contains(&TestType::KnowledgeSkills));
        assert!(results[1].test_type.contains(&TestType::PersonalityBehavior));
        assert_eq!(results[0].rank, 1);
        assert_eq!(results[1].rank, 2);
    }

    #[test]
    fn test_zero_k_is_empty() {
        assert!(engine().recommend(&Query::new("java developer"), 0).is_empty());
    }

    #[test]
    fn test_blank_query_is_empty() {
        assert!(engine().recommend(&Query::new("   "), 5).is_empty());
    }

    #[test]
    fn test_unknown_terms_fill_with_low_relevance() {
        let results = engine().recommend(&Query::new("kubernetes terraform"), 2);

        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|r| r.low_relevance));
        assert_eq!(results[0].item.url, "url1");
    }

    #[test]
    fn test_preference_boost_applied() {
        let query = Query::new("java developer").with_preferences([TestType::PersonalityBehavior]);
        let results = engine().recommend(&query, 2);

        let leadership = results.iter().find(|r| r.item.url == "url2").unwrap();
        assert!((leadership.adjusted_score - (leadership.similarity_score + 0.15)).abs() < 1e-6);
        assert!(!leadership.low_relevance);

        let java = results.iter().find(|r| r.item.url == "url1").unwrap();
        assert_eq!(java.adjusted_score, java.similarity_score);
    }

    #[test]
    fn test_duration_filter() {
        let e = engine();
        assert_eq!(e.recommend(&Query::new("java").with_max_duration(40), 5).len(), 2);
        assert!(e.recommend(&Query::new("java").with_max_duration(30), 5).is_empty());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let catalog = Catalog::new(vec![CatalogItem::new("Java", "u", "java")]).unwrap();
        let config = RankingConfig {
            candidate_pool: 0,
            ..RankingConfig::default()
        };
        assert!(RecommendationEngine::with_config(catalog, config).is_err());
    }

    #[test]
    fn test_stop_word_catalog_fails_construction() {
        let catalog = Catalog::new(vec![CatalogItem::new("The", "u", "and of")]).unwrap();
        assert!(matches!(
            RecommendationEngine::new(catalog),
            Err(crate::Error::Index(lerecherche::Error::EmptyVocabulary))
        ));
    }
}
