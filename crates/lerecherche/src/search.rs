// Corpus index over the assessment catalog

use crate::tfidf::TfidfVectorizer;
use crate::vector::{cosine_similarity, SparseVector};
use lecatalogue::{Catalog, CatalogItem};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Result type for corpus index operations
pub type Result<T> = std::result::Result<T, Error>;

/// Single similarity match
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    /// Position of the item in the catalog the index was built from
    pub index: usize,

    /// Cosine similarity to the query (0-1)
    pub score: f32,
}

/// Immutable TF-IDF vector space over catalog items
///
/// Built once from the catalog and read-only afterwards, so a single index can
/// serve concurrent queries without locking. A changed catalog needs a full
/// rebuild; [`CorpusIndex::fingerprint`] identifies the catalog content the
/// index was built from.
#[derive(Debug, Clone)]
pub struct CorpusIndex {
    vectorizer: TfidfVectorizer,

    /// One unit-length row per catalog item, in catalog order
    rows: Vec<SparseVector>,

    fingerprint: String,
}

impl CorpusIndex {
    /// Fit the vector space over `name + " " + description` of every item
    ///
    /// # Errors
    ///
    /// `Error::EmptyCorpus` for an empty item list, `Error::EmptyVocabulary`
    /// when no item contains a non stop word term.
    pub fn build(items: &[CatalogItem]) -> Result<Self> {
        let documents: Vec<String> = items.iter().map(CatalogItem::document).collect();
        let (vectorizer, rows) = TfidfVectorizer::fit_transform(&documents)?;

        info!(
            "Built corpus index: {} items, {} terms",
            rows.len(),
            vectorizer.vocabulary_size()
        );

        Ok(Self {
            vectorizer,
            rows,
            fingerprint: lecatalogue::fingerprint(items),
        })
    }

    /// Build the index for a validated catalog
    pub fn from_catalog(catalog: &Catalog) -> Result<Self> {
        Self::build(catalog.items())
    }

    /// Return the `n` most similar items to `query`
    ///
    /// Scores are non-increasing; equal scores keep catalog order. A query with
    /// no known terms scores 0.0 everywhere and degenerates to catalog order.
    pub fn search(&self, query: &str, n: usize) -> Vec<SearchHit> {
        if n == 0 {
            return Vec::new();
        }

        let query_vector = self.vectorizer.transform(query);
        if query_vector.is_zero() {
            debug!("Query has no vocabulary terms, all similarities are zero");
        }

        let mut hits: Vec<SearchHit> = self
            .rows
            .iter()
            .enumerate()
            .map(|(index, row)| SearchHit {
                index,
                score: cosine_similarity(&query_vector, row),
            })
            .collect();

        // Stable sort keeps ascending index among equal scores
        hits.sort_by(|a, b| b.score.total_cmp(&a.score));
        hits.truncate(n);

        debug!(
            "Corpus search returned {} hits (top score {:.4})",
            hits.len(),
            hits.first().map(|h| h.score).unwrap_or(0.0)
        );
        hits
    }

    /// Number of indexed items
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Always false for a built index
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of vocabulary terms learned at build time
    pub fn vocabulary_size(&self) -> usize {
        self.vectorizer.vocabulary_size()
    }

    /// Content hash of the items this index was built from
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    /// Check whether this index was built from exactly this catalog
    pub fn is_current(&self, catalog: &Catalog) -> bool {
        self.fingerprint == catalog.fingerprint()
    }
}

/// Corpus index errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No documents to fit
    #[error("Cannot build index over an empty corpus")]
    EmptyCorpus,

    /// Every document reduced to stop words or nothing
    #[error("Empty vocabulary: documents contain only stop words or no terms")]
    EmptyVocabulary,
}
