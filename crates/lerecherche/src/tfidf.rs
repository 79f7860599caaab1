// TF-IDF Vectorizer
//
// Vocabulary and idf weights are fitted once and never refitted per query.

use crate::search::{Error, Result};
use crate::text::tokenize;
use crate::vector::SparseVector;
use std::collections::{BTreeMap, HashMap};

/// Fitted term-frequency / inverse-document-frequency model
///
/// Weights are raw term counts times the smoothed idf
/// `ln((1 + n) / (1 + df)) + 1`, and every transformed vector is L2-normalized.
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    /// Term to column id, ids assigned in lexicographic term order
    vocabulary: HashMap<String, usize>,

    /// Idf weight per column id
    idf: Vec<f32>,
}

impl TfidfVectorizer {
    /// Fit the vocabulary and idf weights, returning the model and the
    /// weighted document rows in input order
    pub fn fit_transform<S: AsRef<str>>(documents: &[S]) -> Result<(Self, Vec<SparseVector>)> {
        if documents.is_empty() {
            return Err(Error::EmptyCorpus);
        }

        let tokenized: Vec<Vec<String>> = documents.iter().map(|d| tokenize(d.as_ref())).collect();

        // Document frequency per term, ordered so column ids are deterministic
        let mut document_frequency: BTreeMap<&str, usize> = BTreeMap::new();
        for tokens in &tokenized {
            let mut unique: Vec<&str> = tokens.iter().map(String::as_str).collect();
            unique.sort_unstable();
            unique.dedup();
            for term in unique {
                *document_frequency.entry(term).or_default() += 1;
            }
        }

        if document_frequency.is_empty() {
            return Err(Error::EmptyVocabulary);
        }

        let n = documents.len() as f32;
        let mut vocabulary = HashMap::with_capacity(document_frequency.len());
        let mut idf = Vec::with_capacity(document_frequency.len());
        for (id, (term, df)) in document_frequency.iter().enumerate() {
            vocabulary.insert((*term).to_string(), id);
            idf.push(((1.0 + n) / (1.0 + *df as f32)).ln() + 1.0);
        }

        let vectorizer = Self { vocabulary, idf };
        let rows = tokenized
            .iter()
            .map(|tokens| vectorizer.weigh(tokens))
            .collect();

        Ok((vectorizer, rows))
    }

    /// Project text into the fitted space
    ///
    /// Out-of-vocabulary terms are ignored; text with no known terms maps to
    /// the zero vector.
    pub fn transform(&self, text: &str) -> SparseVector {
        self.weigh(&tokenize(text))
    }

    /// Number of terms in the fitted vocabulary
    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// Column id of a term, if it was seen at fit time
    pub fn term_id(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }

    /// Idf weight of a term, if it was seen at fit time
    pub fn idf(&self, term: &str) -> Option<f32> {
        self.term_id(term).map(|id| self.idf[id])
    }

    fn weigh(&self, tokens: &[String]) -> SparseVector {
        let entries = tokens
            .iter()
            .filter_map(|token| self.vocabulary.get(token))
            .map(|&id| (id, self.idf[id]))
            .collect();

        let mut vector = SparseVector::from_entries(entries);
        vector.normalize();
        vector
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus() -> Vec<&'static str> {
        vec![
            "Java Programming java skills",
            "Leadership Assessment leadership skills",
            "Verbal Reasoning verbal ability",
        ]
    }

    #[test]
    fn test_vocabulary_excludes_stop_words() {
        let (v, _) = TfidfVectorizer::fit_transform(&["the java and the sql"]).unwrap();
        assert_eq!(v.vocabulary_size(), 2);
        assert!(v.term_id("the").is_none());
        assert!(v.term_id("java").is_some());
    }

    #[test]
    fn test_smoothed_idf() {
        let (v, _) = TfidfVectorizer::fit_transform(&corpus()).unwrap();

        // "skills" appears in 2 of 3 documents, "java" in 1
        let expected_skills = (4.0f32 / 3.0).ln() + 1.0;
        let expected_java = (4.0f32 / 2.0).ln() + 1.0;
        assert!((v.idf("skills").unwrap() - expected_skills).abs() < 1e-6);
        assert!((v.idf("java").unwrap() - expected_java).abs() < 1e-6);
    }

    #[test]
    fn test_rows_are_unit_length() {
        let (_, rows) = TfidfVectorizer::fit_transform(&corpus()).unwrap();
        assert_eq!(rows.len(), 3);
        for row in rows {
            assert!((row.norm() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_term_counts_weigh_repeats() {
        let (v, rows) = TfidfVectorizer::fit_transform(&corpus()).unwrap();
        let java = v.term_id("java").unwrap();
        let programming = v.term_id("programming").unwrap();

        // Same idf, java counted twice
        assert!((rows[0].weight(java) - 2.0 * rows[0].weight(programming)).abs() < 1e-6);
    }

    #[test]
    fn test_transform_ignores_unknown_terms() {
        let (v, _) = TfidfVectorizer::fit_transform(&corpus()).unwrap();
        assert!(v.transform("kubernetes terraform").is_zero());
        assert_eq!(v.transform("java kubernetes").nnz(), 1);
    }

    #[test]
    fn test_empty_corpus() {
        let empty: [&str; 0] = [];
        assert!(matches!(
            TfidfVectorizer::fit_transform(&empty),
            Err(Error::EmptyCorpus)
        ));
    }

    #[test]
    fn test_stop_word_only_corpus() {
        assert!(matches!(
            TfidfVectorizer::fit_transform(&["the and of", "a an"]),
            Err(Error::EmptyVocabulary)
        ));
    }
}
