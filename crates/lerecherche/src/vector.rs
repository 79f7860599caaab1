// Sparse Vectors
//
// *Le Vecteur* (The Vector) - Term-weight vectors with cosine similarity

use serde::{Deserialize, Serialize};

/// Sparse vector of `(term_id, weight)` pairs sorted by term id
///
/// Only non-zero weights are stored. A vector with no entries is the zero
/// vector and has zero similarity to everything.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SparseVector {
    entries: Vec<(usize, f32)>,
}

impl SparseVector {
    /// Build a vector from arbitrary-order entries
    ///
    /// Entries are sorted by term id, repeated ids are summed, and zero
    /// weights are dropped.
    pub fn from_entries(mut entries: Vec<(usize, f32)>) -> Self {
        entries.sort_by_key(|(term, _)| *term);

        let mut merged: Vec<(usize, f32)> = Vec::with_capacity(entries.len());
        for (term, weight) in entries {
            match merged.last_mut() {
                Some((last, total)) if *last == term => *total += weight,
                _ => merged.push((term, weight)),
            }
        }
        merged.retain(|(_, weight)| *weight != 0.0);

        Self { entries: merged }
    }

    /// Stored `(term_id, weight)` pairs in ascending term order
    pub fn entries(&self) -> &[(usize, f32)] {
        &self.entries
    }

    /// Number of non-zero terms
    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    /// Check whether this is the zero vector
    pub fn is_zero(&self) -> bool {
        self.entries.is_empty()
    }

    /// Weight of a term, zero when absent
    pub fn weight(&self, term: usize) -> f32 {
        self.entries
            .binary_search_by_key(&term, |(t, _)| *t)
            .map(|i| self.entries[i].1)
            .unwrap_or(0.0)
    }

    /// Euclidean norm
    pub fn norm(&self) -> f32 {
        self.entries.iter().map(|(_, w)| w * w).sum::<f32>().sqrt()
    }

    /// Scale to unit length in place; the zero vector is left unchanged
    pub fn normalize(&mut self) {
        let norm = self.norm();
        if norm > 0.0 {
            for (_, weight) in &mut self.entries {
                *weight /= norm;
            }
        }
    }

    /// Dot product via a merge over both sorted entry lists
    pub fn dot(&self, other: &SparseVector) -> f32 {
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0;

        while i < self.entries.len() && j < other.entries.len() {
            let (ta, wa) = self.entries[i];
            let (tb, wb) = other.entries[j];
            match ta.cmp(&tb) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += wa * wb;
                    i += 1;
                    j += 1;
                }
            }
        }

        sum
    }
}

/// Calculate cosine similarity between two sparse vectors
///
/// Cosine similarity = (A · B) / (||A|| * ||B||)
/// Returns 0.0 if either vector is the zero vector.
pub fn cosine_similarity(a: &SparseVector, b: &SparseVector) -> f32 {
    let norm_a = a.norm();
    let norm_b = b.norm();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    a.dot(b) / (norm_a * norm_b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_entries_sorts_and_merges() {
        let v = SparseVector::from_entries(vec![(3, 1.0), (1, 2.0), (3, 0.5), (2, 0.0)]);
        assert_eq!(v.entries(), &[(1, 2.0), (3, 1.5)]);
        assert_eq!(v.nnz(), 2);
    }

    #[test]
    fn test_weight_lookup() {
        let v = SparseVector::from_entries(vec![(4, 0.25), (9, 0.75)]);
        assert_eq!(v.weight(9), 0.75);
        assert_eq!(v.weight(5), 0.0);
    }

    #[test]
    fn test_normalize() {
        let mut v = SparseVector::from_entries(vec![(0, 3.0), (1, 4.0)]);
        v.normalize();
        assert!((v.norm() - 1.0).abs() < 1e-6);
        assert!((v.weight(0) - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_normalize_zero_vector() {
        let mut v = SparseVector::default();
        v.normalize();
        assert!(v.is_zero());
    }

    #[test]
    fn test_cosine_similarity() {
        let a = SparseVector::from_entries(vec![(0, 1.0)]);
        let b = SparseVector::from_entries(vec![(0, 2.0)]);
        assert!((cosine_similarity(&a, &b) - 1.0).abs() < f32::EPSILON);

        let c = SparseVector::from_entries(vec![(1, 1.0)]);
        assert_eq!(cosine_similarity(&a, &c), 0.0);
    }

    #[test]
    fn test_cosine_with_zero_vector() {
        let a = SparseVector::from_entries(vec![(0, 1.0)]);
        assert_eq!(cosine_similarity(&a, &SparseVector::default()), 0.0);
    }

    #[test]
    fn test_dot_partial_overlap() {
        let a = SparseVector::from_entries(vec![(0, 1.0), (2, 2.0), (5, 1.0)]);
        let b = SparseVector::from_entries(vec![(2, 3.0), (4, 1.0), (5, 2.0)]);
        assert_eq!(a.dot(&b), 8.0);
    }
}
