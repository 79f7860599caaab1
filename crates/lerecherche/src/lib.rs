// lerecherche - Corpus Search
//
// *La Recherche* (The Search) - TF-IDF vector space over the catalog with cosine ranking

#![warn(missing_docs)]
#![warn(unused_extern_crates)]

pub mod search;
pub mod text;
pub mod tfidf;
pub mod vector;

pub use search::{CorpusIndex, Error, Result, SearchHit};
pub use tfidf::TfidfVectorizer;
pub use vector::{cosine_similarity, SparseVector};
