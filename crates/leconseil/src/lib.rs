// leconseil - Recommendation Engine
//
// *Le Conseil* (The Advice) - Turns a hiring query into a diversified shortlist of assessments

#![warn(missing_docs)]
#![warn(unused_extern_crates)]

pub mod attributes;
pub mod config;
pub mod engine;
pub mod error;
pub mod ranking;

pub use attributes::{infer, InferredAttributes, TestType};
pub use config::RankingConfig;
pub use engine::{EnrichedCandidate, Query, RecommendationEngine};
pub use error::{Error, Result};
