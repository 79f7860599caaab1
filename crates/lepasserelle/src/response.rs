// Response Shaping
//
// *La Réponse* (The Response) - Caller-facing payload built from ranked candidates

use leconseil::{EnrichedCandidate, TestType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::warn;

/// One recommended assessment, as presented to callers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendedAssessment {
    /// Assessment URL
    pub url: String,
    /// Assessment name
    pub name: String,
    /// Adaptive testing support, "Yes" or "No"
    pub adaptive_support: String,
    /// Catalog description
    pub description: String,
    /// Duration in minutes
    pub duration: u32,
    /// Remote testing support, "Yes" or "No"
    pub remote_support: String,
    /// Test type labels, primary first
    pub test_type: Vec<String>,
    /// Adjusted score
    pub score: f32,
    /// Score fell below the relevance threshold
    pub low_relevance: bool,
}

impl From<&EnrichedCandidate> for RecommendedAssessment {
    fn from(candidate: &EnrichedCandidate) -> Self {
        Self {
            url: candidate.item.url.clone(),
            name: candidate.item.name.clone(),
            adaptive_support: yes_no(candidate.adaptive_support),
            description: candidate.item.description.clone(),
            duration: candidate.duration_minutes,
            remote_support: yes_no(candidate.remote_support),
            test_type: candidate
                .test_type
                .iter()
                .map(|t| t.label().to_string())
                .collect(),
            score: candidate.adjusted_score,
            low_relevance: candidate.low_relevance,
        }
    }
}

/// Full recommendation payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationResponse {
    /// Ranked assessments
    pub recommended_assessments: Vec<RecommendedAssessment>,
}

impl RecommendationResponse {
    /// Shape ranked candidates, keeping at most `max` of them
    pub fn from_candidates(candidates: &[EnrichedCandidate], max: usize) -> Self {
        Self {
            recommended_assessments: candidates
                .iter()
                .take(max)
                .map(RecommendedAssessment::from)
                .collect(),
        }
    }
}

fn yes_no(flag: bool) -> String {
    let label = if flag { "Yes" } else { "No" };
    label.to_string()
}

/// Parse preferred test type names, skipping unknown ones
///
/// Unknown names can never match an inferred category, so they are dropped with
/// a warning instead of failing the request.
pub fn parse_preferences<S: AsRef<str>>(names: &[S]) -> BTreeSet<TestType> {
    names
        .iter()
        .filter_map(|name| match name.as_ref().parse::<TestType>() {
            Ok(t) => Some(t),
            Err(e) => {
                warn!("Ignoring preference: {}", e);
                None
            }
        })
        .collect()
}
