// Ranking configuration

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Tunables of the recommendation pipeline
///
/// Defaults are the production constants; every field can be overridden from
/// the `[ranking]` section of the config file.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingConfig {
    /// Items fetched from the corpus index before filtering, independent of `k`
    pub candidate_pool: usize,

    /// Score added when a candidate matches a preferred test type
    pub preference_boost: f32,

    /// Scores below this are flagged low relevance
    pub relevance_threshold: f32,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            candidate_pool: 100,
            preference_boost: 0.15,
            relevance_threshold: 0.02,
        }
    }
}

impl RankingConfig {
    /// Reject settings the pipeline cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.candidate_pool == 0 {
            return Err(Error::config_error(
                "candidate_pool must be at least 1",
                Some("Remove the setting to use the default of 100".to_string()),
            ));
        }
        if !self.preference_boost.is_finite() || !self.relevance_threshold.is_finite() {
            return Err(Error::config_error(
                "preference_boost and relevance_threshold must be finite numbers",
                None,
            ));
        }
        Ok(())
    }
}
