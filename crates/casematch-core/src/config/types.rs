//! Configuration type definitions

use serde::{Deserialize, Serialize};

use crate::similarity::DEFAULT_THRESHOLD;

/// Default threshold for the all-pairs duplicate sweep
pub const DEFAULT_DUPLICATE_THRESHOLD: f64 = 0.85;

/// Engine configuration, read from `casematch.toml`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Ranking of candidates against one query record
    #[serde(default)]
    pub similar: SimilarConfig,

    /// All-pairs duplicate sweep
    #[serde(default)]
    pub duplicates: DuplicatesConfig,
}

/// Settings for `similar` lookups
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarConfig {
    /// Keep candidates scoring strictly above this value
    #[serde(default = "default_similar_threshold")]
    pub threshold: f64,

    /// Maximum results to return (optional; unlimited when absent)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
}

impl Default for SimilarConfig {
    fn default() -> Self {
        Self {
            threshold: default_similar_threshold(),
            limit: None,
        }
    }
}

/// Settings for the duplicate sweep
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DuplicatesConfig {
    /// Keep pairs scoring strictly above this value
    #[serde(default = "default_duplicate_threshold")]
    pub threshold: f64,
}

impl Default for DuplicatesConfig {
    fn default() -> Self {
        Self {
            threshold: default_duplicate_threshold(),
        }
    }
}

fn default_similar_threshold() -> f64 {
    DEFAULT_THRESHOLD
}

fn default_duplicate_threshold() -> f64 {
    DEFAULT_DUPLICATE_THRESHOLD
}
