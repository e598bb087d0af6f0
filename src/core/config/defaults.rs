use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const DEFAULT_MIN_SCORE: f64 = 0.15;
pub const DEFAULT_RETRIEVAL_LIMIT: usize = 5;
pub const DEFAULT_EMBEDDING_DIMENSIONS: usize = 256;

/// Settings for the memory subsystem, read from the `rag` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RagConfig {
    /// When false, queries through `MemoryService` return nothing
    pub enabled: bool,
    /// Retrieval score floor, in [-1, 1]
    pub min_score: f64,
    /// Default top-k used by `MemoryService::query`
    pub retrieval_limit: usize,
    /// Dimension of the bundled hashing embedder
    pub embedding_dimensions: usize,
    /// Reject records whose embedding length differs from the embedder's
    pub strict_dimensions: bool,
}

impl Default for RagConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            min_score: DEFAULT_MIN_SCORE,
            retrieval_limit: DEFAULT_RETRIEVAL_LIMIT,
            embedding_dimensions: DEFAULT_EMBEDDING_DIMENSIONS,
            strict_dimensions: false,
        }
    }
}

impl RagConfig {
    /// Reads the `rag` section of a merged config document.
    ///
    /// Missing keys fall back to defaults and out-of-range values are
    /// clamped, so this never fails; run `validate_config` first to surface
    /// mistakes instead of silently correcting them.
    pub fn from_value(config: &Value) -> Self {
        let defaults = Self::default();
        let section = config.get("rag");
        let field = |key: &str| section.and_then(|v| v.get(key));

        let enabled = field("enabled")
            .and_then(|v| v.as_bool())
            .unwrap_or(defaults.enabled);

        let min_score = field("min_score")
            .and_then(|v| v.as_f64())
            .unwrap_or(defaults.min_score)
            .clamp(-1.0, 1.0);

        let retrieval_limit = field("retrieval_limit")
            .and_then(|v| v.as_u64())
            .map(|v| v.clamp(1, 100) as usize)
            .unwrap_or(defaults.retrieval_limit);

        let embedding_dimensions = field("embedding_dimensions")
            .and_then(|v| v.as_u64())
            .map(|v| v.clamp(1, 65_536) as usize)
            .unwrap_or(defaults.embedding_dimensions);

        let strict_dimensions = field("strict_dimensions")
            .and_then(|v| v.as_bool())
            .unwrap_or(defaults.strict_dimensions);

        Self {
            enabled,
            min_score,
            retrieval_limit,
            embedding_dimensions,
            strict_dimensions,
        }
    }
}
