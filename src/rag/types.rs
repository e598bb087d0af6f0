//! Shared data model for the memory subsystem.
//!
//! Field names serialize in camelCase so a record round-trips as
//! `{id, embedding, text, scope, metadata, createdAt}`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Text embedding; the dimension is fixed per embedder instance.
pub type Embedding = Vec<f64>;

/// Visibility partition for stored memories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MemoryScope {
    /// Private to the owning `metadata.user_id`.
    User,
    Agent,
    Business,
}

impl MemoryScope {
    pub const ALL: [MemoryScope; 3] = [MemoryScope::User, MemoryScope::Agent, MemoryScope::Business];

    pub fn as_str(&self) -> &'static str {
        match self {
            MemoryScope::User => "USER",
            MemoryScope::Agent => "AGENT",
            MemoryScope::Business => "BUSINESS",
        }
    }
}

impl std::fmt::Display for MemoryScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ownership and provenance attached to every record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VectorMetadata {
    pub user_id: String,
    #[serde(default)]
    pub agent_id: Option<String>,
    pub source: String,
    /// Caller-defined fields, stored and returned untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl VectorMetadata {
    pub fn new(user_id: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            agent_id: None,
            source: source.into(),
            extra: Map::new(),
        }
    }

    pub fn with_agent(mut self, agent_id: impl Into<String>) -> Self {
        self.agent_id = Some(agent_id.into());
        self
    }

    pub fn with_field(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }
}

/// A stored memory entry. Replaced wholesale on re-upsert, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VectorRecord {
    pub id: String,
    pub embedding: Embedding,
    pub text: String,
    pub scope: MemoryScope,
    pub metadata: VectorMetadata,
    pub created_at: DateTime<Utc>,
}

/// A matched record projected for callers, with its cosine score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetrievalResult {
    pub id: String,
    pub text: String,
    pub score: f64,
    pub scope: MemoryScope,
    pub metadata: VectorMetadata,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetrievalQuery {
    pub query_text: String,
    pub user_id: String,
    #[serde(default)]
    pub agent_id: Option<String>,
    pub scopes: Vec<MemoryScope>,
    /// Negative limits on the wire read as 0, which retrieves nothing.
    #[serde(deserialize_with = "non_negative_limit")]
    pub limit: usize,
}

fn non_negative_limit<'de, D>(deserializer: D) -> Result<usize, D::Error>
where
    D: Deserializer<'de>,
{
    let limit = i64::deserialize(deserializer)?;
    if limit < 0 {
        return Ok(0);
    }
    Ok(usize::try_from(limit).unwrap_or(usize::MAX))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexerInput {
    pub id: String,
    pub summarized_text: String,
    pub scope: MemoryScope,
    pub metadata: VectorMetadata,
}
