//! VectorStore trait — abstract interface for memory storage backends.
//!
//! Keeps the similarity scan behind one seam so an indexed backend can
//! replace the full scan without touching the indexer or retriever. The
//! provided implementation is `InMemoryVectorStore` in the `in_memory` module.

use serde::{Deserialize, Serialize};

use super::types::{Embedding, MemoryScope, VectorRecord};
use crate::core::errors::StoreError;

/// Similarity search request, already embedded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimilarityQuery {
    pub embedding: Embedding,
    /// Only records in one of these scopes are candidates.
    pub scopes: Vec<MemoryScope>,
    /// Owner used to filter USER-scoped records.
    pub user_id: String,
    pub limit: usize,
}

/// A candidate record with its cosine score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityResult {
    pub record: VectorRecord,
    pub score: f64,
}

/// Abstract trait for vector storage backends.
///
/// Implementations should support:
/// - Insert-or-replace by record id
/// - Scope and owner filtered similarity search, best match first
/// - Idempotent deletion
pub trait VectorStore: Send + Sync {
    /// Insert a record, or replace the record with the same id entirely.
    fn upsert_embedding(&self, record: VectorRecord) -> Result<(), StoreError>;

    /// Return at most `query.limit` visible records ordered by descending
    /// score. USER records are visible only to their owner.
    fn query_similar(&self, query: &SimilarityQuery) -> Vec<SimilarityResult>;

    /// Remove a record by id. Returns whether anything was removed.
    fn delete(&self, id: &str) -> bool;

    fn count(&self) -> usize;

    fn get(&self, id: &str) -> Option<VectorRecord>;

    fn count_by_scope(&self, scope: MemoryScope) -> usize;

    /// Drop every record, e.g. after the embedding model changes and all
    /// stored vectors are invalid. Returns the number removed.
    fn clear(&self) -> usize;
}

/// Whether `record` may be returned for `query` at all, before scoring.
pub fn is_visible(record: &VectorRecord, query: &SimilarityQuery) -> bool {
    if !query.scopes.contains(&record.scope) {
        return false;
    }
    if record.scope == MemoryScope::User && record.metadata.user_id != query.user_id {
        return false;
    }
    true
}
