//! In-process vector store.
//!
//! Records live in a single `BTreeMap` keyed by id behind a `RwLock`, and
//! search is a brute-force cosine scan over every record. Nothing survives
//! the process.

use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::store::{is_visible, SimilarityQuery, SimilarityResult, VectorStore};
use super::types::{MemoryScope, VectorRecord};
use crate::core::errors::StoreError;
use crate::vector_math::rank_descending_by_cosine;

#[derive(Debug, Default)]
pub struct InMemoryVectorStore {
    records: RwLock<BTreeMap<String, VectorRecord>>,
    /// When set, upserts with a different embedding length are rejected.
    dimensions: Option<usize>,
}

impl InMemoryVectorStore {
    /// Lenient store: any embedding length is accepted, and mismatched
    /// records simply score 0 at query time.
    pub fn new() -> Self {
        Self::default()
    }

    /// Strict store pinned to `dimensions`.
    pub fn with_dimensions(dimensions: usize) -> Self {
        Self {
            records: RwLock::default(),
            dimensions: Some(dimensions),
        }
    }

    pub fn dimensions(&self) -> Option<usize> {
        self.dimensions
    }

    // Writers only insert or remove whole entries, so a poisoned map is
    // still consistent and safe to keep using.
    fn read(&self) -> RwLockReadGuard<'_, BTreeMap<String, VectorRecord>> {
        self.records.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, BTreeMap<String, VectorRecord>> {
        self.records.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl VectorStore for InMemoryVectorStore {
    fn upsert_embedding(&self, record: VectorRecord) -> Result<(), StoreError> {
        if let Some(expected) = self.dimensions {
            if record.embedding.len() != expected {
                return Err(StoreError::DimensionMismatch {
                    id: record.id,
                    expected,
                    actual: record.embedding.len(),
                });
            }
        }

        let replaced = self.write().insert(record.id.clone(), record).is_some();
        tracing::debug!(replaced, "vector record upserted");
        Ok(())
    }

    fn query_similar(&self, query: &SimilarityQuery) -> Vec<SimilarityResult> {
        if query.limit == 0 {
            return Vec::new();
        }

        let records = self.read();
        let mut ranked = rank_descending_by_cosine(
            &query.embedding,
            records
                .values()
                .filter(|record| is_visible(record, query))
                .map(|record| (record, record.embedding.as_slice())),
        );
        ranked.truncate(query.limit);

        ranked
            .into_iter()
            .map(|(record, score)| SimilarityResult {
                record: record.clone(),
                score,
            })
            .collect()
    }

    fn delete(&self, id: &str) -> bool {
        self.write().remove(id).is_some()
    }

    fn count(&self) -> usize {
        self.read().len()
    }

    fn get(&self, id: &str) -> Option<VectorRecord> {
        self.read().get(id).cloned()
    }

    fn count_by_scope(&self, scope: MemoryScope) -> usize {
        self.read()
            .values()
            .filter(|record| record.scope == scope)
            .count()
    }

    fn clear(&self) -> usize {
        let mut records = self.write();
        let removed = records.len();
        records.clear();
        removed
    }
}
