//! Indexing: raw text in, stored vector record out.

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;

use super::embedder::Embedder;
use super::store::VectorStore;
use super::types::{IndexerInput, VectorRecord};
use crate::core::errors::IndexerError;

pub trait RagIndexer: Send + Sync {
    /// Embed and store one input. Fails on blank text or on any embedder
    /// or store error.
    fn index(&self, input: &IndexerInput) -> Result<(), IndexerError>;

    /// Index every input independently; one failure never stops the rest.
    fn index_batch(&self, inputs: &[IndexerInput]) -> IndexBatchResult;

    /// Remove a record. Absent ids are a no-op.
    fn remove(&self, id: &str);
}

/// Outcome of a batch: how many succeeded and which ones failed, in input order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IndexBatchResult {
    pub indexed: usize,
    pub failed: Vec<IndexerError>,
}

pub struct DefaultRagIndexer {
    store: Arc<dyn VectorStore>,
    embedder: Arc<dyn Embedder>,
}

impl DefaultRagIndexer {
    pub fn new(store: Arc<dyn VectorStore>, embedder: Arc<dyn Embedder>) -> Self {
        Self { store, embedder }
    }
}

impl RagIndexer for DefaultRagIndexer {
    fn index(&self, input: &IndexerInput) -> Result<(), IndexerError> {
        if input.summarized_text.trim().is_empty() {
            return Err(IndexerError::new(&input.id, "Cannot index empty text"));
        }

        let embedding = self
            .embedder
            .embed(&input.summarized_text)
            .map_err(|err| IndexerError::wrap(&input.id, err))?;

        let record = VectorRecord {
            id: input.id.clone(),
            embedding,
            text: input.summarized_text.clone(),
            scope: input.scope,
            metadata: input.metadata.clone(),
            created_at: Utc::now(),
        };

        self.store
            .upsert_embedding(record)
            .map_err(|err| IndexerError::wrap(&input.id, err))?;

        tracing::debug!(id = %input.id, scope = %input.scope, "memory indexed");
        Ok(())
    }

    fn index_batch(&self, inputs: &[IndexerInput]) -> IndexBatchResult {
        let mut result = IndexBatchResult::default();

        for input in inputs {
            match self.index(input) {
                Ok(()) => result.indexed += 1,
                Err(err) => {
                    tracing::warn!("Failed to index {}: {}", err.record_id, err.message);
                    result.failed.push(err);
                }
            }
        }

        tracing::debug!(
            indexed = result.indexed,
            failed = result.failed.len(),
            "memory batch indexed"
        );
        result
    }

    fn remove(&self, id: &str) {
        let removed = self.store.delete(id);
        tracing::debug!(id, removed, "memory removed");
    }
}
