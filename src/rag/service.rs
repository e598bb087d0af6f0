use std::sync::Arc;

use serde::Serialize;

use super::embedder::Embedder;
use super::in_memory::InMemoryVectorStore;
use super::indexer::{DefaultRagIndexer, RagIndexer};
use super::retriever::{DefaultRagRetriever, RagRetriever};
use super::store::VectorStore;
use super::types::{MemoryScope, RetrievalQuery, RetrievalResult};
use crate::core::config::{ConfigService, RagConfig};
use crate::core::errors::{ConfigError, RetrieverError};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemoryStats {
    pub enabled: bool,
    pub total_records: usize,
    pub user_records: usize,
    pub agent_records: usize,
    pub business_records: usize,
    pub dimensions: usize,
    pub retrieval_limit: usize,
    pub min_score: f64,
}

/// Owns one store and the indexer/retriever pair built on top of it.
#[derive(Clone)]
pub struct MemoryService {
    store: Arc<dyn VectorStore>,
    indexer: Arc<dyn RagIndexer>,
    retriever: Arc<dyn RagRetriever>,
    embedder: Arc<dyn Embedder>,
    config: RagConfig,
}

impl MemoryService {
    pub fn new(config: &RagConfig, embedder: Arc<dyn Embedder>) -> Self {
        let store: Arc<dyn VectorStore> = if config.strict_dimensions {
            Arc::new(InMemoryVectorStore::with_dimensions(embedder.dimensions()))
        } else {
            Arc::new(InMemoryVectorStore::new())
        };
        Self::with_store(config, store, embedder)
    }

    /// Builds the service around an existing store backend.
    pub fn with_store(
        config: &RagConfig,
        store: Arc<dyn VectorStore>,
        embedder: Arc<dyn Embedder>,
    ) -> Self {
        let indexer: Arc<dyn RagIndexer> =
            Arc::new(DefaultRagIndexer::new(store.clone(), embedder.clone()));
        let retriever: Arc<dyn RagRetriever> = Arc::new(DefaultRagRetriever::new(
            store.clone(),
            embedder.clone(),
            config.min_score,
        ));

        tracing::info!(
            enabled = config.enabled,
            dimensions = embedder.dimensions(),
            strict_dimensions = config.strict_dimensions,
            min_score = config.min_score,
            "memory service initialized"
        );

        Self {
            store,
            indexer,
            retriever,
            embedder,
            config: config.clone(),
        }
    }

    pub fn from_config(
        config_service: &ConfigService,
        embedder: Arc<dyn Embedder>,
    ) -> Result<Self, ConfigError> {
        let config = config_service.load_rag_config()?;
        Ok(Self::new(&config, embedder))
    }

    pub fn config(&self) -> &RagConfig {
        &self.config
    }

    pub fn enabled(&self) -> bool {
        self.config.enabled
    }

    pub fn store(&self) -> &Arc<dyn VectorStore> {
        &self.store
    }

    pub fn indexer(&self) -> &Arc<dyn RagIndexer> {
        &self.indexer
    }

    pub fn retriever(&self) -> &Arc<dyn RagRetriever> {
        &self.retriever
    }

    /// Retrieves through the configured retriever unless memory is disabled.
    pub fn retrieve(&self, query: &RetrievalQuery) -> Result<Vec<RetrievalResult>, RetrieverError> {
        if !self.config.enabled {
            return Ok(Vec::new());
        }

        self.retriever.retrieve(query)
    }

    /// Retrieves with the configured default limit.
    pub fn query(
        &self,
        user_id: &str,
        query_text: &str,
        scopes: &[MemoryScope],
    ) -> Result<Vec<RetrievalResult>, RetrieverError> {
        self.retrieve(&RetrievalQuery {
            query_text: query_text.to_string(),
            user_id: user_id.to_string(),
            agent_id: None,
            scopes: scopes.to_vec(),
            limit: self.config.retrieval_limit,
        })
    }

    pub fn stats(&self) -> MemoryStats {
        MemoryStats {
            enabled: self.config.enabled,
            total_records: self.store.count(),
            user_records: self.store.count_by_scope(MemoryScope::User),
            agent_records: self.store.count_by_scope(MemoryScope::Agent),
            business_records: self.store.count_by_scope(MemoryScope::Business),
            dimensions: self.embedder.dimensions(),
            retrieval_limit: self.config.retrieval_limit,
            min_score: self.config.min_score,
        }
    }

    /// Drops every stored memory, returning how many were removed.
    pub fn reset(&self) -> usize {
        let removed = self.store.clear();
        tracing::info!(removed, "memory store reset");
        removed
    }
}
