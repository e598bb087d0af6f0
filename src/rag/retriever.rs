//! Retrieval: query text in, ranked memories above a score floor out.

use std::sync::Arc;

use super::embedder::Embedder;
use super::store::{SimilarityQuery, VectorStore};
use super::types::{RetrievalQuery, RetrievalResult};
use crate::core::config::defaults::DEFAULT_MIN_SCORE;
use crate::core::errors::RetrieverError;

pub trait RagRetriever: Send + Sync {
    /// Most relevant visible memories, best first. An empty `Vec` means
    /// nothing matched; it is never used to signal failure.
    fn retrieve(&self, query: &RetrievalQuery) -> Result<Vec<RetrievalResult>, RetrieverError>;

    /// Same as `retrieve`, keeping only the texts.
    fn retrieve_as_text(&self, query: &RetrievalQuery) -> Result<Vec<String>, RetrieverError> {
        Ok(self
            .retrieve(query)?
            .into_iter()
            .map(|result| result.text)
            .collect())
    }
}

pub struct DefaultRagRetriever {
    store: Arc<dyn VectorStore>,
    embedder: Arc<dyn Embedder>,
    min_score: f64,
}

impl DefaultRagRetriever {
    /// `min_score` is clamped to `[-1, 1]`; NaN falls back to the default floor.
    pub fn new(store: Arc<dyn VectorStore>, embedder: Arc<dyn Embedder>, min_score: f64) -> Self {
        let min_score = if min_score.is_nan() {
            tracing::warn!("NaN min_score, using default {}", DEFAULT_MIN_SCORE);
            DEFAULT_MIN_SCORE
        } else {
            min_score.clamp(-1.0, 1.0)
        };

        Self {
            store,
            embedder,
            min_score,
        }
    }

    pub fn min_score(&self) -> f64 {
        self.min_score
    }
}

impl RagRetriever for DefaultRagRetriever {
    fn retrieve(&self, query: &RetrievalQuery) -> Result<Vec<RetrievalResult>, RetrieverError> {
        let query_text = query.query_text.trim();
        if query_text.is_empty() || query.limit == 0 {
            return Ok(Vec::new());
        }

        let embedding = self
            .embedder
            .embed(query_text)
            .map_err(RetrieverError::Embedding)?;

        let candidates = self.store.query_similar(&SimilarityQuery {
            embedding,
            scopes: query.scopes.clone(),
            user_id: query.user_id.clone(),
            limit: query.limit,
        });
        let candidate_count = candidates.len();

        let results: Vec<RetrievalResult> = candidates
            .into_iter()
            .filter(|candidate| candidate.score >= self.min_score)
            .map(|candidate| RetrievalResult {
                id: candidate.record.id,
                text: candidate.record.text,
                score: candidate.score,
                scope: candidate.record.scope,
                metadata: candidate.record.metadata,
            })
            .collect();

        tracing::debug!(
            user_id = %query.user_id,
            candidates = candidate_count,
            admitted = results.len(),
            min_score = self.min_score,
            "memory retrieved"
        );
        Ok(results)
    }
}
