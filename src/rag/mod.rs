//! RAG (Retrieval-Augmented Generation) memory module.
//!
//! This module provides:
//! - `VectorStore`: scope- and owner-filtered similarity search over stored records
//! - `RagIndexer`: text to embedded record, with failure-isolating batches
//! - `RagRetriever`: query to ranked memories above a score floor
//! - `MemoryService`: the three wired together from configuration

mod embedder;
mod in_memory;
mod indexer;
mod retriever;
mod service;
mod store;
mod types;

#[cfg(test)]
mod tests;

pub use embedder::{Embedder, HashingEmbedder};
pub use in_memory::InMemoryVectorStore;
pub use indexer::{DefaultRagIndexer, IndexBatchResult, RagIndexer};
pub use retriever::{DefaultRagRetriever, RagRetriever};
pub use service::{MemoryService, MemoryStats};
pub use store::{is_visible, SimilarityQuery, SimilarityResult, VectorStore};
pub use types::{
    Embedding, IndexerInput, MemoryScope, RetrievalQuery, RetrievalResult, VectorMetadata,
    VectorRecord,
};
