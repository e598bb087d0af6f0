//! End-to-end tests across indexer, store and retriever.
//!
//! - scope/ownership scenario with a keyword embedder
//! - batch isolation and count accounting
//! - call counting on the query path

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use super::*;

/// One axis per vocabulary word; counts occurrences.
struct KeywordEmbedder {
    vocabulary: Vec<&'static str>,
    calls: AtomicUsize,
}

impl KeywordEmbedder {
    fn new(vocabulary: &[&'static str]) -> Self {
        Self {
            vocabulary: vocabulary.to_vec(),
            calls: AtomicUsize::new(0),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Embedder for KeywordEmbedder {
    fn embed(&self, text: &str) -> anyhow::Result<Embedding> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let lowered = text.to_lowercase();
        Ok(self
            .vocabulary
            .iter()
            .map(|word| lowered.split_whitespace().filter(|t| t == word).count() as f64)
            .collect())
    }

    fn dimensions(&self) -> usize {
        self.vocabulary.len()
    }
}

struct Harness {
    store: Arc<InMemoryVectorStore>,
    embedder: Arc<KeywordEmbedder>,
    indexer: DefaultRagIndexer,
    retriever: DefaultRagRetriever,
}

fn harness(min_score: f64) -> Harness {
    let store = Arc::new(InMemoryVectorStore::new());
    let embedder = Arc::new(KeywordEmbedder::new(&[
        "invoice", "process", "refund", "policy", "shipping",
    ]));
    Harness {
        indexer: DefaultRagIndexer::new(store.clone(), embedder.clone()),
        retriever: DefaultRagRetriever::new(store.clone(), embedder.clone(), min_score),
        store,
        embedder,
    }
}

fn input(id: &str, text: &str, scope: MemoryScope, user: &str) -> IndexerInput {
    IndexerInput {
        id: id.to_string(),
        summarized_text: text.to_string(),
        scope,
        metadata: VectorMetadata::new(user, "scenario"),
    }
}

fn query(text: &str, user: &str, scopes: &[MemoryScope], limit: usize) -> RetrievalQuery {
    RetrievalQuery {
        query_text: text.to_string(),
        user_id: user.to_string(),
        agent_id: None,
        scopes: scopes.to_vec(),
        limit,
    }
}

fn seed_scenario(h: &Harness) {
    h.indexer
        .index(&input("A", "invoice process", MemoryScope::User, "u1"))
        .unwrap();
    h.indexer
        .index(&input("B", "refund policy", MemoryScope::Business, "admin"))
        .unwrap();
}

#[test]
fn owner_sees_private_and_shared_memories_ranked() {
    let h = harness(0.1);
    seed_scenario(&h);

    let results = h
        .retriever
        .retrieve(&query(
            "invoice process refund",
            "u1",
            &[MemoryScope::User, MemoryScope::Business],
            5,
        ))
        .unwrap();

    let ids: Vec<&str> = results.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["A", "B"]);
    assert!(results[0].score > results[1].score);
}

#[test]
fn other_user_sees_only_shared_memories() {
    let h = harness(0.1);
    seed_scenario(&h);

    let results = h
        .retriever
        .retrieve(&query(
            "invoice process refund",
            "u2",
            &[MemoryScope::User, MemoryScope::Business],
            5,
        ))
        .unwrap();

    let ids: Vec<&str> = results.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["B"]);
}

#[test]
fn private_memory_hidden_even_at_perfect_similarity() {
    let h = harness(-1.0);
    seed_scenario(&h);

    let results = h
        .retriever
        .retrieve(&query("invoice process", "u2", &MemoryScope::ALL, 10))
        .unwrap();
    assert!(results.iter().all(|r| r.id != "A"));
}

#[test]
fn batch_with_blank_item_indexes_the_rest() {
    let h = harness(0.0);
    let before = h.store.count();

    let result = h.indexer.index_batch(&[
        input("ok-1", "invoice process", MemoryScope::Business, "u1"),
        input("blank", "   ", MemoryScope::Business, "u1"),
        input("ok-2", "shipping policy", MemoryScope::Business, "u1"),
    ]);

    assert_eq!(result.indexed, 2);
    assert_eq!(result.failed.len(), 1);
    assert_eq!(result.failed[0].record_id, "blank");
    assert_eq!(h.store.count(), before + 2);
}

#[test]
fn reindexing_is_overwrite_not_duplicate() {
    let h = harness(0.0);
    let item = input("same", "refund policy", MemoryScope::Agent, "u1");

    h.indexer.index(&item).unwrap();
    h.indexer.index(&item).unwrap();

    assert_eq!(h.store.count(), 1);
}

#[test]
fn results_never_exceed_limit_or_leave_scopes() {
    let h = harness(-1.0);
    for i in 0..6 {
        let scope = MemoryScope::ALL[i % 3];
        h.indexer
            .index(&input(&format!("r{i}"), "refund policy shipping", scope, "u1"))
            .unwrap();
    }

    for limit in 0..8 {
        let results = h
            .retriever
            .retrieve(&query(
                "refund",
                "u1",
                &[MemoryScope::Agent, MemoryScope::Business],
                limit,
            ))
            .unwrap();
        assert!(results.len() <= limit);
        assert!(results.iter().all(|r| r.scope != MemoryScope::User));
    }
}

#[test]
fn empty_query_never_reaches_embedder() {
    let h = harness(0.0);
    seed_scenario(&h);
    let after_seed = h.embedder.calls();

    let results = h
        .retriever
        .retrieve(&query("", "u1", &MemoryScope::ALL, 5))
        .unwrap();

    assert!(results.is_empty());
    assert_eq!(h.embedder.calls(), after_seed);
}

#[test]
fn removed_memories_stop_matching() {
    let h = harness(0.1);
    seed_scenario(&h);

    h.indexer.remove("B");
    let texts = h
        .retriever
        .retrieve_as_text(&query("refund policy", "u1", &MemoryScope::ALL, 5))
        .unwrap();
    assert!(texts.is_empty());
}

#[test]
fn negative_wire_limit_retrieves_nothing() {
    let h = harness(-1.0);
    seed_scenario(&h);
    let after_seed = h.embedder.calls();

    let query: RetrievalQuery = serde_json::from_value(serde_json::json!({
        "queryText": "invoice process",
        "userId": "u1",
        "scopes": ["USER", "BUSINESS"],
        "limit": -1
    }))
    .unwrap();

    assert!(h.retriever.retrieve(&query).unwrap().is_empty());
    assert_eq!(h.embedder.calls(), after_seed);
}
