use std::sync::Arc;

use rag_memory::core::config::RagConfig;
use rag_memory::rag::{
    HashingEmbedder, IndexerInput, MemoryScope, MemoryService, RetrievalQuery, VectorMetadata,
};

fn service(min_score: f64) -> MemoryService {
    let config = RagConfig {
        min_score,
        ..RagConfig::default()
    };
    let embedder = Arc::new(HashingEmbedder::new(config.embedding_dimensions).unwrap());
    MemoryService::new(&config, embedder)
}

fn input(id: &str, text: &str, scope: MemoryScope, user: &str) -> IndexerInput {
    IndexerInput {
        id: id.to_string(),
        summarized_text: text.to_string(),
        scope,
        metadata: VectorMetadata::new(user, "crm").with_field("priority", serde_json::json!("high")),
    }
}

#[test]
fn indexed_memories_are_retrieved_per_owner() {
    let svc = service(-1.0);
    let result = svc.indexer().index_batch(&[
        input("A", "invoice process", MemoryScope::User, "u1"),
        input("B", "refund policy", MemoryScope::Business, "ops"),
    ]);
    assert_eq!(result.indexed, 2);
    assert!(result.failed.is_empty());

    let as_u1 = svc
        .retriever()
        .retrieve(&RetrievalQuery {
            query_text: "invoice process".to_string(),
            user_id: "u1".to_string(),
            agent_id: None,
            scopes: vec![MemoryScope::User, MemoryScope::Business],
            limit: 5,
        })
        .unwrap();
    assert_eq!(as_u1.len(), 2);
    assert_eq!(as_u1[0].id, "A");
    assert!(as_u1[0].score >= as_u1[1].score);
    assert_eq!(
        as_u1[0].metadata.extra.get("priority"),
        Some(&serde_json::json!("high"))
    );

    let as_u2 = svc
        .query("u2", "invoice process", &[MemoryScope::User, MemoryScope::Business])
        .unwrap();
    let ids: Vec<&str> = as_u2.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["B"]);
}

#[test]
fn failed_batch_items_are_reported_not_raised() {
    let svc = service(0.0);
    let result = svc.indexer().index_batch(&[
        input("good", "shipping rules", MemoryScope::Agent, "u1"),
        input("empty", "", MemoryScope::Agent, "u1"),
    ]);

    assert_eq!(result.indexed, 1);
    assert_eq!(result.failed.len(), 1);
    assert_eq!(result.failed[0].record_id, "empty");
    assert_eq!(svc.stats().total_records, 1);
}

#[test]
fn nothing_matched_is_an_empty_ok() {
    let svc = service(0.99);
    svc.indexer()
        .index(&input("B", "refund policy", MemoryScope::Business, "ops"))
        .unwrap();

    let texts = svc
        .retriever()
        .retrieve_as_text(&RetrievalQuery {
            query_text: "quarterly tax filing deadline".to_string(),
            user_id: "u1".to_string(),
            agent_id: None,
            scopes: MemoryScope::ALL.to_vec(),
            limit: 5,
        })
        .unwrap();
    assert!(texts.is_empty());
}
