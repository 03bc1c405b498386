//! Tests for the in-memory vector store.

use std::collections::HashMap;

use grounded_rag::{Document, EmbeddedDocument, InMemoryVectorStore, RagError, VectorStore};
use proptest::prelude::*;

/// Generate a non-zero L2-normalized embedding of the given dimension.
fn arb_normalized_embedding(dim: usize) -> impl Strategy<Value = Vec<f32>> {
    proptest::collection::vec(-1.0f32..1.0f32, dim).prop_filter_map(
        "non-zero embedding",
        |mut v| {
            let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
            if norm < 1e-8 {
                return None;
            }
            for val in &mut v {
                *val /= norm;
            }
            Some(v)
        },
    )
}

/// Generate a document with a normalized embedding.
fn arb_document(dim: usize) -> impl Strategy<Value = EmbeddedDocument> {
    ("[a-z]{3,8}", "[a-z ]{5,30}", arb_normalized_embedding(dim)).prop_map(
        |(id, text, embedding)| EmbeddedDocument { document: Document::new(id, text), embedding },
    )
}

fn embedded(id: &str, embedding: Vec<f32>) -> EmbeddedDocument {
    EmbeddedDocument { document: Document::new(id, format!("text of {id}")), embedding }
}

/// Searching returns results ordered by descending cosine similarity, at
/// most `top_k` of them.
mod prop_inmemory_search_ordering {
    use super::*;

    const DIM: usize = 16;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn results_ordered_descending_and_bounded_by_top_k(
            documents in proptest::collection::vec(arb_document(DIM), 1..20),
            query in arb_normalized_embedding(DIM),
            top_k in 1usize..25,
        ) {
            let rt = tokio::runtime::Runtime::new().unwrap();
            let (results, unique_count) = rt.block_on(async {
                let store = InMemoryVectorStore::new();
                store.create_collection("test", DIM).await.unwrap();

                // Deduplicate by id so the count below is exact
                let mut deduped: HashMap<String, EmbeddedDocument> = HashMap::new();
                for doc in &documents {
                    deduped.entry(doc.document.id.clone()).or_insert_with(|| doc.clone());
                }
                let unique: Vec<EmbeddedDocument> = deduped.into_values().collect();
                let count = unique.len();

                store.upsert("test", &unique).await.unwrap();
                let results = store.search("test", &query, top_k).await.unwrap();
                (results, count)
            });

            prop_assert!(results.len() <= top_k);
            prop_assert_eq!(results.len(), top_k.min(unique_count));

            for window in results.windows(2) {
                prop_assert!(
                    window[0].score >= window[1].score,
                    "results not in descending order: {} < {}",
                    window[0].score,
                    window[1].score,
                );
            }
        }
    }
}

#[tokio::test]
async fn upsert_replaces_existing_id() {
    let store = InMemoryVectorStore::new();
    store.create_collection("c", 2).await.unwrap();
    store.upsert("c", &[embedded("a", vec![1.0, 0.0])]).await.unwrap();

    let replacement = EmbeddedDocument {
        document: Document::new("a", "replacement"),
        embedding: vec![0.0, 1.0],
    };
    store.upsert("c", &[replacement]).await.unwrap();

    let results = store.search("c", &[0.0, 1.0], 10).await.unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].document.text, "replacement");
    assert!((results[0].score - 1.0).abs() < 1e-6);
}

#[tokio::test]
async fn equal_scores_keep_insertion_order() {
    let store = InMemoryVectorStore::new();
    store.create_collection("c", 2).await.unwrap();
    store
        .upsert(
            "c",
            &[
                embedded("first", vec![1.0, 0.0]),
                embedded("second", vec![2.0, 0.0]),
                embedded("third", vec![0.0, 1.0]),
            ],
        )
        .await
        .unwrap();

    for _ in 0..3 {
        let results = store.search("c", &[1.0, 0.0], 2).await.unwrap();
        let ids: Vec<&str> = results.iter().map(|r| r.document.id.as_str()).collect();
        assert_eq!(ids, vec!["first", "second"]);
    }
}

#[tokio::test]
async fn delete_removes_documents() {
    let store = InMemoryVectorStore::new();
    store.create_collection("c", 2).await.unwrap();
    store
        .upsert("c", &[embedded("a", vec![1.0, 0.0]), embedded("b", vec![0.0, 1.0])])
        .await
        .unwrap();

    store.delete("c", &["a"]).await.unwrap();

    let results = store.search("c", &[1.0, 0.0], 10).await.unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].document.id, "b");
}

#[tokio::test]
async fn missing_collection_is_a_store_error() {
    let store = InMemoryVectorStore::new();
    let err = store.search("nope", &[1.0], 1).await.unwrap_err();
    assert!(matches!(err, RagError::VectorStoreError { .. }));
}

#[tokio::test]
async fn dimension_mismatch_is_rejected() {
    let store = InMemoryVectorStore::new();
    store.create_collection("c", 3).await.unwrap();

    let upsert = store.upsert("c", &[embedded("a", vec![1.0, 0.0])]).await;
    assert!(matches!(upsert, Err(RagError::VectorStoreError { .. })));

    let search = store.search("c", &[1.0, 0.0], 1).await;
    assert!(matches!(search, Err(RagError::VectorStoreError { .. })));
}

#[tokio::test]
async fn delete_collection_drops_data() {
    let store = InMemoryVectorStore::new();
    store.create_collection("c", 2).await.unwrap();
    store.upsert("c", &[embedded("a", vec![1.0, 0.0])]).await.unwrap();
    store.delete_collection("c").await.unwrap();

    assert!(store.search("c", &[1.0, 0.0], 1).await.is_err());
}
