//! Shared test doubles and fixtures.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use grounded_rag::{
    Document, DocumentStore, EmbeddedDocument, EmbeddingProvider, InMemoryVectorStore, RagError,
    SearchResult, VectorStore,
};

pub const EXHIBIT_QUERY: &str = "Tell me something about the exhibit";

const STOPWORDS: &[&str] = &[
    "a", "about", "also", "an", "and", "are", "at", "for", "in", "is", "me", "of", "on", "the",
    "there", "to",
];

fn tokens(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
        .filter(|t| !STOPWORDS.contains(&t.as_str()))
}

/// Bag-of-words embedding over a fixed vocabulary.
///
/// Identical texts embed identically, texts sharing no content words are
/// orthogonal, and unknown words are ignored.
pub struct VocabularyEmbedding {
    vocabulary: HashMap<String, usize>,
}

impl VocabularyEmbedding {
    pub fn new<'a>(texts: impl IntoIterator<Item = &'a str>) -> Self {
        let mut vocabulary = HashMap::new();
        for text in texts {
            for token in tokens(text) {
                let next = vocabulary.len();
                vocabulary.entry(token).or_insert(next);
            }
        }
        if vocabulary.is_empty() {
            vocabulary.insert("<empty>".to_string(), 0);
        }
        Self { vocabulary }
    }

    fn vector(&self, text: &str) -> Vec<f32> {
        let mut v = vec![0.0f32; self.vocabulary.len()];
        for token in tokens(text) {
            if let Some(&i) = self.vocabulary.get(&token) {
                v[i] += 1.0;
            }
        }
        v
    }
}

#[async_trait]
impl EmbeddingProvider for VocabularyEmbedding {
    async fn embed(&self, text: &str) -> grounded_rag::Result<Vec<f32>> {
        Ok(self.vector(text))
    }

    fn dimensions(&self) -> usize {
        self.vocabulary.len()
    }
}

/// An embedding provider that is always down.
pub struct UnreachableEmbedding;

#[async_trait]
impl EmbeddingProvider for UnreachableEmbedding {
    async fn embed(&self, _text: &str) -> grounded_rag::Result<Vec<f32>> {
        Err(RagError::EmbeddingError {
            provider: "unreachable".into(),
            message: "connection refused".into(),
        })
    }

    fn dimensions(&self) -> usize {
        4
    }
}

/// A vector store whose searches fail with a connectivity error.
#[derive(Default)]
pub struct DisconnectedVectorStore {
    pub searches: AtomicUsize,
}

#[async_trait]
impl VectorStore for DisconnectedVectorStore {
    async fn create_collection(&self, _name: &str, _dimensions: usize) -> grounded_rag::Result<()> {
        Ok(())
    }

    async fn delete_collection(&self, _name: &str) -> grounded_rag::Result<()> {
        Ok(())
    }

    async fn upsert(&self, _c: &str, _documents: &[EmbeddedDocument]) -> grounded_rag::Result<()> {
        Ok(())
    }

    async fn delete(&self, _collection: &str, _ids: &[&str]) -> grounded_rag::Result<()> {
        Ok(())
    }

    async fn search(
        &self,
        _collection: &str,
        _embedding: &[f32],
        _top_k: usize,
    ) -> grounded_rag::Result<Vec<SearchResult>> {
        self.searches.fetch_add(1, Ordering::SeqCst);
        Err(RagError::VectorStoreError {
            backend: "disconnected".into(),
            message: "could not connect to server: Connection refused".into(),
        })
    }
}

/// A vector store that returns scripted results regardless of the query.
pub struct ScriptedVectorStore {
    pub results: Vec<SearchResult>,
}

#[async_trait]
impl VectorStore for ScriptedVectorStore {
    async fn create_collection(&self, _name: &str, _dimensions: usize) -> grounded_rag::Result<()> {
        Ok(())
    }

    async fn delete_collection(&self, _name: &str) -> grounded_rag::Result<()> {
        Ok(())
    }

    async fn upsert(&self, _c: &str, _documents: &[EmbeddedDocument]) -> grounded_rag::Result<()> {
        Ok(())
    }

    async fn delete(&self, _collection: &str, _ids: &[&str]) -> grounded_rag::Result<()> {
        Ok(())
    }

    async fn search(
        &self,
        _collection: &str,
        _embedding: &[f32],
        _top_k: usize,
    ) -> grounded_rag::Result<Vec<SearchResult>> {
        Ok(self.results.clone())
    }
}

/// The ten neighbourhood documents used by the demo.
pub fn sample_documents() -> Vec<Document> {
    [
        ("there are cats in the pond", "pond", "animals"),
        ("ducks are also found in the pond", "pond", "animals"),
        ("fresh apples are available at the market", "market", "food"),
        ("the market also sells fresh oranges", "market", "food"),
        ("the new art exhibit is fascinating", "museum", "art"),
        ("a sculpture exhibit is also at the museum", "museum", "art"),
        ("a new coffee shop opened on Main Street", "Main Street", "food"),
        ("the book club meets at the library", "library", "reading"),
        ("the library hosts a weekly story time for kids", "library", "reading"),
        (
            "a cooking class for beginners is offered at the community center",
            "community center",
            "classes",
        ),
    ]
    .into_iter()
    .zip(1i64..)
    .map(|((text, location, topic), id)| {
        Document::new(id.to_string(), text)
            .with_metadata("id", id)
            .with_metadata("location", location)
            .with_metadata("topic", topic)
    })
    .collect()
}

/// A store holding `documents`, embedded over their own vocabulary plus the
/// exhibit query.
pub async fn memory_store(documents: &[Document]) -> DocumentStore {
    let texts = documents.iter().map(|d| d.text.as_str()).chain([EXHIBIT_QUERY]);
    DocumentStore::from_documents(
        documents,
        Arc::new(VocabularyEmbedding::new(texts)),
        Arc::new(InMemoryVectorStore::new()),
        "my_docs",
    )
    .await
    .expect("in-memory store accepts documents")
}
