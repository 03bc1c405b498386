//! Vector store trait for storing and searching vector embeddings.

use async_trait::async_trait;

use crate::document::{EmbeddedDocument, SearchResult};
use crate::error::Result;

/// A storage backend for vector embeddings with similarity search.
///
/// Implementations manage named collections of [`EmbeddedDocument`]s and
/// support upserting, deleting, and searching by cosine similarity.
///
/// # Example
///
/// ```rust,ignore
/// use grounded_rag::{VectorStore, InMemoryVectorStore};
///
/// let store = InMemoryVectorStore::new();
/// store.create_collection("docs", 3072).await?;
/// store.upsert("docs", &documents).await?;
/// let results = store.search("docs", &query_embedding, 2).await?;
/// ```
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Create a named collection. No-op if it already exists.
    async fn create_collection(&self, name: &str, dimensions: usize) -> Result<()>;

    /// Delete a named collection and all its data.
    async fn delete_collection(&self, name: &str) -> Result<()>;

    /// Upsert documents into a collection. A document whose id is already
    /// stored replaces the previous one.
    async fn upsert(&self, collection: &str, documents: &[EmbeddedDocument]) -> Result<()>;

    /// Delete documents by their IDs from a collection.
    async fn delete(&self, collection: &str, ids: &[&str]) -> Result<()>;

    /// Search for the `top_k` most similar documents to the given embedding.
    ///
    /// Returns at most `top_k` results ordered by descending similarity
    /// score. The search either succeeds as a whole or fails.
    async fn search(
        &self,
        collection: &str,
        embedding: &[f32],
        top_k: usize,
    ) -> Result<Vec<SearchResult>>;
}
