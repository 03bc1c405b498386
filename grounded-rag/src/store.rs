//! Document store: embedding plus vector storage behind one collection.
//!
//! The [`DocumentStore`] coordinates ingestion (embed → upsert) and
//! similarity search (embed query → search) by composing an
//! [`EmbeddingProvider`] with a [`VectorStore`] collection. Embeddings never
//! leave the store; callers see [`Document`]s and scores only.
//!
//! # Example
//!
//! ```rust,ignore
//! use grounded_rag::{DocumentStore, InMemoryVectorStore};
//!
//! let store = DocumentStore::builder()
//!     .embedding_provider(Arc::new(my_embedder))
//!     .vector_store(Arc::new(InMemoryVectorStore::new()))
//!     .collection("my_docs")
//!     .build()?;
//!
//! store.create_collection().await?;
//! store.add_documents(&documents).await?;
//! let results = store.similarity_search_with_score("search query", 2).await?;
//! ```

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{error, info};

use crate::document::{Document, EmbeddedDocument, SearchResult};
use crate::embedding::EmbeddingProvider;
use crate::error::{RagError, Result};
use crate::vectorstore::VectorStore;

/// A named collection of embedded documents.
///
/// Construct one via [`DocumentStore::builder()`].
pub struct DocumentStore {
    embedding_provider: Arc<dyn EmbeddingProvider>,
    vector_store: Arc<dyn VectorStore>,
    collection: String,
}

impl DocumentStore {
    /// Create a new [`DocumentStoreBuilder`].
    pub fn builder() -> DocumentStoreBuilder {
        DocumentStoreBuilder::default()
    }

    /// Create the collection, then embed and store `documents` in it.
    ///
    /// # Errors
    ///
    /// Fails on the first collection, embedding or upsert error.
    pub async fn from_documents(
        documents: &[Document],
        embedding_provider: Arc<dyn EmbeddingProvider>,
        vector_store: Arc<dyn VectorStore>,
        collection: impl Into<String>,
    ) -> Result<Self> {
        let store = Self::builder()
            .embedding_provider(embedding_provider)
            .vector_store(vector_store)
            .collection(collection)
            .build()?;
        store.create_collection().await?;
        store.add_documents(documents).await?;
        Ok(store)
    }

    /// Return the collection name.
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Create the collection in the vector store.
    ///
    /// The collection is created with the dimensionality reported by the
    /// configured [`EmbeddingProvider`].
    pub async fn create_collection(&self) -> Result<()> {
        let dimensions = self.embedding_provider.dimensions();
        self.vector_store.create_collection(&self.collection, dimensions).await.map_err(|e| {
            error!(collection = %self.collection, error = %e, "failed to create collection");
            e
        })
    }

    /// Delete the collection and everything in it.
    pub async fn delete_collection(&self) -> Result<()> {
        self.vector_store.delete_collection(&self.collection).await.map_err(|e| {
            error!(collection = %self.collection, error = %e, "failed to delete collection");
            e
        })
    }

    /// Embed and upsert `documents`, returning their ids in input order.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::InvalidInput`] for an empty id or an id repeated
    /// within the batch, [`RagError::EmbeddingError`] if embedding fails or
    /// yields vectors of the wrong size, and the vector store's error if the
    /// upsert fails.
    pub async fn add_documents(&self, documents: &[Document]) -> Result<Vec<String>> {
        if documents.is_empty() {
            return Ok(Vec::new());
        }

        let mut seen = HashSet::new();
        for document in documents {
            if document.id.is_empty() {
                return Err(RagError::InvalidInput("document id must not be empty".to_string()));
            }
            if !seen.insert(document.id.as_str()) {
                return Err(RagError::InvalidInput(format!(
                    "document id '{}' appears more than once in the batch",
                    document.id
                )));
            }
        }

        let texts: Vec<&str> = documents.iter().map(|d| d.text.as_str()).collect();
        let embeddings = self.embedding_provider.embed_batch(&texts).await.map_err(|e| {
            error!(collection = %self.collection, error = %e, "embedding failed during ingestion");
            e
        })?;

        if embeddings.len() != documents.len() {
            return Err(RagError::EmbeddingError {
                provider: "batch".to_string(),
                message: format!(
                    "expected {} embeddings, provider returned {}",
                    documents.len(),
                    embeddings.len()
                ),
            });
        }

        let embedded = documents
            .iter()
            .zip(embeddings)
            .map(|(document, embedding)| {
                self.check_dimensions(&embedding)?;
                Ok(EmbeddedDocument { document: document.clone(), embedding })
            })
            .collect::<Result<Vec<_>>>()?;

        self.vector_store.upsert(&self.collection, &embedded).await.map_err(|e| {
            error!(collection = %self.collection, error = %e, "upsert failed during ingestion");
            e
        })?;

        info!(collection = %self.collection, document_count = embedded.len(), "stored documents");
        Ok(documents.iter().map(|d| d.id.clone()).collect())
    }

    /// Delete documents by id.
    pub async fn delete(&self, ids: &[&str]) -> Result<()> {
        self.vector_store.delete(&self.collection, ids).await
    }

    /// Embed `query` and return the `k` most similar documents with their
    /// cosine similarity scores, best first.
    pub async fn similarity_search_with_score(
        &self,
        query: &str,
        k: usize,
    ) -> Result<Vec<SearchResult>> {
        let query_embedding = self.embedding_provider.embed(query).await?;
        self.check_dimensions(&query_embedding)?;
        self.vector_store.search(&self.collection, &query_embedding, k).await
    }

    /// Like [`similarity_search_with_score`](Self::similarity_search_with_score)
    /// without the scores.
    pub async fn similarity_search(&self, query: &str, k: usize) -> Result<Vec<Document>> {
        let results = self.similarity_search_with_score(query, k).await?;
        Ok(results.into_iter().map(|r| r.document).collect())
    }

    fn check_dimensions(&self, embedding: &[f32]) -> Result<()> {
        let expected = self.embedding_provider.dimensions();
        if embedding.len() != expected {
            return Err(RagError::EmbeddingError {
                provider: "dimension check".to_string(),
                message: format!(
                    "expected {expected}-dimensional embedding, got {}",
                    embedding.len()
                ),
            });
        }
        Ok(())
    }
}

/// Builder for constructing a [`DocumentStore`].
///
/// All fields are required.
#[derive(Default)]
pub struct DocumentStoreBuilder {
    embedding_provider: Option<Arc<dyn EmbeddingProvider>>,
    vector_store: Option<Arc<dyn VectorStore>>,
    collection: Option<String>,
}

impl DocumentStoreBuilder {
    /// Set the embedding provider.
    pub fn embedding_provider(mut self, provider: Arc<dyn EmbeddingProvider>) -> Self {
        self.embedding_provider = Some(provider);
        self
    }

    /// Set the vector store backend.
    pub fn vector_store(mut self, store: Arc<dyn VectorStore>) -> Self {
        self.vector_store = Some(store);
        self
    }

    /// Set the collection name.
    pub fn collection(mut self, name: impl Into<String>) -> Self {
        self.collection = Some(name.into());
        self
    }

    /// Build the [`DocumentStore`], validating that all required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::ConfigError`] if any field is missing or the
    /// collection name is empty.
    pub fn build(self) -> Result<DocumentStore> {
        let embedding_provider = self
            .embedding_provider
            .ok_or_else(|| RagError::ConfigError("embedding_provider is required".to_string()))?;
        let vector_store = self
            .vector_store
            .ok_or_else(|| RagError::ConfigError("vector_store is required".to_string()))?;
        let collection = self
            .collection
            .filter(|c| !c.is_empty())
            .ok_or_else(|| RagError::ConfigError("collection is required".to_string()))?;

        Ok(DocumentStore { embedding_provider, vector_store, collection })
    }
}
