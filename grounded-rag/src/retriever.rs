//! Top-k retrieval over a [`DocumentStore`].

use std::sync::Arc;

use tracing::{debug, error};

use crate::config::RagConfig;
use crate::document::SearchResult;
use crate::error::{RagError, Result};
use crate::store::DocumentStore;

/// Retrieves the documents most similar to a query.
///
/// Every failure of the underlying store, including failing to embed the
/// query, is reported as [`RagError::RetrievalError`]. Nothing is retried.
///
/// # Example
///
/// ```rust,ignore
/// let retriever = Retriever::new(Arc::new(store), RagConfig::default());
/// for result in retriever.retrieve("Tell me something about the exhibit").await? {
///     println!("{:.3} {}", result.score, result.document.text);
/// }
/// ```
#[derive(Clone)]
pub struct Retriever {
    store: Arc<DocumentStore>,
    config: RagConfig,
}

impl Retriever {
    /// Create a retriever over `store`.
    pub fn new(store: Arc<DocumentStore>, config: RagConfig) -> Self {
        Self { store, config }
    }

    /// Retrieve the configured `top_k` documents for `query`.
    pub async fn retrieve(&self, query: &str) -> Result<Vec<SearchResult>> {
        self.retrieve_with_k(query, self.config.top_k).await
    }

    /// Retrieve at most `k` documents for `query`, best first.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::InvalidInput`] if `k == 0` or `query` is blank, and
    /// [`RagError::RetrievalError`] if the store fails or returns more than
    /// `k` results, a non-finite score, or results out of score order.
    pub async fn retrieve_with_k(&self, query: &str, k: usize) -> Result<Vec<SearchResult>> {
        if k == 0 {
            return Err(RagError::InvalidInput("k must be at least 1".to_string()));
        }
        if query.trim().is_empty() {
            return Err(RagError::InvalidInput("query must not be empty".to_string()));
        }

        let results = self.store.similarity_search_with_score(query, k).await.map_err(|e| {
            error!(collection = self.store.collection(), error = %e, "retrieval failed");
            RagError::RetrievalError(format!(
                "search failed in collection '{}': {e}",
                self.store.collection()
            ))
        })?;

        validate_results(&results, k)?;

        let results: Vec<SearchResult> = match self.config.similarity_threshold {
            Some(threshold) => results.into_iter().filter(|r| r.score >= threshold).collect(),
            None => results,
        };

        debug!(collection = self.store.collection(), k, result_count = results.len(), "retrieved");
        Ok(results)
    }
}

fn validate_results(results: &[SearchResult], k: usize) -> Result<()> {
    if results.len() > k {
        return Err(RagError::RetrievalError(format!(
            "store returned {} results for k = {k}",
            results.len()
        )));
    }
    if let Some(bad) = results.iter().find(|r| !r.score.is_finite()) {
        return Err(RagError::RetrievalError(format!(
            "store returned non-finite score {} for document '{}'",
            bad.score, bad.document.id
        )));
    }
    if results.windows(2).any(|w| w[0].score < w[1].score) {
        return Err(RagError::RetrievalError(
            "store returned results out of similarity order".to_string(),
        ));
    }
    Ok(())
}
