//! Query-time retrieval: embed the query and fetch the nearest chunks

use std::sync::Arc;

use crate::providers::EmbeddingProvider;
use crate::types::RetrievedDoc;

use super::store::VectorIndex;

/// Retrieves the top-matching chunks for a query
///
/// Uses the same embedding provider the index was built with; mixing
/// providers silently corrupts ranking, so the engine wires one provider
/// through both paths.
pub struct Retriever {
    embedder: Arc<dyn EmbeddingProvider>,
    index: Arc<VectorIndex>,
}

impl Retriever {
    /// Create a new retriever
    pub fn new(embedder: Arc<dyn EmbeddingProvider>, index: Arc<VectorIndex>) -> Self {
        Self { embedder, index }
    }

    /// Retrieve up to `k` chunks for a query, in ascending distance order
    ///
    /// Degrades gracefully: any embedding or index failure is logged and
    /// yields an empty sequence rather than an error.
    pub async fn retrieve(&self, query: &str, k: usize) -> Vec<RetrievedDoc> {
        let embedding = match self.embedder.embed(query).await {
            Ok(embedding) => embedding,
            Err(e) => {
                tracing::warn!("query embedding failed, returning no context: {e}");
                return Vec::new();
            }
        };

        self.index
            .query(&embedding, k)
            .into_iter()
            .map(|hit| RetrievedDoc {
                content: hit.text,
                metadata: hit.metadata,
                distance: hit.distance,
            })
            .collect()
    }
}
