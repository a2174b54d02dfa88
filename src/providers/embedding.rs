//! Embedding provider trait

use async_trait::async_trait;

use crate::error::Result;

/// Maps text to fixed-length numeric vectors
///
/// Embedding-space consistency is a hard requirement: the provider used to
/// build the index must be the one used at query time.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Generate an embedding for a single text
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Generate embeddings for multiple texts
    ///
    /// Default implementation calls `embed` sequentially; implementations
    /// with native batch support should override it.
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let mut embeddings = Vec::with_capacity(texts.len());
        for text in texts {
            embeddings.push(self.embed(text).await?);
        }
        Ok(embeddings)
    }

    /// Fixed output dimension of this model
    fn dimensions(&self) -> usize;

    /// Provider name for logging
    fn name(&self) -> &str;
}
