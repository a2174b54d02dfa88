//! Generative backend trait

use async_trait::async_trait;

use crate::error::Result;

/// Text-completion capability consumed by the composer and classifier
#[async_trait]
pub trait GenerativeBackend: Send + Sync {
    /// Complete a prompt
    ///
    /// Fails with [`crate::Error::Backend`] on quota exhaustion, network
    /// failure, or invalid credentials.
    async fn complete(&self, prompt: &str, max_tokens: u32, temperature: f32) -> Result<String>;

    /// Check if the backend is reachable
    async fn health_check(&self) -> Result<bool>;

    /// Backend name for logging
    fn name(&self) -> &str;

    /// Model being used
    fn model(&self) -> &str;
}
