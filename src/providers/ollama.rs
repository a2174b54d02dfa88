//! Ollama HTTP client implementing both provider traits

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::sleep;

use crate::config::LlmConfig;
use crate::error::{Error, Result};

use super::embedding::EmbeddingProvider;
use super::llm::GenerativeBackend;

/// Ollama API client with automatic retry
///
/// Serves both capabilities from one HTTP client: `/api/embeddings` for the
/// embedding provider and `/api/generate` for the generative backend.
pub struct OllamaClient {
    client: Client,
    config: LlmConfig,
}

#[derive(Serialize)]
struct GenerateRequest {
    model: String,
    prompt: String,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Serialize)]
struct GenerateOptions {
    temperature: f32,
    num_predict: u32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

#[derive(Serialize)]
struct EmbedRequest {
    model: String,
    prompt: String,
}

#[derive(Deserialize)]
struct EmbedResponse {
    embedding: Vec<f32>,
}

impl OllamaClient {
    /// Create a new client
    pub fn new(config: &LlmConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .pool_max_idle_per_host(5)
            .build()
            .map_err(|e| Error::config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    /// Retry a request with exponential backoff
    async fn retry_request<F, Fut, T>(&self, operation: F) -> Result<T>
    where
        F: Fn() -> Fut,
        Fut: std::future::Future<Output = Result<T>>,
    {
        let mut last_error = None;

        for attempt in 0..=self.config.max_retries {
            match operation().await {
                Ok(result) => return Ok(result),
                Err(e) => {
                    last_error = Some(e);
                    if attempt < self.config.max_retries {
                        let delay = Duration::from_secs(2u64.pow(attempt));
                        tracing::warn!(
                            "request failed (attempt {}/{}), retrying in {:?}",
                            attempt + 1,
                            self.config.max_retries + 1,
                            delay
                        );
                        sleep(delay).await;
                    }
                }
            }
        }

        Err(last_error.unwrap_or_else(|| Error::backend("unknown error")))
    }
}

#[async_trait]
impl EmbeddingProvider for OllamaClient {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let url = format!("{}/api/embeddings", self.config.base_url);
        let text = text.to_string();
        let model = self.config.embed_model.clone();
        let client = self.client.clone();

        self.retry_request(|| {
            let url = url.clone();
            let text = text.clone();
            let model = model.clone();
            let client = client.clone();

            async move {
                let request = EmbedRequest {
                    model,
                    prompt: text,
                };

                let response = client
                    .post(&url)
                    .json(&request)
                    .send()
                    .await
                    .map_err(|e| Error::backend(format!("embedding request failed: {e}")))?;

                if !response.status().is_success() {
                    return Err(Error::backend(format!(
                        "embedding failed: HTTP {}",
                        response.status()
                    )));
                }

                let embed_response: EmbedResponse = response
                    .json()
                    .await
                    .map_err(|e| Error::parse(format!("bad embedding response: {e}")))?;

                Ok(embed_response.embedding)
            }
        })
        .await
    }

    fn dimensions(&self) -> usize {
        self.config.embed_dimensions
    }

    fn name(&self) -> &str {
        "ollama"
    }
}

#[async_trait]
impl GenerativeBackend for OllamaClient {
    async fn complete(&self, prompt: &str, max_tokens: u32, temperature: f32) -> Result<String> {
        let url = format!("{}/api/generate", self.config.base_url);
        let prompt = prompt.to_string();
        let model = self.config.generate_model.clone();
        let client = self.client.clone();

        self.retry_request(|| {
            let url = url.clone();
            let prompt = prompt.clone();
            let model = model.clone();
            let client = client.clone();

            async move {
                let request = GenerateRequest {
                    model,
                    prompt,
                    stream: false,
                    options: GenerateOptions {
                        temperature,
                        num_predict: max_tokens,
                    },
                };

                let response = client
                    .post(&url)
                    .json(&request)
                    .send()
                    .await
                    .map_err(|e| Error::backend(format!("generation request failed: {e}")))?;

                if !response.status().is_success() {
                    let status = response.status();
                    let body = response.text().await.unwrap_or_default();
                    return Err(Error::backend(format!(
                        "generation failed: HTTP {status} - {body}"
                    )));
                }

                let generate_response: GenerateResponse = response
                    .json()
                    .await
                    .map_err(|e| Error::parse(format!("bad generation response: {e}")))?;

                Ok(generate_response.response)
            }
        })
        .await
    }

    async fn health_check(&self) -> Result<bool> {
        let url = format!("{}/api/tags", self.config.base_url);

        match self.client.get(&url).send().await {
            Ok(response) => Ok(response.status().is_success()),
            Err(_) => Ok(false),
        }
    }

    fn name(&self) -> &str {
        "ollama"
    }

    fn model(&self) -> &str {
        &self.config.generate_model
    }
}
