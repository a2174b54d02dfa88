//! Grounded answer composition with a deterministic extractive fallback

use std::collections::HashSet;
use std::sync::Arc;

use crate::config::LlmConfig;
use crate::error::{Error, Result};
use crate::providers::GenerativeBackend;
use crate::throttle::RateLimiter;
use crate::types::{Confidence, RagResponse, RetrievedDoc};

use super::prompt::PromptBuilder;

/// Header prefixed to extractive fallback answers
pub const FALLBACK_HEADER: &str = "Based on the available documentation:";

/// Number of retrieved docs quoted by the extractive fallback
const FALLBACK_DOCS: usize = 2;

/// Preview budget per quoted doc, in bytes (truncated on a char boundary)
const FALLBACK_PREVIEW_LEN: usize = 400;

/// Composes a [`RagResponse`] from retrieved chunks
///
/// Every failure path resolves to a valid response; composition never raises
/// to the caller. With no backend configured (or on any backend failure) the
/// answer is assembled extractively from the top retrieved chunks.
pub struct AnswerComposer {
    backend: Option<Arc<dyn GenerativeBackend>>,
    limiter: Arc<RateLimiter>,
    max_tokens: u32,
    temperature: f32,
}

impl AnswerComposer {
    /// Create a new composer
    pub fn new(
        backend: Option<Arc<dyn GenerativeBackend>>,
        limiter: Arc<RateLimiter>,
        config: &LlmConfig,
    ) -> Self {
        Self {
            backend,
            limiter,
            max_tokens: config.answer_max_tokens,
            temperature: config.temperature,
        }
    }

    /// Compose a grounded answer from retrieved chunks
    ///
    /// At most `max_docs` chunks are quoted in the grounding prompt, but
    /// `sources` and `confidence` reflect all retrieved chunks.
    pub async fn compose(
        &self,
        query: &str,
        docs: &[RetrievedDoc],
        max_docs: usize,
    ) -> RagResponse {
        if docs.is_empty() {
            return RagResponse::no_context();
        }

        let answer = match &self.backend {
            Some(backend) => {
                let prompt_docs = &docs[..docs.len().min(max_docs)];
                match self.generate(backend.as_ref(), query, prompt_docs).await {
                    Ok(text) => Some(text),
                    Err(e) => {
                        tracing::warn!("generative composition failed, using extractive fallback: {e}");
                        None
                    }
                }
            }
            None => None,
        };

        RagResponse {
            answer: answer.unwrap_or_else(|| extractive_answer(docs)),
            sources: dedup_sources(docs),
            confidence: if docs.len() >= 3 {
                Confidence::High
            } else {
                Confidence::Medium
            },
        }
    }

    /// Invoke the generative backend through the rate limiter
    async fn generate(
        &self,
        backend: &dyn GenerativeBackend,
        query: &str,
        docs: &[RetrievedDoc],
    ) -> Result<String> {
        let prompt = PromptBuilder::build_answer_prompt(query, docs);

        self.limiter.throttle().await;
        let text = backend
            .complete(&prompt, self.max_tokens, self.temperature)
            .await?;

        let text = text.trim();
        if text.is_empty() {
            return Err(Error::parse("backend returned an empty answer"));
        }
        Ok(text.to_string())
    }
}

/// Deterministic extractive answer: the top chunks, truncated, under a fixed
/// header
fn extractive_answer(docs: &[RetrievedDoc]) -> String {
    let previews = docs
        .iter()
        .take(FALLBACK_DOCS)
        .map(|doc| truncate_preview(&doc.content, FALLBACK_PREVIEW_LEN))
        .collect::<Vec<_>>()
        .join("\n\n");

    format!("{FALLBACK_HEADER}\n\n{previews}")
}

/// Deduplicated source URLs across all retrieved docs, first-seen order
fn dedup_sources(docs: &[RetrievedDoc]) -> Vec<String> {
    let mut seen = HashSet::new();
    docs.iter()
        .filter(|doc| seen.insert(doc.metadata.url.clone()))
        .map(|doc| doc.metadata.url.clone())
        .collect()
}

/// Truncate to at most `max_len` bytes on a char boundary
fn truncate_preview(text: &str, max_len: usize) -> String {
    if text.len() <= max_len {
        return text.to_string();
    }

    let mut end = max_len;
    while end > 0 && !text.is_char_boundary(end) {
        end -= 1;
    }
    text[..end].to_string()
}
