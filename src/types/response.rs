//! Response types for RAG queries

use serde::{Deserialize, Serialize};

/// Canned answer returned when retrieval found no context
pub const NO_CONTEXT_ANSWER: &str =
    "I couldn't find relevant information in the documentation to answer your question.";

/// Coarse three-level answer reliability estimate
///
/// Derived from retrieval depth, not a calibrated probability: `High` means
/// three or more chunks supported the answer, `Medium` one or two, and `Low`
/// is reserved for the no-context case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

/// Response from a RAG query: the external contract result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RagResponse {
    /// Generated or extractive answer text
    pub answer: String,
    /// Deduplicated source URLs across all retrieved chunks, first-seen order
    pub sources: Vec<String>,
    /// Answer reliability estimate
    pub confidence: Confidence,
}

impl RagResponse {
    /// Response for a query with no retrieved context
    pub fn no_context() -> Self {
        Self {
            answer: NO_CONTEXT_ANSWER.to_string(),
            sources: Vec::new(),
            confidence: Confidence::Low,
        }
    }
}
