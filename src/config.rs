//! Configuration for the answer engine

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Main engine configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RagConfig {
    /// Chunking configuration
    pub chunking: ChunkingConfig,
    /// Retrieval configuration
    pub retrieval: RetrievalConfig,
    /// Generative backend configuration
    pub llm: LlmConfig,
    /// Vector index configuration
    pub index: IndexConfig,
    /// Ticket classifier configuration
    pub classifier: ClassifierConfig,
}

impl RagConfig {
    /// Load configuration from a TOML file
    ///
    /// Missing sections fall back to their defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        toml::from_str(&content)
            .map_err(|e| Error::config(format!("failed to parse {}: {}", path.as_ref().display(), e)))
    }

    /// Apply recognized environment-variable overrides
    ///
    /// Recognized variables: `CHUNK_SIZE`, `CHUNK_OVERLAP`, `MAX_RETRIEVAL_DOCS`,
    /// `USE_GENERATIVE_BACKEND`, `MIN_CALL_INTERVAL_SECONDS`.
    pub fn apply_env(mut self) -> Self {
        if let Some(v) = env_parse::<usize>("CHUNK_SIZE") {
            self.chunking.chunk_size = v;
        }
        if let Some(v) = env_parse::<usize>("CHUNK_OVERLAP") {
            self.chunking.chunk_overlap = v;
        }
        if let Some(v) = env_parse::<usize>("MAX_RETRIEVAL_DOCS") {
            self.retrieval.max_docs = v;
        }
        if let Some(v) = env_parse::<bool>("USE_GENERATIVE_BACKEND") {
            self.llm.enabled = v;
        }
        if let Some(v) = env_parse::<f64>("MIN_CALL_INTERVAL_SECONDS") {
            self.llm.min_call_interval_secs = v;
        }
        self
    }
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|v| v.parse().ok())
}

/// Text chunking configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkingConfig {
    /// Target chunk size in characters
    pub chunk_size: usize,
    /// Overlap between chunks in characters
    ///
    /// Carried for compatibility with the documented configuration surface
    /// but currently has no effect: consecutive chunks do not overlap.
    pub chunk_overlap: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: 1000,
            chunk_overlap: 200,
        }
    }
}

/// Retrieval configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Default number of chunks to retrieve per query
    pub max_docs: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self { max_docs: 5 }
    }
}

/// Generative backend configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Enable the generative path (when false, answers use the extractive fallback)
    pub enabled: bool,
    /// Backend base URL
    pub base_url: String,
    /// Embedding model name
    pub embed_model: String,
    /// Embedding dimensions (768 for nomic-embed-text)
    pub embed_dimensions: usize,
    /// Generation model name
    pub generate_model: String,
    /// Token budget for answer generation
    pub answer_max_tokens: u32,
    /// Temperature for generation
    pub temperature: f32,
    /// Minimum spacing between backend calls, in seconds
    ///
    /// 6 seconds models a shared 10-calls-per-minute quota.
    pub min_call_interval_secs: f64,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Number of retries for failed requests
    pub max_retries: u32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: "http://localhost:11434".to_string(),
            embed_model: "nomic-embed-text".to_string(),
            embed_dimensions: 768,
            generate_model: "command-r".to_string(),
            answer_max_tokens: 800,
            temperature: 0.1,
            min_call_interval_secs: 6.0,
            timeout_secs: 300,
            max_retries: 3,
        }
    }
}

/// Vector index configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Storage path for the index snapshot
    pub storage_path: PathBuf,
    /// Collection name
    pub collection: String,
}

impl Default for IndexConfig {
    fn default() -> Self {
        let storage_path = dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("support-rag")
            .join("index.json");

        Self {
            storage_path,
            collection: "support_docs".to_string(),
        }
    }
}

/// Ticket classifier configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Topic tag catalog offered to the model
    pub topic_tags: Vec<String>,
    /// Token budget for classification responses
    pub max_tokens: u32,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            topic_tags: [
                "How-to",
                "Product",
                "Connector",
                "Lineage",
                "API/SDK",
                "SSO",
                "Glossary",
                "Best practices",
                "Sensitive data",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            max_tokens: 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_surface() {
        let config = RagConfig::default();
        assert_eq!(config.chunking.chunk_size, 1000);
        assert_eq!(config.chunking.chunk_overlap, 200);
        assert_eq!(config.retrieval.max_docs, 5);
        assert!(config.llm.enabled);
        assert_eq!(config.llm.min_call_interval_secs, 6.0);
        assert_eq!(config.classifier.topic_tags.len(), 9);
    }

    #[test]
    fn partial_toml_falls_back_to_defaults() {
        let parsed: RagConfig = toml::from_str(
            r#"
            [chunking]
            chunk_size = 512
            "#,
        )
        .unwrap();
        assert_eq!(parsed.chunking.chunk_size, 512);
        assert_eq!(parsed.chunking.chunk_overlap, 200);
        assert_eq!(parsed.retrieval.max_docs, 5);
    }
}
