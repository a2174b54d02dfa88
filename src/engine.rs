//! The support engine: ingestion, retrieval, answering, classification

use std::sync::Arc;

use tokio::time::Duration;

use crate::classification::TicketClassifier;
use crate::config::RagConfig;
use crate::error::Result;
use crate::generation::AnswerComposer;
use crate::ingestion::SentenceChunker;
use crate::providers::{EmbeddingProvider, GenerativeBackend, OllamaClient};
use crate::retrieval::{Retriever, VectorIndex};
use crate::throttle::RateLimiter;
use crate::types::{Classification, ClassifiedTicket, Document, RagResponse, RetrievedDoc, Ticket};

/// Customer-support answer engine
///
/// Owns the full pipeline: documents are chunked and embedded into a
/// persistent vector index, queries retrieve the nearest chunks and compose a
/// grounded answer, and tickets are classified by topic, sentiment, and
/// priority. One rate limiter spaces every backend call, so answering and
/// classification share the external quota.
pub struct SupportEngine {
    config: RagConfig,
    chunker: SentenceChunker,
    embedder: Arc<dyn EmbeddingProvider>,
    index: Arc<VectorIndex>,
    retriever: Retriever,
    composer: AnswerComposer,
    classifier: TicketClassifier,
}

impl SupportEngine {
    /// Create an engine with explicit providers
    ///
    /// The `backend` is consulted only when `config.llm.enabled` is set;
    /// otherwise answers use the extractive fallback and tickets the keyword
    /// baseline. The embedder is always required since retrieval depends on
    /// it.
    pub fn new(
        config: RagConfig,
        embedder: Arc<dyn EmbeddingProvider>,
        backend: Option<Arc<dyn GenerativeBackend>>,
    ) -> Result<Self> {
        let backend = if config.llm.enabled { backend } else { None };
        let generative = backend.is_some();

        let index = Arc::new(VectorIndex::open(&config.index)?);
        let retriever = Retriever::new(Arc::clone(&embedder), Arc::clone(&index));

        let limiter = Arc::new(RateLimiter::new(Duration::from_secs_f64(
            config.llm.min_call_interval_secs,
        )));
        let composer = AnswerComposer::new(backend.clone(), Arc::clone(&limiter), &config.llm);
        let classifier = TicketClassifier::new(backend, limiter, config.classifier.clone());

        let chunker = SentenceChunker::new(config.chunking.chunk_size, config.chunking.chunk_overlap);

        if generative {
            tracing::info!(
                "engine ready, generative backend: {}",
                config.llm.generate_model
            );
        } else {
            tracing::info!("engine ready, generative backend disabled");
        }

        Ok(Self {
            config,
            chunker,
            embedder,
            index,
            retriever,
            composer,
            classifier,
        })
    }

    /// Create an engine backed by a single Ollama client for both embedding
    /// and generation
    ///
    /// Probes the backend once at startup; an unreachable backend is logged
    /// but not fatal, since every generative call degrades to the
    /// deterministic fallbacks.
    pub async fn with_ollama(config: RagConfig) -> Result<Self> {
        let client = Arc::new(OllamaClient::new(&config.llm)?);
        let backend: Arc<dyn GenerativeBackend> = client.clone();

        if config.llm.enabled && !backend.health_check().await.unwrap_or(false) {
            tracing::warn!(
                "backend \"{}\" not reachable at {}, generative calls will fall back",
                backend.name(),
                config.llm.base_url
            );
        }

        Self::new(config, client, Some(backend))
    }

    /// Chunk, embed, and index a document corpus
    ///
    /// Idempotent per index: when the collection already holds vectors the
    /// corpus is assumed ingested and nothing is added. Returns the number of
    /// chunks indexed.
    pub async fn populate(&self, documents: &[Document]) -> Result<usize> {
        let existing = self.index.count();
        if existing > 0 {
            tracing::info!(
                "collection \"{}\" already holds {} vectors, skipping ingestion",
                self.index.collection(),
                existing
            );
            return Ok(0);
        }

        let chunks: Vec<_> = documents.iter().flat_map(|doc| self.chunker.chunk(doc)).collect();
        if chunks.is_empty() {
            tracing::warn!("corpus produced no chunks, nothing to index");
            return Ok(0);
        }
        tracing::info!(
            "chunked {} documents into {} chunks",
            documents.len(),
            chunks.len()
        );

        let texts: Vec<String> = chunks.iter().map(|c| c.content.clone()).collect();
        let embeddings = self.embedder.embed_batch(&texts).await?;

        let ids = (0..chunks.len()).map(|i| format!("chunk_{i}")).collect();
        let metadatas = chunks.iter().map(|c| c.metadata()).collect();

        let added = self.index.add(ids, embeddings, texts, metadatas)?;
        tracing::info!("indexed {} chunks", added);
        Ok(added)
    }

    /// Retrieve up to `k` chunks for a query, in ascending distance order
    pub async fn retrieve(&self, query: &str, k: usize) -> Vec<RetrievedDoc> {
        self.retriever.retrieve(query, k).await
    }

    /// Answer a question grounded in the indexed documentation
    ///
    /// Always produces a response: with no matching context the answer is the
    /// low-confidence terminal; with backend failures it degrades to the
    /// extractive fallback.
    pub async fn generate_rag_response(&self, query: &str) -> RagResponse {
        let docs = self.retrieve(query, self.config.retrieval.max_docs).await;
        tracing::debug!("retrieved {} chunks for query", docs.len());
        self.composer
            .compose(query, &docs, self.config.retrieval.max_docs)
            .await
    }

    /// Classify a single ticket
    pub async fn classify_ticket(&self, ticket: &Ticket) -> Classification {
        self.classifier.classify(ticket).await
    }

    /// Classify a batch of tickets, pairing each with its result
    pub async fn classify_bulk(&self, tickets: &[Ticket]) -> Vec<ClassifiedTicket> {
        self.classifier.classify_bulk(tickets).await
    }

    /// Number of vectors currently indexed
    pub fn indexed_chunks(&self) -> usize {
        self.index.count()
    }

    /// Engine configuration
    pub fn config(&self) -> &RagConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn config(dir: &TempDir) -> RagConfig {
        let mut config = RagConfig::default();
        config.index.storage_path = dir.path().join("index.json");
        config
    }

    // Construction must succeed whether or not an Ollama server is listening;
    // reachability only affects the startup log.
    #[tokio::test]
    async fn with_ollama_shares_one_client_across_both_roles() {
        let dir = TempDir::new().unwrap();
        let engine = SupportEngine::with_ollama(config(&dir)).await.unwrap();

        assert_eq!(engine.indexed_chunks(), 0);
        assert!(engine.config().llm.enabled);
    }

    #[tokio::test]
    async fn disabled_llm_drops_the_backend() {
        let dir = TempDir::new().unwrap();
        let mut config = config(&dir);
        config.llm.enabled = false;

        let engine = SupportEngine::with_ollama(config).await.unwrap();
        let response = engine.generate_rag_response("anything").await;

        // Empty index plus no backend: the no-context terminal, not an error.
        assert!(response.sources.is_empty());
    }
}
