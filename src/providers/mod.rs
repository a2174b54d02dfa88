//! Capability interfaces for the external embedding and generative backends
//!
//! The engine consumes these traits rather than concrete services so the
//! model stack is swappable without touching retrieval or composition logic.

pub mod embedding;
pub mod llm;
pub mod ollama;

pub use embedding::EmbeddingProvider;
pub use llm::GenerativeBackend;
pub use ollama::OllamaClient;
