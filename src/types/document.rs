//! Document and chunk types with source tracking for citations

use serde::{Deserialize, Serialize};

/// A corpus document: immutable seed data for the knowledge index
///
/// Identified by its `url` + `title` pair. Multiple chunks derived from the
/// same document share its `url`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Canonical URL of the source page
    pub url: String,
    /// Document title
    pub title: String,
    /// Full document text
    pub content: String,
    /// Source tag (e.g. "docs", "developer")
    pub source: String,
}

impl Document {
    /// Create a new document
    pub fn new(
        url: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
            content: content.into(),
            source: source.into(),
        }
    }
}

/// A bounded-size, sentence-aligned slice of a document
///
/// The unit of embedding and retrieval. Never mutated after creation; its
/// only identity is the position-assigned id used as the index key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chunk {
    /// URL inherited from the source document
    pub url: String,
    /// Title inherited from the source document
    pub title: String,
    /// Chunk text, bounded by the configured chunk size except when a single
    /// sentence alone exceeds it
    pub content: String,
    /// Source tag inherited from the source document
    pub source: String,
}

impl Chunk {
    /// Metadata stored alongside this chunk's vector
    pub fn metadata(&self) -> ChunkMetadata {
        ChunkMetadata {
            url: self.url.clone(),
            title: self.title.clone(),
            source: self.source.clone(),
        }
    }
}

/// Metadata stored per indexed vector
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkMetadata {
    /// URL of the source document
    pub url: String,
    /// Title of the source document
    pub title: String,
    /// Source tag of the source document
    pub source: String,
}

/// A chunk retrieved for a query, with its distance to the query embedding
///
/// Ephemeral: produced per query, not persisted.
#[derive(Debug, Clone)]
pub struct RetrievedDoc {
    /// Chunk text
    pub content: String,
    /// Chunk metadata
    pub metadata: ChunkMetadata,
    /// Cosine distance to the query embedding (lower is more similar)
    pub distance: f32,
}
