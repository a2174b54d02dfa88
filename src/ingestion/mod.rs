//! Document ingestion: sentence-aligned chunking

pub mod chunker;

pub use chunker::SentenceChunker;
