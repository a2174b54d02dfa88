//! support-rag: retrieval-augmented answer engine for customer support
//!
//! This crate indexes a product-documentation corpus into a persistent vector
//! store and serves two workflows on top of it: grounded question answering
//! with source citations and a confidence grade, and support-ticket
//! classification by topic, sentiment, and priority. Both degrade gracefully:
//! without a generative backend (or when it fails) answers fall back to
//! extractive composition and classification to keyword matching.

pub mod classification;
pub mod config;
pub mod engine;
pub mod error;
pub mod generation;
pub mod ingestion;
pub mod providers;
pub mod retrieval;
pub mod throttle;
pub mod types;

pub use config::RagConfig;
pub use engine::SupportEngine;
pub use error::{Error, Result};
pub use types::{
    document::{Chunk, ChunkMetadata, Document, RetrievedDoc},
    response::{Confidence, RagResponse},
    ticket::{Classification, ClassifiedTicket, Priority, Sentiment, Ticket},
};
