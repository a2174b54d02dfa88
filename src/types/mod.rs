//! Core data types for documents, responses, and tickets

pub mod document;
pub mod response;
pub mod ticket;

pub use document::{Chunk, ChunkMetadata, Document, RetrievedDoc};
pub use response::{Confidence, RagResponse};
pub use ticket::{ClassifiedTicket, Classification, Priority, Sentiment, Ticket};
