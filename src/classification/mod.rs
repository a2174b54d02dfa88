//! Ticket classification: generative with layered parsing, keyword fallback

pub mod classifier;
pub mod keywords;
pub mod parse;

pub use classifier::TicketClassifier;
