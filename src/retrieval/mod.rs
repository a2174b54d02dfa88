//! Vector index and query-time retrieval

pub mod search;
pub mod store;

pub use search::Retriever;
pub use store::{SearchHit, VectorIndex};
