//! Append-only vector index with path-backed persistence

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::config::IndexConfig;
use crate::error::{Error, Result};
use crate::types::ChunkMetadata;

/// One stored vector with its text and metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
struct IndexedVector {
    /// Unique id within the index
    id: String,
    /// Embedding vector
    embedding: Vec<f32>,
    /// Chunk text
    text: String,
    /// Chunk metadata
    metadata: ChunkMetadata,
}

#[derive(Default)]
struct IndexState {
    entries: Vec<IndexedVector>,
    /// Dimension established by the first insert
    dimensions: Option<usize>,
}

/// A nearest-neighbor hit from [`VectorIndex::query`]
#[derive(Debug, Clone)]
pub struct SearchHit {
    /// Chunk text
    pub text: String,
    /// Chunk metadata
    pub metadata: ChunkMetadata,
    /// Cosine distance to the query embedding (lower is more similar)
    pub distance: f32,
}

/// Embedding-keyed nearest-neighbor store
///
/// Brute-force cosine distance over an in-memory entry list, persisted as a
/// JSON snapshot so the collection survives process restarts. Append-only:
/// this design needs no update or delete operations. Concurrent reads are
/// safe; writes are serialized by the interior lock.
pub struct VectorIndex {
    state: RwLock<IndexState>,
    storage_path: PathBuf,
    collection: String,
}

impl VectorIndex {
    /// Open or create the index at the configured storage path
    ///
    /// Fails with [`Error::IndexUnavailable`] if the storage directory cannot
    /// be created or an existing snapshot cannot be read. A corrupt snapshot
    /// is logged and replaced rather than treated as fatal.
    pub fn open(config: &IndexConfig) -> Result<Self> {
        if let Some(parent) = config.storage_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                Error::index_unavailable(format!(
                    "cannot create storage directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let entries = match std::fs::read_to_string(&config.storage_path) {
            Ok(content) => match serde_json::from_str::<Vec<IndexedVector>>(&content) {
                Ok(entries) => entries,
                Err(e) => {
                    tracing::warn!(
                        "corrupt index snapshot at {}, starting empty: {}",
                        config.storage_path.display(),
                        e
                    );
                    Vec::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => {
                return Err(Error::index_unavailable(format!(
                    "cannot read snapshot {}: {}",
                    config.storage_path.display(),
                    e
                )))
            }
        };

        let dimensions = entries.first().map(|e| e.embedding.len());
        tracing::info!(
            "opened collection \"{}\" with {} vectors",
            config.collection,
            entries.len()
        );

        Ok(Self {
            state: RwLock::new(IndexState {
                entries,
                dimensions,
            }),
            storage_path: config.storage_path.clone(),
            collection: config.collection.clone(),
        })
    }

    /// Collection name
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Number of stored vectors
    pub fn count(&self) -> usize {
        self.state.read().entries.len()
    }

    /// Append a batch of vectors
    ///
    /// All four sequences must have equal length. Every embedding must match
    /// the dimension established by the first insert; a mismatch fails the
    /// whole batch with [`Error::DimensionMismatch`] before anything is
    /// stored. A failed snapshot write rolls the batch back, so an errored
    /// call leaves the index unchanged. Returns the number of vectors added.
    pub fn add(
        &self,
        ids: Vec<String>,
        embeddings: Vec<Vec<f32>>,
        texts: Vec<String>,
        metadatas: Vec<ChunkMetadata>,
    ) -> Result<usize> {
        if ids.len() != embeddings.len()
            || ids.len() != texts.len()
            || ids.len() != metadatas.len()
        {
            return Err(Error::config(format!(
                "add requires equal-length sequences, got {} ids, {} embeddings, {} texts, {} metadatas",
                ids.len(),
                embeddings.len(),
                texts.len(),
                metadatas.len()
            )));
        }

        let mut state = self.state.write();

        let expected = state
            .dimensions
            .or_else(|| embeddings.first().map(|e| e.len()));
        if let Some(expected) = expected {
            for embedding in &embeddings {
                if embedding.len() != expected {
                    return Err(Error::DimensionMismatch {
                        expected,
                        actual: embedding.len(),
                    });
                }
            }
        }

        let added = ids.len();
        let committed = state.entries.len();
        for (((id, embedding), text), metadata) in ids
            .into_iter()
            .zip(embeddings)
            .zip(texts)
            .zip(metadatas)
        {
            state.entries.push(IndexedVector {
                id,
                embedding,
                text,
                metadata,
            });
        }

        if let Err(e) = self.persist(&state.entries) {
            state.entries.truncate(committed);
            return Err(e);
        }
        state.dimensions = expected;

        Ok(added)
    }

    /// Nearest-neighbor query by cosine distance
    ///
    /// Returns up to `k` entries in ascending distance order; fewer when the
    /// index holds fewer; an empty sequence (never an error) when the index
    /// is empty or the query dimension does not match.
    pub fn query(&self, embedding: &[f32], k: usize) -> Vec<SearchHit> {
        let state = self.state.read();

        if state.entries.is_empty() || k == 0 {
            return Vec::new();
        }
        if let Some(expected) = state.dimensions {
            if embedding.len() != expected {
                tracing::warn!(
                    "query embedding has {} dimensions, index expects {}",
                    embedding.len(),
                    expected
                );
                return Vec::new();
            }
        }

        let mut hits: Vec<SearchHit> = state
            .entries
            .iter()
            .map(|entry| SearchHit {
                text: entry.text.clone(),
                metadata: entry.metadata.clone(),
                distance: cosine_distance(embedding, &entry.embedding),
            })
            .collect();

        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits.truncate(k);
        hits
    }

    /// Write the JSON snapshot
    fn persist(&self, entries: &[IndexedVector]) -> Result<()> {
        let json = serde_json::to_string(entries)?;
        std::fs::write(&self.storage_path, json)?;
        Ok(())
    }
}

/// Cosine distance: 1 - cosine similarity, in [0, 2]
///
/// A zero-magnitude vector has no direction; its distance is defined as 1.0
/// (equivalent to orthogonal).
fn cosine_distance(a: &[f32], b: &[f32]) -> f32 {
    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;

    for (x, y) in a.iter().zip(b) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return 1.0;
    }

    // Rounding can push near-identical vectors a hair below zero.
    (1.0 - dot / (norm_a.sqrt() * norm_b.sqrt())).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_config(dir: &TempDir) -> IndexConfig {
        IndexConfig {
            storage_path: dir.path().join("index.json"),
            collection: "test_docs".to_string(),
        }
    }

    fn meta(url: &str) -> ChunkMetadata {
        ChunkMetadata {
            url: url.to_string(),
            title: "Title".to_string(),
            source: "docs".to_string(),
        }
    }

    fn add_entry(index: &VectorIndex, id: &str, embedding: Vec<f32>) -> Result<usize> {
        index.add(
            vec![id.to_string()],
            vec![embedding],
            vec![format!("text for {id}")],
            vec![meta("https://docs.example.com")],
        )
    }

    #[test]
    fn empty_index_query_returns_empty() {
        let dir = TempDir::new().unwrap();
        let index = VectorIndex::open(&test_config(&dir)).unwrap();

        assert_eq!(index.count(), 0);
        assert!(index.query(&[1.0, 0.0], 5).is_empty());
    }

    #[test]
    fn query_orders_by_ascending_distance_and_caps_at_k() {
        let dir = TempDir::new().unwrap();
        let index = VectorIndex::open(&test_config(&dir)).unwrap();

        add_entry(&index, "a", vec![1.0, 0.0, 0.0]).unwrap();
        add_entry(&index, "b", vec![0.0, 1.0, 0.0]).unwrap();
        add_entry(&index, "c", vec![0.9, 0.1, 0.0]).unwrap();

        let hits = index.query(&[1.0, 0.0, 0.0], 2);
        assert_eq!(hits.len(), 2);
        assert!(hits[0].distance <= hits[1].distance);
        assert_eq!(hits[0].text, "text for a");
        assert_eq!(hits[1].text, "text for c");

        let all = index.query(&[1.0, 0.0, 0.0], 10);
        assert_eq!(all.len(), 3);
        for pair in all.windows(2) {
            assert!(pair[0].distance <= pair[1].distance);
        }
    }

    #[test]
    fn dimension_mismatch_rejects_batch() {
        let dir = TempDir::new().unwrap();
        let index = VectorIndex::open(&test_config(&dir)).unwrap();

        add_entry(&index, "a", vec![1.0, 0.0, 0.0]).unwrap();
        let err = add_entry(&index, "b", vec![1.0, 0.0]).unwrap_err();
        assert!(matches!(
            err,
            Error::DimensionMismatch {
                expected: 3,
                actual: 2
            }
        ));
        assert_eq!(index.count(), 1);
    }

    #[test]
    fn unequal_sequence_lengths_are_rejected() {
        let dir = TempDir::new().unwrap();
        let index = VectorIndex::open(&test_config(&dir)).unwrap();

        let err = index
            .add(
                vec!["a".to_string(), "b".to_string()],
                vec![vec![1.0]],
                vec!["t".to_string()],
                vec![meta("u")],
            )
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert_eq!(index.count(), 0);
    }

    #[test]
    fn failed_snapshot_write_rolls_back_the_batch() {
        let dir = TempDir::new().unwrap();
        let config = test_config(&dir);
        let index = VectorIndex::open(&config).unwrap();

        // Occupy the snapshot path with a directory so the write fails.
        std::fs::create_dir(&config.storage_path).unwrap();

        let err = add_entry(&index, "a", vec![1.0, 0.0]).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
        assert_eq!(index.count(), 0);
        assert!(index.query(&[1.0, 0.0], 5).is_empty());

        // With the obstruction cleared the same batch commits cleanly.
        std::fs::remove_dir(&config.storage_path).unwrap();
        add_entry(&index, "a", vec![1.0, 0.0]).unwrap();
        assert_eq!(index.count(), 1);
    }

    #[test]
    fn snapshot_survives_reopen() {
        let dir = TempDir::new().unwrap();
        let config = test_config(&dir);

        {
            let index = VectorIndex::open(&config).unwrap();
            add_entry(&index, "a", vec![1.0, 0.0]).unwrap();
            add_entry(&index, "b", vec![0.0, 1.0]).unwrap();
        }

        let reopened = VectorIndex::open(&config).unwrap();
        assert_eq!(reopened.count(), 2);
        let hits = reopened.query(&[0.0, 1.0], 1);
        assert_eq!(hits[0].text, "text for b");
    }

    #[test]
    fn cosine_distance_is_non_negative_and_zero_for_identical() {
        let d = cosine_distance(&[0.5, 0.5], &[0.5, 0.5]);
        assert!(d.abs() < 1e-6);
        assert!(cosine_distance(&[1.0, 0.0], &[0.0, 1.0]) >= 0.0);
        assert_eq!(cosine_distance(&[0.0, 0.0], &[1.0, 0.0]), 1.0);

        // Self-distance stays at or above zero even when rounding is unkind.
        let v = [0.1, 0.2, 0.3, 0.7, 0.9];
        assert!(cosine_distance(&v, &v) >= 0.0);
    }
}
