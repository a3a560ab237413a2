//! HNSW approximate nearest neighbor index over insight embeddings

use crate::db::{cosine_similarity, Database};
use crate::error::{PlacemateError, Result};
use instant_distance::{Builder, HnswMap, Search};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::RwLock;

/// Wrapper for f32 vectors implementing instant_distance::Point
#[derive(Clone)]
struct EmbeddingPoint {
    values: Vec<f32>,
}

impl instant_distance::Point for EmbeddingPoint {
    fn distance(&self, other: &Self) -> f32 {
        // Cosine distance = 1.0 - cosine_similarity
        1.0 - cosine_similarity(&self.values, &other.values)
    }
}

/// HNSW-backed approximate nearest neighbor index over insight documents
pub struct InsightAnnIndex {
    index: RwLock<Option<HnswMap<EmbeddingPoint, String>>>,
    embedding_count: AtomicUsize,
}

impl InsightAnnIndex {
    pub fn new() -> Self {
        Self {
            index: RwLock::new(None),
            embedding_count: AtomicUsize::new(0),
        }
    }

    /// Build index from stored insight embeddings.
    /// Skips building below `threshold`; brute force is fast enough there.
    pub fn build_from_db(db: &Database, threshold: usize) -> Result<Self> {
        let embeddings = db.get_all_insight_embeddings()?;

        let count = embeddings.len();
        let ann = Self::new();
        ann.embedding_count.store(count, Ordering::Relaxed);

        if count < threshold {
            tracing::debug!(
                "Skipping ANN index build: {} embeddings < {} threshold",
                count,
                threshold
            );
            return Ok(ann);
        }

        let (points, keys): (Vec<EmbeddingPoint>, Vec<String>) = embeddings
            .into_iter()
            .map(|(hash, values)| (EmbeddingPoint { values }, hash))
            .unzip();

        let hnsw_map = Builder::default().build(points, keys);

        *ann.index
            .write()
            .map_err(|e| PlacemateError::Retrieval(format!("ANN lock poisoned: {}", e)))? =
            Some(hnsw_map);

        tracing::info!("Built ANN index with {} embeddings", count);
        Ok(ann)
    }

    /// Search the index for k nearest neighbors.
    /// Returns (hash, cosine_similarity) pairs, empty if not built.
    pub fn search(&self, query: &[f32], k: usize) -> Vec<(String, f32)> {
        let guard = match self.index.read() {
            Ok(g) => g,
            Err(_) => return vec![],
        };

        let map = match guard.as_ref() {
            Some(m) => m,
            None => return vec![],
        };

        let query_point = EmbeddingPoint {
            values: query.to_vec(),
        };
        let mut search = Search::default();

        map.search(&query_point, &mut search)
            .take(k)
            .map(|item| {
                let similarity = 1.0 - item.distance;
                (item.value.clone(), similarity)
            })
            .collect()
    }

    /// Whether the HNSW index has been built
    pub fn is_built(&self) -> bool {
        self.index.read().map(|g| g.is_some()).unwrap_or(false)
    }

    /// Number of embeddings loaded (even if the index wasn't built)
    pub fn len(&self) -> usize {
        self.embedding_count.load(Ordering::Relaxed)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InsightAnnIndex {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::hash_content;
    use crate::types::InsightDocument;

    fn setup_db_with_embeddings(count: usize) -> Database {
        let db = Database::open_in_memory().unwrap();
        db.initialize().unwrap();

        for i in 0..count {
            let text = format!("company insight {}", i);
            let doc = InsightDocument {
                hash: hash_content(&text),
                company_name: None,
                doc: text,
            };
            db.insert_insight(&doc).unwrap();

            // Simple deterministic embedding
            let embedding = vec![
                (i as f32).sin(),
                (i as f32).cos(),
                (i as f32 * 0.5).sin(),
                (i as f32 * 0.5).cos(),
            ];
            db.insert_insight_embedding(&doc.hash, "test-model", &embedding)
                .unwrap();
        }

        db
    }

    #[test]
    fn test_build_below_threshold() {
        let db = setup_db_with_embeddings(10);
        let ann = InsightAnnIndex::build_from_db(&db, 100).unwrap();

        assert!(!ann.is_built());
        assert_eq!(ann.len(), 10);

        // Search should return empty when not built
        let results = ann.search(&[0.5, 0.5, 0.5, 0.5], 5);
        assert!(results.is_empty());
    }

    #[test]
    fn test_build_and_search() {
        let db = setup_db_with_embeddings(60);
        let ann = InsightAnnIndex::build_from_db(&db, 50).unwrap();

        assert!(ann.is_built());
        assert_eq!(ann.len(), 60);

        let results = ann.search(&[1.0, 0.0, 0.5, 0.5], 5);
        assert_eq!(results.len(), 5);

        for (hash, sim) in &results {
            assert!(!hash.is_empty());
            assert!(*sim >= -1.0 && *sim <= 1.0);
        }
    }

    #[test]
    fn test_search_empty_index() {
        let ann = InsightAnnIndex::new();
        let results = ann.search(&[1.0, 0.0], 5);
        assert!(results.is_empty());
        assert!(!ann.is_built());
        assert!(ann.is_empty());
    }
}
