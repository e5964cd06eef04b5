//! In-memory vector store implementation.

use super::{cosine_similarity, Document, SearchResult};
use crate::chunking::Chunk;
use crate::error::{Result, VidaskError};

/// Brute-force cosine similarity index.
///
/// Documents keep their insertion order, so equal scores rank in the order the
/// chunks were indexed.
#[derive(Debug, Default)]
pub struct MemoryVectorStore {
    documents: Vec<Document>,
}

impl MemoryVectorStore {
    /// Create a new, empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one document.
    pub fn insert(&mut self, doc: Document) {
        self.documents.push(doc);
    }

    /// Add chunks paired 1:1 with their embeddings.
    pub fn insert_batch(&mut self, chunks: Vec<Chunk>, embeddings: Vec<Vec<f32>>) -> Result<usize> {
        if chunks.len() != embeddings.len() {
            return Err(VidaskError::Upstream(format!(
                "Got {} embeddings for {} chunks",
                embeddings.len(),
                chunks.len()
            )));
        }

        let count = chunks.len();
        self.documents.reserve(count);
        for (chunk, embedding) in chunks.into_iter().zip(embeddings) {
            self.insert(Document::new(chunk, embedding));
        }
        Ok(count)
    }

    /// Return up to `limit` chunks ranked by similarity to the query, best first.
    pub fn search(&self, query_embedding: &[f32], limit: usize) -> Vec<SearchResult> {
        let mut results: Vec<SearchResult> = self
            .documents
            .iter()
            .map(|doc| SearchResult {
                chunk: doc.chunk.clone(),
                score: cosine_similarity(query_embedding, &doc.embedding),
            })
            .collect();

        // Stable sort: ties keep insertion order.
        results.sort_by(|a, b| b.score.total_cmp(&a.score));
        results.truncate(limit);

        results
    }

    /// Number of indexed documents.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(label: &str, start: f64) -> Chunk {
        Chunk::new("vid", label.to_string(), format!("text of {}", label), start, start + 30.0)
    }

    #[test]
    fn test_search_ranks_by_similarity() {
        let mut store = MemoryVectorStore::new();
        store
            .insert_batch(
                vec![chunk("a", 0.0), chunk("b", 30.0), chunk("c", 60.0)],
                vec![vec![1.0, 0.0, 0.0], vec![0.0, 1.0, 0.0], vec![0.7, 0.7, 0.0]],
            )
            .unwrap();

        assert_eq!(store.len(), 3);

        let results = store.search(&[1.0, 0.0, 0.0], 10);
        let labels: Vec<&str> = results.iter().map(|r| r.chunk.label.as_str()).collect();
        assert_eq!(labels, vec!["a", "c", "b"]);
        assert!(results[0].score > results[1].score);

        assert_eq!(store.search(&[1.0, 0.0, 0.0], 2).len(), 2);
    }

    #[test]
    fn test_ties_keep_insertion_order_and_repeat() {
        let mut store = MemoryVectorStore::new();
        for (i, label) in ["first", "second", "third", "fourth", "fifth"].iter().enumerate() {
            store.insert(Document::new(chunk(label, i as f64), vec![1.0, 1.0]));
        }

        let first = store.search(&[2.0, 2.0], 4);
        let labels: Vec<&str> = first.iter().map(|r| r.chunk.label.as_str()).collect();
        assert_eq!(labels, vec!["first", "second", "third", "fourth"]);

        for _ in 0..5 {
            let again = store.search(&[2.0, 2.0], 4);
            let again_labels: Vec<&str> = again.iter().map(|r| r.chunk.label.as_str()).collect();
            assert_eq!(again_labels, labels);
        }
    }

    #[test]
    fn test_mismatched_batch_rejected() {
        let mut store = MemoryVectorStore::new();
        let err = store.insert_batch(vec![chunk("a", 0.0)], Vec::new()).unwrap_err();
        assert!(matches!(err, VidaskError::Upstream(_)));
        assert!(store.is_empty());
    }
}
