//! Context retrieval for answers.

use super::ContextChunk;
use crate::embedding::Embedder;
use crate::error::Result;
use crate::vector_store::MemoryVectorStore;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Finds the chunks of an index closest to a question.
pub struct Retriever {
    embedder: Arc<dyn Embedder>,
    top_k: usize,
}

impl Retriever {
    /// Create a retriever returning the default 4 chunks.
    pub fn new(embedder: Arc<dyn Embedder>) -> Self {
        Self { embedder, top_k: 4 }
    }

    /// Set the number of chunks returned.
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Embed the query and return the closest chunks, best first.
    #[instrument(skip(self, store, query), fields(top_k = self.top_k))]
    pub async fn retrieve(&self, store: &MemoryVectorStore, query: &str) -> Result<Vec<ContextChunk>> {
        let query_embedding = self.embedder.embed(query).await?;

        let chunks: Vec<ContextChunk> = store
            .search(&query_embedding, self.top_k)
            .into_iter()
            .map(ContextChunk::from)
            .collect();

        debug!("Retrieved {} of {} chunks", chunks.len(), store.len());
        Ok(chunks)
    }
}

/// Format context chunks for the answer prompt.
pub fn format_context_for_prompt(chunks: &[ContextChunk]) -> String {
    chunks
        .iter()
        .map(|chunk| format!("[{}] ({})\n{}", chunk.time_range, chunk.label, chunk.content))
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunking::Chunk;
    use crate::test_util::FakeEmbedder;

    fn indexed_store() -> MemoryVectorStore {
        let mut store = MemoryVectorStore::new();
        store
            .insert_batch(
                vec![
                    Chunk::new("vid", "Chapter 1".into(), "intro to rust".into(), 0.0, 65.0),
                    Chunk::new("vid", "Chapter 2".into(), "ownership rules".into(), 65.0, 150.0),
                    Chunk::new("vid", "Chapter 3".into(), "closing remarks".into(), 150.0, 200.0),
                ],
                vec![vec![1.0, 0.0], vec![0.0, 1.0], vec![0.6, 0.8]],
            )
            .unwrap();
        store
    }

    #[tokio::test]
    async fn test_retrieve_returns_closest_first() {
        let embedder = Arc::new(FakeEmbedder::new().with("who owns the value?", vec![0.0, 1.0]));
        let retriever = Retriever::new(embedder).with_top_k(2);

        let chunks = retriever.retrieve(&indexed_store(), "who owns the value?").await.unwrap();

        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].label, "Chapter 2");
        assert_eq!(chunks[0].time_range, "01:05→02:30");
        assert_eq!(chunks[0].url, "https://www.youtube.com/watch?v=vid&t=65s");
        assert_eq!(chunks[1].label, "Chapter 3");
    }

    #[tokio::test]
    async fn test_retrieve_is_deterministic() {
        let embedder = Arc::new(FakeEmbedder::new().with("question", vec![1.0, 1.0]));
        let retriever = Retriever::new(embedder);
        let store = indexed_store();

        let first: Vec<String> = retriever
            .retrieve(&store, "question")
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.label)
            .collect();
        let second: Vec<String> = retriever
            .retrieve(&store, "question")
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.label)
            .collect();

        assert_eq!(first.len(), 3);
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_retrieve_propagates_embedder_failure() {
        let retriever = Retriever::new(Arc::new(FakeEmbedder::new().failing()));
        assert!(retriever.retrieve(&indexed_store(), "question").await.is_err());
    }

    #[test]
    fn test_format_context_for_prompt() {
        let chunks = vec![
            ContextChunk {
                label: "Chapter 1".into(),
                time_range: "00:00→01:05".into(),
                content: "intro".into(),
                score: 0.9,
                url: "https://www.youtube.com/watch?v=vid&t=0s".into(),
            },
            ContextChunk {
                label: "Chapter 2".into(),
                time_range: "01:05→02:30".into(),
                content: "ownership".into(),
                score: 0.8,
                url: "https://www.youtube.com/watch?v=vid&t=65s".into(),
            },
        ];

        assert_eq!(
            format_context_for_prompt(&chunks),
            "[00:00→01:05] (Chapter 1)\nintro\n\n[01:05→02:30] (Chapter 2)\nownership"
        );
    }
}
