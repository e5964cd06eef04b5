//! Semantic-drift chunking.
//!
//! Walks the captions in order and starts a new chunk whenever two adjacent
//! captions are no longer similar, or the current chunk grows too long.

use super::{Chunk, Chunker};
use crate::embedding::Embedder;
use crate::error::{Result, VidaskError};
use crate::transcript::{TimedCaption, Transcript};
use crate::vector_store::cosine_similarity;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Embedding-based drift chunker.
pub struct DriftChunker {
    embedder: Arc<dyn Embedder>,
    drift_threshold: f32,
    max_chars: usize,
}

/// Captions accumulated into the chunk currently being built.
struct Segment<'a> {
    captions: Vec<&'a TimedCaption>,
    chars: usize,
}

impl<'a> Segment<'a> {
    fn start(caption: &'a TimedCaption) -> Self {
        Self {
            chars: caption.text.trim().chars().count(),
            captions: vec![caption],
        }
    }

    fn push(&mut self, caption: &'a TimedCaption) {
        self.chars += 1 + caption.text.trim().chars().count();
        self.captions.push(caption);
    }

    fn text(&self) -> String {
        self.captions
            .iter()
            .map(|c| c.text.trim())
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn first_start(&self) -> f64 {
        self.captions.first().map(|c| c.start).unwrap_or(0.0)
    }
}

impl DriftChunker {
    pub fn new(embedder: Arc<dyn Embedder>, drift_threshold: f32, max_chars: usize) -> Self {
        Self {
            embedder,
            drift_threshold,
            max_chars,
        }
    }

    fn close(video_id: &str, segment: &Segment<'_>, end: f64, order: usize) -> Chunk {
        Chunk::new(
            video_id,
            format!("Chapter {}", order + 1),
            segment.text(),
            segment.first_start(),
            end,
        )
    }
}

#[async_trait]
impl Chunker for DriftChunker {
    #[instrument(skip(self, transcript), fields(video_id = %transcript.video_id))]
    async fn chunk(&self, transcript: &Transcript) -> Result<Vec<Chunk>> {
        let captions: Vec<&TimedCaption> = transcript
            .captions
            .iter()
            .filter(|c| !c.text.trim().is_empty())
            .collect();

        let Some((first, rest)) = captions.split_first() else {
            return Ok(Vec::new());
        };

        // A single caption has nothing to compare against.
        if rest.is_empty() {
            return Ok(vec![Self::close(
                &transcript.video_id,
                &Segment::start(first),
                first.end(),
                0,
            )]);
        }

        let texts: Vec<String> = captions.iter().map(|c| c.text.trim().to_string()).collect();
        let embeddings = self.embedder.embed_batch(&texts).await?;
        if embeddings.len() != captions.len() {
            return Err(VidaskError::Upstream(format!(
                "Expected {} caption embeddings, got {}",
                captions.len(),
                embeddings.len()
            )));
        }

        let mut chunks = Vec::new();
        let mut segment = Segment::start(first);

        for (i, caption) in rest.iter().enumerate() {
            let similarity = cosine_similarity(&embeddings[i], &embeddings[i + 1]);
            let drifted = similarity < self.drift_threshold;
            let oversized = segment.chars > self.max_chars;

            if drifted || oversized {
                debug!(
                    "Closing segment at {:.1}s (similarity {:.3}, {} chars)",
                    caption.start, similarity, segment.chars
                );
                chunks.push(Self::close(&transcript.video_id, &segment, caption.start, chunks.len()));
                segment = Segment::start(caption);
            } else {
                segment.push(caption);
            }
        }

        let trailing_end = segment.captions.last().map(|c| c.end()).unwrap_or(0.0);
        chunks.push(Self::close(&transcript.video_id, &segment, trailing_end, chunks.len()));

        info!("Created {} drift chunks from {} captions", chunks.len(), captions.len());
        Ok(chunks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::FakeEmbedder;

    fn chunker(embedder: FakeEmbedder) -> DriftChunker {
        DriftChunker::new(Arc::new(embedder), 0.6, 1000)
    }

    #[tokio::test]
    async fn test_similar_captions_form_one_chunk() {
        let embedder = FakeEmbedder::new()
            .with("rust has ownership", vec![1.0, 0.0])
            .with("ownership prevents data races", vec![0.9, 0.43589]);
        let transcript = Transcript::new(
            "vid",
            "en",
            vec![
                TimedCaption::new("rust has ownership", 0.0, 4.0),
                TimedCaption::new("ownership prevents data races", 4.0, 5.0),
            ],
        );

        let chunks = chunker(embedder).chunk(&transcript).await.unwrap();

        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].text, "rust has ownership ownership prevents data races");
        assert_eq!((chunks[0].start, chunks[0].end), (0.0, 9.0));
        assert_eq!(chunks[0].label, "Chapter 1");
        assert_eq!(chunks[0].source_link, "https://www.youtube.com/watch?v=vid&t=0s");
    }

    #[tokio::test]
    async fn test_dissimilar_captions_split() {
        let embedder = FakeEmbedder::new()
            .with("rust has ownership", vec![1.0, 0.0])
            .with("now a word from our sponsor", vec![0.3, 0.95394]);
        let transcript = Transcript::new(
            "vid",
            "en",
            vec![
                TimedCaption::new("rust has ownership", 0.0, 4.0),
                TimedCaption::new("now a word from our sponsor", 4.0, 6.0),
            ],
        );

        let chunks = chunker(embedder).chunk(&transcript).await.unwrap();

        assert_eq!(chunks.len(), 2);
        assert_eq!((chunks[0].start, chunks[0].end), (0.0, 4.0));
        assert_eq!((chunks[1].start, chunks[1].end), (4.0, 10.0));
        assert_eq!(chunks[1].label, "Chapter 2");
        assert_eq!(chunks[1].source_link, "https://www.youtube.com/watch?v=vid&t=4s");
    }

    #[tokio::test]
    async fn test_size_budget_forces_split() {
        // Identical embeddings never drift; only the size budget splits.
        let long = "x".repeat(30);
        let captions = (0..6)
            .map(|i| TimedCaption::new(long.clone(), i as f64 * 2.0, 2.0))
            .collect();
        let transcript = Transcript::new("vid", "en", captions);

        let chunks = DriftChunker::new(Arc::new(FakeEmbedder::new()), 0.6, 50)
            .chunk(&transcript)
            .await
            .unwrap();

        // 30 chars, then 61 (> 50) closes after two captions.
        assert_eq!(chunks.len(), 3);
        assert!(chunks.iter().all(|c| c.text == format!("{} {}", long, long)));
    }

    #[tokio::test]
    async fn test_chunks_cover_transcript_without_gaps() {
        let embedder = FakeEmbedder::new()
            .with("a", vec![1.0, 0.0])
            .with("b", vec![0.0, 1.0])
            .with("c", vec![0.1, 1.0])
            .with("d", vec![1.0, 0.1]);
        let transcript = Transcript::new(
            "vid",
            "en",
            vec![
                TimedCaption::new("a", 1.0, 2.0),
                TimedCaption::new("b", 3.5, 2.0),
                TimedCaption::new("  ", 5.5, 1.0),
                TimedCaption::new("c", 6.0, 2.0),
                TimedCaption::new("d", 9.0, 1.5),
            ],
        );

        let chunks = chunker(embedder).chunk(&transcript).await.unwrap();

        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks.first().unwrap().start, 1.0);
        assert_eq!(chunks.last().unwrap().end, 10.5);
        for chunk in &chunks {
            assert!(chunk.start <= chunk.end);
            assert!(!chunk.text.trim().is_empty());
        }
        for pair in chunks.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
        }
        assert_eq!(chunks[1].text, "b c");
    }

    #[tokio::test]
    async fn test_single_caption_fallback() {
        let embedder = FakeEmbedder::new().failing();
        let transcript = Transcript::new("vid", "en", vec![TimedCaption::new("only one", 3.0, 2.0)]);

        let chunks = chunker(embedder).chunk(&transcript).await.unwrap();

        assert_eq!(chunks.len(), 1);
        assert_eq!((chunks[0].start, chunks[0].end), (3.0, 5.0));
        assert_eq!(chunks[0].text, "only one");
    }

    #[tokio::test]
    async fn test_no_captions_yields_nothing() {
        let transcript = Transcript::new("vid", "en", vec![TimedCaption::new(" ", 0.0, 1.0)]);
        let chunks = chunker(FakeEmbedder::new()).chunk(&transcript).await.unwrap();
        assert!(chunks.is_empty());
    }

    #[tokio::test]
    async fn test_embedding_failure_propagates() {
        let transcript = Transcript::new(
            "vid",
            "en",
            vec![TimedCaption::new("one", 0.0, 1.0), TimedCaption::new("two", 1.0, 1.0)],
        );
        let err = chunker(FakeEmbedder::new().failing()).chunk(&transcript).await.unwrap_err();
        assert!(matches!(err, VidaskError::Upstream(_)));
    }
}
