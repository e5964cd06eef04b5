//! Fixed-size window chunking.
//!
//! Splits the concatenated transcript text into overlapping windows of a fixed
//! character budget.

use super::{Chunk, Chunker};
use crate::error::{Result, VidaskError};
use crate::transcript::{TimedCaption, Transcript};
use async_trait::async_trait;
use tracing::debug;

/// Fixed-window chunker.
///
/// Lengths are counted in characters, not bytes. Each window also carries the
/// time range of the captions it touches.
pub struct WindowChunker {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl WindowChunker {
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Result<Self> {
        if chunk_size == 0 {
            return Err(VidaskError::Config("Window chunk size must be positive".into()));
        }
        if chunk_overlap >= chunk_size {
            return Err(VidaskError::Config(format!(
                "Chunk overlap ({}) must be smaller than chunk size ({})",
                chunk_overlap, chunk_size
            )));
        }
        Ok(Self {
            chunk_size,
            chunk_overlap,
        })
    }

    /// Character ranges `[start, end)` of every window over `len` characters.
    fn window_bounds(&self, len: usize) -> Vec<(usize, usize)> {
        let step = self.chunk_size - self.chunk_overlap;
        let mut bounds = Vec::new();
        let mut start = 0;

        while start < len {
            let end = (start + self.chunk_size).min(len);
            bounds.push((start, end));
            if end == len {
                break;
            }
            start += step;
        }

        bounds
    }
}

impl Default for WindowChunker {
    fn default() -> Self {
        Self {
            chunk_size: 1000,
            chunk_overlap: 200,
        }
    }
}

#[async_trait]
impl Chunker for WindowChunker {
    async fn chunk(&self, transcript: &Transcript) -> Result<Vec<Chunk>> {
        let captions: Vec<&TimedCaption> = transcript
            .captions
            .iter()
            .filter(|c| !c.text.trim().is_empty())
            .collect();

        // Concatenate caption texts, remembering the character offset where each begins.
        let mut chars: Vec<char> = Vec::new();
        let mut offsets: Vec<usize> = Vec::with_capacity(captions.len());
        for caption in &captions {
            if !chars.is_empty() {
                chars.push(' ');
            }
            offsets.push(chars.len());
            chars.extend(caption.text.trim().chars());
        }

        // Index of the caption a character offset falls in.
        let caption_at = |offset: usize| offsets.partition_point(|&o| o <= offset).saturating_sub(1);

        let mut chunks = Vec::new();
        for (start, end) in self.window_bounds(chars.len()) {
            let text: String = chars[start..end].iter().collect();
            if text.trim().is_empty() {
                continue;
            }

            let first = captions[caption_at(start)];
            let last = captions[caption_at(end - 1)];
            let label = format!("Part {}", chunks.len() + 1);

            chunks.push(Chunk::new(&transcript.video_id, label, text, first.start, last.end()));
        }

        debug!(
            "Split {} characters into {} windows (size {}, overlap {})",
            chars.len(),
            chunks.len(),
            self.chunk_size,
            self.chunk_overlap
        );

        Ok(chunks)
    }
}
