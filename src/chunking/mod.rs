//! Transcript segmentation into retrievable chunks.
//!
//! Two policies are available: fixed-size overlapping character windows, and
//! semantic-drift segmentation that starts a new chunk whenever adjacent
//! captions stop talking about the same thing.

mod drift;
mod window;

pub use drift::DriftChunker;
pub use window::WindowChunker;

use crate::embedding::Embedder;
use crate::error::Result;
use crate::transcript::{format_timestamp, Transcript};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A contiguous span of transcript text, the unit of retrieval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    /// Text content of this chunk.
    pub text: String,
    /// Start time in seconds.
    pub start: f64,
    /// End time in seconds.
    pub end: f64,
    /// Sequential label ("Chapter 3", "Part 2").
    pub label: String,
    /// Link that opens the video at this chunk's start.
    pub source_link: String,
}

impl Chunk {
    /// Create a chunk of `video_id`, deriving its deep link from `start`.
    pub fn new(video_id: &str, label: String, text: String, start: f64, end: f64) -> Self {
        Self {
            source_link: deep_link(video_id, start),
            text,
            start,
            end: end.max(start),
            label,
        }
    }

    /// Time range for display, e.g. `01:05→02:30`.
    pub fn format_time_range(&self) -> String {
        format!("{}→{}", format_timestamp(self.start), format_timestamp(self.end))
    }
}

/// YouTube link that starts playback at `seconds`.
pub fn deep_link(video_id: &str, seconds: f64) -> String {
    format!(
        "https://www.youtube.com/watch?v={}&t={}s",
        video_id,
        seconds.max(0.0) as u64
    )
}

/// Segmentation strategy name, as written in configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChunkingStrategy {
    /// Fixed-size overlapping character windows.
    Window,
    /// Split where adjacent captions drift apart in meaning.
    Drift,
}

impl std::str::FromStr for ChunkingStrategy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "window" | "fixed" | "fixed-window" => Ok(ChunkingStrategy::Window),
            "drift" | "semantic" | "semantic-drift" => Ok(ChunkingStrategy::Drift),
            _ => Err(format!("Unknown chunking strategy: {}", s)),
        }
    }
}

impl std::fmt::Display for ChunkingStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChunkingStrategy::Window => write!(f, "window"),
            ChunkingStrategy::Drift => write!(f, "drift"),
        }
    }
}

/// A segmentation policy together with its parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SegmenterPolicy {
    FixedWindow {
        /// Window size in characters.
        chunk_size: usize,
        /// Characters shared by consecutive windows.
        chunk_overlap: usize,
    },
    SemanticDrift {
        /// Cosine similarity below which a new chunk starts.
        drift_threshold: f32,
        /// Segment length in characters that forces a new chunk.
        max_chars: usize,
    },
}

impl SegmenterPolicy {
    pub fn strategy(&self) -> ChunkingStrategy {
        match self {
            SegmenterPolicy::FixedWindow { .. } => ChunkingStrategy::Window,
            SegmenterPolicy::SemanticDrift { .. } => ChunkingStrategy::Drift,
        }
    }
}

/// Trait for transcript segmentation implementations.
#[async_trait]
pub trait Chunker: Send + Sync {
    /// Split a transcript into chunks.
    async fn chunk(&self, transcript: &Transcript) -> Result<Vec<Chunk>>;
}

/// Create the chunker for a policy.
///
/// The embedder is only used by semantic-drift segmentation.
pub fn create_chunker(policy: SegmenterPolicy, embedder: Arc<dyn Embedder>) -> Result<Box<dyn Chunker>> {
    Ok(match policy {
        SegmenterPolicy::FixedWindow { chunk_size, chunk_overlap } => {
            Box::new(WindowChunker::new(chunk_size, chunk_overlap)?)
        }
        SegmenterPolicy::SemanticDrift { drift_threshold, max_chars } => {
            Box::new(DriftChunker::new(embedder, drift_threshold, max_chars))
        }
    })
}
