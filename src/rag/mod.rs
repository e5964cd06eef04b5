//! Retrieval-augmented answering over a single video's transcript.
//!
//! The [`Retriever`] picks the chunks closest to a question and the
//! [`Answerer`] turns them into a prompt for the language model.

pub mod context;
mod response;

pub use context::Retriever;
pub use response::{Answerer, RagResponse};

use crate::vector_store::SearchResult;

/// A retrieved chunk, formatted for prompts and display.
#[derive(Debug, Clone)]
pub struct ContextChunk {
    /// Sequential label ("Chapter 2").
    pub label: String,
    /// Time range, e.g. "01:05→02:30".
    pub time_range: String,
    /// Text content.
    pub content: String,
    /// Similarity score.
    pub score: f32,
    /// Link that opens the video at this chunk.
    pub url: String,
}

impl From<SearchResult> for ContextChunk {
    fn from(result: SearchResult) -> Self {
        Self {
            time_range: result.chunk.format_time_range(),
            label: result.chunk.label,
            content: result.chunk.text,
            score: result.score,
            url: result.chunk.source_link,
        }
    }
}
