//! vidask - ask questions about a YouTube video
//!
//! Answers natural-language questions about a single YouTube video using only
//! what is said in it.
//!
//! # Overview
//!
//! For every request vidask:
//! - Extracts the video ID from the URL and fetches its captions with yt-dlp
//! - Splits the transcript into chunks (fixed windows or semantic drift)
//! - Embeds the chunks into a throwaway in-memory index
//! - Retrieves the chunks closest to the question
//! - Asks a hosted language model to answer from those chunks, with timestamps
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - `config` - Settings, credentials and prompt templates
//! - `transcript` - Caption retrieval and WebVTT parsing
//! - `chunking` - Transcript segmentation policies
//! - `embedding` - Embedding generation
//! - `vector_store` - In-memory similarity index
//! - `llm` - Chat-completion models
//! - `rag` - Retrieval and answer generation
//! - `orchestrator` - Pipeline coordination
//!
//! # Example
//!
//! ```rust,no_run
//! use vidask::config::Settings;
//! use vidask::orchestrator::Orchestrator;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let orchestrator = Orchestrator::new(settings)?;
//!
//!     let response = orchestrator
//!         .answer("https://www.youtube.com/watch?v=dQw4w9WgXcQ", "What is this song about?")
//!         .await?;
//!     println!("{}", response.answer);
//!
//!     Ok(())
//! }
//! ```

pub mod chunking;
pub mod cli;
pub mod config;
pub mod embedding;
pub mod error;
pub mod llm;
pub mod openai;
pub mod orchestrator;
pub mod rag;
pub mod transcript;
pub mod vector_store;

#[cfg(test)]
pub(crate) mod test_util;

pub use error::{Result, VidaskError};
