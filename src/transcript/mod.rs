//! Transcript retrieval for YouTube videos.
//!
//! A transcript is the ordered list of timed captions for one video in one
//! language. Captions are fetched with yt-dlp as WebVTT and parsed here.

mod vtt;
mod youtube;

pub use vtt::parse_vtt;
pub use youtube::{extract_video_id, watch_url, YtDlpFetcher};

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A single timed subtitle entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimedCaption {
    /// Caption text.
    pub text: String,
    /// Start time in seconds.
    pub start: f64,
    /// Duration in seconds.
    pub duration: f64,
}

impl TimedCaption {
    pub fn new(text: impl Into<String>, start: f64, duration: f64) -> Self {
        Self {
            text: text.into(),
            start,
            duration,
        }
    }

    /// End time in seconds.
    pub fn end(&self) -> f64 {
        self.start + self.duration
    }
}

/// The captions of one video in one language.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transcript {
    /// Video ID this transcript belongs to.
    pub video_id: String,
    /// Caption language code.
    pub language: String,
    /// Captions in playback order.
    pub captions: Vec<TimedCaption>,
}

impl Transcript {
    pub fn new(video_id: impl Into<String>, language: impl Into<String>, captions: Vec<TimedCaption>) -> Self {
        Self {
            video_id: video_id.into(),
            language: language.into(),
            captions,
        }
    }

    /// Whether the transcript carries any spoken text.
    pub fn has_text(&self) -> bool {
        self.captions.iter().any(|c| !c.text.trim().is_empty())
    }

    /// End of the last caption, in seconds.
    pub fn duration_seconds(&self) -> f64 {
        self.captions.last().map(|c| c.end()).unwrap_or(0.0)
    }
}

/// Trait for caption retrieval services.
#[async_trait]
pub trait TranscriptFetcher: Send + Sync {
    /// Fetch the captions of a video in the given language.
    async fn fetch(&self, video_id: &str, language: &str) -> Result<Transcript>;
}

/// Format seconds as MM:SS or HH:MM:SS.
pub fn format_timestamp(seconds: f64) -> String {
    let total_seconds = seconds.max(0.0) as u32;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let secs = total_seconds % 60;

    if hours > 0 {
        format!("{:02}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{:02}:{:02}", minutes, secs)
    }
}
