//! Deterministic stand-ins for the network-facing components.

use crate::embedding::Embedder;
use crate::error::{Result, VidaskError};
use crate::llm::LanguageModel;
use crate::transcript::{TimedCaption, Transcript, TranscriptFetcher};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

const FAKE_DIMENSIONS: usize = 32;

/// Embedder returning fixed vectors for known texts and a hashed
/// bag-of-words vector for everything else.
#[derive(Default)]
pub(crate) struct FakeEmbedder {
    known: HashMap<String, Vec<f32>>,
    failing: bool,
}

impl FakeEmbedder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return `embedding` whenever `text` (trimmed) is embedded.
    pub fn with(mut self, text: &str, embedding: Vec<f32>) -> Self {
        self.known.insert(text.trim().to_string(), embedding);
        self
    }

    /// Fail every call with an upstream error.
    pub fn failing(mut self) -> Self {
        self.failing = true;
        self
    }

    fn vector_for(&self, text: &str) -> Vec<f32> {
        let text = text.trim();
        if let Some(embedding) = self.known.get(text) {
            return embedding.clone();
        }

        let mut vector = vec![0.0; FAKE_DIMENSIONS];
        // Small bias keeps the vector nonzero for text without words.
        vector[FAKE_DIMENSIONS - 1] = 0.01;
        for word in text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
        {
            vector[bucket(&word.to_lowercase())] += 1.0;
        }
        vector
    }
}

/// FNV-1a, so buckets are stable across runs.
fn bucket(word: &str) -> usize {
    let mut hash: u64 = 0xcbf29ce484222325;
    for byte in word.bytes() {
        hash ^= byte as u64;
        hash = hash.wrapping_mul(0x100000001b3);
    }
    (hash % (FAKE_DIMENSIONS as u64 - 1)) as usize
}

#[async_trait]
impl Embedder for FakeEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let mut embeddings = self.embed_batch(&[text.to_string()]).await?;
        embeddings
            .pop()
            .ok_or_else(|| VidaskError::Upstream("empty batch".into()))
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if self.failing {
            return Err(VidaskError::Upstream("embedding service unavailable".into()));
        }
        Ok(texts.iter().map(|t| self.vector_for(t)).collect())
    }
}

/// Fetcher serving one canned caption list, or reporting no captions.
pub(crate) struct StaticFetcher {
    captions: Option<Vec<TimedCaption>>,
    requested: Mutex<Vec<String>>,
}

impl StaticFetcher {
    pub fn new(captions: Vec<TimedCaption>) -> Self {
        Self {
            captions: Some(captions),
            requested: Mutex::new(Vec::new()),
        }
    }

    /// A video whose captions are disabled.
    pub fn unavailable() -> Self {
        Self {
            captions: None,
            requested: Mutex::new(Vec::new()),
        }
    }

    /// Video IDs fetched so far, in order.
    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl TranscriptFetcher for StaticFetcher {
    async fn fetch(&self, video_id: &str, language: &str) -> Result<Transcript> {
        if let Ok(mut requested) = self.requested.lock() {
            requested.push(video_id.to_string());
        }

        match &self.captions {
            Some(captions) => Ok(Transcript::new(video_id, language, captions.clone())),
            None => Err(VidaskError::NoTranscript(format!(
                "Subtitles are disabled for video {}",
                video_id
            ))),
        }
    }
}

/// Language model that records its prompts and replies with a fixed
/// answer, or echoes the user prompt when none is set.
#[derive(Default)]
pub(crate) struct EchoModel {
    reply: Option<String>,
    last: Mutex<Option<(String, String)>>,
}

impl EchoModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_reply(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
            last: Mutex::new(None),
        }
    }

    /// The (system, user) prompts of the most recent call.
    pub fn last_call(&self) -> Option<(String, String)> {
        self.last.lock().ok().and_then(|last| last.clone())
    }
}

#[async_trait]
impl LanguageModel for EchoModel {
    async fn complete(&self, system: &str, user: &str) -> Result<String> {
        if let Ok(mut last) = self.last.lock() {
            *last = Some((system.to_string(), user.to_string()));
        }
        Ok(self.reply.clone().unwrap_or_else(|| user.to_string()))
    }

    fn model_name(&self) -> &str {
        "echo"
    }
}

/// Language model whose every call fails.
pub(crate) struct FailingModel;

#[async_trait]
impl LanguageModel for FailingModel {
    async fn complete(&self, _system: &str, _user: &str) -> Result<String> {
        Err(VidaskError::Upstream("chat service unavailable".into()))
    }

    fn model_name(&self) -> &str {
        "failing"
    }
}
