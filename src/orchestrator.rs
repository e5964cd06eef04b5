//! Pipeline orchestrator for vidask.
//!
//! Runs one request from video URL to answer: extract the video ID, fetch
//! captions, segment them, embed and index the chunks, retrieve context and
//! ask the language model. Every request builds its own index; only the
//! configured components are shared.

use crate::chunking::{create_chunker, Chunk, SegmenterPolicy};
use crate::config::{Credentials, Prompts, Settings};
use crate::embedding::{Embedder, OpenAIEmbedder};
use crate::error::{Result, VidaskError};
use crate::llm::{LanguageModel, OpenAIChatModel};
use crate::openai::create_client;
use crate::rag::{Answerer, RagResponse, Retriever};
use crate::transcript::{extract_video_id, TranscriptFetcher, YtDlpFetcher};
use crate::vector_store::MemoryVectorStore;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// The main orchestrator for the vidask pipeline.
pub struct Orchestrator {
    settings: Settings,
    policy: SegmenterPolicy,
    fetcher: Arc<dyn TranscriptFetcher>,
    embedder: Arc<dyn Embedder>,
    retriever: Retriever,
    answerer: Answerer,
}

impl Orchestrator {
    /// Create an orchestrator, reading credentials from the environment.
    pub fn new(settings: Settings) -> Result<Self> {
        settings.validate()?;
        let credentials = Credentials::load(&settings)?;
        Self::with_credentials(settings, &credentials)
    }

    /// Create an orchestrator with already resolved credentials.
    pub fn with_credentials(settings: Settings, credentials: &Credentials) -> Result<Self> {
        let prompts = Prompts::load(
            settings.prompts.custom_dir.as_deref(),
            Some(&settings.prompts.variables),
        )?;

        let embedding_client = create_client(
            credentials.embedding_key(),
            settings.embedding.api_base.as_deref(),
        )?;
        let chat_client = create_client(credentials.chat_key(), settings.rag.api_base.as_deref())?;

        let embedder: Arc<dyn Embedder> = Arc::new(OpenAIEmbedder::with_config(
            embedding_client,
            &settings.embedding.model,
            settings.embedding.dimensions,
        ));

        let model: Arc<dyn LanguageModel> = Arc::new(OpenAIChatModel::with_config(
            chat_client,
            &settings.rag.model,
            settings.rag.temperature,
            settings.rag.max_tokens,
        ));

        let fetcher: Arc<dyn TranscriptFetcher> = Arc::new(YtDlpFetcher::with_config(
            &settings.youtube.ytdlp_path,
            Duration::from_secs(settings.youtube.timeout_seconds),
        ));

        info!(
            "Using {} for embeddings and {} for answers",
            settings.embedding.model, settings.rag.model
        );

        Self::with_components(settings, prompts, fetcher, embedder, model)
    }

    /// Create an orchestrator with custom components.
    pub fn with_components(
        settings: Settings,
        prompts: Prompts,
        fetcher: Arc<dyn TranscriptFetcher>,
        embedder: Arc<dyn Embedder>,
        model: Arc<dyn LanguageModel>,
    ) -> Result<Self> {
        settings.validate()?;
        let policy = settings.chunking.policy()?;

        let retriever = Retriever::new(embedder.clone()).with_top_k(settings.rag.top_k);
        let answerer = Answerer::new(model).with_prompts(prompts);

        Ok(Self {
            settings,
            policy,
            fetcher,
            embedder,
            retriever,
            answerer,
        })
    }

    /// Get the settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// The segmentation policy used for every request.
    pub fn policy(&self) -> SegmenterPolicy {
        self.policy
    }

    /// Answer a question about a video.
    #[instrument(skip(self, question), fields(video_url = %video_url))]
    pub async fn answer(&self, video_url: &str, question: &str) -> Result<RagResponse> {
        if question.trim().is_empty() {
            return Err(VidaskError::InvalidInput("Question must not be empty".to_string()));
        }

        let video = self.segment_video(video_url).await?;
        let store = self.index_chunks(video.chunks).await?;

        let sources = self.retriever.retrieve(&store, question).await?;
        info!("Answering from {} of {} chunks", sources.len(), store.len());

        self.answerer.answer(question, sources).await
    }

    /// Fetch and segment a video's transcript without answering anything.
    #[instrument(skip(self), fields(video_url = %video_url))]
    pub async fn segment_video(&self, video_url: &str) -> Result<SegmentedVideo> {
        let video_id = extract_video_id(video_url)?;

        info!("Fetching transcript for {}", video_id);
        let transcript = self
            .fetcher
            .fetch(&video_id, &self.settings.youtube.language)
            .await?;

        if !transcript.has_text() {
            return Err(VidaskError::NoTranscript(format!(
                "Transcript for {} is empty",
                video_id
            )));
        }
        debug!(
            "Fetched {} captions ({:.0}s)",
            transcript.captions.len(),
            transcript.duration_seconds()
        );

        let chunker = create_chunker(self.policy, self.embedder.clone())?;
        let chunks = chunker.chunk(&transcript).await?;
        info!("Created {} chunks with {} segmentation", chunks.len(), self.policy.strategy());

        Ok(SegmentedVideo { video_id, chunks })
    }

    /// Embed chunks and build a fresh index over them.
    async fn index_chunks(&self, chunks: Vec<Chunk>) -> Result<MemoryVectorStore> {
        if chunks.is_empty() {
            return Err(VidaskError::EmptyIndex(
                "Segmentation produced no chunks".to_string(),
            ));
        }

        let texts: Vec<String> = chunks.iter().map(|c| c.text.clone()).collect();
        let embeddings = self.embedder.embed_batch(&texts).await?;

        let mut store = MemoryVectorStore::new();
        let indexed = store.insert_batch(chunks, embeddings)?;
        debug!("Indexed {} chunks", indexed);

        Ok(store)
    }
}

/// A video's transcript split into chunks.
#[derive(Debug)]
pub struct SegmentedVideo {
    /// Video ID.
    pub video_id: String,
    /// Chunks in transcript order.
    pub chunks: Vec<Chunk>,
}
