//! Configuration settings for vidask.

use crate::chunking::{ChunkingStrategy, SegmenterPolicy};
use crate::error::{Result, VidaskError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub youtube: YoutubeSettings,
    pub embedding: EmbeddingSettings,
    pub chunking: ChunkingSettings,
    pub rag: RagSettings,
    pub prompts: PromptSettings,
    pub server: ServerSettings,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Log level used when no `-v` flag or `RUST_LOG` is given.
    pub log_level: String,
    /// Environment variable holding the API credential.
    pub api_key_env: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
        }
    }
}

/// Caption retrieval settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct YoutubeSettings {
    /// Caption language to request.
    pub language: String,
    /// Path or name of the yt-dlp binary.
    pub ytdlp_path: String,
    /// Upper bound on a single caption download, in seconds.
    pub timeout_seconds: u64,
}

impl Default for YoutubeSettings {
    fn default() -> Self {
        Self {
            language: "en".to_string(),
            ytdlp_path: "yt-dlp".to_string(),
            timeout_seconds: 120,
        }
    }
}

/// Embedding generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingSettings {
    /// Embedding model to use.
    pub model: String,
    /// Requested embedding dimensions (omitted from the request when unset).
    pub dimensions: Option<u32>,
    /// Base URL of an OpenAI-compatible embeddings API.
    pub api_base: Option<String>,
    /// Overrides `general.api_key_env` for the embeddings API.
    pub api_key_env: Option<String>,
}

impl Default for EmbeddingSettings {
    fn default() -> Self {
        Self {
            model: "text-embedding-3-small".to_string(),
            dimensions: None,
            api_base: None,
            api_key_env: None,
        }
    }
}

/// Transcript segmentation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkingSettings {
    /// Segmentation strategy (drift, window).
    pub strategy: String,
    /// Window size in characters (window strategy).
    pub chunk_size: usize,
    /// Characters shared by consecutive windows (window strategy).
    pub chunk_overlap: usize,
    /// Similarity below which adjacent captions start a new chunk (drift strategy).
    pub drift_threshold: f32,
    /// Segment length in characters that forces a new chunk (drift strategy).
    pub max_chars: usize,
}

impl Default for ChunkingSettings {
    fn default() -> Self {
        Self {
            strategy: "drift".to_string(),
            chunk_size: 1000,
            chunk_overlap: 200,
            drift_threshold: 0.6,
            max_chars: 1000,
        }
    }
}

impl ChunkingSettings {
    /// Build the segmenter policy these settings describe.
    pub fn policy(&self) -> Result<SegmenterPolicy> {
        let strategy: ChunkingStrategy = self.strategy.parse().map_err(VidaskError::Config)?;

        Ok(match strategy {
            ChunkingStrategy::Window => SegmenterPolicy::FixedWindow {
                chunk_size: self.chunk_size,
                chunk_overlap: self.chunk_overlap,
            },
            ChunkingStrategy::Drift => SegmenterPolicy::SemanticDrift {
                drift_threshold: self.drift_threshold,
                max_chars: self.max_chars,
            },
        })
    }
}

/// Answer generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RagSettings {
    /// Chat model used to generate answers.
    pub model: String,
    /// Sampling temperature.
    pub temperature: f32,
    /// Maximum tokens in a generated answer.
    pub max_tokens: u32,
    /// Number of chunks retrieved as context.
    pub top_k: usize,
    /// Base URL of an OpenAI-compatible chat completions API.
    pub api_base: Option<String>,
    /// Overrides `general.api_key_env` for the chat API.
    pub api_key_env: Option<String>,
}

impl Default for RagSettings {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            temperature: 0.7,
            max_tokens: 300,
            top_k: 4,
            api_base: None,
            api_key_env: None,
        }
    }
}

/// Prompt customization settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct PromptSettings {
    /// Directory for custom prompts (overrides defaults).
    pub custom_dir: Option<String>,
    /// Custom variables available in all prompts as {{variable_name}}.
    pub variables: std::collections::HashMap<String, String>,
}

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
        }
    }
}

impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or default location if None.
    pub fn load_from(path: Option<&PathBuf>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let settings: Settings = toml::from_str(&content)?;
            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("vidask")
            .join("config.toml")
    }

    /// Expand shell variables in paths (e.g., ~).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }

    /// Reject settings the pipeline cannot run with.
    pub fn validate(&self) -> Result<()> {
        let chunking = &self.chunking;
        match chunking.policy()? {
            SegmenterPolicy::FixedWindow { chunk_size, chunk_overlap } => {
                if chunk_size == 0 {
                    return Err(VidaskError::Config("chunking.chunk_size must be positive".into()));
                }
                if chunk_overlap >= chunk_size {
                    return Err(VidaskError::Config(format!(
                        "chunking.chunk_overlap ({}) must be smaller than chunking.chunk_size ({})",
                        chunk_overlap, chunk_size
                    )));
                }
            }
            SegmenterPolicy::SemanticDrift { drift_threshold, max_chars } => {
                if !(-1.0..=1.0).contains(&drift_threshold) {
                    return Err(VidaskError::Config(format!(
                        "chunking.drift_threshold must be within [-1, 1], got {}",
                        drift_threshold
                    )));
                }
                if max_chars == 0 {
                    return Err(VidaskError::Config("chunking.max_chars must be positive".into()));
                }
            }
        }

        if self.rag.top_k == 0 {
            return Err(VidaskError::Config("rag.top_k must be at least 1".into()));
        }

        if self.youtube.language.trim().is_empty() {
            return Err(VidaskError::Config("youtube.language must not be empty".into()));
        }

        Ok(())
    }
}
