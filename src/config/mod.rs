//! Configuration module for vidask.
//!
//! Handles loading settings, prompt templates and API credentials.

mod credentials;
mod prompts;
mod settings;

pub use credentials::Credentials;
pub use prompts::{AnswerPrompts, Prompts};
pub use settings::{
    ChunkingSettings, EmbeddingSettings, GeneralSettings, PromptSettings, RagSettings,
    ServerSettings, Settings, YoutubeSettings,
};
