//! API credentials, resolved once at startup.

use super::Settings;
use crate::error::{Result, VidaskError};

/// API keys for the embedding and chat services.
///
/// Both usually resolve from the same environment variable; the per-service
/// `api_key_env` settings let the chat model live on another provider.
#[derive(Clone)]
pub struct Credentials {
    embedding_key: String,
    chat_key: String,
}

impl Credentials {
    /// Resolve credentials from the process environment.
    pub fn load(settings: &Settings) -> Result<Self> {
        Self::resolve(settings, |name| std::env::var(name).ok())
    }

    /// Resolve credentials through an arbitrary variable lookup.
    pub fn resolve<F>(settings: &Settings, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let default_env = settings.general.api_key_env.as_str();
        let embedding_env = settings.embedding.api_key_env.as_deref().unwrap_or(default_env);
        let chat_env = settings.rag.api_key_env.as_deref().unwrap_or(default_env);

        Ok(Self {
            embedding_key: read_key(&lookup, embedding_env)?,
            chat_key: read_key(&lookup, chat_env)?,
        })
    }

    /// Build credentials directly from known keys.
    pub fn new(embedding_key: impl Into<String>, chat_key: impl Into<String>) -> Self {
        Self {
            embedding_key: embedding_key.into(),
            chat_key: chat_key.into(),
        }
    }

    pub fn embedding_key(&self) -> &str {
        &self.embedding_key
    }

    pub fn chat_key(&self) -> &str {
        &self.chat_key
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("embedding_key", &"<redacted>")
            .field("chat_key", &"<redacted>")
            .finish()
    }
}

fn read_key<F>(lookup: &F, name: &str) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        Some(key) if !key.trim().is_empty() => Ok(key.trim().to_string()),
        Some(_) => Err(VidaskError::Config(format!(
            "{} is empty. Set it with: export {}='...'",
            name, name
        ))),
        None => Err(VidaskError::Config(format!(
            "{} not set. Set it with: export {}='...'",
            name, name
        ))),
    }
}
