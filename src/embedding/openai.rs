//! OpenAI-compatible embeddings implementation.

use super::Embedder;
use crate::error::{Result, VidaskError};
use async_openai::config::OpenAIConfig;
use async_openai::types::{CreateEmbeddingRequestArgs, EmbeddingInput};
use async_openai::Client;
use async_trait::async_trait;
use futures::stream::{self, StreamExt, TryStreamExt};
use tracing::{debug, instrument};

/// Inputs sent per embeddings request.
const BATCH_SIZE: usize = 100;

/// Requests in flight at once.
const MAX_CONCURRENT_BATCHES: usize = 4;

/// Embedder backed by an OpenAI-compatible embeddings API.
pub struct OpenAIEmbedder {
    client: Client<OpenAIConfig>,
    model: String,
    dimensions: Option<u32>,
}

impl OpenAIEmbedder {
    /// Create an embedder with the default model.
    pub fn new(client: Client<OpenAIConfig>) -> Self {
        Self::with_config(client, "text-embedding-3-small", None)
    }

    /// Create an embedder with a custom model and optional dimensions.
    pub fn with_config(client: Client<OpenAIConfig>, model: &str, dimensions: Option<u32>) -> Self {
        Self {
            client,
            model: model.to_string(),
            dimensions,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    async fn embed_single_batch(&self, input: Vec<String>) -> Result<Vec<Vec<f32>>> {
        let expected = input.len();

        let mut args = CreateEmbeddingRequestArgs::default();
        args.model(&self.model).input(EmbeddingInput::StringArray(input));
        if let Some(dimensions) = self.dimensions {
            args.dimensions(dimensions);
        }
        let request = args
            .build()
            .map_err(|e| VidaskError::Upstream(format!("Failed to build embedding request: {}", e)))?;

        let response = self
            .client
            .embeddings()
            .create(request)
            .await
            .map_err(|e| VidaskError::Upstream(format!("Embedding API error: {}", e)))?;

        // Sort by index to ensure correct order
        let mut data = response.data;
        data.sort_by_key(|e| e.index);

        if data.len() != expected {
            return Err(VidaskError::Upstream(format!(
                "Embedding API returned {} vectors for {} inputs",
                data.len(),
                expected
            )));
        }

        Ok(data.into_iter().map(|d| d.embedding).collect())
    }
}

#[async_trait]
impl Embedder for OpenAIEmbedder {
    #[instrument(skip(self, text))]
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let embeddings = self.embed_batch(&[text.to_string()]).await?;
        embeddings
            .into_iter()
            .next()
            .ok_or_else(|| VidaskError::Upstream("Empty embedding response".to_string()))
    }

    #[instrument(skip(self, texts), fields(count = texts.len()))]
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        debug!("Generating embeddings for {} texts", texts.len());

        let inputs: Vec<Vec<String>> = texts.chunks(BATCH_SIZE).map(<[String]>::to_vec).collect();

        // `buffered` keeps batch results in input order.
        let batches: Vec<Vec<Vec<f32>>> = stream::iter(inputs)
            .map(|batch| self.embed_single_batch(batch))
            .buffered(MAX_CONCURRENT_BATCHES)
            .try_collect()
            .await?;

        let all_embeddings: Vec<Vec<f32>> = batches.into_iter().flatten().collect();

        debug!("Generated {} embeddings", all_embeddings.len());
        Ok(all_embeddings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::openai::create_client;

    #[test]
    fn test_embedder_creation() {
        let client = create_client("sk-test", None).unwrap();
        let embedder = OpenAIEmbedder::new(client.clone());
        assert_eq!(embedder.model(), "text-embedding-3-small");

        let embedder = OpenAIEmbedder::with_config(client, "text-embedding-3-large", Some(256));
        assert_eq!(embedder.model(), "text-embedding-3-large");
        assert_eq!(embedder.dimensions, Some(256));
    }

    #[tokio::test]
    async fn test_empty_batch_skips_request() {
        let client = create_client("sk-test", Some("http://127.0.0.1:9")).unwrap();
        let embedder = OpenAIEmbedder::new(client);
        assert!(embedder.embed_batch(&[]).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_multi_batch_request_runs_on_spawned_task() {
        let client = create_client("sk-test", Some("http://127.0.0.1:9/v1")).unwrap();
        let embedder = std::sync::Arc::new(OpenAIEmbedder::new(client));
        let texts: Vec<String> = (0..250).map(|i| format!("caption {}", i)).collect();

        let result = tokio::spawn(async move { embedder.embed_batch(&texts).await })
            .await
            .unwrap();

        assert!(matches!(result, Err(VidaskError::Upstream(_))));
    }
}
