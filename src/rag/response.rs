//! Answer generation.

use super::{context::format_context_for_prompt, ContextChunk};
use crate::config::Prompts;
use crate::error::Result;
use crate::llm::LanguageModel;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Answers questions from retrieved transcript context.
pub struct Answerer {
    model: Arc<dyn LanguageModel>,
    prompts: Prompts,
}

impl Answerer {
    /// Create an answerer with the default prompts.
    pub fn new(model: Arc<dyn LanguageModel>) -> Self {
        Self {
            model,
            prompts: Prompts::default(),
        }
    }

    /// Set custom prompts (with user-defined variables).
    pub fn with_prompts(mut self, prompts: Prompts) -> Self {
        self.prompts = prompts;
        self
    }

    /// Build the user prompt for a question and its context.
    pub fn build_user_prompt(&self, question: &str, sources: &[ContextChunk]) -> String {
        let mut vars = HashMap::new();
        vars.insert("question".to_string(), question.to_string());
        vars.insert("context".to_string(), format_context_for_prompt(sources));

        self.prompts.render_with_custom(&self.prompts.answer.user, &vars)
    }

    /// Ask the model and return its answer verbatim.
    #[instrument(skip(self, sources), fields(question = %question, sources = sources.len()))]
    pub async fn answer(&self, question: &str, sources: Vec<ContextChunk>) -> Result<RagResponse> {
        info!("Generating answer with {}", self.model.model_name());

        let system = self
            .prompts
            .render_with_custom(&self.prompts.answer.system, &HashMap::new());
        let user = self.build_user_prompt(question, &sources);

        let answer = self.model.complete(&system, &user).await?;

        debug!("Generated response with {} sources", sources.len());

        Ok(RagResponse { answer, sources })
    }
}

/// An answer together with the chunks it was generated from.
#[derive(Debug, Clone)]
pub struct RagResponse {
    /// The generated answer.
    pub answer: String,
    /// Source chunks used for the answer.
    pub sources: Vec<ContextChunk>,
}
