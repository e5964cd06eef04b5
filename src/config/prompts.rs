//! Prompt templates for vidask.
//!
//! The answer prompt can be customized by placing an `answer.toml` file in the
//! custom prompts directory.

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::OnceLock;

fn placeholder_regex() -> &'static Regex {
    static PLACEHOLDER_REGEX: OnceLock<Regex> = OnceLock::new();
    PLACEHOLDER_REGEX.get_or_init(|| Regex::new(r"\{\{(\w+)\}\}").expect("valid placeholder regex"))
}

/// Collection of all prompt templates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Prompts {
    pub answer: AnswerPrompts,
    /// Custom variables from config, available in all prompts.
    #[serde(skip)]
    pub variables: HashMap<String, String>,
}

/// Prompts for answering a question from transcript context.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnswerPrompts {
    pub system: String,
    pub user: String,
}

impl Default for AnswerPrompts {
    fn default() -> Self {
        Self {
            system: r#"You are a helpful assistant that answers questions about a YouTube video using excerpts from its transcript.

Rules:
- Answer ONLY from the provided transcript context. Never use outside knowledge.
- If the context is insufficient to answer, reply exactly: "I don't know from this video".
- Always answer in the same language as the question.
- If the user greets you or makes casual conversation, reply in a short, friendly tone.
- If the question is unrelated to the video, politely decline to answer it.
- When the user asks where or when something is said, reference the specific timestamps shown in the context, e.g. [03:15→04:02].
- When the user asks for chapters, sections or an outline, enumerate every chapter in order with:
  1. a short descriptive title,
  2. its time range (start→end),
  3. a one-sentence summary."#
                .to_string(),

            user: r#"Transcript context (each excerpt starts with its [start→end] time range and label):

{{context}}

Question: {{question}}"#
                .to_string(),
        }
    }
}

impl Prompts {
    /// Load prompts, with optional custom directory and variables.
    pub fn load(
        custom_dir: Option<&str>,
        custom_variables: Option<&HashMap<String, String>>,
    ) -> crate::error::Result<Self> {
        let mut prompts = Prompts::default();

        if let Some(vars) = custom_variables {
            prompts.variables = vars.clone();
        }

        if let Some(dir) = custom_dir {
            let custom_path = PathBuf::from(shellexpand::tilde(dir).to_string());

            let answer_path = custom_path.join("answer.toml");
            if answer_path.exists() {
                let content = std::fs::read_to_string(&answer_path)?;
                prompts.answer = toml::from_str(&content)?;
            }
        }

        Ok(prompts)
    }

    /// Render a prompt template with the given variables.
    ///
    /// Placeholders are replaced in a single pass over the template, so
    /// substituted values are never expanded again. Unknown placeholders are
    /// left as written.
    pub fn render(template: &str, vars: &HashMap<String, String>) -> String {
        placeholder_regex()
            .replace_all(template, |caps: &Captures| match vars.get(&caps[1]) {
                Some(value) => value.clone(),
                None => caps[0].to_string(),
            })
            .into_owned()
    }

    /// Render a prompt template with both provided variables and custom config variables.
    /// Provided variables take precedence over custom config variables.
    pub fn render_with_custom(&self, template: &str, vars: &HashMap<String, String>) -> String {
        let mut merged = self.variables.clone();
        for (key, value) in vars {
            merged.insert(key.clone(), value.clone());
        }
        Self::render(template, &merged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_answer_prompt_rules() {
        let prompts = Prompts::default();
        let system = &prompts.answer.system;
        assert!(system.contains("I don't know from this video"));
        assert!(system.contains("same language as the question"));
        assert!(system.contains("friendly"));
        assert!(system.contains("unrelated to the video"));
        assert!(system.contains("timestamps"));
        assert!(system.contains("chapters"));
        assert!(prompts.answer.user.contains("{{context}}"));
        assert!(prompts.answer.user.contains("{{question}}"));
    }

    #[test]
    fn test_render_template() {
        let template = "Hello {{name}}, you have {{count}} messages.";
        let mut vars = HashMap::new();
        vars.insert("name".to_string(), "Alice".to_string());
        vars.insert("count".to_string(), "5".to_string());

        let result = Prompts::render(template, &vars);
        assert_eq!(result, "Hello Alice, you have 5 messages.");
    }

    #[test]
    fn test_substituted_values_are_not_expanded() {
        let template = "Context:\n{{context}}\n\nQuestion: {{question}} ({{unknown}})";
        let mut vars = HashMap::new();
        vars.insert("context".to_string(), "says {{question}} aloud".to_string());
        vars.insert("question".to_string(), "repeat {{context}} please".to_string());

        for _ in 0..32 {
            let rendered = Prompts::render(template, &vars);
            assert_eq!(
                rendered,
                "Context:\nsays {{question}} aloud\n\nQuestion: repeat {{context}} please ({{unknown}})"
            );
        }
    }

    #[test]
    fn test_custom_variables_yield_to_provided() {
        let mut custom = HashMap::new();
        custom.insert("channel".to_string(), "Rust Weekly".to_string());
        custom.insert("question".to_string(), "ignored".to_string());
        let prompts = Prompts::load(None, Some(&custom)).unwrap();

        let mut vars = HashMap::new();
        vars.insert("question".to_string(), "What is Rust?".to_string());

        let rendered = prompts.render_with_custom("{{channel}}: {{question}}", &vars);
        assert_eq!(rendered, "Rust Weekly: What is Rust?");
    }

    #[test]
    fn test_load_custom_answer_prompt() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("answer.toml"),
            "system = \"Be brief.\"\nuser = \"{{context}} / {{question}}\"\n",
        )
        .unwrap();

        let prompts = Prompts::load(dir.path().to_str(), None).unwrap();
        assert_eq!(prompts.answer.system, "Be brief.");
        assert_eq!(prompts.answer.user, "{{context}} / {{question}}");
    }
}
