//! Ask command implementation.

use crate::cli::preflight;
use crate::cli::Output;
use crate::config::Settings;
use crate::orchestrator::Orchestrator;
use anyhow::Result;

/// Run the ask command.
pub async fn run_ask(
    video_url: &str,
    question: &str,
    top_k: Option<usize>,
    strategy: Option<String>,
    mut settings: Settings,
) -> Result<()> {
    if let Some(top_k) = top_k {
        settings.rag.top_k = top_k;
    }
    if let Some(strategy) = strategy {
        settings.chunking.strategy = strategy;
    }

    // Pre-flight checks
    if let Err(e) = preflight::check(&settings) {
        Output::error(&format!("{}", e));
        return Err(e.into());
    }

    let orchestrator = Orchestrator::new(settings)?;

    let spinner = Output::spinner("Reading the transcript...");

    match orchestrator.answer(video_url, question).await {
        Ok(response) => {
            spinner.finish_and_clear();

            println!("\n{}\n", response.answer);

            if !response.sources.is_empty() {
                Output::header("Sources");
                for source in &response.sources {
                    Output::chunk(
                        &source.label,
                        &source.time_range,
                        &source.content,
                        &source.url,
                        Some(source.score),
                    );
                }
            }
        }
        Err(e) => {
            spinner.finish_and_clear();
            Output::error(&format!("Failed to generate answer: {}", e));
            return Err(e.into());
        }
    }

    Ok(())
}
