//! Chunks command implementation.

use crate::cli::preflight;
use crate::cli::Output;
use crate::config::Settings;
use crate::orchestrator::Orchestrator;
use anyhow::Result;

/// Run the chunks command: fetch and segment a video, then print the chunks.
pub async fn run_chunks(video_url: &str, strategy: Option<String>, mut settings: Settings) -> Result<()> {
    if let Some(strategy) = strategy {
        settings.chunking.strategy = strategy;
    }

    if let Err(e) = preflight::check(&settings) {
        Output::error(&format!("{}", e));
        return Err(e.into());
    }

    let orchestrator = Orchestrator::new(settings)?;

    let spinner = Output::spinner("Fetching and segmenting the transcript...");
    let video = match orchestrator.segment_video(video_url).await {
        Ok(video) => {
            spinner.finish_and_clear();
            video
        }
        Err(e) => {
            spinner.finish_and_clear();
            Output::error(&format!("Failed to segment video: {}", e));
            return Err(e.into());
        }
    };

    Output::header(&format!("Chunks for {}", video.video_id));
    Output::kv("Strategy", &orchestrator.policy().strategy().to_string());
    Output::kv("Chunks", &video.chunks.len().to_string());

    for chunk in &video.chunks {
        Output::chunk(
            &chunk.label,
            &chunk.format_time_range(),
            &chunk.text,
            &chunk.source_link,
            None,
        );
    }

    if video.chunks.is_empty() {
        Output::warning("The transcript produced no chunks.");
    }

    Ok(())
}
