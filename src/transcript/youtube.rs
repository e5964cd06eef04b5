//! YouTube caption retrieval via yt-dlp.

use super::{parse_vtt, Transcript, TranscriptFetcher};
use crate::error::{Result, VidaskError};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, info, instrument};

/// Extract the video ID from a YouTube URL.
///
/// Accepts `...watch?v=<id>` and `youtu.be/<id>` forms; the ID runs up to the
/// next `&` or `?`.
pub fn extract_video_id(video_url: &str) -> Result<String> {
    let video_url = video_url.trim();

    let rest = if let Some(idx) = video_url.rfind("v=") {
        &video_url[idx + "v=".len()..]
    } else if let Some(idx) = video_url.rfind("youtu.be/") {
        &video_url[idx + "youtu.be/".len()..]
    } else {
        return Err(VidaskError::InvalidInput(format!(
            "Invalid YouTube URL format: {}",
            video_url
        )));
    };

    let id = rest.split(['&', '?']).next().unwrap_or_default();
    if id.is_empty() {
        return Err(VidaskError::InvalidInput(format!(
            "YouTube URL has an empty video ID: {}",
            video_url
        )));
    }

    Ok(id.to_string())
}

/// Canonical watch URL for a video.
pub fn watch_url(video_id: &str) -> String {
    format!("https://www.youtube.com/watch?v={}", video_id)
}

/// Caption fetcher backed by the yt-dlp command-line tool.
pub struct YtDlpFetcher {
    binary: String,
    timeout: Duration,
}

impl YtDlpFetcher {
    pub fn new() -> Self {
        Self::with_config("yt-dlp", Duration::from_secs(120))
    }

    pub fn with_config(binary: &str, timeout: Duration) -> Self {
        Self {
            binary: binary.to_string(),
            timeout,
        }
    }

    /// Ask yt-dlp to write the video's captions as VTT into `output_dir`.
    async fn download_captions(&self, video_id: &str, language: &str, output_dir: &Path) -> Result<()> {
        let template = output_dir.join("%(id)s.%(ext)s");

        let run = Command::new(&self.binary)
            .arg("--skip-download")
            .arg("--write-subs")
            .arg("--write-auto-subs")
            .arg("--sub-langs").arg(language)
            .arg("--sub-format").arg("vtt")
            .arg("--output").arg(&template)
            .arg("--no-playlist")
            .arg("--no-warnings")
            .arg("--quiet")
            .arg(watch_url(video_id))
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output();

        let output = match tokio::time::timeout(self.timeout, run).await {
            Err(_) => {
                return Err(VidaskError::Upstream(format!(
                    "yt-dlp timed out after {}s fetching captions for {}",
                    self.timeout.as_secs(),
                    video_id
                )));
            }
            Ok(Err(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(VidaskError::ToolNotFound(self.binary.clone()));
            }
            Ok(Err(e)) => {
                return Err(VidaskError::Upstream(format!("yt-dlp execution failed: {e}")));
            }
            Ok(Ok(output)) => output,
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(VidaskError::NoTranscript(format!(
                "yt-dlp could not fetch captions for {}: {}",
                video_id,
                stderr.trim()
            )));
        }

        Ok(())
    }
}

impl Default for YtDlpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Locate the VTT file yt-dlp wrote for a video.
fn find_caption_file(dir: &Path, video_id: &str) -> Option<PathBuf> {
    let mut candidates: Vec<PathBuf> = std::fs::read_dir(dir)
        .ok()?
        .flatten()
        .map(|entry| entry.path())
        .filter(|p| p.extension().and_then(|e| e.to_str()) == Some("vtt"))
        .filter(|p| {
            p.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with(video_id))
        })
        .collect();

    candidates.sort();
    candidates.into_iter().next()
}

#[async_trait]
impl TranscriptFetcher for YtDlpFetcher {
    #[instrument(skip(self))]
    async fn fetch(&self, video_id: &str, language: &str) -> Result<Transcript> {
        let temp_dir = tempfile::tempdir()?;

        debug!("Downloading {} captions for {}", language, video_id);
        self.download_captions(video_id, language, temp_dir.path()).await?;

        let path = find_caption_file(temp_dir.path(), video_id).ok_or_else(|| {
            VidaskError::NoTranscript(format!(
                "Captions are disabled or unavailable in '{}' for video {}",
                language, video_id
            ))
        })?;

        let content = tokio::fs::read_to_string(&path).await?;
        let transcript = Transcript::new(video_id, language, parse_vtt(&content)?);

        if !transcript.has_text() {
            return Err(VidaskError::NoTranscript(format!(
                "Caption track for video {} is empty",
                video_id
            )));
        }

        info!(
            "Fetched {} captions ({:.0}s) for {}",
            transcript.captions.len(),
            transcript.duration_seconds(),
            video_id
        );

        Ok(transcript)
    }
}
