//! WebVTT caption parsing.

use super::TimedCaption;
use crate::error::{Result, VidaskError};
use regex::Regex;
use std::sync::OnceLock;
use tracing::debug;

/// Cue boundaries closer than this (seconds) count as touching.
const CONTIGUOUS_EPSILON: f64 = 0.001;

fn tag_regex() -> &'static Regex {
    static TAG_REGEX: OnceLock<Regex> = OnceLock::new();
    TAG_REGEX.get_or_init(|| Regex::new(r"<[^>]*>").expect("valid tag regex"))
}

/// Parse a WebVTT document into timed captions.
///
/// Inline markup (`<c>`, `<v Speaker>`, karaoke timestamps) is stripped, and
/// a line that a YouTube auto-caption cue repeats from the cue right before
/// it is emitted only once. Cues left without text are dropped.
pub fn parse_vtt(input: &str) -> Result<Vec<TimedCaption>> {
    let normalized = input.replace("\r\n", "\n");
    let mut blocks = normalized.split("\n\n").map(str::trim).filter(|b| !b.is_empty());

    let header = blocks.next().unwrap_or_default();
    if !header.trim_start_matches('\u{FEFF}').starts_with("WEBVTT") {
        return Err(VidaskError::NoTranscript(
            "Caption file is not WebVTT (missing WEBVTT header)".to_string(),
        ));
    }

    let mut captions = Vec::new();
    // Last text line of the previous cue, and that cue's end time.
    let mut previous: Option<(String, f64)> = None;

    for block in blocks {
        if block.starts_with("NOTE") || block.starts_with("STYLE") || block.starts_with("REGION") {
            continue;
        }

        let lines: Vec<&str> = block.lines().collect();
        let Some(timing_idx) = lines.iter().position(|l| l.contains("-->")) else {
            continue;
        };

        let Some((start, end)) = parse_timing(lines[timing_idx]) else {
            debug!("Skipping cue with unreadable timing: {}", lines[timing_idx]);
            continue;
        };

        let mut text_parts: Vec<String> = lines[timing_idx + 1..]
            .iter()
            .map(|raw| clean_line(raw))
            .filter(|line| !line.is_empty())
            .collect();
        let last_line = text_parts.last().cloned();

        // Rolling auto-captions repeat the previous cue's last line at the top
        // of a cue that starts exactly where the previous one ended.
        let repeats_previous = match (&previous, text_parts.first()) {
            (Some((prev_line, prev_end)), Some(first)) => {
                first == prev_line && (prev_end - start).abs() < CONTIGUOUS_EPSILON
            }
            _ => false,
        };
        if repeats_previous {
            text_parts.remove(0);
        }
        previous = last_line.map(|line| (line, end));

        if text_parts.is_empty() {
            continue;
        }

        captions.push(TimedCaption::new(
            text_parts.join(" "),
            start,
            (end - start).max(0.0),
        ));
    }

    Ok(captions)
}

/// Parse `00:00:01.000 --> 00:00:05.000 align:start` into (start, end) seconds.
fn parse_timing(line: &str) -> Option<(f64, f64)> {
    let (start, rest) = line.split_once("-->")?;
    let end = rest.split_whitespace().next()?;
    Some((parse_timestamp(start.trim())?, parse_timestamp(end)?))
}

/// Parse `HH:MM:SS.mmm` or `MM:SS.mmm` into seconds.
fn parse_timestamp(timestamp: &str) -> Option<f64> {
    let parts: Vec<&str> = timestamp.split(':').collect();
    let (hours, minutes, seconds) = match parts.as_slice() {
        [h, m, s] => (h.parse::<f64>().ok()?, m.parse::<f64>().ok()?, *s),
        [m, s] => (0.0, m.parse::<f64>().ok()?, *s),
        _ => return None,
    };
    let seconds = seconds.replace(',', ".").parse::<f64>().ok()?;
    Some(hours * 3600.0 + minutes * 60.0 + seconds)
}

fn clean_line(raw: &str) -> String {
    let stripped = tag_regex().replace_all(raw, "");
    let decoded = stripped
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&");
    decoded.split_whitespace().collect::<Vec<_>>().join(" ")
}
