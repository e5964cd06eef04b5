//! Pre-flight checks before running the pipeline.
//!
//! Validates that required tools and configuration are available
//! before starting operations that would otherwise fail midway.

use crate::config::{Credentials, Settings};
use crate::error::{Result, VidaskError};
use std::process::Command;

/// Run pre-flight checks for commands that fetch and index a video.
///
/// Returns Ok(()) if all checks pass, or an error describing what's missing.
pub fn check(settings: &Settings) -> Result<()> {
    settings.validate()?;
    Credentials::load(settings)?;
    check_tool(&settings.youtube.ytdlp_path)?;
    Ok(())
}

/// Check if an external tool is available.
fn check_tool(name: &str) -> Result<()> {
    match Command::new(name).arg("--version").output() {
        Ok(output) if output.status.success() => Ok(()),
        Ok(_) => Err(VidaskError::ToolNotFound(format!(
            "{} is installed but not working correctly",
            name
        ))),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(VidaskError::ToolNotFound(name.to_string()))
        }
        Err(e) => Err(VidaskError::ToolNotFound(format!("{}: {}", name, e))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_tool_reported() {
        let err = check_tool("vidask-no-such-binary").unwrap_err();
        assert!(matches!(err, VidaskError::ToolNotFound(_)));
    }

    #[test]
    fn test_invalid_settings_fail_before_tool_lookup() {
        let mut settings = Settings::default();
        settings.rag.top_k = 0;
        settings.youtube.ytdlp_path = "vidask-no-such-binary".into();

        assert!(matches!(check(&settings), Err(VidaskError::Config(_))));
    }
}
