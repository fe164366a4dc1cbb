//! Pre-flight checks before network operations.
//!
//! Validates that required API keys are available before starting
//! operations that would otherwise fail midway.

use crate::config::Settings;
use crate::error::{Result, ScoutError};

/// Requirements for different operations.
#[derive(Debug, Clone, Copy)]
pub enum Operation {
    /// Direct Data API queries require a YouTube API key.
    Query,
    /// Agent and chat require both the YouTube and OpenAI keys.
    Agent,
    /// Transcript download needs no API key.
    Transcript,
}

/// Run pre-flight checks for the given operation.
///
/// Returns Ok(()) if all checks pass, or an error describing what's missing.
pub fn check(operation: Operation, settings: &Settings) -> Result<()> {
    match operation {
        Operation::Query => {
            check_youtube_key(settings)?;
        }
        Operation::Agent => {
            check_youtube_key(settings)?;
            check_openai_key()?;
        }
        Operation::Transcript => {
            // Caption downloads are unauthenticated.
        }
    }
    Ok(())
}

/// Check that a YouTube API key is configured or exported.
fn check_youtube_key(settings: &Settings) -> Result<()> {
    if settings.youtube.resolve_api_key().is_some() {
        Ok(())
    } else {
        Err(ScoutError::Config(
            "YouTube API key not configured. Set youtube.api_key in the config file \
             or export YOUTUBE_API_KEY."
                .to_string(),
        ))
    }
}

/// Check if an OpenAI API key is configured.
fn check_openai_key() -> Result<()> {
    match std::env::var("OPENAI_API_KEY") {
        Ok(key) if !key.is_empty() => Ok(()),
        Ok(_) => Err(ScoutError::Config(
            "OPENAI_API_KEY is empty. Set it with: export OPENAI_API_KEY='sk-...'".to_string(),
        )),
        Err(_) => Err(ScoutError::Config(
            "OPENAI_API_KEY not set. Set it with: export OPENAI_API_KEY='sk-...'".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transcript_has_no_requirements() {
        let settings = Settings::default();
        assert!(check(Operation::Transcript, &settings).is_ok());
    }

    #[test]
    fn test_query_requires_youtube_key_from_settings() {
        let mut settings = Settings::default();
        settings.youtube.api_key = Some("key".to_string());
        assert!(check(Operation::Query, &settings).is_ok());
    }
}
