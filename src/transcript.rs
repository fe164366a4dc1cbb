//! Transcript download for YouTube videos.

use crate::error::{Result, ScoutError};
use crate::youtube::extract_video_id;
use tracing::info;
use yt_transcript_rs::api::YouTubeTranscriptApi;

/// Download the transcript for a video, given a video id or URL.
///
/// With `timestamps`, each line is prefixed with its start offset.
pub async fn fetch_transcript(video: &str, timestamps: bool, languages: &[String]) -> Result<String> {
    let video_id = extract_video_id(video).ok_or_else(|| {
        ScoutError::InvalidQuery(format!("not a YouTube video ID or URL: {}", video))
    })?;

    info!(video_id = %video_id, timestamps, "downloading transcript");

    let api = YouTubeTranscriptApi::new(None, None, None)
        .map_err(|e| ScoutError::Transcript(format!("failed to create transcript client: {}", e)))?;

    let langs: Vec<&str> = if languages.is_empty() {
        vec!["en"]
    } else {
        languages.iter().map(String::as_str).collect()
    };

    let transcript = api
        .fetch_transcript(&video_id, &langs, false)
        .await
        .map_err(|e| {
            ScoutError::Transcript(format!("failed to fetch transcript for {}: {}", video_id, e))
        })?;

    let mut lines = Vec::new();
    for entry in transcript {
        if timestamps {
            lines.push(format!("[{}] {}", format_offset(entry.start), entry.text));
        } else {
            lines.push(entry.text);
        }
    }

    Ok(lines.join("\n"))
}

/// Format a start offset in seconds as `mm:ss` or `hh:mm:ss`.
fn format_offset(seconds: f64) -> String {
    let total = seconds as u32;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;

    if hours > 0 {
        format!("{:02}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{:02}:{:02}", minutes, secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_offset() {
        assert_eq!(format_offset(0.0), "00:00");
        assert_eq!(format_offset(65.4), "01:05");
        assert_eq!(format_offset(3665.0), "01:01:05");
    }

    #[tokio::test]
    async fn test_invalid_input_rejected_before_fetch() {
        let err = fetch_transcript("definitely not a video", false, &[])
            .await
            .unwrap_err();
        assert!(matches!(err, ScoutError::InvalidQuery(_)));
    }
}
