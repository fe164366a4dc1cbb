//! Video details command.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::youtube::{Resource, YouTubeClient};
use anyhow::Result;

/// Run the videos command.
pub async fn run_videos(video_ids: &str, limit: u32, settings: Settings) -> Result<()> {
    if let Err(e) = preflight::check(Operation::Query, &settings) {
        Output::error(&format!("{}", e));
        Output::info("Run 'ytscout doctor' for detailed diagnostics.");
        return Err(e.into());
    }

    let ids: Vec<String> = video_ids
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    let client = YouTubeClient::from_settings(&settings)?;

    let spinner = Output::spinner("Fetching video details...");
    let results = client.get_video_info(&ids, limit).await;
    spinner.finish_and_clear();
    let results = results?;

    for video in &results.videos {
        Output::header(&video.video_title);
        Output::kv("ID", &video.video_id);
        Output::kv("URL", &Resource::Video.url(&video.video_id));
        Output::kv("Channel", &video.channel_title);
        Output::kv("Published", &video.published_at);
        if let Some(duration) = &video.duration {
            Output::kv("Duration", duration);
        }
        if let Some(views) = video.view_count {
            Output::kv("Views", &views.to_string());
        }
        if let Some(likes) = video.like_count {
            Output::kv("Likes", &likes.to_string());
        }
        if let Some(comments) = video.comment_count {
            Output::kv("Comments", &comments.to_string());
        }
        if let Some(tags) = &video.tags {
            if !tags.is_empty() {
                Output::kv("Tags", &tags.join(", "));
            }
        }
    }

    if results.videos.is_empty() {
        Output::warning("No videos found for the given ids.");
    }

    Ok(())
}
