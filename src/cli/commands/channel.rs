//! Channel lookup command.

use super::print_video;
use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::youtube::{Resource, YouTubeClient};
use anyhow::Result;

/// Run the channel command.
pub async fn run_channel(channel_id: &str, videos: Option<u32>, settings: Settings) -> Result<()> {
    if let Err(e) = preflight::check(Operation::Query, &settings) {
        Output::error(&format!("{}", e));
        Output::info("Run 'ytscout doctor' for detailed diagnostics.");
        return Err(e.into());
    }

    let client = YouTubeClient::from_settings(&settings)?;

    let spinner = Output::spinner("Fetching channel...");
    let info = client.get_channel_info(channel_id).await;
    spinner.finish_and_clear();
    let info = info?;

    Output::header(&info.channel_title);
    Output::kv("ID", &info.channel_id);
    Output::kv("URL", &Resource::Channel.url(&info.channel_id));
    Output::kv("Published", &info.published_at);
    if let Some(country) = &info.country {
        Output::kv("Country", country);
    }
    if let Some(subs) = info.subscriber_count {
        Output::kv("Subscribers", &subs.to_string());
    }
    if let Some(views) = info.view_count {
        Output::kv("Views", &views.to_string());
    }
    if let Some(count) = info.video_count {
        Output::kv("Videos", &count.to_string());
    }
    if !info.description.is_empty() {
        println!("\n{}", info.description);
    }

    if let Some(limit) = videos {
        let spinner = Output::spinner("Fetching uploads...");
        let results = client.get_channel_videos(channel_id, limit).await;
        spinner.finish_and_clear();
        let results = results?;

        Output::header(&format!(
            "Recent uploads ({} of ~{})",
            results.videos.len(),
            results.total_results
        ));
        for video in &results.videos {
            print_video(video);
        }
    }

    Ok(())
}
