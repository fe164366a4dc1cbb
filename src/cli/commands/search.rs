//! Direct search command.

use super::{print_channel, print_playlist, print_video};
use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::error::ScoutError;
use crate::youtube::{SearchQuery, YouTubeClient};
use anyhow::Result;
use chrono::{DateTime, Utc};

/// Run the search command.
pub async fn run_search(
    kind: &str,
    query_text: &str,
    limit: u32,
    order: Option<String>,
    region: Option<String>,
    after: Option<String>,
    before: Option<String>,
    duration: Option<String>,
    settings: Settings,
) -> Result<()> {
    if let Err(e) = preflight::check(Operation::Query, &settings) {
        Output::error(&format!("{}", e));
        Output::info("Run 'ytscout doctor' for detailed diagnostics.");
        return Err(e.into());
    }

    let client = YouTubeClient::from_settings(&settings)?;

    let mut query = SearchQuery::new(query_text)
        .with_limit(limit)
        .with_region(region.unwrap_or_else(|| settings.youtube.region_code.clone()));

    if let Some(order) = order {
        query.order = order.parse().map_err(ScoutError::InvalidQuery)?;
    }
    if let Some(after) = after {
        query = query.with_published_after(parse_bound(&after)?);
    }
    if let Some(before) = before {
        query = query.with_published_before(parse_bound(&before)?);
    }
    if let Some(duration) = duration {
        query = query.with_duration(duration.parse().map_err(ScoutError::InvalidQuery)?);
    }

    let spinner = Output::spinner("Searching...");

    match kind {
        "channels" | "channel" => {
            let results = client.search_channels(&query).await;
            spinner.finish_and_clear();
            let results = results?;
            Output::header(&format!(
                "Channels ({} of ~{})",
                results.channels.len(),
                results.total_results
            ));
            for channel in &results.channels {
                print_channel(channel);
            }
        }
        "playlists" | "playlist" => {
            let results = client.search_playlists(&query).await;
            spinner.finish_and_clear();
            let results = results?;
            Output::header(&format!(
                "Playlists ({} of ~{})",
                results.playlists.len(),
                results.total_results
            ));
            for playlist in &results.playlists {
                print_playlist(playlist);
            }
        }
        "videos" | "video" => {
            let results = client.search_videos(&query).await;
            spinner.finish_and_clear();
            let results = results?;
            Output::header(&format!(
                "Videos ({} of ~{})",
                results.videos.len(),
                results.total_results
            ));
            for video in &results.videos {
                print_video(video);
            }
        }
        other => {
            spinner.finish_and_clear();
            return Err(ScoutError::InvalidQuery(format!(
                "unknown search kind '{}'; expected channels, playlists, or videos",
                other
            ))
            .into());
        }
    }

    Ok(())
}

fn parse_bound(value: &str) -> Result<DateTime<Utc>, ScoutError> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            ScoutError::InvalidQuery(format!("invalid RFC 3339 timestamp '{}': {}", value, e))
        })
}
