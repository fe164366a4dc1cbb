//! CLI command implementations.

mod agent;
mod channel;
mod chat;
mod config;
mod doctor;
mod init;
mod search;
mod transcript;
mod videos;

pub use agent::run_agent;
pub use channel::run_channel;
pub use chat::run_chat;
pub use config::run_config;
pub use doctor::run_doctor;
pub use init::run_init;
pub use search::run_search;
pub use transcript::run_transcript;
pub use videos::run_videos;

use crate::cli::Output;
use crate::youtube::{ChannelInfo, PlaylistInfo, VideoInfo};

/// Print a channel search result line.
pub(crate) fn print_channel(channel: &ChannelInfo) {
    Output::list_item(&format!(
        "{} ({})",
        console::style(&channel.channel_title).bold(),
        console::style(&channel.channel_id).dim()
    ));
    if !channel.description.is_empty() {
        println!("    {}", super::output::content_preview(&channel.description, 120));
    }
}

/// Print a playlist search result line.
pub(crate) fn print_playlist(playlist: &PlaylistInfo) {
    Output::list_item(&format!(
        "{} ({})",
        console::style(&playlist.playlist_title).bold(),
        console::style(&playlist.playlist_id).dim()
    ));
    if !playlist.description.is_empty() {
        println!("    {}", super::output::content_preview(&playlist.description, 120));
    }
}

/// Print a video result line.
pub(crate) fn print_video(video: &VideoInfo) {
    Output::list_item(&format!(
        "{} ({})",
        console::style(&video.video_title).bold(),
        console::style(&video.video_id).dim()
    ));
    let mut details = vec![video.channel_title.clone(), video.published_at.clone()];
    if let Some(views) = video.view_count {
        details.push(format!("{} views", views));
    }
    if let Some(duration) = &video.duration {
        details.push(duration.clone());
    }
    details.retain(|d| !d.is_empty());
    if !details.is_empty() {
        println!("    {}", console::style(details.join(" | ")).dim());
    }
}
