//! CLI module for ytscout.

pub mod commands;
mod output;
pub mod preflight;

pub use output::Output;

use clap::{Parser, Subcommand};

/// ytscout - YouTube exploration from the terminal
///
/// A conversational CLI agent over the YouTube Data API: search channels,
/// playlists, and videos, inspect metadata, and download transcripts.
#[derive(Parser, Debug)]
#[command(name = "ytscout")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize ytscout and verify configuration
    Init,

    /// Check API keys and configuration
    Doctor,

    /// Start an interactive chat session with the YouTube agent
    Chat {
        /// LLM model to use
        #[arg(short, long)]
        model: Option<String>,
    },

    /// Run the agent on a single task (e.g. "find channels about sourdough")
    Agent {
        /// The task for the agent to perform
        task: String,

        /// LLM model to use
        #[arg(short, long)]
        model: Option<String>,
    },

    /// Search channels, playlists, or videos directly
    Search {
        /// What to search for: channels, playlists, or videos
        kind: String,

        /// Search query
        query: String,

        /// Maximum number of results
        #[arg(short, long, default_value = "25")]
        limit: u32,

        /// Result ordering (date, rating, relevance, title, videoCount, viewCount)
        #[arg(short, long)]
        order: Option<String>,

        /// Region code (ISO 3166-1 alpha-2)
        #[arg(short, long)]
        region: Option<String>,

        /// Only results published at or after this RFC 3339 time
        #[arg(long)]
        after: Option<String>,

        /// Only results published before or at this RFC 3339 time
        #[arg(long)]
        before: Option<String>,

        /// Video duration filter (any, short, medium, long); videos only
        #[arg(long)]
        duration: Option<String>,
    },

    /// Show channel info, optionally with its recent uploads
    Channel {
        /// The channel ID
        channel_id: String,

        /// Also list the channel's N most recent uploads
        #[arg(long, value_name = "N")]
        videos: Option<u32>,
    },

    /// Show detailed metadata for one or more videos
    Videos {
        /// Comma-separated video IDs
        video_ids: String,

        /// Maximum number of results
        #[arg(short, long, default_value = "50")]
        limit: u32,
    },

    /// Download a video transcript
    Transcript {
        /// Video ID or URL
        video: String,

        /// Prefix each line with its start time
        #[arg(short, long)]
        timestamps: bool,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Open configuration file in editor
    Edit,

    /// Show configuration file path
    Path,
}
