//! ytscout - YouTube exploration from the terminal
//!
//! A conversational CLI agent over the YouTube Data API: an LLM agent with
//! tools for channel, playlist, and video search, metadata lookups, uploads
//! listings, transcript download, and hyperlink construction.
//!
//! # Overview
//!
//! ytscout allows you to:
//! - Chat with an agent that answers questions by calling YouTube tools
//! - Search channels, playlists, and videos directly from the command line
//! - Inspect channel and video metadata
//! - Download video transcripts
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - `config` - Configuration management
//! - `youtube` - Data API client, query types, pagination, entities
//! - `transcript` - Caption download
//! - `agent` - LLM agent with tool calling
//! - `cli` - Command-line interface
//!
//! # Example
//!
//! ```rust,no_run
//! use ytscout::youtube::{SearchQuery, YouTubeClient};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = YouTubeClient::new(std::env::var("YOUTUBE_API_KEY")?);
//!
//!     let query = SearchQuery::new("sourdough baking").with_limit(10);
//!     let results = client.search_videos(&query).await?;
//!     println!("{} of ~{} videos", results.videos.len(), results.total_results);
//!
//!     Ok(())
//! }
//! ```

pub mod agent;
pub mod cli;
pub mod config;
pub mod error;
pub mod openai;
pub mod transcript;
pub mod youtube;

pub use error::{Result, ScoutError};
