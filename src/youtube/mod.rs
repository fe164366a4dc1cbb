//! YouTube Data API access: client, query types, pagination, and
//! normalized entities.

pub mod client;
pub mod link;
pub mod models;
pub mod paginate;
pub mod query;
pub mod types;

pub use client::YouTubeClient;
pub use link::{extract_video_id, Resource};
pub use models::{
    ChannelInfo, ChannelResults, PlaylistInfo, PlaylistResults, VideoInfo, VideoResults,
};
pub use paginate::{collect_all, Listing, Malformed, Page, PageFetcher, MAX_PAGE_SIZE};
pub use query::{SearchOrder, SearchQuery, VideoDuration};
