//! Normalized entities produced from raw API payloads.
//!
//! Each normalizer enforces the same policy: a missing identifier is fatal
//! for the page, any other absent field defaults to empty or `None`.

use super::paginate::{Listing, Malformed};
use super::types::{ChannelItem, PlaylistItem, SearchItem, VideoItem};
use serde::Serialize;

/// A YouTube channel.
#[derive(Debug, Clone, Serialize)]
pub struct ChannelInfo {
    pub channel_id: String,
    pub channel_title: String,
    pub description: String,
    pub published_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscriber_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_count: Option<u64>,
}

/// A YouTube playlist.
#[derive(Debug, Clone, Serialize)]
pub struct PlaylistInfo {
    pub playlist_id: String,
    pub playlist_title: String,
    pub channel_id: String,
    pub description: String,
    pub published_at: String,
}

/// A YouTube video. Detail fields are populated by `videos.list` only.
#[derive(Debug, Clone, Serialize)]
pub struct VideoInfo {
    pub channel_id: String,
    pub channel_title: String,
    pub video_id: String,
    pub video_title: String,
    pub description: String,
    pub published_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimension: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub like_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic_categories: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_paid_product_placement: Option<bool>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChannelResults {
    pub total_results: u32,
    pub channels: Vec<ChannelInfo>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlaylistResults {
    pub total_results: u32,
    pub playlists: Vec<PlaylistInfo>,
}

#[derive(Debug, Clone, Serialize)]
pub struct VideoResults {
    pub total_results: u32,
    pub videos: Vec<VideoInfo>,
}

impl From<Listing<ChannelInfo>> for ChannelResults {
    fn from(listing: Listing<ChannelInfo>) -> Self {
        Self {
            total_results: listing.total_results,
            channels: listing.items,
        }
    }
}

impl From<Listing<PlaylistInfo>> for PlaylistResults {
    fn from(listing: Listing<PlaylistInfo>) -> Self {
        Self {
            total_results: listing.total_results,
            playlists: listing.items,
        }
    }
}

impl From<Listing<VideoInfo>> for VideoResults {
    fn from(listing: Listing<VideoInfo>) -> Self {
        Self {
            total_results: listing.total_results,
            videos: listing.items,
        }
    }
}

impl ChannelInfo {
    /// Normalize a channel search result.
    pub fn from_search(item: &SearchItem) -> Result<Self, Malformed> {
        let channel_id = item
            .id
            .as_ref()
            .and_then(|id| id.channel_id.clone())
            .ok_or(Malformed::MissingId {
                field: "id.channelId",
            })?;
        let snippet = item
            .snippet
            .as_ref()
            .ok_or(Malformed::MissingField { field: "snippet" })?;

        Ok(Self {
            channel_id,
            channel_title: snippet.title.clone().unwrap_or_default(),
            description: snippet.description.clone().unwrap_or_default(),
            published_at: snippet.published_at.clone().unwrap_or_default(),
            country: None,
            view_count: None,
            subscriber_count: None,
            video_count: None,
        })
    }

    /// Normalize a direct `channels.list` lookup, statistics included.
    pub fn from_channel_item(item: &ChannelItem) -> Result<Self, Malformed> {
        let channel_id = item.id.clone().ok_or(Malformed::MissingId { field: "id" })?;
        let snippet = item
            .snippet
            .as_ref()
            .ok_or(Malformed::MissingField { field: "snippet" })?;
        let stats = item.statistics.as_ref();

        Ok(Self {
            channel_id,
            channel_title: snippet.title.clone().unwrap_or_default(),
            description: snippet.description.clone().unwrap_or_default(),
            published_at: snippet.published_at.clone().unwrap_or_default(),
            country: snippet.country.clone(),
            view_count: stats.and_then(|s| parse_count(&s.view_count)),
            subscriber_count: stats.and_then(|s| parse_count(&s.subscriber_count)),
            video_count: stats.and_then(|s| parse_count(&s.video_count)),
        })
    }
}

impl PlaylistInfo {
    /// Normalize a playlist search result.
    pub fn from_search(item: &SearchItem) -> Result<Self, Malformed> {
        let playlist_id = item
            .id
            .as_ref()
            .and_then(|id| id.playlist_id.clone())
            .ok_or(Malformed::MissingId {
                field: "id.playlistId",
            })?;
        let snippet = item
            .snippet
            .as_ref()
            .ok_or(Malformed::MissingField { field: "snippet" })?;

        Ok(Self {
            playlist_id,
            playlist_title: snippet.title.clone().unwrap_or_default(),
            channel_id: snippet.channel_id.clone().unwrap_or_default(),
            description: snippet.description.clone().unwrap_or_default(),
            published_at: snippet.published_at.clone().unwrap_or_default(),
        })
    }
}

impl VideoInfo {
    /// Normalize a video search result. Search snippets expose
    /// `publishTime`; fall back to `publishedAt` when absent.
    pub fn from_search(item: &SearchItem) -> Result<Self, Malformed> {
        let video_id = item
            .id
            .as_ref()
            .and_then(|id| id.video_id.clone())
            .ok_or(Malformed::MissingId {
                field: "id.videoId",
            })?;
        let snippet = item
            .snippet
            .as_ref()
            .ok_or(Malformed::MissingField { field: "snippet" })?;

        Ok(Self {
            channel_id: snippet.channel_id.clone().unwrap_or_default(),
            channel_title: snippet.channel_title.clone().unwrap_or_default(),
            video_id,
            video_title: snippet.title.clone().unwrap_or_default(),
            description: snippet.description.clone().unwrap_or_default(),
            published_at: snippet
                .publish_time
                .clone()
                .or_else(|| snippet.published_at.clone())
                .unwrap_or_default(),
            ..Self::empty_details()
        })
    }

    /// Normalize a `videos.list` item with full details.
    pub fn from_details(item: &VideoItem) -> Result<Self, Malformed> {
        let video_id = item.id.clone().ok_or(Malformed::MissingId { field: "id" })?;
        let snippet = item
            .snippet
            .as_ref()
            .ok_or(Malformed::MissingField { field: "snippet" })?;
        let content = item.content_details.as_ref();
        let stats = item.statistics.as_ref();

        Ok(Self {
            channel_id: snippet.channel_id.clone().unwrap_or_default(),
            channel_title: snippet.channel_title.clone().unwrap_or_default(),
            video_id,
            video_title: snippet.title.clone().unwrap_or_default(),
            description: snippet.description.clone().unwrap_or_default(),
            published_at: snippet.published_at.clone().unwrap_or_default(),
            tags: snippet.tags.clone(),
            duration: content.and_then(|c| c.duration.clone()),
            dimension: content.and_then(|c| c.dimension.clone()),
            view_count: stats.and_then(|s| parse_count(&s.view_count)),
            like_count: stats.and_then(|s| parse_count(&s.like_count)),
            comment_count: stats.and_then(|s| parse_count(&s.comment_count)),
            topic_categories: item
                .topic_details
                .as_ref()
                .and_then(|t| t.topic_categories.clone()),
            has_paid_product_placement: item
                .paid_product_placement_details
                .as_ref()
                .and_then(|p| p.has_paid_product_placement),
        })
    }

    /// Normalize an uploads-playlist item.
    pub fn from_playlist_item(item: &PlaylistItem) -> Result<Self, Malformed> {
        let snippet = item
            .snippet
            .as_ref()
            .ok_or(Malformed::MissingField { field: "snippet" })?;
        let video_id = snippet
            .resource_id
            .as_ref()
            .and_then(|r| r.video_id.clone())
            .ok_or(Malformed::MissingId {
                field: "snippet.resourceId.videoId",
            })?;

        Ok(Self {
            channel_id: snippet.channel_id.clone().unwrap_or_default(),
            channel_title: snippet.channel_title.clone().unwrap_or_default(),
            video_id,
            video_title: snippet.title.clone().unwrap_or_default(),
            description: snippet.description.clone().unwrap_or_default(),
            published_at: snippet.published_at.clone().unwrap_or_default(),
            ..Self::empty_details()
        })
    }

    fn empty_details() -> Self {
        Self {
            channel_id: String::new(),
            channel_title: String::new(),
            video_id: String::new(),
            video_title: String::new(),
            description: String::new(),
            published_at: String::new(),
            tags: None,
            duration: None,
            dimension: None,
            view_count: None,
            like_count: None,
            comment_count: None,
            topic_categories: None,
            has_paid_product_placement: None,
        }
    }
}

/// Statistics arrive as decimal strings; anything unparsable is treated as
/// absent rather than failing the record.
fn parse_count(value: &Option<String>) -> Option<u64> {
    value.as_ref().and_then(|v| v.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::youtube::types::{SearchItemId, SearchSnippet};

    fn search_item(video_id: Option<&str>, title: Option<&str>) -> SearchItem {
        SearchItem {
            id: Some(SearchItemId {
                video_id: video_id.map(String::from),
                ..Default::default()
            }),
            snippet: Some(SearchSnippet {
                title: title.map(String::from),
                channel_id: Some("UC123".to_string()),
                publish_time: Some("2024-05-01T12:00:00Z".to_string()),
                ..Default::default()
            }),
        }
    }

    #[test]
    fn test_video_from_search() {
        let item = search_item(Some("dQw4w9WgXcQ"), Some("Never Gonna Give You Up"));
        let video = VideoInfo::from_search(&item).unwrap();
        assert_eq!(video.video_id, "dQw4w9WgXcQ");
        assert_eq!(video.video_title, "Never Gonna Give You Up");
        assert_eq!(video.published_at, "2024-05-01T12:00:00Z");
        assert!(video.view_count.is_none());
    }

    #[test]
    fn test_video_missing_id_is_fatal() {
        let item = search_item(None, Some("ghost"));
        assert_eq!(
            VideoInfo::from_search(&item).unwrap_err(),
            Malformed::MissingId {
                field: "id.videoId"
            }
        );
    }

    #[test]
    fn test_video_missing_optional_title_defaults_empty() {
        let item = search_item(Some("dQw4w9WgXcQ"), None);
        let video = VideoInfo::from_search(&item).unwrap();
        assert_eq!(video.video_title, "");
    }

    #[test]
    fn test_video_missing_snippet_skips_record() {
        let item = SearchItem {
            id: Some(SearchItemId {
                video_id: Some("dQw4w9WgXcQ".to_string()),
                ..Default::default()
            }),
            snippet: None,
        };
        assert_eq!(
            VideoInfo::from_search(&item).unwrap_err(),
            Malformed::MissingField { field: "snippet" }
        );
    }

    #[test]
    fn test_parse_count_lenient() {
        assert_eq!(parse_count(&Some("12345".to_string())), Some(12345));
        assert_eq!(parse_count(&Some("n/a".to_string())), None);
        assert_eq!(parse_count(&None), None);
    }

    #[test]
    fn test_optional_fields_omitted_from_json() {
        let item = search_item(Some("dQw4w9WgXcQ"), Some("title"));
        let video = VideoInfo::from_search(&item).unwrap();
        let json = serde_json::to_value(&video).unwrap();
        assert!(json.get("view_count").is_none());
        assert!(json.get("tags").is_none());
        assert_eq!(json["video_id"], "dQw4w9WgXcQ");
    }
}
