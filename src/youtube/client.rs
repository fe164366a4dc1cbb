//! YouTube Data API v3 client.
//!
//! Authenticates with an API key passed as a query parameter and sleeps for
//! a fixed delay after every page fetch as a courtesy to the API's rate
//! limits. Nothing here retries; transient failures surface as
//! [`ScoutError::SourceUnavailable`] and the caller owns the retry policy.

use super::models::{ChannelInfo, ChannelResults, PlaylistInfo, PlaylistResults, VideoInfo, VideoResults};
use super::paginate::{self, Page, PageFetcher};
use super::query::SearchQuery;
use super::types::{
    ChannelListResponse, PageInfo, PlaylistItem, PlaylistItemListResponse, SearchItem,
    SearchListResponse, VideoItem, VideoListResponse,
};
use crate::config::Settings;
use crate::error::{Result, ScoutError};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, info};

/// Production API endpoint.
pub const API_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

/// Request timeout for a single API call.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Client for the YouTube Data API.
#[derive(Debug, Clone)]
pub struct YouTubeClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    page_delay: Duration,
}

impl YouTubeClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, API_BASE_URL)
    }

    /// Point the client at a different endpoint (tests use a mock server).
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            http,
            base_url: base_url.into(),
            api_key: api_key.into(),
            page_delay: Duration::from_millis(1000),
        }
    }

    /// Override the fixed delay slept after each page fetch.
    pub fn with_page_delay(mut self, delay: Duration) -> Self {
        self.page_delay = delay;
        self
    }

    /// Build a client from settings, resolving the API key from config or
    /// the `YOUTUBE_API_KEY` environment variable.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let api_key = settings.youtube.resolve_api_key().ok_or_else(|| {
            ScoutError::Config(
                "YouTube API key not configured. Set youtube.api_key or YOUTUBE_API_KEY."
                    .to_string(),
            )
        })?;

        Ok(Self::new(api_key)
            .with_page_delay(Duration::from_millis(settings.youtube.page_delay_ms)))
    }

    /// Search for channels matching the query.
    pub async fn search_channels(&self, query: &SearchQuery) -> Result<ChannelResults> {
        info!(q = %query.query, limit = query.limit, "searching channels");
        let mut fetcher = SearchFetcher {
            client: self,
            kind: "channel",
            query,
        };
        let listing = paginate::collect_all(&mut fetcher, query.limit, ChannelInfo::from_search).await?;
        info!(total = listing.total_results, returned = listing.items.len(), "channel search done");
        Ok(listing.into())
    }

    /// Search for playlists matching the query.
    pub async fn search_playlists(&self, query: &SearchQuery) -> Result<PlaylistResults> {
        info!(q = %query.query, limit = query.limit, "searching playlists");
        let mut fetcher = SearchFetcher {
            client: self,
            kind: "playlist",
            query,
        };
        let listing = paginate::collect_all(&mut fetcher, query.limit, PlaylistInfo::from_search).await?;
        info!(total = listing.total_results, returned = listing.items.len(), "playlist search done");
        Ok(listing.into())
    }

    /// Search for videos matching the query.
    pub async fn search_videos(&self, query: &SearchQuery) -> Result<VideoResults> {
        info!(q = %query.query, limit = query.limit, "searching videos");
        let mut fetcher = SearchFetcher {
            client: self,
            kind: "video",
            query,
        };
        let listing = paginate::collect_all(&mut fetcher, query.limit, VideoInfo::from_search).await?;
        info!(total = listing.total_results, returned = listing.items.len(), "video search done");
        Ok(listing.into())
    }

    /// Retrieve detailed metadata for the given video ids.
    pub async fn get_video_info(&self, video_ids: &[String], limit: u32) -> Result<VideoResults> {
        if video_ids.is_empty() {
            return Err(ScoutError::InvalidQuery(
                "at least one video id is required".to_string(),
            ));
        }

        info!(count = video_ids.len(), "fetching video details");
        let mut fetcher = VideoDetailsFetcher {
            client: self,
            ids: video_ids.join(","),
        };
        let listing = paginate::collect_all(&mut fetcher, limit, VideoInfo::from_details).await?;
        Ok(listing.into())
    }

    /// List a channel's uploads, newest first.
    pub async fn get_channel_videos(&self, channel_id: &str, limit: u32) -> Result<VideoResults> {
        let uploads_playlist = self.uploads_playlist_id(channel_id).await?;
        debug!(channel_id, uploads_playlist = %uploads_playlist, "resolved uploads playlist");

        let mut fetcher = PlaylistItemsFetcher {
            client: self,
            playlist_id: uploads_playlist,
        };
        let listing = paginate::collect_all(&mut fetcher, limit, VideoInfo::from_playlist_item).await?;
        Ok(listing.into())
    }

    /// Look up a single channel with statistics.
    pub async fn get_channel_info(&self, channel_id: &str) -> Result<ChannelInfo> {
        info!(channel_id, "fetching channel info");
        let params = [
            ("part", "snippet,statistics".to_string()),
            ("id", channel_id.to_string()),
        ];
        let response: ChannelListResponse = self.get_json("channels", &params).await?;

        let item = response
            .items
            .first()
            .ok_or_else(|| ScoutError::NotFound(format!("channel {}", channel_id)))?;

        ChannelInfo::from_channel_item(item)
            .map_err(|malformed| malformed_to_error(malformed, 0))
    }

    /// Resolve the uploads playlist id for a channel. Done once per call;
    /// the id cannot change while paginating.
    async fn uploads_playlist_id(&self, channel_id: &str) -> Result<String> {
        let params = [
            ("part", "contentDetails".to_string()),
            ("id", channel_id.to_string()),
        ];
        let response: ChannelListResponse = self.get_json("channels", &params).await?;

        response
            .items
            .first()
            .and_then(|item| item.content_details.as_ref())
            .and_then(|details| details.related_playlists.as_ref())
            .and_then(|playlists| playlists.uploads.clone())
            .ok_or_else(|| {
                ScoutError::NotFound(format!("uploads playlist for channel {}", channel_id))
            })
    }

    /// Issue one GET and decode the JSON body, classifying failures.
    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> Result<T> {
        let url = format!("{}/{}", self.base_url, endpoint);

        let response = self
            .http
            .get(&url)
            .query(&[("key", self.api_key.as_str())])
            .query(params)
            .send()
            .await
            .map_err(|e| {
                ScoutError::SourceUnavailable(format!("request to {} failed: {}", endpoint, e))
            })?;

        let status = response.status();
        if status == StatusCode::FORBIDDEN
            || status == StatusCode::TOO_MANY_REQUESTS
            || status.is_server_error()
        {
            let body = response.text().await.unwrap_or_default();
            return Err(ScoutError::SourceUnavailable(format!(
                "{} returned {}: {}",
                endpoint,
                status,
                truncate_body(&body)
            )));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ScoutError::Api(format!(
                "{} returned {}: {}",
                endpoint,
                status,
                truncate_body(&body)
            )));
        }

        Ok(response.json::<T>().await?)
    }

    async fn throttle(&self) {
        if !self.page_delay.is_zero() {
            tokio::time::sleep(self.page_delay).await;
        }
    }
}

fn malformed_to_error(malformed: paginate::Malformed, index: usize) -> ScoutError {
    match malformed {
        paginate::Malformed::MissingId { field } | paginate::Malformed::MissingField { field } => {
            ScoutError::MalformedRecord { field, index }
        }
    }
}

fn page_from<R>(items: Vec<R>, page_info: Option<PageInfo>, token: Option<String>) -> Page<R> {
    Page {
        items,
        total_results: page_info.map(|p| p.total_results).unwrap_or_default(),
        next_page_token: token,
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() <= MAX {
        body.to_string()
    } else {
        format!("{}...", &body[..MAX])
    }
}

/// `search.list` bound to one result type and a fixed query.
struct SearchFetcher<'a> {
    client: &'a YouTubeClient,
    kind: &'static str,
    query: &'a SearchQuery,
}

#[async_trait]
impl PageFetcher for SearchFetcher<'_> {
    type Raw = SearchItem;

    async fn fetch_page(
        &mut self,
        page_size: u32,
        page_token: Option<&str>,
    ) -> Result<Page<SearchItem>> {
        let mut params = vec![
            ("part", "snippet".to_string()),
            ("q", self.query.query.clone()),
            ("type", self.kind.to_string()),
            ("maxResults", page_size.to_string()),
            ("order", self.query.order.to_string()),
            ("regionCode", self.query.region_code.clone()),
        ];
        if let Some(after) = &self.query.published_after {
            params.push(("publishedAfter", SearchQuery::format_bound(after)));
        }
        if let Some(before) = &self.query.published_before {
            params.push(("publishedBefore", SearchQuery::format_bound(before)));
        }
        if self.kind == "video" {
            if let Some(duration) = &self.query.duration {
                params.push(("videoDuration", duration.to_string()));
            }
        }
        if let Some(token) = page_token {
            params.push(("pageToken", token.to_string()));
        }

        let response: SearchListResponse = self.client.get_json("search", &params).await?;
        self.client.throttle().await;

        Ok(page_from(
            response.items,
            response.page_info,
            response.next_page_token,
        ))
    }
}

/// `videos.list` bound to a fixed id set.
struct VideoDetailsFetcher<'a> {
    client: &'a YouTubeClient,
    ids: String,
}

#[async_trait]
impl PageFetcher for VideoDetailsFetcher<'_> {
    type Raw = VideoItem;

    async fn fetch_page(
        &mut self,
        page_size: u32,
        page_token: Option<&str>,
    ) -> Result<Page<VideoItem>> {
        let mut params = vec![
            (
                "part",
                "id,snippet,contentDetails,statistics,paidProductPlacementDetails,topicDetails"
                    .to_string(),
            ),
            ("id", self.ids.clone()),
            ("maxResults", page_size.to_string()),
        ];
        if let Some(token) = page_token {
            params.push(("pageToken", token.to_string()));
        }

        let response: VideoListResponse = self.client.get_json("videos", &params).await?;
        self.client.throttle().await;

        Ok(page_from(
            response.items,
            response.page_info,
            response.next_page_token,
        ))
    }
}

/// `playlistItems.list` bound to one playlist.
struct PlaylistItemsFetcher<'a> {
    client: &'a YouTubeClient,
    playlist_id: String,
}

#[async_trait]
impl PageFetcher for PlaylistItemsFetcher<'_> {
    type Raw = PlaylistItem;

    async fn fetch_page(
        &mut self,
        page_size: u32,
        page_token: Option<&str>,
    ) -> Result<Page<PlaylistItem>> {
        let mut params = vec![
            ("part", "snippet".to_string()),
            ("playlistId", self.playlist_id.clone()),
            ("maxResults", page_size.to_string()),
        ];
        if let Some(token) = page_token {
            params.push(("pageToken", token.to_string()));
        }

        let response: PlaylistItemListResponse =
            self.client.get_json("playlistItems", &params).await?;
        self.client.throttle().await;

        Ok(page_from(
            response.items,
            response.page_info,
            response.next_page_token,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::youtube::query::SearchOrder;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(server: &MockServer) -> YouTubeClient {
        YouTubeClient::with_base_url("test-key", server.uri()).with_page_delay(Duration::ZERO)
    }

    fn search_item(video_id: &str, title: &str) -> serde_json::Value {
        json!({
            "id": {"kind": "youtube#video", "videoId": video_id},
            "snippet": {
                "title": title,
                "channelId": "UC123",
                "channelTitle": "Test Channel",
                "description": "",
                "publishTime": "2024-05-01T12:00:00Z"
            }
        })
    }

    #[tokio::test]
    async fn test_search_videos_aggregates_pages() {
        let server = MockServer::start().await;

        // First page: 3 of the 5 requested items plus a continuation token.
        // The follow-up request must ask for the remaining 2 only.
        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("type", "video"))
            .and(query_param("maxResults", "5"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [search_item("aaaaaaaaaaa", "one"), search_item("bbbbbbbbbbb", "two"), search_item("ccccccccccc", "three")],
                "pageInfo": {"totalResults": 1000, "resultsPerPage": 3},
                "nextPageToken": "CAUQAA"
            })))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("pageToken", "CAUQAA"))
            .and(query_param("maxResults", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [search_item("ddddddddddd", "four"), search_item("eeeeeeeeeee", "five")],
                "pageInfo": {"totalResults": 998, "resultsPerPage": 2}
            })))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let query = SearchQuery::new("rust").with_limit(5);
        let results = client.search_videos(&query).await.unwrap();

        assert_eq!(results.videos.len(), 5);
        // Last page's estimate wins.
        assert_eq!(results.total_results, 998);
        assert_eq!(results.videos[0].video_id, "aaaaaaaaaaa");
        assert_eq!(results.videos[4].video_id, "eeeeeeeeeee");
    }

    #[tokio::test]
    async fn test_search_channels_normalizes_entities() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("type", "channel"))
            .and(query_param("q", "cooking"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [{
                    "id": {"kind": "youtube#channel", "channelId": "UCabc"},
                    "snippet": {
                        "title": "Cooking Daily",
                        "description": "recipes",
                        "publishedAt": "2020-01-01T00:00:00Z"
                    }
                }],
                "pageInfo": {"totalResults": 1, "resultsPerPage": 1}
            })))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let query = SearchQuery::new("cooking")
            .with_order(SearchOrder::Relevance)
            .with_limit(10);
        let results = client.search_channels(&query).await.unwrap();

        assert_eq!(results.total_results, 1);
        assert_eq!(results.channels[0].channel_id, "UCabc");
        assert_eq!(results.channels[0].channel_title, "Cooking Daily");
        // Search snippets carry no statistics.
        assert!(results.channels[0].subscriber_count.is_none());
    }

    #[tokio::test]
    async fn test_quota_exhaustion_maps_to_source_unavailable() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(403).set_body_json(json!({
                "error": {"code": 403, "message": "quotaExceeded"}
            })))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let query = SearchQuery::new("rust");
        let err = client.search_videos(&query).await.unwrap_err();

        assert!(matches!(err, ScoutError::SourceUnavailable(_)));
    }

    #[tokio::test]
    async fn test_bad_request_maps_to_api_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/videos"))
            .respond_with(ResponseTemplate::new(400).set_body_string("invalid part"))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let err = client
            .get_video_info(&["dQw4w9WgXcQ".to_string()], 5)
            .await
            .unwrap_err();

        assert!(matches!(err, ScoutError::Api(_)));
    }

    #[tokio::test]
    async fn test_get_channel_info() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/channels"))
            .and(query_param("id", "UCabc"))
            .and(query_param("part", "snippet,statistics"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [{
                    "id": "UCabc",
                    "snippet": {
                        "title": "Cooking Daily",
                        "description": "recipes",
                        "publishedAt": "2020-01-01T00:00:00Z",
                        "country": "GB"
                    },
                    "statistics": {
                        "viewCount": "123456",
                        "subscriberCount": "789",
                        "videoCount": "42"
                    }
                }]
            })))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let info = client.get_channel_info("UCabc").await.unwrap();

        assert_eq!(info.channel_title, "Cooking Daily");
        assert_eq!(info.country.as_deref(), Some("GB"));
        assert_eq!(info.subscriber_count, Some(789));
        assert_eq!(info.video_count, Some(42));
    }

    #[tokio::test]
    async fn test_get_channel_info_not_found() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/channels"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": []})))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let err = client.get_channel_info("UCmissing").await.unwrap_err();
        assert!(matches!(err, ScoutError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_get_channel_videos_resolves_uploads_playlist() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/channels"))
            .and(query_param("part", "contentDetails"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [{
                    "id": "UCabc",
                    "contentDetails": {"relatedPlaylists": {"uploads": "UUabc"}}
                }]
            })))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/playlistItems"))
            .and(query_param("playlistId", "UUabc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [{
                    "snippet": {
                        "title": "Upload One",
                        "channelId": "UCabc",
                        "channelTitle": "Cooking Daily",
                        "publishedAt": "2024-02-02T00:00:00Z",
                        "resourceId": {"videoId": "fffffffffff"}
                    }
                }],
                "pageInfo": {"totalResults": 1, "resultsPerPage": 1}
            })))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let results = client.get_channel_videos("UCabc", 10).await.unwrap();

        assert_eq!(results.videos.len(), 1);
        assert_eq!(results.videos[0].video_id, "fffffffffff");
        assert_eq!(results.videos[0].channel_title, "Cooking Daily");
    }

    #[tokio::test]
    async fn test_get_video_info_requires_ids() {
        let server = MockServer::start().await;
        let client = test_client(&server);

        let err = client.get_video_info(&[], 5).await.unwrap_err();
        assert!(matches!(err, ScoutError::InvalidQuery(_)));
    }
}
