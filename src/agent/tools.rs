//! Tool definitions and implementations for the agent system.

use crate::error::{Result, ScoutError};
use crate::transcript;
use crate::youtube::{Resource, SearchOrder, SearchQuery, VideoDuration, YouTubeClient};
use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::debug;

/// Longest pause the model may request between calls.
const MAX_PAUSE_SECS: u64 = 60;

/// Search arguments shared by the three search tools.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchArgs {
    pub query: String,
    pub published_after: Option<String>,
    pub published_before: Option<String>,
    pub region_code: Option<String>,
    pub order: Option<String>,
    pub duration: Option<String>,
    pub max_results: u32,
}

/// Available tools for the agent.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolCall {
    /// Search for channels by name.
    SearchChannels(SearchArgs),

    /// Search for playlists.
    SearchPlaylists(SearchArgs),

    /// Search for videos, with optional duration filter.
    SearchVideos(SearchArgs),

    /// Look up a channel with statistics.
    GetChannelInfo { channel_id: String },

    /// Detailed metadata for a comma-separated list of video ids.
    GetVideoInfo { video_ids: String, max_results: u32 },

    /// Recent uploads of a channel.
    GetChannelVideos { channel_id: String, max_results: u32 },

    /// Download a video transcript.
    GetTranscript { video: String, timestamps: bool },

    /// Canonical hyperlink for a resource.
    BuildLink { id: String, kind: String },

    /// Wait between calls to stay under API rate limits.
    Pause { seconds: u64 },
}

/// Tool execution context bound to a YouTube client and search defaults.
pub struct ToolContext {
    client: YouTubeClient,
    region_code: String,
    transcript_languages: Vec<String>,
}

impl ToolContext {
    pub fn new(
        client: YouTubeClient,
        region_code: impl Into<String>,
        transcript_languages: Vec<String>,
    ) -> Self {
        Self {
            client,
            region_code: region_code.into(),
            transcript_languages,
        }
    }

    /// Execute a tool call and return the result as text for the model.
    pub async fn execute(&self, tool: &ToolCall) -> Result<String> {
        match tool {
            ToolCall::SearchChannels(args) => {
                let query = self.build_query(args, SearchOrder::Relevance)?;
                let results = self.client.search_channels(&query).await?;
                Ok(serde_json::to_string_pretty(&results)?)
            }
            ToolCall::SearchPlaylists(args) => {
                let query = self.build_query(args, SearchOrder::Date)?;
                let results = self.client.search_playlists(&query).await?;
                Ok(serde_json::to_string_pretty(&results)?)
            }
            ToolCall::SearchVideos(args) => {
                let query = self.build_query(args, SearchOrder::Date)?;
                let results = self.client.search_videos(&query).await?;
                Ok(serde_json::to_string_pretty(&results)?)
            }
            ToolCall::GetChannelInfo { channel_id } => {
                let info = self.client.get_channel_info(channel_id).await?;
                Ok(serde_json::to_string_pretty(&info)?)
            }
            ToolCall::GetVideoInfo {
                video_ids,
                max_results,
            } => {
                let ids: Vec<String> = video_ids
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect();
                let results = self.client.get_video_info(&ids, *max_results).await?;
                Ok(serde_json::to_string_pretty(&results)?)
            }
            ToolCall::GetChannelVideos {
                channel_id,
                max_results,
            } => {
                let results = self
                    .client
                    .get_channel_videos(channel_id, *max_results)
                    .await?;
                Ok(serde_json::to_string_pretty(&results)?)
            }
            ToolCall::GetTranscript { video, timestamps } => {
                transcript::fetch_transcript(video, *timestamps, &self.transcript_languages).await
            }
            ToolCall::BuildLink { id, kind } => {
                let resource: Resource = kind.parse().map_err(ScoutError::InvalidQuery)?;
                Ok(resource.url(id))
            }
            ToolCall::Pause { seconds } => {
                let seconds = (*seconds).min(MAX_PAUSE_SECS);
                debug!(seconds, "agent requested pause");
                tokio::time::sleep(std::time::Duration::from_secs(seconds)).await;
                Ok(format!("Paused for {} second(s).", seconds))
            }
        }
    }

    /// Turn tool arguments into a search query, filling context defaults.
    fn build_query(&self, args: &SearchArgs, default_order: SearchOrder) -> Result<SearchQuery> {
        let mut query = SearchQuery::new(&args.query)
            .with_limit(args.max_results)
            .with_region(
                args.region_code
                    .clone()
                    .unwrap_or_else(|| self.region_code.clone()),
            );

        query.order = match &args.order {
            Some(order) => order.parse().map_err(ScoutError::InvalidQuery)?,
            None => default_order,
        };
        if let Some(after) = &args.published_after {
            query = query.with_published_after(parse_bound(after)?);
        }
        if let Some(before) = &args.published_before {
            query = query.with_published_before(parse_bound(before)?);
        }
        if let Some(duration) = &args.duration {
            query = query.with_duration(
                duration
                    .parse::<VideoDuration>()
                    .map_err(ScoutError::InvalidQuery)?,
            );
        }

        Ok(query)
    }
}

fn parse_bound(value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            ScoutError::InvalidQuery(format!("invalid RFC 3339 timestamp '{}': {}", value, e))
        })
}

fn require_str(args: &Value, key: &str) -> Result<String> {
    args[key]
        .as_str()
        .map(String::from)
        .ok_or_else(|| ScoutError::Agent(format!("Missing '{}' argument", key)))
}

fn opt_str(args: &Value, key: &str) -> Option<String> {
    args[key].as_str().map(String::from)
}

fn opt_u32(args: &Value, key: &str, default: u32) -> u32 {
    args[key].as_u64().map(|v| v as u32).unwrap_or(default)
}

fn search_args(args: &Value, default_limit: u32) -> Result<SearchArgs> {
    Ok(SearchArgs {
        query: require_str(args, "query")?,
        published_after: opt_str(args, "published_after"),
        published_before: opt_str(args, "published_before"),
        region_code: opt_str(args, "region_code"),
        order: opt_str(args, "order"),
        duration: opt_str(args, "duration"),
        max_results: opt_u32(args, "max_results", default_limit),
    })
}

/// Parse a tool call from the OpenAI response format.
pub fn parse_tool_call(name: &str, arguments: &str) -> Result<ToolCall> {
    let args: Value = serde_json::from_str(arguments)
        .map_err(|e| ScoutError::Agent(format!("Invalid tool arguments: {}", e)))?;

    match name {
        "search_channels" => Ok(ToolCall::SearchChannels(search_args(&args, 50)?)),
        "search_playlists" => Ok(ToolCall::SearchPlaylists(search_args(&args, 50)?)),
        "search_videos" => Ok(ToolCall::SearchVideos(search_args(&args, 50)?)),
        "get_channel_info" => Ok(ToolCall::GetChannelInfo {
            channel_id: require_str(&args, "channel_id")?,
        }),
        "get_video_info" => Ok(ToolCall::GetVideoInfo {
            video_ids: require_str(&args, "video_ids")?,
            max_results: opt_u32(&args, "max_results", 50),
        }),
        "get_channel_videos" => Ok(ToolCall::GetChannelVideos {
            channel_id: require_str(&args, "channel_id")?,
            max_results: opt_u32(&args, "max_results", 10),
        }),
        "get_transcript" => Ok(ToolCall::GetTranscript {
            video: require_str(&args, "video")?,
            timestamps: args["timestamps"].as_bool().unwrap_or(false),
        }),
        "build_link" => Ok(ToolCall::BuildLink {
            id: require_str(&args, "id")?,
            kind: require_str(&args, "kind")?,
        }),
        "pause" => Ok(ToolCall::Pause {
            seconds: args["seconds"].as_u64().unwrap_or(3),
        }),
        _ => Err(ScoutError::Agent(format!("Unknown tool: {}", name))),
    }
}

/// JSON schema fragment shared by the search tools.
fn search_parameters(with_duration: bool) -> Value {
    let mut properties = serde_json::json!({
        "query": {
            "type": "string",
            "description": "The search query"
        },
        "published_after": {
            "type": "string",
            "description": "Only results created at or after this RFC 3339 time, e.g. 1970-01-01T00:00:00Z"
        },
        "published_before": {
            "type": "string",
            "description": "Only results created before or at this RFC 3339 time"
        },
        "region_code": {
            "type": "string",
            "description": "ISO 3166-1 alpha-2 country code (default from configuration)"
        },
        "order": {
            "type": "string",
            "enum": ["date", "rating", "relevance", "title", "videoCount", "viewCount"],
            "description": "Result ordering"
        },
        "max_results": {
            "type": "integer",
            "description": "Maximum number of results (default: 50)"
        }
    });

    if with_duration {
        properties["duration"] = serde_json::json!({
            "type": "string",
            "enum": ["any", "short", "medium", "long"],
            "description": "Filter videos by duration"
        });
    }

    serde_json::json!({
        "type": "object",
        "properties": properties,
        "required": ["query"]
    })
}

/// Get OpenAI function/tool definitions for the agent.
pub fn tool_definitions() -> Vec<async_openai::types::ChatCompletionTool> {
    use async_openai::types::{ChatCompletionTool, ChatCompletionToolType, FunctionObject};

    let function = |name: &str, description: &str, parameters: Value| ChatCompletionTool {
        r#type: ChatCompletionToolType::Function,
        function: FunctionObject {
            name: name.to_string(),
            description: Some(description.to_string()),
            parameters: Some(parameters),
            strict: None,
        },
    };

    vec![
        function(
            "search_channels",
            "Search YouTube for channels matching a name or topic.",
            search_parameters(false),
        ),
        function(
            "search_playlists",
            "Search YouTube for playlists matching a query.",
            search_parameters(false),
        ),
        function(
            "search_videos",
            "Search YouTube for videos matching a query, optionally filtered by duration.",
            search_parameters(true),
        ),
        function(
            "get_channel_info",
            "Get a channel's title, description, and statistics (views, subscribers, video count).",
            serde_json::json!({
                "type": "object",
                "properties": {
                    "channel_id": {
                        "type": "string",
                        "description": "The channel ID, e.g. UC_x5XG1OV2P6uZZ5FSM9Ttw"
                    }
                },
                "required": ["channel_id"]
            }),
        ),
        function(
            "get_video_info",
            "Get detailed metadata (duration, views, likes, tags, topics) for one or more videos.",
            serde_json::json!({
                "type": "object",
                "properties": {
                    "video_ids": {
                        "type": "string",
                        "description": "Comma-separated video IDs, e.g. 'dQw4w9WgXcQ,3fumBcKC6RE'"
                    },
                    "max_results": {
                        "type": "integer",
                        "description": "Maximum number of results (default: 50)"
                    }
                },
                "required": ["video_ids"]
            }),
        ),
        function(
            "get_channel_videos",
            "List a channel's uploaded videos, newest first.",
            serde_json::json!({
                "type": "object",
                "properties": {
                    "channel_id": {
                        "type": "string",
                        "description": "The channel ID"
                    },
                    "max_results": {
                        "type": "integer",
                        "description": "Maximum number of videos (default: 10)"
                    }
                },
                "required": ["channel_id"]
            }),
        ),
        function(
            "get_transcript",
            "Download the transcript of a video. Accepts a video ID or URL.",
            serde_json::json!({
                "type": "object",
                "properties": {
                    "video": {
                        "type": "string",
                        "description": "Video ID or URL"
                    },
                    "timestamps": {
                        "type": "boolean",
                        "description": "Prefix each line with its start time (default: false)"
                    }
                },
                "required": ["video"]
            }),
        ),
        function(
            "build_link",
            "Construct the canonical youtube.com hyperlink for a channel, playlist, or video.",
            serde_json::json!({
                "type": "object",
                "properties": {
                    "id": {
                        "type": "string",
                        "description": "The resource ID"
                    },
                    "kind": {
                        "type": "string",
                        "enum": ["channel", "playlist", "video"],
                        "description": "The resource kind"
                    }
                },
                "required": ["id", "kind"]
            }),
        ),
        function(
            "pause",
            "Wait before the next call to respect API rate limits.",
            serde_json::json!({
                "type": "object",
                "properties": {
                    "seconds": {
                        "type": "integer",
                        "description": "Seconds to wait (default: 3)"
                    }
                },
                "required": []
            }),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_search_videos_tool() {
        let tool = parse_tool_call(
            "search_videos",
            r#"{"query": "rust tutorials", "max_results": 10, "duration": "long"}"#,
        )
        .unwrap();
        match tool {
            ToolCall::SearchVideos(args) => {
                assert_eq!(args.query, "rust tutorials");
                assert_eq!(args.max_results, 10);
                assert_eq!(args.duration.as_deref(), Some("long"));
                assert!(args.published_after.is_none());
            }
            _ => panic!("Expected SearchVideos tool"),
        }
    }

    #[test]
    fn test_parse_search_requires_query() {
        let err = parse_tool_call("search_channels", r#"{"max_results": 5}"#).unwrap_err();
        assert!(matches!(err, ScoutError::Agent(_)));
    }

    #[test]
    fn test_parse_get_transcript_tool() {
        let tool =
            parse_tool_call("get_transcript", r#"{"video": "dQw4w9WgXcQ", "timestamps": true}"#)
                .unwrap();
        assert_eq!(
            tool,
            ToolCall::GetTranscript {
                video: "dQw4w9WgXcQ".to_string(),
                timestamps: true
            }
        );
    }

    #[test]
    fn test_parse_pause_defaults_to_three_seconds() {
        let tool = parse_tool_call("pause", "{}").unwrap();
        assert_eq!(tool, ToolCall::Pause { seconds: 3 });
    }

    #[test]
    fn test_parse_unknown_tool() {
        assert!(parse_tool_call("delete_channel", "{}").is_err());
    }

    #[test]
    fn test_tool_definitions_cover_all_tools() {
        let names: Vec<String> = tool_definitions()
            .into_iter()
            .map(|t| t.function.name)
            .collect();
        for expected in [
            "search_channels",
            "search_playlists",
            "search_videos",
            "get_channel_info",
            "get_video_info",
            "get_channel_videos",
            "get_transcript",
            "build_link",
            "pause",
        ] {
            assert!(names.contains(&expected.to_string()), "missing {expected}");
        }
    }

    #[test]
    fn test_build_query_applies_defaults() {
        let context = ToolContext::new(
            YouTubeClient::new("k"),
            "GB",
            vec!["en".to_string()],
        );
        let args = SearchArgs {
            query: "news".to_string(),
            published_after: Some("2024-01-01T00:00:00Z".to_string()),
            published_before: None,
            region_code: None,
            order: None,
            duration: None,
            max_results: 25,
        };

        let query = context.build_query(&args, SearchOrder::Relevance).unwrap();
        assert_eq!(query.region_code, "GB");
        assert_eq!(query.order, SearchOrder::Relevance);
        assert_eq!(query.limit, 25);
        assert!(query.published_after.is_some());
    }

    #[test]
    fn test_build_query_rejects_bad_timestamp() {
        let context = ToolContext::new(YouTubeClient::new("k"), "US", vec![]);
        let args = SearchArgs {
            query: "news".to_string(),
            published_after: Some("yesterday".to_string()),
            published_before: None,
            region_code: None,
            order: None,
            duration: None,
            max_results: 5,
        };

        let err = context.build_query(&args, SearchOrder::Date).unwrap_err();
        assert!(matches!(err, ScoutError::InvalidQuery(_)));
    }
}
