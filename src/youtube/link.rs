//! Video-id extraction and canonical hyperlinks.

use regex::Regex;
use std::sync::OnceLock;

/// A linkable YouTube resource kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Channel,
    Playlist,
    Video,
}

impl Resource {
    /// Canonical youtube.com hyperlink for a resource id.
    pub fn url(&self, id: &str) -> String {
        match self {
            Resource::Channel => format!("https://www.youtube.com/channel/{}", id),
            Resource::Playlist => format!("https://www.youtube.com/playlist?list={}", id),
            Resource::Video => format!("https://www.youtube.com/watch?v={}", id),
        }
    }
}

impl std::str::FromStr for Resource {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "channel" => Ok(Resource::Channel),
            "playlist" => Ok(Resource::Playlist),
            "video" => Ok(Resource::Video),
            _ => Err(format!("Unknown resource kind: {}", s)),
        }
    }
}

fn video_id_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?x)
            (?:
                (?:https?://)?
                (?:www\.)?
                (?:youtube\.com/watch\?v=|youtu\.be/|youtube\.com/embed/)
                ([a-zA-Z0-9_-]{11})
            )
            |
            # Bare 11-character video id
            ^([a-zA-Z0-9_-]{11})$
        ",
        )
        .expect("Invalid regex")
    })
}

/// Extract a video id from a watch/short/embed URL or a bare id.
pub fn extract_video_id(input: &str) -> Option<String> {
    let caps = video_id_regex().captures(input.trim())?;
    caps.get(1)
        .or_else(|| caps.get(2))
        .map(|m| m.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_video_id() {
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ".to_string())
        );
        assert_eq!(
            extract_video_id("https://youtu.be/dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ".to_string())
        );
        assert_eq!(
            extract_video_id("https://youtube.com/embed/dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ".to_string())
        );
        assert_eq!(
            extract_video_id("dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ".to_string())
        );

        assert_eq!(extract_video_id("not-a-video-id"), None);
        assert_eq!(extract_video_id(""), None);
    }

    #[test]
    fn test_resource_urls() {
        assert_eq!(
            Resource::Video.url("dQw4w9WgXcQ"),
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ"
        );
        assert_eq!(
            Resource::Channel.url("UCabc"),
            "https://www.youtube.com/channel/UCabc"
        );
        assert_eq!(
            Resource::Playlist.url("PLxyz"),
            "https://www.youtube.com/playlist?list=PLxyz"
        );
    }

    #[test]
    fn test_resource_from_str() {
        assert_eq!("video".parse::<Resource>().unwrap(), Resource::Video);
        assert_eq!("Channel".parse::<Resource>().unwrap(), Resource::Channel);
        assert!("short".parse::<Resource>().is_err());
    }
}
