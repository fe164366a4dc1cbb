//! Search query specification.

use chrono::{DateTime, SecondsFormat, Utc};

/// Immutable per-call search parameters. Constructed once, consumed by a
/// single listing operation.
#[derive(Debug, Clone)]
pub struct SearchQuery {
    /// Free-text search term.
    pub query: String,
    /// Only resources created at or after this instant.
    pub published_after: Option<DateTime<Utc>>,
    /// Only resources created before or at this instant.
    pub published_before: Option<DateTime<Utc>>,
    /// ISO 3166-1 alpha-2 country code.
    pub region_code: String,
    pub order: SearchOrder,
    /// Requested result limit; must be greater than zero.
    pub limit: u32,
    /// Duration filter, honored for video searches only.
    pub duration: Option<VideoDuration>,
}

impl SearchQuery {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            published_after: None,
            published_before: None,
            region_code: "US".to_string(),
            order: SearchOrder::Date,
            limit: 50,
            duration: None,
        }
    }

    pub fn with_order(mut self, order: SearchOrder) -> Self {
        self.order = order;
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_region(mut self, region_code: impl Into<String>) -> Self {
        self.region_code = region_code.into();
        self
    }

    pub fn with_published_after(mut self, after: DateTime<Utc>) -> Self {
        self.published_after = Some(after);
        self
    }

    pub fn with_published_before(mut self, before: DateTime<Utc>) -> Self {
        self.published_before = Some(before);
        self
    }

    pub fn with_duration(mut self, duration: VideoDuration) -> Self {
        self.duration = Some(duration);
        self
    }

    /// Format a time bound the way the API expects (RFC 3339, UTC).
    pub fn format_bound(bound: &DateTime<Utc>) -> String {
        bound.to_rfc3339_opts(SecondsFormat::Secs, true)
    }
}

/// Result ordering accepted by `search.list`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchOrder {
    #[default]
    Date,
    Rating,
    Relevance,
    Title,
    VideoCount,
    ViewCount,
}

impl SearchOrder {
    /// The exact parameter spelling the API expects.
    pub fn as_param(&self) -> &'static str {
        match self {
            SearchOrder::Date => "date",
            SearchOrder::Rating => "rating",
            SearchOrder::Relevance => "relevance",
            SearchOrder::Title => "title",
            SearchOrder::VideoCount => "videoCount",
            SearchOrder::ViewCount => "viewCount",
        }
    }
}

impl std::str::FromStr for SearchOrder {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "date" => Ok(SearchOrder::Date),
            "rating" => Ok(SearchOrder::Rating),
            "relevance" => Ok(SearchOrder::Relevance),
            "title" => Ok(SearchOrder::Title),
            "videocount" => Ok(SearchOrder::VideoCount),
            "viewcount" => Ok(SearchOrder::ViewCount),
            _ => Err(format!("Unknown search order: {}", s)),
        }
    }
}

impl std::fmt::Display for SearchOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_param())
    }
}

/// Duration filter accepted by video searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VideoDuration {
    #[default]
    Any,
    /// Under four minutes.
    Short,
    /// Between four and twenty minutes.
    Medium,
    /// Over twenty minutes.
    Long,
}

impl VideoDuration {
    pub fn as_param(&self) -> &'static str {
        match self {
            VideoDuration::Any => "any",
            VideoDuration::Short => "short",
            VideoDuration::Medium => "medium",
            VideoDuration::Long => "long",
        }
    }
}

impl std::str::FromStr for VideoDuration {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "any" => Ok(VideoDuration::Any),
            "short" => Ok(VideoDuration::Short),
            "medium" => Ok(VideoDuration::Medium),
            "long" => Ok(VideoDuration::Long),
            _ => Err(format!("Unknown video duration: {}", s)),
        }
    }
}

impl std::fmt::Display for VideoDuration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_param())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_search_order_round_trip() {
        for s in ["date", "rating", "relevance", "title", "videoCount", "viewCount"] {
            let order: SearchOrder = s.parse().unwrap();
            assert_eq!(order.as_param(), s);
        }
        assert!("newest".parse::<SearchOrder>().is_err());
    }

    #[test]
    fn test_video_duration_round_trip() {
        for s in ["any", "short", "medium", "long"] {
            let duration: VideoDuration = s.parse().unwrap();
            assert_eq!(duration.as_param(), s);
        }
        assert!("epic".parse::<VideoDuration>().is_err());
    }

    #[test]
    fn test_format_bound() {
        let bound = Utc.with_ymd_and_hms(1970, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(SearchQuery::format_bound(&bound), "1970-01-01T00:00:00Z");
    }

    #[test]
    fn test_query_defaults() {
        let q = SearchQuery::new("rust");
        assert_eq!(q.region_code, "US");
        assert_eq!(q.order, SearchOrder::Date);
        assert_eq!(q.limit, 50);
        assert!(q.duration.is_none());
    }
}
