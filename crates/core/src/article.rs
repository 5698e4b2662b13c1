//! Article and recommendation value objects.
//!
//! These are the value types that flow through the whole system: the crawler
//! upserts `Article`s into the pool → the recommendation pipeline assembles a
//! candidate snapshot → the LLM annotates it → one `RecommendationItem` per
//! candidate goes back to the UI.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The ingestion origin of an article.
///
/// The set is closed: every document in the pool was put there by one of the
/// known crawlers. `PRIORITY` is the fixed order used when interleaving
/// across sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Source {
    #[serde(rename = "Juejin")]
    Juejin,
    #[serde(rename = "Hacker News")]
    HackerNews,
    #[serde(rename = "GitHub Trending")]
    GithubTrending,
}

impl Source {
    /// Fixed source priority order for interleaving.
    pub const PRIORITY: [Source; 3] = [
        Source::Juejin,
        Source::HackerNews,
        Source::GithubTrending,
    ];

    /// The stable label used in storage, API payloads, and default comments.
    pub fn label(&self) -> &'static str {
        match self {
            Source::Juejin => "Juejin",
            Source::HackerNews => "Hacker News",
            Source::GithubTrending => "GitHub Trending",
        }
    }

    /// Parse a stored label back into a `Source`.
    pub fn parse(label: &str) -> Option<Source> {
        match label {
            "Juejin" => Some(Source::Juejin),
            "Hacker News" => Some(Source::HackerNews),
            "GitHub Trending" => Some(Source::GithubTrending),
            _ => None,
        }
    }

    /// Position in `PRIORITY`; lower wins ties during interleaving.
    pub fn priority_index(&self) -> usize {
        match self {
            Source::Juejin => 0,
            Source::HackerNews => 1,
            Source::GithubTrending => 2,
        }
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One ingested article in the pool.
///
/// `url` is the unique key; the crawler upserts by it. Within one
/// recommendation request an `Article` is an immutable snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    /// Canonical URL — the unique key across the pool
    pub url: String,

    /// Article title
    pub title: String,

    /// Short summary (may be empty for sources without one)
    #[serde(default)]
    pub summary: String,

    /// Topic tags assigned at ingestion
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    /// Which crawler ingested this article
    pub source: Source,

    /// Lead image URL, if the crawler found one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_image: Option<String>,

    /// Last upsert time — recency ordering key
    pub updated_at: DateTime<Utc>,
}

impl Article {
    /// Whether any of this article's tags appears in `tags`.
    pub fn has_any_tag(&self, tags: &[String]) -> bool {
        self.tags.iter().any(|own| tags.contains(own))
    }

    /// The first of this article's tags that appears in `interests`.
    pub fn first_matching_tag(&self, interests: &[String]) -> Option<&str> {
        self.tags
            .iter()
            .find(|own| interests.contains(own))
            .map(String::as_str)
    }
}

/// One recommended article as returned to the caller.
///
/// Exactly one item is produced per input candidate, in candidate order.
/// `ai_comment` and `tag_match` are always non-empty — defaulted when the
/// model did not supply them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationItem {
    pub title: String,
    pub url: String,

    #[serde(default)]
    pub summary: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_image: Option<String>,

    pub source: Source,

    /// Short model-generated remark, or a templated default
    pub ai_comment: String,

    /// The tag credited for the recommendation, or the "hot pick" sentinel
    pub tag_match: String,
}

/// A click-log entry recorded when the user reacts to a recommendation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionLog {
    pub user_id: String,
    pub title: String,
    pub url: String,

    /// Action kind, e.g. "like"
    pub action: String,
}

impl ActionLog {
    /// Create a "like" action log.
    pub fn like(
        user_id: impl Into<String>,
        title: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            title: title.into(),
            url: url.into(),
            action: "like".into(),
        }
    }
}
