use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A normalized issue - the card the user swipes on
///
/// Built once by the normalizer and immutable afterwards. `id` is a
/// rendering key only: search pages can overlap, so it is not unique across
/// the feed and is never used for dedup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Issue {
    pub id: u64,
    pub number: u64,
    pub title: String,
    pub body: Option<String>,
    pub url: String,
    pub source_repo_url: String,
    pub labels: Vec<Label>,
    pub author: Author,
    pub created_at: DateTime<Utc>,
    pub comment_count: u32,
    /// Best-effort `owner/repo`, derived from `source_repo_url` at
    /// normalization time. Malformed URLs degrade silently.
    pub repo_name: String,
    pub language: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Label {
    pub name: String,
    pub color: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Author {
    pub login: String,
    pub avatar_url: String,
}

/// User preferences driving match scoring. Owned and persisted externally;
/// issuedeck only ever reads it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    /// Ordered by preference; the first entry drives the feed filter.
    pub languages: Vec<String>,
    pub experience_level: ExperienceLevel,
    pub interests: Vec<String>,
    pub issue_types: Vec<String>,
    pub daily_goal: u32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl std::fmt::Display for ExperienceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExperienceLevel::Beginner => write!(f, "beginner"),
            ExperienceLevel::Intermediate => write!(f, "intermediate"),
            ExperienceLevel::Advanced => write!(f, "advanced"),
        }
    }
}

/// What the user wants in their queue right now
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedFilter {
    pub language: Option<String>,
    pub good_first_only: bool,
}
