use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const GITHUB_API_BASE: &str = "https://api.github.com";

#[derive(Error, Debug)]
pub enum GitHubError {
    #[error("API request failed: {0}")]
    RequestFailed(String),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Search rejected: {0}")]
    NotFound(String),

    #[error("Authentication required")]
    AuthRequired,

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    ParseError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GitHubError>;

/// Client for the GitHub issue search API.
///
/// Search queries go through `/search/issues`; the query string itself is
/// built by the caller (see issuedeck-core), this client only speaks HTTP.
pub struct GitHubSearchClient {
    client: reqwest::Client,
    token: Option<String>,
    base_url: String,
}

impl GitHubSearchClient {
    pub fn new(token: Option<String>) -> Self {
        Self::with_base_url(token, GITHUB_API_BASE.to_string())
    }

    /// For GitHub Enterprise hosts
    pub fn with_base_url(token: Option<String>, base_url: String) -> Self {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::USER_AGENT,
            reqwest::header::HeaderValue::from_static("issuedeck/0.1.0"),
        );
        headers.insert(
            reqwest::header::ACCEPT,
            reqwest::header::HeaderValue::from_static("application/vnd.github+json"),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            token,
            base_url,
        }
    }

    /// Search open issues, newest first.
    ///
    /// One request per call; pagination is driven by the caller. `per_page`
    /// is capped at 100 upstream.
    pub async fn search_issues(
        &self,
        query: &str,
        per_page: u32,
        page: u32,
    ) -> Result<IssueSearchResults> {
        let url = format!("{}/search/issues", self.base_url);

        let mut request = self.client.get(&url).query(&[
            ("q", query),
            ("sort", "created"),
            ("order", "desc"),
            ("per_page", &per_page.to_string()),
            ("page", &page.to_string()),
        ]);

        if let Some(ref token) = self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;

        if response.status() == 401 {
            return Err(GitHubError::AuthRequired);
        }

        if response.status() == 403 || response.status() == 429 {
            return Err(GitHubError::RateLimitExceeded);
        }

        if response.status() == 422 {
            return Err(GitHubError::NotFound(query.to_string()));
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(GitHubError::RequestFailed(format!(
                "Status {}: {}",
                status, body
            )));
        }

        let results: IssueSearchResults = response.json().await?;
        Ok(results)
    }
}

/// Search response envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueSearchResults {
    pub total_count: u64,
    #[serde(default)]
    pub items: Vec<RawIssue>,
}

/// An issue as the search API returns it, optional fields left raw.
/// Canonicalization into the domain model happens in issuedeck-core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawIssue {
    pub id: u64,
    pub number: u64,
    pub title: String,
    pub body: Option<String>,
    pub html_url: String,
    pub repository_url: String,
    #[serde(default)]
    pub labels: Vec<RawLabel>,
    pub user: Option<RawUser>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub comments: u32,
}

/// Labels arrive either as bare strings or as records, depending on the
/// issue's age and the API version that produced it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawLabel {
    Name(String),
    Record {
        name: Option<String>,
        color: Option<String>,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawUser {
    #[serde(default)]
    pub login: String,
    #[serde(default)]
    pub avatar_url: String,
}
