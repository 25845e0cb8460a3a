// GitHub searcher implementation - bridges the API client with the
// IssueSearcher trait
use issuedeck_api::GitHubSearchClient;

use crate::{
    feed::{IssueSearcher, SearchPage},
    Error, Result,
};

/// Wrapper around GitHubSearchClient that implements IssueSearcher
pub struct GitHubSearcher {
    client: GitHubSearchClient,
}

impl GitHubSearcher {
    pub fn new(token: Option<String>) -> Self {
        Self {
            client: GitHubSearchClient::new(token),
        }
    }

    pub fn with_base_url(token: Option<String>, base_url: String) -> Self {
        Self {
            client: GitHubSearchClient::with_base_url(token, base_url),
        }
    }
}

#[async_trait::async_trait]
impl IssueSearcher for GitHubSearcher {
    async fn search_issues(&self, query: &str, per_page: u32, page: u32) -> Result<SearchPage> {
        let results = self
            .client
            .search_issues(query, per_page, page)
            .await
            .map_err(|e| Error::ApiError(e.to_string()))?;

        Ok(SearchPage {
            total_count: results.total_count,
            items: results.items,
        })
    }
}
