use serde::{Deserialize, Serialize};
use tracing::error;

use crate::{
    feed::IssueSearcher,
    models::{FeedFilter, Issue},
    normalize::Normalizer,
    query::build_search_query,
    Error, Result,
};

/// Page size for the single-request feed path
pub const FEED_PAGE_SIZE: u32 = 30;

/// Query parameters as the feed endpoint receives them.
///
/// `good_first_only` is the raw string form: exactly `"true"` enables the
/// filter, anything else (or nothing) disables it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FeedParams {
    pub language: Option<String>,
    pub good_first_only: Option<String>,
    pub page: Option<u32>,
}

impl FeedParams {
    pub fn filter(&self) -> FeedFilter {
        FeedFilter {
            language: self.language.clone().filter(|l| !l.is_empty()),
            good_first_only: self.good_first_only.as_deref() == Some("true"),
        }
    }
}

/// What the endpoint hands back on success
#[derive(Debug, Clone, Serialize)]
pub struct FeedResponse {
    pub issues: Vec<Issue>,
    #[serde(rename = "hasMore")]
    pub has_more: bool,
}

/// Backs the feed endpoint the UI consumes: one search request, normalized
/// issues out.
///
/// Upstream trouble on this path is surfaced as a fixed generic error -
/// the real cause goes to the server log, never to the caller.
pub struct FeedService {
    searcher: Box<dyn IssueSearcher>,
    page_size: u32,
}

impl FeedService {
    pub fn new(searcher: Box<dyn IssueSearcher>) -> Self {
        Self::with_page_size(searcher, FEED_PAGE_SIZE)
    }

    pub fn with_page_size(searcher: Box<dyn IssueSearcher>, page_size: u32) -> Self {
        Self {
            searcher,
            page_size,
        }
    }

    pub async fn issues(&self, params: &FeedParams) -> Result<FeedResponse> {
        let filter = params.filter();
        let query = build_search_query(&filter);
        let page = params.page.unwrap_or(1);

        match self.searcher.search_issues(&query, self.page_size, page).await {
            Ok(results) => {
                let has_more = results.items.len() as u32 == self.page_size;
                let issues =
                    Normalizer::with_language(filter.language).normalize_all(results.items);
                Ok(FeedResponse { issues, has_more })
            }
            Err(err) => {
                error!("Error fetching issues: {}", err);
                Err(Error::FeedUnavailable)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::SearchPage;
    use chrono::Utc;
    use issuedeck_api::{RawIssue, RawLabel};
    use mockall::mock;

    mock! {
        Searcher {}

        #[async_trait::async_trait]
        impl IssueSearcher for Searcher {
            async fn search_issues(
                &self,
                query: &str,
                per_page: u32,
                page: u32,
            ) -> Result<SearchPage>;
        }
    }

    fn raw_issue(id: u64) -> RawIssue {
        RawIssue {
            id,
            number: id,
            title: "Test Issue".to_string(),
            body: None,
            html_url: format!("https://github.com/owner/repo/issues/{}", id),
            repository_url: "https://api.github.com/repos/owner/repo".to_string(),
            labels: vec![RawLabel::Name("enhancement".to_string())],
            user: None,
            created_at: Utc::now(),
            comments: 2,
        }
    }

    #[test]
    fn test_params_parse_from_the_wire() {
        let params: FeedParams =
            serde_json::from_str(r#"{"language":"rust","goodFirstOnly":"true","page":3}"#).unwrap();
        let filter = params.filter();
        assert_eq!(filter.language.as_deref(), Some("rust"));
        assert!(filter.good_first_only);
        assert_eq!(params.page, Some(3));
    }

    #[tokio::test]
    async fn test_params_become_the_expected_query() {
        let mut searcher = MockSearcher::new();
        searcher
            .expect_search_issues()
            .withf(|query, per_page, page| {
                query == "is:open is:issue label:\"good first issue\" language:python no:assignee comments:>0"
                    && *per_page == FEED_PAGE_SIZE
                    && *page == 2
            })
            .times(1)
            .returning(|_, _, _| {
                Ok(SearchPage {
                    total_count: 1,
                    items: vec![raw_issue(1)],
                })
            });

        let service = FeedService::new(Box::new(searcher));
        let params = FeedParams {
            language: Some("python".to_string()),
            good_first_only: Some("true".to_string()),
            page: Some(2),
        };

        let response = service.issues(&params).await.unwrap();
        assert_eq!(response.issues.len(), 1);
        assert_eq!(response.issues[0].repo_name, "owner/repo");
        assert!(!response.has_more);
    }

    #[tokio::test]
    async fn test_good_first_only_requires_literal_true() {
        let mut searcher = MockSearcher::new();
        searcher
            .expect_search_issues()
            .withf(|query, _, page| {
                query == "is:open is:issue no:assignee comments:>0" && *page == 1
            })
            .times(1)
            .returning(|_, _, _| {
                Ok(SearchPage {
                    total_count: 0,
                    items: vec![],
                })
            });

        let service = FeedService::new(Box::new(searcher));
        let params = FeedParams {
            language: None,
            good_first_only: Some("yes".to_string()),
            page: None,
        };

        let response = service.issues(&params).await.unwrap();
        assert!(response.issues.is_empty());
        assert!(!response.has_more);
    }

    #[tokio::test]
    async fn test_full_page_reports_has_more() {
        let mut searcher = MockSearcher::new();
        searcher.expect_search_issues().returning(|_, _, _| {
            Ok(SearchPage {
                total_count: 500,
                items: (0..u64::from(FEED_PAGE_SIZE)).map(raw_issue).collect(),
            })
        });

        let service = FeedService::new(Box::new(searcher));
        let response = service.issues(&FeedParams::default()).await.unwrap();
        assert_eq!(response.issues.len(), 30);
        assert!(response.has_more);
    }

    #[tokio::test]
    async fn test_upstream_failure_surfaces_fixed_error() {
        let mut searcher = MockSearcher::new();
        searcher
            .expect_search_issues()
            .returning(|_, _, _| Err(Error::ApiError("GitHub API Error".to_string())));

        let service = FeedService::new(Box::new(searcher));
        let err = service.issues(&FeedParams::default()).await.unwrap_err();

        assert!(matches!(err, Error::FeedUnavailable));
        assert_eq!(err.to_string(), "Failed to fetch issues");
    }

    #[tokio::test]
    async fn test_response_serializes_for_the_wire() {
        let mut searcher = MockSearcher::new();
        searcher.expect_search_issues().returning(|_, _, _| {
            Ok(SearchPage {
                total_count: 1,
                items: vec![raw_issue(7)],
            })
        });

        let service = FeedService::new(Box::new(searcher));
        let response = service.issues(&FeedParams::default()).await.unwrap();

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["hasMore"], serde_json::json!(false));
        assert_eq!(json["issues"][0]["repo_name"], "owner/repo");
        assert_eq!(json["issues"][0]["labels"][0]["color"], "000000");
        assert_eq!(json["issues"][0]["author"]["login"], "unknown");
    }
}
