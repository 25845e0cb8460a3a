use issuedeck_api::RawIssue;
use tracing::{debug, warn};

use crate::{models::FeedFilter, query::build_search_query, Result};

/// Largest page the upstream search accepts
pub const MAX_PAGE_SIZE: u32 = 100;

/// Trait for the upstream issue search - makes testing easier and keeps the
/// transport swappable
///
/// The real implementation lives in `providers::github`; tests mock this.
#[async_trait::async_trait]
pub trait IssueSearcher: Send + Sync {
    async fn search_issues(&self, query: &str, per_page: u32, page: u32) -> Result<SearchPage>;
}

/// One page of raw search results
#[derive(Debug, Clone)]
pub struct SearchPage {
    pub total_count: u64,
    pub items: Vec<RawIssue>,
}

/// Result of one multi-page fetch
#[derive(Debug, Clone)]
pub struct FeedBatch {
    /// Raw items flattened in request order
    pub items: Vec<RawIssue>,
    /// True iff the final accepted page came back completely full
    pub has_more: bool,
    /// Pages that actually landed, so callers can advance their page
    /// cursor correctly after an early stop
    pub pages_fetched: u32,
}

/// Drives sequential paged requests against the search collaborator.
///
/// Pages are requested strictly in increasing order - stable ranking
/// depends on it, and so does upstream rate courtesy. A failed page ends
/// the run but keeps everything already accumulated: a partial feed is a
/// success, not a failure.
pub struct FeedFetcher {
    searcher: Box<dyn IssueSearcher>,
    page_size: u32,
}

impl FeedFetcher {
    pub fn new(searcher: Box<dyn IssueSearcher>) -> Self {
        Self {
            searcher,
            page_size: MAX_PAGE_SIZE,
        }
    }

    /// Fetch up to `page_budget` pages starting at `start_page`.
    ///
    /// Stops early when a page comes back short (end of results) or when a
    /// page request fails (degrade to what we have; the error is logged,
    /// never propagated).
    pub async fn fetch_pages(
        &self,
        filter: &FeedFilter,
        start_page: u32,
        page_budget: u32,
    ) -> FeedBatch {
        let query = build_search_query(filter);

        let mut items: Vec<RawIssue> = Vec::new();
        let mut has_more = false;
        let mut pages_fetched = 0;

        for page in start_page..start_page.saturating_add(page_budget) {
            match self.searcher.search_issues(&query, self.page_size, page).await {
                Ok(result) => {
                    let full_page = result.items.len() as u32 == self.page_size;
                    debug!(
                        "page {} returned {} of {} issues",
                        page,
                        result.items.len(),
                        result.total_count
                    );

                    has_more = full_page;
                    pages_fetched += 1;
                    items.extend(result.items);

                    if !full_page {
                        break;
                    }
                }
                Err(err) => {
                    warn!(
                        "page {} failed, keeping {} issues from earlier pages: {}",
                        page,
                        items.len(),
                        err
                    );
                    break;
                }
            }
        }

        FeedBatch {
            items,
            has_more,
            pages_fetched,
        }
    }
}
