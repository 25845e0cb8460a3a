use tracing::{debug, info};
use uuid::Uuid;

use crate::{
    config::FeedConfig,
    feed::{FeedBatch, FeedFetcher},
    matching::rank_issues,
    models::{FeedFilter, Issue, UserProfile},
    normalize::Normalizer,
    session::{FetchGuard, FetchTicket, SessionState},
};

/// Auto-fetch the next page once this few unseen cards remain
pub const DEFAULT_LOW_WATERMARK: usize = 10;
/// Pages pulled per fetch call
pub const DEFAULT_PAGE_BUDGET: u32 = 3;

/// Everything a load-more needs, handed out by `begin_load_more`.
///
/// Splitting admission from completion lets a caller run the fetch
/// concurrently with user mutations and still have the completion checked
/// against the session epoch.
#[derive(Debug)]
pub struct FetchPlan {
    ticket: FetchTicket,
    pub filter: FeedFilter,
    pub start_page: u32,
}

/// Owns one swipe session end to end: state, fetch gating, the paginating
/// fetcher, and the profile that drives ranking.
///
/// There is no global session; the presentation layer holds one of these
/// and drops it on logout.
pub struct FeedController {
    session_id: Uuid,
    session: SessionState,
    guard: FetchGuard,
    fetcher: FeedFetcher,
    profile: UserProfile,
    page_budget: u32,
    low_watermark: usize,
}

impl FeedController {
    pub fn new(fetcher: FeedFetcher, profile: UserProfile) -> Self {
        let session_id = Uuid::new_v4();
        info!("starting feed session {}", session_id);

        Self {
            session_id,
            session: SessionState::new(),
            guard: FetchGuard::new(),
            fetcher,
            profile,
            page_budget: DEFAULT_PAGE_BUDGET,
            low_watermark: DEFAULT_LOW_WATERMARK,
        }
    }

    pub fn with_tuning(mut self, page_budget: u32, low_watermark: usize) -> Self {
        self.page_budget = page_budget;
        self.low_watermark = low_watermark;
        self
    }

    pub fn from_config(fetcher: FeedFetcher, profile: UserProfile, config: &FeedConfig) -> Self {
        Self::new(fetcher, profile).with_tuning(config.page_budget, config.low_watermark)
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    /// Direct store access for callers that drive the two-call
    /// record-then-advance contract themselves
    pub fn session_mut(&mut self) -> &mut SessionState {
        &mut self.session
    }

    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    /// The active filter: the user's first language plus the session toggle
    fn filter(&self) -> FeedFilter {
        FeedFilter {
            language: self
                .profile
                .languages
                .first()
                .filter(|l| !l.is_empty())
                .cloned(),
            good_first_only: self.session.good_first_only(),
        }
    }

    /// Normalize and rank one fetched batch. Ranking is per batch; cards
    /// already in the session keep their positions.
    fn ingest(&self, batch: &FeedBatch) -> Vec<Issue> {
        let filter = self.filter();
        let normalizer = Normalizer::with_language(filter.language);
        rank_issues(normalizer.normalize_all(batch.items.clone()), &self.profile)
    }

    /// Fetch the feed from page 1, replacing whatever is showing.
    ///
    /// Any load-more still in the air is invalidated; its completion will
    /// be dropped when it lands.
    pub async fn load_initial(&mut self) {
        self.guard.invalidate();
        self.session.set_loading(true);

        let filter = self.filter();
        let batch = self.fetcher.fetch_pages(&filter, 1, self.page_budget).await;
        info!(
            "session {}: initial load brought {} issues over {} pages",
            self.session_id,
            batch.items.len(),
            batch.pages_fetched
        );

        let issues = self.ingest(&batch);
        self.session.set_issues(issues);
        self.session.set_has_more(batch.has_more);
        if batch.pages_fetched > 0 {
            self.session.set_page(batch.pages_fetched);
        }
        self.session.set_loading(false);
    }

    /// Record a like for the card under the cursor, then advance
    pub fn like(&mut self) {
        if let Some(current) = self.session.current_issue().cloned() {
            self.session.like_issue(current);
            self.session.next_issue();
        }
    }

    /// Record a pass for the card under the cursor, then advance
    pub fn pass(&mut self) {
        if let Some(current) = self.session.current_issue().cloned() {
            self.session.pass_issue(current);
            self.session.next_issue();
        }
    }

    /// Low-watermark check. Safe to evaluate on every cursor or feed
    /// change; stays false while a fetch is pending.
    pub fn should_load_more(&self) -> bool {
        self.session.remaining() <= self.low_watermark
            && self.session.has_more()
            && !self.guard.in_flight()
            && !self.session.is_loading()
    }

    /// Admit a load-more if the watermark says so and nothing is in
    /// flight. The returned plan tells the caller what to fetch.
    pub fn begin_load_more(&mut self) -> Option<FetchPlan> {
        if !self.should_load_more() {
            return None;
        }
        let ticket = self.guard.try_begin()?;

        Some(FetchPlan {
            ticket,
            filter: self.filter(),
            start_page: self.session.current_page() + 1,
        })
    }

    /// Land a load-more. Batches fetched under a stale epoch (the session
    /// reloaded or changed filter meanwhile) are discarded.
    pub fn complete_load_more(&mut self, plan: FetchPlan, batch: FeedBatch) {
        if !self.guard.finish(plan.ticket) {
            debug!(
                "session {}: dropping {} issues fetched under a stale epoch",
                self.session_id,
                batch.items.len()
            );
            return;
        }

        let issues = self.ingest(&batch);
        self.session.add_issues(issues);
        self.session.set_has_more(batch.has_more);
        if batch.pages_fetched > 0 {
            self.session
                .set_page(plan.start_page + batch.pages_fetched - 1);
        }
    }

    /// Admission, fetch, and completion in one call, for callers that do
    /// not need to overlap the fetch with anything else
    pub async fn maybe_load_more(&mut self) {
        let Some(plan) = self.begin_load_more() else {
            return;
        };
        let batch = self
            .fetcher
            .fetch_pages(&plan.filter, plan.start_page, self.page_budget)
            .await;
        self.complete_load_more(plan, batch);
    }

    /// Flip the good-first-only filter. Changing the filter invalidates
    /// in-flight fetches; call `load_initial` to repopulate.
    pub fn set_good_first_only(&mut self, enabled: bool) {
        if self.session.good_first_only() != enabled {
            self.session.toggle_good_first_only();
            self.guard.invalidate();
        }
    }
}
