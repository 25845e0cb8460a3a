use crate::models::Issue;

/// Feed, cursor, and decision logs for one active session.
///
/// The lifecycle states (empty, loading, ready, exhausted) are not a
/// separate enum; they fall out of the fields, and the derived predicates
/// below are the only way callers should read them. In particular the
/// cursor running past the end of `issues` IS the exhausted signal, not an
/// error.
///
/// Recording a decision and advancing the cursor are two separate
/// operations by contract; callers invoke both.
#[derive(Debug, Clone)]
pub struct SessionState {
    issues: Vec<Issue>,
    current_index: usize,
    liked: Vec<Issue>,
    passed: Vec<Issue>,
    is_loading: bool,
    current_page: u32,
    has_more: bool,
    good_first_only: bool,
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            issues: Vec::new(),
            current_index: 0,
            liked: Vec::new(),
            passed: Vec::new(),
            is_loading: false,
            current_page: 1,
            // Unknown until the first fetch reports back
            has_more: true,
            good_first_only: false,
        }
    }

    /// Replace the feed wholesale; the cursor and page restart
    pub fn set_issues(&mut self, issues: Vec<Issue>) {
        self.issues = issues;
        self.current_index = 0;
        self.current_page = 1;
    }

    /// Append a later batch; cursor and page are untouched
    pub fn add_issues(&mut self, issues: Vec<Issue>) {
        self.issues.extend(issues);
    }

    /// Append-only; the same issue may be logged any number of times
    pub fn like_issue(&mut self, issue: Issue) {
        self.liked.push(issue);
    }

    /// Append-only; the same issue may be logged any number of times
    pub fn pass_issue(&mut self, issue: Issue) {
        self.passed.push(issue);
    }

    /// Advance the cursor unconditionally, no bound check
    pub fn next_issue(&mut self) {
        self.current_index += 1;
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.is_loading = loading;
    }

    pub fn set_page(&mut self, page: u32) {
        self.current_page = page;
    }

    pub fn set_has_more(&mut self, has_more: bool) {
        self.has_more = has_more;
    }

    pub fn toggle_good_first_only(&mut self) {
        self.good_first_only = !self.good_first_only;
    }

    /// Restart reviewing: cursor and decision logs only. Issues, the
    /// loading flag, the filter toggle, and pagination state stay put -
    /// the asymmetry is intentional.
    pub fn reset(&mut self) {
        self.current_index = 0;
        self.liked.clear();
        self.passed.clear();
    }

    // Derived reads

    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// The card under the cursor, if the feed still has one
    pub fn current_issue(&self) -> Option<&Issue> {
        self.issues.get(self.current_index)
    }

    /// True once the cursor has run past the end of the feed
    pub fn is_exhausted(&self) -> bool {
        self.current_index >= self.issues.len()
    }

    /// Unseen items left in the feed
    pub fn remaining(&self) -> usize {
        self.issues.len().saturating_sub(self.current_index)
    }

    /// Cards reviewed so far this session
    pub fn reviewed(&self) -> usize {
        self.current_index
    }

    /// Badge count shown next to the matches tab
    pub fn match_count(&self) -> usize {
        self.liked.len()
    }

    pub fn liked(&self) -> &[Issue] {
        &self.liked
    }

    pub fn passed(&self) -> &[Issue] {
        &self.passed
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn good_first_only(&self) -> bool {
        self.good_first_only
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

/// In-flight token plus request epoch for pagination fetches.
///
/// At most one load-more may be pending at a time, and a completion whose
/// epoch predates a full reload or filter change must be thrown away. Two
/// triggers racing for the same page range is a defect this guard exists to
/// prevent.
#[derive(Debug, Default)]
pub struct FetchGuard {
    epoch: u64,
    in_flight: bool,
}

/// Proof that a fetch was admitted, carrying the epoch it started under
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    epoch: u64,
}

impl FetchGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Admit a fetch, unless one is already pending
    pub fn try_begin(&mut self) -> Option<FetchTicket> {
        if self.in_flight {
            return None;
        }
        self.in_flight = true;
        Some(FetchTicket { epoch: self.epoch })
    }

    /// Mark the fetch finished. Returns false when the epoch moved on while
    /// the fetch was in the air - the caller must discard that result.
    pub fn finish(&mut self, ticket: FetchTicket) -> bool {
        self.in_flight = false;
        ticket.epoch == self.epoch
    }

    /// Invalidate whatever is in flight (full reload, filter change)
    pub fn invalidate(&mut self) {
        self.epoch += 1;
    }

    pub fn in_flight(&self) -> bool {
        self.in_flight
    }
}
