// End-to-end feed flow: fetch -> normalize -> rank -> session -> watermark
use chrono::Utc;
use std::collections::VecDeque;
use std::sync::Mutex;

use issuedeck_api::{RawIssue, RawLabel, RawUser};
use issuedeck_core::feed::MAX_PAGE_SIZE;
use issuedeck_core::models::{ExperienceLevel, UserProfile};
use issuedeck_core::{Error, FeedController, FeedFetcher, IssueSearcher, Result, SearchPage};

struct ScriptedSearcher {
    responses: Mutex<VecDeque<Result<SearchPage>>>,
}

impl ScriptedSearcher {
    fn new(responses: Vec<Result<SearchPage>>) -> Self {
        Self {
            responses: Mutex::new(responses.into_iter().collect()),
        }
    }
}

#[async_trait::async_trait]
impl IssueSearcher for ScriptedSearcher {
    async fn search_issues(&self, _query: &str, _per_page: u32, _page: u32) -> Result<SearchPage> {
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(Error::ApiError("script exhausted".to_string())))
    }
}

fn raw_issue(id: u64, title: &str, labels: &[&str]) -> RawIssue {
    RawIssue {
        id,
        number: id,
        title: title.to_string(),
        body: Some("body".to_string()),
        html_url: format!("https://github.com/acme/widget/issues/{}", id),
        repository_url: "https://api.github.com/repos/acme/widget".to_string(),
        labels: labels
            .iter()
            .map(|name| RawLabel::Name(name.to_string()))
            .collect(),
        user: Some(RawUser {
            login: "maintainer".to_string(),
            avatar_url: "https://example.com/a.png".to_string(),
        }),
        created_at: Utc::now(),
        comments: 4,
    }
}

fn full_page(first_id: u64) -> SearchPage {
    SearchPage {
        total_count: 500,
        items: (0..u64::from(MAX_PAGE_SIZE))
            .map(|i| raw_issue(first_id + i, "routine work", &[]))
            .collect(),
    }
}

fn profile() -> UserProfile {
    UserProfile {
        languages: vec!["Rust".to_string()],
        experience_level: ExperienceLevel::Beginner,
        interests: vec!["widget".to_string()],
        issue_types: vec!["Bug Fixes".to_string()],
        daily_goal: 10,
    }
}

#[tokio::test]
async fn swipe_through_a_paginated_feed() {
    // Page 1 is full; page 2 is the tail end of the results
    let tail = SearchPage {
        total_count: 120,
        items: (0..20)
            .map(|i| raw_issue(2000 + i, "tail work", &[]))
            .collect(),
    };
    let fetcher = FeedFetcher::new(Box::new(ScriptedSearcher::new(vec![
        Ok(full_page(0)),
        Ok(tail),
    ])));
    let mut controller = FeedController::new(fetcher, profile()).with_tuning(1, 10);

    controller.load_initial().await;
    assert_eq!(controller.session().issues().len(), 100);
    assert!(controller.session().has_more());
    assert!(!controller.session().is_exhausted());

    // Swipe until the low watermark pulls in the second page
    let mut loaded_more_at = None;
    for swipe in 1..=95 {
        if swipe % 2 == 0 {
            controller.like();
        } else {
            controller.pass();
        }
        controller.maybe_load_more().await;

        if loaded_more_at.is_none() && controller.session().issues().len() > 100 {
            loaded_more_at = Some(swipe);
        }
    }

    // The trigger fired exactly when 10 unseen cards remained
    assert_eq!(loaded_more_at, Some(90));
    assert_eq!(controller.session().issues().len(), 120);
    assert!(!controller.session().has_more());

    // Decisions were recorded without dedup, cursor advanced one per swipe
    let session = controller.session();
    assert_eq!(session.reviewed(), 95);
    assert_eq!(session.liked().len() + session.passed().len(), 95);

    // Swipe out the rest; exhaustion is a state, not an error
    for _ in 0..25 {
        controller.like();
        controller.maybe_load_more().await;
    }
    assert!(controller.session().is_exhausted());
    assert_eq!(controller.session().remaining(), 0);
}

#[tokio::test]
async fn partial_upstream_failure_degrades_to_what_arrived() {
    let fetcher = FeedFetcher::new(Box::new(ScriptedSearcher::new(vec![
        Ok(full_page(0)),
        Err(Error::ApiError("secondary page failed".to_string())),
    ])));
    let mut controller = FeedController::new(fetcher, profile()).with_tuning(3, 10);

    controller.load_initial().await;

    // Page 1 landed, page 2 failed: we keep the 100 and stay open for more
    let session = controller.session();
    assert_eq!(session.issues().len(), 100);
    assert!(session.has_more());
    assert!(!session.is_loading());
    assert_eq!(session.current_page(), 1);
}

#[tokio::test]
async fn reset_preserves_the_feed_but_clears_decisions() {
    let page = SearchPage {
        total_count: 3,
        items: vec![
            raw_issue(1, "Fix a bug in the widget", &["bug"]),
            raw_issue(2, "routine", &[]),
            raw_issue(3, "starter", &["good first issue"]),
        ],
    };
    let fetcher = FeedFetcher::new(Box::new(ScriptedSearcher::new(vec![Ok(page)])));
    let mut controller = FeedController::new(fetcher, profile()).with_tuning(1, 10);

    controller.load_initial().await;

    // Beginner profile: the good-first-issue card outranks the bug card,
    // which outranks the plain one
    let ids: Vec<u64> = controller.session().issues().iter().map(|i| i.id).collect();
    assert_eq!(ids, [3, 1, 2]);

    controller.like();
    controller.like();
    assert_eq!(controller.session().match_count(), 2);

    controller.session_mut().reset();

    let session = controller.session();
    assert_eq!(session.match_count(), 0);
    assert_eq!(session.current_index(), 0);
    assert_eq!(session.issues().len(), 3);
    assert_eq!(session.issues()[0].id, 3);
}
