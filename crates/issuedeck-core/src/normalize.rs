use issuedeck_api::{RawIssue, RawLabel};

use crate::models::{Author, Issue, Label};

/// Color assigned to labels that arrive without one
pub const DEFAULT_LABEL_COLOR: &str = "000000";

/// Canonicalizes raw search items into the stable `Issue` shape.
///
/// Everything here is total: malformed or missing fields become safe
/// defaults, never errors. The optional language is stamped onto each issue
/// because the search that produced the batch was already filtered on it.
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    language: Option<String>,
}

impl Normalizer {
    pub fn new() -> Self {
        Self { language: None }
    }

    pub fn with_language(language: Option<String>) -> Self {
        // Blank language carries no information
        let language = language.filter(|l| !l.is_empty());
        Self { language }
    }

    pub fn normalize(&self, raw: RawIssue) -> Issue {
        let repo_name = repo_name_from_url(&raw.repository_url);

        let labels = raw.labels.into_iter().map(normalize_label).collect();

        let author = match raw.user {
            Some(user) if !user.login.is_empty() => Author {
                login: user.login,
                avatar_url: user.avatar_url,
            },
            _ => Author {
                login: "unknown".to_string(),
                avatar_url: String::new(),
            },
        };

        Issue {
            id: raw.id,
            number: raw.number,
            title: raw.title,
            body: raw.body,
            url: raw.html_url,
            source_repo_url: raw.repository_url,
            labels,
            author,
            created_at: raw.created_at,
            comment_count: raw.comments,
            repo_name,
            language: self.language.clone(),
        }
    }

    pub fn normalize_all(&self, raw: Vec<RawIssue>) -> Vec<Issue> {
        raw.into_iter().map(|item| self.normalize(item)).collect()
    }
}

fn normalize_label(raw: RawLabel) -> Label {
    match raw {
        RawLabel::Name(name) => Label {
            name,
            color: DEFAULT_LABEL_COLOR.to_string(),
        },
        RawLabel::Record { name, color } => Label {
            name: name.unwrap_or_default(),
            color: color.unwrap_or_else(|| DEFAULT_LABEL_COLOR.to_string()),
        },
    }
}

/// Last two path segments of the repository URL, e.g.
/// `https://api.github.com/repos/owner/repo` -> `owner/repo`.
///
/// Intentionally unvalidated: a malformed URL yields whatever its tail
/// segments are rather than an error.
fn repo_name_from_url(url: &str) -> String {
    let segments: Vec<&str> = url.split('/').collect();
    let start = segments.len().saturating_sub(2);
    segments[start..].join("/")
}
