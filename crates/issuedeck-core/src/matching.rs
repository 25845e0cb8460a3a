use crate::models::{ExperienceLevel, Issue, UserProfile};

/// Points awarded when the issue's language is one the user works in
const LANGUAGE_POINTS: u8 = 40;
/// Points for the experience-level signal, by level
const BEGINNER_POINTS: u8 = 30;
const INTERMEDIATE_POINTS: u8 = 20;
const ADVANCED_POINTS: u8 = 25;
/// Points when any preferred issue type shows up in the labels/title
const ISSUE_TYPE_POINTS: u8 = 20;
/// Points when any declared interest shows up in the issue text
const INTEREST_POINTS: u8 = 10;

/// Compute the match score for an (issue, profile) pair.
///
/// Additive and deterministic; each signal is awarded at most once, so the
/// result is always in 0..=100. Absent fields count as empty text.
pub fn match_score(issue: &Issue, profile: &UserProfile) -> u8 {
    let mut score = 0;

    // Language match
    if let Some(language) = &issue.language {
        if profile.languages.iter().any(|l| l == language) {
            score += LANGUAGE_POINTS;
        }
    }

    // Experience level match. Beginners get points for beginner-friendly
    // issues; intermediate and advanced users get points for everything
    // else. The four remaining combinations award nothing - the asymmetry
    // is intentional product behavior.
    let beginner_friendly = issue.labels.iter().any(|label| {
        let name = label.name.to_lowercase();
        name.contains("good first") || name.contains("beginner")
    });

    score += match (profile.experience_level, beginner_friendly) {
        (ExperienceLevel::Beginner, true) => BEGINNER_POINTS,
        (ExperienceLevel::Intermediate, false) => INTERMEDIATE_POINTS,
        (ExperienceLevel::Advanced, false) => ADVANCED_POINTS,
        _ => 0,
    };

    let label_text = issue
        .labels
        .iter()
        .map(|label| label.name.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ");
    let title = issue.title.to_lowercase();

    // Issue type match. NOTE: the direction is the user's type value tested
    // as containing the anchor keyword ("Bug Fixes" contains "bug"), kept
    // as-is pending product clarification. First satisfied type wins; the
    // bonus never stacks.
    let type_matches = profile.issue_types.iter().any(|issue_type| {
        let wanted = issue_type.to_lowercase();

        (wanted.contains("bug") && (label_text.contains("bug") || title.contains("bug")))
            || (wanted.contains("feature")
                && (label_text.contains("feature") || label_text.contains("enhancement")))
            || (wanted.contains("doc")
                && (label_text.contains("doc") || label_text.contains("documentation")))
            || (wanted.contains("test") && (label_text.contains("test") || title.contains("test")))
            || (wanted.contains("refactor")
                && (label_text.contains("refactor") || title.contains("refactor")))
    });

    if type_matches {
        score += ISSUE_TYPE_POINTS;
    }

    // Interest match against labels, title, or repo name
    let repo_name = issue.repo_name.to_lowercase();
    let interest_matches = profile.interests.iter().any(|interest| {
        let interest = interest.to_lowercase();
        label_text.contains(&interest) || title.contains(&interest) || repo_name.contains(&interest)
    });

    if interest_matches {
        score += INTEREST_POINTS;
    }

    score
}

/// Stable descending sort of one ingested batch by match score.
///
/// Ties keep fetch order. Ranking happens once at ingestion; items already
/// handed to the session are never reordered by a later batch.
pub fn rank_issues(issues: Vec<Issue>, profile: &UserProfile) -> Vec<Issue> {
    let mut scored: Vec<(u8, Issue)> = issues
        .into_iter()
        .map(|issue| (match_score(&issue, profile), issue))
        .collect();

    // sort_by is stable, so equal scores preserve input order
    scored.sort_by(|a, b| b.0.cmp(&a.0));

    scored.into_iter().map(|(_, issue)| issue).collect()
}
