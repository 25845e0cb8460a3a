// Raw upstream API client for the issue search collaborator
pub mod github;

// Re-export common types
pub use github::{
    GitHubError, GitHubSearchClient, IssueSearchResults, RawIssue, RawLabel, RawUser,
};
