// Core business logic lives here - the brain of the operation
pub mod config;
pub mod controller;
pub mod error;
pub mod feed;
pub mod matching;
pub mod models;
pub mod normalize;
pub mod providers;
pub mod query;
pub mod service;
pub mod session;

pub use config::Config;
pub use controller::FeedController;
pub use error::Error;
pub use feed::{FeedBatch, FeedFetcher, IssueSearcher, SearchPage};
pub use service::{FeedParams, FeedResponse, FeedService};
pub use session::{FetchGuard, FetchTicket, SessionState};

/// Result type alias because typing Result<T, Error> everywhere is tedious
pub type Result<T> = std::result::Result<T, Error>;
