use thiserror::Error;

/// All the ways things can go wrong in issuedeck
///
/// We use thiserror here because it generates the boilerplate for us.
/// Life's too short to manually implement Display and Error traits.
#[derive(Error, Debug)]
pub enum Error {
    #[error("API request failed: {0}")]
    ApiError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// The fixed message the feed endpoint surfaces to its caller.
    /// The real cause is logged server-side, never exposed.
    #[error("Failed to fetch issues")]
    FeedUnavailable,

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
