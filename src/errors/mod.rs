use anyhow::Context as _;
use thiserror::Error;

use crate::domain::ValidationReport;

/// Failures of the data-gathering side, kept apart from a valid zero score
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("player '{0}' was not found upstream")]
    PlayerNotFound(String),

    #[error("upstream returned status {status} for {url}")]
    Status { status: u16, url: String },

    #[error("gave up on {url} after {attempts} attempts (last status {last_status:?})")]
    RetriesExhausted {
        url: String,
        attempts: u32,
        last_status: Option<u16>,
    },

    #[error("request to {url} failed")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to decode {what}")]
    Decode {
        what: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Error)]
pub enum RiskError {
    #[error("invalid player metrics: {0}")]
    InvalidInput(ValidationReport),

    #[error("'{0}' is not a valid chess.com username")]
    InvalidUsername(String),

    #[error("invalid risk configuration: {0}")]
    InvalidConfig(String),

    #[error("score {0} is outside 0-100")]
    ScoreOutOfRange(u32),

    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

/// Add context to fetch errors
pub fn fetch_context(what: &str, username: &str) -> String {
    format!("Failed to fetch {} for player: {}", what, username)
}

/// Add context to history errors
pub fn history_context(operation: &str, username: &str) -> String {
    format!("Failed to {} history entry for: {}", operation, username)
}

/// Add context to config errors
pub fn config_context(path: &std::path::Path) -> String {
    format!("Failed to load risk configuration from: {}", path.display())
}

/// Wrap result with fetch context
pub fn with_fetch_context<T, E>(result: Result<T, E>, what: &str, username: &str) -> anyhow::Result<T>
where
    E: std::error::Error + Send + Sync + 'static,
{
    result.with_context(|| fetch_context(what, username))
}
