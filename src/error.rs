use reqwest::StatusCode;
use thiserror::Error;

/// Failure of one generation call, classified at the adapter boundary.
///
/// Every variant ends up in the same place: one error message in the channel
/// and one log line. The kind only changes the label the user sees.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("network error: {0}")]
    Network(String),
    #[error("authentication rejected: {0}")]
    Auth(String),
    #[error("API error: {0}")]
    Api(String),
    #[error("unreadable result: {0}")]
    Transform(String),
}

impl GenerationError {
    /// Classify a non-success HTTP response from a generation API.
    pub fn from_status(status: StatusCode, body: &str) -> Self {
        let detail = if body.trim().is_empty() {
            format!("status {}", status)
        } else {
            format!("status {}: {}", status, body.trim())
        };

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => GenerationError::Auth(detail),
            _ => GenerationError::Api(detail),
        }
    }
}

impl From<reqwest::Error> for GenerationError {
    fn from(e: reqwest::Error) -> Self {
        GenerationError::Network(e.to_string())
    }
}

impl From<serde_json::Error> for GenerationError {
    fn from(e: serde_json::Error) -> Self {
        GenerationError::Transform(e.to_string())
    }
}
