//! Error types for github-packages

use thiserror::Error;
use vprune_core::RegistryError;

/// Errors that can occur talking to the GitHub Packages API
#[derive(Error, Debug)]
pub enum GithubError {
    /// Request could not be sent or the connection failed
    #[error("HTTP error: {0}")]
    Http(String),

    /// GitHub answered with a non-success status
    #[error("GitHub API returned {status}: {message}")]
    Status { status: u16, message: String },

    /// Configured API URL is unusable
    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),

    /// Response body did not match the expected shape
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// No token was supplied
    #[error("GitHub token is not configured")]
    MissingToken,
}

impl From<reqwest::Error> for GithubError {
    fn from(err: reqwest::Error) -> Self {
        GithubError::Http(err.to_string())
    }
}

impl From<GithubError> for RegistryError {
    fn from(err: GithubError) -> Self {
        match err {
            GithubError::Status { status, message } => RegistryError::Rejected { status, message },
            GithubError::Json(e) => RegistryError::Malformed(e.to_string()),
            other => RegistryError::Unavailable(other.to_string()),
        }
    }
}
