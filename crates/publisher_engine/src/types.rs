use std::fmt;

use serde::Deserialize;
use thiserror::Error;

/// Configuration problems detected before any network call is made.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("access token is required")]
    MissingToken,
    #[error("repository owner is required")]
    MissingOwner,
    #[error("repository name is required")]
    MissingRepo,
    #[error("unrecognized repository reference: {0}")]
    InvalidRepoRef(String),
    #[error("failed to build http client: {0}")]
    HttpClient(String),
}

/// Draft problems detected before any network call is made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("a post title is required")]
    MissingTitle,
    #[error("post content is empty")]
    MissingContent,
}

/// Classification of a failed remote API call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiFailure {
    Authentication,
    NotFound,
    Conflict,
    Api,
    Network,
}

impl fmt::Display for ApiFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiFailure::Authentication => write!(f, "authentication failed"),
            ApiFailure::NotFound => write!(f, "not found"),
            ApiFailure::Conflict => write!(f, "path already exists"),
            ApiFailure::Api => write!(f, "api error"),
            ApiFailure::Network => write!(f, "network error"),
        }
    }
}

/// Error raised by a remote API call, carrying enough structure for the
/// caller to render a precise message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct ApiError {
    pub kind: ApiFailure,
    pub status: Option<u16>,
    pub message: String,
    pub raw_body: Option<String>,
}

impl ApiError {
    pub(crate) fn network(message: impl Into<String>) -> Self {
        Self {
            kind: ApiFailure::Network,
            status: None,
            message: message.into(),
            raw_body: None,
        }
    }

    /// Classifies a non-2xx response. The server's JSON `message` field wins
    /// over `fallback` when present.
    pub(crate) fn from_response(status: u16, body: &str, fallback: &str) -> Self {
        let kind = match status {
            401 => ApiFailure::Authentication,
            404 => ApiFailure::NotFound,
            409 | 422 => ApiFailure::Conflict,
            _ => ApiFailure::Api,
        };
        let message = server_message(body).unwrap_or_else(|| fallback.to_string());
        Self {
            kind,
            status: Some(status),
            message,
            raw_body: Some(body.to_string()),
        }
    }

    pub(crate) fn unexpected_body(status: u16, body: &str) -> Self {
        Self {
            kind: ApiFailure::Api,
            status: Some(status),
            message: "unexpected response body".to_string(),
            raw_body: Some(body.to_string()),
        }
    }
}

fn server_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value.get("message")?.as_str().map(ToOwned::to_owned)
}

/// Any failure along the publish pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PublishError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Identity payload returned by the remote API for a valid token.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserIdentity {
    pub login: String,
}

/// Successful file creation: where the post lives and the commit that added it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedPost {
    pub html_url: String,
    pub commit_sha: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    ConnectionTested {
        result: Result<UserIdentity, PublishError>,
    },
    PublishCompleted {
        result: Result<PublishedPost, PublishError>,
    },
}
