use serde::{Deserialize, Serialize};

/// Application-level failure reported by the server (any non-2xx response).
///
/// Returned as a value, never raised. `status_code` is always populated when the
/// failure came from an HTTP response; `error` and `reason` mirror the response
/// body's fields and stay `None` when the body does not carry them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CouchError {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub status_code: Option<u16>,
}

impl CouchError {
    pub fn with_status(status_code: u16) -> Self {
        Self {
            status_code: Some(status_code),
            ..Self::default()
        }
    }
}

impl std::fmt::Display for CouchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({}): {}",
            self.error.as_deref().unwrap_or("unknown_error"),
            self.status_code
                .map(|s| s.to_string())
                .unwrap_or_else(|| "-".to_string()),
            self.reason.as_deref().unwrap_or("")
        )
    }
}

/// Outcome of a call that reached the server: the decoded value or the server's error.
pub type CouchResult<T> = std::result::Result<T, CouchError>;

/// Caller misuse, detected before any request is sent.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum UsageError {
    #[error("missing path segment '{name}' for template {template}")]
    MissingSegment { name: String, template: String },

    #[error("parameter '{key}' is not accepted by endpoint {endpoint}")]
    DisallowedKey { key: String, endpoint: String },

    #[error("endpoint {endpoint} does not take a request body")]
    InvalidBody { endpoint: String },
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Usage(#[from] UsageError),

    #[error("transport failure: {0}")]
    Transport(#[source] anyhow::Error),
}

impl Error {
    pub fn as_usage(&self) -> Option<&UsageError> {
        match self {
            Error::Usage(usage) => Some(usage),
            Error::Transport(_) => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
