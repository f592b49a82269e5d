//! Errors raised by the backend client

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failure, no usable response
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected response: {0}")]
    InvalidResponse(String),

    /// 401 from any endpoint; the session must be renewed
    #[error("Session expired, log in again")]
    Unauthorized,

    /// Any other non-2xx. `message` is the backend's `{"message": ...}`,
    /// else the raw body, else the status reason
    #[error("Backend returned {status}: {message}")]
    Api { status: u16, message: String },

    /// Input refused before anything was sent
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Cannot read attachment {}: {source}", path.display())]
    Attachment {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed JSON: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Bad configuration: {0}")]
    Config(String),
}

impl From<shared::ValidationError> for ClientError {
    fn from(err: shared::ValidationError) -> Self {
        ClientError::Validation(err.to_string())
    }
}

impl ClientError {
    /// HTTP status code, when the error came from a backend response
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Unauthorized => Some(401),
            Self::Http(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
