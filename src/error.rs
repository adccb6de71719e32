use thiserror::Error;

/// Errors produced below the adapter boundary.
///
/// These never reach a chat caller: [`exchange`](crate::concierge::exchange)
/// absorbs every variant into a displayable fallback message. They exist so
/// the backend layer can report *what* went wrong for operator logs.
#[derive(Error, Debug)]
pub enum GuideError {
    /// Low-level HTTP transport failure (connection refused, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// JSON parsing failed at the serde level.
    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    /// The provider returned a non-success status code.
    #[error("HTTP {status}: {body}")]
    Http {
        /// HTTP status code (e.g. 401, 429, 500).
        status: u16,
        /// Response body text.
        body: String,
    },

    /// No API key was configured; every call fails until one is set.
    #[error("no API key configured (set GEMINI_API_KEY)")]
    MissingApiKey,

    /// The provider answered 2xx but the payload had no usable candidate.
    #[error("response contained no candidates")]
    EmptyResponse,

    /// Catch-all for other errors.
    #[error("{0}")]
    Other(String),
}

impl From<anyhow::Error> for GuideError {
    fn from(err: anyhow::Error) -> Self {
        GuideError::Other(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, GuideError>;
