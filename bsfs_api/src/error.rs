use thiserror::Error;

/// Failure of a call through the [`Api`][`crate::Api`] facade.
#[derive(Debug, Error)]
pub enum ApiError
{
    /// The backend has no such object.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The backend refused to show the object.
    #[error("Access denied: {0}")]
    Forbidden(String),

    /// The request could not be sent or its response not received.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with an unexpected status code.
    #[error("Server error {status}: {message}")]
    Status{status: u16, message: String},

    /// The response body was not what the endpoint documents.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The access token cannot be sent as a header value.
    #[error("Invalid access token")]
    InvalidToken(#[from] reqwest::header::InvalidHeaderValue),

    /// The operation does not exist for this kind of object.
    #[error("Not supported: {0}")]
    Unsupported(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ApiError
{
    /// Whether the object is missing or hidden,
    /// as opposed to the backend being unreachable or misbehaving.
    pub fn is_not_found(&self) -> bool
    {
        matches!(self, Self::NotFound(_) | Self::Forbidden(_))
    }
}

/// Result type for facade calls.
pub type Result<T> = std::result::Result<T, ApiError>;
