use thiserror::Error;

/// Failure of a single catalog request.
///
/// Callers show one plain message per operation; the variants exist for
/// logging and tests.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The configured base URL could not be used to build a request.
    #[error("invalid url: {0}")]
    InvalidUrl(String),

    /// Connection refused, DNS failure, TLS error and the like.
    #[error("network error: {0}")]
    Network(String),

    /// The request exceeded its timeout.
    #[error("request timed out")]
    Timeout,

    /// The backend answered with a non-success status.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body did not match the expected shape.
    #[error("parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for CatalogError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_decode() {
            Self::Parse(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}
