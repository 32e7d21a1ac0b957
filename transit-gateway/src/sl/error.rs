//! SL client error types.

/// Errors from the SL HTTP client.
#[derive(Debug, thiserror::Error)]
pub enum SlError {
    /// HTTP request failed (connection refused, reset, DNS, ...)
    #[error("HTTP error: {0}")]
    Http(#[source] reqwest::Error),

    /// Upstream did not answer within the configured timeout
    #[error("upstream request timed out")]
    Timeout,

    /// Invalid API key or unauthorized
    #[error("unauthorized (invalid API key)")]
    Unauthorized,

    /// API returned an error status code
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// API answered 200 but reported a failure in the response envelope
    #[error("SL status {code}: {message}")]
    Upstream { code: i32, message: String },

    /// JSON deserialization failed
    #[error("JSON parse error: {message}")]
    Json {
        message: String,
        body: Option<String>,
    },

    /// Response envelope carried no data
    #[error("response contained no data")]
    MissingData,
}

impl SlError {
    /// Whether the failure was the upstream taking too long.
    pub fn is_timeout(&self) -> bool {
        matches!(self, SlError::Timeout)
    }
}

impl From<reqwest::Error> for SlError {
    /// The request URL carries the API key, so it is dropped here.
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            SlError::Timeout
        } else {
            SlError::Http(err.without_url())
        }
    }
}
