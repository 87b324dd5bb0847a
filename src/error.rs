//! Error types

/// Error from the blog API.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Request never completed (connection refused, DNS, timeout).
    #[error("HTTP request failed: {0}")]
    Transport(#[from] ureq::Error),

    /// Server answered with a non-success status.
    #[error("HTTP error! status: {status}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, may be empty.
        body: String,
    },

    /// Request body could not be serialized.
    #[error("failed to encode request body: {0}")]
    Encode(serde_json::Error),

    /// Response body did not have the expected shape.
    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    /// Whether the server answered with 404.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::Status { status: 404, .. })
    }
}

/// Crate-level error.
#[derive(Debug, thiserror::Error)]
pub enum FolioError {
    #[error(transparent)]
    Api(#[from] ApiError),

    /// A required form field was blank.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// A submission is already in flight.
    #[error("a submission is already in progress")]
    Busy,
}

pub type Result<T, E = FolioError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_display() {
        let err = ApiError::Status {
            status: 500,
            body: String::new(),
        };
        assert_eq!(err.to_string(), "HTTP error! status: 500");
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_not_found() {
        let err = ApiError::Status {
            status: 404,
            body: "nope".to_string(),
        };
        assert!(err.is_not_found());
        let wrapped: FolioError = err.into();
        assert!(matches!(wrapped, FolioError::Api(_)));
    }
}
