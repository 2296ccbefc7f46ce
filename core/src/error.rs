//! Error types for the RAG HH API client.
//!
//! # Design
//! Three failure classes: the transport could not complete the exchange, the
//! server answered with a non-2xx status, or a 2xx body was not the expected
//! JSON. A failed status keeps only the human-readable message the server
//! reported (its `detail` field, or the reason phrase); `Display` renders
//! that message verbatim so callers can show it directly.

/// Errors returned by `ApiClient` parse methods and the `Api` facade.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response (connection refused, DNS, ...).
    #[error("{0}")]
    Transport(String),

    /// The server returned a non-2xx status.
    #[error("{message}")]
    Status { status: u16, message: String },

    /// A successful response body could not be decoded.
    #[error("deserialization failed: {0}")]
    Decode(String),
}

impl ApiError {
    /// The HTTP status, for `Status` errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_displays_message_only() {
        let err = ApiError::Status {
            status: 400,
            message: "Query is empty".to_string(),
        };
        assert_eq!(err.to_string(), "Query is empty");
        assert_eq!(err.status(), Some(400));
    }

    #[test]
    fn decode_error_wraps_serde_message() {
        let err: ApiError = serde_json::from_str::<serde_json::Value>("not json")
            .unwrap_err()
            .into();
        assert!(matches!(err, ApiError::Decode(_)));
        assert_eq!(err.status(), None);
    }
}
