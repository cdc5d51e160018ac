use reqwest::StatusCode;
use thiserror::Error;

/// Errors that can occur when interacting with the Atlan API
#[derive(Error, Debug)]
pub enum AtlanError {
    /// Invalid request parameters or malformed request
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Authentication failed due to an invalid or missing API token
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Rate limit exceeded, retry after waiting
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Requested endpoint does not exist on the server
    #[error("Endpoint not found: {0}")]
    EndpointNotFound(String),

    /// API server encountered an internal error
    #[error("API server error ({status}): {body}")]
    ServerError {
        /// HTTP status code returned by the server
        status: u16,
        /// Raw response body, as far as it could be read
        body: String,
    },

    /// Network error occurred during a request
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    /// JSON serialization or deserialization error
    #[error("JSON serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// A caller-supplied reference did not resolve in its namespace
    #[error("{namespace} {kind} \"{value}\" was not found")]
    Validation {
        /// Namespace the lookup ran against (e.g. "classification", "role")
        namespace: &'static str,
        /// Which key failed to resolve ("id" or "name")
        kind: &'static str,
        /// The offending value
        value: String,
    },

    /// Unknown error occurred
    #[error("Unknown error ({status}): {body}")]
    Unknown {
        /// HTTP status code returned by the server
        status: u16,
        /// Raw response body
        body: String,
    },
}

impl AtlanError {
    /// Returns true if this error is transient and a retry could succeed
    ///
    /// Transient errors include rate limiting, server errors (5xx) and
    /// network failures. Authentication and validation failures are
    /// permanent.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            AtlanError::RateLimitExceeded
                | AtlanError::ServerError { .. }
                | AtlanError::NetworkError(_)
        )
    }

    /// Create an error from an HTTP status code and response body
    ///
    /// Maps status codes onto the error taxonomy:
    /// - 400: invalid request
    /// - 401, 403: authentication failed
    /// - 404: endpoint not found
    /// - 429: rate limit exceeded
    /// - 5xx: server error
    pub fn from_status(status: StatusCode, body: String) -> Self {
        match status {
            StatusCode::BAD_REQUEST => AtlanError::InvalidRequest(body),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                AtlanError::AuthenticationFailed(body)
            }
            StatusCode::NOT_FOUND => AtlanError::EndpointNotFound(body),
            StatusCode::TOO_MANY_REQUESTS => AtlanError::RateLimitExceeded,
            status if status.is_server_error() => AtlanError::ServerError {
                status: status.as_u16(),
                body,
            },
            status => AtlanError::Unknown {
                status: status.as_u16(),
                body,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status_mapping() {
        assert!(matches!(
            AtlanError::from_status(StatusCode::BAD_REQUEST, "bad".into()),
            AtlanError::InvalidRequest(_)
        ));
        assert!(matches!(
            AtlanError::from_status(StatusCode::UNAUTHORIZED, "no".into()),
            AtlanError::AuthenticationFailed(_)
        ));
        assert!(matches!(
            AtlanError::from_status(StatusCode::FORBIDDEN, "no".into()),
            AtlanError::AuthenticationFailed(_)
        ));
        assert!(matches!(
            AtlanError::from_status(StatusCode::NOT_FOUND, "gone".into()),
            AtlanError::EndpointNotFound(_)
        ));
        assert!(matches!(
            AtlanError::from_status(StatusCode::TOO_MANY_REQUESTS, String::new()),
            AtlanError::RateLimitExceeded
        ));
        assert!(matches!(
            AtlanError::from_status(StatusCode::BAD_GATEWAY, "oops".into()),
            AtlanError::ServerError { status: 502, .. }
        ));
        assert!(matches!(
            AtlanError::from_status(StatusCode::IM_A_TEAPOT, "tea".into()),
            AtlanError::Unknown { status: 418, .. }
        ));
    }

    #[test]
    fn test_is_transient() {
        assert!(AtlanError::RateLimitExceeded.is_transient());
        assert!(AtlanError::ServerError {
            status: 503,
            body: "unavailable".into()
        }
        .is_transient());

        assert!(!AtlanError::AuthenticationFailed("bad key".into()).is_transient());
        assert!(!AtlanError::InvalidRequest("bad".into()).is_transient());
        assert!(!AtlanError::Validation {
            namespace: "role",
            kind: "id",
            value: "r-1".into()
        }
        .is_transient());
    }

    #[test]
    fn test_validation_error_names_the_value() {
        let err = AtlanError::Validation {
            namespace: "classification",
            kind: "id",
            value: "bad-id".into(),
        };
        assert!(err.to_string().contains("bad-id"));
        assert!(err.to_string().contains("classification"));
    }
}
