use std::fmt;

/// Custom error type for connector operations
#[derive(Debug)]
pub enum ConnectorError {
    /// HTTP transport failed before a response was received
    Http(reqwest::Error),
    /// Calendly API returned an error response; the vendor message is kept verbatim
    Upstream { status: u16, message: String },
    /// Continuation token could not be decoded; it is never partially honored
    MalformedContinuation(String),
    /// Membership role outside the closed {user, admin, owner} vocabulary
    InvalidRoleData { role: String },
    /// Mutation called with the wrong principal or entitlement shape
    InvalidArgument(String),
    /// Revoke target does not exist upstream
    NotFound(String),
    /// Ambiguous upstream state that must not be guessed at
    Internal(String),
    /// JSON parsing error
    Json(String),
    /// Credential or configuration error
    Config(String),
}

impl fmt::Display for ConnectorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectorError::Http(e) => write!(f, "HTTP request failed: {}", e),
            ConnectorError::Upstream { status, message } => {
                write!(f, "API error (status {}): {}", status, message)
            }
            ConnectorError::MalformedContinuation(msg) => {
                write!(f, "malformed continuation token: {}", msg)
            }
            ConnectorError::InvalidRoleData { role } => {
                write!(f, "role '{}' is not a known organization role", role)
            }
            ConnectorError::InvalidArgument(msg) => write!(f, "invalid argument: {}", msg),
            ConnectorError::NotFound(msg) => write!(f, "not found: {}", msg),
            ConnectorError::Internal(msg) => write!(f, "internal error: {}", msg),
            ConnectorError::Json(msg) => write!(f, "JSON error: {}", msg),
            ConnectorError::Config(msg) => write!(f, "configuration error: {}", msg),
        }
    }
}

impl std::error::Error for ConnectorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConnectorError::Http(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ConnectorError {
    fn from(err: reqwest::Error) -> Self {
        ConnectorError::Http(err)
    }
}

impl From<serde_json::Error> for ConnectorError {
    fn from(err: serde_json::Error) -> Self {
        ConnectorError::Json(err.to_string())
    }
}

/// Result type alias for connector operations
pub type Result<T> = std::result::Result<T, ConnectorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_error_display() {
        let err = ConnectorError::Upstream {
            status: 403,
            message: "Access denied".to_string(),
        };
        assert!(err.to_string().contains("403"));
        assert!(err.to_string().contains("Access denied"));
    }

    #[test]
    fn test_malformed_continuation_display() {
        let err = ConnectorError::MalformedContinuation("expected value".to_string());
        assert!(err.to_string().contains("malformed continuation token"));
        assert!(err.to_string().contains("expected value"));
    }

    #[test]
    fn test_invalid_role_display() {
        let err = ConnectorError::InvalidRoleData {
            role: "superadmin".to_string(),
        };
        assert!(err.to_string().contains("superadmin"));
    }

    #[test]
    fn test_not_found_display() {
        let err = ConnectorError::NotFound("user not found in organization".to_string());
        assert!(err.to_string().contains("user not found in organization"));
    }

    #[test]
    fn test_internal_display() {
        let err = ConnectorError::Internal("multiple memberships match".to_string());
        assert!(err.to_string().contains("multiple memberships match"));
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err: ConnectorError = json_err.into();
        match err {
            ConnectorError::Json(msg) => assert!(!msg.is_empty()),
            _ => panic!("Expected ConnectorError::Json"),
        }
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        // Verify ConnectorError is Send + Sync for async usage
        assert_send_sync::<ConnectorError>();
    }

    #[test]
    fn test_error_source() {
        use std::error::Error;
        // For non-Http variants, source() should return None
        let err = ConnectorError::Config("missing token".to_string());
        assert!(err.source().is_none());
    }
}
