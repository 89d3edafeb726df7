use thiserror::Error;

/// Detailed error type for Pageforge token operations with specific failure information
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    // ===== Configuration Errors =====
    /// The signing secret was absent from the process environment
    #[error("Signing secret is not configured: {var} is unset or empty")]
    MissingSecret { var: String },

    // ===== Issuing Errors =====
    /// A payload identifier was empty
    #[error("Token requires a non-empty {field}")]
    EmptyIdentifier { field: &'static str },

    /// Payload serialization failed
    #[error("Failed to serialize token payload: {reason}")]
    Serialization { reason: String },

    // ===== Verification Errors =====
    /// Token cannot be decoded or parsed into a structurally valid payload
    #[error("Malformed token: {reason}")]
    Malformed { reason: String },

    /// Recomputed signature does not match the one the token carries
    #[error("Invalid token signature")]
    SignatureInvalid,

    /// Signature is valid but the token is older than the allowed window
    #[error("Token expired: age {age_ms}ms exceeds the {max_age_ms}ms window")]
    Expired {
        /// Token age at verification time (milliseconds)
        age_ms: i64,
        /// Maximum accepted age (milliseconds)
        max_age_ms: i64,
    },
}

impl TokenError {
    // ===== Helper Methods for Common Error Checks =====

    /// Check if this error is due to token expiration
    pub fn is_expired(&self) -> bool {
        matches!(self, TokenError::Expired { .. })
    }

    /// Check if this error is a signature mismatch
    pub fn is_signature_error(&self) -> bool {
        matches!(self, TokenError::SignatureInvalid)
    }

    /// Check if this error is due to a structurally invalid token
    pub fn is_malformed(&self) -> bool {
        matches!(self, TokenError::Malformed { .. })
    }

    /// Check if this error reflects a deployment misconfiguration
    pub fn is_configuration_error(&self) -> bool {
        matches!(self, TokenError::MissingSecret { .. })
    }

    /// Get the token age if this is an expiration error
    pub fn get_age_ms(&self) -> Option<i64> {
        match self {
            TokenError::Expired { age_ms, .. } => Some(*age_ms),
            _ => None,
        }
    }

    // ===== Constructor Helper Methods =====

    /// Create a malformed-token error
    pub fn malformed<S: Into<String>>(reason: S) -> Self {
        TokenError::Malformed {
            reason: reason.into(),
        }
    }
}

impl From<base64::DecodeError> for TokenError {
    fn from(err: base64::DecodeError) -> Self {
        TokenError::Malformed {
            reason: err.to_string(),
        }
    }
}

impl From<std::string::FromUtf8Error> for TokenError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        TokenError::Malformed {
            reason: err.to_string(),
        }
    }
}
