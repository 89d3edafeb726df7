use tracing::debug;

use pageforge_token_core::{encode_token, now_millis, SigningKey, TokenError, TokenTimeConfig};

use crate::payload::{RenderClaims, Tier};

/// Builder for issuing render-access tokens with flexible configuration.
///
/// A token grants time-bounded access to a single resource at a specific
/// tier. Presenting the token IS the authorization; the consuming endpoint
/// only has to confirm that the decoded scope and resource match the path
/// it is serving.
///
/// # Example
/// ```rust
/// use pageforge_render_token::{RenderAccess, Tier};
/// use pageforge_token_core::{SigningKey, TokenTimeConfig};
///
/// let key = SigningKey::from_bytes(b"test-secret".to_vec());
///
/// let token = RenderAccess::new(
///     "fam-123".to_string(),
///     "page-7".to_string(),
///     TokenTimeConfig::default(),
/// )
/// .tier(Tier::Pro)
/// .issue(&key)
/// .expect("Failed to issue token");
/// ```
pub struct RenderAccess {
    scope_id: String,
    resource_id: String,
    tier: Tier,
    time_config: TokenTimeConfig,
}

impl RenderAccess {
    /// Creates a new render-access token builder with the default tier.
    ///
    /// # Arguments
    /// * `scope_id` - The owning collection/tenant identifier
    /// * `resource_id` - The item identifier to grant access to
    /// * `time_config` - Time configuration for token validity
    pub fn new(scope_id: String, resource_id: String, time_config: TokenTimeConfig) -> Self {
        Self {
            scope_id,
            resource_id,
            tier: Tier::default(),
            time_config,
        }
    }

    /// Selects the access tier (default `standard`).
    pub fn tier(mut self, tier: Tier) -> Self {
        self.tier = tier;
        self
    }

    /// Issues (serializes and signs) the token.
    ///
    /// The HMAC-SHA256 signature covers the exact JSON byte sequence of the
    /// claims; payload and hex signature are joined with `.` and the whole
    /// string is encoded as URL-safe, unpadded base64.
    ///
    /// # Arguments
    /// * `key` - The signing key
    ///
    /// # Returns
    /// URL-safe base64 token string
    pub fn issue(self, key: &SigningKey) -> Result<String, TokenError> {
        if self.scope_id.is_empty() {
            return Err(TokenError::EmptyIdentifier { field: "scope_id" });
        }
        if self.resource_id.is_empty() {
            return Err(TokenError::EmptyIdentifier { field: "resource_id" });
        }

        let issued_at_millis = self.time_config.start_time.unwrap_or_else(now_millis);

        let claims = RenderClaims {
            scope_id: self.scope_id,
            resource_id: self.resource_id,
            issued_at_millis,
            tier: self.tier,
        };

        let payload = serde_json::to_string(&claims).map_err(|e| TokenError::Serialization {
            reason: e.to_string(),
        })?;
        let signature = key.sign(payload.as_bytes());

        debug!(
            scope_id = %claims.scope_id,
            resource_id = %claims.resource_id,
            tier = %claims.tier,
            "issued render-access token"
        );

        Ok(encode_token(&format!("{payload}.{signature}")))
    }
}

/// Issues a render-access token with the default time configuration
/// (60-second window).
pub fn create_token(
    scope_id: String,
    resource_id: String,
    tier: Tier,
    key: &SigningKey,
) -> Result<String, TokenError> {
    RenderAccess::new(scope_id, resource_id, TokenTimeConfig::default())
        .tier(tier)
        .issue(key)
}

/// Issues a render-access token with a custom time configuration.
pub fn create_token_with_time(
    scope_id: String,
    resource_id: String,
    tier: Tier,
    key: &SigningKey,
    time_config: TokenTimeConfig,
) -> Result<String, TokenError> {
    RenderAccess::new(scope_id, resource_id, time_config)
        .tier(tier)
        .issue(key)
}
