use pageforge_token_core::{SigningKey, TokenError, TokenTimeConfig};

use crate::mint::RenderAccess;
use crate::payload::Tier;

/// Environment variable overriding the delivery endpoint base URL.
pub const DELIVERY_URL_ENV_VAR: &str = "PAGEFORGE_DELIVERY_URL";

/// Fallback delivery endpoint used when [`DELIVERY_URL_ENV_VAR`] is unset.
pub const DEFAULT_DELIVERY_BASE_URL: &str = "http://localhost:8080/render";

/// Builder for fully qualified render URLs.
///
/// Composes the token issuer with the delivery endpoint template: scope and
/// resource become path segments, the token rides as a query parameter. No
/// validation happens here beyond what the issuer performs.
///
/// # Example
/// ```rust
/// use pageforge_render_token::{RenderUrlBuilder, Tier};
/// use pageforge_token_core::SigningKey;
///
/// let key = SigningKey::from_bytes(b"test-secret".to_vec());
///
/// let url = RenderUrlBuilder::new("fam-123", "page-7")
///     .tier(Tier::Pro)
///     .base_url("https://render.pageforge.dev/render")
///     .build(&key)
///     .unwrap();
///
/// assert!(url.starts_with("https://render.pageforge.dev/render/fam-123/page-7?token="));
/// ```
pub struct RenderUrlBuilder {
    base_url: String,
    scope_id: String,
    resource_id: String,
    tier: Tier,
    time_config: TokenTimeConfig,
}

impl RenderUrlBuilder {
    /// Creates a new render URL builder against the configured delivery
    /// base.
    pub fn new(scope_id: &str, resource_id: &str) -> Self {
        Self {
            base_url: delivery_base_url(),
            scope_id: scope_id.to_string(),
            resource_id: resource_id.to_string(),
            tier: Tier::default(),
            time_config: TokenTimeConfig::default(),
        }
    }

    /// Selects the access tier (default `standard`).
    pub fn tier(mut self, tier: Tier) -> Self {
        self.tier = tier;
        self
    }

    /// Overrides the delivery endpoint base URL.
    pub fn base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Overrides the token time configuration.
    pub fn time_config(mut self, time_config: TokenTimeConfig) -> Self {
        self.time_config = time_config;
        self
    }

    /// Issues a token and interpolates the delivery URL.
    ///
    /// # Returns
    /// `{base}/{scopeId}/{resourceId}?token={token}` with percent-encoded
    /// path segments
    pub fn build(self, key: &SigningKey) -> Result<String, TokenError> {
        let token = RenderAccess::new(
            self.scope_id.clone(),
            self.resource_id.clone(),
            self.time_config,
        )
        .tier(self.tier)
        .issue(key)?;

        Ok(format!(
            "{}/{}/{}?token={}",
            self.base_url,
            uri_encode_segment(&self.scope_id),
            uri_encode_segment(&self.resource_id),
            token,
        ))
    }
}

/// Issues a token and builds the delivery URL against the configured base.
pub fn build_render_url(
    scope_id: &str,
    resource_id: &str,
    tier: Tier,
    key: &SigningKey,
) -> Result<String, TokenError> {
    RenderUrlBuilder::new(scope_id, resource_id)
        .tier(tier)
        .build(key)
}

/// Resolves the delivery endpoint base from the environment, falling back
/// to [`DEFAULT_DELIVERY_BASE_URL`].
pub fn delivery_base_url() -> String {
    std::env::var(DELIVERY_URL_ENV_VAR)
        .ok()
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_DELIVERY_BASE_URL.to_string())
        .trim_end_matches('/')
        .to_string()
}

/// Percent-encode a single URL path segment.
fn uri_encode_segment(segment: &str) -> String {
    use std::fmt::Write;
    let mut result = String::with_capacity(segment.len() * 3);
    for c in segment.chars() {
        match c {
            'A'..='Z' | 'a'..='z' | '0'..='9' | '-' | '_' | '.' | '~' => {
                result.push(c);
            }
            _ => {
                // Encode multi-byte characters correctly
                let mut buf = [0u8; 4];
                let encoded = c.encode_utf8(&mut buf);
                for b in encoded.as_bytes() {
                    let _ = write!(result, "%{:02X}", b);
                }
            }
        }
    }
    result
}
