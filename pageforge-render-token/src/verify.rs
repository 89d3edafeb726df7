use tracing::{debug, warn};

use pageforge_token_core::{decode_token, now_millis, SigningKey, TokenError, TokenTimeConfig};

use crate::payload::RenderClaims;

/// Separator between the JSON payload and its hex signature.
const SEPARATOR: char = '.';

/// Builder for verifying render-access tokens with flexible configuration.
///
/// Checks run in order: decode, signature, payload structure, age. On
/// success the decoded claims are returned; matching them against the
/// requested resource stays the caller's responsibility.
///
/// # Example
/// ```rust
/// use pageforge_render_token::{create_token, AccessVerifier, Tier};
/// use pageforge_token_core::SigningKey;
///
/// let key = SigningKey::from_bytes(b"test-secret".to_vec());
/// let token = create_token("fam-123".to_string(), "page-7".to_string(), Tier::Pro, &key)
///     .expect("Failed to issue token");
///
/// let claims = AccessVerifier::new(token, &key)
///     .verify()
///     .expect("Fresh token should verify");
/// assert_eq!(claims.scope_id, "fam-123");
/// ```
pub struct AccessVerifier<'a> {
    token: String,
    key: &'a SigningKey,
    now: Option<i64>,
    max_age_ms: i64,
}

impl<'a> AccessVerifier<'a> {
    /// Creates a new verifier for the given token and signing key.
    pub fn new(token: String, key: &'a SigningKey) -> Self {
        Self {
            token,
            key,
            now: None,
            max_age_ms: TokenTimeConfig::default().max_age_ms,
        }
    }

    /// Overrides the verification timestamp (Unix epoch milliseconds).
    ///
    /// Defaults to the system clock.
    pub fn verified_at(mut self, now_millis: i64) -> Self {
        self.now = Some(now_millis);
        self
    }

    /// Overrides the maximum accepted token age in milliseconds.
    pub fn max_age(mut self, max_age_ms: i64) -> Self {
        self.max_age_ms = max_age_ms;
        self
    }

    /// Performs the token verification with the configured parameters.
    pub fn verify(self) -> Result<RenderClaims, TokenError> {
        let signed = decode_token(&self.token)?;

        // The payload may contain `.` inside JSON string values, so the
        // signature is always the suffix after the last separator.
        let (payload, signature) =
            signed
                .rsplit_once(SEPARATOR)
                .ok_or_else(|| TokenError::Malformed {
                    reason: "token has no payload/signature separator".to_string(),
                })?;

        if !self.key.verify(payload.as_bytes(), signature) {
            return Err(TokenError::SignatureInvalid);
        }

        let claims: RenderClaims = serde_json::from_str(payload)
            .map_err(|e| TokenError::malformed(e.to_string()))?;

        let now = self.now.unwrap_or_else(now_millis);
        let age_ms = now - claims.issued_at_millis;
        // One-sided check: a token dated in the future (issuer clock ahead
        // of ours) is accepted rather than turning clock drift into
        // rejections.
        if age_ms > self.max_age_ms {
            return Err(TokenError::Expired {
                age_ms,
                max_age_ms: self.max_age_ms,
            });
        }

        Ok(claims)
    }
}

/// Verifies a token, collapsing every rejection into `None`.
///
/// This is the contract consuming endpoints use on their request path:
/// callers cannot distinguish a forged token from an expired one through
/// the return value, while the rejection cause is still logged for
/// diagnosis.
pub fn verify_token(token: &str, key: &SigningKey) -> Option<RenderClaims> {
    match AccessVerifier::new(token.to_string(), key).verify() {
        Ok(claims) => Some(claims),
        Err(err @ (TokenError::SignatureInvalid | TokenError::Expired { .. })) => {
            warn!("render-access token rejected: {err}");
            None
        }
        Err(err) => {
            debug!("render-access token rejected: {err}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mint::{create_token, create_token_with_time};
    use crate::payload::Tier;
    use pageforge_token_core::{encode_token, DEFAULT_MAX_AGE_MS};

    const T0: i64 = 1_700_000_000_000;

    fn test_key() -> SigningKey {
        SigningKey::from_bytes(b"test-secret".to_vec())
    }

    fn issue_at(t0: i64, key: &SigningKey) -> String {
        create_token_with_time(
            "fam-123".to_string(),
            "page-7".to_string(),
            Tier::Pro,
            key,
            TokenTimeConfig {
                start_time: Some(t0),
                ..TokenTimeConfig::default()
            },
        )
        .expect("Failed to issue token")
    }

    #[test]
    fn test_signature_tamper_rejected() {
        let key = test_key();
        let signed = decode_token(&issue_at(T0, &key)).unwrap();
        let (payload, signature) = signed.rsplit_once(SEPARATOR).unwrap();

        // Flip a single signature character
        let flipped = if signature.ends_with('0') { "1" } else { "0" };
        let tampered = format!("{}{}", &signature[..signature.len() - 1], flipped);
        let forged = encode_token(&format!("{payload}.{tampered}"));

        let result = AccessVerifier::new(forged, &key)
            .verified_at(T0 + 500)
            .verify();
        assert_eq!(result, Err(TokenError::SignatureInvalid));
    }

    #[test]
    fn test_payload_tamper_rejected() {
        let key = test_key();
        let signed = decode_token(&issue_at(T0, &key)).unwrap();
        let (payload, signature) = signed.rsplit_once(SEPARATOR).unwrap();

        // Swap the resource while keeping the original signature
        let tampered_payload = payload.replace("page-7", "page-8");
        assert_ne!(tampered_payload, payload);
        let forged = encode_token(&format!("{tampered_payload}.{signature}"));

        let result = AccessVerifier::new(forged, &key)
            .verified_at(T0 + 500)
            .verify();
        assert_eq!(result, Err(TokenError::SignatureInvalid));
    }

    #[test]
    fn test_expiry_boundary() {
        let key = test_key();
        let token = issue_at(T0, &key);

        // One inside the window
        assert!(
            AccessVerifier::new(token.clone(), &key)
                .verified_at(T0 + DEFAULT_MAX_AGE_MS - 1)
                .verify()
                .is_ok(),
            "Age 59999ms should be accepted"
        );

        // Exactly at the window
        assert!(
            AccessVerifier::new(token.clone(), &key)
                .verified_at(T0 + DEFAULT_MAX_AGE_MS)
                .verify()
                .is_ok(),
            "Age exactly at the window should be accepted"
        );

        // One past the window
        let result = AccessVerifier::new(token, &key)
            .verified_at(T0 + DEFAULT_MAX_AGE_MS + 1)
            .verify();
        assert_eq!(
            result,
            Err(TokenError::Expired {
                age_ms: DEFAULT_MAX_AGE_MS + 1,
                max_age_ms: DEFAULT_MAX_AGE_MS,
            })
        );
    }

    #[test]
    fn test_future_dated_token_accepted() {
        let key = test_key();
        let token = issue_at(T0, &key);

        // Verifier clock five seconds behind the issuer clock
        let claims = AccessVerifier::new(token, &key)
            .verified_at(T0 - 5_000)
            .verify()
            .expect("Future-dated token should be accepted");
        assert_eq!(claims.issued_at_millis, T0);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let key_a = SigningKey::from_bytes(b"secret-a".to_vec());
        let key_b = SigningKey::from_bytes(b"secret-b".to_vec());
        let token = issue_at(T0, &key_a);

        let result = AccessVerifier::new(token, &key_b)
            .verified_at(T0 + 500)
            .verify();
        assert_eq!(result, Err(TokenError::SignatureInvalid));
    }

    #[test]
    fn test_custom_max_age() {
        let key = test_key();
        let token = issue_at(T0, &key);

        let result = AccessVerifier::new(token, &key)
            .verified_at(T0 + 10_000)
            .max_age(5_000)
            .verify();
        assert!(result.unwrap_err().is_expired());
    }

    #[test]
    fn test_malformed_inputs_rejected_without_panicking() {
        let key = test_key();

        for input in ["", "not-a-token", "!!!not base64!!!", "YWJjZGVm"] {
            let result = AccessVerifier::new(input.to_string(), &key).verify();
            assert!(
                result.as_ref().is_err_and(|e| e.is_malformed()),
                "Input {input:?} should be rejected as malformed, got {result:?}"
            );
        }
    }

    #[test]
    fn test_truncated_token_rejected() {
        let key = test_key();
        let token = issue_at(T0, &key);

        let truncated = &token[..token.len() / 2];
        let result = AccessVerifier::new(truncated.to_string(), &key).verify();
        assert!(result.is_err(), "Truncated token should be rejected");
    }

    #[test]
    fn test_garbage_payload_with_valid_signature_is_malformed() {
        let key = test_key();
        let payload = r#"{"unexpected":true}"#;
        let signature = key.sign(payload.as_bytes());
        let token = encode_token(&format!("{payload}.{signature}"));

        let result = AccessVerifier::new(token, &key).verify();
        assert!(result.unwrap_err().is_malformed());
    }

    #[test]
    fn test_concrete_scenario() {
        let key = test_key();
        let token = issue_at(T0, &key);

        let claims = AccessVerifier::new(token.clone(), &key)
            .verified_at(T0 + 10_000)
            .verify()
            .expect("Token should verify 10s after issuance");
        assert_eq!(claims.scope_id, "fam-123");
        assert_eq!(claims.resource_id, "page-7");
        assert_eq!(claims.tier, Tier::Pro);
        assert_eq!(claims.issued_at_millis, T0);

        let result = AccessVerifier::new(token, &key)
            .verified_at(T0 + 65_000)
            .verify();
        assert!(
            result.unwrap_err().is_expired(),
            "Token should be expired 65s after issuance"
        );
    }

    #[test]
    fn test_verify_token_collapses_rejections() {
        let key = test_key();

        // Fresh token passes
        let token = create_token("fam-123".to_string(), "page-7".to_string(), Tier::Pro, &key)
            .expect("Failed to issue token");
        assert!(verify_token(&token, &key).is_some());

        // Wrong secret, expired, and garbage all collapse to None
        let other_key = SigningKey::from_bytes(b"other-secret".to_vec());
        assert!(verify_token(&token, &other_key).is_none());

        let expired = issue_at(now_millis() - 65_000, &key);
        assert!(verify_token(&expired, &key).is_none());

        assert!(verify_token("garbage", &key).is_none());
    }
}
