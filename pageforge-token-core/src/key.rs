use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::error::TokenError;

type HmacSha256 = Hmac<Sha256>;

/// Environment variable holding the process-wide signing secret.
pub const SECRET_ENV_VAR: &str = "PAGEFORGE_TOKEN_SECRET";

/// Process-wide HMAC signing secret.
///
/// Loaded once at startup and passed by reference into issuers and
/// verifiers. The secret never appears in tokens or logs, and the key
/// material is zeroed when the key is dropped.
#[derive(Clone)]
pub struct SigningKey(Vec<u8>);

impl SigningKey {
    /// Creates a key from raw secret bytes.
    pub fn from_bytes(secret: impl Into<Vec<u8>>) -> Self {
        Self(secret.into())
    }

    /// Loads the key from [`SECRET_ENV_VAR`].
    ///
    /// An unset or empty variable is a deployment misconfiguration and is
    /// reported as [`TokenError::MissingSecret`]; callers should halt
    /// service readiness rather than retry per request.
    pub fn from_env() -> Result<Self, TokenError> {
        Self::from_env_var(SECRET_ENV_VAR)
    }

    /// Loads the key from a specific environment variable.
    pub fn from_env_var(var: &str) -> Result<Self, TokenError> {
        match std::env::var(var) {
            Ok(value) if !value.is_empty() => Ok(Self(value.into_bytes())),
            _ => Err(TokenError::MissingSecret {
                var: var.to_string(),
            }),
        }
    }

    /// Computes the hex-encoded HMAC-SHA256 signature over `data`.
    pub fn sign(&self, data: &[u8]) -> String {
        // Per RFC 2104, HMAC accepts keys of any length
        let mut mac = HmacSha256::new_from_slice(&self.0).expect("HMAC key should be valid");
        mac.update(data);
        hex::encode(mac.finalize().into_bytes())
    }

    /// Verifies a hex-encoded signature over `data`.
    ///
    /// Uses constant-time comparison to prevent timing attacks.
    pub fn verify(&self, data: &[u8], signature_hex: &str) -> bool {
        let expected = self.sign(data);
        bool::from(expected.as_bytes().ct_eq(signature_hex.as_bytes()))
    }
}

impl Drop for SigningKey {
    fn drop(&mut self) {
        // Zeroize on drop
        self.0.iter_mut().for_each(|b| *b = 0);
    }
}
