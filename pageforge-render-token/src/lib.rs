//! # Pageforge Render Token
//!
//! Render-access token implementation for the Pageforge delivery pipeline.
//!
//! This crate issues and verifies the signed, short-lived tokens that gate
//! the per-resource rendering endpoint. Presenting a valid token IS the
//! authorization -- the consuming endpoint only confirms that the decoded
//! scope and resource match the path it is serving, and treats any
//! rejection as unauthorized rather than not-found.
//!
//! ## Token shape
//!
//! ```text
//! base64url( <canonical-JSON-claims> . <hex HMAC-SHA256> )
//! ```
//!
//! The signature covers the exact JSON byte sequence of the claims. Tokens
//! are valid for 60 seconds from issuance and are never stored or revoked;
//! the short window substitutes for revocation.
//!
//! ## Example
//! ```rust
//! use pageforge_render_token::{build_render_url, verify_token, Tier};
//! use pageforge_token_core::SigningKey;
//!
//! // In production the key comes from SigningKey::from_env()
//! let key = SigningKey::from_bytes(b"test-secret".to_vec());
//!
//! let url = build_render_url("fam-123", "page-7", Tier::Pro, &key)
//!     .expect("Failed to build render URL");
//!
//! // On the receiving endpoint:
//! let token = url.rsplit_once("?token=").unwrap().1;
//! let claims = verify_token(token, &key).expect("Fresh token should verify");
//! assert_eq!(claims.resource_id, "page-7");
//! ```

mod mint;
mod payload;
mod url;
mod verify;

pub use mint::{create_token, create_token_with_time, RenderAccess};
pub use payload::{RenderClaims, Tier};
pub use url::{
    build_render_url, delivery_base_url, RenderUrlBuilder, DEFAULT_DELIVERY_BASE_URL,
    DELIVERY_URL_ENV_VAR,
};
pub use verify::{verify_token, AccessVerifier};

// Re-export commonly needed types from core
pub use pageforge_token_core::{
    decode_token, encode_token, SigningKey, TokenError, TokenTimeConfig, DEFAULT_MAX_AGE_MS,
};
