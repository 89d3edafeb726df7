use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};

use crate::error::TokenError;

/// Encodes a signed payload string as URL-safe, unpadded base64.
///
/// The result is safe to place directly in a query string.
pub fn encode_token(signed: &str) -> String {
    URL_SAFE_NO_PAD.encode(signed.as_bytes())
}

/// Decodes a token back into its signed payload string.
///
/// Fails as [`TokenError::Malformed`] when the input is not valid URL-safe
/// base64 or does not decode to UTF-8.
pub fn decode_token(token: &str) -> Result<String, TokenError> {
    let bytes = URL_SAFE_NO_PAD.decode(token.trim())?;
    Ok(String::from_utf8(bytes)?)
}
