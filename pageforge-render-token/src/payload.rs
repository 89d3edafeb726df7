use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use pageforge_token_core::TokenError;

/// Access tier selecting the downstream rendering behavior.
///
/// The tier affects rendering quality only; it never widens the scope a
/// token grants.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// Default rendering quality.
    #[default]
    Standard,
    /// Enhanced rendering for paid scopes.
    Pro,
}

impl Tier {
    /// The wire name of this tier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Standard => "standard",
            Tier::Pro => "pro",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tier {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "standard" => Ok(Tier::Standard),
            "pro" => Ok(Tier::Pro),
            other => Err(TokenError::malformed(format!("unknown tier: {other}"))),
        }
    }
}

/// The signed claims embedded in every render-access token.
///
/// Wire format is JSON with camelCase fields:
/// `{"scopeId":..,"resourceId":..,"issuedAtMillis":..,"tier":..}`. The
/// token signature covers the exact byte sequence of that JSON string, not
/// a re-serialized form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderClaims {
    /// Owning collection/tenant identifier.
    pub scope_id: String,
    /// Identifier of the item being accessed.
    pub resource_id: String,
    /// Issuance timestamp in Unix epoch milliseconds, set by the issuer.
    pub issued_at_millis: i64,
    /// Access tier; absent on the wire means `standard`.
    #[serde(default)]
    pub tier: Tier,
}
