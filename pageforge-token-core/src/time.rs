use chrono::Utc;

/// Default validity window for render-access tokens: 60 seconds.
pub const DEFAULT_MAX_AGE_MS: i64 = 60_000;

/// Time configuration for token issuance and verification.
///
/// `start_time` exists for tests and backdating tools; the issuing
/// conveniences leave it `None` so the timestamp always comes from the
/// system clock at signing time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenTimeConfig {
    /// Issuance timestamp override in Unix epoch milliseconds.
    /// `None` means the system clock at signing time.
    pub start_time: Option<i64>,
    /// Maximum accepted token age in milliseconds.
    pub max_age_ms: i64,
}

impl Default for TokenTimeConfig {
    fn default() -> Self {
        Self {
            start_time: None,
            max_age_ms: DEFAULT_MAX_AGE_MS,
        }
    }
}

/// Current time in Unix epoch milliseconds.
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}
