use std::fmt;

use chrono::Duration;

/// Immutable token engine settings, supplied once at construction.
#[derive(Clone)]
pub struct TokenConfig {
    /// HMAC signing key. Must be non-empty; 32 bytes or more for HS256.
    pub secret: String,

    /// Lifetime of an issued token in milliseconds.
    pub expiration_millis: u64,
}

impl TokenConfig {
    pub fn new(secret: impl Into<String>, expiration_millis: u64) -> Self {
        Self {
            secret: secret.into(),
            expiration_millis,
        }
    }

    /// Expiration window as a signed duration.
    ///
    /// Returns `None` when the window does not fit in a `chrono::Duration`.
    pub fn expiration_window(&self) -> Option<Duration> {
        i64::try_from(self.expiration_millis)
            .ok()
            .and_then(Duration::try_milliseconds)
    }
}

impl fmt::Debug for TokenConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenConfig")
            .field("secret", &"<redacted>")
            .field("expiration_millis", &self.expiration_millis)
            .finish()
    }
}
