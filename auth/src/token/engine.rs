use std::sync::Arc;

use chrono::DateTime;
use chrono::Duration;
use chrono::SubsecRound;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::clock::Clock;
use super::clock::SystemClock;
use super::config::TokenConfig;
use super::errors::TokenError;

const RECOMMENDED_SECRET_BYTES: usize = 32;

/// A freshly signed token together with the instants it was derived from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub token: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// Issues and validates HS256 bearer tokens under a single symmetric secret.
///
/// Holds only immutable configuration, so one instance can be shared
/// across threads behind an `Arc`.
pub struct TokenEngine {
    config: TokenConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    clock: Arc<dyn Clock>,
}

impl TokenEngine {
    /// Create an engine reading time from the system clock.
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(config: TokenConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Create an engine reading time from the given clock.
    pub fn with_clock(config: TokenConfig, clock: Arc<dyn Clock>) -> Self {
        if config.secret.len() < RECOMMENDED_SECRET_BYTES {
            tracing::warn!(
                secret_bytes = config.secret.len(),
                recommended_bytes = RECOMMENDED_SECRET_BYTES,
                "Token secret is shorter than recommended"
            );
        }

        Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            algorithm: Algorithm::HS256,
            config,
            clock,
        }
    }

    /// Configured lifetime of issued tokens.
    pub fn expiration_window(&self) -> Duration {
        self.config
            .expiration_window()
            .unwrap_or(Duration::MAX)
    }

    /// Issue a signed token whose subject is `login`.
    ///
    /// # Errors
    /// * `Configuration` - Secret is empty or the window overflows the timestamp range
    /// * `EncodingFailed` - Signing failed
    pub fn issue(&self, login: &str) -> Result<IssuedToken, TokenError> {
        self.ensure_secret()?;

        let window = self.config.expiration_window().ok_or_else(|| {
            TokenError::Configuration("JWT expiration window is out of range".to_string())
        })?;

        let issued_at = self.clock.now().trunc_subsecs(3);
        let expires_at = issued_at.checked_add_signed(window).ok_or_else(|| {
            TokenError::Configuration("JWT expiration window is out of range".to_string())
        })?;

        let claims = Claims::for_login(login, issued_at, expires_at);
        let token = encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))?;

        Ok(IssuedToken {
            token,
            issued_at,
            expires_at,
        })
    }

    /// Run the full validation pipeline and return the claims.
    ///
    /// Stages run in order and stop at the first failure: structure,
    /// signature, expiration.
    ///
    /// # Errors
    /// * `Configuration` - Secret is empty
    /// * `MalformedToken` - Token is empty, not three segments, or not decodable
    /// * `InvalidSignature` - Signature does not match the configured secret
    /// * `TokenExpired` - Current time is at or past `exp`
    pub fn validate(&self, token: &str) -> Result<Claims, TokenError> {
        self.ensure_secret()?;

        let claims = self.decode_structure(token)?;
        self.verify_signature(token)?;

        if claims.is_expired(self.clock.now()) {
            return Err(TokenError::TokenExpired);
        }

        Ok(claims)
    }

    /// Validate a token and return its subject.
    pub fn decode_subject(&self, token: &str) -> Result<String, TokenError> {
        self.validate(token).map(|claims| claims.sub)
    }

    /// Validate a token and return its expiration instant.
    pub fn decode_expiration(&self, token: &str) -> Result<DateTime<Utc>, TokenError> {
        self.validate(token).map(|claims| claims.exp)
    }

    /// True iff the token passes validation and was issued to `expected_login`.
    ///
    /// Never fails; use [`TokenEngine::validate`] to learn why a token was rejected.
    pub fn is_valid(&self, token: &str, expected_login: &str) -> bool {
        match self.validate(token) {
            Ok(claims) => claims.sub == expected_login,
            Err(e) => {
                tracing::debug!(error = %e, "Token rejected");
                false
            }
        }
    }

    fn ensure_secret(&self) -> Result<(), TokenError> {
        if self.config.secret.is_empty() {
            return Err(TokenError::Configuration(
                "JWT secret is not configured".to_string(),
            ));
        }
        Ok(())
    }

    /// Validation that leaves every registered claim alone.
    ///
    /// Expiration is checked against the injected clock after the signature;
    /// `aud`, `iss` and `nbf` are not part of this token format.
    fn claims_agnostic_validation(&self) -> Validation {
        let mut validation = Validation::new(self.algorithm);
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();
        validation
    }

    /// Structural stage: decode header and claims without checking the signature.
    fn decode_structure(&self, token: &str) -> Result<Claims, TokenError> {
        if token.is_empty() {
            return Err(TokenError::MalformedToken("token is empty".to_string()));
        }

        let segments = token.split('.').count();
        if segments != 3 {
            return Err(TokenError::MalformedToken(format!(
                "expected 3 segments, found {}",
                segments
            )));
        }

        let mut validation = self.claims_agnostic_validation();
        validation.insecure_disable_signature_validation();

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| TokenError::MalformedToken(e.to_string()))
    }

    /// Signature stage: recompute the HMAC over header and payload.
    fn verify_signature(&self, token: &str) -> Result<(), TokenError> {
        let validation = self.claims_agnostic_validation();

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|_| ())
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                    TokenError::InvalidSignature
                }
                _ => TokenError::MalformedToken(e.to_string()),
            })
    }
}
