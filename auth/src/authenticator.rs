use std::sync::Arc;

use chrono::DateTime;
use chrono::Utc;

use crate::identity::CredentialStore;
use crate::identity::CredentialStoreError;
use crate::password::PasswordError;
use crate::password::PasswordVerifier;
use crate::token::TokenEngine;
use crate::token::TokenError;

/// Token type reported alongside every issued access token.
pub const TOKEN_TYPE: &str = "Bearer";

/// Authentication coordinator: lookup, active check, password check, token issuance.
///
/// Steps run in that order and the first failure ends the attempt.
pub struct Authenticator<S, V>
where
    S: CredentialStore,
    V: PasswordVerifier,
{
    credential_store: Arc<S>,
    password_verifier: Arc<V>,
    token_engine: Arc<TokenEngine>,
}

/// Result of successful authentication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticationResult {
    /// Signed bearer token
    pub access_token: String,
    /// Always [`TOKEN_TYPE`]
    pub token_type: &'static str,
    pub expires_at: DateTime<Utc>,
}

/// Authentication operation errors.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum AuthenticationError {
    /// Unknown login or wrong password; deliberately indistinguishable.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Account is disabled")]
    AccountDisabled,

    #[error(transparent)]
    CredentialStore(#[from] CredentialStoreError),

    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    #[error("Token error: {0}")]
    Token(#[from] TokenError),
}

impl<S, V> Authenticator<S, V>
where
    S: CredentialStore,
    V: PasswordVerifier,
{
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `credential_store` - Identity lookup by login
    /// * `password_verifier` - Plaintext-against-hash check
    /// * `token_engine` - Issues the token on success
    pub fn new(
        credential_store: Arc<S>,
        password_verifier: Arc<V>,
        token_engine: Arc<TokenEngine>,
    ) -> Self {
        Self {
            credential_store,
            password_verifier,
            token_engine,
        }
    }

    /// Verify credentials and issue a bearer token.
    ///
    /// # Arguments
    /// * `login` - Login, matched case-sensitively
    /// * `password` - Plaintext password to verify
    ///
    /// # Returns
    /// AuthenticationResult with access token, token type and expiration
    ///
    /// # Errors
    /// * `InvalidCredentials` - Login unknown or password does not match
    /// * `AccountDisabled` - Identity has `active` explicitly set to false
    /// * `CredentialStore` - Lookup failed
    /// * `Password` - Stored hash could not be verified against
    /// * `Token` - Token issuance failed (e.g. missing secret)
    pub async fn authenticate(
        &self,
        login: &str,
        password: &str,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        let identity = self
            .credential_store
            .find_by_login(login)
            .await?
            .ok_or_else(|| {
                tracing::debug!(login, "Authentication rejected: unknown login");
                AuthenticationError::InvalidCredentials
            })?;

        // Checked before the password so a disabled account never learns
        // whether its password was right.
        if identity.is_disabled() {
            tracing::debug!(login, "Authentication rejected: account disabled");
            return Err(AuthenticationError::AccountDisabled);
        }

        if !self
            .password_verifier
            .verify(password, &identity.password_hash)?
        {
            tracing::debug!(login, "Authentication rejected: password mismatch");
            return Err(AuthenticationError::InvalidCredentials);
        }

        let issued = self.token_engine.issue(&identity.login)?;
        tracing::info!(login, expires_at = %issued.expires_at, "Token issued");

        Ok(AuthenticationResult {
            access_token: issued.token,
            token_type: TOKEN_TYPE,
            expires_at: issued.expires_at,
        })
    }

    /// Token engine used for issuance, for callers that validate tokens later.
    pub fn token_engine(&self) -> &Arc<TokenEngine> {
        &self.token_engine
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use mockall::mock;
    use mockall::predicate::*;

    use super::*;
    use crate::identity::Identity;
    use crate::password::PasswordHasher;
    use crate::token::TokenConfig;

    mock! {
        pub TestCredentialStore {}

        #[async_trait]
        impl CredentialStore for TestCredentialStore {
            async fn find_by_login(&self, login: &str) -> Result<Option<Identity>, CredentialStoreError>;
        }
    }

    mock! {
        pub TestPasswordVerifier {}

        impl PasswordVerifier for TestPasswordVerifier {
            fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordError>;
        }
    }

    const SECRET: &str = "test_secret_key_at_least_32_bytes!";

    fn token_engine() -> Arc<TokenEngine> {
        Arc::new(TokenEngine::new(TokenConfig::new(SECRET, 3_600_000)))
    }

    fn identity(password: &str, active: Option<bool>) -> Identity {
        Identity {
            login: "a@b.com".to_string(),
            password_hash: PasswordHasher::new().hash(password).unwrap(),
            active,
        }
    }

    fn store_returning(identity: Option<Identity>) -> MockTestCredentialStore {
        let mut store = MockTestCredentialStore::new();
        store
            .expect_find_by_login()
            .with(eq("a@b.com"))
            .times(1)
            .returning(move |_| Ok(identity.clone()));
        store
    }

    fn authenticator<S: CredentialStore, V: PasswordVerifier>(
        store: S,
        verifier: V,
    ) -> Authenticator<S, V> {
        Authenticator::new(Arc::new(store), Arc::new(verifier), token_engine())
    }

    #[tokio::test]
    async fn test_authenticate_success() {
        let store = store_returning(Some(identity("secret123", Some(true))));
        let authenticator = authenticator(store, PasswordHasher::new());

        let result = authenticator
            .authenticate("a@b.com", "secret123")
            .await
            .expect("Authentication failed");

        assert_eq!(result.token_type, "Bearer");
        let engine = authenticator.token_engine();
        assert_eq!(
            engine.decode_subject(&result.access_token).unwrap(),
            "a@b.com"
        );
        assert_eq!(
            engine.decode_expiration(&result.access_token).unwrap(),
            result.expires_at
        );
    }

    #[tokio::test]
    async fn test_authenticate_wrong_password() {
        let store = store_returning(Some(identity("secret123", Some(true))));
        let authenticator = authenticator(store, PasswordHasher::new());

        let result = authenticator.authenticate("a@b.com", "wrong").await;
        assert_eq!(result, Err(AuthenticationError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_authenticate_unknown_login_matches_wrong_password() {
        let store = store_returning(None);
        let mut verifier = MockTestPasswordVerifier::new();
        verifier.expect_verify().times(0);
        let authenticator = authenticator(store, verifier);

        let result = authenticator.authenticate("a@b.com", "secret123").await;
        assert_eq!(result, Err(AuthenticationError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_authenticate_disabled_with_correct_password() {
        let store = store_returning(Some(identity("secret123", Some(false))));
        let authenticator = authenticator(store, PasswordHasher::new());

        let result = authenticator.authenticate("a@b.com", "secret123").await;
        assert_eq!(result, Err(AuthenticationError::AccountDisabled));
    }

    #[tokio::test]
    async fn test_authenticate_disabled_skips_password_check() {
        let store = store_returning(Some(identity("secret123", Some(false))));
        let mut verifier = MockTestPasswordVerifier::new();
        verifier.expect_verify().times(0);
        let authenticator = authenticator(store, verifier);

        let result = authenticator.authenticate("a@b.com", "wrong").await;
        assert_eq!(result, Err(AuthenticationError::AccountDisabled));
    }

    #[tokio::test]
    async fn test_authenticate_unset_active_is_not_disabled() {
        let store = store_returning(Some(identity("secret123", None)));
        let authenticator = authenticator(store, PasswordHasher::new());

        let result = authenticator.authenticate("a@b.com", "secret123").await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_authenticate_unset_active_wrong_password() {
        let store = store_returning(Some(identity("secret123", None)));
        let authenticator = authenticator(store, PasswordHasher::new());

        let result = authenticator.authenticate("a@b.com", "wrong").await;
        assert_eq!(result, Err(AuthenticationError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_authenticate_store_failure() {
        let mut store = MockTestCredentialStore::new();
        store
            .expect_find_by_login()
            .times(1)
            .returning(|_| Err(CredentialStoreError("connection refused".to_string())));
        let authenticator = authenticator(store, PasswordHasher::new());

        let result = authenticator.authenticate("a@b.com", "secret123").await;
        assert!(matches!(
            result,
            Err(AuthenticationError::CredentialStore(_))
        ));
    }

    #[tokio::test]
    async fn test_authenticate_verifier_failure() {
        let store = store_returning(Some(identity("secret123", Some(true))));
        let mut verifier = MockTestPasswordVerifier::new();
        verifier
            .expect_verify()
            .times(1)
            .returning(|_, _| Err(PasswordError::VerificationFailed("bad hash".to_string())));
        let authenticator = authenticator(store, verifier);

        let result = authenticator.authenticate("a@b.com", "secret123").await;
        assert!(matches!(result, Err(AuthenticationError::Password(_))));
    }

    #[tokio::test]
    async fn test_authenticate_without_secret() {
        let store = store_returning(Some(identity("secret123", Some(true))));
        let engine = Arc::new(TokenEngine::new(TokenConfig::new("", 3_600_000)));
        let authenticator =
            Authenticator::new(Arc::new(store), Arc::new(PasswordHasher::new()), engine);

        let result = authenticator.authenticate("a@b.com", "secret123").await;
        assert!(matches!(
            result,
            Err(AuthenticationError::Token(TokenError::Configuration(_)))
        ));
    }
}
