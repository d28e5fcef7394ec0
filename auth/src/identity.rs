use async_trait::async_trait;
use thiserror::Error;

/// An authenticatable principal as seen by the authenticator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub login: String,
    pub password_hash: String,
    /// `None` means the flag was never set, which is not the same as disabled.
    pub active: Option<bool>,
}

impl Identity {
    /// Disabled only when the flag is explicitly `false`.
    pub fn is_disabled(&self) -> bool {
        self.active == Some(false)
    }
}

/// Failure of the backing store while looking up an identity.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Credential store failure: {0}")]
pub struct CredentialStoreError(pub String);

/// Lookup of identities by login.
#[async_trait]
pub trait CredentialStore: Send + Sync + 'static {
    /// Find the identity registered under `login` (case-sensitive).
    ///
    /// # Returns
    /// Optional identity (None if no such login)
    ///
    /// # Errors
    /// * `CredentialStoreError` - Backing store could not be queried
    async fn find_by_login(&self, login: &str) -> Result<Option<Identity>, CredentialStoreError>;
}
