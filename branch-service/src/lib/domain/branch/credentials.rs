use std::sync::Arc;

use async_trait::async_trait;
use auth::CredentialStore;
use auth::CredentialStoreError;
use auth::Identity;

use crate::branch::errors::BranchError;
use crate::branch::models::Login;
use crate::branch::ports::BranchRepository;

/// Exposes a [`BranchRepository`] as the authenticator's credential store.
pub struct BranchCredentials<R: BranchRepository> {
    repository: Arc<R>,
}

impl<R: BranchRepository> BranchCredentials<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R: BranchRepository> CredentialStore for BranchCredentials<R> {
    async fn find_by_login(&self, login: &str) -> Result<Option<Identity>, CredentialStoreError> {
        // A login that could never have been stored is simply unknown.
        let Ok(login) = Login::new(login.to_string()) else {
            return Ok(None);
        };

        self.repository
            .find_by_login(&login)
            .await
            .map(|branch| branch.as_ref().map(Identity::from))
            .map_err(|e| match e {
                BranchError::DatabaseError(message) => CredentialStoreError(message),
                other => CredentialStoreError(other.to_string()),
            })
    }
}
