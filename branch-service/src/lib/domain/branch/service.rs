use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationResult;
use auth::Authenticator;
use auth::PasswordHasher;
use auth::TokenEngine;

use crate::branch::credentials::BranchCredentials;
use crate::branch::errors::BranchError;
use crate::branch::models::Branch;
use crate::branch::models::Login;
use crate::branch::models::LoginCommand;
use crate::branch::ports::BranchRepository;
use crate::branch::ports::BranchServicePort;

/// Domain service implementation for branch operations.
///
/// Concrete implementation of BranchServicePort with dependency injection.
pub struct BranchService<R>
where
    R: BranchRepository,
{
    repository: Arc<R>,
    authenticator: Authenticator<BranchCredentials<R>, PasswordHasher>,
}

impl<R> BranchService<R>
where
    R: BranchRepository,
{
    /// Create a new branch service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Branch persistence implementation
    /// * `token_engine` - Shared token engine used to sign issued tokens
    pub fn new(repository: Arc<R>, token_engine: Arc<TokenEngine>) -> Self {
        let credentials = Arc::new(BranchCredentials::new(Arc::clone(&repository)));

        Self {
            repository,
            authenticator: Authenticator::new(
                credentials,
                Arc::new(PasswordHasher::new()),
                token_engine,
            ),
        }
    }
}

#[async_trait]
impl<R> BranchServicePort for BranchService<R>
where
    R: BranchRepository,
{
    async fn login(&self, command: LoginCommand) -> Result<AuthenticationResult, BranchError> {
        self.authenticator
            .authenticate(&command.login, &command.password)
            .await
            .map_err(|e| {
                if !matches!(
                    e,
                    auth::AuthenticationError::InvalidCredentials
                        | auth::AuthenticationError::AccountDisabled
                ) {
                    tracing::error!(login = %command.login, error = %e, "Branch login failed");
                }
                BranchError::from(e)
            })
    }

    async fn get_branch_by_login(&self, login: &Login) -> Result<Branch, BranchError> {
        self.repository
            .find_by_login(login)
            .await?
            .ok_or(BranchError::NotFoundByLogin(login.to_string()))
    }
}
