use async_trait::async_trait;

use crate::branch::errors::BranchError;
use crate::branch::models::Branch;
use crate::branch::models::Login;
use crate::branch::models::LoginCommand;

/// Port for branch domain service operations.
#[async_trait]
pub trait BranchServicePort: Send + Sync + 'static {
    /// Authenticate a branch and issue a bearer token.
    ///
    /// # Arguments
    /// * `command` - Submitted login and plaintext password
    ///
    /// # Returns
    /// Access token, token type and expiration
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown login or wrong password
    /// * `Disabled` - Branch is explicitly deactivated
    /// * `DatabaseError` - Database operation failed
    /// * `Authentication` - Password verification or token issuance failed
    async fn login(&self, command: LoginCommand)
        -> Result<auth::AuthenticationResult, BranchError>;

    /// Retrieve branch by unique login.
    ///
    /// # Errors
    /// * `NotFoundByLogin` - No branch with this login
    /// * `DatabaseError` - Database operation failed
    async fn get_branch_by_login(&self, login: &Login) -> Result<Branch, BranchError>;
}

/// Persistence operations for branch aggregate.
#[async_trait]
pub trait BranchRepository: Send + Sync + 'static {
    /// Retrieve branch by login.
    ///
    /// # Returns
    /// Optional branch entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_login(&self, login: &Login) -> Result<Option<Branch>, BranchError>;
}
