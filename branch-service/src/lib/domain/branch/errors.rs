use thiserror::Error;

/// Error for Login validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LoginError {
    #[error("Login must not be empty")]
    Empty,

    #[error("Login too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Top-level error for all branch-related operations
#[derive(Debug, Clone, Error)]
pub enum BranchError {
    #[error("Invalid login: {0}")]
    InvalidLogin(#[from] LoginError),

    // Domain-level errors
    #[error("Branch not found with login: {0}")]
    NotFoundByLogin(String),

    #[error("Invalid login or password")]
    InvalidCredentials,

    #[error("Branch is disabled")]
    Disabled,

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Authentication failure: {0}")]
    Authentication(String),
}

impl From<auth::AuthenticationError> for BranchError {
    fn from(err: auth::AuthenticationError) -> Self {
        match err {
            auth::AuthenticationError::InvalidCredentials => BranchError::InvalidCredentials,
            auth::AuthenticationError::AccountDisabled => BranchError::Disabled,
            auth::AuthenticationError::CredentialStore(e) => BranchError::DatabaseError(e.0),
            auth::AuthenticationError::Password(_) | auth::AuthenticationError::Token(_) => {
                BranchError::Authentication(err.to_string())
            }
        }
    }
}
