use std::fmt;

use crate::branch::errors::LoginError;

/// Branch aggregate entity.
///
/// A registered branch office that signs in with its own login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Branch {
    pub id: BranchId,
    pub name: String,
    pub login: Login,
    pub password_hash: String,
    /// Tri-state: `None` has never been set and does not disable the branch.
    pub active: Option<bool>,
}

impl From<&Branch> for auth::Identity {
    fn from(branch: &Branch) -> Self {
        Self {
            login: branch.login.as_str().to_string(),
            password_hash: branch.password_hash.clone(),
            active: branch.active,
        }
    }
}

/// Branch unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BranchId(pub i32);

impl fmt::Display for BranchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Login value type
///
/// Case-sensitive, non-empty and at most 100 characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Login(String);

impl Login {
    const MAX_LENGTH: usize = 100;

    /// Create a new valid login.
    ///
    /// # Errors
    /// * `Empty` - Login is the empty string
    /// * `TooLong` - Login longer than 100 characters
    pub fn new(login: String) -> Result<Self, LoginError> {
        let length = login.chars().count();
        if length == 0 {
            Err(LoginError::Empty)
        } else if length > Self::MAX_LENGTH {
            Err(LoginError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(login))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Login {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Credentials submitted to the login endpoint.
#[derive(Clone)]
pub struct LoginCommand {
    pub login: String,
    pub password: String,
}

impl fmt::Debug for LoginCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCommand")
            .field("login", &self.login)
            .finish_non_exhaustive()
    }
}
