//! Branch authentication core
//!
//! - Token engine: HS256 bearer token issuance and staged validation
//! - Authenticator: login lookup, active check, password check, token issuance
//! - Password verification (Argon2id)
//!
//! Storage and transport stay outside this crate: callers plug in a
//! [`CredentialStore`] and reuse the [`TokenEngine`] to check incoming tokens.
//!
//! # Examples
//!
//! ## Tokens
//! ```
//! use auth::{TokenConfig, TokenEngine, TokenError};
//!
//! let engine = TokenEngine::new(TokenConfig::new("secret_key_at_least_32_bytes_long!", 3_600_000));
//! let issued = engine.issue("a@b.com").unwrap();
//!
//! assert_eq!(engine.decode_subject(&issued.token).unwrap(), "a@b.com");
//! assert!(engine.is_valid(&issued.token, "a@b.com"));
//! assert_eq!(engine.decode_subject("a.b"), Err(TokenError::MalformedToken("expected 3 segments, found 2".to_string())));
//! ```
//!
//! ## Password Hashing
//! ```
//! use auth::{PasswordHasher, PasswordVerifier};
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).unwrap());
//! ```

pub mod authenticator;
pub mod identity;
pub mod password;
pub mod token;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use authenticator::TOKEN_TYPE;
pub use identity::CredentialStore;
pub use identity::CredentialStoreError;
pub use identity::Identity;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use password::PasswordVerifier;
pub use token::Claims;
pub use token::Clock;
pub use token::IssuedToken;
pub use token::ManualClock;
pub use token::SystemClock;
pub use token::TokenConfig;
pub use token::TokenEngine;
pub use token::TokenError;
