use super::errors::PasswordError;

/// Checks a plaintext password against a stored hash.
pub trait PasswordVerifier: Send + Sync + 'static {
    /// # Returns
    /// True if password matches, false otherwise
    ///
    /// # Errors
    /// * `VerificationFailed` - Stored hash could not be interpreted
    fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordError>;
}
