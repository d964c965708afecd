pub mod argon2;
pub mod errors;

pub use self::argon2::Argon2Hasher;
pub use errors::PasswordError;

/// One-way password hashing primitive.
///
/// Plaintext passwords only live for the duration of a single call.
pub trait PasswordHasher: Send + Sync + 'static {
    /// Hash a plaintext password for storage.
    ///
    /// # Errors
    /// * `HashingFailed` - Hashing operation failed
    fn hash(&self, password: &str) -> Result<String, PasswordError>;

    /// Check a plaintext password against a stored hash.
    ///
    /// # Returns
    /// True if password matches, false otherwise
    ///
    /// # Errors
    /// * `VerificationFailed` - Stored hash could not be parsed
    fn matches(&self, password: &str, hash: &str) -> Result<bool, PasswordError>;
}
