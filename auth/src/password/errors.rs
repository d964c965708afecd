use thiserror::Error;

/// Failure of the hashing primitive itself, as opposed to a password that
/// simply does not match.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    /// Stored hash is unreadable (corrupt record, unknown algorithm)
    #[error("Password verification failed: {0}")]
    VerificationFailed(String),
}
