use std::fmt;

use super::errors::SecretError;

/// Symmetric key used to sign and verify tokens.
///
/// Length is checked once, at construction, so a `SigningSecret` that exists
/// is always usable. The bytes never appear in `Debug` output.
#[derive(Clone)]
pub struct SigningSecret(Vec<u8>);

impl SigningSecret {
    /// Minimum key length for HS256 (256 bits).
    pub const MIN_LENGTH: usize = 32;

    /// Validate and wrap raw key material.
    ///
    /// # Errors
    /// * `Empty` - No key material at all
    /// * `TooShort` - Fewer than [`Self::MIN_LENGTH`] bytes
    pub fn new(secret: impl Into<Vec<u8>>) -> Result<Self, SecretError> {
        let secret = secret.into();

        if secret.is_empty() {
            return Err(SecretError::Empty);
        }

        if secret.len() < Self::MIN_LENGTH {
            return Err(SecretError::TooShort {
                minimum: Self::MIN_LENGTH,
                actual: secret.len(),
            });
        }

        Ok(Self(secret))
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for SigningSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SigningSecret(<redacted>)")
    }
}
