use thiserror::Error;

/// Why a token failed verification.
///
/// These kinds exist for diagnostics and tests. Anything that answers an
/// external caller must collapse them into [`InvalidToken`] first.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("Token is malformed: {0}")]
    Malformed(String),

    #[error("Token signature is invalid")]
    InvalidSignature,

    #[error("Token is expired")]
    Expired,
}

impl TokenError {
    /// Short label for structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            TokenError::Malformed(_) => "malformed",
            TokenError::InvalidSignature => "invalid_signature",
            TokenError::Expired => "expired",
        }
    }
}

/// Boundary form of every [`TokenError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Invalid or expired token")]
pub struct InvalidToken;

impl From<TokenError> for InvalidToken {
    fn from(_: TokenError) -> Self {
        InvalidToken
    }
}

/// Error type for token issuance.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IssueError {
    #[error("Token subject must not be empty")]
    EmptySubject,

    #[error("Token expiry is out of range")]
    ExpiryOutOfRange,

    #[error("Failed to sign token: {0}")]
    Signing(String),
}

/// Signing secret rejected at startup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SecretError {
    #[error("Signing secret is empty")]
    Empty,

    #[error("Signing secret too short: minimum {minimum} bytes, got {actual}")]
    TooShort { minimum: usize, actual: usize },
}

/// Token settings rejected at startup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    #[error(transparent)]
    Secret(#[from] SecretError),

    #[error("Token TTL must be at least one second, got {seconds}s")]
    TtlTooShort { seconds: i64 },

    #[error("Token TTL too long: maximum {maximum}s, got {seconds}s")]
    TtlTooLong { maximum: i64, seconds: i64 },
}
