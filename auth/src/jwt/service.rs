use std::sync::Arc;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::InvalidToken;
use super::errors::IssueError;
use super::errors::SettingsError;
use super::errors::TokenError;
use super::secret::SigningSecret;
use crate::clock::Clock;
use crate::clock::SystemClock;

/// Signing key and expiry policy, fixed for the life of a [`TokenService`].
#[derive(Debug, Clone)]
pub struct TokenSettings {
    secret: SigningSecret,
    ttl: Duration,
}

impl TokenSettings {
    pub const DEFAULT_TTL_SECONDS: i64 = 3600;

    /// Longest accepted token lifetime: one year.
    pub const MAX_TTL_SECONDS: i64 = 365 * 24 * 60 * 60;

    /// Build settings, rejecting lifetimes outside `1..=MAX_TTL_SECONDS`.
    ///
    /// # Errors
    /// * `TtlTooShort` - Zero, negative, or under one second
    /// * `TtlTooLong` - Longer than [`MAX_TTL_SECONDS`](Self::MAX_TTL_SECONDS)
    pub fn new(secret: SigningSecret, ttl: Duration) -> Result<Self, SettingsError> {
        if ttl < Duration::seconds(1) {
            return Err(SettingsError::TtlTooShort {
                seconds: ttl.num_seconds(),
            });
        }

        if ttl > Duration::seconds(Self::MAX_TTL_SECONDS) {
            return Err(SettingsError::TtlTooLong {
                maximum: Self::MAX_TTL_SECONDS,
                seconds: ttl.num_seconds(),
            });
        }

        Ok(Self { secret, ttl })
    }
}

/// Identity extracted from a verified token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub subject: String,
    pub role: String,
}

/// A freshly signed access token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    /// Compact JWT, ready for an `Authorization: Bearer` header
    pub access_token: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// Issues and verifies HS256 access tokens.
///
/// Holds no mutable state: one instance can be shared across threads and
/// requests behind an `Arc`.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    validation: Validation,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl TokenService {
    /// Create a token service.
    ///
    /// # Arguments
    /// * `settings` - Validated secret and token lifetime
    /// * `clock` - Time source for `iat`/`exp` and expiry checks
    pub fn new(settings: TokenSettings, clock: Arc<dyn Clock>) -> Self {
        let algorithm = Algorithm::HS256;

        let mut validation = Validation::new(algorithm);
        // Expiry is checked against the injected clock, not the system time
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["sub", "exp"]);

        Self {
            encoding_key: EncodingKey::from_secret(settings.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(settings.secret.as_bytes()),
            algorithm,
            validation,
            ttl: settings.ttl,
            clock,
        }
    }

    /// Create a token service reading the operating system clock.
    pub fn with_system_clock(settings: TokenSettings) -> Self {
        Self::new(settings, Arc::new(SystemClock))
    }

    /// Sign a new token for `subject` carrying `role`.
    ///
    /// # Errors
    /// * `EmptySubject` - `subject` is empty
    /// * `ExpiryOutOfRange` - The clock is too close to the end of time for `ttl`
    /// * `Signing` - The JWT encoder rejected the claims or key
    pub fn issue(&self, subject: &str, role: &str) -> Result<IssuedToken, IssueError> {
        if subject.is_empty() {
            return Err(IssueError::EmptySubject);
        }

        let claims = Claims::new(subject, role, self.clock.now(), self.ttl)
            .ok_or(IssueError::ExpiryOutOfRange)?;
        let header = Header::new(self.algorithm);

        let access_token = encode(&header, &claims, &self.encoding_key)
            .map_err(|e| IssueError::Signing(e.to_string()))?;

        Ok(IssuedToken {
            access_token,
            issued_at: claims.issued_at(),
            expires_at: claims.expires_at(),
        })
    }

    /// Verify a token and return the identity it carries.
    ///
    /// Checks, in order: structure, signature (constant-time), claim shape,
    /// expiry. The first failing check decides the error.
    ///
    /// # Errors
    /// * `Malformed` - Not a JWT, undecodable parts, or missing claims
    /// * `InvalidSignature` - Tampered, signed with another key, or another algorithm
    /// * `Expired` - Current time is past `exp`, even by a fraction of a second
    pub fn verify(&self, token: &str) -> Result<Principal, TokenError> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                        TokenError::InvalidSignature
                    }
                    ErrorKind::ExpiredSignature => TokenError::Expired,
                    _ => TokenError::Malformed(e.to_string()),
                }
            })?;

        let claims = token_data.claims;

        if claims.sub.is_empty() {
            return Err(TokenError::Malformed("empty subject".to_string()));
        }

        if claims.is_expired(self.clock.now()) {
            return Err(TokenError::Expired);
        }

        Ok(Principal {
            subject: claims.sub,
            role: claims.role,
        })
    }

    /// Verify a token for an external caller.
    ///
    /// Same checks as [`verify`](Self::verify), but every failure is reported
    /// as the same [`InvalidToken`].
    pub fn validate(&self, token: &str) -> Result<Principal, InvalidToken> {
        self.verify(token).map_err(|e| {
            tracing::debug!(kind = e.kind(), "Token rejected");
            InvalidToken::from(e)
        })
    }

    /// Subject and role of a valid token, `None` otherwise.
    pub fn subject_and_role(&self, token: &str) -> Option<Principal> {
        self.verify(token).ok()
    }
}
