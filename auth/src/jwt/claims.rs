use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

/// Claims carried by an access token.
///
/// Field names follow RFC 7519 where a registered claim exists; `role` is
/// private. Every field is required, so a payload missing one of them fails
/// to deserialize.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (username)
    pub sub: String,

    /// Role used for authorization decisions downstream
    pub role: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// JWT ID, random per token
    pub jti: String,
}

impl Claims {
    /// Build claims for a token issued at `now` and valid for `ttl`.
    ///
    /// Returns `None` if the expiry falls outside the representable range.
    ///
    /// # Arguments
    /// * `subject` - Username the token is issued to
    /// * `role` - Role of that user
    /// * `now` - Issuance instant
    /// * `ttl` - Time to live
    pub fn new(
        subject: impl ToString,
        role: impl ToString,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> Option<Self> {
        let expires = now.checked_add_signed(ttl)?;

        Some(Self {
            sub: subject.to_string(),
            role: role.to_string(),
            iat: now.timestamp(),
            exp: expires.timestamp(),
            jti: Uuid::new_v4().to_string(),
        })
    }

    /// Check if token is expired.
    ///
    /// `exp` marks the last valid instant: a token is expired from any moment
    /// strictly after it, sub-second precision included.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        (now.timestamp(), now.timestamp_subsec_nanos()) > (self.exp, 0)
    }

    pub fn issued_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.iat, 0).unwrap_or_default()
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or_default()
    }
}
