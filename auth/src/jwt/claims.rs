use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Default session lifetime.
pub const DEFAULT_EXPIRATION_HOURS: i64 = 24;

/// Session token claims.
///
/// Identity is carried as the RFC 7519 `sub` claim (user identifier) plus the
/// username; `iat` and `exp` are Unix timestamps.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (user identifier)
    pub sub: String,

    /// Username at the time the token was issued
    pub username: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Create claims for a user, issued now.
    ///
    /// # Arguments
    /// * `user_id` - Unique user identifier
    /// * `username` - Username
    /// * `expiration_hours` - Hours until token expires
    ///
    /// # Returns
    /// Claims with sub, username, iat and exp set
    pub fn for_user(
        user_id: impl ToString,
        username: impl Into<String>,
        expiration_hours: i64,
    ) -> Self {
        Self::for_user_at(user_id, username, expiration_hours, Utc::now())
    }

    /// Create claims for a user with an explicit issue time.
    pub fn for_user_at(
        user_id: impl ToString,
        username: impl Into<String>,
        expiration_hours: i64,
        issued_at: DateTime<Utc>,
    ) -> Self {
        let expiration = issued_at + Duration::hours(expiration_hours);

        Self {
            sub: user_id.to_string(),
            username: username.into(),
            iat: issued_at.timestamp(),
            exp: expiration.timestamp(),
        }
    }
}
