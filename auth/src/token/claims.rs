use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Claims carried by every access token the service issues.
///
/// The subject is the user identifier; the account email is carried
/// alongside it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    /// Subject (user identifier)
    pub sub: String,

    /// Email address of the subject
    pub email: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Create claims for a user, expiring after `validity` from now.
    pub fn new(subject: impl ToString, email: impl ToString, validity: Duration) -> Self {
        let now = Utc::now();

        Self {
            sub: subject.to_string(),
            email: email.to_string(),
            iat: now.timestamp(),
            exp: (now + validity).timestamp(),
        }
    }
}
