//! Vended credential value type

use chrono::{DateTime, Duration, Utc};

/// Temporary storage credentials emitted by the vendor.
///
/// Ephemeral: produced once per vend call and never stored by the vendor.
/// On the dynamic path `expires_at` is issuance time plus the fixed vend
/// duration; the static pass-through path leaves it unset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemporaryCredentials {
    /// AWS access key ID
    pub access_key_id: String,
    /// AWS secret access key
    pub secret_access_key: String,
    /// Session token
    pub session_token: String,
    /// Credential expiration time (wall-clock); unset for static pass-through
    pub expires_at: Option<DateTime<Utc>>,
}

impl TemporaryCredentials {
    /// Check if credentials are expired or will expire within buffer.
    ///
    /// Uses a 30-second buffer so consumers refresh before actual expiration.
    pub fn is_expired(&self) -> bool {
        if let Some(exp) = self.expires_at {
            Utc::now() + Duration::seconds(30) >= exp
        } else {
            false // static pass-through credentials carry no expiration
        }
    }

    /// Get seconds until expiration, or None if no expiration set.
    pub fn seconds_until_expiry(&self) -> Option<i64> {
        self.expires_at.map(|exp| (exp - Utc::now()).num_seconds())
    }
}
