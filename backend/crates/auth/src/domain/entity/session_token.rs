//! Session Token
//!
//! Stateless, self-contained proof of a prior successful login. Validity
//! is decided entirely by signature and expiry; nothing is stored
//! server-side.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::value_object::user_id::UserId;

/// Fixed session lifetime in seconds (8 minutes). There is no revocation
/// list, so this bounds how long a leaked token stays usable.
pub const SESSION_TOKEN_TTL_SECS: i64 = 8 * 60;

pub fn session_token_ttl() -> TimeDelta {
    TimeDelta::seconds(SESSION_TOKEN_TTL_SECS)
}

/// Registered JWT claims carried by a session token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject: the user identifier
    pub sub: String,
    /// Issued at (seconds since the epoch)
    pub iat: i64,
    /// Expires at (seconds since the epoch)
    pub exp: i64,
}

/// An issued session token and the facts it asserts
#[derive(Clone)]
pub struct SessionToken {
    subject: UserId,
    issued_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
    token: String,
}

impl SessionToken {
    pub fn new(
        subject: UserId,
        issued_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
        token: String,
    ) -> Self {
        Self {
            subject,
            issued_at,
            expires_at,
            token,
        }
    }

    pub fn subject(&self) -> &UserId {
        &self.subject
    }

    pub fn issued_at(&self) -> DateTime<Utc> {
        self.issued_at
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Whole seconds left before expiry, as of `now`
    pub fn remaining_secs(&self, now: DateTime<Utc>) -> i64 {
        (self.expires_at - now).num_seconds().max(0)
    }

    /// The signed token string for transport
    pub fn as_str(&self) -> &str {
        &self.token
    }

    pub fn into_string(self) -> String {
        self.token
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionToken")
            .field("subject", &self.subject)
            .field("issued_at", &self.issued_at)
            .field("expires_at", &self.expires_at)
            .field("token", &"[REDACTED]")
            .finish()
    }
}
