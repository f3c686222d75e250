//! Auth Record Entity
//!
//! Authentication credentials, owned exclusively by the credential store.
//! Created at registration and never mutated afterwards.

use chrono::{DateTime, Utc};

use crate::domain::value_object::{email::Email, user_id::UserId, user_password::UserPassword};

/// Credential record: identifier, unique email, password hash
#[derive(Debug, Clone)]
pub struct AuthRecord {
    pub user_id: UserId,
    /// Unique within the credential store
    pub email: Email,
    /// Argon2id hash; never logged, serialized or returned
    pub password_hash: UserPassword,
    pub created_at: DateTime<Utc>,
}

impl AuthRecord {
    pub fn new(user_id: UserId, email: Email, password_hash: UserPassword) -> Self {
        Self {
            user_id,
            email,
            password_hash,
            created_at: Utc::now(),
        }
    }
}
