//! Profile Record Entity
//!
//! Non-secret profile fields, owned exclusively by the profile store and
//! keyed by the same identifier as the credential record.

use chrono::{DateTime, Utc};

use crate::domain::value_object::user_id::UserId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileRecord {
    pub user_id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub mobile: String,
    pub created_at: DateTime<Utc>,
}

impl ProfileRecord {
    pub fn new(
        user_id: UserId,
        first_name: String,
        last_name: String,
        username: String,
        mobile: String,
    ) -> Self {
        Self {
            user_id,
            first_name,
            last_name,
            username,
            mobile,
            created_at: Utc::now(),
        }
    }
}
