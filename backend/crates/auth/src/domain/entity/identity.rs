//! Identity
//!
//! Read-only view of a user composed per request from one credential
//! record and one profile record. It has no password field, so a hash can
//! never leak through it.

use crate::domain::entity::{auth_record::AuthRecord, profile_record::ProfileRecord};
use crate::domain::value_object::{email::Email, user_id::UserId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: UserId,
    pub email: Email,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub mobile: String,
}

impl Identity {
    /// Merge the non-secret fields of both records
    ///
    /// Returns `None` if the records belong to different identifiers.
    pub fn from_records(auth: &AuthRecord, profile: ProfileRecord) -> Option<Self> {
        if auth.user_id != profile.user_id {
            return None;
        }

        Some(Self {
            user_id: auth.user_id,
            email: auth.email.clone(),
            first_name: profile.first_name,
            last_name: profile.last_name,
            username: profile.username,
            mobile: profile.mobile,
        })
    }
}
