//! Repository Traits
//!
//! The credential store and the profile store are independent. They may
//! live in one database or two, and no transaction ever spans both.

use crate::domain::entity::{auth_record::AuthRecord, profile_record::ProfileRecord};
use crate::domain::value_object::{email::Email, user_id::UserId};
use crate::error::AuthResult;

/// Credential store: owns auth records
#[trait_variant::make(CredentialStore: Send)]
pub trait LocalCredentialStore {
    /// Find the credential record registered under `email`
    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<AuthRecord>>;

    /// Find the credential record for `user_id`
    async fn find_by_identifier(&self, user_id: &UserId) -> AuthResult<Option<AuthRecord>>;

    /// Durably write a new record and return its identifier
    ///
    /// Must fail with `AuthError::Conflict` when the email is already
    /// present. This constraint is the only real uniqueness guarantee.
    async fn insert(&self, record: &AuthRecord) -> AuthResult<UserId>;
}

/// Profile store: owns profile records
#[trait_variant::make(ProfileStore: Send)]
pub trait LocalProfileStore {
    /// Find the profile record for `user_id`
    async fn find_by_identifier(&self, user_id: &UserId) -> AuthResult<Option<ProfileRecord>>;

    /// Durably write a new profile. Any failure is internal.
    async fn insert(&self, record: &ProfileRecord) -> AuthResult<()>;
}
