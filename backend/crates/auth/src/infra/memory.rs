//! In-Memory Store Implementations
//!
//! Same contract as the PostgreSQL stores, including email uniqueness.
//! Used by tests and by `STORE_BACKEND=memory` local runs.

use std::collections::HashMap;

use tokio::sync::RwLock;

use crate::domain::entity::{auth_record::AuthRecord, profile_record::ProfileRecord};
use crate::domain::repository::{CredentialStore, ProfileStore};
use crate::domain::value_object::{email::Email, user_id::UserId};
use crate::error::{AuthError, AuthResult};

#[derive(Debug, Default)]
pub struct InMemoryCredentialStore {
    records: RwLock<HashMap<UserId, AuthRecord>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delete a credential record
    ///
    /// Tokens already issued for it keep a valid signature but no longer
    /// resolve to an identity.
    pub async fn remove(&self, user_id: &UserId) -> Option<AuthRecord> {
        self.records.write().await.remove(user_id)
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

impl CredentialStore for InMemoryCredentialStore {
    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<AuthRecord>> {
        let records = self.records.read().await;
        Ok(records.values().find(|r| &r.email == email).cloned())
    }

    async fn find_by_identifier(&self, user_id: &UserId) -> AuthResult<Option<AuthRecord>> {
        Ok(self.records.read().await.get(user_id).cloned())
    }

    async fn insert(&self, record: &AuthRecord) -> AuthResult<UserId> {
        // Check and insert under one write lock, like a unique index
        let mut records = self.records.write().await;

        if records.contains_key(&record.user_id) || records.values().any(|r| r.email == record.email) {
            return Err(AuthError::Conflict);
        }

        records.insert(record.user_id, record.clone());
        Ok(record.user_id)
    }
}

#[derive(Debug, Default)]
pub struct InMemoryProfileStore {
    records: RwLock<HashMap<UserId, ProfileRecord>>,
}

impl InMemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

impl ProfileStore for InMemoryProfileStore {
    async fn find_by_identifier(&self, user_id: &UserId) -> AuthResult<Option<ProfileRecord>> {
        Ok(self.records.read().await.get(user_id).cloned())
    }

    async fn insert(&self, record: &ProfileRecord) -> AuthResult<()> {
        let mut records = self.records.write().await;

        if records.contains_key(&record.user_id) {
            return Err(AuthError::Internal(format!(
                "Profile already exists for {}",
                record.user_id
            )));
        }

        records.insert(record.user_id, record.clone());
        Ok(())
    }
}
